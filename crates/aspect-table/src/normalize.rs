//! Cell edit normalization.

use aspect_model::URN_FIELD;

use crate::urn::URN_PREFIX;

/// Normalize a single cell edit before it is stored.
///
/// A non-empty value for the URN identifier field gets the `urn:uuid:` prefix
/// unless it already carries one; every other field passes through unchanged.
/// Idempotent: an already-prefixed value is never prefixed again.
pub fn normalize_cell(field: &str, value: &str) -> String {
    if field == URN_FIELD && !value.is_empty() && !value.starts_with(URN_PREFIX) {
        format!("{URN_PREFIX}{value}")
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefixes_bare_identifier_values() {
        assert_eq!(normalize_cell(URN_FIELD, "abc"), "urn:uuid:abc");
    }

    #[test]
    fn is_idempotent_for_the_identifier_field() {
        let once = normalize_cell(URN_FIELD, "abc");
        let twice = normalize_cell(URN_FIELD, &once);
        assert_eq!(once, "urn:uuid:abc");
        assert_eq!(twice, "urn:uuid:abc");
    }

    #[test]
    fn leaves_empty_identifier_values_alone() {
        assert_eq!(normalize_cell(URN_FIELD, ""), "");
    }

    #[test]
    fn passes_other_fields_through() {
        assert_eq!(normalize_cell("part_instance_id", "abc"), "abc");
        assert_eq!(normalize_cell("manufacturing_date", ""), "");
    }
}
