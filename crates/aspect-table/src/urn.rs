//! URN-formatted row identifiers.

use uuid::Uuid;

/// Prefix of every URN identifier, `urn:uuid:<v4-uuid>`.
pub const URN_PREFIX: &str = "urn:uuid:";

/// Generate a fresh URN identifier. Uniqueness is probabilistic with
/// standard UUIDv4 semantics.
pub fn new_urn() -> String {
    format!("{URN_PREFIX}{}", Uuid::new_v4())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn urn_has_the_expected_shape() {
        let urn = new_urn();
        let suffix = urn.strip_prefix(URN_PREFIX).expect("urn prefix");
        assert_eq!(suffix.len(), 36);
        assert!(
            suffix
                .chars()
                .all(|c| c.is_ascii_hexdigit() || c == '-')
        );
        assert_eq!(suffix.matches('-').count(), 4);
    }

    #[test]
    fn urns_differ_between_calls() {
        assert_ne!(new_urn(), new_urn());
    }
}
