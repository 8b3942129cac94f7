//! The fixed business rule gating submission.
//!
//! Narrower than the schema-structural validator by design: five mandatory
//! fields must be non-empty and the optional-identifier pair must be either
//! both empty or both filled. A field absent from the row's schema-derived
//! set counts as empty.

use aspect_model::{Row, RowId};

/// Fields that must be non-empty for a row to be submittable.
pub const MANDATORY_FIELDS: [&str; 5] = [
    "part_instance_id",
    "manufacturing_date",
    "manufacturer_part_id",
    "classification",
    "name_at_manufacturer",
];

/// Paired optional-identifier fields: both empty or both filled.
pub const OPTIONAL_IDENTIFIER_KEY: &str = "optional_identifier_key";
pub const OPTIONAL_IDENTIFIER_VALUE: &str = "optional_identifier_value";

/// Fixed user-facing message shown when submission is blocked.
pub const INVALID_DATA_MESSAGE: &str = "Part Instance ID, Manufacturing Date, Manufacturer Part \
     ID, Classification and Name of Manufacturer fields are required. Optional Identifier Value \
     and Optional Identifier Key must either be empty or both filled.";

fn is_filled(row: &Row, field: &str) -> bool {
    row.get(field).is_some_and(|value| !value.is_empty())
}

/// Check one row against the business rule.
pub fn validate_row(row: &Row) -> bool {
    if MANDATORY_FIELDS.iter().any(|field| !is_filled(row, field)) {
        return false;
    }
    is_filled(row, OPTIONAL_IDENTIFIER_KEY) == is_filled(row, OPTIONAL_IDENTIFIER_VALUE)
}

/// Ids of every row in the set failing [`validate_row`], in row order.
pub fn invalid_rows(rows: &[Row]) -> Vec<RowId> {
    rows.iter()
        .filter(|row| !validate_row(row))
        .map(Row::id)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn full_row(id: u64) -> Row {
        let template: BTreeMap<String, String> = [
            "uuid",
            "part_instance_id",
            "manufacturing_date",
            "manufacturing_country",
            "manufacturer_part_id",
            "customer_part_id",
            "classification",
            "name_at_manufacturer",
            "name_at_customer",
            OPTIONAL_IDENTIFIER_KEY,
            OPTIONAL_IDENTIFIER_VALUE,
        ]
        .iter()
        .map(|field| ((*field).to_string(), String::new()))
        .collect();
        Row::from_template(RowId::new(id), &template)
    }

    fn valid_row(id: u64) -> Row {
        let mut row = full_row(id);
        row.set("part_instance_id", "NO-001").unwrap();
        row.set("manufacturing_date", "2022-02-04T14:48:54").unwrap();
        row.set("manufacturer_part_id", "123-0.740-3434-A").unwrap();
        row.set("classification", "component").unwrap();
        row.set("name_at_manufacturer", "Mirror left").unwrap();
        row
    }

    #[test]
    fn accepts_all_mandatory_filled_and_pair_empty() {
        assert!(validate_row(&valid_row(1)));
    }

    #[test]
    fn rejects_empty_part_instance_id_regardless_of_other_fields() {
        let mut row = valid_row(1);
        row.set("part_instance_id", "").unwrap();
        row.set(OPTIONAL_IDENTIFIER_KEY, "van").unwrap();
        row.set(OPTIONAL_IDENTIFIER_VALUE, "x").unwrap();
        assert!(!validate_row(&row));
    }

    #[test]
    fn rejects_each_missing_mandatory_field() {
        for field in MANDATORY_FIELDS {
            let mut row = valid_row(1);
            row.set(field, "").unwrap();
            assert!(!validate_row(&row), "{field} empty must reject");
        }
    }

    #[test]
    fn optional_identifier_pair_must_match() {
        let mut key_only = valid_row(1);
        key_only.set(OPTIONAL_IDENTIFIER_KEY, "van").unwrap();
        assert!(!validate_row(&key_only));

        let mut value_only = valid_row(2);
        value_only.set(OPTIONAL_IDENTIFIER_VALUE, "VIN123").unwrap();
        assert!(!validate_row(&value_only));

        let mut both = valid_row(3);
        both.set(OPTIONAL_IDENTIFIER_KEY, "van").unwrap();
        both.set(OPTIONAL_IDENTIFIER_VALUE, "VIN123").unwrap();
        assert!(validate_row(&both));
    }

    #[test]
    fn invalid_rows_reports_ids_in_row_order() {
        let rows = vec![valid_row(1), full_row(2), full_row(3)];
        assert_eq!(invalid_rows(&rows), vec![RowId::new(2), RowId::new(3)]);
        assert!(invalid_rows(&[valid_row(4)]).is_empty());
    }
}
