//! Tests for aspect-model types.

use aspect_model::{
    DataKind, ModelError, Row, RowId, SubmodelDescription, URN_FIELD, derive_columns,
};

const SERIAL_PART_SCHEMA: &str = r#"{
    "items": {
        "properties": {
            "uuid": {"title": "UUID"},
            "part_instance_id": {"title": "Part Instance ID"},
            "manufacturing_date": {"title": "Manufacturing Date", "format": "date-time"},
            "manufacturing_country": {"title": "Manufacturing Country"},
            "manufacturer_part_id": {"title": "Manufacturer Part ID"},
            "customer_part_id": {"title": "Customer Part ID"},
            "classification": {"title": "Classification", "enum": ["product", "raw material", "software", "assembly", "tool", "component"]},
            "name_at_manufacturer": {"title": "Name at Manufacturer"},
            "name_at_customer": {"title": "Name at Customer"},
            "optional_identifier_key": {"title": "Optional Identifier Key", "enum": ["van", "batchId"]},
            "optional_identifier_value": {"title": "Optional Identifier Value"}
        }
    }
}"#;

#[test]
fn derives_one_descriptor_per_property_in_schema_order() {
    let description: SubmodelDescription = serde_json::from_str(SERIAL_PART_SCHEMA).unwrap();
    let columns = derive_columns(&description).unwrap();

    assert_eq!(columns.len(), 11);
    let fields: Vec<&str> = columns
        .columns()
        .iter()
        .map(|column| column.field.as_str())
        .collect();
    assert_eq!(fields[0], "uuid");
    assert_eq!(fields[1], "part_instance_id");
    assert_eq!(fields[10], "optional_identifier_value");
}

#[test]
fn classifies_kinds_from_the_schema() {
    let description: SubmodelDescription = serde_json::from_str(SERIAL_PART_SCHEMA).unwrap();
    let columns = derive_columns(&description).unwrap();

    assert_eq!(columns.column("manufacturing_date").unwrap().kind, DataKind::DateTime);
    let classification = columns.column("classification").unwrap();
    assert_eq!(classification.kind, DataKind::SingleSelect);
    assert_eq!(classification.options.len(), 6);
    assert_eq!(columns.column("part_instance_id").unwrap().kind, DataKind::Text);
    assert_eq!(columns.column("manufacturing_date").unwrap().header_name, "Manufacturing Date");
}

#[test]
fn template_seeds_empty_rows() {
    let description: SubmodelDescription = serde_json::from_str(SERIAL_PART_SCHEMA).unwrap();
    let columns = derive_columns(&description).unwrap();

    let row = Row::from_template(RowId::new(1), columns.template_row());
    assert_eq!(row.get("part_instance_id"), Some(""));
    assert_eq!(row.get(URN_FIELD), Some(""));
    assert_eq!(row.fields().count(), 11);
}

#[test]
fn missing_schema_blocks_derivation() {
    let description: SubmodelDescription = serde_json::from_str(r#"{"items": {}}"#).unwrap();
    assert_eq!(derive_columns(&description).unwrap_err(), ModelError::MissingSchema);
}

#[test]
fn rows_serialize_flat_for_the_wire() {
    let description: SubmodelDescription = serde_json::from_str(SERIAL_PART_SCHEMA).unwrap();
    let columns = derive_columns(&description).unwrap();

    let mut row = Row::from_template(RowId::new(3), columns.template_row());
    row.set("part_instance_id", "NO-159040131155901488695376").unwrap();

    let payload = serde_json::to_value(vec![row]).unwrap();
    assert!(payload.is_array());
    assert_eq!(payload[0]["id"], 3);
    assert_eq!(payload[0]["part_instance_id"], "NO-159040131155901488695376");
    // no nesting: apart from the id, every field is a top-level string
    assert!(
        payload[0]
            .as_object()
            .unwrap()
            .iter()
            .all(|(key, value)| key == "id" || value.is_string())
    );
}
