//! Column derivation: turn a submodel's property schema into editable grid
//! column descriptors plus the template for newly added rows.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};
use crate::row::URN_FIELD;
use crate::submodel::{PropertySpec, SubmodelDescription};

/// Edit kind of a derived column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DataKind {
    Text,
    DateTime,
    SingleSelect,
}

impl DataKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DataKind::Text => "text",
            DataKind::DateTime => "dateTime",
            DataKind::SingleSelect => "singleSelect",
        }
    }
}

impl std::fmt::Display for DataKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Metadata for one editable grid column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnDescriptor {
    pub field: String,
    pub header_name: String,
    pub editable: bool,
    pub kind: DataKind,
    /// Allowed values; non-empty exactly when `kind` is `SingleSelect`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
}

/// The derived columns of one submodel selection, immutable until the
/// submodel changes, together with the template row seeded from the schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSet {
    columns: Vec<ColumnDescriptor>,
    template: BTreeMap<String, String>,
}

impl ColumnSet {
    pub fn columns(&self) -> &[ColumnDescriptor] {
        &self.columns
    }

    pub fn column(&self, field: &str) -> Option<&ColumnDescriptor> {
        self.columns.iter().find(|column| column.field == field)
    }

    pub fn has_field(&self, field: &str) -> bool {
        self.template.contains_key(field)
    }

    /// Field-to-empty-string template for newly added rows. Always contains
    /// the URN identifier field, whether or not the schema lists it.
    pub fn template_row(&self) -> &BTreeMap<String, String> {
        &self.template
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

/// Classify a property into its edit kind.
///
/// Order-sensitive: `date-time` format is checked before `enum`, so a
/// property carrying both derives as `DateTime`.
fn kind_for(spec: &PropertySpec) -> DataKind {
    if spec.format.as_deref() == Some("date-time") {
        DataKind::DateTime
    } else if !spec.allowed_values.is_empty() {
        DataKind::SingleSelect
    } else {
        DataKind::Text
    }
}

/// Derive the ordered column descriptors for a submodel description, one per
/// property in the schema's key order.
///
/// # Errors
///
/// `ModelError::MissingSchema` when the description lacks `items.properties`;
/// no columns are produced and no row store should be initialized from it.
pub fn derive_columns(description: &SubmodelDescription) -> Result<ColumnSet> {
    let properties = description.properties().ok_or(ModelError::MissingSchema)?;

    let columns: Vec<ColumnDescriptor> = properties
        .iter()
        .map(|(key, spec)| {
            let kind = kind_for(spec);
            ColumnDescriptor {
                field: key.to_string(),
                header_name: spec.title.clone(),
                editable: true,
                kind,
                options: if kind == DataKind::SingleSelect {
                    spec.allowed_values.clone()
                } else {
                    Vec::new()
                },
            }
        })
        .collect();

    let mut template: BTreeMap<String, String> = properties
        .keys()
        .map(|key| (key.to_string(), String::new()))
        .collect();
    template.entry(URN_FIELD.to_string()).or_default();

    Ok(ColumnSet { columns, template })
}
