//! Working-table rows.
//!
//! A row is a schema-derived field map plus a synthetic integer id. On the
//! wire (the submission payload and rows files) a row is a flat JSON object,
//! `{ "id": 3, "uuid": "urn:uuid:...", "part_instance_id": "...", ... }`,
//! so serde is hand-written rather than derived.

use std::collections::BTreeMap;
use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{ModelError, Result};

/// Field holding the optional URN-formatted identifier of a row.
pub const URN_FIELD: &str = "uuid";

/// Synthetic row identity within one table instance; never persisted and
/// never reused after deletion.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct RowId(u64);

impl RowId {
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One editable record of the working table.
///
/// The field set is fixed at construction from the schema-derived template;
/// the reflected setter rejects anything outside it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    id: RowId,
    fields: BTreeMap<String, String>,
}

impl Row {
    /// Build an empty row from the template, all values empty strings.
    pub fn from_template(id: RowId, template: &BTreeMap<String, String>) -> Self {
        let mut fields = template.clone();
        fields.entry(URN_FIELD.to_string()).or_default();
        Self { id, fields }
    }

    /// Build a row from explicit field values, e.g. a rows file entry.
    pub fn from_fields(id: RowId, fields: BTreeMap<String, String>) -> Self {
        let mut row = Self { id, fields };
        row.fields.entry(URN_FIELD.to_string()).or_default();
        row
    }

    pub fn id(&self) -> RowId {
        self.id
    }

    /// Value of a field, `None` when the field is outside the row's set.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }

    /// Reflected setter, validated against the construction-time field set.
    ///
    /// # Errors
    ///
    /// `ModelError::UnknownField` for a field outside the set.
    pub fn set(&mut self, field: &str, value: impl Into<String>) -> Result<()> {
        match self.fields.get_mut(field) {
            Some(slot) => {
                *slot = value.into();
                Ok(())
            }
            None => Err(ModelError::UnknownField(field.to_string())),
        }
    }

    pub fn has_field(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// The row's URN identifier field.
    pub fn urn(&self) -> &str {
        self.fields.get(URN_FIELD).map_or("", String::as_str)
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl Serialize for Row {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len() + 1))?;
        map.serialize_entry("id", &self.id)?;
        for (field, value) in &self.fields {
            map.serialize_entry(field, value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Row {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct RowVisitor;

        impl<'de> Visitor<'de> for RowVisitor {
            type Value = Row;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a flat row object with an integer id and string fields")
            }

            fn visit_map<A: MapAccess<'de>>(
                self,
                mut map: A,
            ) -> std::result::Result<Self::Value, A::Error> {
                let mut id: Option<RowId> = None;
                let mut fields = BTreeMap::new();
                while let Some(key) = map.next_key::<String>()? {
                    if key == "id" {
                        if id.is_some() {
                            return Err(serde::de::Error::duplicate_field("id"));
                        }
                        id = Some(map.next_value()?);
                    } else {
                        let value: String = map.next_value()?;
                        fields.insert(key, value);
                    }
                }
                let id = id.ok_or_else(|| serde::de::Error::missing_field("id"))?;
                Ok(Row::from_fields(id, fields))
            }
        }

        deserializer.deserialize_map(RowVisitor)
    }
}
