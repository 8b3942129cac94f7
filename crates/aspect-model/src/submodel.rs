//! Submodel descriptions as delivered by the portal backend.
//!
//! A description has the JSON shape
//! `{ "items": { "properties": { "<key>": { "title": ..., ... } } } }`.
//! Property key order is insertion order and determines column order, so the
//! property map is deserialized into an order-preserving structure instead of
//! a sorting map.

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// One entry of a submodel listing (`GET /submodels`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmodelSummary {
    pub id: String,
    pub name: String,
}

/// Specification of a single schema property.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertySpec {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(default, rename = "enum", skip_serializing_if = "Vec::is_empty")]
    pub allowed_values: Vec<String>,
}

/// Property map that preserves the schema's key order.
///
/// Keys are unique; a duplicate key in the input is a deserialization error.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderedProperties(Vec<(String, PropertySpec)>);

impl OrderedProperties {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Insert a property, keeping insertion order. Replaces an existing key
    /// in place without reordering.
    pub fn insert(&mut self, key: impl Into<String>, spec: PropertySpec) {
        let key = key.into();
        if let Some(entry) = self.0.iter_mut().find(|(k, _)| *k == key) {
            entry.1 = spec;
        } else {
            self.0.push((key, spec));
        }
    }

    pub fn get(&self, key: &str) -> Option<&PropertySpec> {
        self.0.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.iter().any(|(k, _)| k == key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &PropertySpec)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(k, _)| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, PropertySpec)> for OrderedProperties {
    fn from_iter<I: IntoIterator<Item = (String, PropertySpec)>>(iter: I) -> Self {
        let mut properties = Self::new();
        for (key, spec) in iter {
            properties.insert(key, spec);
        }
        properties
    }
}

impl Serialize for OrderedProperties {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (key, spec) in &self.0 {
            map.serialize_entry(key, spec)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for OrderedProperties {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct PropertiesVisitor;

        impl<'de> Visitor<'de> for PropertiesVisitor {
            type Value = OrderedProperties;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a map of property key to property spec")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut entries: Vec<(String, PropertySpec)> =
                    Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((key, spec)) = map.next_entry::<String, PropertySpec>()? {
                    if entries.iter().any(|(k, _)| *k == key) {
                        return Err(serde::de::Error::custom(format!(
                            "duplicate property key: {key}"
                        )));
                    }
                    entries.push((key, spec));
                }
                Ok(OrderedProperties(entries))
            }
        }

        deserializer.deserialize_map(PropertiesVisitor)
    }
}

/// The `items` object of a submodel description.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaItems {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<OrderedProperties>,
}

/// A submodel description fetched by identifier.
///
/// `items` (or its property map) may be absent even when the fetch itself
/// succeeded; column derivation reports that as `MissingSchema`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmodelDescription {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<SchemaItems>,
}

impl SubmodelDescription {
    /// The property map, when the description carries one.
    pub fn properties(&self) -> Option<&OrderedProperties> {
        self.items.as_ref().and_then(|items| items.properties.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn properties_preserve_key_order() {
        let json = r#"{
            "items": {
                "properties": {
                    "zeta": {"title": "Zeta"},
                    "alpha": {"title": "Alpha"},
                    "mid": {"title": "Mid"}
                }
            }
        }"#;
        let description: SubmodelDescription = serde_json::from_str(json).unwrap();
        let keys: Vec<&str> = description.properties().unwrap().keys().collect();
        assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn duplicate_property_key_is_rejected() {
        let json = r#"{"a": {"title": "A"}, "a": {"title": "A again"}}"#;
        let result: Result<OrderedProperties, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }

    #[test]
    fn enum_field_deserializes_into_allowed_values() {
        let json = r#"{"title": "Classification", "enum": ["product", "component"]}"#;
        let spec: PropertySpec = serde_json::from_str(json).unwrap();
        assert_eq!(spec.allowed_values, vec!["product", "component"]);
        assert!(spec.format.is_none());
    }

    #[test]
    fn description_without_items_has_no_properties() {
        let description: SubmodelDescription = serde_json::from_str("{}").unwrap();
        assert!(description.properties().is_none());
    }
}
