//! Dynamic entity records.
//!
//! Autotask's field set is open-ended (administrators add user-defined
//! fields at will), so entities are represented as an ordered field-name to
//! value mapping rather than a rigid schema. Typed accessors cover the
//! common cases without validating anything the server did not.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Reserved payload key carrying user-defined fields.
pub(crate) const UDF_KEY: &str = "userDefinedFields";

/// A single entity record as sent to or returned by the API.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(Map<String, Value>);

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode a record from an arbitrary JSON value.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is not a JSON object.
    pub fn from_value(value: Value) -> crate::Result<Self> {
        Ok(serde_json::from_value(value)?)
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    pub fn get_str(&self, field: &str) -> Option<&str> {
        self.0.get(field).and_then(Value::as_str)
    }

    pub fn get_i64(&self, field: &str) -> Option<i64> {
        self.0.get(field).and_then(Value::as_i64)
    }

    pub fn get_bool(&self, field: &str) -> Option<bool> {
        self.0.get(field).and_then(Value::as_bool)
    }

    /// The record's `id` field, when present and numeric.
    pub fn id(&self) -> Option<i64> {
        self.get_i64("id")
    }

    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        self.0.insert(field.into(), value.into());
        self
    }

    pub fn remove(&mut self, field: &str) -> Option<Value> {
        self.0.remove(field)
    }

    /// The nested user-defined fields, if the record carries any.
    pub fn user_defined_fields(&self) -> Option<&Value> {
        self.0.get(UDF_KEY)
    }

    /// Remove and return the user-defined fields.
    pub fn take_user_defined_fields(&mut self) -> Option<Value> {
        self.0.remove(UDF_KEY)
    }

    pub fn set_user_defined_fields(&mut self, udf: impl Into<Value>) -> &mut Self {
        self.0.insert(UDF_KEY.to_string(), udf.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> serde_json::map::Iter<'_> {
        self.0.iter()
    }

    pub fn into_inner(self) -> Map<String, Value> {
        self.0
    }
}

impl From<Map<String, Value>> for Record {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

/// One user-defined field value, carried under the reserved
/// `userDefinedFields` key of entity payloads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserDefinedField {
    pub name: String,
    pub value: Value,
}

impl UserDefinedField {
    pub fn new(name: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Write acknowledgement returned by create and update calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemRef {
    pub item_id: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_typed_accessors() {
        let record = Record::from_value(json!({
            "id": 1426,
            "referenceTitle": "edge-router",
            "isActive": true
        }))
        .unwrap();

        assert_eq!(record.id(), Some(1426));
        assert_eq!(record.get_str("referenceTitle"), Some("edge-router"));
        assert_eq!(record.get_bool("isActive"), Some(true));
        assert_eq!(record.get_i64("missing"), None);
    }

    #[test]
    fn test_from_value_rejects_non_objects() {
        assert!(Record::from_value(json!([1, 2, 3])).is_err());
    }

    #[test]
    fn test_take_user_defined_fields_removes_key() {
        let mut record = Record::new();
        record.insert("id", 7);
        record.set_user_defined_fields(json!([{"name": "Site", "value": "HQ"}]));

        let udf = record.take_user_defined_fields().unwrap();
        assert_eq!(udf[0]["name"], "Site");
        assert!(record.user_defined_fields().is_none());
        assert_eq!(record.len(), 1);
    }

    #[test]
    fn test_field_order_preserved() {
        let record = Record::from_value(json!({"z": 1, "a": 2, "m": 3})).unwrap();
        let fields: Vec<&str> = record.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(fields, vec!["z", "a", "m"]);
    }

    #[test]
    fn test_item_ref_decodes_vendor_ack() {
        let ack: ItemRef = serde_json::from_value(json!({"itemId": 1426})).unwrap();
        assert_eq!(ack.item_id, 1426);
    }
}
