use serde::{Deserialize, Serialize};

use crate::Record;

/// A key/value pair of records on its way to a sink.
///
/// A half given as `null` reads the same as a missing half and is omitted
/// when the document is written back, so `{"key": null, "value": {..}}`
/// round-trips to `{"value": {..}}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SinkDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<Record>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Record>,
}

impl SinkDocument {
    pub fn new(key: Option<Record>, value: Option<Record>) -> Self {
        Self { key, value }
    }

    pub fn half_mut(&mut self, target: ProjectionTarget) -> Option<&mut Record> {
        match target {
            ProjectionTarget::Key => self.key.as_mut(),
            ProjectionTarget::Value => self.value.as_mut(),
        }
    }
}

/// Which half of a [`SinkDocument`] a projector applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectionTarget {
    Key,
    Value,
}

impl ProjectionTarget {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectionTarget::Key => "key",
            ProjectionTarget::Value => "value",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserialize_value_only() {
        let doc: SinkDocument = serde_json::from_value(json!({ "value": { "a": 1 } })).unwrap();
        assert!(doc.key.is_none());
        assert_eq!(doc.value.unwrap().get("a"), Some(&json!(1)));
    }

    #[test]
    fn test_null_half_is_omitted_on_output() {
        let doc: SinkDocument =
            serde_json::from_value(json!({ "key": null, "value": { "name": "a" } })).unwrap();
        assert!(doc.key.is_none());
        assert_eq!(
            serde_json::to_value(&doc).unwrap(),
            json!({ "value": { "name": "a" } })
        );
    }

    #[test]
    fn test_rejects_unknown_fields() {
        let result: Result<SinkDocument, _> = serde_json::from_value(json!({ "name": "x" }));
        assert!(result.is_err());
    }

    #[test]
    fn test_serialize_skips_missing_halves() {
        let doc = SinkDocument::new(json!({ "_id": 1 }).as_object().cloned(), None);
        assert_eq!(serde_json::to_value(&doc).unwrap(), json!({ "key": { "_id": 1 } }));
    }

    #[test]
    fn test_half_mut() {
        let mut doc = SinkDocument::new(None, json!({ "a": 1 }).as_object().cloned());
        assert!(doc.half_mut(ProjectionTarget::Key).is_none());
        doc.half_mut(ProjectionTarget::Value).unwrap().clear();
        assert_eq!(doc.value.unwrap().len(), 0);
    }
}
