//! Draft, validation and touched-field types for a single wizard step

use std::collections::BTreeMap;

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{WizardError, WizardResult};

/// Any step shape the controller can manage.
///
/// Steps are plain serde structs; the controller works on their JSON object
/// form so field-level edits stay generic while saves hand back `T`.
pub trait StepData: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {}

impl<T> StepData for T where T: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {}

/// In-progress answers for one step, field name to value
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StepDraft(Map<String, Value>);

impl StepDraft {
    /// Create an empty draft
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a draft from a JSON value, which must be an object
    pub fn from_value(value: Value) -> WizardResult<Self> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            other => Err(WizardError::Json(format!(
                "Step data must be an object, got {}",
                json_kind(&other)
            ))),
        }
    }

    /// Build a draft from a typed step
    pub fn from_data<T: Serialize>(data: &T) -> WizardResult<Self> {
        Self::from_value(serde_json::to_value(data)?)
    }

    /// Convert the draft back into a typed step
    pub fn to_data<T: DeserializeOwned>(&self) -> WizardResult<T> {
        Ok(serde_json::from_value(Value::Object(self.0.clone()))?)
    }

    /// Parse a serialized snapshot
    pub fn parse(raw: &str) -> WizardResult<Self> {
        Self::from_value(serde_json::from_str(raw)?)
    }

    /// Get a field value
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    /// Check whether the draft has a field
    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    /// Set a field value, returning the previous one
    pub fn insert(&mut self, name: impl Into<String>, value: Value) -> Option<Value> {
        self.0.insert(name.into(), value)
    }

    /// Field names in declaration order
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Iterate over `(name, value)` pairs in declaration order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of fields
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the draft has no fields
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// String value of a field
    pub fn text(&self, name: &str) -> Option<&str> {
        self.0.get(name).and_then(Value::as_str)
    }

    /// Boolean value of a field
    pub fn flag(&self, name: &str) -> Option<bool> {
        self.0.get(name).and_then(Value::as_bool)
    }

    /// Array value of a field
    pub fn array(&self, name: &str) -> Option<&Vec<Value>> {
        self.0.get(name).and_then(Value::as_array)
    }

    pub(crate) fn array_mut(&mut self, name: &str) -> Option<&mut Vec<Value>> {
        self.0.get_mut(name).and_then(Value::as_array_mut)
    }

    /// True when a field is missing, null, a whitespace-only string or an
    /// empty array
    pub fn is_blank(&self, name: &str) -> bool {
        match self.0.get(name) {
            None | Some(Value::Null) => true,
            Some(Value::String(s)) => s.trim().is_empty(),
            Some(Value::Array(items)) => items.is_empty(),
            Some(_) => false,
        }
    }

    /// Overlay every key of `snapshot` onto this draft.
    ///
    /// Keys missing from the snapshot keep their current (default) values, so
    /// fields added after a snapshot was written still get defaults.
    pub fn merge_snapshot(&mut self, snapshot: StepDraft) {
        for (name, value) in snapshot.0 {
            self.0.insert(name, value);
        }
    }

    /// The draft as a JSON value
    pub fn to_value(&self) -> Value {
        Value::Object(self.0.clone())
    }
}

impl From<Map<String, Value>> for StepDraft {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Sparse field to error message map; a missing entry means no error
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<String, String>);

impl ValidationErrors {
    /// Create an empty result
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an error for a field
    pub fn insert(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.insert(field.into(), message.into());
    }

    /// Record an error only if the field is blank in the draft
    pub fn require(&mut self, draft: &StepDraft, field: &str, message: &str) {
        if draft.is_blank(field) {
            self.insert(field, message);
        }
    }

    /// Error message for a field
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    /// Remove and return the error for a field
    pub fn remove(&mut self, field: &str) -> Option<String> {
        self.0.remove(field)
    }

    /// Set or clear the error for a single field
    pub(crate) fn set_field(&mut self, field: &str, message: Option<String>) {
        match message {
            Some(message) => {
                self.0.insert(field.to_string(), message);
            }
            None => {
                self.0.remove(field);
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterate over `(field, message)` pairs in field order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K, V> FromIterator<(K, V)> for ValidationErrors
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// Fields the user has interacted with
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TouchedFields(BTreeMap<String, bool>);

impl TouchedFields {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a field touched
    pub fn touch(&mut self, field: &str) {
        self.0.insert(field.to_string(), true);
    }

    /// Mark every given field touched
    pub fn touch_all<'a>(&mut self, fields: impl IntoIterator<Item = &'a str>) {
        for field in fields {
            self.touch(field);
        }
    }

    pub fn is_touched(&self, field: &str) -> bool {
        self.0.get(field).copied().unwrap_or(false)
    }

    /// Number of touched fields
    pub fn count(&self) -> usize {
        self.0.values().filter(|t| **t).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Sample {
        a: i64,
        b: i64,
    }

    #[test]
    fn test_from_data_keeps_every_field() {
        let draft = StepDraft::from_data(&Sample { a: 1, b: 2 }).unwrap();
        assert_eq!(draft.to_value(), json!({"a": 1, "b": 2}));
        assert_eq!(draft.field_names().collect::<Vec<_>>(), vec!["a", "b"]);
    }

    #[test]
    fn test_from_value_rejects_non_objects() {
        let err = StepDraft::from_value(json!([1, 2])).unwrap_err();
        assert_eq!(err.to_string(), "JSON error: Step data must be an object, got an array");
    }

    #[test]
    fn test_merge_snapshot_overlays_keys() {
        let mut draft = StepDraft::from_value(json!({"a": 1, "b": 2})).unwrap();
        let snapshot = StepDraft::from_value(json!({"b": 9, "c": 3})).unwrap();

        draft.merge_snapshot(snapshot);

        assert_eq!(draft.to_value(), json!({"a": 1, "b": 9, "c": 3}));
    }

    #[test]
    fn test_merge_snapshot_keeps_defaults_for_new_fields() {
        let mut draft = StepDraft::from_value(json!({"hasPartner": "", "hasChildren": false}))
            .unwrap();
        let snapshot = StepDraft::parse(r#"{"hasPartner":"Yes"}"#).unwrap();

        draft.merge_snapshot(snapshot);

        assert_eq!(draft.text("hasPartner"), Some("Yes"));
        assert_eq!(draft.flag("hasChildren"), Some(false));
    }

    #[test]
    fn test_is_blank() {
        let draft = StepDraft::from_value(json!({
            "empty": "",
            "spaces": "   ",
            "filled": "No",
            "none": [],
            "some": ["FR"],
            "flag": false,
            "nothing": null
        }))
        .unwrap();

        assert!(draft.is_blank("empty"));
        assert!(draft.is_blank("spaces"));
        assert!(!draft.is_blank("filled"));
        assert!(draft.is_blank("none"));
        assert!(!draft.is_blank("some"));
        assert!(!draft.is_blank("flag"));
        assert!(draft.is_blank("nothing"));
        assert!(draft.is_blank("missing"));
    }

    #[test]
    fn test_to_data_round_trips_typed_step() {
        let draft = StepDraft::from_value(json!({"a": 5, "b": 6})).unwrap();
        let sample: Sample = draft.to_data().unwrap();
        assert_eq!(sample, Sample { a: 5, b: 6 });
    }

    #[test]
    fn test_validation_errors_require() {
        let draft = StepDraft::from_value(json!({"hasPartner": ""})).unwrap();
        let mut errors = ValidationErrors::new();
        errors.require(&draft, "hasPartner", "Please select an option");

        assert_eq!(errors.get("hasPartner"), Some("Please select an option"));
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn test_touched_fields() {
        let mut touched = TouchedFields::new();
        assert!(!touched.is_touched("hasPartner"));

        touched.touch_all(["hasPartner", "hasChildren"]);
        assert!(touched.is_touched("hasPartner"));
        assert_eq!(touched.count(), 2);
    }
}
