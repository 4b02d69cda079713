use std::collections::BTreeMap;

use serde::Serialize;
use utoipa::ToSchema;

/// Field-level validation failures, keyed by field name.
///
/// Serializes as `{"title": ["This field is required."]}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, ToSchema, thiserror::Error)]
#[schema(
    value_type = BTreeMap<String, Vec<String>>,
    example = json!({ "title": ["This field is required."] })
)]
#[serde(transparent)]
#[error("invalid note payload: {0:?}")]
pub struct ValidationErrors(BTreeMap<&'static str, Vec<String>>);

impl ValidationErrors {
    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.entry(field).or_default().push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[cfg(test)]
    pub fn messages(&self, field: &str) -> &[String] {
        self.0.get(field).map(Vec::as_slice).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_accumulate_per_field() {
        let mut errors = ValidationErrors::default();
        errors.add("title", "first");
        errors.add("title", "second");

        assert!(!errors.is_empty());
        assert_eq!(errors.messages("title"), ["first", "second"]);
        assert!(errors.messages("content").is_empty());
    }

    #[test]
    fn serializes_as_field_map() {
        let mut errors = ValidationErrors::default();
        errors.add("title", "This field is required.");

        let json = serde_json::to_value(&errors).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "title": ["This field is required."] })
        );
    }
}
