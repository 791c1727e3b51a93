//! Field-level validation errors.
//!
//! [`FieldErrors`] collects every problem found in one payload, keyed by the
//! offending field, so a client sees all of them in a single response.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Key used for problems that are not tied to a single field.
pub const NON_FIELD_ERRORS: &str = "non_field_errors";

pub const MSG_REQUIRED: &str = "This field is required.";
pub const MSG_NOT_NULL: &str = "This field may not be null.";
pub const MSG_NOT_STRING: &str = "Not a valid string.";
pub const MSG_NOT_INTEGER: &str = "A valid integer is required.";

/// Map of field name to the messages describing what is wrong with it.
///
/// Serializes as a plain JSON object, e.g. `{"status": ["Value cannot be negative"]}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a message against `field`.
    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Messages recorded against `field`, if any.
    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    /// Names of all fields that have at least one message.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Fold another set of errors into this one.
    pub fn merge(&mut self, other: FieldErrors) {
        for (field, messages) in other.0 {
            self.0.entry(field).or_default().extend(messages);
        }
    }

    /// Convert into a `Result`, failing when any error was recorded.
    pub fn into_result(self) -> Result<(), FieldErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl From<validator::ValidationErrors> for FieldErrors {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut out = FieldErrors::new();
        for (field, failures) in errors.field_errors() {
            for failure in failures {
                let message = failure
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| failure.code.to_string());
                out.add(&field, message);
            }
        }
        out
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .0
            .iter()
            .map(|(field, messages)| format!("{field}: {}", messages.join(" ")))
            .collect();
        f.write_str(&parts.join("; "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_converts_to_ok() {
        assert!(FieldErrors::new().into_result().is_ok());
    }

    #[test]
    fn collects_multiple_messages_per_field() {
        let mut errors = FieldErrors::new();
        errors.add("title", MSG_REQUIRED);
        errors.add("title", MSG_NOT_STRING);
        assert_eq!(
            errors.get("title"),
            Some(&[MSG_REQUIRED.to_string(), MSG_NOT_STRING.to_string()][..])
        );
    }

    #[test]
    fn serializes_as_plain_object() {
        let mut errors = FieldErrors::new();
        errors.add("status", "Value cannot be negative");
        let json = serde_json::to_value(&errors).unwrap();
        assert_eq!(json, serde_json::json!({"status": ["Value cannot be negative"]}));
    }

    #[test]
    fn display_lists_fields_in_order() {
        let mut errors = FieldErrors::new();
        errors.add("title", MSG_REQUIRED);
        errors.add("body", MSG_REQUIRED);
        assert_eq!(
            errors.to_string(),
            "body: This field is required.; title: This field is required."
        );
    }

    #[test]
    fn merge_appends_messages() {
        let mut a = FieldErrors::new();
        a.add("status", MSG_NOT_INTEGER);
        let mut b = FieldErrors::new();
        b.add("status", "Value cannot be negative");
        b.add("title", MSG_NOT_NULL);
        a.merge(b);
        assert_eq!(a.get("status").map(<[String]>::len), Some(2));
        assert_eq!(a.fields().collect::<Vec<_>>(), vec!["status", "title"]);
    }
}
