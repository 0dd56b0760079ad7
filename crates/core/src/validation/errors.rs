use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

/// Validation failures keyed by field name.
///
/// Serializes as a plain JSON object (`{"email": ["Not a valid email address."]}`),
/// which is exactly the `details` member of a 400 response body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an error set holding a single message.
    pub fn single(field: &str, message: &str) -> Self {
        let mut errors = Self::new();
        errors.add(field, message);
        errors
    }

    /// Record `message` against `field`. Repeated messages are kept once.
    pub fn add(&mut self, field: &str, message: &str) {
        let messages = self.0.entry(field.to_string()).or_default();
        if !messages.iter().any(|m| m == message) {
            messages.push(message.to_string());
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of fields with at least one error.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Messages recorded against `field`, if any.
    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    /// Convert into a `Result`: `Ok(())` when nothing was recorded.
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, messages) in &self.0 {
            if !first {
                f.write_str("; ")?;
            }
            first = false;
            write!(f, "{field}: {}", messages.join(" "))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_messages_are_collapsed() {
        let mut errors = FieldErrors::new();
        errors.add("email", "Not a valid email address.");
        errors.add("email", "Not a valid email address.");
        assert_eq!(errors.get("email").map(<[String]>::len), Some(1));
    }

    #[test]
    fn serializes_as_plain_object() {
        let mut errors = FieldErrors::new();
        errors.add("name", "Missing data for required field.");
        errors.add("city", "Field may not be blank.");

        let json = serde_json::to_value(&errors).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "city": ["Field may not be blank."],
                "name": ["Missing data for required field."],
            })
        );
    }

    #[test]
    fn display_lists_fields_in_order() {
        let mut errors = FieldErrors::new();
        errors.add("name", "Field may not be blank.");
        errors.add("email", "Field may not be null.");
        assert_eq!(
            errors.to_string(),
            "email: Field may not be null.; name: Field may not be blank."
        );
    }

    #[test]
    fn empty_set_converts_to_ok() {
        assert!(FieldErrors::new().into_result().is_ok());
        assert!(FieldErrors::single("id", "Unknown field.").into_result().is_err());
    }
}
