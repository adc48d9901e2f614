//! Inbound contact-form payload.
//!
//! Required fields are `Option` so that "missing" becomes a per-field
//! validation issue (HTTP 400 with details) instead of a deserialization
//! failure, and so the honeypot check can run before validation.

use serde::Deserialize;
use serde_json::Value;

use domains::SubmissionInput;

#[derive(Debug, Default, Deserialize)]
pub struct ContactPayload {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub service: Option<String>,
    pub message: Option<String>,
    /// Honeypot field: hidden in the real form, never filled by humans.
    /// Kept as raw JSON because bots send anything (`true`, `1`, `"x"`).
    pub hp: Option<Value>,
}

impl ContactPayload {
    /// True when the honeypot field is present and truthy in the JS sense.
    pub fn honeypot_tripped(&self) -> bool {
        self.hp.as_ref().is_some_and(is_truthy)
    }

    pub fn into_input(self) -> SubmissionInput {
        SubmissionInput {
            name: self.name,
            email: self.email,
            phone: self.phone,
            service: self.service,
            message: self.message,
        }
    }
}

/// JavaScript truthiness for a JSON value.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload_with_hp(hp: Value) -> ContactPayload {
        ContactPayload {
            hp: Some(hp),
            ..ContactPayload::default()
        }
    }

    #[test]
    fn truthy_honeypot_values_trip() {
        for hp in [json!(true), json!(1), json!("gotcha"), json!("0"), json!([1]), json!({"a": 1})] {
            assert!(payload_with_hp(hp.clone()).honeypot_tripped(), "expected truthy: {hp}");
        }
    }

    #[test]
    fn falsy_honeypot_values_do_not_trip() {
        for hp in [json!(false), json!(0), json!(""), json!(null)] {
            assert!(!payload_with_hp(hp.clone()).honeypot_tripped(), "expected falsy: {hp}");
        }
        assert!(!ContactPayload::default().honeypot_tripped());
    }

    #[test]
    fn payload_maps_onto_submission_input() {
        let payload: ContactPayload = serde_json::from_value(json!({
            "name": "Ravi",
            "email": "ravi@example.com",
            "message": "hello",
        }))
        .unwrap();

        let input = payload.into_input();
        assert_eq!(input.name.as_deref(), Some("Ravi"));
        assert_eq!(input.phone, None);
        assert_eq!(input.message.as_deref(), Some("hello"));
    }
}
