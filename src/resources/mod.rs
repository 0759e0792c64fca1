//! Typed resource schemas and services, one module per backend sub-service.

mod fields;
pub mod instructors;
pub mod store;
pub mod users;

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Success response of a mutation whose body carries nothing the caller needs.
///
/// Accepts an empty body or any JSON document, keeping a `message` if present.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Acknowledged {
    pub message: Option<String>,
}

impl<'de> Deserialize<'de> for Acknowledged {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;

        Ok(Self {
            message: value
                .get("message")
                .and_then(Value::as_str)
                .map(str::to_string),
        })
    }
}

/// Case-insensitive substring match used by the list views' search boxes.
#[must_use]
pub fn matches_search(term: &str, fields: &[&str]) -> bool {
    let term = term.trim().to_lowercase();

    term.is_empty()
        || fields
            .iter()
            .any(|field| field.to_lowercase().contains(&term))
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn acknowledged_keeps_message() -> TestResult {
        let ack: Acknowledged = serde_json::from_str(r#"{"message":"Deleted","ok":true}"#)?;

        assert_eq!(ack.message.as_deref(), Some("Deleted"));

        Ok(())
    }

    #[test]
    fn acknowledged_accepts_null() -> TestResult {
        let ack: Acknowledged = serde_json::from_value(Value::Null)?;

        assert_eq!(ack, Acknowledged::default());

        Ok(())
    }

    #[test]
    fn search_is_case_insensitive_and_blank_matches_all() {
        assert!(matches_search("ASHA", &["asha@example.com"]));
        assert!(matches_search("  ", &["anything"]));
        assert!(!matches_search("ravi", &["Asha", "asha@example.com"]));
    }
}
