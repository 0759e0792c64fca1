//! Serde helpers for loosely typed backend fields.

use std::str::FromStr;

use rust_decimal::{Decimal, prelude::ToPrimitive as _};
use serde::{Deserialize, Deserializer, Serializer, de::Error as _};
use serde_json::Value;

/// Monetary amounts: accepted as JSON numbers or numeric strings, sent as numbers.
pub(crate) mod amount {
    use super::*;

    pub(crate) fn serialize<S: Serializer>(value: &Decimal, serializer: S) -> Result<S::Ok, S::Error> {
        match value.to_f64() {
            Some(value) => serializer.serialize_f64(value),
            None => serializer.serialize_str(&value.to_string()),
        }
    }

    pub(crate) fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Decimal, D::Error> {
        match Value::deserialize(deserializer)? {
            Value::Null => Ok(Decimal::ZERO),
            Value::Number(number) => parse_decimal(&number.to_string()).map_err(D::Error::custom),
            Value::String(raw) if raw.trim().is_empty() => Ok(Decimal::ZERO),
            Value::String(raw) => parse_decimal(raw.trim()).map_err(D::Error::custom),
            other => Err(D::Error::custom(format!("expected an amount, found {other}"))),
        }
    }
}

/// Text fields that some records send as numbers (postal codes, phones).
pub(crate) fn lenient_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(String::new()),
        Value::String(value) => Ok(value),
        Value::Number(value) => Ok(value.to_string()),
        Value::Bool(value) => Ok(value.to_string()),
        other => Err(D::Error::custom(format!("expected text, found {other}"))),
    }
}

fn parse_decimal(raw: &str) -> Result<Decimal, rust_decimal::Error> {
    Decimal::from_str(raw).or_else(|_plain| Decimal::from_scientific(raw))
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use serde::{Deserialize, Serialize};
    use testresult::TestResult;

    #[derive(Debug, Serialize, Deserialize)]
    struct Priced {
        #[serde(with = "super::amount", default)]
        price: Decimal,

        #[serde(deserialize_with = "super::lenient_string", default)]
        pincode: String,
    }

    #[test]
    fn amount_accepts_numbers_and_strings() -> TestResult {
        let from_number: Priced = serde_json::from_str(r#"{"price": 49.99}"#)?;
        let from_string: Priced = serde_json::from_str(r#"{"price": "120"}"#)?;
        let from_blank: Priced = serde_json::from_str(r#"{"price": ""}"#)?;

        assert_eq!(from_number.price, Decimal::new(4999, 2));
        assert_eq!(from_string.price, Decimal::from(120));
        assert_eq!(from_blank.price, Decimal::ZERO);

        Ok(())
    }

    #[test]
    fn amount_rejects_garbage() {
        assert!(serde_json::from_str::<Priced>(r#"{"price": "cheap"}"#).is_err());
    }

    #[test]
    fn amount_serializes_as_number() -> TestResult {
        let json = serde_json::to_value(Priced {
            price: Decimal::new(2500, 2),
            pincode: String::new(),
        })?;

        assert_eq!(json["price"], serde_json::json!(25.0));

        Ok(())
    }

    #[test]
    fn lenient_string_accepts_numbers() -> TestResult {
        let record: Priced = serde_json::from_str(r#"{"pincode": 12345}"#)?;

        assert_eq!(record.pincode, "12345");

        Ok(())
    }
}
