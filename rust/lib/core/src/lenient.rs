//! Lenient decoders for backend fields.
//!
//! The backend is inconsistent about scalar encoding: ids arrive as numbers
//! or strings, amounts as numbers or numeric strings, flags as bools or 0/1.
//! These helpers are used with `#[serde(deserialize_with = "...")]`.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Number, numeric string, or null (as 0.0).
pub fn f64_lenient<'de, D: Deserializer<'de>>(d: D) -> Result<f64, D::Error> {
    match Option::<Value>::deserialize(d)? {
        None | Some(Value::Null) => Ok(0.0),
        Some(Value::Number(n)) => n
            .as_f64()
            .ok_or_else(|| D::Error::custom("number out of range")),
        Some(Value::String(s)) if s.trim().is_empty() => Ok(0.0),
        Some(Value::String(s)) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| D::Error::custom(format!("invalid number: {:?}", s))),
        Some(other) => Err(D::Error::custom(format!("expected number, got {}", other))),
    }
}

/// String or number id; null becomes the empty string.
pub fn id_lenient<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    match Option::<Value>::deserialize(d)? {
        None | Some(Value::Null) => Ok(String::new()),
        Some(Value::String(s)) => Ok(s),
        Some(Value::Number(n)) => Ok(n.to_string()),
        Some(other) => Err(D::Error::custom(format!("expected id, got {}", other))),
    }
}

/// Like [`id_lenient`] but empty ids decode as `None`.
pub fn opt_id_lenient<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    let id = id_lenient(d)?;
    Ok(if id.is_empty() { None } else { Some(id) })
}

/// Bool, 0/1, or "true"/"false"/"1"/"0".
pub fn bool_lenient<'de, D: Deserializer<'de>>(d: D) -> Result<bool, D::Error> {
    match Option::<Value>::deserialize(d)? {
        None | Some(Value::Null) => Ok(false),
        Some(Value::Bool(b)) => Ok(b),
        Some(Value::Number(n)) => Ok(n.as_i64().unwrap_or(0) != 0),
        Some(Value::String(s)) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" => Ok(true),
            "false" | "0" | "no" | "" => Ok(false),
            _ => Err(D::Error::custom(format!("invalid flag: {:?}", s))),
        },
        Some(other) => Err(D::Error::custom(format!("expected flag, got {}", other))),
    }
}

/// Integer code from a number or numeric string.
pub(crate) fn int_code(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Probe {
        #[serde(default, deserialize_with = "f64_lenient")]
        amount: f64,
        #[serde(default, deserialize_with = "id_lenient")]
        id: String,
        #[serde(default, deserialize_with = "opt_id_lenient")]
        unit: Option<String>,
        #[serde(default, deserialize_with = "bool_lenient")]
        blocked: bool,
    }

    #[test]
    fn accepts_numbers_and_strings() {
        let p: Probe = serde_json::from_str(r#"{"amount":"12.50","id":42,"unit":7,"blocked":1}"#).unwrap();
        assert_eq!(p.amount, 12.5);
        assert_eq!(p.id, "42");
        assert_eq!(p.unit.as_deref(), Some("7"));
        assert!(p.blocked);
    }

    #[test]
    fn nulls_and_missing_fall_back() {
        let p: Probe = serde_json::from_str(r#"{"amount":null,"unit":""}"#).unwrap();
        assert_eq!(p.amount, 0.0);
        assert_eq!(p.id, "");
        assert_eq!(p.unit, None);
        assert!(!p.blocked);
    }

    #[test]
    fn rejects_garbage() {
        assert!(serde_json::from_str::<Probe>(r#"{"amount":"twelve"}"#).is_err());
        assert!(serde_json::from_str::<Probe>(r#"{"blocked":"maybe"}"#).is_err());
    }
}
