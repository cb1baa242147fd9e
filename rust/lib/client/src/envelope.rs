//! Response envelope.
//!
//! The backend wraps most payloads as `{"status": ..., "message": ...,
//! "data": ...}`. `status` comes as a bool, a word (`"success"`,
//! `"error"`), or a number (`1`/`0`, or an HTTP-style code). Some
//! endpoints return the payload bare; those are taken as data.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::ApiError;

/// Decoded payload plus the server's message, if any.
#[derive(Debug, Clone, PartialEq)]
pub struct Reply<T> {
    pub data: T,
    pub message: Option<String>,
}

impl<T> Reply<T> {
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Reply<U> {
        Reply { data: f(self.data), message: self.message }
    }
}

/// Whether an envelope `status` value means success.
pub fn status_ok(status: &Value) -> bool {
    match status {
        Value::Null => true,
        Value::Bool(b) => *b,
        Value::Number(n) => match n.as_i64() {
            Some(1) => true,
            Some(code) => (200..300).contains(&code),
            None => false,
        },
        Value::String(s) => {
            let s = s.trim().to_ascii_lowercase();
            match s.as_str() {
                "success" | "ok" | "true" | "1" => true,
                _ => s.parse::<i64>().is_ok_and(|code| (200..300).contains(&code)),
            }
        }
        _ => false,
    }
}

fn is_envelope(obj: &Map<String, Value>) -> bool {
    obj.contains_key("status") || obj.contains_key("data")
}

/// Extract the human message from an error body.
pub fn error_message(body: &str) -> String {
    let text = body.trim();
    if let Ok(Value::Object(obj)) = serde_json::from_str::<Value>(text) {
        for key in ["message", "error", "detail"] {
            if let Some(msg) = obj.get(key).and_then(Value::as_str) {
                return msg.to_string();
            }
        }
    }
    text.to_string()
}

/// Split a 2xx body into data and message, failing if the envelope says so.
pub fn open(body: Value) -> Result<Reply<Value>, ApiError> {
    let mut obj = match body {
        Value::Object(obj) if is_envelope(&obj) => obj,
        bare => return Ok(Reply { data: bare, message: None }),
    };
    let message = obj
        .remove("message")
        .and_then(|m| m.as_str().map(str::to_string))
        .filter(|m| !m.is_empty());
    let status = obj.remove("status").unwrap_or(Value::Null);
    if !status_ok(&status) {
        return Err(ApiError::Rejected(message.unwrap_or_else(|| "request failed".to_string())));
    }
    let data = obj.remove("data").unwrap_or(Value::Null);
    Ok(Reply { data, message })
}

/// Open the envelope and decode the data as `T`.
pub fn decode<T: DeserializeOwned>(body: Value) -> Result<Reply<T>, ApiError> {
    let reply = open(body)?;
    let data = T::deserialize(reply.data).map_err(|e| ApiError::Decode(e.to_string()))?;
    Ok(Reply { data, message: reply.message })
}

/// List payloads: a bare array, or an object holding the rows.
#[derive(Deserialize)]
#[serde(untagged)]
pub(crate) enum ListBody<T> {
    Rows(Vec<T>),
    Paged {
        #[serde(alias = "rows", alias = "data", alias = "results")]
        items: Vec<T>,
    },
}

impl<T> ListBody<T> {
    pub(crate) fn into_rows(self) -> Vec<T> {
        match self {
            ListBody::Rows(rows) | ListBody::Paged { items: rows } => rows,
        }
    }
}
