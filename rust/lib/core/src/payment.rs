//! Payment modes.
//!
//! The backend stores the mode as an integer code; screens show the name.

use std::fmt;
use std::str::FromStr;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use crate::error::CoreError;
use crate::lenient::int_code;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PaymentMode {
    #[default]
    Cash,
    Card,
    Upi,
    BankTransfer,
    Cheque,
    Credit,
}

impl PaymentMode {
    pub const ALL: [PaymentMode; 6] = [
        PaymentMode::Cash,
        PaymentMode::Card,
        PaymentMode::Upi,
        PaymentMode::BankTransfer,
        PaymentMode::Cheque,
        PaymentMode::Credit,
    ];

    pub fn code(self) -> i64 {
        match self {
            PaymentMode::Cash => 1,
            PaymentMode::Card => 2,
            PaymentMode::Upi => 3,
            PaymentMode::BankTransfer => 4,
            PaymentMode::Cheque => 5,
            PaymentMode::Credit => 6,
        }
    }

    pub fn from_code(code: i64) -> Result<Self, CoreError> {
        Self::ALL
            .into_iter()
            .find(|m| m.code() == code)
            .ok_or_else(|| CoreError::UnknownPaymentMode(code.to_string()))
    }

    /// Display name.
    pub fn name(self) -> &'static str {
        match self {
            PaymentMode::Cash => "Cash",
            PaymentMode::Card => "Card",
            PaymentMode::Upi => "UPI",
            PaymentMode::BankTransfer => "Bank Transfer",
            PaymentMode::Cheque => "Cheque",
            PaymentMode::Credit => "Credit",
        }
    }

    fn alias(self) -> &'static str {
        match self {
            PaymentMode::Cash => "cash",
            PaymentMode::Card => "card",
            PaymentMode::Upi => "upi",
            PaymentMode::BankTransfer => "bank",
            PaymentMode::Cheque => "cheque",
            PaymentMode::Credit => "credit",
        }
    }

    /// Look up by display name or short alias, ignoring case.
    pub fn from_name(name: &str) -> Result<Self, CoreError> {
        let wanted = name.trim();
        Self::ALL
            .into_iter()
            .find(|m| m.name().eq_ignore_ascii_case(wanted) || m.alias().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| CoreError::UnknownPaymentMode(name.to_string()))
    }
}

impl fmt::Display for PaymentMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Accepts a code (`"3"`) or a name (`"upi"`).
impl FromStr for PaymentMode {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().parse::<i64>() {
            Ok(code) => Self::from_code(code),
            Err(_) => Self::from_name(s),
        }
    }
}

impl Serialize for PaymentMode {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_i64(self.code())
    }
}

impl<'de> Deserialize<'de> for PaymentMode {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(d)?;
        if value.is_null() {
            return Ok(PaymentMode::default());
        }
        if let Some(code) = int_code(&value) {
            return PaymentMode::from_code(code).map_err(D::Error::custom);
        }
        match value {
            Value::String(name) => PaymentMode::from_name(&name).map_err(D::Error::custom),
            other => Err(D::Error::custom(format!("invalid payment mode: {}", other))),
        }
    }
}
