use thiserror::Error;

// ── Error codes ─────────────────────────────────────────────────────
//
// Stable identifiers the renderers match on. Messages may be reworded.

/// Stable error code constants.
pub mod error_code {
    pub const UNKNOWN_PAYMENT_MODE: &str = "UNKNOWN_PAYMENT_MODE";
    pub const UNKNOWN_ROLE: &str = "UNKNOWN_ROLE";
    pub const ROW_OUT_OF_RANGE: &str = "ROW_OUT_OF_RANGE";
    pub const INVALID_DRAFT: &str = "INVALID_DRAFT";
}

// ── CoreError ───────────────────────────────────────────────────────

/// Errors raised while decoding or validating front-end records.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    /// Payment mode code or name has no mapping.
    #[error("unknown payment mode: {0}")]
    UnknownPaymentMode(String),

    /// Role id outside 1..=5.
    #[error("unknown role id: {0}")]
    UnknownRole(i64),

    /// Bill row index does not exist.
    #[error("row {index} out of range ({len} rows)")]
    RowOutOfRange { index: usize, len: usize },

    /// Bill draft cannot be submitted as it stands.
    #[error("{0}")]
    InvalidDraft(String),
}

impl CoreError {
    /// Stable, machine-readable error code.
    pub fn error_code(&self) -> &'static str {
        match self {
            CoreError::UnknownPaymentMode(_) => error_code::UNKNOWN_PAYMENT_MODE,
            CoreError::UnknownRole(_) => error_code::UNKNOWN_ROLE,
            CoreError::RowOutOfRange { .. } => error_code::ROW_OUT_OF_RANGE,
            CoreError::InvalidDraft(_) => error_code::INVALID_DRAFT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_code_mapping() {
        assert_eq!(CoreError::UnknownPaymentMode("x".into()).error_code(), "UNKNOWN_PAYMENT_MODE");
        assert_eq!(CoreError::UnknownRole(9).error_code(), "UNKNOWN_ROLE");
        assert_eq!(CoreError::RowOutOfRange { index: 3, len: 1 }.error_code(), "ROW_OUT_OF_RANGE");
        assert_eq!(CoreError::InvalidDraft("x".into()).error_code(), "INVALID_DRAFT");
    }

    #[test]
    fn display_messages() {
        assert_eq!(CoreError::UnknownRole(7).to_string(), "unknown role id: 7");
        assert_eq!(
            CoreError::RowOutOfRange { index: 4, len: 2 }.to_string(),
            "row 4 out of range (2 rows)"
        );
        assert_eq!(CoreError::InvalidDraft("select a customer".into()).to_string(), "select a customer");
    }
}
