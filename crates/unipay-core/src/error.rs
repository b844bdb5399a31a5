//! # Error Types — Internal Faults
//!
//! Faults that escape the core boundary as Rust errors. Ordinary business
//! outcomes (unpaid, closed, not found, ...) are NOT errors in this sense —
//! they travel as [`crate::taxonomy::ErrorKind`] values inside envelopes.
//! The variants here cover the only genuinely unexpected condition this
//! pure core can produce: a gateway response whose structure does not match
//! the gateway's own schema.

use thiserror::Error;

/// Internal fault while handling a gateway response.
#[derive(Error, Debug)]
pub enum UnipayError {
    /// The response structure did not match the gateway's documented schema.
    #[error("malformed gateway response: {0}")]
    MalformedResponse(String),

    /// A field the gateway's schema marks as mandatory was absent.
    #[error("missing mandatory response field: {field}")]
    MissingField {
        /// The absent field's wire name.
        field: String,
    },
}

impl UnipayError {
    /// Shorthand for a missing mandatory field.
    pub fn missing(field: impl Into<String>) -> Self {
        Self::MissingField {
            field: field.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_names_the_field() {
        let err = UnipayError::missing("return_code");
        assert_eq!(
            err.to_string(),
            "missing mandatory response field: return_code"
        );
    }

    #[test]
    fn test_malformed_carries_context() {
        let err = UnipayError::MalformedResponse("code is not a string".into());
        assert!(err.to_string().contains("code is not a string"));
    }
}
