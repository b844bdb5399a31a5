//! # Response Envelope — Result-with-Data-or-Error Container
//!
//! The canonical container every handler returns to callers, regardless of
//! which gateway produced the underlying response.
//!
//! ## Invariant
//!
//! Exactly one of `data`/`error` is set. The fields are private and the
//! only constructors are [`ResponseEnvelope::success()`] and
//! [`ResponseEnvelope::failure()`], so a half-filled or double-filled
//! envelope cannot be built by downstream code.

use serde::Serialize;

use crate::taxonomy::ErrorKind;

/// Canonical result of handling a gateway response or callback.
///
/// Created per response and discarded after the caller consumes it; holds
/// no shared state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResponseEnvelope<T> {
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<ErrorKind>,
}

impl<T> ResponseEnvelope<T> {
    /// Build a success envelope carrying `data`.
    pub fn success(data: T) -> Self {
        Self {
            data: Some(data),
            error: None,
        }
    }

    /// Build a failure envelope carrying the classified kind.
    pub fn failure(error: ErrorKind) -> Self {
        Self {
            data: None,
            error: Some(error),
        }
    }

    /// Whether this envelope is the success side.
    pub fn is_success(&self) -> bool {
        self.data.is_some()
    }

    /// The success payload, if any.
    pub fn data(&self) -> Option<&T> {
        self.data.as_ref()
    }

    /// The failure kind, if any.
    pub fn error(&self) -> Option<&ErrorKind> {
        self.error.as_ref()
    }

    /// Consume the envelope into an ordinary `Result`.
    pub fn into_result(self) -> Result<T, ErrorKind> {
        match (self.data, self.error) {
            (Some(data), None) => Ok(data),
            (None, Some(error)) => Err(error),
            // Unreachable by construction; kept total for safety.
            _ => Err(ErrorKind::GatewayServerError),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_holds_data_only() {
        let env = ResponseEnvelope::success("TRADE_SUCCESS");
        assert!(env.is_success());
        assert_eq!(env.data(), Some(&"TRADE_SUCCESS"));
        assert!(env.error().is_none());
    }

    #[test]
    fn test_failure_holds_error_only() {
        let env: ResponseEnvelope<()> = ResponseEnvelope::failure(ErrorKind::TradeClosed);
        assert!(!env.is_success());
        assert!(env.data().is_none());
        assert_eq!(env.error(), Some(&ErrorKind::TradeClosed));
    }

    #[test]
    fn test_into_result() {
        assert_eq!(ResponseEnvelope::success(7).into_result(), Ok(7));
        assert_eq!(
            ResponseEnvelope::<i32>::failure(ErrorKind::OrderNotExist).into_result(),
            Err(ErrorKind::OrderNotExist)
        );
    }

    #[test]
    fn test_serialization_omits_empty_side() {
        let ok = serde_json::to_value(ResponseEnvelope::success("x")).unwrap();
        assert_eq!(ok, serde_json::json!({ "data": "x" }));

        let err = serde_json::to_value(ResponseEnvelope::<String>::failure(
            ErrorKind::SignatureInvalid,
        ))
        .unwrap();
        assert!(err.get("data").is_none());
        assert_eq!(err["error"]["kind"], "signature_invalid");
    }
}
