//! # Error Taxonomy — Canonical Failure Kinds
//!
//! Defines `ErrorKind`, the single gateway-independent failure vocabulary,
//! and the per-gateway tables that map wire sub-codes onto it. This is the
//! ONE definition used across the stack; every `match` on `ErrorKind` must
//! be exhaustive, so adding a kind forces every consumer to handle it.
//!
//! ## Mapping Policy
//!
//! Every sub-code a gateway has been observed to emit maps to exactly one
//! kind. Codes outside the tables fall through to `Unknown`, preserving the
//! original code and message for diagnostics — they are never coerced into
//! a known kind they don't actually mean, and never dropped.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The gateways this layer unifies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GatewayKind {
    /// The signed-JSON gateway (`code`/`sub_code`/`trade_status` responses).
    Alipay,
    /// The signed-XML gateway (`return_code`/`result_code`/`err_code`
    /// callbacks and responses).
    Wechat,
}

impl GatewayKind {
    /// Canonical lowercase name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Alipay => "alipay",
            Self::Wechat => "wechat",
        }
    }
}

impl std::fmt::Display for GatewayKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Canonical, gateway-independent failure kinds.
///
/// The `Display` text is the human-readable message shown to end users;
/// [`ErrorKind::code()`] is the stable machine-readable identifier. The two
/// are deliberately distinct so callers can render either a generic retry
/// prompt or the specific explanation.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ErrorKind {
    /// The order was never created at the gateway.
    #[error("order does not exist at the gateway")]
    OrderNotExist,

    /// The gateway reported an internal failure, or a failure it did not
    /// further qualify.
    #[error("gateway server error")]
    GatewayServerError,

    /// The order exists but has not been paid yet.
    #[error("order unpaid, awaiting payment")]
    AwaitingPayment,

    /// The payment window expired and the gateway closed the order.
    #[error("payment window expired, order closed, please reorder")]
    TradeClosed,

    /// The trade completed and has been archived; no further operations
    /// apply to it.
    #[error("trade already finished")]
    TradeAlreadyFinished,

    /// The response or callback signature was missing or did not verify.
    #[error("response signature missing or invalid")]
    SignatureInvalid,

    /// A sub-code outside the mapping tables. Carries the original wire
    /// code and message verbatim.
    #[error("unmapped gateway code {code}: {message}")]
    Unknown {
        /// The gateway's sub-code, verbatim.
        code: String,
        /// The gateway's human-readable message, verbatim.
        message: String,
    },
}

impl ErrorKind {
    /// Stable machine-readable identifier, distinct from the display text.
    pub fn code(&self) -> &'static str {
        match self {
            Self::OrderNotExist => "ORDER_NOT_EXIST",
            Self::GatewayServerError => "GATEWAY_SERVER_ERROR",
            Self::AwaitingPayment => "AWAITING_PAYMENT",
            Self::TradeClosed => "TRADE_CLOSED",
            Self::TradeAlreadyFinished => "TRADE_ALREADY_FINISHED",
            Self::SignatureInvalid => "SIGNATURE_INVALID",
            Self::Unknown { .. } => "UNKNOWN",
        }
    }

    /// Whether this kind is an unmapped fall-through.
    pub fn is_unknown(&self) -> bool {
        matches!(self, Self::Unknown { .. })
    }
}

/// Map a gateway sub-code to its canonical kind.
///
/// One static table per gateway. Extending a table is a single match arm;
/// call sites never change. Unmapped codes return
/// [`ErrorKind::Unknown`] with the wire code and message preserved.
pub fn map_sub_code(gateway: GatewayKind, code: &str, message: &str) -> ErrorKind {
    let mapped = match gateway {
        GatewayKind::Alipay => match code {
            "ACQ.TRADE_NOT_EXIST" => Some(ErrorKind::OrderNotExist),
            "ACQ.SYSTEM_ERROR" => Some(ErrorKind::GatewayServerError),
            "ACQ.TRADE_HAS_CLOSE" => Some(ErrorKind::TradeClosed),
            "ACQ.TRADE_HAS_FINISHED" => Some(ErrorKind::TradeAlreadyFinished),
            _ => None,
        },
        GatewayKind::Wechat => match code {
            "ORDERNOTEXIST" | "REFUNDNOTEXIST" => Some(ErrorKind::OrderNotExist),
            "SYSTEMERROR" => Some(ErrorKind::GatewayServerError),
            "ORDERCLOSED" => Some(ErrorKind::TradeClosed),
            "ORDERPAID" => Some(ErrorKind::TradeAlreadyFinished),
            "USERPAYING" => Some(ErrorKind::AwaitingPayment),
            _ => None,
        },
    };
    mapped.unwrap_or_else(|| ErrorKind::Unknown {
        code: code.to_string(),
        message: message.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_codes_map_for_every_gateway() {
        assert_eq!(
            map_sub_code(GatewayKind::Alipay, "ACQ.TRADE_NOT_EXIST", ""),
            ErrorKind::OrderNotExist
        );
        assert_eq!(
            map_sub_code(GatewayKind::Wechat, "ORDERNOTEXIST", ""),
            ErrorKind::OrderNotExist
        );
        assert_eq!(
            map_sub_code(GatewayKind::Wechat, "REFUNDNOTEXIST", ""),
            ErrorKind::OrderNotExist
        );
    }

    #[test]
    fn test_server_error_codes() {
        assert_eq!(
            map_sub_code(GatewayKind::Alipay, "ACQ.SYSTEM_ERROR", "busy"),
            ErrorKind::GatewayServerError
        );
        assert_eq!(
            map_sub_code(GatewayKind::Wechat, "SYSTEMERROR", "busy"),
            ErrorKind::GatewayServerError
        );
    }

    #[test]
    fn test_unmapped_code_preserves_code_and_message() {
        let kind = map_sub_code(GatewayKind::Wechat, "NOTENOUGH", "balance insufficient");
        assert_eq!(
            kind,
            ErrorKind::Unknown {
                code: "NOTENOUGH".to_string(),
                message: "balance insufficient".to_string(),
            }
        );
        assert!(kind.is_unknown());
    }

    #[test]
    fn test_mapping_is_per_gateway() {
        // The same code string means nothing on the other gateway.
        let kind = map_sub_code(GatewayKind::Alipay, "ORDERNOTEXIST", "");
        assert!(kind.is_unknown());
    }

    #[test]
    fn test_display_is_human_message() {
        assert_eq!(
            ErrorKind::TradeClosed.to_string(),
            "payment window expired, order closed, please reorder"
        );
        assert_eq!(
            ErrorKind::AwaitingPayment.to_string(),
            "order unpaid, awaiting payment"
        );
    }

    #[test]
    fn test_code_is_machine_identifier() {
        assert_eq!(ErrorKind::TradeClosed.code(), "TRADE_CLOSED");
        assert_eq!(
            ErrorKind::Unknown {
                code: "X".into(),
                message: "y".into()
            }
            .code(),
            "UNKNOWN"
        );
    }

    #[test]
    fn test_error_kind_serde_roundtrip() {
        let kind = ErrorKind::Unknown {
            code: "ACQ.WEIRD".to_string(),
            message: "???".to_string(),
        };
        let json = serde_json::to_string(&kind).unwrap();
        let parsed: ErrorKind = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, kind);
    }

    #[test]
    fn test_gateway_kind_display() {
        assert_eq!(GatewayKind::Alipay.to_string(), "alipay");
        assert_eq!(GatewayKind::Wechat.to_string(), "wechat");
    }
}
