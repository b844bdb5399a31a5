//! # Gateway Descriptors
//!
//! A descriptor is the complete value-level description of one gateway's
//! response conventions: which field carries the signature, which scheme
//! signs it, how success is flagged, where sub-codes and trade statuses
//! live, and how its status vocabulary maps onto the canonical lifecycle.
//!
//! The orchestration in `handler.rs` is written once against this struct;
//! adding a gateway means adding a descriptor value, not a handler type.

use chrono::NaiveDateTime;

use unipay_core::{FieldMap, GatewayKind, UnipayError};
use unipay_sign::SignScheme;
use unipay_state::StatusVocabulary;

/// Everything the shared orchestration needs to know about one gateway.
#[derive(Clone, Copy)]
pub struct GatewayDescriptor {
    /// Which gateway this describes; selects the sub-code table.
    pub gateway: GatewayKind,
    /// The secret-mixing scheme for this gateway's signatures.
    pub scheme: SignScheme,
    /// Wire name of the field carrying the signature.
    pub signature_field: &'static str,
    /// This gateway's trade-status vocabulary.
    pub vocabulary: StatusVocabulary,
    /// Read the gateway's own success indicator. Errs when the flag field
    /// itself is absent — that is a malformed response, not a failure
    /// outcome.
    pub success_flag: fn(&FieldMap) -> Result<bool, UnipayError>,
    /// Extract the failure sub-code and its message, when present.
    pub sub_code: fn(&FieldMap) -> Option<(&str, &str)>,
    /// Extract the trade-status string, when present.
    pub trade_status: fn(&FieldMap) -> Option<&str>,
    /// Parse the payment-completion time, when the response carries one.
    pub paid_at: fn(&FieldMap) -> Option<NaiveDateTime>,
}

impl std::fmt::Debug for GatewayDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GatewayDescriptor")
            .field("gateway", &self.gateway)
            .field("scheme", &self.scheme)
            .field("signature_field", &self.signature_field)
            .finish_non_exhaustive()
    }
}
