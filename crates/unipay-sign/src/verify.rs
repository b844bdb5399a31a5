//! # Signature Verification
//!
//! Validates the signature a gateway attached to a callback, detecting
//! both tampering and the distinct — and separately reportable — case of a
//! signature that was never provided.
//!
//! ## Contract
//!
//! Verification is a pure function over its inputs and never fails with an
//! error: a missing or blank signature yields [`SignatureCheck::Missing`],
//! a recomputation that does not match yields [`SignatureCheck::Mismatch`].
//! Callers log the two outcomes differently; both harden into the same
//! canonical `SignatureInvalid` failure kind.
//!
//! ## Timing
//!
//! Comparison is constant-time over the hex bytes. When lengths differ a
//! dummy comparison keeps timing independent of where the difference lies.

use subtle::ConstantTimeEq;
use unipay_core::{FieldMap, SigningInput};

use crate::scheme::{sign, SignScheme};

/// Outcome of checking a provided signature against a recomputation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignatureCheck {
    /// The provided signature matches the recomputed one.
    Valid,
    /// No signature was provided, or it was blank.
    Missing,
    /// A signature was provided but does not match.
    Mismatch,
}

impl SignatureCheck {
    /// Whether the message may be trusted.
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }
}

/// Check a provided signature against the fields it should cover.
///
/// `fields` must already have the signature field extracted (see
/// `SignedMessage::extract`); the field is excluded from the recomputation
/// in any case because `SigningInput` drops it by name.
pub fn check(
    fields: &FieldMap,
    provided: Option<&str>,
    secret: &str,
    scheme: SignScheme,
    signature_field: &str,
) -> SignatureCheck {
    let provided = match provided {
        Some(s) if !s.trim().is_empty() => s,
        _ => return SignatureCheck::Missing,
    };

    let input = SigningInput::new(fields, signature_field);
    let expected = match sign(&input, secret, scheme) {
        Ok(sig) => sig,
        // Unreachable with the supported schemes; a signature that cannot
        // be recomputed cannot be confirmed.
        Err(_) => return SignatureCheck::Mismatch,
    };

    // Gateways are inconsistent about hex case; normalize before comparing.
    if constant_time_sig_eq(&provided.to_ascii_uppercase(), &expected) {
        SignatureCheck::Valid
    } else {
        SignatureCheck::Mismatch
    }
}

/// Boolean form of [`check()`] — the independently exposed primitive for
/// callers that only need a trust decision.
pub fn verify(
    fields: &FieldMap,
    provided: Option<&str>,
    secret: &str,
    scheme: SignScheme,
    signature_field: &str,
) -> bool {
    check(fields, provided, secret, scheme, signature_field).is_valid()
}

/// Constant-time comparison of two signature strings.
///
/// When lengths differ, performs a dummy comparison to avoid leaking
/// length information through timing variance.
fn constant_time_sig_eq(provided: &str, expected: &str) -> bool {
    let provided = provided.as_bytes();
    let expected = expected.as_bytes();
    if provided.len() != expected.len() {
        let _ = expected.ct_eq(expected);
        return false;
    }
    provided.ct_eq(expected).into()
}
