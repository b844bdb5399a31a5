//! # unipay-sign — Signing and Verification Primitives
//!
//! Computes and validates the keyed-hash signatures both gateways attach
//! to their wire messages.
//!
//! ## Security Invariant
//!
//! - Signing input MUST be `&SigningInput` — you cannot sign a raw string.
//!   The canonical base string (sorted keys, signature field excluded) is
//!   the only thing this crate will put under a key.
//! - Signature comparison is constant-time (`subtle`), case-insensitive
//!   over hex.
//! - Verification never fails with an error: missing and mismatching
//!   signatures are distinct, reportable outcomes, not exceptions.

pub mod nonce;
pub mod scheme;
pub mod verify;

pub use nonce::nonce_str;
pub use scheme::{sign, SignError, SignScheme};
pub use verify::{check, verify, SignatureCheck};
