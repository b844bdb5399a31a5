//! # Signing Schemes
//!
//! The two secret-mixing schemes the unified gateways document. The
//! canonicalization step that precedes them is shared and lives in
//! `unipay-core`; this module only consumes its output.
//!
//! ## Security Invariant
//!
//! Signing input MUST be `&SigningInput` — you cannot sign a raw string.
//! This enforces that every signature covers the canonical sorted base
//! string with the signature field excluded, preventing the
//! sign-the-wrong-bytes defect across both schemes.
//!
//! ## Schemes
//!
//! Both schemes append `&key={secret}` to the base string, as the gateways
//! document, then diverge:
//!
//! - **HMAC-SHA256** — the suffixed string is additionally MACed with the
//!   secret as the key (signed-XML gateway).
//! - **Keyed SHA-256** — the suffixed string is hashed directly; the
//!   secret's presence in the input is the keying (signed-JSON gateway).
//!
//! Output is uppercase hex in both cases.

use hmac::{Hmac, Mac};
use sha2::{Digest, Sha256};
use thiserror::Error;
use unipay_core::SigningInput;

type HmacSha256 = Hmac<Sha256>;

/// How the secret is mixed into the signature computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SignScheme {
    /// `HMAC-SHA256(base + "&key=" + secret)` keyed by the secret.
    HmacSha256,
    /// `SHA-256(base + "&key=" + secret)`.
    KeyedSha256,
}

impl SignScheme {
    /// The wire name of the scheme, as gateways advertise it.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::HmacSha256 => "HMAC-SHA256",
            Self::KeyedSha256 => "SHA256",
        }
    }
}

/// Error while computing a signature.
#[derive(Error, Debug)]
pub enum SignError {
    /// The MAC could not be keyed.
    #[error("signing key error: {0}")]
    Key(String),
}

/// Compute the signature of a canonical base string.
///
/// Returns uppercase hex, the form both gateways transmit.
pub fn sign(input: &SigningInput, secret: &str, scheme: SignScheme) -> Result<String, SignError> {
    let mut message = String::with_capacity(input.len() + secret.len() + 5);
    message.push_str(input.as_str());
    message.push_str("&key=");
    message.push_str(secret);

    let digest: Vec<u8> = match scheme {
        SignScheme::HmacSha256 => {
            let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
                .map_err(|e| SignError::Key(e.to_string()))?;
            mac.update(message.as_bytes());
            mac.finalize().into_bytes().to_vec()
        }
        SignScheme::KeyedSha256 => Sha256::digest(message.as_bytes()).to_vec(),
    };

    Ok(hex_upper(&digest))
}

fn hex_upper(bytes: &[u8]) -> String {
    use std::fmt::Write;
    let mut out = String::with_capacity(bytes.len() * 2);
    for b in bytes {
        // Infallible for String.
        let _ = write!(out, "{b:02X}");
    }
    out
}
