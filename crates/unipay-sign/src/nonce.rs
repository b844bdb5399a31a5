//! # Nonce Generation
//!
//! Random alphanumeric nonces for outbound signed requests. The gateways
//! require a nonce field on every request they sign; the outbound request
//! builders consume this helper.

use rand::Rng;

const ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// Generate a random alphanumeric nonce of the given length.
pub fn nonce_str(len: usize) -> String {
    let mut rng = rand::thread_rng();
    (0..len)
        .map(|_| {
            let idx = rng.gen_range(0..ALPHABET.len());
            ALPHABET[idx] as char
        })
        .collect()
}
