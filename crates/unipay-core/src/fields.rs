//! # Signing Fields — Canonical Field Maps and Signing Input
//!
//! This module defines `SigningInput`, the sole construction path for the
//! string that signature computation consumes, for every gateway.
//!
//! ## Security Invariant
//!
//! The `SigningInput` newtype has a private inner field. The only way to
//! construct it is through `SigningInput::new()`, which applies the shared
//! canonicalization rules (lexicographic key sort, `key=value` pairs joined
//! by `&`, empty values skipped) and always excludes the signature field
//! itself.
//!
//! This makes two defect classes structurally impossible: signing
//! non-canonical bytes (both parties would compute different signatures),
//! and including the signature field in its own signing computation. Any
//! function computing or checking a signature must accept `&SigningInput`,
//! and the only way to produce one is through the correct pipeline.
//!
//! ## Canonicalization Rules
//!
//! Both gateways document the same base-string construction:
//!
//! 1. Sort field names lexicographically (byte order, case-sensitive).
//! 2. Skip fields whose value is empty.
//! 3. Skip the signature field.
//! 4. Join the remaining `name=value` pairs with `&`.
//!
//! The secret-mixing step that follows is gateway-specific and lives in the
//! signing crate; the canonicalization above is shared.

use std::collections::BTreeMap;

/// An unordered collection of wire fields, canonicalized by key sort.
///
/// Both gateways ultimately speak flat string-to-string maps (one arrives
/// as XML elements, one as JSON members — the transport collaborator has
/// already flattened them by the time this core sees them). Iteration
/// order is the sorted key order, not arrival order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldMap(BTreeMap<String, String>);

impl FieldMap {
    /// Create an empty field map.
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Insert a field, replacing any previous value under the same name.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.insert(name.into(), value.into());
    }

    /// Look up a field value by name.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    /// Remove a field, returning its value if present.
    pub fn remove(&mut self, name: &str) -> Option<String> {
        self.0.remove(name)
    }

    /// Whether a field is present.
    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the map holds no fields.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate fields in sorted key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FieldMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// A wire message carrying its own signature.
///
/// Created from a raw field map by extracting the signature field, so that
/// the remaining fields can be fed to `SigningInput` for recomputation.
/// The signature value is held separately and is never part of `fields`.
#[derive(Debug, Clone)]
pub struct SignedMessage {
    /// All fields except the signature field.
    pub fields: FieldMap,
    /// The signature the sender provided, if any. `None` when the field
    /// was absent; blank values are preserved as-is and treated as missing
    /// by the verifier.
    pub signature: Option<String>,
}

impl SignedMessage {
    /// Split a raw field map into payload fields and the provided signature.
    pub fn extract(mut raw: FieldMap, signature_field: &str) -> Self {
        let signature = raw.remove(signature_field);
        Self {
            fields: raw,
            signature,
        }
    }
}

/// The canonical base string fed to every signing scheme.
///
/// # Invariants
///
/// - The only constructor is [`SigningInput::new()`].
/// - Keys appear in lexicographic order.
/// - Empty values never appear.
/// - The signature field named at construction never appears.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SigningInput(String);

impl SigningInput {
    /// Build the canonical signing base string for a field map.
    ///
    /// `signature_field` names the field carrying the signature itself; it
    /// is excluded from the computation even if present in `fields`. This
    /// is the ONLY way to construct a `SigningInput` — all signature
    /// computation flows through here.
    pub fn new(fields: &FieldMap, signature_field: &str) -> Self {
        let mut out = String::new();
        for (name, value) in fields.iter() {
            if value.is_empty() || name == signature_field {
                continue;
            }
            if !out.is_empty() {
                out.push('&');
            }
            out.push_str(name);
            out.push('=');
            out.push_str(value);
        }
        Self(out)
    }

    /// Access the canonical base string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Length of the base string in bytes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no field survived canonicalization.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl AsRef<[u8]> for SigningInput {
    fn as_ref(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> FieldMap {
        [
            ("out_trade_no", "A1"),
            ("total_fee", "100"),
            ("appid", "wx1234"),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_signing_input_sorted_keys() {
        let input = SigningInput::new(&sample(), "sign");
        assert_eq!(input.as_str(), "appid=wx1234&out_trade_no=A1&total_fee=100");
    }

    #[test]
    fn test_signing_input_skips_empty_values() {
        let mut fields = sample();
        fields.insert("attach", "");
        let input = SigningInput::new(&fields, "sign");
        assert_eq!(input.as_str(), "appid=wx1234&out_trade_no=A1&total_fee=100");
    }

    #[test]
    fn test_signing_input_excludes_signature_field() {
        let mut fields = sample();
        fields.insert("sign", "DEADBEEF");
        let input = SigningInput::new(&fields, "sign");
        assert!(!input.as_str().contains("DEADBEEF"));
        assert!(!input.as_str().contains("sign="));
    }

    #[test]
    fn test_signing_input_empty_map() {
        let input = SigningInput::new(&FieldMap::new(), "sign");
        assert!(input.is_empty());
        assert_eq!(input.as_str(), "");
    }

    #[test]
    fn test_extract_removes_signature() {
        let mut raw = sample();
        raw.insert("sign", "ABCD");
        let msg = SignedMessage::extract(raw, "sign");
        assert_eq!(msg.signature.as_deref(), Some("ABCD"));
        assert!(!msg.fields.contains("sign"));
        assert_eq!(msg.fields.len(), 3);
    }

    #[test]
    fn test_extract_absent_signature() {
        let msg = SignedMessage::extract(sample(), "sign");
        assert!(msg.signature.is_none());
        assert_eq!(msg.fields.len(), 3);
    }

    #[test]
    fn test_field_map_replaces_duplicate_keys() {
        let mut fields = FieldMap::new();
        fields.insert("k", "old");
        fields.insert("k", "new");
        assert_eq!(fields.get("k"), Some("new"));
        assert_eq!(fields.len(), 1);
    }

    #[test]
    fn test_iteration_order_is_sorted() {
        let fields: FieldMap = [("z", "1"), ("a", "2"), ("m", "3")].into_iter().collect();
        let keys: Vec<&str> = fields.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["a", "m", "z"]);
    }
}
