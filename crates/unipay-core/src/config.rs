//! # Gateway Configuration — Immutable Value Objects
//!
//! Per-gateway credential material as opaque strings, constructed once at
//! process start and passed by reference into the gateway descriptors.
//! There is no global accessor and no setter: an application that needs to
//! rotate secrets builds a new `PayConfig` and swaps the reference at a
//! point it controls. Key files, certificates, and their parsing belong to
//! the configuration collaborator — this core only ever sees resolved
//! strings.

use crate::taxonomy::GatewayKind;

/// An opaque signing secret.
///
/// Custom `Debug` redacts the value to prevent credential leakage in logs.
#[derive(Clone, PartialEq, Eq)]
pub struct GatewaySecret(String);

impl GatewaySecret {
    /// Wrap an already-resolved secret string.
    pub fn new(secret: impl Into<String>) -> Self {
        Self(secret.into())
    }

    /// Expose the secret for signing computation.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for GatewaySecret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("GatewaySecret([REDACTED])")
    }
}

/// Credentials for one gateway.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Merchant/app identifier assigned by the gateway.
    pub merchant_id: String,
    /// Shared secret used by the gateway's signing scheme.
    pub signing_secret: GatewaySecret,
}

impl GatewayConfig {
    /// Build a gateway configuration from resolved credential strings.
    pub fn new(merchant_id: impl Into<String>, signing_secret: impl Into<String>) -> Self {
        Self {
            merchant_id: merchant_id.into(),
            signing_secret: GatewaySecret::new(signing_secret),
        }
    }
}

/// The full configuration value: one credential set per gateway.
///
/// Immutable after construction.
#[derive(Debug, Clone)]
pub struct PayConfig {
    alipay: GatewayConfig,
    wechat: GatewayConfig,
}

impl PayConfig {
    /// Assemble the configuration from both gateways' credentials.
    pub fn new(alipay: GatewayConfig, wechat: GatewayConfig) -> Self {
        Self { alipay, wechat }
    }

    /// The credential set for a gateway.
    pub fn gateway(&self, kind: GatewayKind) -> &GatewayConfig {
        match kind {
            GatewayKind::Alipay => &self.alipay,
            GatewayKind::Wechat => &self.wechat,
        }
    }

    /// Convenience accessor for a gateway's signing secret.
    pub fn signing_secret(&self, kind: GatewayKind) -> &str {
        self.gateway(kind).signing_secret.expose()
    }
}
