//! # unipay-core — Foundational Types for the Gateway Layer
//!
//! This crate is the bedrock of the unipay stack. It defines the primitives
//! shared by every gateway: canonical signing-field handling, the canonical
//! error taxonomy, the response envelope, and immutable configuration
//! values. Every other crate in the workspace depends on `unipay-core`; it
//! depends on nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **`SigningInput` newtype.** ALL signature computation flows through
//!    `SigningInput::new()` — sorted keys, `k=v&` joining, empty values and
//!    the signature field excluded. No hand-rolled base strings anywhere.
//!
//! 2. **Single `ErrorKind` enum.** One canonical failure vocabulary for
//!    both gateways, exhaustive `match` everywhere. Unmapped wire codes
//!    become `Unknown{code, message}` — preserved, never coerced.
//!
//! 3. **Envelope invariant by construction.** `ResponseEnvelope<T>` has
//!    private fields and two constructors; exactly one of data/error is
//!    ever set.
//!
//! 4. **No hidden configuration state.** `PayConfig` is an immutable value
//!    constructed at startup and passed by reference. Secrets arrive as
//!    resolved strings and `Debug` as `[REDACTED]`.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `unipay-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod config;
pub mod envelope;
pub mod error;
pub mod fields;
pub mod taxonomy;

// Re-export primary types for ergonomic imports.
pub use config::{GatewayConfig, GatewaySecret, PayConfig};
pub use envelope::ResponseEnvelope;
pub use error::UnipayError;
pub use fields::{FieldMap, SignedMessage, SigningInput};
pub use taxonomy::{map_sub_code, ErrorKind, GatewayKind};
