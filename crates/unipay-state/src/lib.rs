//! # unipay-state — Canonical Trade Lifecycle
//!
//! The state machines of the unipay stack. One canonical trade lifecycle
//! absorbs both gateways' status vocabularies, and one classifier turns a
//! gateway observation into either a normalized snapshot or a typed
//! failure kind.
//!
//! ## Design
//!
//! - Classification is a total pure function — every `(flag, sub-code,
//!   status)` combination a gateway can produce maps to a defined outcome.
//! - Reconciliation is monotonic: terminal states never move backward,
//!   and conflicting observations surface as typed errors instead of
//!   silently clobbering the record.
//! - Nothing here persists state or performs I/O; callers own storage and
//!   per-order serialization.

pub mod trade;
pub mod transfer;

// ─── Trade re-exports ────────────────────────────────────────────────

pub use trade::{
    classify, reconcile, QueryMode, StateError, StatusVocabulary, TradeSnapshot, TradeState,
};

// ─── Transfer re-exports ─────────────────────────────────────────────

pub use transfer::{classify_transfer, TransferState};
