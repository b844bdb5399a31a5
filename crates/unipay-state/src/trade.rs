//! # Trade Lifecycle State Machine
//!
//! Models the canonical lifecycle of an order as seen through query and
//! callback responses, independent of which gateway reported it.
//!
//! ## States
//!
//! ```text
//! Created ──▶ AwaitingPayment ──▶ Succeeded ──▶ Finished (terminal)
//!    │               │                             ▲
//!    │               ├──────────────────────────────┘
//!    │               │
//!    └───────────────┴──▶ Closed (terminal)
//! ```
//!
//! `Succeeded` and `Finished` are terminal-success; `Closed` is
//! terminal-failure. Observation may skip stages (a callback can be the
//! first time an order is seen at all), but no reconciliation may move a
//! terminal state backward.
//!
//! ## Classification
//!
//! [`classify()`] is the single entry point that turns a gateway's
//! `(success flag, sub-code, trade status)` triple into either a
//! [`TradeSnapshot`] or a canonical [`ErrorKind`]. It is a total pure
//! function: every combination reachable from a gateway maps to a defined
//! outcome. Nothing is persisted between calls.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use unipay_core::taxonomy::{map_sub_code, ErrorKind, GatewayKind};

// ─── Trade State ─────────────────────────────────────────────────────

/// The canonical lifecycle state of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TradeState {
    /// Order created at the gateway, payment flow not yet started.
    Created,
    /// Order exists, buyer has not completed payment.
    AwaitingPayment,
    /// Payment completed (terminal success).
    Succeeded,
    /// Payment window expired or order cancelled (terminal failure).
    Closed,
    /// Trade completed and archived by the gateway (terminal success).
    Finished,
}

impl TradeState {
    /// Whether this state is terminal.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Succeeded | Self::Closed | Self::Finished)
    }

    /// Whether this state represents a completed, paid trade.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Succeeded | Self::Finished)
    }

    /// Whether an observation of `next` is a legal progression from
    /// `self`.
    ///
    /// Re-observing the same state is legal (queries are idempotent), and
    /// stages may be skipped — a callback can report `Succeeded` for an
    /// order whose `AwaitingPayment` phase was never observed. The only
    /// forward move out of a terminal state is the gateway archiving a
    /// succeeded trade.
    pub fn can_advance(self, next: TradeState) -> bool {
        if self == next {
            return true;
        }
        match self {
            Self::Created => true,
            Self::AwaitingPayment => {
                matches!(next, Self::Succeeded | Self::Closed | Self::Finished)
            }
            Self::Succeeded => matches!(next, Self::Finished),
            Self::Closed | Self::Finished => false,
        }
    }
}

impl std::fmt::Display for TradeState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Created => "CREATED",
            Self::AwaitingPayment => "AWAITING_PAYMENT",
            Self::Succeeded => "SUCCEEDED",
            Self::Closed => "CLOSED",
            Self::Finished => "FINISHED",
        };
        f.write_str(s)
    }
}

// ─── Errors ──────────────────────────────────────────────────────────

/// Errors raised by trade-state reconciliation.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum StateError {
    /// A new observation would move an order backward.
    #[error("invalid trade transition: {from} -> {to}")]
    Regression {
        /// Previously reconciled state.
        from: TradeState,
        /// State the new observation reported.
        to: TradeState,
    },
}

/// Reconcile a newly observed state against the last known one.
///
/// With no prior observation, the new state is accepted as-is. Otherwise
/// the observation must be idempotent or a legal progression; anything
/// else means the two sources (a query and a late callback, a replayed
/// notification) disagree, and the caller must not regress its record.
pub fn reconcile(
    previous: Option<TradeState>,
    observed: TradeState,
) -> Result<TradeState, StateError> {
    match previous {
        None => Ok(observed),
        Some(prev) if prev.can_advance(observed) => Ok(observed),
        Some(prev) => Err(StateError::Regression {
            from: prev,
            to: observed,
        }),
    }
}

// ─── Status Vocabulary ───────────────────────────────────────────────

/// A gateway's trade-status vocabulary mapped onto the canonical states.
///
/// Each gateway names the same lifecycle differently; a vocabulary is the
/// lookup table a descriptor supplies so that [`classify()`] stays
/// gateway-agnostic. Strings outside the table deliberately map to no
/// state — they are surfaced raw in observe mode and rejected in strict
/// mode, never guessed at.
#[derive(Debug, Clone, Copy)]
pub struct StatusVocabulary {
    /// The gateway whose sub-code table applies alongside this vocabulary.
    pub gateway: GatewayKind,
    /// Status strings meaning the trade completed.
    pub succeeded: &'static [&'static str],
    /// Status strings meaning payment has not happened yet.
    pub awaiting: &'static [&'static str],
    /// Status strings meaning the order was closed unpaid.
    pub closed: &'static [&'static str],
    /// Status strings meaning the trade is finished and archived.
    pub finished: &'static [&'static str],
}

impl StatusVocabulary {
    /// Map a raw gateway status string onto a canonical state.
    pub fn state_of(&self, raw: &str) -> Option<TradeState> {
        if self.succeeded.contains(&raw) {
            Some(TradeState::Succeeded)
        } else if self.awaiting.contains(&raw) {
            Some(TradeState::AwaitingPayment)
        } else if self.closed.contains(&raw) {
            Some(TradeState::Closed)
        } else if self.finished.contains(&raw) {
            Some(TradeState::Finished)
        } else {
            None
        }
    }
}

// ─── Classification ──────────────────────────────────────────────────

/// How a query's result should be interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryMode {
    /// A plain read: report the current status as data, whatever it is.
    Observe,
    /// A confirmation gate: anything short of unambiguous success is a
    /// typed failure. Used by callers that must be certain a purchase
    /// completed before releasing goods.
    ConfirmSuccess,
}

/// The normalized view of one query or callback observation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TradeSnapshot {
    /// The gateway's status string, verbatim, when one was present.
    pub raw_status: Option<String>,
    /// The canonical state, when the status string is in the vocabulary.
    pub state: Option<TradeState>,
    /// Payment completion time, when the response carried one. Gateway
    /// local time; the gateways do not transmit an offset.
    pub paid_at: Option<NaiveDateTime>,
}

impl TradeSnapshot {
    fn of_status(raw: &str, state: Option<TradeState>) -> Self {
        Self {
            raw_status: Some(raw.to_string()),
            state,
            paid_at: None,
        }
    }
}

/// Classify one gateway observation.
///
/// The decision tree, in order:
///
/// 1. `success_flag` false — the sub-code decides: absent → the gateway
///    failed without saying why (`GatewayServerError`); present → the
///    gateway's sub-code table, with unmapped codes preserved as
///    `Unknown`.
/// 2. `success_flag` true, `ConfirmSuccess` — only a status the
///    vocabulary maps to `Succeeded` passes; awaiting/closed/finished
///    become their typed failures, and anything else (including an absent
///    status) is `GatewayServerError`.
/// 3. `success_flag` true, `Observe` — the raw status is data, mapped to
///    a canonical state when the vocabulary knows it.
pub fn classify(
    vocabulary: &StatusVocabulary,
    success_flag: bool,
    sub_code: Option<(&str, &str)>,
    status: Option<&str>,
    mode: QueryMode,
) -> Result<TradeSnapshot, ErrorKind> {
    if !success_flag {
        return Err(match sub_code {
            None => ErrorKind::GatewayServerError,
            Some((code, message)) => map_sub_code(vocabulary.gateway, code, message),
        });
    }

    match mode {
        QueryMode::ConfirmSuccess => match status.map(|s| (s, vocabulary.state_of(s))) {
            Some((raw, Some(TradeState::Succeeded))) => {
                Ok(TradeSnapshot::of_status(raw, Some(TradeState::Succeeded)))
            }
            Some((_, Some(TradeState::AwaitingPayment))) => Err(ErrorKind::AwaitingPayment),
            Some((_, Some(TradeState::Closed))) => Err(ErrorKind::TradeClosed),
            Some((_, Some(TradeState::Finished))) => Err(ErrorKind::TradeAlreadyFinished),
            _ => Err(ErrorKind::GatewayServerError),
        },
        QueryMode::Observe => Ok(TradeSnapshot {
            raw_status: status.map(str::to_string),
            state: status.and_then(|s| vocabulary.state_of(s)),
            paid_at: None,
        }),
    }
}

// ─── Tests ───────────────────────────────────────────────────────────
