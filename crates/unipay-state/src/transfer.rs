//! # Transfer Status Classification
//!
//! Normalizes the payout-to-bank status vocabulary. A transfer that
//! reached the bank can still come back: the gateway documents that a
//! returned payment moves the order from paid-out back to refunded, with
//! the amount and fee restored — so `Succeeded → Returned` is the one
//! legal move out of a success state here.

use serde::{Deserialize, Serialize};

use unipay_core::taxonomy::ErrorKind;

/// The lifecycle state of a payout transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransferState {
    /// In flight; a definite failure will carry a reason, otherwise none.
    Processing,
    /// Paid out (the bank may still return it).
    Succeeded,
    /// Payout failed; reissue under a new transfer number.
    Failed,
    /// Bank returned the payment after success; amount and fee restored.
    Returned,
}

impl TransferState {
    /// Whether no further movement is possible.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Failed | Self::Returned)
    }

    /// Whether an observation of `next` is a legal progression.
    pub fn can_advance(self, next: TransferState) -> bool {
        if self == next {
            return true;
        }
        match self {
            Self::Processing => matches!(next, Self::Succeeded | Self::Failed),
            Self::Succeeded => matches!(next, Self::Returned),
            Self::Failed | Self::Returned => false,
        }
    }
}

impl std::fmt::Display for TransferState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Processing => "PROCESSING",
            Self::Succeeded => "SUCCEEDED",
            Self::Failed => "FAILED",
            Self::Returned => "RETURNED",
        };
        f.write_str(s)
    }
}

/// Classify a payout status string from a transfer query.
///
/// Unmapped statuses are preserved as `Unknown` with the gateway's
/// failure reason, when one accompanied the status.
pub fn classify_transfer(status: &str, reason: Option<&str>) -> Result<TransferState, ErrorKind> {
    match status {
        "PROCESSING" => Ok(TransferState::Processing),
        "SUCCESS" => Ok(TransferState::Succeeded),
        "FAILED" => Ok(TransferState::Failed),
        "BANK_FAIL" => Ok(TransferState::Returned),
        other => Err(ErrorKind::Unknown {
            code: other.to_string(),
            message: reason.unwrap_or_default().to_string(),
        }),
    }
}
