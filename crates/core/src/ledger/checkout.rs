//! Checkout fee accrual policies.
//!
//! The only difference between the motor-rental and book-lending
//! deployments is how the fee owed at check-in is computed, so the
//! policy is a parameter of the engine rather than two engine copies.

use chrono::TimeDelta;
use rentra_shared::{Amount, FeeConfig, FeePolicyKind};

use super::error::LedgerError;

/// Maps checkout duration and per-use fee to the debt recorded at
/// check-in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeePolicy {
    /// Elapsed minutes (floored, at least `minimum_minutes`) times the
    /// item's per-use fee.
    PerMinute {
        /// Minimum number of minutes billed per checkout.
        minimum_minutes: u64,
    },
    /// The item's per-use fee once per checkout, regardless of elapsed
    /// time.
    FlatRate,
}

impl FeePolicy {
    /// Builds a policy from the engine configuration.
    #[must_use]
    pub fn from_config(config: &FeeConfig) -> Self {
        match config.policy {
            FeePolicyKind::PerMinute => Self::PerMinute {
                minimum_minutes: config.minimum_minutes,
            },
            FeePolicyKind::FlatRate => Self::FlatRate,
        }
    }

    /// Computes the fee owed for a checkout of the given duration.
    ///
    /// A non-positive duration bills as zero elapsed minutes before the
    /// minimum is applied, so a caller-supplied clock that went backwards
    /// cannot produce a negative fee.
    ///
    /// # Errors
    ///
    /// Returns `AmountOverflow` if the multiplication overflows.
    pub fn fee_due(self, elapsed: TimeDelta, per_use_fee: Amount) -> Result<Amount, LedgerError> {
        match self {
            Self::PerMinute { minimum_minutes } => {
                let elapsed_minutes = u64::try_from(elapsed.num_minutes().max(0))
                    .map_err(|_| LedgerError::AmountOverflow)?;
                let billed_minutes = elapsed_minutes.max(minimum_minutes);
                per_use_fee
                    .checked_mul(billed_minutes)
                    .ok_or(LedgerError::AmountOverflow)
            }
            Self::FlatRate => Ok(per_use_fee),
        }
    }
}

impl Default for FeePolicy {
    fn default() -> Self {
        Self::from_config(&FeeConfig::default())
    }
}
