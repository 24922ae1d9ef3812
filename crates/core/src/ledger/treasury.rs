//! Operator-withdrawable fee revenue.
//!
//! A single shared counter: fees collected via payments flow in,
//! operator withdrawals flow out. `Amount` is unsigned and all
//! arithmetic is checked, so revenue can never go negative.

use rentra_shared::Amount;

use super::error::LedgerError;

/// Aggregate fee revenue withdrawable by the operator.
#[derive(Debug, Default)]
pub struct Treasury {
    revenue: Amount,
}

impl Treasury {
    /// Creates an empty treasury.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current withdrawable revenue.
    #[must_use]
    pub fn revenue(&self) -> Amount {
        self.revenue
    }

    /// Records a collected fee payment.
    ///
    /// Mutates only on success, so a failed collect leaves revenue
    /// untouched.
    ///
    /// # Errors
    ///
    /// Returns `AmountOverflow` if the running total overflows.
    pub fn collect(&mut self, amount: Amount) -> Result<(), LedgerError> {
        self.revenue = self
            .revenue
            .checked_add(amount)
            .ok_or(LedgerError::AmountOverflow)?;
        Ok(())
    }

    /// Removes revenue for an operator withdrawal.
    ///
    /// # Errors
    ///
    /// Returns `InvalidAmount` for a zero amount and `InsufficientFunds`
    /// if the treasury cannot cover it.
    pub fn withdraw(&mut self, amount: Amount) -> Result<(), LedgerError> {
        if amount.is_zero() {
            return Err(LedgerError::InvalidAmount);
        }
        self.revenue =
            self.revenue
                .checked_sub(amount)
                .ok_or(LedgerError::InsufficientFunds {
                    required: amount,
                    available: self.revenue,
                })?;
        Ok(())
    }
}
