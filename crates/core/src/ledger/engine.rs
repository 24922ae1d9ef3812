//! The rental ledger facade.
//!
//! Composes access control, the user directory, the asset registry, the
//! checkout state machine, and the treasury into the externally callable
//! operation set. Operations are processed one at a time, each to
//! completion: every method validates fully before its first write, so a
//! rejected operation leaves the ledger in its prior valid state. The
//! caller identity and the current time are trusted inputs supplied by
//! the transport layer.

use chrono::{DateTime, Utc};
use rentra_shared::{Amount, EngineConfig, ItemId, RenterId};
use serde::{Deserialize, Serialize};

use super::access;
use super::checkout::FeePolicy;
use super::directory::{Directory, Renter};
use super::error::LedgerError;
use super::registry::{Item, ItemSpec, ItemStatus, Registry};
use super::treasury::Treasury;

/// An instruction for the external funds transfer a withdrawal effects.
///
/// The ledger's own bookkeeping is decremented before this value is
/// handed out, so a transfer callback that re-enters the ledger sees
/// already-decremented state and cannot withdraw the same funds twice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[must_use = "the transfer still has to be executed by the caller"]
pub struct Transfer {
    /// The identity the funds go to.
    pub to: RenterId,
    /// The amount to transfer.
    pub amount: Amount,
}

/// The rental-and-accounting ledger engine.
///
/// One instance per deployment; the asset kind (motors, books, ...) is
/// captured entirely by the item metadata and the configured fee policy.
#[derive(Debug)]
pub struct RentalLedger {
    operator: RenterId,
    directory: Directory,
    registry: Registry,
    treasury: Treasury,
    fee_policy: FeePolicy,
}

impl RentalLedger {
    /// Creates an empty ledger with the given initial operator and fee
    /// policy.
    #[must_use]
    pub fn new(operator: RenterId, fee_policy: FeePolicy) -> Self {
        Self {
            operator,
            directory: Directory::new(),
            registry: Registry::new(),
            treasury: Treasury::new(),
            fee_policy,
        }
    }

    /// Creates a ledger configured from an [`EngineConfig`].
    #[must_use]
    pub fn from_config(operator: RenterId, config: &EngineConfig) -> Self {
        Self::new(operator, FeePolicy::from_config(&config.fee))
    }

    // ========== User Directory ==========

    /// Registers the caller as a renter.
    ///
    /// # Errors
    ///
    /// Returns `AlreadyRegistered` if the identity already has a record.
    pub fn register(
        &mut self,
        caller: RenterId,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
    ) -> Result<(), LedgerError> {
        self.directory.register(caller, first_name, last_name)
    }

    /// Read-only projection of a renter record.
    ///
    /// # Errors
    ///
    /// Returns `RenterNotFound` for unregistered identities.
    pub fn renter(&self, identity: RenterId) -> Result<&Renter, LedgerError> {
        self.directory.get(identity)
    }

    /// Adds funds to the caller's balance.
    ///
    /// This is the only way funds enter a balance.
    ///
    /// # Errors
    ///
    /// Returns `InvalidAmount` for a zero amount, `RenterNotFound` for
    /// unregistered callers, `AmountOverflow` if the balance overflows.
    pub fn deposit(&mut self, caller: RenterId, amount: Amount) -> Result<(), LedgerError> {
        if amount.is_zero() {
            return Err(LedgerError::InvalidAmount);
        }
        let renter = self.directory.get_mut(caller)?;
        renter.balance = renter
            .balance
            .checked_add(amount)
            .ok_or(LedgerError::AmountOverflow)?;
        Ok(())
    }

    /// Withdraws unused balance back to the caller.
    ///
    /// The balance is decremented before the [`Transfer`] instruction is
    /// returned.
    ///
    /// # Errors
    ///
    /// Returns `InvalidAmount` for a zero amount and `InsufficientFunds`
    /// if the balance cannot cover the amount.
    pub fn withdraw_balance(
        &mut self,
        caller: RenterId,
        amount: Amount,
    ) -> Result<Transfer, LedgerError> {
        if amount.is_zero() {
            return Err(LedgerError::InvalidAmount);
        }
        let renter = self.directory.get_mut(caller)?;
        renter.balance =
            renter
                .balance
                .checked_sub(amount)
                .ok_or(LedgerError::InsufficientFunds {
                    required: amount,
                    available: renter.balance,
                })?;
        Ok(Transfer { to: caller, amount })
    }

    // ========== Asset Registry ==========

    /// Lists a new item. Operator-only.
    ///
    /// # Errors
    ///
    /// Returns `Unauthorized` for non-operator callers.
    pub fn add_item(&mut self, caller: RenterId, spec: ItemSpec) -> Result<ItemId, LedgerError> {
        access::require_operator(self.operator, caller)?;
        Ok(self.registry.add(spec))
    }

    /// Read-only projection of an item record.
    ///
    /// # Errors
    ///
    /// Returns `ItemNotFound` for unknown ids.
    pub fn item(&self, id: ItemId) -> Result<&Item, LedgerError> {
        self.registry.get(id)
    }

    /// All items with the given status, in ascending id order.
    #[must_use]
    pub fn items_by_status(&self, status: ItemStatus) -> Vec<&Item> {
        self.registry.by_status(status)
    }

    /// Replaces an item's metadata. Operator-only.
    ///
    /// # Errors
    ///
    /// Returns `Unauthorized` for non-operator callers and `ItemNotFound`
    /// for unknown ids.
    pub fn edit_item_metadata(
        &mut self,
        caller: RenterId,
        id: ItemId,
        spec: ItemSpec,
    ) -> Result<(), LedgerError> {
        access::require_operator(self.operator, caller)?;
        self.registry.edit_metadata(id, spec)
    }

    /// Moves an item between Available and Retired. Operator-only.
    ///
    /// # Errors
    ///
    /// Returns `Unauthorized` for non-operator callers, `ItemNotFound`
    /// for unknown ids, and `InvalidStatusChange` for transitions
    /// involving `InUse` (those belong to the checkout state machine).
    pub fn edit_item_status(
        &mut self,
        caller: RenterId,
        id: ItemId,
        status: ItemStatus,
    ) -> Result<(), LedgerError> {
        access::require_operator(self.operator, caller)?;
        self.registry.edit_status(id, status)
    }

    // ========== Checkout State Machine ==========

    /// Opens a checkout session for the caller on the given item.
    ///
    /// # Errors
    ///
    /// Returns `RenterNotFound` for unregistered callers,
    /// `AlreadyCheckedOut` if the caller already holds an item,
    /// `ItemNotFound` for unknown ids, and `ItemUnavailable` if the item
    /// is retired or held by someone else.
    pub fn check_out(
        &mut self,
        caller: RenterId,
        item_id: ItemId,
        now: DateTime<Utc>,
    ) -> Result<(), LedgerError> {
        let renter = self.directory.get(caller)?;
        if let Some(held) = renter.active_checkout {
            return Err(LedgerError::AlreadyCheckedOut(held));
        }
        let item = self.registry.get(item_id)?;
        if item.status != ItemStatus::Available {
            return Err(LedgerError::ItemUnavailable(item_id));
        }

        // Both writes are infallible once validation passed.
        self.registry.set_status(item_id, ItemStatus::InUse)?;
        self.directory.get_mut(caller)?.open_session(item_id, now);
        Ok(())
    }

    /// Closes the caller's checkout session and accrues the fee owed.
    ///
    /// Returns the fee added to the caller's debt.
    ///
    /// # Errors
    ///
    /// Returns `NoActiveCheckout` if the caller holds nothing and
    /// `AmountOverflow` if the fee or resulting debt overflows.
    pub fn check_in(&mut self, caller: RenterId, now: DateTime<Utc>) -> Result<Amount, LedgerError> {
        let renter = self.directory.get(caller)?;
        let (item_id, started_at) = match (renter.active_checkout, renter.checkout_started_at) {
            (Some(item_id), Some(started_at)) => (item_id, started_at),
            _ => return Err(LedgerError::NoActiveCheckout),
        };

        let item = self.registry.get(item_id)?;
        let elapsed = now.signed_duration_since(started_at);
        let fee = self.fee_policy.fee_due(elapsed, item.per_use_fee)?;
        let new_debt = renter
            .debt
            .checked_add(fee)
            .ok_or(LedgerError::AmountOverflow)?;

        // Commit: session cleared, debt accrued, item released together.
        self.registry.set_status(item_id, ItemStatus::Available)?;
        let renter = self.directory.get_mut(caller)?;
        renter.close_session();
        renter.debt = new_debt;
        Ok(fee)
    }

    // ========== Treasury ==========

    /// Settles the caller's full debt from their balance.
    ///
    /// Returns the amount paid.
    ///
    /// # Errors
    ///
    /// Returns `NoDebt` when there is nothing to pay (a distinct outcome
    /// the caller may treat as benign) and `InsufficientFunds` when the
    /// balance cannot cover the debt.
    pub fn make_payment(&mut self, caller: RenterId) -> Result<Amount, LedgerError> {
        let renter = self.directory.get(caller)?;
        let debt = renter.debt;
        if debt.is_zero() {
            return Err(LedgerError::NoDebt);
        }
        let new_balance =
            renter
                .balance
                .checked_sub(debt)
                .ok_or(LedgerError::InsufficientFunds {
                    required: debt,
                    available: renter.balance,
                })?;

        // The collect is the last fallible step; balance and debt
        // writes after it cannot fail.
        self.treasury.collect(debt)?;
        let renter = self.directory.get_mut(caller)?;
        renter.balance = new_balance;
        renter.debt = Amount::ZERO;
        Ok(debt)
    }

    /// Withdraws accumulated fee revenue. Operator-only.
    ///
    /// Revenue is decremented before the [`Transfer`] instruction is
    /// returned.
    ///
    /// # Errors
    ///
    /// Returns `Unauthorized` for non-operator callers, `InvalidAmount`
    /// for a zero amount, and `InsufficientFunds` if revenue cannot
    /// cover the amount.
    pub fn withdraw_revenue(
        &mut self,
        caller: RenterId,
        amount: Amount,
    ) -> Result<Transfer, LedgerError> {
        access::require_operator(self.operator, caller)?;
        self.treasury.withdraw(amount)?;
        Ok(Transfer { to: caller, amount })
    }

    /// Total collected, not-yet-withdrawn revenue. Operator-only.
    ///
    /// # Errors
    ///
    /// Returns `Unauthorized` for non-operator callers.
    pub fn total_payments(&self, caller: RenterId) -> Result<Amount, LedgerError> {
        access::require_operator(self.operator, caller)?;
        Ok(self.treasury.revenue())
    }

    // ========== Access Control ==========

    /// Replaces the operator identity, immediately and unconditionally.
    /// Operator-only.
    ///
    /// # Errors
    ///
    /// Returns `Unauthorized` for non-operator callers.
    pub fn set_operator(
        &mut self,
        caller: RenterId,
        new_operator: RenterId,
    ) -> Result<(), LedgerError> {
        access::require_operator(self.operator, caller)?;
        self.operator = new_operator;
        Ok(())
    }

    /// The current operator identity.
    #[must_use]
    pub fn operator(&self) -> RenterId {
        self.operator
    }

    // ========== Projections ==========

    /// Number of registered renters.
    #[must_use]
    pub fn renter_count(&self) -> usize {
        self.directory.len()
    }

    /// Number of listed items.
    #[must_use]
    pub fn item_count(&self) -> usize {
        self.registry.len()
    }
}
