//! Ledger error types for validation and state errors.
//!
//! This module defines all errors that can occur during ledger operations:
//! access control failures, lookup failures, checkout state violations,
//! and funds/arithmetic errors. Every failed operation leaves the engine
//! in its prior valid state.

use rentra_shared::{Amount, ItemId, RenterId};
use thiserror::Error;

/// Errors that can occur during ledger operations.
#[derive(Debug, Error)]
pub enum LedgerError {
    // ========== Access Control Errors ==========
    /// Caller is not the operator.
    #[error("Caller is not the operator")]
    Unauthorized,

    // ========== Lookup Errors ==========
    /// Renter not found.
    #[error("Renter not found: {0}")]
    RenterNotFound(RenterId),

    /// Item not found.
    #[error("Item not found: {0}")]
    ItemNotFound(ItemId),

    // ========== Registration Errors ==========
    /// Identity already has a renter record.
    #[error("Renter already registered: {0}")]
    AlreadyRegistered(RenterId),

    // ========== Checkout Errors ==========
    /// Renter already holds an active checkout.
    #[error("Renter already has item {0} checked out")]
    AlreadyCheckedOut(ItemId),

    /// Item is not available for checkout.
    #[error("Item {0} is not available")]
    ItemUnavailable(ItemId),

    /// Renter has no active checkout to close.
    #[error("No active checkout")]
    NoActiveCheckout,

    /// Operator-driven status edits may only move an item between
    /// Available and Retired; InUse is reserved to the checkout machine.
    #[error("Invalid status change for item {0}")]
    InvalidStatusChange(ItemId),

    // ========== Funds Errors ==========
    /// Renter has no outstanding debt to pay.
    #[error("No outstanding debt")]
    NoDebt,

    /// Balance or revenue cannot cover the requested amount.
    #[error("Insufficient funds: required {required}, available {available}")]
    InsufficientFunds {
        /// The amount the operation needed.
        required: Amount,
        /// The amount actually available.
        available: Amount,
    },

    /// A positive amount is required.
    #[error("Amount must be positive")]
    InvalidAmount,

    /// Checked arithmetic overflowed.
    #[error("Amount arithmetic overflowed")]
    AmountOverflow,
}

impl LedgerError {
    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Unauthorized => "UNAUTHORIZED",
            Self::RenterNotFound(_) => "RENTER_NOT_FOUND",
            Self::ItemNotFound(_) => "ITEM_NOT_FOUND",
            Self::AlreadyRegistered(_) => "ALREADY_REGISTERED",
            Self::AlreadyCheckedOut(_) => "ALREADY_CHECKED_OUT",
            Self::ItemUnavailable(_) => "ITEM_UNAVAILABLE",
            Self::NoActiveCheckout => "NO_ACTIVE_CHECKOUT",
            Self::InvalidStatusChange(_) => "INVALID_STATUS_CHANGE",
            Self::NoDebt => "NO_DEBT",
            Self::InsufficientFunds { .. } => "INSUFFICIENT_FUNDS",
            Self::InvalidAmount => "INVALID_AMOUNT",
            Self::AmountOverflow => "AMOUNT_OVERFLOW",
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub fn http_status_code(&self) -> u16 {
        match self {
            // 400 Bad Request - validation errors
            Self::InvalidAmount | Self::InvalidStatusChange(_) | Self::NoDebt => 400,

            // 402 Payment Required - funds errors
            Self::InsufficientFunds { .. } => 402,

            // 403 Forbidden - permission errors
            Self::Unauthorized => 403,

            // 404 Not Found
            Self::RenterNotFound(_) | Self::ItemNotFound(_) => 404,

            // 409 Conflict - state errors
            Self::AlreadyRegistered(_)
            | Self::AlreadyCheckedOut(_)
            | Self::ItemUnavailable(_)
            | Self::NoActiveCheckout => 409,

            // 500 Internal Server Error
            Self::AmountOverflow => 500,
        }
    }
}
