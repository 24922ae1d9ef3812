//! Role resolution and operator checks.
//!
//! Every operation receives a caller identity the transport layer has
//! already authenticated; the engine only decides whether that identity
//! is the operator.

use rentra_shared::RenterId;

use super::error::LedgerError;

/// The role a caller acts under for a given operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// The single privileged identity managing items and revenue.
    Operator,
    /// Any other identity (registered or not).
    Renter,
}

/// Resolves the caller's role against the current operator identity.
#[must_use]
pub fn role_of(operator: RenterId, caller: RenterId) -> Role {
    if caller == operator {
        Role::Operator
    } else {
        Role::Renter
    }
}

/// Rejects callers that are not the current operator.
///
/// # Errors
///
/// Returns `LedgerError::Unauthorized` if `caller` is not `operator`.
pub fn require_operator(operator: RenterId, caller: RenterId) -> Result<(), LedgerError> {
    match role_of(operator, caller) {
        Role::Operator => Ok(()),
        Role::Renter => Err(LedgerError::Unauthorized),
    }
}
