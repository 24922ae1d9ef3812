//! The rental-and-accounting ledger.
//!
//! This module implements the authoritative state machine for a
//! single-operator rental platform:
//! - Role resolution and operator checks
//! - User directory (balances, debts, active checkouts)
//! - Asset registry (sequential ids, availability status)
//! - Checkout fee policies (per-minute or flat-rate)
//! - Treasury (operator-withdrawable fee revenue)
//! - The engine facade tying the above together
//!
//! The engine assumes an already-ordered, already-authenticated sequence
//! of operations with a trustworthy caller identity and clock; a host
//! running on multiple threads must serialize calls behind one exclusive
//! section.

pub mod access;
pub mod checkout;
pub mod directory;
pub mod engine;
pub mod error;
pub mod registry;
pub mod treasury;

#[cfg(test)]
mod engine_props;

pub use access::{Role, require_operator, role_of};
pub use checkout::FeePolicy;
pub use directory::{Directory, Renter};
pub use engine::{RentalLedger, Transfer};
pub use error::LedgerError;
pub use registry::{Item, ItemSpec, ItemStatus, Registry};
pub use treasury::Treasury;
