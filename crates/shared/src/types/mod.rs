//! Common types used across the application.

pub mod id;
pub mod money;

pub use id::{ItemId, RenterId};
pub use money::Amount;
