//! Shared types and configuration for Rentra.
//!
//! This crate provides common types used across all other crates:
//! - Integer money amounts in the smallest fee unit
//! - Typed IDs for type-safe entity references
//! - Engine configuration management

pub mod config;
pub mod types;

pub use config::{EngineConfig, FeeConfig, FeePolicyKind};
pub use types::{Amount, ItemId, RenterId};
