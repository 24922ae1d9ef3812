//! Core business logic for Rentra.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! All domain types, validation rules, and calculations live here.
//!
//! # Modules
//!
//! - `ledger` - The rental-and-accounting ledger engine

pub mod ledger;
