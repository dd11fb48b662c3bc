//! Payoutfolio Core - Domain entities, services, and traits.
//!
//! This crate contains the fee and currency logic for Payoutfolio.
//! It is database-agnostic and defines traits that are implemented
//! by the `storage-sqlite` crate.

pub mod constants;
pub mod errors;
pub mod fx;
pub mod platform_fees;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
