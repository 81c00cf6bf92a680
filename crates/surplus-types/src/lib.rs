//! Surplus Types
//!
//! This crate defines the record types shared by the surplus allocation crates
//! (currently `surplus-calculator` and `surplus-cli`). Keeping them here lets the
//! CLI serialize results without depending on calculator internals.

#![deny(warnings)]
#![deny(clippy::all)]
#![deny(missing_docs)]

mod types;
pub use types::{AllocationResult, BatchSummary, Euros, RevenueSource, Transaction};
