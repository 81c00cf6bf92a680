#![deny(warnings)]
//! Surplus allocation calculator.
//!
//! This crate provides [`AllocationCalculator`], which sets aside a fixed share
//! of the revenue that exceeds a threshold for users who opted in, and renders
//! the outcome as a plain-text report.

pub mod calculator;
pub mod error;
pub mod report;

/// Threshold applied when none is configured, in euros.
pub const DEFAULT_THRESHOLD: f64 = 6500.0;

/// Share of the surplus that is allocated.
pub const ALLOCATION_RATE: f64 = 0.19;

pub use calculator::AllocationCalculator;
pub use error::{AllocationError, CalculatorResult};
pub use report::{render_at, render_report};
pub use surplus_types::{AllocationResult, BatchSummary, Euros, RevenueSource, Transaction};
