use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome of a single allocation calculation.
///
/// Fields are read-only; `remaining` is always derived from `total_revenue` and
/// `allocation`, so `remaining + allocation == total_revenue` holds for every
/// value of this type.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AllocationResult {
    total_revenue: f64,
    threshold: f64,
    surplus: f64,
    allocation: f64,
    remaining: f64,
    opted_in: bool,
}

impl AllocationResult {
    /// Result for a user who has not opted in: nothing is set aside.
    pub fn opted_out(total_revenue: f64, threshold: f64) -> Self {
        Self {
            total_revenue,
            threshold,
            surplus: 0.0,
            allocation: 0.0,
            remaining: total_revenue,
            opted_in: false,
        }
    }

    /// Result for an opted-in user. The surplus over `threshold` (never below
    /// zero) is multiplied by `rate`; every field is derived from these inputs.
    pub fn opted_in(total_revenue: f64, threshold: f64, rate: f64) -> Self {
        let surplus = (total_revenue - threshold).max(0.0);
        let allocation = surplus * rate;
        Self {
            total_revenue,
            threshold,
            surplus,
            allocation,
            remaining: total_revenue - allocation,
            opted_in: true,
        }
    }

    /// Revenue the allocation was computed from.
    pub fn total_revenue(&self) -> f64 {
        self.total_revenue
    }

    /// Threshold configured on the calculator that produced this result.
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Revenue above the threshold, never negative. Zero when opted out.
    pub fn surplus(&self) -> f64 {
        self.surplus
    }

    /// Amount set aside. Zero when opted out.
    pub fn allocation(&self) -> f64 {
        self.allocation
    }

    /// Revenue left after the allocation.
    pub fn remaining(&self) -> f64 {
        self.remaining
    }

    /// Whether the user opted in to the allocation.
    pub fn is_opted_in(&self) -> bool {
        self.opted_in
    }
}

/// Aggregate of a batch of transactions reduced to one allocation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchSummary {
    summary: AllocationResult,
    transaction_count: usize,
    total_revenue: f64,
    total_allocation: f64,
    report: String,
}

impl BatchSummary {
    /// Builds a summary; the revenue and allocation totals are taken from `summary`.
    pub fn new(summary: AllocationResult, transaction_count: usize, report: String) -> Self {
        Self {
            total_revenue: summary.total_revenue(),
            total_allocation: summary.allocation(),
            summary,
            transaction_count,
            report,
        }
    }

    /// Allocation computed over the summed revenue.
    pub fn summary(&self) -> &AllocationResult {
        &self.summary
    }

    /// Number of transactions in the batch, including ones without an amount.
    pub fn transaction_count(&self) -> usize {
        self.transaction_count
    }

    /// Sum of all transaction amounts.
    pub fn total_revenue(&self) -> f64 {
        self.total_revenue
    }

    /// Allocation over the whole batch.
    pub fn total_allocation(&self) -> f64 {
        self.total_allocation
    }

    /// Rendered report for the batch allocation.
    pub fn report(&self) -> &str {
        &self.report
    }
}

/// A single revenue entry. Entries without an amount count as zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Amount in euros, if the entry carries one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
}

impl Transaction {
    /// Transaction with the given amount.
    pub fn new(amount: f64) -> Self {
        Self { amount: Some(amount) }
    }
}

/// Anything that contributes an amount to a batch total.
pub trait RevenueSource {
    /// Amount contributed to the batch total.
    fn amount(&self) -> f64;
}

impl RevenueSource for f64 {
    fn amount(&self) -> f64 {
        *self
    }
}

impl RevenueSource for Transaction {
    fn amount(&self) -> f64 {
        self.amount.unwrap_or(0.0)
    }
}

impl<T: RevenueSource + ?Sized> RevenueSource for &T {
    fn amount(&self) -> f64 {
        (**self).amount()
    }
}

/// Monetary amount displayed with a euro sign and two decimals.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Euros(pub f64);

impl fmt::Display for Euros {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "€{:.2}", self.0)
    }
}
