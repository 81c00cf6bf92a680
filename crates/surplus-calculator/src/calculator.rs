use crate::error::{AllocationError, CalculatorResult};
use crate::report;
use crate::{ALLOCATION_RATE, DEFAULT_THRESHOLD};
use surplus_types::{AllocationResult, BatchSummary, RevenueSource};
use tracing::{debug, warn};

/// Computes the opt-in allocation on revenue above a fixed threshold.
///
/// The calculator holds no state beyond its threshold and can be shared
/// between threads freely.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AllocationCalculator {
    threshold: f64,
}

impl Default for AllocationCalculator {
    fn default() -> Self {
        Self::new(DEFAULT_THRESHOLD)
    }
}

impl AllocationCalculator {
    /// Creates a calculator with the given threshold. Any value is accepted.
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    /// Creates a calculator, rejecting thresholds that are negative or not finite.
    pub fn try_new(threshold: f64) -> CalculatorResult<Self> {
        if !threshold.is_finite() || threshold < 0.0 {
            return Err(AllocationError::InvalidThreshold { threshold });
        }
        Ok(Self::new(threshold))
    }

    /// Revenue below which nothing is allocated.
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Share of the surplus that is allocated.
    pub fn rate(&self) -> f64 {
        ALLOCATION_RATE
    }

    /// Calculates the allocation for `total_revenue`.
    ///
    /// Opted-out users keep all of their revenue. For opted-in users the surplus
    /// over the threshold (never below zero) is multiplied by the allocation rate.
    /// Negative revenue is not special-cased.
    pub fn compute(&self, total_revenue: f64, opted_in: bool) -> AllocationResult {
        let result = if opted_in {
            AllocationResult::opted_in(total_revenue, self.threshold, ALLOCATION_RATE)
        } else {
            AllocationResult::opted_out(total_revenue, self.threshold)
        };

        debug!(
            total_revenue,
            threshold = self.threshold,
            opted_in,
            surplus = result.surplus(),
            allocation = result.allocation(),
            "computed allocation"
        );
        result
    }

    /// Like [`compute`](Self::compute), but rejects negative or non-finite revenue.
    pub fn try_compute(&self, total_revenue: f64, opted_in: bool) -> CalculatorResult<AllocationResult> {
        validate_revenue(total_revenue)?;
        Ok(self.compute(total_revenue, opted_in))
    }

    /// Renders `result` as a plain-text report stamped with the current local time.
    pub fn render(&self, result: &AllocationResult) -> String {
        report::render_report(result)
    }

    /// Sums the amounts of `items` and computes one allocation over the total.
    ///
    /// Items without an amount contribute zero but are still counted.
    pub fn compute_batch<I>(&self, items: I, opted_in: bool) -> BatchSummary
    where
        I: IntoIterator,
        I::Item: RevenueSource,
    {
        let (transaction_count, total_revenue) = sum_amounts(items);
        self.summarize(transaction_count, total_revenue, opted_in)
    }

    /// Like [`compute_batch`](Self::compute_batch), but rejects a batch whose total
    /// is negative or not finite. Individual negative amounts (refunds) are allowed.
    pub fn try_compute_batch<I>(&self, items: I, opted_in: bool) -> CalculatorResult<BatchSummary>
    where
        I: IntoIterator,
        I::Item: RevenueSource,
    {
        let (transaction_count, total_revenue) = sum_amounts(items);
        validate_revenue(total_revenue)?;
        Ok(self.summarize(transaction_count, total_revenue, opted_in))
    }

    fn summarize(&self, transaction_count: usize, total_revenue: f64, opted_in: bool) -> BatchSummary {
        debug!(transaction_count, total_revenue, "summing batch");
        let summary = self.compute(total_revenue, opted_in);
        let report = self.render(&summary);
        BatchSummary::new(summary, transaction_count, report)
    }
}

fn sum_amounts<I>(items: I) -> (usize, f64)
where
    I: IntoIterator,
    I::Item: RevenueSource,
{
    items
        .into_iter()
        .fold((0, 0.0), |(count, total), item| (count + 1, total + item.amount()))
}

fn validate_revenue(revenue: f64) -> CalculatorResult<()> {
    if !revenue.is_finite() {
        warn!(revenue, "rejecting non-finite revenue");
        return Err(AllocationError::NonFiniteRevenue { revenue });
    }
    if revenue < 0.0 {
        warn!(revenue, "rejecting negative revenue");
        return Err(AllocationError::NegativeRevenue { revenue });
    }
    Ok(())
}
