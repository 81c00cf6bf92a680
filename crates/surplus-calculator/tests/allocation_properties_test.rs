//! Property tests for the allocation invariants.

use proptest::prelude::*;
use surplus_calculator::{ALLOCATION_RATE, AllocationCalculator};

// Relative tolerance; revenues go up to a billion.
fn close(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-9 * a.abs().max(b.abs()).max(1.0)
}

fn arb_revenue() -> impl Strategy<Value = f64> {
    0.0f64..1_000_000_000.0
}

fn arb_threshold() -> impl Strategy<Value = f64> {
    0.0f64..100_000.0
}

proptest! {
    #[test]
    fn opted_out_never_allocates(revenue in arb_revenue(), threshold in arb_threshold()) {
        let result = AllocationCalculator::new(threshold).compute(revenue, false);
        prop_assert_eq!(result.allocation(), 0.0);
        prop_assert_eq!(result.surplus(), 0.0);
        prop_assert_eq!(result.remaining(), revenue);
    }

    #[test]
    fn above_threshold_allocates_rate_of_surplus(threshold in arb_threshold(), excess in 0.0f64..1_000_000.0) {
        let revenue = threshold + excess;
        let result = AllocationCalculator::new(threshold).compute(revenue, true);
        prop_assert!(close(result.allocation(), (revenue - threshold) * ALLOCATION_RATE));
    }

    #[test]
    fn below_threshold_allocates_nothing(threshold in 1.0f64..100_000.0, fraction in 0.0f64..1.0) {
        let revenue = threshold * fraction;
        prop_assume!(revenue < threshold);
        let result = AllocationCalculator::new(threshold).compute(revenue, true);
        prop_assert_eq!(result.surplus(), 0.0);
        prop_assert_eq!(result.allocation(), 0.0);
    }

    #[test]
    fn remaining_plus_allocation_is_revenue(
        revenue in -1_000_000.0f64..1_000_000_000.0,
        threshold in arb_threshold(),
        opted_in in any::<bool>(),
    ) {
        let result = AllocationCalculator::new(threshold).compute(revenue, opted_in);
        prop_assert!(close(result.remaining() + result.allocation(), revenue));
        prop_assert!(result.surplus() >= 0.0);
    }

    #[test]
    fn batch_equals_compute_on_sum(
        amounts in prop::collection::vec(0.0f64..50_000.0, 0..20),
        opted_in in any::<bool>(),
    ) {
        let calculator = AllocationCalculator::default();
        let batch = calculator.compute_batch(&amounts, opted_in);
        let total: f64 = amounts.iter().sum();
        prop_assert_eq!(batch.transaction_count(), amounts.len());
        prop_assert!(close(batch.total_revenue(), total));
        prop_assert!(close(batch.total_allocation(), calculator.compute(total, opted_in).allocation()));
    }
}
