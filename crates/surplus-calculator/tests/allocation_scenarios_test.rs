use surplus_calculator::{AllocationCalculator, Transaction, render_at};

use chrono::NaiveDate;

const EPSILON: f64 = 1e-9;

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

#[test]
fn opted_in_ten_thousand() {
    let result = AllocationCalculator::default().compute(10_000.0, true);
    assert!(approx(result.surplus(), 3_500.0));
    assert!(approx(result.allocation(), 665.0));
    assert!(approx(result.remaining(), 9_335.0));
}

#[test]
fn opted_out_ten_thousand() {
    let result = AllocationCalculator::default().compute(10_000.0, false);
    assert_eq!(result.surplus(), 0.0);
    assert_eq!(result.allocation(), 0.0);
    assert_eq!(result.remaining(), 10_000.0);
}

#[test]
fn opted_in_below_threshold() {
    let result = AllocationCalculator::default().compute(5_000.0, true);
    assert_eq!(result.surplus(), 0.0);
    assert_eq!(result.allocation(), 0.0);
    assert_eq!(result.remaining(), 5_000.0);
}

#[test]
fn batch_from_json_transactions() {
    let transactions: Vec<Transaction> =
        serde_json::from_str(r#"[{"amount": 3000}, {"amount": 4000}]"#).unwrap();
    let batch = AllocationCalculator::default().compute_batch(&transactions, true);

    assert_eq!(batch.transaction_count(), 2);
    assert!(approx(batch.total_revenue(), 7_000.0));
    assert!(approx(batch.total_allocation(), (7_000.0 - 6_500.0) * 0.19));
    assert!(approx(batch.total_allocation(), 95.0));
    assert!(batch.report().starts_with("Ethical Allocation Report\n"));
}

#[test]
fn batch_of_plain_amounts_matches_single_compute() {
    let calculator = AllocationCalculator::new(5_000.0);
    let batch = calculator.compute_batch([1_200.0, 3_400.0, 2_150.5], true);
    let single = calculator.compute(1_200.0 + 3_400.0 + 2_150.5, true);
    assert_eq!(batch.summary(), &single);
    assert_eq!(batch.transaction_count(), 3);
}

#[test]
fn empty_batch() {
    let batch = AllocationCalculator::default().compute_batch(Vec::<Transaction>::new(), true);
    let summary = batch.summary();
    assert_eq!(batch.total_revenue(), 0.0);
    assert_eq!(summary.surplus(), 0.0);
    assert_eq!(summary.allocation(), 0.0);
    assert_eq!(summary.remaining(), 0.0);
}

#[test]
fn renders_differ_only_in_timestamp() {
    let result = AllocationCalculator::default().compute(10_000.0, true);
    let morning = NaiveDate::from_ymd_opt(2026, 1, 2).and_then(|d| d.and_hms_opt(8, 0, 0)).unwrap();
    let evening = NaiveDate::from_ymd_opt(2026, 1, 2).and_then(|d| d.and_hms_opt(20, 0, 0)).unwrap();

    let first = render_at(&result, morning);
    let second = render_at(&result, evening);
    assert_ne!(first, second);

    let strip = |report: &str| report.lines().filter(|l| !l.starts_with("Generated:")).collect::<Vec<_>>().join("\n");
    assert_eq!(strip(&first), strip(&second));
}

#[test]
fn result_serializes_to_json_record() {
    let result = AllocationCalculator::default().compute(10_000.0, false);
    let json = serde_json::to_value(result).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "total_revenue": 10000.0,
            "threshold": 6500.0,
            "surplus": 0.0,
            "allocation": 0.0,
            "remaining": 10000.0,
            "opted_in": false
        })
    );
}
