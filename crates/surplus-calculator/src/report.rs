//! Plain-text allocation report.
//!
//! The layout is fixed and not localized. Monetary values always carry a euro
//! sign and two decimals. Reports for opted-in users end with the time they
//! were generated, so two renders of the same result may differ on that line.

use crate::ALLOCATION_RATE;
use chrono::{Local, NaiveDateTime};
use surplus_types::{AllocationResult, Euros};

const TITLE: &str = "Ethical Allocation Report";
const UNDERLINE: &str = "========================";
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Renders `result`, stamping it with the current local time.
pub fn render_report(result: &AllocationResult) -> String {
    render_at(result, Local::now().naive_local())
}

/// Renders `result` with an explicit generation time.
pub fn render_at(result: &AllocationResult, generated_at: NaiveDateTime) -> String {
    if !result.is_opted_in() {
        return format!(
            "{TITLE}\n{UNDERLINE}\nTotal Revenue: {}\nStatus: Opted out\nRemaining: {}\n",
            Euros(result.total_revenue()),
            Euros(result.remaining()),
        );
    }

    format!(
        "{TITLE}\n{UNDERLINE}\n\
         Total Revenue: {}\n\
         Threshold: {}\n\
         Surplus: {}\n\
         Allocation ({}): {}\n\
         Remaining: {}\n\
         \nGenerated: {}\n",
        Euros(result.total_revenue()),
        Euros(result.threshold()),
        Euros(result.surplus()),
        percent_label(ALLOCATION_RATE),
        Euros(result.allocation()),
        Euros(result.remaining()),
        generated_at.format(TIMESTAMP_FORMAT),
    )
}

// 0.19 -> "19%", 0.125 -> "12.5%"
fn percent_label(rate: f64) -> String {
    let formatted = format!("{:.2}", rate * 100.0);
    let trimmed = formatted.trim_end_matches('0').trim_end_matches('.');
    format!("{trimmed}%")
}
