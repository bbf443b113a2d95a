use colored::Colorize;
use loan_calc_core::display::DisplayedPayment;
use loan_calc_core::payment::PaymentBreakdown;
use serde_json::Value;

/// Print the four results-card figures as `$` currency strings.
pub fn print_summary(value: &Value) {
    match displayed(value) {
        Some(shown) => {
            for (label, amount) in shown.lines() {
                println!("{:<18}{}", format!("{label}:"), amount.bold());
            }
        }
        None => eprintln!("summary output is only available for loan results"),
    }
}

/// Locate the payment breakdown in an envelope, whether it is the result
/// itself or nested under `breakdown` (schedules).
pub(crate) fn displayed(value: &Value) -> Option<DisplayedPayment> {
    let result = value.get("result")?;
    let breakdown = result.get("breakdown").unwrap_or(result);
    let breakdown: PaymentBreakdown = serde_json::from_value(breakdown.clone()).ok()?;
    Some(DisplayedPayment::from(&breakdown))
}
