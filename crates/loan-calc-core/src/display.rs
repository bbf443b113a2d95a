use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::payment::PaymentBreakdown;
use crate::types::Money;

/// Format a monetary value as `$` plus exactly two decimal places.
///
/// Rounds half away from zero. No thousands separators; negative values
/// keep their sign after the symbol (`$-5.00`).
pub fn format_currency(value: Money) -> String {
    let mut rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    if rounded.is_zero() {
        rounded = Decimal::ZERO;
    }
    format!("${rounded:.2}")
}

/// The four figures of a results card, ready to show.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayedPayment {
    pub monthly_payment: String,
    pub total_amount: String,
    pub total_interest: String,
    pub principal: String,
}

impl DisplayedPayment {
    /// Label/value pairs in card order.
    pub fn lines(&self) -> [(&'static str, &str); 4] {
        [
            ("Monthly Payment", self.monthly_payment.as_str()),
            ("Total Amount", self.total_amount.as_str()),
            ("Total Interest", self.total_interest.as_str()),
            ("Principal Amount", self.principal.as_str()),
        ]
    }
}

impl From<&PaymentBreakdown> for DisplayedPayment {
    fn from(b: &PaymentBreakdown) -> Self {
        Self {
            monthly_payment: format_currency(b.monthly_payment),
            total_amount: format_currency(b.total_paid),
            total_interest: format_currency(b.total_interest),
            principal: format_currency(b.principal),
        }
    }
}
