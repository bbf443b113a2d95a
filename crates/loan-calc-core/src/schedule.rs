//! Month-by-month amortization schedule.
//!
//! Each level payment is split into the interest accrued on the opening
//! balance and the principal it retires. The final month repays whatever
//! balance remains so the loan closes at exactly zero.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::debug;

use crate::error::LoanCalcError;
use crate::payment::{compute, monthly_rate, request_warnings, LoanRequest, PaymentBreakdown};
use crate::types::*;
use crate::LoanCalcResult;

/// Longest schedule that will be built: 100 years of monthly periods.
pub const MAX_SCHEDULE_MONTHS: u32 = 1200;

/// Final-period adjustments larger than this are reported.
const RESIDUAL_TOLERANCE: Money = dec!(0.01);

/// A single month in the schedule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmortizationPeriod {
    pub month: u32,
    pub opening_balance: Money,
    pub payment: Money,
    pub interest: Money,
    pub principal_portion: Money,
    pub closing_balance: Money,
    pub cumulative_interest: Money,
    pub cumulative_principal: Money,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AmortizationSchedule {
    pub breakdown: PaymentBreakdown,
    pub monthly_rate: Rate,
    pub periods: Vec<AmortizationPeriod>,
    pub total_interest: Money,
}

/// Build the full schedule for a loan.
pub fn build_amortization_schedule(
    request: &LoanRequest,
) -> LoanCalcResult<ComputationOutput<AmortizationSchedule>> {
    let start = Instant::now();

    if request.term_months > MAX_SCHEDULE_MONTHS {
        return Err(LoanCalcError::InvalidInput {
            field: "term_months".into(),
            reason: format!("Schedules are limited to {MAX_SCHEDULE_MONTHS} months"),
        });
    }

    let mut warnings = request_warnings(request);

    let breakdown = compute(request)?;
    let rate = monthly_rate(request.annual_rate_percent);
    let payment = breakdown.monthly_payment;

    let mut periods = Vec::with_capacity(request.term_months as usize);
    let mut balance = request.principal;
    let mut cumulative_interest = Decimal::ZERO;
    let mut cumulative_principal = Decimal::ZERO;

    for month in 1..=request.term_months {
        let opening = balance;
        let interest = opening * rate;

        let (period_payment, principal_portion) = if month == request.term_months {
            // Final month: retire the remaining balance
            let adjustment = interest + opening - payment;
            if adjustment.abs() > RESIDUAL_TOLERANCE {
                warnings.push(format!(
                    "Month {month}: final payment adjusted by {:.2} to close the balance",
                    adjustment.round_dp(2)
                ));
            }
            (interest + opening, opening)
        } else {
            (payment, payment - interest)
        };

        balance = opening - principal_portion;
        cumulative_interest += interest;
        cumulative_principal += principal_portion;

        periods.push(AmortizationPeriod {
            month,
            opening_balance: opening,
            payment: period_payment,
            interest,
            principal_portion,
            closing_balance: balance,
            cumulative_interest,
            cumulative_principal,
        });
    }

    debug!(
        periods = periods.len(),
        total_interest = %cumulative_interest,
        "amortization schedule built"
    );

    let output = AmortizationSchedule {
        breakdown,
        monthly_rate: rate,
        periods,
        total_interest: cumulative_interest,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Amortization Schedule (level payment, interest on opening balance)",
        &serde_json::json!({
            "principal": request.principal.to_string(),
            "annual_rate_percent": request.annual_rate_percent.to_string(),
            "monthly_rate": rate.to_string(),
            "term_months": request.term_months,
        }),
        warnings,
        elapsed,
        output,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_zero_rate_schedule() {
        let result = build_amortization_schedule(&LoanRequest::new(dec!(1000), dec!(0), 10)).unwrap();
        let sched = &result.result;
        assert_eq!(sched.periods.len(), 10);

        for (i, p) in sched.periods.iter().enumerate() {
            assert_eq!(p.month, i as u32 + 1);
            assert_eq!(p.interest, Decimal::ZERO);
            assert_eq!(p.payment, dec!(100));
            assert_eq!(p.principal_portion, dec!(100));
        }
        assert_eq!(sched.periods[4].closing_balance, dec!(500));
        assert_eq!(sched.total_interest, Decimal::ZERO);
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_first_month_split() {
        let result = build_amortization_schedule(&LoanRequest::new(dec!(10000), dec!(5), 12)).unwrap();
        let first = &result.result.periods[0];

        // 10000 * 0.05 / 12 = 41.67 interest, remainder of 856.07 retires principal
        assert_eq!(first.opening_balance, dec!(10000));
        assert_eq!(first.interest.round_dp(2), dec!(41.67));
        assert_eq!(first.principal_portion.round_dp(2), dec!(814.41));
    }

    #[test]
    fn test_schedule_closes_at_zero() {
        let req = LoanRequest::new(dec!(250000), dec!(6.5), 360);
        let result = build_amortization_schedule(&req).unwrap();
        let sched = &result.result;

        assert_eq!(sched.periods.len(), 360);
        let last = sched.periods.last().unwrap();
        assert_eq!(last.closing_balance, Decimal::ZERO);
        assert!((last.cumulative_principal - req.principal).abs() < dec!(0.000001));
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_total_interest_matches_breakdown() {
        let result = build_amortization_schedule(&LoanRequest::new(dec!(10000), dec!(5), 12)).unwrap();
        let sched = &result.result;
        let diff = (sched.total_interest - sched.breakdown.total_interest).abs();
        assert!(diff < dec!(0.000001), "diff was {diff}");
    }

    #[test]
    fn test_interest_declines_each_month() {
        let result = build_amortization_schedule(&LoanRequest::new(dec!(5000), dec!(9), 24)).unwrap();
        let periods = &result.result.periods;
        for pair in periods.windows(2) {
            assert!(pair[1].interest < pair[0].interest);
        }
    }

    #[test]
    fn test_zero_term_error() {
        let err = build_amortization_schedule(&LoanRequest::new(dec!(1000), dec!(5), 0)).unwrap_err();
        assert!(matches!(err, LoanCalcError::InvalidInput { .. }));
    }

    #[test]
    fn test_term_above_limit_rejected() {
        let err = build_amortization_schedule(&LoanRequest::new(dec!(1000), dec!(0), u32::MAX))
            .unwrap_err();
        match err {
            LoanCalcError::InvalidInput { field, .. } => assert_eq!(field, "term_months"),
            other => panic!("Expected InvalidInput, got {other:?}"),
        }
    }

    #[test]
    fn test_term_at_limit_accepted() {
        let req = LoanRequest::new(dec!(1000), dec!(3), MAX_SCHEDULE_MONTHS);
        let result = build_amortization_schedule(&req).unwrap();
        assert_eq!(result.result.periods.len(), MAX_SCHEDULE_MONTHS as usize);
    }

    #[test]
    fn test_unretirable_balance_reported_in_final_month() {
        // At 100% a year the growth factor leaves the Decimal range, so the
        // payment is interest-only and the last month repays the principal.
        let result = build_amortization_schedule(&LoanRequest::new(dec!(1000), dec!(100), 1200)).unwrap();
        let last = result.result.periods.last().unwrap();

        assert_eq!(last.closing_balance, Decimal::ZERO);
        assert_eq!(last.principal_portion, dec!(1000));
        assert_eq!(result.warnings.len(), 1);
        assert!(result.warnings[0].starts_with("Month 1200: final payment adjusted by 1000.00"));
    }
}
