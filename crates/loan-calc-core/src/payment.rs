use rust_decimal::Decimal;
use rust_decimal::MathematicalOps;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::debug;

use crate::error::LoanCalcError;
use crate::types::*;
use crate::LoanCalcResult;

const MONTHS_PER_YEAR: Decimal = dec!(12);
const PERCENT: Decimal = dec!(100);

/// A single loan to price: principal, annual percentage rate and term.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanRequest {
    pub principal: Money,
    /// Annual rate as a percentage (5.0 = 5%)
    #[serde(alias = "annualRate", alias = "annual_rate")]
    pub annual_rate_percent: Percent,
    #[serde(alias = "termMonths")]
    pub term_months: u32,
}

impl LoanRequest {
    pub fn new(principal: Money, annual_rate_percent: Percent, term_months: u32) -> Self {
        Self {
            principal,
            annual_rate_percent,
            term_months,
        }
    }
}

/// Level monthly payment and the totals derived from it. Values are unrounded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentBreakdown {
    pub monthly_payment: Money,
    pub total_paid: Money,
    pub total_interest: Money,
    pub principal: Money,
}

/// Convert an annual percentage rate into the fractional monthly rate.
pub fn monthly_rate(annual_rate_percent: Percent) -> Rate {
    annual_rate_percent / PERCENT / MONTHS_PER_YEAR
}

/// Compute the level monthly payment for a loan.
///
/// A monthly rate of exactly zero repays the principal in equal instalments;
/// any other rate uses the annuity formula `P·r·x / (x − 1)` with
/// `x = (1 + r)^n`. Totals are derived from the unrounded payment, so
/// `total_paid == monthly_payment * term_months` and
/// `total_interest == total_paid - principal` hold exactly.
pub fn compute(request: &LoanRequest) -> LoanCalcResult<PaymentBreakdown> {
    if request.term_months == 0 {
        return Err(LoanCalcError::InvalidInput {
            field: "term_months".into(),
            reason: "Term must be at least 1 month".into(),
        });
    }

    let term = Decimal::from(request.term_months);
    let rate = monthly_rate(request.annual_rate_percent);

    let monthly_payment = if rate.is_zero() {
        debug!(principal = %request.principal, term_months = request.term_months, "zero rate, straight-line repayment");
        request.principal / term
    } else {
        debug!(principal = %request.principal, monthly_rate = %rate, term_months = request.term_months, "level-payment amortization");
        level_payment(request.principal, rate, request.term_months)?
    };

    let total_paid = monthly_payment
        .checked_mul(term)
        .ok_or_else(|| overflow("total paid"))?;
    let total_interest = total_paid
        .checked_sub(request.principal)
        .ok_or_else(|| overflow("total interest"))?;

    Ok(PaymentBreakdown {
        monthly_payment,
        total_paid,
        total_interest,
        principal: request.principal,
    })
}

/// Compute the payment breakdown wrapped in the standard output envelope.
pub fn calculate_loan_payment(
    request: &LoanRequest,
) -> LoanCalcResult<ComputationOutput<PaymentBreakdown>> {
    let start = Instant::now();
    let warnings = request_warnings(request);

    let breakdown = compute(request)?;
    let rate = monthly_rate(request.annual_rate_percent);

    let methodology = if rate.is_zero() {
        "Straight-line repayment (zero interest)"
    } else {
        "Level-payment amortization (monthly compounding, payments in arrears)"
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        methodology,
        &serde_json::json!({
            "principal": request.principal.to_string(),
            "annual_rate_percent": request.annual_rate_percent.to_string(),
            "monthly_rate": rate.to_string(),
            "term_months": request.term_months,
        }),
        warnings,
        elapsed,
        breakdown,
    ))
}

/// Inputs the formula accepts algebraically but that are unlikely to be meant.
pub(crate) fn request_warnings(request: &LoanRequest) -> Vec<String> {
    let mut warnings = Vec::new();
    if request.principal <= Decimal::ZERO {
        warnings.push(format!(
            "Principal {} is not positive; figures are algebraic only",
            request.principal
        ));
    }
    if request.annual_rate_percent < Decimal::ZERO {
        warnings.push(format!(
            "Negative annual rate {}% applied as-is",
            request.annual_rate_percent
        ));
    }
    warnings
}

fn level_payment(principal: Money, rate: Rate, term_months: u32) -> LoanCalcResult<Money> {
    let interest_only = principal
        .checked_mul(rate)
        .ok_or_else(|| overflow("monthly payment"))?;

    // x / (x - 1) tends to one once x leaves the Decimal range.
    let growth = match (Decimal::ONE + rate).checked_powi(i64::from(term_months)) {
        Some(growth) => growth,
        None => {
            debug!(term_months, "growth factor out of range, using interest-only limit");
            return Ok(interest_only);
        }
    };

    // A rate below the 28-digit resolution can compound to exactly one.
    let denominator = growth - Decimal::ONE;
    if denominator.is_zero() {
        return Err(LoanCalcError::DivisionByZero {
            context: "amortization factor".into(),
        });
    }

    growth
        .checked_div(denominator)
        .and_then(|factor| interest_only.checked_mul(factor))
        .ok_or_else(|| overflow("monthly payment"))
}

fn overflow(context: &str) -> LoanCalcError {
    LoanCalcError::ArithmeticOverflow {
        context: context.into(),
    }
}
