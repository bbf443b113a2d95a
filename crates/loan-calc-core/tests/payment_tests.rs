use loan_calc_core::display::{format_currency, DisplayedPayment};
use loan_calc_core::payment::{self, LoanRequest, PaymentBreakdown};
use loan_calc_core::LoanCalcError;
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

// ===========================================================================
// Known-answer scenarios
// ===========================================================================

#[test]
fn test_interest_free_loan() {
    let out = payment::compute(&LoanRequest::new(dec!(1000), dec!(0), 10)).unwrap();
    assert_eq!(
        out,
        PaymentBreakdown {
            monthly_payment: dec!(100),
            total_paid: dec!(1000),
            total_interest: dec!(0),
            principal: dec!(1000),
        }
    );
}

#[test]
fn test_five_percent_over_twelve_months() {
    let out = payment::compute(&LoanRequest::new(dec!(10000), dec!(5), 12)).unwrap();
    // r = 0.05 / 12, x = (1 + r)^12 ≈ 1.051162
    // M = 10000 * r * x / (x - 1) ≈ 856.07
    assert_eq!(format_currency(out.monthly_payment), "$856.07");
    assert_eq!(format_currency(out.total_paid), "$10272.90");
    assert_eq!(format_currency(out.total_interest), "$272.90");
    assert_eq!(out.principal, dec!(10000));
}

#[test]
fn test_nothing_borrowed() {
    let out = payment::compute(&LoanRequest::new(dec!(0), dec!(5), 12)).unwrap();
    assert_eq!(out.monthly_payment, Decimal::ZERO);
    assert_eq!(out.total_interest, Decimal::ZERO);
    assert_eq!(format_currency(out.monthly_payment), "$0.00");
}

#[test]
fn test_car_loan_displayed() {
    // 25k at 4.9% over 60 months ≈ 470.64 per month
    let out = payment::compute(&LoanRequest::new(dec!(25000), dec!(4.9), 60)).unwrap();
    let shown = DisplayedPayment::from(&out);
    assert_eq!(shown.monthly_payment, "$470.64");
    assert_eq!(shown.principal, "$25000.00");
}

// ===========================================================================
// Contract properties on fixed inputs
// ===========================================================================

#[test]
fn test_repeat_calls_are_identical() {
    let req = LoanRequest::new(dec!(98765.43), dec!(3.875), 180);
    let a = payment::compute(&req).unwrap();
    let b = payment::compute(&req).unwrap();
    assert_eq!(a, b);
    assert_eq!(a.monthly_payment.serialize(), b.monthly_payment.serialize());
}

#[test]
fn test_interest_raises_payment_above_straight_line() {
    let req = LoanRequest::new(dec!(5000), dec!(0.5), 24);
    let out = payment::compute(&req).unwrap();
    assert!(out.monthly_payment > dec!(5000) / dec!(24));
}

#[test]
fn test_zero_term_is_rejected() {
    let err = payment::compute(&LoanRequest::new(dec!(1000), dec!(0), 0)).unwrap_err();
    assert!(matches!(err, LoanCalcError::InvalidInput { .. }));
    assert!(err.to_string().contains("term_months"));
}

#[test]
fn test_envelope_carries_breakdown() {
    let req = LoanRequest::new(dec!(10000), dec!(5), 12);
    let out = payment::calculate_loan_payment(&req).unwrap();
    assert_eq!(out.result, payment::compute(&req).unwrap());
    assert_eq!(out.assumptions["term_months"], 12);
    assert_eq!(out.metadata.precision, "rust_decimal_128bit");
}

#[test]
fn test_envelope_serializes_decimals_as_strings() {
    let out = payment::calculate_loan_payment(&LoanRequest::new(dec!(1000), dec!(0), 10)).unwrap();
    let value = serde_json::to_value(&out).unwrap();
    let payment: Decimal = value["result"]["monthly_payment"]
        .as_str()
        .unwrap()
        .parse()
        .unwrap();
    assert_eq!(payment, dec!(100));
    assert_eq!(value["result"]["principal"], "1000");
}
