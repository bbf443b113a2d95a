use napi::Result as NapiResult;
use napi_derive::napi;

use loan_calc_core::display::DisplayedPayment;
use loan_calc_core::payment::{self, LoanRequest};

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

fn parse_request(input_json: &str) -> NapiResult<LoanRequest> {
    serde_json::from_str(input_json).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Payment
// ---------------------------------------------------------------------------

#[napi]
pub fn calculate_loan_payment(input_json: String) -> NapiResult<String> {
    let input = parse_request(&input_json)?;
    let output = payment::calculate_loan_payment(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

/// Payment figures formatted for a results card (`$` and two decimals).
#[napi]
pub fn format_payment(input_json: String) -> NapiResult<String> {
    let input = parse_request(&input_json)?;
    let breakdown = payment::compute(&input).map_err(to_napi_error)?;
    serde_json::to_string(&DisplayedPayment::from(&breakdown)).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Schedule
// ---------------------------------------------------------------------------

#[napi]
pub fn amortization_schedule(input_json: String) -> NapiResult<String> {
    let input = parse_request(&input_json)?;
    let output = loan_calc_core::schedule::build_amortization_schedule(&input)
        .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}
