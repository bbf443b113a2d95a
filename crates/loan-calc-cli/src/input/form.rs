//! Field-by-field parsing of raw form values into a loan request.

use loan_calc_core::payment::LoanRequest;
use rust_decimal::Decimal;
use std::str::FromStr;

/// Raw, unparsed field values as typed by the user.
#[derive(Debug, Default, Clone)]
pub struct LoanForm<'a> {
    pub principal: Option<&'a str>,
    pub rate: Option<&'a str>,
    pub term: Option<&'a str>,
}

impl LoanForm<'_> {
    pub fn is_empty(&self) -> bool {
        self.principal.is_none() && self.rate.is_none() && self.term.is_none()
    }

    /// Parse every field, naming the offending flag on failure.
    pub fn parse(&self) -> Result<LoanRequest, String> {
        let principal = parse_amount("--principal", required("--principal", self.principal)?)?;
        let rate = parse_rate("--rate", required("--rate", self.rate)?)?;
        let term = parse_term("--term", required("--term", self.term)?)?;
        Ok(LoanRequest::new(principal, rate, term))
    }
}

fn required<'a>(flag: &str, value: Option<&'a str>) -> Result<&'a str, String> {
    value.ok_or_else(|| format!("{flag} is required (or provide --input)"))
}

/// Amounts may carry a leading `$` and `,` thousands separators.
fn parse_amount(flag: &str, raw: &str) -> Result<Decimal, String> {
    let cleaned: String = raw
        .trim()
        .trim_start_matches('$')
        .chars()
        .filter(|c| *c != ',')
        .collect();
    Decimal::from_str(&cleaned).map_err(|_| format!("{flag}: '{raw}' is not a number"))
}

/// Rates are percentages; a trailing `%` is accepted.
fn parse_rate(flag: &str, raw: &str) -> Result<Decimal, String> {
    let cleaned = raw.trim().trim_end_matches('%').trim_end();
    Decimal::from_str(cleaned).map_err(|_| format!("{flag}: '{raw}' is not a number"))
}

fn parse_term(flag: &str, raw: &str) -> Result<u32, String> {
    raw.trim()
        .parse::<u32>()
        .map_err(|_| format!("{flag}: '{raw}' is not a whole number of months"))
}
