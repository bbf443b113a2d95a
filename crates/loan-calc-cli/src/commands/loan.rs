use clap::Args;
use serde_json::Value;
use tracing::info;

use loan_calc_core::payment::{self, LoanRequest};
use loan_calc_core::schedule;

use crate::input;
use crate::input::form::LoanForm;

/// Arguments shared by every loan command
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct LoanArgs {
    /// Path to JSON request file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Loan amount (e.g. "10000" or "$10,000")
    #[arg(long)]
    pub principal: Option<String>,

    /// Annual interest rate as a percentage (e.g. "5" or "5%")
    #[arg(long, alias = "annual-rate")]
    pub rate: Option<String>,

    /// Term in months
    #[arg(long, alias = "months")]
    pub term: Option<String>,
}

pub fn run_payment(args: LoanArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let request = resolve_request(&args)?;
    let output = payment::calculate_loan_payment(&request)?;
    info!(monthly_payment = %output.result.monthly_payment, "payment calculated");
    Ok(serde_json::to_value(output)?)
}

pub fn run_schedule(args: LoanArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let request = resolve_request(&args)?;
    let output = schedule::build_amortization_schedule(&request)?;
    info!(periods = output.result.periods.len(), "schedule built");
    Ok(serde_json::to_value(output)?)
}

/// Input file first, then explicit flags, then JSON piped on stdin.
fn resolve_request(args: &LoanArgs) -> Result<LoanRequest, Box<dyn std::error::Error>> {
    resolve_request_with(args, input::stdin::read_stdin)
}

fn resolve_request_with<F>(args: &LoanArgs, read_stdin: F) -> Result<LoanRequest, Box<dyn std::error::Error>>
where
    F: FnOnce() -> Result<Option<Value>, Box<dyn std::error::Error>>,
{
    if let Some(ref path) = args.input {
        return input::file::read_json(path);
    }

    let form = LoanForm {
        principal: args.principal.as_deref(),
        rate: args.rate.as_deref(),
        term: args.term.as_deref(),
    };
    if !form.is_empty() {
        return Ok(form.parse()?);
    }

    match read_stdin()? {
        Some(data) => Ok(serde_json::from_value(data)?),
        None => Err(MISSING_INPUT.into()),
    }
}

const MISSING_INPUT: &str = "--principal, --rate and --term are required (or provide --input)";
