use clap::Args;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::Value;

use mortgage_core::amortization::emi::{self, LoanTerms};
use mortgage_core::amortization::prepayment::{self, PrepaymentScenario};

use crate::input;

/// Arguments for the EMI calculation
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct EmiArgs {
    /// Path to JSON/YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Amount borrowed, in AED
    #[arg(long)]
    pub principal: Option<Decimal>,

    /// Annual rate as a percentage (4.5 = 4.5%)
    #[arg(long, alias = "rate")]
    pub annual_rate_percent: Option<Decimal>,

    /// Term in whole years
    #[arg(long, alias = "term")]
    pub term_years: Option<u32>,
}

/// Arguments for the schedule expansion
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct ScheduleArgs {
    /// Path to JSON/YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Amount borrowed, in AED
    #[arg(long)]
    pub principal: Option<Decimal>,

    /// Annual rate as a percentage (4.5 = 4.5%)
    #[arg(long, alias = "rate")]
    pub annual_rate_percent: Option<Decimal>,

    /// Term in whole years
    #[arg(long, alias = "term")]
    pub term_years: Option<u32>,
}

/// Arguments for the prepayment simulation
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct PrepaymentArgs {
    /// Path to a JSON/YAML file holding {"loan": ..., "scenario": ...}
    #[arg(long)]
    pub input: Option<String>,

    /// Amount borrowed, in AED
    #[arg(long)]
    pub principal: Option<Decimal>,

    /// Annual rate as a percentage (4.5 = 4.5%)
    #[arg(long, alias = "rate")]
    pub annual_rate_percent: Option<Decimal>,

    /// Term in whole years
    #[arg(long, alias = "term")]
    pub term_years: Option<u32>,

    /// One-off extra principal payment
    #[arg(long, default_value = "0")]
    pub lump_sum: Decimal,

    /// Month (1-based) in which the lump sum lands
    #[arg(long, default_value = "0")]
    pub lump_sum_month: u32,

    /// Recurring extra amount on top of every installment
    #[arg(long, default_value = "0")]
    pub extra_monthly: Decimal,
}

/// Combined payload accepted by `prepayment --input` and on stdin.
#[derive(Deserialize)]
struct PrepaymentRequest {
    loan: LoanTerms,
    scenario: PrepaymentScenario,
}

fn loan_from_flags(
    principal: Option<Decimal>,
    annual_rate_percent: Option<Decimal>,
    term_years: Option<u32>,
) -> Result<LoanTerms, Box<dyn std::error::Error>> {
    Ok(LoanTerms {
        principal: principal.ok_or("--principal is required (or provide --input)")?,
        annual_rate_percent: annual_rate_percent
            .ok_or("--annual-rate-percent is required (or provide --input)")?,
        term_years: term_years.ok_or("--term-years is required (or provide --input)")?,
    })
}

pub fn run_emi(args: EmiArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let loan: LoanTerms = if let Some(ref path) = args.input {
        input::file::read_structured(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        loan_from_flags(args.principal, args.annual_rate_percent, args.term_years)?
    };

    let result = emi::calculate_amortization(&loan)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_schedule(args: ScheduleArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let loan: LoanTerms = if let Some(ref path) = args.input {
        input::file::read_structured(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        loan_from_flags(args.principal, args.annual_rate_percent, args.term_years)?
    };

    let result = emi::expand_schedule(&loan)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_prepayment(args: PrepaymentArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let request: PrepaymentRequest = if let Some(ref path) = args.input {
        input::file::read_structured(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        PrepaymentRequest {
            loan: loan_from_flags(args.principal, args.annual_rate_percent, args.term_years)?,
            scenario: PrepaymentScenario {
                lump_sum_amount: args.lump_sum,
                lump_sum_after_month: args.lump_sum_month,
                extra_monthly_payment: args.extra_monthly,
            },
        }
    };

    let result = prepayment::simulate_prepayment(&request.loan, &request.scenario)?;
    Ok(serde_json::to_value(result)?)
}
