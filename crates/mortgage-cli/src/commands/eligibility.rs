use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use mortgage_core::amortization::emi::LoanTerms;
use mortgage_core::eligibility::{self, EligibilityInput};
use mortgage_core::policy::down_payment::BuyerProfile;

use crate::input;

/// Arguments for the eligibility evaluation
#[derive(Args)]
pub struct EligibilityArgs {
    /// Path to JSON/YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Gross monthly income, in AED
    #[arg(long, alias = "income")]
    pub gross_monthly_income: Option<Decimal>,

    /// Existing monthly obligations, in AED
    #[arg(long, alias = "obligations")]
    pub existing_monthly_obligations: Option<Decimal>,

    /// Proposed loan principal, in AED
    #[arg(long)]
    pub principal: Option<Decimal>,

    /// Annual rate as a percentage (4.5 = 4.5%)
    #[arg(long, alias = "rate")]
    pub annual_rate_percent: Option<Decimal>,

    /// Term in whole years
    #[arg(long, alias = "term")]
    pub term_years: Option<u32>,

    /// Property price, in AED
    #[arg(long)]
    pub property_price: Option<Decimal>,

    /// Buyer is a UAE resident
    #[arg(long)]
    pub resident: bool,

    /// Buyer is purchasing their first property
    #[arg(long)]
    pub first_time_buyer: bool,
}

pub fn run_eligibility(args: EligibilityArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let el_input: EligibilityInput = if let Some(ref path) = args.input {
        input::file::read_structured(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        let property_price = args
            .property_price
            .ok_or("--property-price is required (or provide --input)")?;
        EligibilityInput {
            gross_monthly_income: args
                .gross_monthly_income
                .ok_or("--gross-monthly-income is required (or provide --input)")?,
            existing_monthly_obligations: args
                .existing_monthly_obligations
                .ok_or("--existing-monthly-obligations is required (or provide --input)")?,
            loan: LoanTerms {
                principal: args
                    .principal
                    .ok_or("--principal is required (or provide --input)")?,
                annual_rate_percent: args
                    .annual_rate_percent
                    .ok_or("--annual-rate-percent is required (or provide --input)")?,
                term_years: args
                    .term_years
                    .ok_or("--term-years is required (or provide --input)")?,
            },
            buyer: BuyerProfile {
                is_resident: args.resident,
                is_first_time_buyer: args.first_time_buyer,
                property_price,
            },
        }
    };

    let result = eligibility::evaluate_eligibility(&el_input)?;
    Ok(serde_json::to_value(result)?)
}
