use clap::Args;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::Value;

use mortgage_core::costs::upfront::{self, PropertyCostInputs};
use mortgage_core::costs::{Emirate, PropertyReadiness};
use mortgage_core::policy::down_payment::{self, BuyerProfile, DownPaymentInput};

use crate::input;

/// Arguments for the down-payment policy evaluation
#[derive(Args)]
pub struct DownPaymentArgs {
    /// Path to JSON/YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Property price, in AED
    #[arg(long)]
    pub property_price: Option<Decimal>,

    /// Buyer is a UAE resident
    #[arg(long)]
    pub resident: bool,

    /// Buyer is purchasing their first property
    #[arg(long)]
    pub first_time_buyer: bool,

    /// Percent the buyer chose to put down (floors at the policy minimum)
    #[arg(long)]
    pub chosen_percent: Option<Decimal>,
}

/// Arguments for the upfront-cost calculation
#[derive(Args)]
pub struct UpfrontCostsArgs {
    /// Path to a JSON/YAML file holding {"inputs": ..., "down_payment": ...}
    #[arg(long)]
    pub input: Option<String>,

    /// Property price, in AED
    #[arg(long)]
    pub property_price: Option<Decimal>,

    /// Financed amount, in AED
    #[arg(long)]
    pub loan_amount: Option<Decimal>,

    /// Emirate: dubai, abu-dhabi, sharjah, other
    #[arg(long, value_parser = parse_emirate)]
    pub emirate: Option<Emirate>,

    /// Readiness: ready or off-plan
    #[arg(long, value_parser = parse_readiness)]
    pub readiness: Option<PropertyReadiness>,

    /// Agent commission as a percentage of the price
    #[arg(long, default_value = "0")]
    pub agent_commission_percent: Decimal,

    /// Apply 5% VAT to the service fees
    #[arg(long)]
    pub include_vat: bool,

    /// Bank valuation fee, passed through as quoted
    #[arg(long, default_value = "0")]
    pub valuation_fee: Decimal,

    /// Cash down payment, in AED
    #[arg(long)]
    pub down_payment: Option<Decimal>,
}

/// Combined payload accepted by `upfront-costs --input` and on stdin.
#[derive(Deserialize)]
struct UpfrontCostsRequest {
    inputs: PropertyCostInputs,
    down_payment: Decimal,
}

fn parse_emirate(s: &str) -> Result<Emirate, String> {
    match s {
        "dubai" => Ok(Emirate::Dubai),
        "abu-dhabi" | "abu_dhabi" => Ok(Emirate::AbuDhabi),
        "sharjah" => Ok(Emirate::Sharjah),
        "other" => Ok(Emirate::Other),
        _ => Err(format!(
            "unknown emirate '{}' (expected dubai, abu-dhabi, sharjah or other)",
            s
        )),
    }
}

fn parse_readiness(s: &str) -> Result<PropertyReadiness, String> {
    match s {
        "ready" => Ok(PropertyReadiness::Ready),
        "off-plan" | "off_plan" => Ok(PropertyReadiness::OffPlan),
        _ => Err(format!("unknown readiness '{}' (expected ready or off-plan)", s)),
    }
}

pub fn run_down_payment(args: DownPaymentArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let dp_input: DownPaymentInput = if let Some(ref path) = args.input {
        input::file::read_structured(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        DownPaymentInput {
            buyer: BuyerProfile {
                is_resident: args.resident,
                is_first_time_buyer: args.first_time_buyer,
                property_price: args
                    .property_price
                    .ok_or("--property-price is required (or provide --input)")?,
            },
            chosen_percent: args.chosen_percent,
        }
    };

    let result = down_payment::evaluate_down_payment(&dp_input)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_upfront_costs(args: UpfrontCostsArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let request: UpfrontCostsRequest = if let Some(ref path) = args.input {
        input::file::read_structured(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        UpfrontCostsRequest {
            inputs: PropertyCostInputs {
                property_price: args
                    .property_price
                    .ok_or("--property-price is required (or provide --input)")?,
                loan_amount: args
                    .loan_amount
                    .ok_or("--loan-amount is required (or provide --input)")?,
                emirate: args
                    .emirate
                    .ok_or("--emirate is required (or provide --input)")?,
                agent_commission_percent: args.agent_commission_percent,
                include_vat: args.include_vat,
                valuation_fee: args.valuation_fee,
                property_readiness: args
                    .readiness
                    .ok_or("--readiness is required (or provide --input)")?,
            },
            down_payment: args
                .down_payment
                .ok_or("--down-payment is required (or provide --input)")?,
        }
    };

    let result = upfront::calculate_upfront_costs(&request.inputs, request.down_payment)?;
    Ok(serde_json::to_value(result)?)
}
