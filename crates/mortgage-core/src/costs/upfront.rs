//! One-time purchase costs: government transfer and registration fees, bank
//! charges, and service fees for a mortgage-financed purchase. Line items
//! are each rounded once at assembly and the totals run over the rounded
//! items, so `total_upfront_cash = down_payment + total_fees` holds exactly.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::costs::schedule::{fee_schedule, Emirate, FeeSchedule, PropertyReadiness};
use crate::error::MortgageError;
use crate::types::{round_aed, with_metadata, ComputationOutput, Money, Percent, Rate};
use crate::MortgageResult;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Federal VAT rate applied to service fees.
const VAT_RATE: Rate = dec!(0.05);

/// Bank processing fee as a fraction of the loan amount.
const BANK_PROCESSING_RATE: Rate = dec!(0.01);

/// Floor on the bank processing fee.
const BANK_PROCESSING_MIN: Decimal = dec!(5000);

// ---------------------------------------------------------------------------
// Input / Output types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PropertyCostInputs {
    pub property_price: Money,
    /// Financed amount; sized by the caller from price and down payment.
    pub loan_amount: Money,
    pub emirate: Emirate,
    /// Agent commission as a percentage of the price (2 = 2%).
    pub agent_commission_percent: Percent,
    pub include_vat: bool,
    /// Bank valuation fee, passed through as quoted.
    pub valuation_fee: Money,
    pub property_readiness: PropertyReadiness,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpfrontCostResult {
    pub dld_fee: Money,
    pub mortgage_registration: Money,
    pub valuation_fee: Money,
    pub bank_processing_fee: Money,
    pub agent_commission: Money,
    pub trustee_fee: Money,
    pub admin_fee: Money,
    pub oqood_fee: Money,
    pub vat: Money,
    pub total_fees: Money,
    pub total_upfront_cash: Money,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Calculate upfront purchase costs under the built-in fee schedule for the
/// input's (emirate, readiness) pair.
pub fn calculate_upfront_costs(
    inputs: &PropertyCostInputs,
    down_payment: Money,
) -> MortgageResult<ComputationOutput<UpfrontCostResult>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    if matches!(inputs.emirate, Emirate::Sharjah | Emirate::Other) {
        warnings.push(
            "no authoritative fee schedule for this emirate; using the configurable default"
                .into(),
        );
    }

    let schedule = fee_schedule(inputs.emirate, inputs.property_readiness);
    let result = compute_costs(&schedule, inputs, down_payment, &mut warnings)?;

    let elapsed = start.elapsed().as_micros() as u64;
    let assumptions = serde_json::json!({
        "schedule": schedule,
        "down_payment": down_payment.to_string(),
    });
    Ok(with_metadata(
        "UAE Upfront Purchase Costs",
        &assumptions,
        warnings,
        elapsed,
        result,
    ))
}

/// As [`calculate_upfront_costs`], against an explicit fee schedule.
pub fn calculate_upfront_costs_with(
    schedule: &FeeSchedule,
    inputs: &PropertyCostInputs,
    down_payment: Money,
) -> MortgageResult<ComputationOutput<UpfrontCostResult>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let result = compute_costs(schedule, inputs, down_payment, &mut warnings)?;

    let elapsed = start.elapsed().as_micros() as u64;
    let assumptions = serde_json::json!({
        "schedule": schedule,
        "down_payment": down_payment.to_string(),
    });
    Ok(with_metadata(
        "UAE Upfront Purchase Costs (custom schedule)",
        &assumptions,
        warnings,
        elapsed,
        result,
    ))
}

// ---------------------------------------------------------------------------
// Assembly
// ---------------------------------------------------------------------------

fn compute_costs(
    schedule: &FeeSchedule,
    inputs: &PropertyCostInputs,
    down_payment: Money,
    warnings: &mut Vec<String>,
) -> MortgageResult<UpfrontCostResult> {
    validate_inputs(inputs, down_payment)?;

    let down_payment = round_aed(down_payment);

    if inputs.property_price.is_zero() {
        warnings.push("property price is blank; returning zeroed fees".into());
        return Ok(UpfrontCostResult {
            dld_fee: Decimal::ZERO,
            mortgage_registration: Decimal::ZERO,
            valuation_fee: Decimal::ZERO,
            bank_processing_fee: Decimal::ZERO,
            agent_commission: Decimal::ZERO,
            trustee_fee: Decimal::ZERO,
            admin_fee: Decimal::ZERO,
            oqood_fee: Decimal::ZERO,
            vat: Decimal::ZERO,
            total_fees: Decimal::ZERO,
            total_upfront_cash: down_payment,
        });
    }

    let transfer = inputs.property_price * schedule.transfer_fee_rate;
    let (dld_fee, oqood_fee) = if schedule.registers_as_oqood {
        (Decimal::ZERO, transfer)
    } else {
        (transfer, Decimal::ZERO)
    };

    let mortgage_registration = inputs.loan_amount * schedule.mortgage_registration_rate
        + schedule.mortgage_registration_fixed;
    let trustee_fee = schedule.trustee_fee(inputs.property_price);
    let admin_fee = schedule.admin_fee;

    // Cross-cutting fees, independent of emirate.
    let bank_processing_fee = (inputs.loan_amount * BANK_PROCESSING_RATE).max(BANK_PROCESSING_MIN);
    let valuation_fee = inputs.valuation_fee;
    let agent_commission = inputs.property_price * inputs.agent_commission_percent / dec!(100);

    let vat = if inputs.include_vat {
        VAT_RATE * (bank_processing_fee + valuation_fee + agent_commission + trustee_fee)
    } else {
        Decimal::ZERO
    };

    // Single rounding point. Totals are sums of the rounded line items.
    let dld_fee = round_aed(dld_fee);
    let oqood_fee = round_aed(oqood_fee);
    let mortgage_registration = round_aed(mortgage_registration);
    let trustee_fee = round_aed(trustee_fee);
    let admin_fee = round_aed(admin_fee);
    let bank_processing_fee = round_aed(bank_processing_fee);
    let valuation_fee = round_aed(valuation_fee);
    let agent_commission = round_aed(agent_commission);
    let vat = round_aed(vat);

    let total_fees = dld_fee
        + oqood_fee
        + mortgage_registration
        + trustee_fee
        + admin_fee
        + bank_processing_fee
        + valuation_fee
        + agent_commission
        + vat;

    Ok(UpfrontCostResult {
        dld_fee,
        mortgage_registration,
        valuation_fee,
        bank_processing_fee,
        agent_commission,
        trustee_fee,
        admin_fee,
        oqood_fee,
        vat,
        total_fees,
        total_upfront_cash: down_payment + total_fees,
    })
}

fn validate_inputs(inputs: &PropertyCostInputs, down_payment: Money) -> MortgageResult<()> {
    if inputs.property_price < Decimal::ZERO {
        return Err(MortgageError::InvalidInput {
            field: "property_price".into(),
            reason: "Property price cannot be negative".into(),
        });
    }
    if inputs.loan_amount < Decimal::ZERO {
        return Err(MortgageError::InvalidInput {
            field: "loan_amount".into(),
            reason: "Loan amount cannot be negative".into(),
        });
    }
    if inputs.valuation_fee < Decimal::ZERO {
        return Err(MortgageError::InvalidInput {
            field: "valuation_fee".into(),
            reason: "Valuation fee cannot be negative".into(),
        });
    }
    if inputs.agent_commission_percent < Decimal::ZERO
        || inputs.agent_commission_percent > dec!(100)
    {
        return Err(MortgageError::InvalidInput {
            field: "agent_commission_percent".into(),
            reason: "Agent commission must be between 0 and 100 percent".into(),
        });
    }
    if down_payment < Decimal::ZERO {
        return Err(MortgageError::InvalidInput {
            field: "down_payment".into(),
            reason: "Down payment cannot be negative".into(),
        });
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
