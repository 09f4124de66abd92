//! Applicant eligibility: debt-burden and loan-to-value ratios against the
//! policy ceilings, the estimated installment for the proposed loan, and the
//! largest loan the applicant's income can sustain.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::amortization::emi::{principal_for_installment, raw_installment, validate_terms, LoanTerms};
use crate::error::MortgageError;
use crate::policy::down_payment::{min_percent, BuyerProfile};
use crate::types::{round_aed, with_metadata, ComputationOutput, Money, Percent};
use crate::MortgageResult;

/// Debt-burden ceiling: obligations plus the installment may not exceed
/// half of gross monthly income.
pub const MAX_DBR_PERCENT: Percent = dec!(50);

// ---------------------------------------------------------------------------
// Input / Output types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EligibilityInput {
    pub gross_monthly_income: Money,
    pub existing_monthly_obligations: Money,
    /// The loan the applicant proposes to take.
    pub loan: LoanTerms,
    pub buyer: BuyerProfile,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EligibilityResult {
    pub dbr_percent: Percent,
    pub max_dbr_percent: Percent,
    pub ltv_percent: Percent,
    pub max_ltv_percent: Percent,
    /// Installment for the proposed loan, not the ceiling.
    pub estimated_emi: Money,
    /// Largest principal sustainable at the debt-burden ceiling.
    pub eligible_loan_amount: Money,
    pub is_eligible: bool,
}

impl EligibilityResult {
    fn ineligible_zeroed() -> Self {
        EligibilityResult {
            dbr_percent: Decimal::ZERO,
            max_dbr_percent: MAX_DBR_PERCENT,
            ltv_percent: Decimal::ZERO,
            max_ltv_percent: Decimal::ZERO,
            estimated_emi: Decimal::ZERO,
            eligible_loan_amount: Decimal::ZERO,
            is_eligible: false,
        }
    }
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Evaluate the applicant against the debt-burden and loan-to-value ceilings.
pub fn evaluate_eligibility(
    input: &EligibilityInput,
) -> MortgageResult<ComputationOutput<EligibilityResult>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    validate_terms(&input.loan)?;
    if input.existing_monthly_obligations < Decimal::ZERO {
        return Err(MortgageError::InvalidInput {
            field: "existing_monthly_obligations".into(),
            reason: "Obligations cannot be negative".into(),
        });
    }
    if input.gross_monthly_income < Decimal::ZERO {
        return Err(MortgageError::InvalidInput {
            field: "gross_monthly_income".into(),
            reason: "Income cannot be negative".into(),
        });
    }

    let result = if input.gross_monthly_income.is_zero()
        || input.buyer.property_price <= Decimal::ZERO
        || input.loan.is_interim()
    {
        warnings.push("income, price or loan is blank; applicant marked ineligible".into());
        EligibilityResult::ineligible_zeroed()
    } else {
        compute(input)?
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Mortgage Eligibility (DBR + LTV)",
        input,
        warnings,
        elapsed,
        result,
    ))
}

// ---------------------------------------------------------------------------
// Evaluation
// ---------------------------------------------------------------------------

fn compute(input: &EligibilityInput) -> MortgageResult<EligibilityResult> {
    let installment = raw_installment(&input.loan)?;

    let dbr = (input.existing_monthly_obligations + installment) / input.gross_monthly_income
        * dec!(100);
    let ltv = input.loan.principal / input.buyer.property_price * dec!(100);

    let min_down = min_percent(&input.buyer);
    let max_ltv = dec!(100) - min_down;

    // Largest installment the income sustains at the DBR ceiling, inverted
    // through the annuity formula to a principal.
    let affordable_installment = input.gross_monthly_income * MAX_DBR_PERCENT / dec!(100)
        - input.existing_monthly_obligations;
    let eligible_loan = if affordable_installment <= Decimal::ZERO {
        Decimal::ZERO
    } else {
        principal_for_installment(
            affordable_installment,
            input.loan.monthly_rate(),
            input.loan.tenure_months(),
        )?
    };

    Ok(EligibilityResult {
        dbr_percent: dbr.round_dp(2),
        max_dbr_percent: MAX_DBR_PERCENT,
        ltv_percent: ltv.round_dp(2),
        max_ltv_percent: max_ltv,
        estimated_emi: round_aed(installment),
        eligible_loan_amount: round_aed(eligible_loan),
        is_eligible: dbr <= MAX_DBR_PERCENT && ltv <= max_ltv,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
