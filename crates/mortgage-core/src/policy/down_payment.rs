//! Minimum down-payment policy: the jurisdiction-mandated floor per buyer
//! class and property price band. The tier table is business data, not law;
//! every operation takes an explicit policy through its `_with` variant.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::MortgageError;
use crate::types::{round_aed, with_metadata, ComputationOutput, Money, Percent};
use crate::MortgageResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// The buyer attributes the policy branches on.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuyerProfile {
    pub is_resident: bool,
    pub is_first_time_buyer: bool,
    pub property_price: Money,
}

/// Minimum percents for one buyer class, split at the high-value threshold.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PolicyTier {
    pub standard_percent: Percent,
    pub high_value_percent: Percent,
}

/// The swappable tier table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DownPaymentPolicy {
    pub resident_first_time: PolicyTier,
    pub resident_repeat: PolicyTier,
    pub non_resident: PolicyTier,
    /// Price above which the high-value tier applies.
    pub high_value_threshold: Money,
}

impl Default for DownPaymentPolicy {
    fn default() -> Self {
        DownPaymentPolicy {
            resident_first_time: PolicyTier {
                standard_percent: dec!(20),
                high_value_percent: dec!(30),
            },
            resident_repeat: PolicyTier {
                standard_percent: dec!(25),
                high_value_percent: dec!(35),
            },
            non_resident: PolicyTier {
                standard_percent: dec!(40),
                high_value_percent: dec!(40),
            },
            high_value_threshold: dec!(5_000_000),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DownPaymentInput {
    pub buyer: BuyerProfile,
    /// Percent the buyer chose to put down, if any. The effective percent
    /// never falls below the policy minimum.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chosen_percent: Option<Percent>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DownPaymentResult {
    pub min_percent: Percent,
    pub effective_percent: Percent,
    pub down_payment_amount: Money,
    pub max_ltv_percent: Percent,
}

// ---------------------------------------------------------------------------
// Policy lookup
// ---------------------------------------------------------------------------

/// Minimum down-payment percent under the default policy table.
pub fn min_percent(buyer: &BuyerProfile) -> Percent {
    min_percent_with(&DownPaymentPolicy::default(), buyer)
}

/// Minimum down-payment percent under an explicit policy table.
pub fn min_percent_with(policy: &DownPaymentPolicy, buyer: &BuyerProfile) -> Percent {
    let tier = match (buyer.is_resident, buyer.is_first_time_buyer) {
        (true, true) => &policy.resident_first_time,
        (true, false) => &policy.resident_repeat,
        (false, _) => &policy.non_resident,
    };
    if buyer.property_price > policy.high_value_threshold {
        tier.high_value_percent
    } else {
        tier.standard_percent
    }
}

/// The buyer may always put down more than the mandated minimum, never less.
pub fn effective_percent(chosen: Percent, buyer: &BuyerProfile) -> Percent {
    chosen.max(min_percent(buyer))
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Evaluate the minimum and effective down payment for a buyer.
pub fn evaluate_down_payment(
    input: &DownPaymentInput,
) -> MortgageResult<ComputationOutput<DownPaymentResult>> {
    evaluate_down_payment_with(&DownPaymentPolicy::default(), input)
}

/// As [`evaluate_down_payment`], against an explicit policy table.
pub fn evaluate_down_payment_with(
    policy: &DownPaymentPolicy,
    input: &DownPaymentInput,
) -> MortgageResult<ComputationOutput<DownPaymentResult>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    if input.buyer.property_price < Decimal::ZERO {
        return Err(MortgageError::InvalidInput {
            field: "property_price".into(),
            reason: "Property price cannot be negative".into(),
        });
    }
    if let Some(chosen) = input.chosen_percent {
        if chosen < Decimal::ZERO || chosen > dec!(100) {
            return Err(MortgageError::InvalidInput {
                field: "chosen_percent".into(),
                reason: "Chosen percent must be between 0 and 100".into(),
            });
        }
    }
    if input.buyer.property_price.is_zero() {
        warnings.push("property price is blank; down-payment amount is zero".into());
    }

    let minimum = min_percent_with(policy, &input.buyer);
    let effective = match input.chosen_percent {
        Some(chosen) => chosen.max(minimum),
        None => minimum,
    };

    let result = DownPaymentResult {
        min_percent: minimum,
        effective_percent: effective,
        down_payment_amount: round_aed(input.buyer.property_price * effective / dec!(100)),
        max_ltv_percent: dec!(100) - minimum,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    let assumptions = serde_json::json!({
        "policy": policy,
    });
    Ok(with_metadata(
        "Minimum Down-Payment Policy (UAE)",
        &assumptions,
        warnings,
        elapsed,
        result,
    ))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
