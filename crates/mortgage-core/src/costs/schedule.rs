//! Per-emirate fee schedules. A schedule is a data value keyed by
//! (emirate, property readiness); adding an emirate is a data change, not a
//! code change. Figures are configurable business data, not certified law.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::types::{Money, Rate};

/// Emirate in which the transfer completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Emirate {
    Dubai,
    AbuDhabi,
    Sharjah,
    Other,
}

/// Whether the property is completed or still off-plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyReadiness {
    Ready,
    OffPlan,
}

/// Fee rule set for one (emirate, readiness) combination.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeeSchedule {
    /// Transfer fee as a fraction of the property price.
    pub transfer_fee_rate: Rate,
    /// The transfer fee registers under the off-plan Oqood scheme instead
    /// of as a DLD transfer fee.
    pub registers_as_oqood: bool,
    /// Fixed land-department admin fee.
    pub admin_fee: Money,
    /// Mortgage registration as a fraction of the loan amount.
    pub mortgage_registration_rate: Rate,
    /// Fixed component of the mortgage registration fee.
    pub mortgage_registration_fixed: Money,
    /// Trustee office fee for prices at or below the threshold.
    pub trustee_fee_low: Money,
    /// Trustee office fee above the threshold.
    pub trustee_fee_high: Money,
    /// Property price dividing the two trustee bands.
    pub trustee_fee_threshold: Money,
}

impl FeeSchedule {
    /// Trustee fee band for the given property price.
    pub fn trustee_fee(&self, property_price: Money) -> Money {
        if property_price <= self.trustee_fee_threshold {
            self.trustee_fee_low
        } else {
            self.trustee_fee_high
        }
    }
}

/// Fee schedule for an (emirate, readiness) pair.
///
/// No authoritative Sharjah schedule was available when this table was
/// assembled; `Sharjah` and `Other` share a conservative placeholder default
/// (2% transfer, 0.1% mortgage registration, no fixed fees). Callers with
/// better figures should pass their own schedule to
/// [`super::upfront::calculate_upfront_costs_with`].
pub fn fee_schedule(emirate: Emirate, readiness: PropertyReadiness) -> FeeSchedule {
    use Emirate::*;
    use PropertyReadiness::*;

    match (emirate, readiness) {
        (Dubai, Ready) => FeeSchedule {
            transfer_fee_rate: dec!(0.04),
            registers_as_oqood: false,
            admin_fee: dec!(580),
            mortgage_registration_rate: dec!(0.0025),
            mortgage_registration_fixed: dec!(290),
            trustee_fee_low: dec!(2000),
            trustee_fee_high: dec!(4000),
            trustee_fee_threshold: dec!(500_000),
        },
        // Off-plan Dubai purchases register under Oqood; everything else is
        // unchanged from the ready case.
        (Dubai, OffPlan) => FeeSchedule {
            transfer_fee_rate: dec!(0.04),
            registers_as_oqood: true,
            admin_fee: dec!(580),
            mortgage_registration_rate: dec!(0.0025),
            mortgage_registration_fixed: dec!(290),
            trustee_fee_low: dec!(2000),
            trustee_fee_high: dec!(4000),
            trustee_fee_threshold: dec!(500_000),
        },
        (AbuDhabi, _) => FeeSchedule {
            transfer_fee_rate: dec!(0.02),
            registers_as_oqood: false,
            admin_fee: Decimal::ZERO,
            mortgage_registration_rate: dec!(0.001),
            mortgage_registration_fixed: Decimal::ZERO,
            trustee_fee_low: Decimal::ZERO,
            trustee_fee_high: Decimal::ZERO,
            trustee_fee_threshold: Decimal::ZERO,
        },
        (Sharjah, _) | (Other, _) => FeeSchedule {
            transfer_fee_rate: dec!(0.02),
            registers_as_oqood: false,
            admin_fee: Decimal::ZERO,
            mortgage_registration_rate: dec!(0.001),
            mortgage_registration_fixed: Decimal::ZERO,
            trustee_fee_low: Decimal::ZERO,
            trustee_fee_high: Decimal::ZERO,
            trustee_fee_threshold: Decimal::ZERO,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dubai_ready_schedule() {
        let s = fee_schedule(Emirate::Dubai, PropertyReadiness::Ready);
        assert_eq!(s.transfer_fee_rate, dec!(0.04));
        assert!(!s.registers_as_oqood);
        assert_eq!(s.admin_fee, dec!(580));
    }

    #[test]
    fn test_dubai_off_plan_registers_as_oqood() {
        let s = fee_schedule(Emirate::Dubai, PropertyReadiness::OffPlan);
        assert!(s.registers_as_oqood);
        assert_eq!(s.transfer_fee_rate, dec!(0.04));
    }

    #[test]
    fn test_abu_dhabi_ignores_readiness() {
        let ready = fee_schedule(Emirate::AbuDhabi, PropertyReadiness::Ready);
        let off_plan = fee_schedule(Emirate::AbuDhabi, PropertyReadiness::OffPlan);
        assert_eq!(ready.transfer_fee_rate, off_plan.transfer_fee_rate);
        assert_eq!(ready.mortgage_registration_rate, dec!(0.001));
        assert_eq!(ready.admin_fee, dec!(0));
    }

    #[test]
    fn test_trustee_fee_bands() {
        let s = fee_schedule(Emirate::Dubai, PropertyReadiness::Ready);
        assert_eq!(s.trustee_fee(dec!(400_000)), dec!(2000));
        assert_eq!(s.trustee_fee(dec!(500_000)), dec!(2000));
        assert_eq!(s.trustee_fee(dec!(500_001)), dec!(4000));
    }
}
