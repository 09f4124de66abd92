//! Prepayment and early-settlement simulation: replays the amortisation
//! schedule under a one-off lump sum and/or a recurring overpayment and
//! reports the reduced tenure and the interest saved against the baseline.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::amortization::emi::{raw_installment, validate_terms, LoanTerms};
use crate::error::MortgageError;
use crate::types::{round_aed, with_metadata, ComputationOutput, Money};
use crate::MortgageResult;

// ---------------------------------------------------------------------------
// Input / Output types
// ---------------------------------------------------------------------------

/// A prepayment plan laid over the baseline schedule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrepaymentScenario {
    /// One-off extra principal payment. Zero disables the lump sum.
    pub lump_sum_amount: Money,
    /// Month (1-based) in which the lump sum lands. Ignored while
    /// `lump_sum_amount` is zero.
    pub lump_sum_after_month: u32,
    /// Recurring extra amount paid on top of every installment.
    pub extra_monthly_payment: Money,
}

impl PrepaymentScenario {
    /// No prepayment configured: the simulation must reproduce the baseline.
    pub fn is_noop(&self) -> bool {
        self.lump_sum_amount.is_zero() && self.extra_monthly_payment.is_zero()
    }
}

/// Outcome of a prepayment simulation against the unmodified baseline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrepaymentResult {
    pub original_tenure_months: u32,
    pub new_tenure_months: u32,
    pub months_saved: u32,
    pub original_total_interest: Money,
    pub new_total_interest: Money,
    pub original_total_payment: Money,
    pub new_total_payment: Money,
    pub original_emi: Money,
    pub new_effective_monthly_payment: Money,
    pub interest_saved: Money,
}

impl PrepaymentResult {
    fn zeroed() -> Self {
        PrepaymentResult {
            original_tenure_months: 0,
            new_tenure_months: 0,
            months_saved: 0,
            original_total_interest: Decimal::ZERO,
            new_total_interest: Decimal::ZERO,
            original_total_payment: Decimal::ZERO,
            new_total_payment: Decimal::ZERO,
            original_emi: Decimal::ZERO,
            new_effective_monthly_payment: Decimal::ZERO,
            interest_saved: Decimal::ZERO,
        }
    }
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Simulate the loan under the given prepayment scenario.
pub fn simulate_prepayment(
    loan: &LoanTerms,
    scenario: &PrepaymentScenario,
) -> MortgageResult<ComputationOutput<PrepaymentResult>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    validate_terms(loan)?;

    let result = if loan.is_interim() {
        warnings.push("principal or term is blank; returning a zeroed result".into());
        PrepaymentResult::zeroed()
    } else {
        validate_scenario(loan, scenario)?;
        compute(loan, scenario, &mut warnings)?
    };

    let elapsed = start.elapsed().as_micros() as u64;
    let assumptions = serde_json::json!({
        "loan": loan,
        "scenario": scenario,
    });
    Ok(with_metadata(
        "Prepayment Simulation (lump sum + recurring overpayment)",
        &assumptions,
        warnings,
        elapsed,
        result,
    ))
}

// ---------------------------------------------------------------------------
// Simulation
// ---------------------------------------------------------------------------

fn compute(
    loan: &LoanTerms,
    scenario: &PrepaymentScenario,
    warnings: &mut Vec<String>,
) -> MortgageResult<PrepaymentResult> {
    let n = loan.tenure_months();
    let installment = raw_installment(loan)?;
    let original_total_payment = installment * Decimal::from(n);
    let original_total_interest = original_total_payment - loan.principal;

    // An empty scenario reproduces the baseline directly rather than
    // replaying it month by month, keeping the equality exact.
    if scenario.is_noop() {
        return Ok(PrepaymentResult {
            original_tenure_months: n,
            new_tenure_months: n,
            months_saved: 0,
            original_total_interest: round_aed(original_total_interest),
            new_total_interest: round_aed(original_total_interest),
            original_total_payment: round_aed(original_total_payment),
            new_total_payment: round_aed(original_total_payment),
            original_emi: round_aed(installment),
            new_effective_monthly_payment: round_aed(installment),
            interest_saved: Decimal::ZERO,
        });
    }

    let r = loan.monthly_rate();
    let mut balance = loan.principal;
    let mut interest_paid = Decimal::ZERO;
    let mut months: u32 = 0;

    for month in 1..=n {
        months = month;

        let interest = balance * r;
        interest_paid += interest;

        let mut principal_portion = installment + scenario.extra_monthly_payment - interest;
        if month == scenario.lump_sum_after_month && scenario.lump_sum_amount > Decimal::ZERO {
            principal_portion += scenario.lump_sum_amount;
        }

        // A payment may never drive the balance negative: the excess of a
        // lump sum beyond the outstanding balance is discarded. The final
        // month of the original tenure absorbs any residual the same way.
        if principal_portion >= balance || month == n {
            principal_portion = balance;
        }
        balance -= principal_portion;

        if balance.is_zero() {
            break;
        }
    }

    if scenario.lump_sum_amount >= loan.principal {
        warnings.push("lump sum covers the full principal; excess is discarded".into());
    }

    let new_total_payment = loan.principal + interest_paid;
    let new_effective = if months == 0 {
        Decimal::ZERO
    } else {
        new_total_payment / Decimal::from(months)
    };

    let original_total_interest = round_aed(original_total_interest);
    let new_total_interest = round_aed(interest_paid);
    let interest_saved = (original_total_interest - new_total_interest).max(Decimal::ZERO);

    Ok(PrepaymentResult {
        original_tenure_months: n,
        new_tenure_months: months,
        months_saved: n - months,
        original_total_interest,
        new_total_interest,
        original_total_payment: round_aed(original_total_payment),
        new_total_payment: round_aed(new_total_payment),
        original_emi: round_aed(installment),
        new_effective_monthly_payment: round_aed(new_effective),
        interest_saved,
    })
}

fn validate_scenario(loan: &LoanTerms, scenario: &PrepaymentScenario) -> MortgageResult<()> {
    if scenario.lump_sum_amount < Decimal::ZERO {
        return Err(MortgageError::InvalidInput {
            field: "lump_sum_amount".into(),
            reason: "Lump sum cannot be negative".into(),
        });
    }
    if scenario.extra_monthly_payment < Decimal::ZERO {
        return Err(MortgageError::InvalidInput {
            field: "extra_monthly_payment".into(),
            reason: "Extra monthly payment cannot be negative".into(),
        });
    }
    if scenario.lump_sum_amount > Decimal::ZERO {
        let n = loan.tenure_months();
        if scenario.lump_sum_after_month < 1 || scenario.lump_sum_after_month > n {
            return Err(MortgageError::InvalidInput {
                field: "lump_sum_after_month".into(),
                reason: format!("Lump sum month must fall within the loan tenure (1 to {})", n),
            });
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn standard_loan() -> LoanTerms {
        LoanTerms {
            principal: dec!(1_200_000),
            annual_rate_percent: dec!(4.5),
            term_years: 25,
        }
    }

    fn lump(amount: Decimal, month: u32) -> PrepaymentScenario {
        PrepaymentScenario {
            lump_sum_amount: amount,
            lump_sum_after_month: month,
            extra_monthly_payment: dec!(0),
        }
    }

    fn run(loan: &LoanTerms, scenario: &PrepaymentScenario) -> PrepaymentResult {
        simulate_prepayment(loan, scenario).unwrap().result
    }

    // -----------------------------------------------------------------------
    // 1. Empty scenario reproduces the baseline exactly
    // -----------------------------------------------------------------------
    #[test]
    fn test_noop_scenario_equals_baseline() {
        let out = run(&standard_loan(), &lump(dec!(0), 0));
        assert_eq!(out.original_tenure_months, 300);
        assert_eq!(out.new_tenure_months, 300);
        assert_eq!(out.months_saved, 0);
        assert_eq!(out.interest_saved, dec!(0));
        assert_eq!(out.new_total_interest, out.original_total_interest);
        assert_eq!(out.new_total_payment, out.original_total_payment);
        assert_eq!(out.new_effective_monthly_payment, out.original_emi);
    }

    // -----------------------------------------------------------------------
    // 2. Lump sum shortens the tenure and saves interest
    // -----------------------------------------------------------------------
    #[test]
    fn test_lump_sum_shortens_tenure() {
        let out = run(&standard_loan(), &lump(dec!(200_000), 12));
        assert!(out.new_tenure_months < 300);
        assert!(out.interest_saved > dec!(0));
        assert_eq!(out.months_saved, 300 - out.new_tenure_months);
    }

    // -----------------------------------------------------------------------
    // 3. Larger lump sums never lengthen the loan or cost more interest
    // -----------------------------------------------------------------------
    #[test]
    fn test_lump_sum_monotonicity() {
        let mut prev = run(&standard_loan(), &lump(dec!(50_000), 12));
        for amount in [dec!(100_000), dec!(200_000), dec!(400_000)] {
            let out = run(&standard_loan(), &lump(amount, 12));
            assert!(
                out.new_tenure_months <= prev.new_tenure_months,
                "tenure grew from {} to {} at lump {}",
                prev.new_tenure_months,
                out.new_tenure_months,
                amount
            );
            assert!(
                out.new_total_interest <= prev.new_total_interest,
                "interest grew from {} to {} at lump {}",
                prev.new_total_interest,
                out.new_total_interest,
                amount
            );
            prev = out;
        }
    }

    // -----------------------------------------------------------------------
    // 4. A lump sum above the outstanding balance is discarded, not refunded
    // -----------------------------------------------------------------------
    #[test]
    fn test_oversized_lump_sum_discards_excess() {
        let loan = standard_loan();
        let out = run(&loan, &lump(dec!(10_000_000), 1));
        assert_eq!(out.new_tenure_months, 1);
        // One month of interest on the full principal, nothing more.
        let first_interest = round_aed(loan.principal * dec!(4.5) / dec!(12) / dec!(100));
        assert_eq!(out.new_total_interest, first_interest);
        assert_eq!(out.new_total_payment, loan.principal + first_interest);
    }

    // -----------------------------------------------------------------------
    // 5. Recurring overpayment alone shortens the tenure
    // -----------------------------------------------------------------------
    #[test]
    fn test_extra_monthly_payment_shortens_tenure() {
        let scenario = PrepaymentScenario {
            lump_sum_amount: dec!(0),
            lump_sum_after_month: 0,
            extra_monthly_payment: dec!(1000),
        };
        let out = run(&standard_loan(), &scenario);
        assert_eq!(out.new_tenure_months, 237);
        assert_eq!(out.new_total_interest, dec!(610_615));
    }

    // -----------------------------------------------------------------------
    // 6. Validation: negative amounts and out-of-tenure lump month
    // -----------------------------------------------------------------------
    #[test]
    fn test_validation_rejects_bad_scenarios() {
        let loan = standard_loan();
        assert!(simulate_prepayment(&loan, &lump(dec!(-1), 12)).is_err());
        assert!(simulate_prepayment(&loan, &lump(dec!(1000), 0)).is_err());
        assert!(simulate_prepayment(&loan, &lump(dec!(1000), 301)).is_err());

        let scenario = PrepaymentScenario {
            lump_sum_amount: dec!(0),
            lump_sum_after_month: 0,
            extra_monthly_payment: dec!(-500),
        };
        assert!(simulate_prepayment(&loan, &scenario).is_err());
    }

    // -----------------------------------------------------------------------
    // 7. Interim loan input degrades to a zeroed result
    // -----------------------------------------------------------------------
    #[test]
    fn test_interim_loan_returns_zeroed_result() {
        let mut loan = standard_loan();
        loan.principal = dec!(0);
        let out = simulate_prepayment(&loan, &lump(dec!(0), 0)).unwrap();
        assert_eq!(out.result.new_tenure_months, 0);
        assert!(!out.warnings.is_empty());
    }
}
