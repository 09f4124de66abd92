//! Fixed-rate amortisation: the equated monthly installment (EMI), loan
//! totals, and the month-by-month schedule expansion. All math in
//! `rust_decimal::Decimal`; money rounds to whole AED once, at output
//! assembly.

use rust_decimal::{Decimal, MathematicalOps};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::MortgageError;
use crate::types::{round_aed, with_metadata, ComputationOutput, Money, Percent, Rate};
use crate::MortgageResult;

/// Longest supported loan term, in years.
pub const MAX_TERM_YEARS: u32 = 30;

// ---------------------------------------------------------------------------
// Input / Output types
// ---------------------------------------------------------------------------

/// Terms of a fixed-rate mortgage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanTerms {
    /// Amount borrowed.
    pub principal: Money,
    /// Annual nominal rate as a percentage (4.5 = 4.5%).
    pub annual_rate_percent: Percent,
    /// Loan term in whole years.
    pub term_years: u32,
}

impl LoanTerms {
    /// Monthly rate as a decimal fraction.
    pub(crate) fn monthly_rate(&self) -> Rate {
        self.annual_rate_percent / dec!(12) / dec!(100)
    }

    /// Loan tenure in months.
    pub(crate) fn tenure_months(&self) -> u32 {
        self.term_years * 12
    }

    /// Blank or zeroed form state. Tolerated without error: the calculator
    /// views render a zeroed result while the user is still typing.
    pub(crate) fn is_interim(&self) -> bool {
        self.principal <= Decimal::ZERO || self.term_years == 0
    }
}

/// Installment and totals for a fixed-rate loan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AmortizationResult {
    pub monthly_installment: Money,
    pub total_interest: Money,
    pub total_payment: Money,
}

impl AmortizationResult {
    fn zeroed() -> Self {
        AmortizationResult {
            monthly_installment: Decimal::ZERO,
            total_interest: Decimal::ZERO,
            total_payment: Decimal::ZERO,
        }
    }
}

/// One month of the expanded schedule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleRow {
    pub month: u32,
    pub interest: Money,
    pub principal: Money,
    pub closing_balance: Money,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Calculate the fixed monthly installment and loan totals.
pub fn calculate_amortization(
    loan: &LoanTerms,
) -> MortgageResult<ComputationOutput<AmortizationResult>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    validate_terms(loan)?;

    let result = if loan.is_interim() {
        warnings.push("principal or term is blank; returning a zeroed result".into());
        AmortizationResult::zeroed()
    } else {
        let installment = raw_installment(loan)?;
        let total_payment = installment * Decimal::from(loan.tenure_months());
        AmortizationResult {
            monthly_installment: round_aed(installment),
            total_interest: round_aed(total_payment - loan.principal),
            total_payment: round_aed(total_payment),
        }
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Fixed-Rate Amortisation (EMI)",
        loan,
        warnings,
        elapsed,
        result,
    ))
}

/// Expand the full month-by-month schedule for the baseline loan.
///
/// The final month's principal portion absorbs the residual balance exactly,
/// so the closing balance of the last row is always zero.
pub fn expand_schedule(loan: &LoanTerms) -> MortgageResult<ComputationOutput<Vec<ScheduleRow>>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    validate_terms(loan)?;

    let rows = if loan.is_interim() {
        warnings.push("principal or term is blank; returning an empty schedule".into());
        Vec::new()
    } else {
        let installment = raw_installment(loan)?;
        let r = loan.monthly_rate();
        let n = loan.tenure_months();
        let mut balance = loan.principal;
        let mut rows = Vec::with_capacity(n as usize);

        for month in 1..=n {
            let interest = balance * r;
            let mut principal_portion = installment - interest;
            if month == n || principal_portion >= balance {
                principal_portion = balance;
            }
            balance -= principal_portion;

            rows.push(ScheduleRow {
                month,
                interest: round_aed(interest),
                principal: round_aed(principal_portion),
                closing_balance: round_aed(balance),
            });

            if balance <= Decimal::ZERO {
                break;
            }
        }
        rows
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Amortisation Schedule Expansion",
        loan,
        warnings,
        elapsed,
        rows,
    ))
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

/// Structural validation. Interim (blank) inputs are not errors; see
/// [`LoanTerms::is_interim`].
pub(crate) fn validate_terms(loan: &LoanTerms) -> MortgageResult<()> {
    if loan.annual_rate_percent < Decimal::ZERO {
        return Err(MortgageError::InvalidInput {
            field: "annual_rate_percent".into(),
            reason: "Rate cannot be negative".into(),
        });
    }
    if loan.term_years > MAX_TERM_YEARS {
        return Err(MortgageError::InvalidInput {
            field: "term_years".into(),
            reason: format!("Term must be between 1 and {} years", MAX_TERM_YEARS),
        });
    }
    Ok(())
}

/// Unrounded installment for a validated, non-interim loan.
///
/// installment = P * r * (1+r)^n / ((1+r)^n - 1), or P / n at a zero rate.
pub(crate) fn raw_installment(loan: &LoanTerms) -> MortgageResult<Money> {
    let n = loan.tenure_months();
    let r = loan.monthly_rate();

    if r.is_zero() {
        return Ok(loan.principal / Decimal::from(n));
    }

    let factor = (Decimal::ONE + r).powi(n as i64);
    let denominator = factor - Decimal::ONE;
    if denominator <= Decimal::ZERO {
        return Err(MortgageError::DivisionByZero {
            context: "EMI annuity factor".into(),
        });
    }

    Ok(loan.principal * r * factor / denominator)
}

/// Present value of an annuity paying `payment` per month: the inversion of
/// [`raw_installment`], used to size a loan from an affordable installment.
pub(crate) fn principal_for_installment(
    payment: Money,
    monthly_rate: Rate,
    tenure_months: u32,
) -> MortgageResult<Money> {
    if monthly_rate.is_zero() {
        return Ok(payment * Decimal::from(tenure_months));
    }

    let factor = (Decimal::ONE + monthly_rate).powi(tenure_months as i64);
    if factor.is_zero() {
        return Err(MortgageError::DivisionByZero {
            context: "annuity present-value factor".into(),
        });
    }

    Ok(payment * (Decimal::ONE - Decimal::ONE / factor) / monthly_rate)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
