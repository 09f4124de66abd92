use mortgage_core::amortization::emi::LoanTerms;
use mortgage_core::eligibility::{self, EligibilityInput};
use mortgage_core::policy::down_payment::BuyerProfile;
use mortgage_core::MortgageError;
use pretty_assertions::assert_eq;
use rust_decimal_macros::dec;

fn standard_applicant() -> EligibilityInput {
    // 40k income, 5k obligations, proposing 1.2M over 25y at 4.5% against a
    // 1.5M ready property.
    EligibilityInput {
        gross_monthly_income: dec!(40_000),
        existing_monthly_obligations: dec!(5000),
        loan: LoanTerms {
            principal: dec!(1_200_000),
            annual_rate_percent: dec!(4.5),
            term_years: 25,
        },
        buyer: BuyerProfile {
            is_resident: true,
            is_first_time_buyer: true,
            property_price: dec!(1_500_000),
        },
    }
}

#[test]
fn test_standard_applicant_is_eligible() {
    let out = eligibility::evaluate_eligibility(&standard_applicant())
        .unwrap()
        .result;

    assert_eq!(out.dbr_percent, dec!(29.17));
    assert_eq!(out.max_dbr_percent, dec!(50));
    assert_eq!(out.ltv_percent, dec!(80));
    assert_eq!(out.max_ltv_percent, dec!(80)); // 100 - 20% minimum down
    assert_eq!(out.estimated_emi, dec!(6670));
    assert!(out.is_eligible);
}

#[test]
fn test_eligible_loan_ceiling_golden_value() {
    let out = eligibility::evaluate_eligibility(&standard_applicant())
        .unwrap()
        .result;
    // Affordable installment at the ceiling: 40,000 * 50% - 5,000 = 15,000.
    // Inverted through the annuity at 4.5% / 300 months.
    assert_eq!(out.eligible_loan_amount, dec!(2_698_655));
}

#[test]
fn test_dbr_breach_always_blocks() {
    let mut input = standard_applicant();
    input.gross_monthly_income = dec!(11_000);
    input.buyer.property_price = dec!(12_000_000); // LTV is tiny
    let out = eligibility::evaluate_eligibility(&input).unwrap().result;

    assert!(out.dbr_percent > dec!(50));
    assert!(out.ltv_percent < dec!(15));
    assert!(!out.is_eligible);
}

#[test]
fn test_ltv_cap_follows_buyer_class() {
    let mut input = standard_applicant();
    input.buyer.is_resident = false;
    let out = eligibility::evaluate_eligibility(&input).unwrap().result;

    assert_eq!(out.max_ltv_percent, dec!(60));
    assert_eq!(out.ltv_percent, dec!(80));
    assert!(!out.is_eligible);
}

#[test]
fn test_dbr_exactly_at_ceiling_is_eligible() {
    // 50% is a ceiling, not a strict bound: obligations + EMI equal to half
    // the income still passes.
    let mut input = standard_applicant();
    input.loan = LoanTerms {
        principal: dec!(600_000),
        annual_rate_percent: dec!(0),
        term_years: 10,
    };
    input.buyer.property_price = dec!(1_500_000);
    input.gross_monthly_income = dec!(20_000);
    input.existing_monthly_obligations = dec!(5000);
    // EMI = 5,000; (5,000 + 5,000) / 20,000 = 50% exactly.
    let out = eligibility::evaluate_eligibility(&input).unwrap().result;
    assert_eq!(out.dbr_percent, dec!(50));
    assert!(out.is_eligible);
}

#[test]
fn test_zero_rate_ceiling_multiplies_out() {
    let mut input = standard_applicant();
    input.gross_monthly_income = dec!(10_000);
    input.existing_monthly_obligations = dec!(0);
    input.loan = LoanTerms {
        principal: dec!(300_000),
        annual_rate_percent: dec!(0),
        term_years: 10,
    };
    let out = eligibility::evaluate_eligibility(&input).unwrap().result;
    assert_eq!(out.eligible_loan_amount, dec!(600_000));
}

#[test]
fn test_blank_income_degrades_to_ineligible() {
    let mut input = standard_applicant();
    input.gross_monthly_income = dec!(0);
    let out = eligibility::evaluate_eligibility(&input).unwrap();

    assert!(!out.result.is_eligible);
    assert_eq!(out.result.eligible_loan_amount, dec!(0));
    assert!(!out.warnings.is_empty());
}

#[test]
fn test_negative_figures_are_structural_errors() {
    let mut input = standard_applicant();
    input.existing_monthly_obligations = dec!(-100);
    assert!(matches!(
        eligibility::evaluate_eligibility(&input),
        Err(MortgageError::InvalidInput { .. })
    ));

    let mut input = standard_applicant();
    input.gross_monthly_income = dec!(-1);
    assert!(matches!(
        eligibility::evaluate_eligibility(&input),
        Err(MortgageError::InvalidInput { .. })
    ));
}
