use mortgage_core::amortization::emi::{self, LoanTerms};
use mortgage_core::amortization::prepayment::{self, PrepaymentScenario};
use mortgage_core::MortgageError;
use pretty_assertions::assert_eq;
use rust_decimal_macros::dec;

// ===========================================================================
// Amortization tests
// ===========================================================================

fn standard_loan() -> LoanTerms {
    // The worked example every calculator view is checked against:
    // 1.2M AED at 4.5% over 25 years.
    LoanTerms {
        principal: dec!(1_200_000),
        annual_rate_percent: dec!(4.5),
        term_years: 25,
    }
}

#[test]
fn test_emi_golden_values() {
    let out = emi::calculate_amortization(&standard_loan()).unwrap();
    let r = &out.result;

    // Raw installment is 6,669.9897...; whole-AED rounding happens once,
    // at output assembly. These three values lock the rounding convention.
    assert_eq!(r.monthly_installment, dec!(6670));
    assert_eq!(r.total_payment, dec!(2_000_997));
    assert_eq!(r.total_interest, dec!(800_997));
}

#[test]
fn test_zero_rate_installment_is_exact() {
    let loan = LoanTerms {
        principal: dec!(1_200_000),
        annual_rate_percent: dec!(0),
        term_years: 25,
    };
    let r = emi::calculate_amortization(&loan).unwrap().result;
    assert_eq!(r.monthly_installment, dec!(4000));
    assert_eq!(r.total_interest, dec!(0));
    assert_eq!(r.total_payment, dec!(1_200_000));
}

#[test]
fn test_total_payment_at_least_principal_across_terms() {
    for years in [1u32, 5, 10, 20, 30] {
        for rate in [dec!(0), dec!(2.75), dec!(5.5), dec!(9.99)] {
            let loan = LoanTerms {
                principal: dec!(750_000),
                annual_rate_percent: rate,
                term_years: years,
            };
            let r = emi::calculate_amortization(&loan).unwrap().result;
            assert!(
                r.total_payment >= loan.principal,
                "{} years at {}%: total {} below principal",
                years,
                rate,
                r.total_payment
            );
        }
    }
}

#[test]
fn test_interim_inputs_never_error() {
    for (principal, years) in [(dec!(0), 25u32), (dec!(-10), 25), (dec!(1_200_000), 0)] {
        let loan = LoanTerms {
            principal,
            annual_rate_percent: dec!(4.5),
            term_years: years,
        };
        let out = emi::calculate_amortization(&loan).unwrap();
        assert_eq!(out.result.monthly_installment, dec!(0));
        assert_eq!(out.result.total_payment, dec!(0));
        assert!(!out.warnings.is_empty());
    }
}

#[test]
fn test_structural_invalid_inputs_error() {
    let mut loan = standard_loan();
    loan.annual_rate_percent = dec!(-0.5);
    assert!(matches!(
        emi::calculate_amortization(&loan),
        Err(MortgageError::InvalidInput { .. })
    ));

    let mut loan = standard_loan();
    loan.term_years = 31;
    assert!(matches!(
        emi::calculate_amortization(&loan),
        Err(MortgageError::InvalidInput { .. })
    ));
}

#[test]
fn test_schedule_expansion_closes_at_zero() {
    let rows = emi::expand_schedule(&standard_loan()).unwrap().result;
    assert_eq!(rows.len(), 300);
    assert_eq!(rows.first().unwrap().month, 1);
    assert_eq!(rows.last().unwrap().month, 300);
    assert_eq!(rows.last().unwrap().closing_balance, dec!(0));

    // Interest portion falls as the balance amortises.
    assert!(rows.first().unwrap().interest > rows.last().unwrap().interest);
}

// ===========================================================================
// Prepayment tests
// ===========================================================================

fn no_prepayment() -> PrepaymentScenario {
    PrepaymentScenario {
        lump_sum_amount: dec!(0),
        lump_sum_after_month: 0,
        extra_monthly_payment: dec!(0),
    }
}

#[test]
fn test_noop_scenario_is_the_baseline() {
    let baseline = emi::calculate_amortization(&standard_loan()).unwrap().result;
    let out = prepayment::simulate_prepayment(&standard_loan(), &no_prepayment())
        .unwrap()
        .result;

    assert_eq!(out.original_tenure_months, 300);
    assert_eq!(out.new_tenure_months, 300);
    assert_eq!(out.months_saved, 0);
    assert_eq!(out.interest_saved, dec!(0));
    assert_eq!(out.original_emi, baseline.monthly_installment);
    assert_eq!(out.original_total_interest, baseline.total_interest);
    assert_eq!(out.new_total_interest, baseline.total_interest);
    assert_eq!(out.original_total_payment, baseline.total_payment);
    assert_eq!(out.new_total_payment, baseline.total_payment);
}

#[test]
fn test_lump_sum_golden_values() {
    let scenario = PrepaymentScenario {
        lump_sum_amount: dec!(200_000),
        lump_sum_after_month: 12,
        extra_monthly_payment: dec!(0),
    };
    let out = prepayment::simulate_prepayment(&standard_loan(), &scenario)
        .unwrap()
        .result;

    assert_eq!(out.new_tenure_months, 224);
    assert_eq!(out.months_saved, 76);
    assert_eq!(out.new_total_interest, dec!(492_218));
    assert_eq!(out.new_total_payment, dec!(1_692_218));
    assert_eq!(out.interest_saved, dec!(308_779));
    assert_eq!(out.new_effective_monthly_payment, dec!(7555));
}

#[test]
fn test_extra_monthly_golden_values() {
    let scenario = PrepaymentScenario {
        lump_sum_amount: dec!(0),
        lump_sum_after_month: 0,
        extra_monthly_payment: dec!(1000),
    };
    let out = prepayment::simulate_prepayment(&standard_loan(), &scenario)
        .unwrap()
        .result;

    assert_eq!(out.new_tenure_months, 237);
    assert_eq!(out.new_total_interest, dec!(610_615));
    assert!(out.interest_saved > dec!(0));
}

#[test]
fn test_lump_sum_monotone_in_amount() {
    let mut last_tenure = u32::MAX;
    let mut last_interest = dec!(99_999_999_999);
    for amount in [dec!(0), dec!(100_000), dec!(200_000), dec!(300_000)] {
        let scenario = PrepaymentScenario {
            lump_sum_amount: amount,
            lump_sum_after_month: if amount.is_zero() { 0 } else { 12 },
            extra_monthly_payment: dec!(0),
        };
        let out = prepayment::simulate_prepayment(&standard_loan(), &scenario)
            .unwrap()
            .result;
        assert!(out.new_tenure_months <= last_tenure);
        assert!(out.new_total_interest <= last_interest);
        last_tenure = out.new_tenure_months;
        last_interest = out.new_total_interest;
    }
}

#[test]
fn test_lump_month_must_fall_inside_tenure() {
    let scenario = PrepaymentScenario {
        lump_sum_amount: dec!(50_000),
        lump_sum_after_month: 301,
        extra_monthly_payment: dec!(0),
    };
    assert!(matches!(
        prepayment::simulate_prepayment(&standard_loan(), &scenario),
        Err(MortgageError::InvalidInput { .. })
    ));
}
