pub mod amortization;
pub mod costs;
pub mod eligibility;
