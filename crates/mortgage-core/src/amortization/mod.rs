pub mod emi;
pub mod prepayment;
