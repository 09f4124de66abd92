pub mod schedule;
pub mod upfront;

pub use schedule::{fee_schedule, Emirate, FeeSchedule, PropertyReadiness};
pub use upfront::{calculate_upfront_costs, calculate_upfront_costs_with};
