pub mod common;
pub mod meal_plan;
pub mod units;
pub mod wizard;
