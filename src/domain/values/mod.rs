pub mod category;
pub mod failure_policy;
