pub mod account;
pub mod balance;
pub mod holding;
