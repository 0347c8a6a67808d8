pub mod account_registry;
pub mod aggregate;
pub mod format;
pub mod get_portfolio;
pub mod list_accounts;
pub mod tools;
