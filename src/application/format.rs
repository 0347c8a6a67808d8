//! Text rendering of tool results. Pure and order-preserving: callers are
//! expected to hand in already-sorted data.

use crate::application::aggregate::BranchFailure;
use crate::domain::entities::balance::Balance;

pub const EMPTY_PORTFOLIO: &str = "Portfolio is empty";
pub const NO_ACCOUNTS: &str = "No accounts configured";
pub const NO_BALANCES: &str = "No portfolio balances found for selected accounts";

/// `<symbol> <name>: <amount> units of <type>[/<subtype>], total value <currency> <value> (<account>)`
pub fn describe_balance(balance: &Balance) -> String {
    format!(
        "{} {}: {} units of {}, total value {} {} ({})",
        balance.asset_symbol,
        balance.asset_name,
        balance.units_amount,
        balance.asset_type_full(),
        balance.units_currency,
        balance.units_value,
        balance.source_account,
    )
}

pub fn describe_portfolio(balances: &[Balance]) -> String {
    if balances.is_empty() {
        return EMPTY_PORTFOLIO.to_string();
    }

    let lines: Vec<String> = balances
        .iter()
        .map(|b| format!("- {}", describe_balance(b)))
        .collect();

    format!("Portfolio:\n{}", lines.join("\n"))
}

pub fn describe_account_list(names: &[String]) -> String {
    if names.is_empty() {
        return NO_ACCOUNTS.to_string();
    }

    format!("Available accounts: {}", names.join(", "))
}

pub fn describe_selection_empty(available: &[String]) -> String {
    format!(
        "Selected accounts not found, available accounts are {}",
        available.join(", ")
    )
}

/// Empty string when nothing failed.
pub fn describe_failures(failures: &[BranchFailure]) -> String {
    if failures.is_empty() {
        return String::new();
    }

    let lines: Vec<String> = failures
        .iter()
        .map(|f| format!("- {}/{}: {}", f.account, f.category, f.error))
        .collect();

    format!("Failed branches:\n{}", lines.join("\n"))
}
