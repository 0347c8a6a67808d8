use crate::application::aggregate::BranchFailure;
use crate::application::format;
use crate::domain::entities::balance::Balance;
use serde::{Deserialize, Deserializer, Serialize};

/// Response envelope shared by every tool.
///
/// `is_error` marks the soft failure states (nothing selected, nothing held).
/// Hard failures never reach this type; they are returned as `Err`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolResult<T> {
    pub text: String,
    pub structured: T,
    pub is_error: bool,
}

impl<T> ToolResult<T> {
    pub fn success(text: String, structured: T) -> Self {
        Self {
            text,
            structured,
            is_error: false,
        }
    }

    pub fn soft_error(text: String, structured: T) -> Self {
        Self {
            text,
            structured,
            is_error: true,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetPortfolioArgs {
    /// Account names to include; empty, absent or null means every account.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub account_names: Vec<String>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GetPortfolioResult {
    pub balances: Vec<Balance>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub failures: Vec<BranchFailure>,
}

impl GetPortfolioResult {
    pub fn description(&self) -> String {
        let portfolio = format::describe_portfolio(&self.balances);
        if self.failures.is_empty() {
            return portfolio;
        }
        format!("{portfolio}\n{}", format::describe_failures(&self.failures))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListAccountNamesResult {
    pub account_names: Vec<String>,
}

impl ListAccountNamesResult {
    pub fn description(&self) -> String {
        format::describe_account_list(&self.account_names)
    }
}
