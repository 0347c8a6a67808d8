use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How a portfolio query treats a failed (account, category) branch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FailurePolicy {
    /// Any failed branch fails the whole query and discards every balance.
    #[default]
    FailFast,
    /// Keep balances from successful branches and report the failed ones.
    Partial,
}

impl fmt::Display for FailurePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FailFast => write!(f, "fail-fast"),
            Self::Partial => write!(f, "partial"),
        }
    }
}

impl FromStr for FailurePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "fail-fast" | "failfast" | "strict" => Ok(Self::FailFast),
            "partial" => Ok(Self::Partial),
            _ => Err(format!(
                "Invalid failure policy: '{}'. Use 'fail-fast' or 'partial'",
                s
            )),
        }
    }
}
