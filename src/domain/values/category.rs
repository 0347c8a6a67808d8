use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Portfolio partition fetched independently for every account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Equity,
    Bond,
    MutualFund,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Equity, Category::Bond, Category::MutualFund];

    pub fn name(&self) -> &'static str {
        match self {
            Category::Equity => "equity",
            Category::Bond => "bond",
            Category::MutualFund => "mutual_fund",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "equity" => Ok(Category::Equity),
            "bond" => Ok(Category::Bond),
            "mutual_fund" | "mutual-fund" => Ok(Category::MutualFund),
            _ => Err(format!("Unknown category: {s}")),
        }
    }
}
