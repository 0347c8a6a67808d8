use crate::domain::entities::holding::Holding;
use crate::domain::values::category::Category;
use serde::{Deserialize, Serialize};

/// Every balance produced by this crate comes from the KSEI depository.
pub const SOURCE_TYPE_KSEI: &str = "ksei";

/// One normalized holding attributed to an account and category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Balance {
    pub source_type: String,
    pub source_account: String,
    pub asset_symbol: String,
    pub asset_name: String,
    pub asset_type: String,
    pub asset_sub_type: String,
    pub units_amount: f64,
    pub units_value: f64,
    pub units_currency: String,
}

impl Balance {
    /// Amount and value pass through unchanged; no rounding happens here.
    pub fn from_holding(account: &str, category: Category, holding: Holding) -> Self {
        Self {
            source_type: SOURCE_TYPE_KSEI.to_string(),
            source_account: account.to_string(),
            asset_symbol: holding.symbol,
            asset_name: holding.name,
            asset_type: category.name().to_string(),
            asset_sub_type: String::new(),
            units_amount: holding.amount,
            units_value: holding.current_value,
            units_currency: holding.currency,
        }
    }

    /// `type/sub_type`, or just whichever part is non-empty.
    pub fn asset_type_full(&self) -> String {
        [self.asset_type.as_str(), self.asset_sub_type.as_str()]
            .iter()
            .filter(|part| !part.is_empty())
            .copied()
            .collect::<Vec<_>>()
            .join("/")
    }
}
