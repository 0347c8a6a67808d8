use serde::{Deserialize, Serialize};

/// A raw position as reported by a depository client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Holding {
    pub symbol: String,
    pub name: String,
    pub currency: String,
    pub amount: f64,
    pub current_value: f64,
}

impl Holding {
    pub fn new(
        symbol: impl Into<String>,
        name: impl Into<String>,
        currency: impl Into<String>,
        amount: f64,
        current_value: f64,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            name: name.into(),
            currency: currency.into(),
            amount,
            current_value,
        }
    }
}
