use crate::domain::values::category::Category;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Config error: {0}")]
    Config(String),

    #[error("Remote error: {0}")]
    Remote(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Fetching {category} holdings for account {account} failed: {source}")]
    Fetch {
        account: String,
        category: Category,
        #[source]
        source: Box<DomainError>,
    },

    #[error("Task error: {0}")]
    Task(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
