use crate::domain::entities::holding::Holding;
use crate::domain::error::DomainError;
use crate::domain::values::category::Category;
use async_trait::async_trait;

/// Authenticated access to one depository account.
///
/// Implementations own their session state; the aggregation core only ever
/// holds them behind an `Arc` and calls them concurrently, one call per
/// category.
#[async_trait]
pub trait RemoteClient: Send + Sync {
    /// Fetch every holding of the given category.
    async fn fetch_holdings(&self, category: Category) -> Result<Vec<Holding>, DomainError>;
}
