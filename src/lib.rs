pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

use crate::application::account_registry::AccountRegistry;
use crate::application::aggregate::Aggregator;
use crate::application::get_portfolio::{GetPortfolioUseCase, PortfolioOutcome};
use crate::application::list_accounts::ListAccountsUseCase;
use crate::application::tools::{
    GetPortfolioArgs, GetPortfolioResult, ListAccountNamesResult, ToolResult,
};
use crate::config::AppConfig;
use crate::domain::error::DomainError;
use crate::domain::ports::remote_client::RemoteClient;
use crate::domain::values::failure_policy::FailurePolicy;
use crate::infrastructure::ksei::client::KseiClient;
use std::sync::Arc;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub struct Portosync {
    registry: Arc<AccountRegistry>,
    get_portfolio_uc: GetPortfolioUseCase,
    list_accounts_uc: ListAccountsUseCase,
}

impl Portosync {
    /// Connect a KSEI client for every configured account.
    pub fn new(config: &AppConfig) -> Result<Self, DomainError> {
        let registry = AccountRegistry::from_accounts(&config.accounts, |account| {
            let client = KseiClient::new(account, &config.base_url, config.timeout)?;
            Ok(Arc::new(client) as Arc<dyn RemoteClient>)
        })?;

        Ok(Self::with_registry(registry, config.failure_policy))
    }

    pub fn with_registry(registry: AccountRegistry, policy: FailurePolicy) -> Self {
        let registry = Arc::new(registry);
        Self {
            get_portfolio_uc: GetPortfolioUseCase::new(registry.clone(), Aggregator::new(policy)),
            list_accounts_uc: ListAccountsUseCase::new(registry.clone()),
            registry,
        }
    }

    pub fn account_names(&self) -> Vec<String> {
        self.registry.names()
    }

    pub async fn query_portfolio(&self, args: &GetPortfolioArgs) -> Result<PortfolioOutcome, DomainError> {
        self.get_portfolio_uc.execute(args).await
    }

    /// `get_portfolio` tool. Remote failures are returned as `Err`.
    pub async fn get_portfolio(
        &self,
        args: &GetPortfolioArgs,
    ) -> Result<ToolResult<GetPortfolioResult>, DomainError> {
        Ok(self.query_portfolio(args).await?.into_tool_result())
    }

    /// `list_account_names` tool.
    pub fn list_account_names(&self) -> ToolResult<ListAccountNamesResult> {
        self.list_accounts_uc.execute()
    }
}
