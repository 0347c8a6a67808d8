use crate::application::account_registry::AccountRegistry;
use crate::application::aggregate::Aggregator;
use crate::application::format;
use crate::application::tools::{GetPortfolioArgs, GetPortfolioResult, ToolResult};
use crate::domain::error::DomainError;
use log::info;
use std::sync::Arc;

/// How a portfolio query ended, short of a hard failure.
#[derive(Debug, Clone, PartialEq)]
pub enum PortfolioOutcome {
    Success(GetPortfolioResult),
    /// No requested name matched a registered account.
    SelectionEmpty { available_accounts: Vec<String> },
    /// Accounts were queried but hold nothing.
    NoBalances,
}

impl PortfolioOutcome {
    pub fn into_tool_result(self) -> ToolResult<GetPortfolioResult> {
        match self {
            PortfolioOutcome::Success(result) => {
                let text = result.description();
                ToolResult::success(text, result)
            }
            PortfolioOutcome::SelectionEmpty { available_accounts } => ToolResult::soft_error(
                format::describe_selection_empty(&available_accounts),
                GetPortfolioResult::default(),
            ),
            PortfolioOutcome::NoBalances => ToolResult::soft_error(
                format::NO_BALANCES.to_string(),
                GetPortfolioResult::default(),
            ),
        }
    }
}

pub struct GetPortfolioUseCase {
    registry: Arc<AccountRegistry>,
    aggregator: Aggregator,
}

impl GetPortfolioUseCase {
    pub fn new(registry: Arc<AccountRegistry>, aggregator: Aggregator) -> Self {
        Self {
            registry,
            aggregator,
        }
    }

    pub async fn execute(&self, args: &GetPortfolioArgs) -> Result<PortfolioOutcome, DomainError> {
        let clients = self.registry.resolve(&args.account_names);
        if clients.is_empty() {
            info!("No registered account matches {:?}", args.account_names);
            return Ok(PortfolioOutcome::SelectionEmpty {
                available_accounts: self.registry.names(),
            });
        }

        info!(
            "Fetching portfolio for {} account(s) with {} policy",
            clients.len(),
            self.aggregator.policy()
        );
        let aggregated = self.aggregator.execute(&clients).await?;

        if aggregated.balances.is_empty() {
            return Ok(PortfolioOutcome::NoBalances);
        }

        Ok(PortfolioOutcome::Success(GetPortfolioResult {
            balances: aggregated.balances,
            failures: aggregated.failures,
        }))
    }
}
