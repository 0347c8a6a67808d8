use crate::application::account_registry::AccountRegistry;
use crate::application::tools::{ListAccountNamesResult, ToolResult};
use std::sync::Arc;

pub struct ListAccountsUseCase {
    registry: Arc<AccountRegistry>,
}

impl ListAccountsUseCase {
    pub fn new(registry: Arc<AccountRegistry>) -> Self {
        Self { registry }
    }

    /// Never fails; an empty registry is reported in the text only.
    pub fn execute(&self) -> ToolResult<ListAccountNamesResult> {
        let result = ListAccountNamesResult {
            account_names: self.registry.names(),
        };
        ToolResult::success(result.description(), result)
    }
}
