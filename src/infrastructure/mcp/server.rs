use super::protocol::{
    CallToolParams, JsonRpcRequest, JsonRpcResponse, INTERNAL_ERROR, INVALID_PARAMS,
    METHOD_NOT_FOUND, PARSE_ERROR, PROTOCOL_VERSION,
};
use crate::application::tools::{GetPortfolioArgs, ToolResult};
use crate::domain::error::DomainError;
use crate::Portosync;
use log::{debug, info, warn};
use serde::Serialize;
use serde_json::{json, Value};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

pub const GET_PORTFOLIO: &str = "get_portfolio";
pub const LIST_ACCOUNT_NAMES: &str = "list_account_names";

/// Serves the portfolio tools over newline-delimited JSON-RPC.
pub struct McpServer {
    app: Arc<Portosync>,
}

impl McpServer {
    pub fn new(app: Arc<Portosync>) -> Self {
        Self { app }
    }

    /// Read requests from stdin until EOF, one response line per request.
    pub async fn run_stdio(&self) -> Result<(), DomainError> {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        let mut stdout = tokio::io::stdout();

        info!("Serving tools on stdio");
        while let Some(line) = lines.next_line().await? {
            if line.trim().is_empty() {
                continue;
            }
            if let Some(response) = self.handle_line(&line).await {
                let mut out = serde_json::to_string(&response)
                    .map_err(|e| DomainError::Parse(format!("Response encoding: {e}")))?;
                out.push('\n');
                stdout.write_all(out.as_bytes()).await?;
                stdout.flush().await?;
            }
        }

        info!("stdin closed, shutting down");
        Ok(())
    }

    pub async fn handle_line(&self, line: &str) -> Option<JsonRpcResponse> {
        match serde_json::from_str::<JsonRpcRequest>(line) {
            Ok(request) => self.handle(request).await,
            Err(e) => Some(JsonRpcResponse::error(
                Value::Null,
                PARSE_ERROR,
                format!("Parse error: {e}"),
            )),
        }
    }

    /// `None` for notifications, which get no reply.
    pub async fn handle(&self, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
        let Some(id) = request.id else {
            debug!("Ignoring notification {}", request.method);
            return None;
        };

        let response = match request.method.as_str() {
            "initialize" => JsonRpcResponse::result(id, initialize_result()),
            "ping" => JsonRpcResponse::result(id, json!({})),
            "tools/list" => JsonRpcResponse::result(id, json!({ "tools": tool_definitions() })),
            "tools/call" => match self.call_tool(request.params).await {
                Ok(result) => JsonRpcResponse::result(id, result),
                Err((code, message)) => JsonRpcResponse::error(id, code, message),
            },
            other => JsonRpcResponse::error(id, METHOD_NOT_FOUND, format!("Method not found: {other}")),
        };
        Some(response)
    }

    async fn call_tool(&self, params: Value) -> Result<Value, (i64, String)> {
        let params: CallToolParams = serde_json::from_value(params)
            .map_err(|e| (INVALID_PARAMS, format!("Invalid tools/call params: {e}")))?;
        info!("Tool call: {}", params.name);

        match params.name.as_str() {
            GET_PORTFOLIO => {
                let args: GetPortfolioArgs = match params.arguments {
                    Some(Value::Null) | None => GetPortfolioArgs::default(),
                    Some(arguments) => serde_json::from_value(arguments)
                        .map_err(|e| (INVALID_PARAMS, format!("Invalid arguments: {e}")))?,
                };
                let result = self.app.get_portfolio(&args).await.map_err(|e| {
                    warn!("{GET_PORTFOLIO} failed: {e}");
                    (INTERNAL_ERROR, e.to_string())
                })?;
                call_tool_result(result)
            }
            LIST_ACCOUNT_NAMES => call_tool_result(self.app.list_account_names()),
            other => Err((INVALID_PARAMS, format!("Unknown tool: {other}"))),
        }
    }
}

fn call_tool_result<T: Serialize>(result: ToolResult<T>) -> Result<Value, (i64, String)> {
    let structured = serde_json::to_value(&result.structured)
        .map_err(|e| (INTERNAL_ERROR, format!("Result encoding: {e}")))?;

    Ok(json!({
        "content": [{ "type": "text", "text": result.text }],
        "structuredContent": structured,
        "isError": result.is_error,
    }))
}

fn initialize_result() -> Value {
    json!({
        "protocolVersion": PROTOCOL_VERSION,
        "capabilities": { "tools": {} },
        "serverInfo": {
            "name": "portosync",
            "title": "PortoSync MCP Server",
            "version": crate::VERSION,
        },
    })
}

fn tool_definitions() -> Value {
    let balance = json!({
        "type": "object",
        "properties": {
            "source_type": { "type": "string", "description": "Type of the source" },
            "source_account": { "type": "string", "description": "Name of the source account" },
            "asset_symbol": { "type": "string", "description": "Symbol of the asset" },
            "asset_name": { "type": "string", "description": "Name of the asset" },
            "asset_type": { "type": "string", "description": "Type of the asset" },
            "asset_sub_type": { "type": "string", "description": "Sub-type of the asset" },
            "units_amount": { "type": "number", "description": "Amount of the asset units" },
            "units_value": { "type": "number", "description": "Total value of the asset" },
            "units_currency": { "type": "string", "description": "Currency of the asset units" },
        },
        "required": [
            "source_type", "source_account", "asset_symbol", "asset_name", "asset_type",
            "asset_sub_type", "units_amount", "units_value", "units_currency",
        ],
    });

    json!([
        {
            "name": GET_PORTFOLIO,
            "description": "Get consolidated portfolio from Portosync",
            "inputSchema": {
                "type": "object",
                "properties": {
                    "account_names": {
                        "type": "array",
                        "items": { "type": "string" },
                        "description": "List of account names, empty means all",
                    },
                },
            },
            "outputSchema": {
                "type": "object",
                "properties": {
                    "balances": {
                        "type": "array",
                        "items": balance,
                        "description": "List of account balances",
                    },
                },
                "required": ["balances"],
            },
        },
        {
            "name": LIST_ACCOUNT_NAMES,
            "description": "List the names of all configured accounts",
            "inputSchema": { "type": "object", "properties": {} },
            "outputSchema": {
                "type": "object",
                "properties": {
                    "account_names": {
                        "type": "array",
                        "items": { "type": "string" },
                        "description": "List of account names",
                    },
                },
                "required": ["account_names"],
            },
        },
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::account_registry::AccountRegistry;
    use crate::domain::values::failure_policy::FailurePolicy;

    fn empty_server() -> McpServer {
        McpServer::new(Arc::new(Portosync::with_registry(
            AccountRegistry::default(),
            FailurePolicy::FailFast,
        )))
    }

    #[tokio::test]
    async fn test_initialize_reports_server_info() {
        let server = empty_server();
        let resp = server
            .handle_line(r#"{"jsonrpc":"2.0","id":1,"method":"initialize","params":{}}"#)
            .await
            .unwrap();

        let result = resp.result.unwrap();
        assert_eq!(result["serverInfo"]["name"], "portosync");
        assert_eq!(result["protocolVersion"], PROTOCOL_VERSION);
        assert!(resp.error.is_none());
    }

    #[tokio::test]
    async fn test_notification_gets_no_reply() {
        let server = empty_server();
        let resp = server
            .handle_line(r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#)
            .await;
        assert!(resp.is_none());
    }

    #[tokio::test]
    async fn test_tools_list_names_both_tools() {
        let server = empty_server();
        let resp = server
            .handle_line(r#"{"jsonrpc":"2.0","id":2,"method":"tools/list"}"#)
            .await
            .unwrap();

        let tools = resp.result.unwrap()["tools"].clone();
        let names: Vec<&str> = tools
            .as_array()
            .unwrap()
            .iter()
            .map(|t| t["name"].as_str().unwrap())
            .collect();
        assert_eq!(names, vec![GET_PORTFOLIO, LIST_ACCOUNT_NAMES]);
    }

    #[tokio::test]
    async fn test_list_account_names_on_empty_registry() {
        let server = empty_server();
        let resp = server
            .handle_line(r#"{"jsonrpc":"2.0","id":3,"method":"tools/call","params":{"name":"list_account_names","arguments":{}}}"#)
            .await
            .unwrap();

        let result = resp.result.unwrap();
        assert_eq!(result["content"][0]["text"], "No accounts configured");
        assert_eq!(result["structuredContent"]["account_names"], json!([]));
        assert_eq!(result["isError"], false);
    }

    #[tokio::test]
    async fn test_get_portfolio_on_empty_registry_is_soft_error() {
        let server = empty_server();
        let resp = server
            .handle_line(r#"{"jsonrpc":"2.0","id":4,"method":"tools/call","params":{"name":"get_portfolio"}}"#)
            .await
            .unwrap();

        let result = resp.result.unwrap();
        assert_eq!(result["isError"], true);
        assert!(result["content"][0]["text"]
            .as_str()
            .unwrap()
            .starts_with("Selected accounts not found"));
    }

    #[tokio::test]
    async fn test_get_portfolio_null_account_names_selects_all() {
        let server = empty_server();
        let resp = server
            .handle_line(r#"{"jsonrpc":"2.0","id":7,"method":"tools/call","params":{"name":"get_portfolio","arguments":{"account_names":null}}}"#)
            .await
            .unwrap();

        assert!(resp.error.is_none());
        let result = resp.result.unwrap();
        assert_eq!(result["isError"], true);
        assert_eq!(
            result["content"][0]["text"],
            "Selected accounts not found, available accounts are "
        );
    }

    #[tokio::test]
    async fn test_errors() {
        let server = empty_server();

        let parse = server.handle_line("not json").await.unwrap();
        assert_eq!(parse.error.unwrap().code, PARSE_ERROR);
        assert_eq!(parse.id, Value::Null);

        let method = server
            .handle_line(r#"{"jsonrpc":"2.0","id":5,"method":"resources/list"}"#)
            .await
            .unwrap();
        assert_eq!(method.error.unwrap().code, METHOD_NOT_FOUND);

        let tool = server
            .handle_line(r#"{"jsonrpc":"2.0","id":6,"method":"tools/call","params":{"name":"sell_everything"}}"#)
            .await
            .unwrap();
        assert_eq!(tool.error.unwrap().code, INVALID_PARAMS);
        assert_eq!(tool.id, json!(6));
    }
}
