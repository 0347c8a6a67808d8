mod common;

use common::{alice_and_bob, holding, registry, setup, StubClient};
use portosync::application::get_portfolio::PortfolioOutcome;
use portosync::application::tools::GetPortfolioArgs;
use portosync::domain::error::DomainError;
use portosync::domain::values::category::Category;
use portosync::domain::values::failure_policy::FailurePolicy;
use portosync::Portosync;
use std::sync::Arc;

fn args(names: &[&str]) -> GetPortfolioArgs {
    GetPortfolioArgs {
        account_names: names.iter().map(|n| n.to_string()).collect(),
    }
}

#[tokio::test]
async fn test_all_accounts_by_default() {
    let app = alice_and_bob();

    let result = app.get_portfolio(&GetPortfolioArgs::default()).await.unwrap();

    assert!(!result.is_error);
    assert_eq!(result.structured.balances.len(), 1);
    let balance = &result.structured.balances[0];
    assert_eq!(balance.source_account, "alice");
    assert_eq!(balance.asset_symbol, "BBCA");
    assert_eq!(balance.units_amount, 100.0);
    assert_eq!(balance.units_value, 50000.0);
    assert_eq!(balance.units_currency, "IDR");
    assert!(result.text.starts_with("Portfolio:\n- BBCA "));
    assert_eq!(
        result.text,
        "Portfolio:\n- BBCA Bank Central Asia Tbk: 100 units of equity, total value IDR 50000 (alice)"
    );
}

#[tokio::test]
async fn test_unknown_account_is_selection_empty() {
    let app = alice_and_bob();

    let outcome = app.query_portfolio(&args(&["carol"])).await.unwrap();
    assert_eq!(
        outcome,
        PortfolioOutcome::SelectionEmpty {
            available_accounts: vec!["alice".into(), "bob".into()],
        }
    );

    let result = app.get_portfolio(&args(&["carol"])).await.unwrap();
    assert!(result.is_error);
    assert_eq!(
        result.text,
        "Selected accounts not found, available accounts are alice, bob"
    );
    assert!(result.structured.balances.is_empty());
}

#[tokio::test]
async fn test_accounts_without_holdings_is_no_balances() {
    let app = alice_and_bob();

    let outcome = app.query_portfolio(&args(&["bob"])).await.unwrap();
    assert_eq!(outcome, PortfolioOutcome::NoBalances);

    let result = app.get_portfolio(&args(&["bob"])).await.unwrap();
    assert!(result.is_error);
    assert_eq!(result.text, "No portfolio balances found for selected accounts");
}

#[tokio::test]
async fn test_mixed_selection_only_queries_known_accounts() {
    let alice = Arc::new(StubClient::new().with(Category::Bond, vec![holding("FR0091", 1.0, 1000000.0)]));
    let bob = Arc::new(StubClient::new());
    let app = setup(vec![("alice", alice.clone()), ("bob", bob.clone())]);

    let result = app.get_portfolio(&args(&["carol", "alice"])).await.unwrap();

    assert!(!result.is_error);
    assert_eq!(result.structured.balances.len(), 1);
    assert_eq!(result.structured.balances[0].asset_type, "bond");
    assert_eq!(alice.calls(), 3);
    assert_eq!(bob.calls(), 0);
}

#[tokio::test]
async fn test_empty_registry_is_selection_empty() {
    let app = setup(vec![]);

    let result = app.get_portfolio(&GetPortfolioArgs::default()).await.unwrap();

    assert!(result.is_error);
    assert_eq!(result.text, "Selected accounts not found, available accounts are ");
}

#[tokio::test]
async fn test_remote_failure_is_hard_error() {
    let alice = Arc::new(
        StubClient::new()
            .with(Category::Equity, vec![holding("BBCA", 100.0, 50000.0)])
            .failing(Category::MutualFund, "503 Service Unavailable"),
    );
    let app = setup(vec![("alice", alice)]);

    let err = app.get_portfolio(&GetPortfolioArgs::default()).await.unwrap_err();

    assert!(matches!(err, DomainError::Fetch { .. }));
    assert!(err.to_string().contains("503 Service Unavailable"));
}

#[tokio::test]
async fn test_partial_policy_reports_failed_branches() {
    let alice = Arc::new(
        StubClient::new()
            .with(Category::Equity, vec![holding("BBCA", 100.0, 50000.0)])
            .failing(Category::MutualFund, "timeout"),
    );
    let app = Portosync::with_registry(registry(vec![("alice", alice)]), FailurePolicy::Partial);

    let result = app.get_portfolio(&GetPortfolioArgs::default()).await.unwrap();

    assert!(!result.is_error);
    assert_eq!(result.structured.balances.len(), 1);
    assert_eq!(result.structured.failures.len(), 1);
    assert!(result.text.starts_with("Portfolio:\n- BBCA "));
    assert!(result.text.contains("\nFailed branches:\n- alice/mutual_fund: "));

    let json = serde_json::to_value(&result.structured).unwrap();
    assert_eq!(json["failures"][0]["category"], "mutual_fund");
}

#[tokio::test]
async fn test_structured_balance_fields() {
    let app = alice_and_bob();

    let result = app.get_portfolio(&GetPortfolioArgs::default()).await.unwrap();
    let json = serde_json::to_value(&result.structured).unwrap();

    assert_eq!(
        json,
        serde_json::json!({
            "balances": [{
                "source_type": "ksei",
                "source_account": "alice",
                "asset_symbol": "BBCA",
                "asset_name": "Bank Central Asia Tbk",
                "asset_type": "equity",
                "asset_sub_type": "",
                "units_amount": 100.0,
                "units_value": 50000.0,
                "units_currency": "IDR"
            }]
        })
    );
}

#[tokio::test]
async fn test_null_account_names_query_all_accounts() {
    let app = alice_and_bob();
    let args: GetPortfolioArgs = serde_json::from_value(serde_json::json!({ "account_names": null })).unwrap();

    let result = app.get_portfolio(&args).await.unwrap();

    assert!(!result.is_error);
    assert_eq!(result.structured.balances.len(), 1);
    assert_eq!(result.structured.balances[0].source_account, "alice");
}
