//! Concurrent fan-out over (account, category) branches.
//!
//! Every branch runs as its own tokio task with no admission control; the
//! fan-out is bounded by `accounts × Category::ALL`. Converted balances are
//! appended to a single mutex-guarded accumulator, and the caller is blocked
//! until every dispatched task has finished. In-flight calls are never
//! cancelled: under fail-fast a failure only discards the results.

use crate::application::account_registry::ClientSelection;
use crate::domain::entities::balance::Balance;
use crate::domain::error::DomainError;
use crate::domain::values::category::Category;
use crate::domain::values::failure_policy::FailurePolicy;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;

/// A branch that failed under [`FailurePolicy::Partial`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BranchFailure {
    pub account: String,
    pub category: Category,
    pub error: String,
}

/// Result of a fan-out run that did not fail as a whole.
#[derive(Debug, Default)]
pub struct Aggregated {
    pub balances: Vec<Balance>,
    pub failures: Vec<BranchFailure>,
}

struct FanOut {
    balances: Vec<Balance>,
    errors: Vec<(String, Category, DomainError)>,
}

pub struct Aggregator {
    policy: FailurePolicy,
}

impl Aggregator {
    pub fn new(policy: FailurePolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> FailurePolicy {
        self.policy
    }

    pub async fn execute(&self, clients: &ClientSelection) -> Result<Aggregated, DomainError> {
        match self.policy {
            FailurePolicy::FailFast => Ok(Aggregated {
                balances: fetch_all(clients).await?,
                failures: Vec::new(),
            }),
            FailurePolicy::Partial => fetch_partial(clients).await,
        }
    }
}

/// Fetch every category of every client, failing the whole run on the first
/// failed branch. Balances gathered by sibling branches are discarded then.
///
/// "First" is by dispatch order (account name, then category), not by
/// completion time, so the surfaced error is deterministic.
pub async fn fetch_all(clients: &ClientSelection) -> Result<Vec<Balance>, DomainError> {
    let fan_out = run(clients).await;

    if let Some((_, _, err)) = fan_out.errors.into_iter().next() {
        return Err(err);
    }

    Ok(fan_out.balances)
}

/// Like [`fetch_all`] but keeps the balances of successful branches.
///
/// Still fails when nothing was gathered and at least one branch failed.
pub async fn fetch_partial(clients: &ClientSelection) -> Result<Aggregated, DomainError> {
    let fan_out = run(clients).await;

    if fan_out.balances.is_empty() {
        if let Some((_, _, err)) = fan_out.errors.into_iter().next() {
            return Err(err);
        }
        return Ok(Aggregated::default());
    }

    let failures = fan_out
        .errors
        .into_iter()
        .map(|(account, category, err)| BranchFailure {
            account,
            category,
            error: err.to_string(),
        })
        .collect();

    Ok(Aggregated {
        balances: fan_out.balances,
        failures,
    })
}

async fn run(clients: &ClientSelection) -> FanOut {
    let accumulator: Arc<Mutex<Vec<Balance>>> = Arc::new(Mutex::new(Vec::new()));
    let mut handles: Vec<(String, Category, JoinHandle<Result<(), DomainError>>)> =
        Vec::with_capacity(clients.len() * Category::ALL.len());

    for (account, client) in clients {
        for category in Category::ALL {
            let account_name = account.clone();
            let client = Arc::clone(client);
            let accumulator = Arc::clone(&accumulator);

            debug!("Dispatching {category} fetch for account {account_name}");
            let handle = tokio::spawn(async move {
                let holdings = client
                    .fetch_holdings(category)
                    .await
                    .map_err(|e| DomainError::Fetch {
                        account: account_name.clone(),
                        category,
                        source: Box::new(e),
                    })?;

                let converted: Vec<Balance> = holdings
                    .into_iter()
                    .map(|h| Balance::from_holding(&account_name, category, h))
                    .collect();
                debug!(
                    "Fetched {} {category} balances for account {account_name}",
                    converted.len()
                );

                accumulator.lock().await.extend(converted);
                Ok::<(), DomainError>(())
            });
            handles.push((account.clone(), category, handle));
        }
    }

    let mut errors = Vec::new();
    for (account, category, handle) in handles {
        let outcome = match handle.await {
            Ok(outcome) => outcome,
            Err(e) => Err(DomainError::Task(format!(
                "{category} fetch for account {account} did not complete: {e}"
            ))),
        };
        if let Err(err) = outcome {
            warn!("{err}");
            errors.push((account, category, err));
        }
    }

    let mut balances = std::mem::take(&mut *accumulator.lock().await);
    sort_balances(&mut balances);

    FanOut { balances, errors }
}

/// Stable sort by account, then category order, then symbol.
pub fn sort_balances(balances: &mut [Balance]) {
    balances.sort_by(|a, b| {
        a.source_account
            .cmp(&b.source_account)
            .then_with(|| compare_asset_type(&a.asset_type, &b.asset_type))
            .then_with(|| a.asset_symbol.cmp(&b.asset_symbol))
    });
}

fn compare_asset_type(a: &str, b: &str) -> Ordering {
    match (a.parse::<Category>(), b.parse::<Category>()) {
        (Ok(a), Ok(b)) => a.cmp(&b),
        (Ok(_), Err(_)) => Ordering::Less,
        (Err(_), Ok(_)) => Ordering::Greater,
        (Err(_), Err(_)) => a.cmp(b),
    }
}
