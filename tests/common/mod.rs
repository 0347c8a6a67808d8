//! Shared test helpers.

use async_trait::async_trait;
use portosync::application::account_registry::AccountRegistry;
use portosync::domain::entities::holding::Holding;
use portosync::domain::error::DomainError;
use portosync::domain::ports::remote_client::RemoteClient;
use portosync::domain::values::category::Category;
use portosync::domain::values::failure_policy::FailurePolicy;
use portosync::Portosync;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// In-memory depository client with canned responses per category.
/// Categories without a response return no holdings.
#[derive(Default)]
pub struct StubClient {
    holdings: HashMap<Category, Vec<Holding>>,
    failures: HashMap<Category, String>,
    delay: Option<Duration>,
    calls: AtomicUsize,
    completed: AtomicUsize,
}

impl StubClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, category: Category, holdings: Vec<Holding>) -> Self {
        self.holdings.insert(category, holdings);
        self
    }

    pub fn failing(mut self, category: Category, message: &str) -> Self {
        self.failures.insert(category, message.to_string());
        self
    }

    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn completed(&self) -> usize {
        self.completed.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RemoteClient for StubClient {
    async fn fetch_holdings(&self, category: Category) -> Result<Vec<Holding>, DomainError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.completed.fetch_add(1, Ordering::SeqCst);

        if let Some(message) = self.failures.get(&category) {
            return Err(DomainError::Remote(message.clone()));
        }
        Ok(self.holdings.get(&category).cloned().unwrap_or_default())
    }
}

pub fn holding(symbol: &str, amount: f64, value: f64) -> Holding {
    Holding::new(symbol, format!("{symbol} Tbk"), "IDR", amount, value)
}

pub fn registry(clients: Vec<(&str, Arc<StubClient>)>) -> AccountRegistry {
    AccountRegistry::new(
        clients
            .into_iter()
            .map(|(name, client)| (name.to_string(), client as Arc<dyn RemoteClient>)),
    )
}

pub fn setup(clients: Vec<(&str, Arc<StubClient>)>) -> Portosync {
    Portosync::with_registry(registry(clients), FailurePolicy::FailFast)
}

/// alice holds one BBCA position, bob holds nothing.
pub fn alice_and_bob() -> Portosync {
    let alice = Arc::new(StubClient::new().with(
        Category::Equity,
        vec![Holding::new("BBCA", "Bank Central Asia Tbk", "IDR", 100.0, 50000.0)],
    ));
    let bob = Arc::new(StubClient::new());
    setup(vec![("alice", alice), ("bob", bob)])
}
