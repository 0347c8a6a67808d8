use crate::domain::entities::account::Account;
use crate::domain::error::DomainError;
use crate::domain::ports::remote_client::RemoteClient;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Clients picked for one query, keyed (and therefore ordered) by account name.
pub type ClientSelection = BTreeMap<String, Arc<dyn RemoteClient>>;

/// Fixed mapping from account name to its depository client.
///
/// Built once at startup and read-only afterwards. Names are case-sensitive;
/// registering a name twice keeps the later client.
#[derive(Clone, Default)]
pub struct AccountRegistry {
    clients: ClientSelection,
}

impl AccountRegistry {
    pub fn new<I, S>(clients: I) -> Self
    where
        I: IntoIterator<Item = (S, Arc<dyn RemoteClient>)>,
        S: Into<String>,
    {
        let mut map = BTreeMap::new();
        for (name, client) in clients {
            map.insert(name.into(), client);
        }
        Self { clients: map }
    }

    /// Build a client for every configured account, in configuration order.
    pub fn from_accounts<F>(accounts: &[Account], mut connect: F) -> Result<Self, DomainError>
    where
        F: FnMut(&Account) -> Result<Arc<dyn RemoteClient>, DomainError>,
    {
        let mut clients = Vec::with_capacity(accounts.len());
        for account in accounts {
            clients.push((account.name.clone(), connect(account)?));
        }
        Ok(Self::new(clients))
    }

    /// Clients for the requested names; every client when `names` is empty.
    ///
    /// Unknown names are dropped silently. The returned map is a copy, so
    /// callers never alias the registry itself.
    pub fn resolve(&self, names: &[String]) -> ClientSelection {
        if names.is_empty() {
            return self.clients.clone();
        }

        names
            .iter()
            .filter_map(|name| {
                self.clients
                    .get(name)
                    .map(|client| (name.clone(), Arc::clone(client)))
            })
            .collect()
    }

    /// All registered names, sorted.
    pub fn names(&self) -> Vec<String> {
        self.clients.keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.clients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clients.is_empty()
    }
}
