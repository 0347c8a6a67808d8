//! Startup configuration read from the environment.

use crate::domain::entities::account::Account;
use crate::domain::error::DomainError;
use crate::domain::values::failure_policy::FailurePolicy;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://akses.ksei.co.id/service";
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub accounts: Vec<Account>,
    pub base_url: String,
    pub timeout: Duration,
    pub failure_policy: FailurePolicy,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            accounts: Vec::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            failure_policy: FailurePolicy::default(),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, DomainError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the config from any key lookup; unset and empty values fall back
    /// to the defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, DomainError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = AppConfig::default();

        if let Some(raw) = get("KSEI_ACCOUNTS") {
            config.accounts = parse_accounts(&raw);
        }
        if let Some(url) = get("KSEI_BASE_URL") {
            config.base_url = url.trim().trim_end_matches('/').to_string();
        }
        if let Some(secs) = get("KSEI_TIMEOUT_SECS") {
            let secs: u64 = secs.trim().parse().map_err(|e| {
                DomainError::Config(format!("KSEI_TIMEOUT_SECS must be a whole number of seconds: {e}"))
            })?;
            config.timeout = Duration::from_secs(secs);
        }
        if let Some(policy) = get("PORTOSYNC_FAILURE_POLICY") {
            config.failure_policy = policy.parse().map_err(DomainError::Config)?;
        }

        Ok(config)
    }
}

/// Parse `name:username:password` entries separated by commas.
///
/// The password keeps any further colons. Entries with fewer than three parts
/// or an empty name are skipped. A repeated name replaces the earlier entry
/// in place, so the later credentials win.
pub fn parse_accounts(s: &str) -> Vec<Account> {
    let mut accounts: Vec<Account> = Vec::new();

    for entry in s.split(',') {
        let parts: Vec<&str> = entry.splitn(3, ':').map(str::trim).collect();
        let [name, username, password] = parts.as_slice() else {
            continue;
        };
        if name.is_empty() {
            continue;
        }

        let account = Account::new(*name, *username, *password);
        match accounts.iter_mut().find(|a| a.name == account.name) {
            Some(existing) => *existing = account,
            None => accounts.push(account),
        }
    }

    accounts
}
