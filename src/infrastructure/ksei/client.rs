use crate::domain::entities::account::Account;
use crate::domain::entities::holding::Holding;
use crate::domain::error::DomainError;
use crate::domain::ports::remote_client::RemoteClient;
use crate::domain::values::category::Category;
use async_trait::async_trait;
use log::debug;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::sync::Mutex;

/// KSEI AKSes client bound to one account.
///
/// Logs in on first use and keeps the session token in memory for the
/// lifetime of the client. Sibling category fetches share that token.
pub struct KseiClient {
    client: reqwest::Client,
    base_url: String,
    username: String,
    password: String,
    token: Mutex<Option<String>>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct LoginRequest<'a> {
    username: &'a str,
    password: &'a str,
    id: &'a str,
    app_type: &'a str,
}

#[derive(Debug, Deserialize)]
struct LoginResponse {
    #[serde(alias = "token")]
    validation: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PortfolioResponse {
    #[serde(default)]
    data: Vec<ShareBalance>,
}

#[derive(Debug, Deserialize)]
struct ShareBalance {
    /// "SYMBOL - Name"
    #[serde(rename = "efek", default)]
    full_name: String,
    #[serde(rename = "curr", default)]
    currency: String,
    #[serde(rename = "jumlah", default)]
    amount: f64,
    #[serde(rename = "harga", default)]
    closing_price: f64,
}

impl ShareBalance {
    fn into_holding(self) -> Holding {
        let (symbol, name) = split_full_name(&self.full_name);
        Holding::new(
            symbol,
            name,
            self.currency,
            self.amount,
            self.amount * self.closing_price,
        )
    }
}

/// Split `"BBCA - BANK CENTRAL ASIA Tbk"` into symbol and name. Without a
/// separator the whole string serves as both.
fn split_full_name(full_name: &str) -> (String, String) {
    match full_name.split_once(" - ") {
        Some((symbol, name)) => (symbol.trim().to_string(), name.trim().to_string()),
        None => (full_name.trim().to_string(), full_name.trim().to_string()),
    }
}

/// Path segment the depository uses for each category.
fn portfolio_code(category: Category) -> &'static str {
    match category {
        Category::Equity => "EKUITAS",
        Category::Bond => "OBLIGASI",
        Category::MutualFund => "REKSADANA",
    }
}

impl KseiClient {
    pub fn new(account: &Account, base_url: &str, timeout: Duration) -> Result<Self, DomainError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| DomainError::Config(format!("HTTP client error: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            username: account.username.clone(),
            password: account.password.clone(),
            token: Mutex::new(None),
        })
    }

    async fn token(&self) -> Result<String, DomainError> {
        let mut guard = self.token.lock().await;
        if let Some(token) = guard.as_ref() {
            return Ok(token.clone());
        }

        debug!("Logging in to KSEI as {}", self.username);
        let resp = self
            .client
            .post(format!("{}/login?lang=id", self.base_url))
            .json(&LoginRequest {
                username: &self.username,
                password: &self.password,
                id: "1",
                app_type: "web",
            })
            .send()
            .await
            .map_err(|e| DomainError::Remote(format!("KSEI login request failed: {e}")))?;

        if !resp.status().is_success() {
            return Err(DomainError::Remote(format!(
                "KSEI login returned {} for {}",
                resp.status(),
                self.username
            )));
        }

        let login: LoginResponse = resp
            .json()
            .await
            .map_err(|e| DomainError::Parse(format!("KSEI login response: {e}")))?;
        let token = login
            .validation
            .filter(|t| !t.is_empty())
            .ok_or_else(|| DomainError::Remote(format!("KSEI login for {} returned no token", self.username)))?;

        *guard = Some(token.clone());
        Ok(token)
    }
}

#[async_trait]
impl RemoteClient for KseiClient {
    async fn fetch_holdings(&self, category: Category) -> Result<Vec<Holding>, DomainError> {
        let token = self.token().await?;
        let url = format!(
            "{}/portofolio/summary-detail/{}",
            self.base_url,
            portfolio_code(category)
        );

        let resp = self
            .client
            .get(&url)
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| DomainError::Remote(format!("KSEI {category} request failed: {e}")))?;

        let status = resp.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            // session expired; the next query logs in again
            *self.token.lock().await = None;
        }
        if !status.is_success() {
            return Err(DomainError::Remote(format!(
                "KSEI API returned {status} for {category}"
            )));
        }

        let body: PortfolioResponse = resp
            .json()
            .await
            .map_err(|e| DomainError::Parse(format!("KSEI {category} response: {e}")))?;

        Ok(body.data.into_iter().map(ShareBalance::into_holding).collect())
    }
}
