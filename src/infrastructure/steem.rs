//! # Steem JSON-RPC Client
//!
//! `SteemData` over a Steem API node (`condenser_api.get_accounts`, `condenser_api.get_content`).

use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};

use crate::domain::traits::SteemData;
use crate::domain::types::{SteemAccount, SteemPost};

#[derive(Debug, Deserialize)]
struct RpcResponse<T> {
    result: Option<T>,
    error: Option<RpcError>,
}

#[derive(Debug, Deserialize)]
struct RpcError {
    message: String,
}

impl<T> RpcResponse<T> {
    fn into_result(self, method: &str) -> Result<Option<T>> {
        match self.error {
            Some(e) => Err(anyhow!("{method} failed: {}", e.message)),
            None => Ok(self.result),
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawAccount {
    name: String,
    balance: String,
    sbd_balance: String,
    vesting_shares: String,
    #[serde(default)]
    post_count: u64,
    /// Nodes return this as either a number or a numeric string.
    #[serde(default)]
    reputation: Value,
}

impl From<RawAccount> for SteemAccount {
    fn from(raw: RawAccount) -> Self {
        let reputation = match &raw.reputation {
            Value::Number(n) => n.as_i64().unwrap_or_default(),
            Value::String(s) => s.parse().unwrap_or_default(),
            _ => 0,
        };
        SteemAccount {
            name: raw.name,
            balance: raw.balance,
            sbd_balance: raw.sbd_balance,
            vesting_shares: raw.vesting_shares,
            post_count: raw.post_count,
            reputation,
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawContent {
    author: String,
    permlink: String,
    title: String,
    #[serde(default)]
    net_votes: i64,
    #[serde(default)]
    children: u64,
    #[serde(default)]
    pending_payout_value: String,
    #[serde(default)]
    created: String,
}

impl RawContent {
    /// The node answers with an empty author for posts that do not exist.
    fn into_post(self) -> Option<SteemPost> {
        if self.author.is_empty() {
            return None;
        }
        Some(SteemPost {
            author: self.author,
            permlink: self.permlink,
            title: self.title,
            net_votes: self.net_votes,
            children: self.children,
            pending_payout_value: self.pending_payout_value,
            created: self.created,
        })
    }
}

pub struct SteemClient {
    client: Client,
    url: String,
}

impl SteemClient {
    pub fn new(client: Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }

    async fn call<T: DeserializeOwned>(&self, method: &str, params: Value) -> Result<Option<T>> {
        let body = json!({
            "jsonrpc": "2.0",
            "method": method,
            "params": params,
            "id": 1,
        });
        let response: RpcResponse<T> = self
            .client
            .post(&self.url)
            .json(&body)
            .send()
            .await
            .with_context(|| format!("POST {} ({method})", self.url))?
            .error_for_status()?
            .json()
            .await
            .with_context(|| format!("Failed to decode {method} response"))?;
        response.into_result(method)
    }
}

#[async_trait]
impl SteemData for SteemClient {
    async fn account(&self, name: &str) -> Result<Option<SteemAccount>> {
        let accounts: Option<Vec<RawAccount>> = self
            .call("condenser_api.get_accounts", json!([[name]]))
            .await?;
        Ok(accounts
            .and_then(|a| a.into_iter().next())
            .map(SteemAccount::from))
    }

    async fn post(&self, author: &str, permlink: &str) -> Result<Option<SteemPost>> {
        let content: Option<RawContent> = self
            .call("condenser_api.get_content", json!([author, permlink]))
            .await?;
        Ok(content.and_then(RawContent::into_post))
    }
}
