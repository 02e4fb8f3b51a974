use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value as JsonValue;

use crate::burn::types::TransferRecord;
use crate::config::BaseScanConfig;

use super::{get_json, SourceError};

const API: &str = "BaseScan";

/// Every explorer response is wrapped as `{status, message, result}`.
/// `status` is `"1"` on success; on failure `result` usually holds a
/// human-readable reason.
#[derive(Debug, Deserialize)]
pub struct Envelope {
    pub status: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub result: JsonValue,
}

impl Envelope {
    fn is_ok(&self) -> bool {
        self.status == "1"
    }

    fn upstream_error(&self) -> SourceError {
        let detail = match &self.result {
            JsonValue::String(s) => s.clone(),
            other => other.to_string(),
        };
        SourceError::Upstream {
            api: API,
            message: format!("{} ({})", self.message, detail),
        }
    }

    fn decode<T: DeserializeOwned>(self, what: &'static str) -> Result<T, SourceError> {
        if !self.is_ok() {
            return Err(self.upstream_error());
        }
        serde_json::from_value(self.result).map_err(|source| SourceError::Decode { what, source })
    }
}

/// `tokenprice` and `tokeninfo` answer with either an object or a
/// one-element array depending on the endpoint version.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum OneOrMany<T> {
    Many(Vec<T>),
    One(T),
}

impl<T> OneOrMany<T> {
    fn into_first(self) -> Option<T> {
        match self {
            Self::Many(items) => items.into_iter().next(),
            Self::One(item) => Some(item),
        }
    }
}

#[derive(Debug, Deserialize)]
struct TokenPrice {
    #[serde(rename = "usdPrice", default)]
    usd_price: Option<JsonValue>,
}

#[derive(Debug, Deserialize)]
struct TokenInfo {
    #[serde(rename = "totalSupply", default)]
    total_supply: Option<JsonValue>,
}

/// Numbers sometimes arrive quoted and sometimes bare.
fn scalar_text(value: Option<JsonValue>) -> Option<String> {
    match value? {
        JsonValue::String(s) => Some(s),
        JsonValue::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

pub fn decode_transfers(envelope: Envelope) -> Result<Vec<TransferRecord>, SourceError> {
    if !envelope.is_ok() && envelope.message.starts_with("No transactions found") {
        return Ok(Vec::new());
    }
    envelope.decode("token transfers")
}

/// Returns the raw `usdPrice` text, if the explorer sent one.
pub fn decode_price(envelope: Envelope) -> Result<Option<String>, SourceError> {
    let quotes: OneOrMany<TokenPrice> = envelope.decode("token price")?;
    Ok(quotes.into_first().and_then(|q| scalar_text(q.usd_price)))
}

/// Returns the raw base-unit `totalSupply` text, if present.
pub fn decode_total_supply(envelope: Envelope) -> Result<Option<String>, SourceError> {
    let info: OneOrMany<TokenInfo> = envelope.decode("token info")?;
    Ok(info.into_first().and_then(|i| scalar_text(i.total_supply)))
}

/// Client for the BaseScan (Etherscan-compatible) API, bound to one token contract.
#[derive(Debug, Clone)]
pub struct BaseScanClient {
    http: reqwest::Client,
    url: String,
    api_key: Option<String>,
    contract_address: String,
    page: u32,
    offset: u32,
}

impl BaseScanClient {
    pub fn new(http: reqwest::Client, config: &BaseScanConfig, contract_address: &str) -> Self {
        Self {
            http,
            url: config.url.clone(),
            api_key: config.api_key.clone(),
            contract_address: contract_address.to_string(),
            page: config.page,
            offset: config.offset,
        }
    }

    fn query(&self, module: &str, action: &str) -> Vec<(&'static str, String)> {
        let mut query = vec![
            ("module", module.to_string()),
            ("action", action.to_string()),
            ("contractaddress", self.contract_address.clone()),
        ];
        if let Some(key) = &self.api_key {
            query.push(("apikey", key.clone()));
        }
        query
    }

    pub async fn token_price(&self) -> Result<Option<String>, SourceError> {
        let query = self.query("stats", "tokenprice");
        let envelope: Envelope = get_json(&self.http, &self.url, &query, "token price").await?;
        decode_price(envelope)
    }

    /// One page of transfers, in the explorer's default (ascending) order.
    pub async fn token_transfers(&self) -> Result<Vec<TransferRecord>, SourceError> {
        let mut query = self.query("account", "tokentx");
        query.push(("page", self.page.to_string()));
        query.push(("offset", self.offset.to_string()));

        let envelope: Envelope =
            get_json(&self.http, &self.url, &query, "token transfers").await?;
        let transfers = decode_transfers(envelope)?;

        tracing::debug!(
            contract = %self.contract_address,
            count = transfers.len(),
            "Fetched token transfers"
        );
        Ok(transfers)
    }

    pub async fn total_supply(&self) -> Result<Option<String>, SourceError> {
        let query = self.query("stats", "tokeninfo");
        let envelope: Envelope = get_json(&self.http, &self.url, &query, "token info").await?;
        decode_total_supply(envelope)
    }
}
