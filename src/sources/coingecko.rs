use serde::Deserialize;

use crate::config::CoinGeckoConfig;

use super::{get_json, SourceError};

#[derive(Debug, Deserialize)]
pub struct CoinResponse {
    pub market_data: MarketData,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MarketData {
    #[serde(default)]
    pub current_price: CurrentPrice,
    #[serde(default)]
    pub sparkline_7d: Option<Sparkline>,
}

/// Only the USD quote is read; the other currencies are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CurrentPrice {
    pub usd: Option<f64>,
}

/// Hourly prices over the last seven days, oldest first.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Sparkline {
    #[serde(default)]
    pub price: Vec<f64>,
}

#[derive(Debug, Clone)]
pub struct CoinGeckoClient {
    http: reqwest::Client,
    url: String,
    coin_id: String,
}

impl CoinGeckoClient {
    pub fn new(http: reqwest::Client, config: &CoinGeckoConfig) -> Self {
        Self {
            http,
            url: config.url.trim_end_matches('/').to_string(),
            coin_id: config.coin_id.clone(),
        }
    }

    pub async fn market_data(&self) -> Result<MarketData, SourceError> {
        let url = format!("{}/coins/{}", self.url, self.coin_id);
        let query = [
            ("localization", "false".to_string()),
            ("tickers", "false".to_string()),
            ("market_data", "true".to_string()),
            ("community_data", "false".to_string()),
            ("developer_data", "false".to_string()),
            ("sparkline", "true".to_string()),
        ];

        let response: CoinResponse = get_json(&self.http, &url, &query, "coin market data").await?;
        Ok(response.market_data)
    }
}
