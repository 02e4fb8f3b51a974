use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use eyre::WrapErr;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

use crate::burn::aggregator::aggregate;
use crate::burn::format;
use crate::burn::types::{AggregationResult, BurnParams};
use crate::burn::watch::SupplyWatch;
use crate::config::Config;
use crate::price::trend::{self, PriceTrend};
use crate::sources::basescan::BaseScanClient;
use crate::sources::coingecko::CoinGeckoClient;
use crate::sources::{self, SourceError};
use crate::tokens::registry;

/// One refresh worth of burn data.
#[derive(Debug, Clone, Serialize)]
pub struct BurnReport {
    pub token: String,
    pub contract_address: String,
    pub unit_price_usd: Option<BigDecimal>,
    pub total_supply: Option<BigDecimal>,
    #[serde(flatten)]
    pub result: AggregationResult,
    pub generated_at: DateTime<Utc>,
}

/// Fetches the inputs for one token and runs the burn aggregation over them.
/// Holds no state between refreshes.
pub struct BurnPipeline {
    basescan: BaseScanClient,
    coingecko: CoinGeckoClient,
    params: BurnParams,
    symbol: String,
    contract_address: String,
}

impl BurnPipeline {
    pub fn init(config: &Config) -> eyre::Result<Self> {
        let params = registry::burn_params(&config.token, &config.matching)?;
        let http = sources::http_client(Duration::from_secs(config.http.timeout_secs))
            .map_err(|e| eyre::eyre!("Failed to build HTTP client: {}", e))?;

        Ok(Self {
            basescan: BaseScanClient::new(
                http.clone(),
                &config.basescan,
                &config.token.contract_address,
            ),
            coingecko: CoinGeckoClient::new(http, &config.coingecko),
            params,
            symbol: config.token.symbol.clone(),
            contract_address: config.token.contract_address.clone(),
        })
    }

    pub fn params(&self) -> &BurnParams {
        &self.params
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn contract_address(&self) -> &str {
        &self.contract_address
    }

    pub async fn refresh(&self) -> eyre::Result<BurnReport> {
        self.refresh_with(&self.params).await
    }

    /// Fetch price, transfers and total supply concurrently, then aggregate.
    ///
    /// Only the transfer list is mandatory. A failed or unparsable price
    /// becomes "no price", which the aggregator rejects only if there is
    /// something to convert; a failed total supply becomes "unknown".
    pub async fn refresh_with(&self, params: &BurnParams) -> eyre::Result<BurnReport> {
        let (price, transfers, supply) = futures::join!(
            self.basescan.token_price(),
            self.basescan.token_transfers(),
            self.basescan.total_supply(),
        );

        let transfers = transfers.wrap_err("Failed to fetch token transfers")?;
        let unit_price_usd = self.unit_price(price);
        let total_supply = self.total_supply(supply, params.decimals);

        let result = aggregate(
            &transfers,
            params,
            unit_price_usd.as_ref(),
            total_supply.as_ref(),
        )?;

        tracing::info!(
            token = %self.symbol,
            transfers = transfers.len(),
            burns = result.events.len(),
            cumulative_burned = %format::fixed(&result.cumulative_burned, 4),
            remaining_supply = ?result.remaining_supply.as_ref().map(|r| format::fixed(r, 4)),
            "Burn data refreshed"
        );

        Ok(BurnReport {
            token: self.symbol.clone(),
            contract_address: self.contract_address.clone(),
            unit_price_usd,
            total_supply,
            result,
            generated_at: Utc::now(),
        })
    }

    pub async fn price_trend(&self) -> eyre::Result<PriceTrend> {
        let market = self
            .coingecko
            .market_data()
            .await
            .wrap_err("Failed to fetch market data")?;
        Ok(trend::price_trend(&market)?)
    }

    fn unit_price(&self, fetched: Result<Option<String>, SourceError>) -> Option<BigDecimal> {
        match fetched {
            Ok(Some(raw)) => {
                let price = format::parse_decimal(&raw);
                if price.is_none() {
                    tracing::warn!(token = %self.symbol, raw = %raw, "Unit price is not numeric");
                }
                price
            }
            Ok(None) => {
                tracing::warn!(token = %self.symbol, "Explorer returned no unit price");
                None
            }
            Err(e) => {
                tracing::warn!(token = %self.symbol, error = %e, "Failed to fetch unit price");
                None
            }
        }
    }

    fn total_supply(
        &self,
        fetched: Result<Option<String>, SourceError>,
        decimals: u8,
    ) -> Option<BigDecimal> {
        match fetched {
            Ok(Some(raw)) => match format::base_units_to_decimal(&raw, decimals) {
                Ok(supply) => Some(supply),
                Err(reason) => {
                    tracing::warn!(
                        token = %self.symbol,
                        raw = %raw,
                        reason = %reason,
                        "Total supply is malformed, treating as unknown"
                    );
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                tracing::warn!(
                    token = %self.symbol,
                    error = %e,
                    "Failed to fetch total supply, continuing without"
                );
                None
            }
        }
    }
}

/// Refresh every `interval` until `shutdown` fires, warning whenever the
/// remaining supply drops between two refreshes.
pub async fn run_refresh_loop(
    pipeline: Arc<BurnPipeline>,
    interval: Duration,
    shutdown: CancellationToken,
) {
    let mut watch = SupplyWatch::new();
    tracing::info!(
        token = %pipeline.symbol(),
        interval_secs = interval.as_secs(),
        "Starting burn refresh loop"
    );

    while !shutdown.is_cancelled() {
        match pipeline.refresh().await {
            Ok(report) => {
                if let Some(remaining) = &report.result.remaining_supply {
                    watch.observe(remaining);
                }
            }
            Err(e) => tracing::error!(token = %pipeline.symbol(), error = %e, "Burn refresh failed"),
        }

        tokio::select! {
            _ = tokio::time::sleep(interval) => {}
            _ = shutdown.cancelled() => break,
        }
    }

    tracing::info!(token = %pipeline.symbol(), "Burn refresh loop stopped");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{
        ApiConfig, BaseScanConfig, CoinGeckoConfig, HttpConfig, LoggingConfig, MatchingConfig,
        TokenConfig, WatchConfig,
    };
    use std::str::FromStr;

    fn pipeline() -> BurnPipeline {
        let config = Config {
            token: TokenConfig {
                symbol: "OPENX".to_string(),
                contract_address: "0xa66b448f97cbf58d12f00711c02bac2d9eac6f7f".to_string(),
                decimals: 18,
                burn_address: "0x0000000000000000000000000000000000000000".to_string(),
            },
            matching: MatchingConfig::default(),
            basescan: BaseScanConfig::default(),
            coingecko: CoinGeckoConfig::default(),
            http: HttpConfig::default(),
            watch: WatchConfig::default(),
            api: ApiConfig::default(),
            logging: LoggingConfig::default(),
        };
        BurnPipeline::init(&config).unwrap()
    }

    fn upstream(message: &str) -> SourceError {
        SourceError::Upstream {
            api: "BaseScan",
            message: message.to_string(),
        }
    }

    #[test]
    fn test_init_builds_params() {
        let p = pipeline();
        assert_eq!(p.symbol(), "OPENX");
        assert_eq!(p.params().decimals, 18);
        assert!(!p.params().case_sensitive_match);
    }

    #[test]
    fn test_unit_price_degrades_to_none() {
        let p = pipeline();
        assert_eq!(
            p.unit_price(Ok(Some("0.05".to_string()))),
            Some(BigDecimal::from_str("0.05").unwrap())
        );
        assert_eq!(p.unit_price(Ok(Some("n/a".to_string()))), None);
        assert_eq!(p.unit_price(Ok(None)), None);
        assert_eq!(p.unit_price(Err(upstream("NOTOK"))), None);
    }

    #[test]
    fn test_total_supply_converts_base_units() {
        let p = pipeline();
        assert_eq!(
            p.total_supply(Ok(Some("1000000000000000000000000".to_string())), 18),
            Some(BigDecimal::from_str("1000000").unwrap())
        );
        assert_eq!(p.total_supply(Ok(Some("1.5e24".to_string())), 18), None);
        assert_eq!(p.total_supply(Err(upstream("NOTOK")), 18), None);
    }
}
