use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub token: TokenConfig,
    #[serde(default)]
    pub matching: MatchingConfig,
    #[serde(default)]
    pub basescan: BaseScanConfig,
    #[serde(default)]
    pub coingecko: CoinGeckoConfig,
    #[serde(default)]
    pub http: HttpConfig,
    #[serde(default)]
    pub watch: WatchConfig,
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct TokenConfig {
    pub symbol: String,
    pub contract_address: String,
    #[serde(default = "default_decimals")]
    pub decimals: u8,
    #[serde(default = "default_burn_address")]
    pub burn_address: String,
}

fn default_decimals() -> u8 {
    18
}

fn default_burn_address() -> String {
    "0x0000000000000000000000000000000000000000".to_string()
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct MatchingConfig {
    #[serde(default)]
    pub case_sensitive_match: bool,
}

// ============================================================
// Upstream APIs
// ============================================================

#[derive(Debug, Deserialize, Clone)]
pub struct BaseScanConfig {
    #[serde(default = "default_basescan_url")]
    pub url: String,
    pub api_key: Option<String>,
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_offset")]
    pub offset: u32,
}

impl Default for BaseScanConfig {
    fn default() -> Self {
        Self {
            url: default_basescan_url(),
            api_key: None,
            page: default_page(),
            offset: default_offset(),
        }
    }
}

fn default_basescan_url() -> String {
    "https://api.basescan.org/api".to_string()
}

fn default_page() -> u32 {
    1
}

fn default_offset() -> u32 {
    1000
}

#[derive(Debug, Deserialize, Clone)]
pub struct CoinGeckoConfig {
    #[serde(default = "default_coingecko_url")]
    pub url: String,
    #[serde(default = "default_coin_id")]
    pub coin_id: String,
}

impl Default for CoinGeckoConfig {
    fn default() -> Self {
        Self {
            url: default_coingecko_url(),
            coin_id: default_coin_id(),
        }
    }
}

fn default_coingecko_url() -> String {
    "https://api.coingecko.com/api/v3".to_string()
}

fn default_coin_id() -> String {
    "openxai".to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct HttpConfig {
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_timeout_secs() -> u64 {
    10
}

// ============================================================
// Refresh loop, API, logging
// ============================================================

#[derive(Debug, Deserialize, Clone)]
pub struct WatchConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            poll_interval_secs: default_poll_interval_secs(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_poll_interval_secs() -> u64 {
    300
}

#[derive(Debug, Deserialize, Clone)]
pub struct ApiConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_api_port")]
    pub port: u16,
    #[serde(default = "default_api_host")]
    pub host: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            port: 3000,
            host: "0.0.0.0".to_string(),
        }
    }
}

fn default_api_port() -> u16 {
    3000
}

fn default_api_host() -> String {
    "0.0.0.0".to_string()
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct LoggingConfig {
    /// Emit JSON lines instead of human-readable output.
    #[serde(default)]
    pub json: bool,
}

impl Config {
    pub fn load(path: &str) -> eyre::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| eyre::eyre!("Failed to read config file '{}': {}", path, e))?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| eyre::eyre!("Failed to parse config file '{}': {}", path, e))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> eyre::Result<()> {
        for (what, address) in [
            ("contract address", &self.token.contract_address),
            ("burn address", &self.token.burn_address),
        ] {
            if !address.starts_with("0x") || address.len() != 42 {
                return Err(eyre::eyre!(
                    "Invalid {} '{}' for token {}",
                    what,
                    address,
                    self.token.symbol
                ));
            }
        }
        // 10^78 no longer fits a uint256
        if self.token.decimals > 77 {
            return Err(eyre::eyre!(
                "Token {} has unsupported decimals {}",
                self.token.symbol,
                self.token.decimals
            ));
        }
        // The explorer caps page * offset at 10000 records
        if self.basescan.page == 0
            || self.basescan.offset == 0
            || u64::from(self.basescan.page) * u64::from(self.basescan.offset) > 10_000
        {
            return Err(eyre::eyre!(
                "BaseScan page {} / offset {} out of range",
                self.basescan.page,
                self.basescan.offset
            ));
        }
        if self.coingecko.coin_id.trim().is_empty() {
            return Err(eyre::eyre!("CoinGecko coin_id must not be empty"));
        }
        if self.http.timeout_secs == 0 {
            return Err(eyre::eyre!("HTTP timeout must be at least one second"));
        }
        if self.watch.enabled && self.watch.poll_interval_secs == 0 {
            return Err(eyre::eyre!("Watch poll interval must be at least one second"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token() -> TokenConfig {
        TokenConfig {
            symbol: "OPENX".to_string(),
            contract_address: "0xa66b448f97cbf58d12f00711c02bac2d9eac6f7f".to_string(),
            decimals: 18,
            burn_address: default_burn_address(),
        }
    }

    fn config(token: TokenConfig) -> Config {
        Config {
            token,
            matching: MatchingConfig::default(),
            basescan: BaseScanConfig::default(),
            coingecko: CoinGeckoConfig::default(),
            http: HttpConfig::default(),
            watch: WatchConfig::default(),
            api: ApiConfig::default(),
            logging: LoggingConfig::default(),
        }
    }

    #[test]
    fn test_parse_config() {
        let toml_str = r#"
[token]
symbol = "OPENX"
contract_address = "0xa66b448f97cbf58d12f00711c02bac2d9eac6f7f"

[basescan]
api_key = "secret"
offset = 500

[watch]
poll_interval_secs = 60
"#;

        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.token.symbol, "OPENX");
        assert_eq!(config.token.decimals, 18); // default
        assert_eq!(
            config.token.burn_address,
            "0x0000000000000000000000000000000000000000"
        );
        assert!(!config.matching.case_sensitive_match); // default
        assert_eq!(config.basescan.api_key.as_deref(), Some("secret"));
        assert_eq!(config.basescan.page, 1);
        assert_eq!(config.basescan.offset, 500);
        assert_eq!(config.coingecko.coin_id, "openxai");
        assert_eq!(config.http.timeout_secs, 10);
        assert_eq!(config.watch.poll_interval_secs, 60);
        assert!(config.watch.enabled);
        assert_eq!(config.api.port, 3000);
        assert!(!config.logging.json);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_case_sensitive_matching() {
        let toml_str = r#"
[token]
symbol = "OPENX"
contract_address = "0xa66b448f97cbf58d12f00711c02bac2d9eac6f7f"
burn_address = "0x000000000000000000000000000000000000dEaD"
decimals = 9

[matching]
case_sensitive_match = true
"#;

        let config: Config = toml::from_str(toml_str).unwrap();
        assert!(config.matching.case_sensitive_match);
        assert_eq!(config.token.decimals, 9);
    }

    #[test]
    fn test_validate_bad_address() {
        let mut bad = token();
        bad.contract_address = "not-an-address".to_string();
        assert!(config(bad).validate().is_err());

        let mut bad = token();
        bad.burn_address = "0x0".to_string();
        assert!(config(bad).validate().is_err());
    }

    #[test]
    fn test_validate_decimals() {
        let mut bad = token();
        bad.decimals = 78;
        assert!(config(bad).validate().is_err());
    }

    #[test]
    fn test_validate_page_window() {
        let mut cfg = config(token());
        cfg.basescan.page = 11;
        cfg.basescan.offset = 1000;
        assert!(cfg.validate().is_err());

        cfg.basescan.page = 10;
        assert!(cfg.validate().is_ok());

        cfg.basescan.offset = 0;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_validate_poll_interval() {
        let mut cfg = config(token());
        cfg.watch.poll_interval_secs = 0;
        assert!(cfg.validate().is_err());

        cfg.watch.enabled = false;
        assert!(cfg.validate().is_ok());
    }
}
