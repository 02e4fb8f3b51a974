use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};

/// A raw ERC-20 transfer as returned by the explorer's `tokentx` endpoint.
/// Numeric fields are kept as the strings the explorer sent; they are only
/// parsed once a record qualifies as a burn.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct TransferRecord {
    #[serde(default)]
    pub hash: Option<String>,
    #[serde(default)]
    pub from: Option<String>,
    pub to: String,
    pub value: String,
    #[serde(rename = "timeStamp")]
    pub timestamp: String,
}

/// One transfer into the burn address, formatted for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BurnEvent {
    /// UTC, `YYYY-MM-DD HH:MM:SS UTC`.
    pub timestamp: String,
    pub unix_timestamp: i64,
    /// Token amount, 4 fractional digits.
    pub amount: String,
    /// USD equivalent at the current unit price, 2 fractional digits.
    pub usd_value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregationResult {
    pub events: Vec<BurnEvent>,
    /// Sum of the unrounded per-event amounts.
    pub cumulative_burned: BigDecimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remaining_supply: Option<BigDecimal>,
}

/// How transfers are recognised as burns for one token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BurnParams {
    pub burn_address: String,
    pub decimals: u8,
    /// Hex addresses are case-insensitive; exact matching is opt-in.
    pub case_sensitive_match: bool,
}

impl BurnParams {
    pub fn matches(&self, to: &str) -> bool {
        if self.case_sensitive_match {
            to == self.burn_address
        } else {
            to.eq_ignore_ascii_case(&self.burn_address)
        }
    }
}
