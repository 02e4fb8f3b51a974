use bigdecimal::BigDecimal;
use serde::Serialize;

use crate::burn::error::BurnError;
use crate::burn::format;
use crate::sources::coingecko::MarketData;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceTrend {
    pub current_usd: f64,
    /// Current price, 2 fractional digits.
    pub current_usd_display: String,
    /// Most recent sample first.
    pub points: Vec<TrendPoint>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrendPoint {
    /// 1-based position in the reversed series.
    pub position: usize,
    pub price_usd: String,
}

/// Two fractional digits, ties rounded up like the burn event figures.
fn display_usd(price: f64) -> String {
    BigDecimal::try_from(price)
        .map(|p| format::fixed(&p, 2))
        .unwrap_or_else(|_| price.to_string())
}

/// Current price plus the 7-day sparkline reversed so the newest sample
/// comes first.
pub fn price_trend(market: &MarketData) -> Result<PriceTrend, BurnError> {
    let current_usd = market
        .current_price
        .usd
        .filter(|p| p.is_finite())
        .ok_or(BurnError::MissingPrice)?;

    let points = market
        .sparkline_7d
        .as_ref()
        .map(|s| s.price.as_slice())
        .unwrap_or_default()
        .iter()
        .rev()
        .enumerate()
        .map(|(i, price)| TrendPoint {
            position: i + 1,
            price_usd: display_usd(*price),
        })
        .collect();

    Ok(PriceTrend {
        current_usd,
        current_usd_display: display_usd(current_usd),
        points,
    })
}
