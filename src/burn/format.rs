use alloy::primitives::U256;
use bigdecimal::{BigDecimal, RoundingMode, Zero};
use chrono::{DateTime, Utc};
use std::str::FromStr;

/// Convert a base-unit integer string (e.g. wei) into a token amount by
/// shifting the decimal point `decimals` places. The conversion is exact.
///
/// The input must be an unsigned decimal integer that fits in a uint256.
pub fn base_units_to_decimal(raw: &str, decimals: u8) -> Result<BigDecimal, String> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err("expected an unsigned decimal integer".to_string());
    }
    U256::from_str_radix(raw, 10).map_err(|e| e.to_string())?;

    let units = BigDecimal::from_str(raw).map_err(|e| e.to_string())?;
    let (digits, _) = units.into_bigint_and_exponent();
    Ok(BigDecimal::new(digits, i64::from(decimals)))
}

/// Parse a decimal quote such as `"0.0512"`. Returns `None` for anything
/// that is not a finite decimal number.
pub fn parse_decimal(raw: &str) -> Option<BigDecimal> {
    BigDecimal::from_str(raw.trim()).ok()
}

/// Render `value` with exactly `places` fractional digits, rounding half up.
pub fn fixed(value: &BigDecimal, places: u32) -> String {
    let rounded = value.with_scale_round(i64::from(places), RoundingMode::HalfUp);
    let negative = rounded < BigDecimal::zero();
    let (digits, _) = rounded.abs().into_bigint_and_exponent();

    let mut text = digits.to_string();
    let places = places as usize;
    if places > 0 {
        if text.len() <= places {
            text = format!("{}{}", "0".repeat(places + 1 - text.len()), text);
        }
        text.insert(text.len() - places, '.');
    }
    if negative {
        text.insert(0, '-');
    }
    text
}

/// Parse unix seconds as sent by the explorer.
pub fn parse_unix_seconds(raw: &str) -> Result<DateTime<Utc>, String> {
    let secs: u64 = raw.parse().map_err(|e| format!("{}", e))?;
    i64::try_from(secs)
        .ok()
        .and_then(|secs| DateTime::from_timestamp(secs, 0))
        .ok_or_else(|| "timestamp out of range".to_string())
}

pub fn display_timestamp(time: &DateTime<Utc>) -> String {
    time.format("%Y-%m-%d %H:%M:%S UTC").to_string()
}
