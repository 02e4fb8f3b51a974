use bigdecimal::{BigDecimal, Zero};

use super::error::BurnError;
use super::format;
use super::types::{AggregationResult, BurnEvent, BurnParams, TransferRecord};

/// Reduce a transfer list to its burn history.
///
/// Records are visited in input order and only those sent to
/// `params.burn_address` become events. The cumulative total is summed from
/// unrounded amounts; the 4- and 2-digit strings on each event are for
/// display only. The unit price is required only once a record qualifies.
///
/// The call is all-or-nothing: the first malformed qualifying record fails
/// the whole batch.
pub fn aggregate(
    transfers: &[TransferRecord],
    params: &BurnParams,
    unit_price_usd: Option<&BigDecimal>,
    total_supply: Option<&BigDecimal>,
) -> Result<AggregationResult, BurnError> {
    let mut events = Vec::new();
    let mut cumulative_burned = BigDecimal::zero();

    for (index, transfer) in transfers.iter().enumerate() {
        if !params.matches(&transfer.to) {
            continue;
        }

        let amount = format::base_units_to_decimal(&transfer.value, params.decimals)
            .map_err(|reason| BurnError::malformed(index, "value", &transfer.value, reason))?;
        let time = format::parse_unix_seconds(&transfer.timestamp).map_err(|reason| {
            BurnError::malformed(index, "timeStamp", &transfer.timestamp, reason)
        })?;
        let price = unit_price_usd.ok_or(BurnError::MissingPrice)?;

        let usd = &amount * price;
        events.push(BurnEvent {
            timestamp: format::display_timestamp(&time),
            unix_timestamp: time.timestamp(),
            amount: format::fixed(&amount, 4),
            usd_value: format::fixed(&usd, 2),
        });
        cumulative_burned += amount;
    }

    let remaining_supply = total_supply.map(|total| total - &cumulative_burned);

    tracing::debug!(
        transfers = transfers.len(),
        burns = events.len(),
        cumulative_burned = %cumulative_burned,
        "Aggregated burn events"
    );

    Ok(AggregationResult {
        events,
        cumulative_burned,
        remaining_supply,
    })
}
