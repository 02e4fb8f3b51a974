use alloy::primitives::Address;
use std::str::FromStr;

use crate::burn::types::BurnParams;
use crate::config::{MatchingConfig, TokenConfig};

fn parse_address(raw: &str, what: &str, symbol: &str) -> eyre::Result<Address> {
    Address::from_str(raw)
        .map_err(|e| eyre::eyre!("Invalid {} '{}' for {}: {}", what, raw, symbol, e))
}

/// Build the burn-detection parameters for the configured token.
///
/// Both addresses must be valid hex. The burn address is kept as written so
/// that case-sensitive matching compares against exactly what the operator
/// configured.
pub fn burn_params(token: &TokenConfig, matching: &MatchingConfig) -> eyre::Result<BurnParams> {
    let contract = parse_address(&token.contract_address, "contract address", &token.symbol)?;
    let burn = parse_address(&token.burn_address, "burn address", &token.symbol)?;

    if burn == contract {
        return Err(eyre::eyre!(
            "Burn address for {} must differ from the token contract",
            token.symbol
        ));
    }

    tracing::debug!(
        symbol = %token.symbol,
        contract = %contract,
        burn_address = %burn,
        decimals = token.decimals,
        case_sensitive = matching.case_sensitive_match,
        "Built burn parameters"
    );

    Ok(BurnParams {
        burn_address: token.burn_address.clone(),
        decimals: token.decimals,
        case_sensitive_match: matching.case_sensitive_match,
    })
}
