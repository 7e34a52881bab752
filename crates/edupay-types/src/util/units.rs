//! Display formatting for native balances.
//!
//! Balances are always shown with four decimal places followed by the currency
//! symbol, e.g. `"0.0420 ETH"` or `"1250.5000 HBAR"`.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::rates::CryptoCurrency;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UnitsError {
    #[error("Amount {0} is too large to display")]
    Overflow(u128),
}

/// Formats a decimal amount of `currency` for display.
pub fn format_amount(amount: Decimal, currency: CryptoCurrency) -> String {
    let rounded = amount.round_dp_with_strategy(4, RoundingStrategy::MidpointAwayFromZero);
    format!("{rounded:.4} {currency}")
}

/// Formats an amount of base units (wei, lamports, tinybars) for display.
pub fn format_base_units(units: u128, currency: CryptoCurrency) -> Result<String, UnitsError> {
    let signed = i128::try_from(units).map_err(|_| UnitsError::Overflow(units))?;
    let amount = Decimal::try_from_i128_with_scale(signed, currency.decimals())
        .map_err(|_| UnitsError::Overflow(units))?;
    Ok(format_amount(amount, currency))
}
