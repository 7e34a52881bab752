//! Static conversion from a reference currency into wallet currencies.
//!
//! Rates are fixed approximations, not live quotes. They only exist so a course
//! price in dollars can be shown and settled in the connected wallet's currency.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use crate::error::WalletError;

/// Native currency of a supported wallet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CryptoCurrency {
    Eth,
    Sol,
    Hbar,
}

impl CryptoCurrency {
    pub fn symbol(&self) -> &'static str {
        match self {
            CryptoCurrency::Eth => "ETH",
            CryptoCurrency::Sol => "SOL",
            CryptoCurrency::Hbar => "HBAR",
        }
    }

    /// Decimal places of the smallest on-chain unit (wei, lamports, tinybars).
    pub fn decimals(&self) -> u32 {
        match self {
            CryptoCurrency::Eth => 18,
            CryptoCurrency::Sol => 9,
            CryptoCurrency::Hbar => 8,
        }
    }
}

impl Display for CryptoCurrency {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Currency course prices are quoted in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ReferenceCurrency {
    #[default]
    Usd,
}

impl ReferenceCurrency {
    /// Units of `currency` bought by one unit of the reference currency.
    pub fn rate(&self, currency: CryptoCurrency) -> Decimal {
        match (self, currency) {
            (ReferenceCurrency::Usd, CryptoCurrency::Eth) => Decimal::new(3, 4),
            (ReferenceCurrency::Usd, CryptoCurrency::Sol) => Decimal::new(1, 2),
            (ReferenceCurrency::Usd, CryptoCurrency::Hbar) => Decimal::from(10),
        }
    }

    /// Converts a price into `currency`. Negative prices and prices too large to
    /// convert are refused.
    pub fn convert(&self, amount: Decimal, currency: CryptoCurrency) -> Result<Decimal, WalletError> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(WalletError::InvalidAmount(amount.to_string()));
        }
        amount
            .checked_mul(self.rate(currency))
            .ok_or_else(|| WalletError::InvalidAmount(amount.to_string()))
    }
}

impl Display for ReferenceCurrency {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ReferenceCurrency::Usd => f.write_str("USD"),
        }
    }
}

impl FromStr for ReferenceCurrency {
    type Err = WalletError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("USD") {
            Ok(ReferenceCurrency::Usd)
        } else {
            Err(WalletError::UnsupportedCurrency(s.to_string()))
        }
    }
}
