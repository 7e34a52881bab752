//! Course price parsing.
//!
//! Prices reach the dispatcher from page code and from the HTTP bridge, as either
//! JSON numbers or display strings such as `"$49.99"` or `"1,250.50"`. [`MoneyAmount`]
//! accepts both and keeps the decimal precision the caller wrote.
//!
//! ```rust
//! use edupay_types::util::MoneyAmount;
//!
//! let amount = MoneyAmount::parse("$49.99").unwrap();
//! assert_eq!(amount.scale(), 2);
//! assert_eq!(amount.to_string(), "49.99");
//! ```

use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::fmt::Display;
use std::str::FromStr;

/// A non-negative price in a reference currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct MoneyAmount(pub Decimal);

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MoneyAmountParseError {
    #[error("Invalid number format")]
    InvalidFormat,
    #[error("Amount must be between 0 and {}", MAX_STR)]
    OutOfRange,
    #[error("Negative value is not allowed")]
    Negative,
}

const MAX_STR: &str = "999999999";

static MAX: Lazy<Decimal> = Lazy::new(|| Decimal::from(999_999_999u64));

// Anything that is not a digit, a dot or a minus sign.
static NOISE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^\d\.\-]+").expect("valid regex"));

impl MoneyAmount {
    pub const ZERO: MoneyAmount = MoneyAmount(Decimal::ZERO);

    /// Parses a price, ignoring currency symbols, separators and whitespace.
    pub fn parse(input: &str) -> Result<Self, MoneyAmountParseError> {
        let cleaned = NOISE.replace_all(input, "");
        let parsed =
            Decimal::from_str(&cleaned).map_err(|_| MoneyAmountParseError::InvalidFormat)?;
        Self::checked(parsed)
    }

    fn checked(value: Decimal) -> Result<Self, MoneyAmountParseError> {
        if value.is_sign_negative() && !value.is_zero() {
            return Err(MoneyAmountParseError::Negative);
        }
        if value > *MAX {
            return Err(MoneyAmountParseError::OutOfRange);
        }
        Ok(MoneyAmount(value))
    }

    /// Number of decimal places the price was written with.
    pub fn scale(&self) -> u32 {
        self.0.scale()
    }

    pub fn to_decimal(&self) -> Decimal {
        self.0
    }
}

impl FromStr for MoneyAmount {
    type Err = MoneyAmountParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MoneyAmount::parse(s)
    }
}

impl TryFrom<Decimal> for MoneyAmount {
    type Error = MoneyAmountParseError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        MoneyAmount::checked(value)
    }
}

impl TryFrom<f64> for MoneyAmount {
    type Error = MoneyAmountParseError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        let decimal = Decimal::from_f64(value).ok_or(MoneyAmountParseError::OutOfRange)?;
        MoneyAmount::checked(decimal)
    }
}

impl From<u32> for MoneyAmount {
    fn from(value: u32) -> Self {
        MoneyAmount(Decimal::from(value))
    }
}

impl Display for MoneyAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.normalize())
    }
}

impl Serialize for MoneyAmount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for MoneyAmount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct MoneyAmountVisitor;

        impl Visitor<'_> for MoneyAmountVisitor {
            type Value = MoneyAmount;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a price as a number or a string")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
                MoneyAmount::parse(v).map_err(E::custom)
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
                MoneyAmount::checked(Decimal::from(v)).map_err(E::custom)
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
                MoneyAmount::checked(Decimal::from(v)).map_err(E::custom)
            }

            fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
                MoneyAmount::try_from(v).map_err(E::custom)
            }
        }

        deserializer.deserialize_any(MoneyAmountVisitor)
    }
}
