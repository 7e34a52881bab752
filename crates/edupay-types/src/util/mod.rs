//! Amount helpers.
//!
//! - [`money_amount`] - Parsing of visitor-facing prices
//! - [`units`] - Formatting of on-chain base units into display balances

pub mod money_amount;
pub mod units;

pub use money_amount::MoneyAmount;
pub use units::{format_amount, format_base_units};
