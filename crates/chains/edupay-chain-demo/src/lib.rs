#![cfg_attr(docsrs, feature(doc_auto_cfg))]

//! Demonstration ledger wallet for edupay.
//!
//! A wallet that needs no browser extension and no network: the connected account,
//! its NFT and transaction counters are fixed, and payments debit an in-memory
//! balance after a simulated processing delay. It lets the payment flow be exercised
//! end to end.
//!
//! - [`ledger`] - The [`DemoLedger`] account store
//! - [`provider`] - [`DemoLedgerProvider`], the wallet adapter
//! - [`config`] - Simulated latencies

pub mod config;
pub mod ledger;
pub mod provider;

pub use config::DemoProviderConfig;
pub use ledger::{DemoLedger, DemoLedgerAccount};
pub use provider::DemoLedgerProvider;
