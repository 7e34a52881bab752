#![cfg_attr(docsrs, feature(doc_auto_cfg))]

//! EVM wallet support for edupay.
//!
//! Connects to MetaMask-style wallets through the [EIP-1193] `request` interface and
//! reads the connected account, network, ETH balance and transaction count.
//!
//! # Modules
//!
//! - [`config`] - Configuration of the injected provider endpoint
//! - [`injected`] - The [`Eip1193Provider`] seam and its JSON-RPC implementation
//! - [`networks`] - Chain id to network name table
//! - [`provider`] - [`Eip155WalletProvider`], the [`WalletProvider`] adapter
//!
//! Payments through this adapter are a display-layer simulation: no transaction is
//! signed or broadcast.
//!
//! [EIP-1193]: https://eips.ethereum.org/EIPS/eip-1193
//! [`WalletProvider`]: edupay_types::provider::WalletProvider

pub mod config;
pub mod injected;
pub mod networks;
pub mod provider;

pub use config::Eip155ProviderConfig;
pub use injected::{Eip1193Error, Eip1193Provider, HttpEip1193Provider};
pub use provider::Eip155WalletProvider;
