#![cfg_attr(docsrs, feature(doc_auto_cfg))]

//! Solana wallet support for edupay.
//!
//! Connects to Phantom-style wallets and reads the SOL balance and recent activity of
//! the connected account over JSON-RPC.
//!
//! # Modules
//!
//! - [`config`] - RPC endpoint and watch-only wallet configuration
//! - [`injected`] - The [`InjectedSolanaWallet`] seam
//! - [`rpc`] - The [`SolanaRpc`] calls, implemented for the nonblocking `RpcClient`
//! - [`provider`] - [`SolanaWalletProvider`], the wallet adapter
//!
//! Activity is the number of signatures for the address, capped at
//! [`rpc::SIGNATURE_LIMIT`].

pub mod config;
pub mod injected;
pub mod provider;
pub mod rpc;

pub use config::SolanaProviderConfig;
pub use injected::{InjectedSolanaWallet, InjectedWalletError, WatchOnlySolanaWallet};
pub use provider::SolanaWalletProvider;
pub use rpc::{SolanaRpc, SolanaRpcError};
