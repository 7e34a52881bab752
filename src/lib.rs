//! Wallet connection and payment session core of the edupay course marketplace.
//!
//! A visitor connects a wallet (MetaMask, Phantom, or the Hashpack demo ledger), sees
//! its holdings, and pays for a course. This crate owns that flow:
//!
//! - [`registry`] - The wallet adapters on offer, one per [`ProviderKind`]
//! - [`controller`] - The connection state machine, [`ConnectionController`]
//! - [`session`] - Persistence of the connected wallet across reloads
//! - [`payment`] - Price conversion and settlement, [`PaymentDispatcher`]
//! - [`context`] - [`WalletContext`], the handle page components use
//! - [`notify`] - Visitor-facing notifications
//! - [`config`] - Provider configuration
//!
//! Shared types live in [`edupay_types`]; the adapters in `edupay-chain-eip155`,
//! `edupay-chain-solana` and `edupay-chain-demo`.
//!
//! # Example
//!
//! ```ignore
//! use edupay::{ConnectionController, Notifier, ProviderRegistry, ProvidersConfig, SessionStore};
//! use edupay_types::provider::ProviderKind;
//! use edupay_types::storage::MemorySessionStorage;
//! use std::sync::Arc;
//!
//! let storage = Arc::new(MemorySessionStorage::new());
//! let registry = ProviderRegistry::from_config(&ProvidersConfig::default(), Some(storage.clone()));
//! let controller = ConnectionController::new(registry, SessionStore::new(storage), Notifier::new());
//!
//! controller.select_provider(ProviderKind::DemoLedger).await?;
//! let paid = controller.context().pay(rust_decimal::Decimal::from(20), "USD").await;
//! ```
//!
//! [`ProviderKind`]: edupay_types::provider::ProviderKind

pub mod config;
pub mod context;
pub mod controller;
pub mod notify;
pub mod payment;
pub mod registry;
pub mod session;

pub use config::ProvidersConfig;
pub use context::WalletContext;
pub use controller::{ConnectionController, ConnectionState};
pub use notify::Notifier;
pub use payment::{PaymentDispatcher, PaymentReceipt};
pub use registry::ProviderRegistry;
pub use session::SessionStore;

#[cfg(test)]
mod testing;
