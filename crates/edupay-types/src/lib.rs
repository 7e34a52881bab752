#![cfg_attr(docsrs, feature(doc_auto_cfg))]

//! Core types for the edupay wallet integration.
//!
//! This crate holds everything the provider adapters and the connection core agree on.
//! It is chain-agnostic: EVM, Solana and demo-ledger adapters live in separate crates
//! and only meet here, through the [`provider::WalletProvider`] trait.
//!
//! # Modules
//!
//! - [`config`] - Environment-aware configuration values ([`config::LiteralOrEnv`])
//! - [`display`] - Address shortening and block-explorer links
//! - [`error`] - Error taxonomy shared by adapters, the controller and the dispatcher
//! - [`notification`] - User-facing notifications (the "toasts" of the marketplace UI)
//! - [`provider`] - Provider kinds, descriptors and the adapter trait
//! - [`rates`] - Static reference-currency conversion rates
//! - [`snapshot`] - The normalized, display-ready wallet snapshot
//! - [`storage`] - Session-scoped key/value storage backends
//! - [`util`] - Money amount parsing and base-unit formatting

pub mod config;
pub mod display;
pub mod error;
pub mod notification;
pub mod provider;
pub mod rates;
pub mod snapshot;
pub mod storage;
pub mod util;
