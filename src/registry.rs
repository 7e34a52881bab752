//! The set of wallet providers offered to the visitor.

use edupay_chain_demo::{DemoLedger, DemoLedgerProvider};
use edupay_chain_eip155::Eip155WalletProvider;
use edupay_chain_solana::SolanaWalletProvider;
use edupay_types::provider::{ProviderDescriptor, ProviderKind, WalletProvider};
use edupay_types::storage::SessionStorage;
use std::collections::HashMap;
use std::fmt::{Debug, Formatter};
use std::sync::Arc;

use crate::config::ProvidersConfig;

/// Wallet adapters keyed by [`ProviderKind`]. At most one adapter per kind.
#[derive(Clone, Default)]
pub struct ProviderRegistry(HashMap<ProviderKind, Arc<dyn WalletProvider>>);

impl ProviderRegistry {
    pub fn new<I>(providers: I) -> Self
    where
        I: IntoIterator<Item = Arc<dyn WalletProvider>>,
    {
        Self(
            providers
                .into_iter()
                .map(|provider| (provider.kind(), provider))
                .collect(),
        )
    }

    /// Builds the adapters for every wallet kind from configuration.
    ///
    /// The demo ledger persists its account to `storage`.
    pub fn from_config(config: &ProvidersConfig, storage: Option<Arc<dyn SessionStorage>>) -> Self {
        let evm = Eip155WalletProvider::from_config(config.evm.as_ref());
        let solana = SolanaWalletProvider::from_config(&config.solana);
        let demo = DemoLedgerProvider::new(DemoLedger::new(storage), &config.demo);
        Self::new([
            Arc::new(demo) as Arc<dyn WalletProvider>,
            Arc::new(evm) as Arc<dyn WalletProvider>,
            Arc::new(solana) as Arc<dyn WalletProvider>,
        ])
    }

    pub fn get(&self, kind: ProviderKind) -> Option<&Arc<dyn WalletProvider>> {
        self.0.get(&kind)
    }

    /// Registered adapters, in the order they are offered to the visitor.
    pub fn providers(&self) -> impl Iterator<Item = &Arc<dyn WalletProvider>> {
        ProviderKind::ALL
            .into_iter()
            .filter_map(|kind| self.0.get(&kind))
    }

    /// Probes every registered adapter.
    pub fn descriptors(&self) -> Vec<ProviderDescriptor> {
        self.providers().map(|provider| provider.descriptor()).collect()
    }
}

impl Debug for ProviderRegistry {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.providers().map(|provider| provider.kind()))
            .finish()
    }
}
