use async_trait::async_trait;
use edupay_types::error::{RefreshError, WalletError};
use edupay_types::provider::{Connection, ProviderKind, Settlement, WalletProvider};
use edupay_types::rates::CryptoCurrency;
use edupay_types::snapshot::WalletSnapshot;
use edupay_types::util::format_amount;
use rust_decimal::Decimal;
use std::time::Duration;

use crate::config::DemoProviderConfig;
use crate::ledger::DemoLedger;

pub const NETWORK_NAME: &str = "Hedera Testnet";
pub const DEMO_NFT_COUNT: u32 = 3;
pub const DEMO_TX_COUNT: u64 = 47;

/// Wallet adapter for the demonstration ledger.
///
/// Always installed. Connecting opens a fresh [`DemoLedger`] account; settling debits it.
#[derive(Debug, Clone)]
pub struct DemoLedgerProvider {
    ledger: DemoLedger,
    connect_latency: Duration,
    settlement_latency: Duration,
}

impl DemoLedgerProvider {
    pub fn new(ledger: DemoLedger, config: &DemoProviderConfig) -> Self {
        Self {
            ledger,
            connect_latency: config.connect_latency(),
            settlement_latency: config.settlement_latency(),
        }
    }

    pub fn ledger(&self) -> &DemoLedger {
        &self.ledger
    }
}

#[async_trait]
impl WalletProvider for DemoLedgerProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::DemoLedger
    }

    fn probe_installed(&self) -> bool {
        true
    }

    #[tracing::instrument(skip_all, fields(provider = %ProviderKind::DemoLedger))]
    async fn connect(&self) -> Result<Connection, WalletError> {
        tokio::time::sleep(self.connect_latency).await;
        let account = self.ledger.open().await;
        tracing::info!(account_id = %account.account_id, "demo ledger connected");
        Ok(Connection::new(WalletSnapshot {
            address: account.account_id,
            network: NETWORK_NAME.to_string(),
            balance: format_amount(account.balance, CryptoCurrency::Hbar),
            provider: ProviderKind::DemoLedger,
            nft_count: DEMO_NFT_COUNT,
            tx_count: DEMO_TX_COUNT,
        }))
    }

    async fn refresh_balance(&self, _snapshot: &WalletSnapshot) -> Result<String, RefreshError> {
        let balance = self.ledger.balance().await?;
        Ok(format_amount(balance, CryptoCurrency::Hbar))
    }

    async fn available_balance(&self) -> Result<Option<Decimal>, WalletError> {
        let balance = self
            .ledger
            .balance()
            .await
            .map_err(|e| WalletError::Provider(e.to_string()))?;
        Ok(Some(balance))
    }

    #[tracing::instrument(skip_all, fields(provider = %ProviderKind::DemoLedger, %amount))]
    async fn settle(
        &self,
        _snapshot: &WalletSnapshot,
        amount: Decimal,
    ) -> Result<Settlement, WalletError> {
        let balance = self.ledger.debit(amount, self.settlement_latency).await?;
        Ok(Settlement::Debited {
            balance: format_amount(balance, CryptoCurrency::Hbar),
        })
    }
}
