use alloy_primitives::U256;
use async_trait::async_trait;
use edupay_types::error::{RefreshError, WalletError};
use edupay_types::provider::{ConnectWarning, Connection, ProviderKind, WalletProvider};
use edupay_types::rates::CryptoCurrency;
use edupay_types::snapshot::WalletSnapshot;
use edupay_types::util::format_base_units;
use serde_json::{Value, json};
use std::sync::Arc;

use crate::config::Eip155ProviderConfig;
use crate::injected::{Eip1193Error, Eip1193Provider, HttpEip1193Provider};
use crate::networks::{UNKNOWN_NETWORK, network_name_from_hex};

/// Shown when the balance could not be read during connect.
pub const FALLBACK_BALANCE: &str = "0 ETH";

/// Wallet adapter for EVM browser wallets.
#[derive(Clone, Default)]
pub struct Eip155WalletProvider {
    injected: Option<Arc<dyn Eip1193Provider>>,
}

impl Eip155WalletProvider {
    pub fn new(injected: Option<Arc<dyn Eip1193Provider>>) -> Self {
        Self { injected }
    }

    pub fn from_config(config: Option<&Eip155ProviderConfig>) -> Self {
        let injected = config.map(|config| {
            let provider = HttpEip1193Provider::new(config.rpc.inner().clone())
                .with_account(config.account.as_ref().map(|account| *account.inner()))
                .with_announce_metamask(config.announce_metamask);
            tracing::info!(rpc = %config.rpc.inner(), "Using HTTP EIP-1193 provider");
            Arc::new(provider) as Arc<dyn Eip1193Provider>
        });
        Self::new(injected)
    }

    fn metamask(&self) -> Option<&Arc<dyn Eip1193Provider>> {
        self.injected.as_ref().filter(|injected| injected.is_metamask())
    }

    async fn fetch_balance(
        injected: &dyn Eip1193Provider,
        address: &str,
    ) -> Result<String, RefreshError> {
        let value = injected
            .request("eth_getBalance", json!([address, "latest"]))
            .await
            .map_err(|e| RefreshError::Network(e.message))?;
        let wei = parse_quantity(&value)
            .ok_or_else(|| RefreshError::Network(format!("Malformed balance {value}")))?;
        let wei = u128::try_from(wei)
            .map_err(|_| RefreshError::Network(format!("Balance {wei} out of range")))?;
        format_base_units(wei, CryptoCurrency::Eth).map_err(|e| RefreshError::Network(e.to_string()))
    }

    async fn fetch_transaction_count(
        injected: &dyn Eip1193Provider,
        address: &str,
    ) -> Result<u64, Eip1193Error> {
        let value = injected
            .request("eth_getTransactionCount", json!([address, "latest"]))
            .await?;
        parse_quantity(&value)
            .and_then(|count| u64::try_from(count).ok())
            .ok_or_else(|| Eip1193Error::transport(format!("Malformed transaction count {value}")))
    }
}

fn parse_quantity(value: &Value) -> Option<U256> {
    let s = value.as_str()?;
    let digits = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X"))?;
    U256::from_str_radix(digits, 16).ok()
}

fn connect_error(error: Eip1193Error) -> WalletError {
    match error.code {
        Some(_) if error.is_user_rejection() => WalletError::UserRejected,
        Some(_) => WalletError::Provider(error.message),
        None => WalletError::NetworkError(error.message),
    }
}

#[async_trait]
impl WalletProvider for Eip155WalletProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Evm
    }

    fn probe_installed(&self) -> bool {
        self.metamask().is_some()
    }

    #[tracing::instrument(skip_all, fields(provider = %ProviderKind::Evm))]
    async fn connect(&self) -> Result<Connection, WalletError> {
        let injected = self.metamask().ok_or(WalletError::NotInstalled {
            provider: ProviderKind::Evm,
        })?;

        let accounts = injected
            .request("eth_requestAccounts", json!([]))
            .await
            .map_err(connect_error)?;
        let address = accounts
            .as_array()
            .and_then(|accounts| accounts.first())
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| WalletError::Provider("No accounts found".to_string()))?;

        let chain_id = injected
            .request("eth_chainId", json!([]))
            .await
            .map_err(connect_error)?;
        let network = chain_id
            .as_str()
            .map(network_name_from_hex)
            .unwrap_or(UNKNOWN_NETWORK);

        let mut warnings = Vec::new();
        let balance = match Self::fetch_balance(injected.as_ref(), &address).await {
            Ok(balance) => balance,
            Err(e) => {
                tracing::warn!(%address, error = %e, "failed to fetch balance");
                warnings.push(ConnectWarning::BalanceUnavailable(e.to_string()));
                FALLBACK_BALANCE.to_string()
            }
        };
        let tx_count = match Self::fetch_transaction_count(injected.as_ref(), &address).await {
            Ok(count) => count,
            Err(e) => {
                tracing::warn!(%address, error = %e, "failed to fetch transaction count");
                warnings.push(ConnectWarning::ActivityUnavailable(e.to_string()));
                0
            }
        };

        tracing::info!(%address, network, %balance, tx_count, "evm wallet connected");
        let snapshot = WalletSnapshot {
            address,
            network: network.to_string(),
            balance,
            provider: ProviderKind::Evm,
            nft_count: 0,
            tx_count,
        };
        Ok(Connection::with_warnings(snapshot, warnings))
    }

    async fn refresh_balance(&self, snapshot: &WalletSnapshot) -> Result<String, RefreshError> {
        let injected = self
            .metamask()
            .ok_or_else(|| RefreshError::Unavailable("MetaMask is not installed".to_string()))?;
        Self::fetch_balance(injected.as_ref(), &snapshot.address).await
    }
}
