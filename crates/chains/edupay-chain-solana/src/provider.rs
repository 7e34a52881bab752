use async_trait::async_trait;
use edupay_types::error::{RefreshError, WalletError};
use edupay_types::provider::{ConnectWarning, Connection, ProviderKind, WalletProvider};
use edupay_types::rates::CryptoCurrency;
use edupay_types::snapshot::WalletSnapshot;
use edupay_types::util::format_base_units;
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_pubkey::Pubkey;
use std::str::FromStr;
use std::sync::Arc;

use crate::config::SolanaProviderConfig;
use crate::injected::{InjectedSolanaWallet, InjectedWalletError, WatchOnlySolanaWallet};
use crate::rpc::{SIGNATURE_LIMIT, SolanaRpc};

pub const NETWORK_NAME: &str = "Solana";

/// Shown when the balance could not be read during connect.
pub const FALLBACK_BALANCE: &str = "0 SOL";

/// Wallet adapter for Phantom-style Solana wallets.
pub struct SolanaWalletProvider<R = RpcClient> {
    injected: Option<Arc<dyn InjectedSolanaWallet>>,
    rpc: Arc<R>,
}

impl<R> Clone for SolanaWalletProvider<R> {
    fn clone(&self) -> Self {
        Self {
            injected: self.injected.clone(),
            rpc: self.rpc.clone(),
        }
    }
}

impl SolanaWalletProvider<RpcClient> {
    pub fn from_config(config: &SolanaProviderConfig) -> Self {
        let rpc_url = config.rpc.inner().to_string();
        let injected = config.wallet.as_ref().map(|wallet| {
            let wallet = WatchOnlySolanaWallet::new(*wallet.inner())
                .with_announce_phantom(config.announce_phantom);
            Arc::new(wallet) as Arc<dyn InjectedSolanaWallet>
        });
        tracing::info!(rpc = %rpc_url, wallet = injected.is_some(), "Using Solana RPC");
        Self::new(injected, Arc::new(RpcClient::new(rpc_url)))
    }
}

impl<R: SolanaRpc> SolanaWalletProvider<R> {
    pub fn new(injected: Option<Arc<dyn InjectedSolanaWallet>>, rpc: Arc<R>) -> Self {
        Self { injected, rpc }
    }

    fn phantom(&self) -> Option<&Arc<dyn InjectedSolanaWallet>> {
        self.injected.as_ref().filter(|wallet| wallet.is_phantom())
    }

    async fn fetch_balance(&self, pubkey: &Pubkey) -> Result<String, RefreshError> {
        let lamports = self
            .rpc
            .get_balance(pubkey)
            .await
            .map_err(|e| RefreshError::Network(e.to_string()))?;
        format_base_units(u128::from(lamports), CryptoCurrency::Sol)
            .map_err(|e| RefreshError::Network(e.to_string()))
    }
}

#[async_trait]
impl<R: SolanaRpc + 'static> WalletProvider for SolanaWalletProvider<R> {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Solana
    }

    fn probe_installed(&self) -> bool {
        self.phantom().is_some()
    }

    #[tracing::instrument(skip_all, fields(provider = %ProviderKind::Solana))]
    async fn connect(&self) -> Result<Connection, WalletError> {
        let wallet = self.phantom().ok_or(WalletError::NotInstalled {
            provider: ProviderKind::Solana,
        })?;
        let pubkey = wallet.connect().await.map_err(|e| match e {
            InjectedWalletError::UserRejected => WalletError::UserRejected,
            InjectedWalletError::Wallet { message, .. } => WalletError::Provider(message),
        })?;
        let address = pubkey.to_string();

        let mut warnings = Vec::new();
        let balance = match self.fetch_balance(&pubkey).await {
            Ok(balance) => balance,
            Err(e) => {
                tracing::warn!(%address, error = %e, "failed to fetch balance");
                warnings.push(ConnectWarning::BalanceUnavailable(e.to_string()));
                FALLBACK_BALANCE.to_string()
            }
        };
        let tx_count = match self.rpc.get_signature_count(&pubkey, SIGNATURE_LIMIT).await {
            Ok(count) => count as u64,
            Err(e) => {
                tracing::warn!(%address, error = %e, "failed to fetch signatures");
                warnings.push(ConnectWarning::ActivityUnavailable(e.to_string()));
                0
            }
        };

        tracing::info!(%address, %balance, tx_count, "solana wallet connected");
        let snapshot = WalletSnapshot {
            address,
            network: NETWORK_NAME.to_string(),
            balance,
            provider: ProviderKind::Solana,
            nft_count: 0,
            tx_count,
        };
        Ok(Connection::with_warnings(snapshot, warnings))
    }

    async fn refresh_balance(&self, snapshot: &WalletSnapshot) -> Result<String, RefreshError> {
        let pubkey = Pubkey::from_str(&snapshot.address)
            .map_err(|e| RefreshError::Unavailable(format!("Invalid Solana address: {e}")))?;
        self.fetch_balance(&pubkey).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rpc::SolanaRpcError;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FakeRpc {
        balance: Option<u64>,
        signatures: Option<usize>,
        requested_limit: AtomicUsize,
    }

    impl FakeRpc {
        fn new(balance: Option<u64>, signatures: Option<usize>) -> Arc<Self> {
            Arc::new(Self {
                balance,
                signatures,
                requested_limit: AtomicUsize::new(0),
            })
        }
    }

    impl SolanaRpc for FakeRpc {
        async fn get_balance(&self, _pubkey: &Pubkey) -> Result<u64, SolanaRpcError> {
            self.balance
                .ok_or_else(|| SolanaRpcError::Custom("getBalance failed".to_string()))
        }

        async fn get_signature_count(
            &self,
            _pubkey: &Pubkey,
            limit: usize,
        ) -> Result<usize, SolanaRpcError> {
            self.requested_limit.store(limit, Ordering::SeqCst);
            self.signatures
                .map(|count| count.min(limit))
                .ok_or_else(|| SolanaRpcError::Custom("getSignaturesForAddress failed".to_string()))
        }
    }

    struct RejectingWallet;

    #[async_trait]
    impl InjectedSolanaWallet for RejectingWallet {
        fn is_phantom(&self) -> bool {
            true
        }

        async fn connect(&self) -> Result<Pubkey, InjectedWalletError> {
            Err(InjectedWalletError::from_code(Some(4001), "User rejected the request."))
        }
    }

    fn pubkey() -> Pubkey {
        Pubkey::new_from_array([42u8; 32])
    }

    fn provider(rpc: Arc<FakeRpc>) -> SolanaWalletProvider<FakeRpc> {
        let wallet = Arc::new(WatchOnlySolanaWallet::new(pubkey()));
        SolanaWalletProvider::new(Some(wallet), rpc)
    }

    #[tokio::test]
    async fn test_connect_builds_snapshot() {
        let rpc = FakeRpc::new(Some(2_500_000_000), Some(5000));
        let provider = provider(rpc.clone());
        let connection = provider.connect().await.unwrap();
        assert!(connection.warnings.is_empty());
        let snapshot = connection.snapshot;
        assert_eq!(snapshot.address, pubkey().to_string());
        assert_eq!(snapshot.network, "Solana");
        assert_eq!(snapshot.balance, "2.5000 SOL");
        assert_eq!(snapshot.tx_count, 1000);
        assert_eq!(rpc.requested_limit.load(Ordering::SeqCst), SIGNATURE_LIMIT);
    }

    #[tokio::test]
    async fn test_lookup_failures_are_warnings() {
        let provider = provider(FakeRpc::new(None, None));
        let connection = provider.connect().await.unwrap();
        assert_eq!(connection.snapshot.balance, FALLBACK_BALANCE);
        assert_eq!(connection.snapshot.tx_count, 0);
        assert_eq!(connection.warnings.len(), 2);
    }

    #[tokio::test]
    async fn test_user_rejection() {
        let provider = SolanaWalletProvider::new(
            Some(Arc::new(RejectingWallet)),
            FakeRpc::new(Some(0), Some(0)),
        );
        assert_eq!(provider.connect().await.unwrap_err(), WalletError::UserRejected);
    }

    #[tokio::test]
    async fn test_not_installed() {
        let provider = SolanaWalletProvider::new(None, FakeRpc::new(Some(0), Some(0)));
        assert!(!provider.probe_installed());
        assert_eq!(
            provider.connect().await.unwrap_err(),
            WalletError::NotInstalled {
                provider: ProviderKind::Solana
            }
        );

        let wallet = WatchOnlySolanaWallet::new(pubkey()).with_announce_phantom(false);
        let provider = SolanaWalletProvider::new(
            Some(Arc::new(wallet)),
            FakeRpc::new(Some(0), Some(0)),
        );
        assert!(!provider.descriptor().installed);
    }

    #[tokio::test]
    async fn test_refresh_balance() {
        let provider = provider(FakeRpc::new(Some(123_456_789), Some(1)));
        let snapshot = provider.connect().await.unwrap().snapshot;
        assert_eq!(
            provider.refresh_balance(&snapshot).await.unwrap(),
            "0.1235 SOL"
        );
        let bogus = snapshot.with_balance("0 SOL");
        let bogus = WalletSnapshot {
            address: "not-base58!".to_string(),
            ..bogus
        };
        assert!(matches!(
            provider.refresh_balance(&bogus).await,
            Err(RefreshError::Unavailable(_))
        ));
    }
}
