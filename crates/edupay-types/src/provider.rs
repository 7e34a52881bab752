//! Wallet provider kinds and the adapter contract.
//!
//! Every supported wallet integration implements [`WalletProvider`]. The rest of the
//! system only ever sees `Arc<dyn WalletProvider>` values selected by [`ProviderKind`],
//! so no code outside an adapter needs to know how a particular wallet talks to its network.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use crate::error::{RefreshError, WalletError};
use crate::notification::Notification;
use crate::rates::CryptoCurrency;
use crate::snapshot::WalletSnapshot;

/// The wallet integrations the marketplace knows about.
///
/// Serialized with the wallet brand names so persisted sessions stay readable
/// by the page collaborators: `"MetaMask"`, `"Phantom"`, `"Hashpack"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProviderKind {
    /// EVM-compatible browser wallet.
    #[serde(rename = "MetaMask")]
    Evm,
    /// Solana-compatible browser wallet.
    #[serde(rename = "Phantom")]
    Solana,
    /// Demonstration ledger on a Hedera-style network. Never touches a real network.
    #[serde(rename = "Hashpack")]
    DemoLedger,
}

impl ProviderKind {
    /// All kinds, in the order they are offered to the visitor.
    pub const ALL: [ProviderKind; 3] = [
        ProviderKind::DemoLedger,
        ProviderKind::Evm,
        ProviderKind::Solana,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            ProviderKind::Evm => "MetaMask",
            ProviderKind::Solana => "Phantom",
            ProviderKind::DemoLedger => "Hashpack",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            ProviderKind::Evm => "🦊",
            ProviderKind::Solana => "👻",
            ProviderKind::DemoLedger => "🔷",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            ProviderKind::Evm => "Connect your MetaMask wallet for Ethereum and EVM chains",
            ProviderKind::Solana => "Connect your Phantom wallet for Solana network",
            ProviderKind::DemoLedger => "Connect your Hashpack wallet for Hedera network",
        }
    }

    pub fn install_url(&self) -> &'static str {
        match self {
            ProviderKind::Evm => "https://metamask.io/download/",
            ProviderKind::Solana => "https://phantom.app/download",
            ProviderKind::DemoLedger => "https://www.hashpack.app/download",
        }
    }

    /// Networks a wallet of this kind can be used on.
    pub fn supported_networks(&self) -> &'static [&'static str] {
        match self {
            ProviderKind::Evm => &["Ethereum", "Polygon", "Arbitrum", "Optimism"],
            ProviderKind::Solana => &["Solana"],
            ProviderKind::DemoLedger => &["Hedera"],
        }
    }

    /// Native currency the wallet pays in.
    pub fn currency(&self) -> CryptoCurrency {
        match self {
            ProviderKind::Evm => CryptoCurrency::Eth,
            ProviderKind::Solana => CryptoCurrency::Sol,
            ProviderKind::DemoLedger => CryptoCurrency::Hbar,
        }
    }

    /// The demo ledger is a demonstration path and counts as installed everywhere.
    pub fn always_installed(&self) -> bool {
        matches!(self, ProviderKind::DemoLedger)
    }
}

impl Display for ProviderKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("Unknown wallet provider {0}")]
pub struct UnknownProviderError(String);

impl FromStr for ProviderKind {
    type Err = UnknownProviderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ProviderKind::ALL
            .into_iter()
            .find(|kind| kind.display_name().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownProviderError(s.to_string()))
    }
}

/// What the visitor sees in the wallet picker.
///
/// Rebuilt on every detection; only `installed` depends on the environment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderDescriptor {
    pub kind: ProviderKind,
    pub display_name: &'static str,
    pub icon: &'static str,
    pub installed: bool,
    pub description: &'static str,
    pub install_url: &'static str,
    pub supported_networks: &'static [&'static str],
}

impl ProviderDescriptor {
    pub fn new(kind: ProviderKind, installed: bool) -> Self {
        Self {
            kind,
            display_name: kind.display_name(),
            icon: kind.icon(),
            installed: installed || kind.always_installed(),
            description: kind.description(),
            install_url: kind.install_url(),
            supported_networks: kind.supported_networks(),
        }
    }
}

/// A lookup that failed during connect without failing the connection itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectWarning {
    BalanceUnavailable(String),
    ActivityUnavailable(String),
}

impl ConnectWarning {
    pub fn notification(&self) -> Notification {
        match self {
            ConnectWarning::BalanceUnavailable(_) => Notification::destructive(
                "Balance fetch failed",
                "Connected successfully but couldn't fetch balance",
            ),
            ConnectWarning::ActivityUnavailable(_) => Notification::destructive(
                "Activity fetch failed",
                "Connected successfully but couldn't fetch transaction count",
            ),
        }
    }
}

/// Result of a successful provider handshake.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Connection {
    pub snapshot: WalletSnapshot,
    pub warnings: Vec<ConnectWarning>,
}

impl Connection {
    pub fn new(snapshot: WalletSnapshot) -> Self {
        Self {
            snapshot,
            warnings: Vec::new(),
        }
    }

    pub fn with_warnings(snapshot: WalletSnapshot, warnings: Vec<ConnectWarning>) -> Self {
        Self { snapshot, warnings }
    }
}

/// Outcome of a provider-specific settlement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Settlement {
    /// Reported as paid without moving any value. No signing or broadcast exists
    /// for on-chain wallets; this is a display-layer simulation.
    Simulated,
    /// Value was debited from a ledger; `balance` is the new display balance.
    Debited { balance: String },
}

/// Adapter contract implemented once per wallet kind.
#[async_trait::async_trait]
pub trait WalletProvider: Send + Sync {
    fn kind(&self) -> ProviderKind;

    /// Inspects the environment for the wallet. Must not fail.
    fn probe_installed(&self) -> bool;

    fn descriptor(&self) -> ProviderDescriptor {
        ProviderDescriptor::new(self.kind(), self.probe_installed())
    }

    /// Performs the provider handshake and reads balance and activity.
    ///
    /// Fails with [`WalletError::UserRejected`] when the visitor declines the prompt and
    /// [`WalletError::NotInstalled`] when the wallet is absent. Balance or activity lookups
    /// that fail are reported as [`ConnectWarning`]s instead.
    async fn connect(&self) -> Result<Connection, WalletError>;

    /// Best-effort balance lookup for an already connected wallet.
    async fn refresh_balance(&self, snapshot: &WalletSnapshot) -> Result<String, RefreshError>;

    /// Numeric balance for providers that keep an authoritative one, in native units.
    ///
    /// On-chain wallets only have the display string of the snapshot and return `None`.
    /// Fails when the provider keeps a balance but cannot read it, so a payment can be
    /// refused before it starts.
    async fn available_balance(&self) -> Result<Option<Decimal>, WalletError> {
        Ok(None)
    }

    /// Covers `amount` (in the wallet's native currency) from the connected wallet.
    async fn settle(
        &self,
        snapshot: &WalletSnapshot,
        amount: Decimal,
    ) -> Result<Settlement, WalletError> {
        tracing::debug!(
            provider = %self.kind(),
            address = %snapshot.address,
            %amount,
            "simulated settlement, no transfer performed"
        );
        Ok(Settlement::Simulated)
    }
}
