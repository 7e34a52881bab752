//! The connection state machine.
//!
//! ```text
//!  Disconnected | Failed ──select──▶ Connecting ──ok──▶ Connected
//!          ▲                             │                  │
//!          └──────────── error ──────────┘                  │
//!          └──────────────────── disconnect ────────────────┘
//! ```
//!
//! [`ConnectionController`] is the only writer of [`ConnectionState`]. Everyone else
//! observes it through [`ConnectionController::subscribe`] or a [`WalletContext`].

use edupay_types::error::WalletError;
use edupay_types::notification::Notification;
use edupay_types::provider::{ProviderDescriptor, ProviderKind, WalletProvider};
use edupay_types::snapshot::WalletSnapshot;
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::{Mutex, watch};

use crate::context::WalletContext;
use crate::notify::Notifier;
use crate::registry::ProviderRegistry;
use crate::session::SessionStore;

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum ConnectionState {
    #[default]
    Disconnected,
    Connecting {
        provider: ProviderKind,
    },
    Connected(WalletSnapshot),
    /// The last connection attempt failed. Behaves like `Disconnected`.
    Failed {
        provider: ProviderKind,
        reason: String,
    },
}

impl ConnectionState {
    pub fn snapshot(&self) -> Option<&WalletSnapshot> {
        match self {
            ConnectionState::Connected(snapshot) => Some(snapshot),
            _ => None,
        }
    }

    pub fn is_connected(&self) -> bool {
        matches!(self, ConnectionState::Connected(_))
    }

    pub fn is_connecting(&self) -> bool {
        matches!(self, ConnectionState::Connecting { .. })
    }

    /// Whether no wallet is connected or being connected.
    pub fn is_disconnected(&self) -> bool {
        matches!(
            self,
            ConnectionState::Disconnected | ConnectionState::Failed { .. }
        )
    }
}

/// Owns the connection state and drives provider handshakes.
///
/// Cheap to clone; clones share state.
#[derive(Clone)]
pub struct ConnectionController {
    inner: Arc<ControllerInner>,
}

struct ControllerInner {
    registry: ProviderRegistry,
    session: SessionStore,
    notifier: Notifier,
    state: watch::Sender<ConnectionState>,
    payment_lock: Mutex<()>,
}

impl ConnectionController {
    pub fn new(registry: ProviderRegistry, session: SessionStore, notifier: Notifier) -> Self {
        let (state, _) = watch::channel(ConnectionState::Disconnected);
        Self {
            inner: Arc::new(ControllerInner {
                registry,
                session,
                notifier,
                state,
                payment_lock: Mutex::new(()),
            }),
        }
    }

    pub fn registry(&self) -> &ProviderRegistry {
        &self.inner.registry
    }

    pub fn notifier(&self) -> &Notifier {
        &self.inner.notifier
    }

    pub fn session(&self) -> &SessionStore {
        &self.inner.session
    }

    /// Describes every offered wallet, probing whether it is installed.
    pub fn detect_providers(&self) -> Vec<ProviderDescriptor> {
        self.inner.registry.descriptors()
    }

    pub fn state(&self) -> ConnectionState {
        self.inner.state.borrow().clone()
    }

    pub fn current_wallet(&self) -> Option<WalletSnapshot> {
        self.inner.state.borrow().snapshot().cloned()
    }

    pub fn subscribe(&self) -> watch::Receiver<ConnectionState> {
        self.inner.state.subscribe()
    }

    pub fn context(&self) -> WalletContext {
        WalletContext::new(self.clone())
    }

    /// Connects the wallet of the given kind.
    ///
    /// A wallet that is not installed is never asked to connect: the visitor gets an
    /// install link and [`WalletError::NotInstalled`] is returned. Only one connection
    /// can be in flight, and a connected wallet has to be disconnected first.
    #[tracing::instrument(skip(self), fields(provider = %kind))]
    pub async fn select_provider(&self, kind: ProviderKind) -> Result<WalletSnapshot, WalletError> {
        let provider = match self.inner.registry.get(kind) {
            Some(provider) if provider.probe_installed() => provider.clone(),
            _ => {
                self.notify_not_installed(kind);
                return Err(WalletError::NotInstalled { provider: kind });
            }
        };

        let mut rejection = None;
        self.inner.state.send_if_modified(|state| match state {
            ConnectionState::Connecting { .. } => {
                rejection = Some(WalletError::ConnectionInFlight);
                false
            }
            ConnectionState::Connected(_) => {
                rejection = Some(WalletError::AlreadyConnected);
                false
            }
            ConnectionState::Disconnected | ConnectionState::Failed { .. } => {
                *state = ConnectionState::Connecting { provider: kind };
                true
            }
        });
        if let Some(error) = rejection {
            tracing::debug!(%error, "selection rejected");
            return Err(error);
        }

        self.finish_connect(kind, provider).await
    }

    async fn finish_connect(
        &self,
        kind: ProviderKind,
        provider: Arc<dyn WalletProvider>,
    ) -> Result<WalletSnapshot, WalletError> {
        match provider.connect().await {
            Ok(connection) => {
                let snapshot = connection.snapshot;
                self.inner.session.save(&snapshot);
                self.inner
                    .state
                    .send_replace(ConnectionState::Connected(snapshot.clone()));
                tracing::info!(address = %snapshot.address, network = %snapshot.network, "wallet connected");
                self.inner.notifier.notify(Notification::info(
                    "Wallet connected successfully",
                    format!("Connected to {kind}"),
                ));
                for warning in &connection.warnings {
                    self.inner.notifier.notify(warning.notification());
                }
                Ok(snapshot)
            }
            Err(error) => {
                tracing::warn!(%error, "wallet connection failed");
                self.inner.state.send_replace(ConnectionState::Failed {
                    provider: kind,
                    reason: error.to_string(),
                });
                self.inner
                    .notifier
                    .notify(Notification::destructive("Connection failed", error.to_string()));
                Err(error)
            }
        }
    }

    fn notify_not_installed(&self, kind: ProviderKind) {
        tracing::info!("wallet not installed");
        self.inner.notifier.notify(
            Notification::destructive(
                "Wallet not installed",
                format!("Please install {kind} to continue"),
            )
            .with_action("Install", kind.install_url()),
        );
    }

    /// Forgets the connected wallet. Returns whether a wallet was connected.
    ///
    /// Ignored while a connection is in flight.
    #[tracing::instrument(skip(self))]
    pub fn disconnect(&self) -> bool {
        let mut was_connected = false;
        self.inner.state.send_if_modified(|state| match state {
            ConnectionState::Connecting { .. } => {
                tracing::debug!("disconnect ignored while connecting");
                false
            }
            ConnectionState::Disconnected => false,
            ConnectionState::Connected(_) => {
                was_connected = true;
                *state = ConnectionState::Disconnected;
                true
            }
            ConnectionState::Failed { .. } => {
                *state = ConnectionState::Disconnected;
                true
            }
        });
        if was_connected {
            self.inner.session.clear();
            self.inner.notifier.notify(Notification::info(
                "Wallet disconnected",
                "Your wallet has been disconnected",
            ));
        }
        was_connected
    }

    /// Rehydrates the wallet persisted by an earlier session and refreshes its balance.
    ///
    /// Does nothing when a wallet is already connected or connecting.
    #[tracing::instrument(skip(self))]
    pub async fn restore(&self) -> Option<WalletSnapshot> {
        let snapshot = self.inner.session.load()?;
        let restored = self.inner.state.send_if_modified(|state| {
            if state.is_disconnected() {
                *state = ConnectionState::Connected(snapshot.clone());
                true
            } else {
                false
            }
        });
        if !restored {
            tracing::debug!("session not restored, wallet state already set");
            return self.current_wallet();
        }
        tracing::info!(provider = %snapshot.provider, address = %snapshot.address, "wallet restored from session");
        self.refresh_balance().await
    }

    /// Re-reads the connected wallet's balance from its provider.
    ///
    /// Best effort: on failure the current snapshot stays as it is.
    pub async fn refresh_balance(&self) -> Option<WalletSnapshot> {
        let snapshot = self.current_wallet()?;
        let Some(provider) = self.inner.registry.get(snapshot.provider) else {
            tracing::warn!(provider = %snapshot.provider, "no provider registered for connected wallet");
            return Some(snapshot);
        };
        match provider.refresh_balance(&snapshot).await {
            Ok(balance) if balance != snapshot.balance => {
                self.replace_snapshot(snapshot.with_balance(balance));
            }
            Ok(_) => {}
            Err(error) => {
                tracing::warn!(%error, provider = %snapshot.provider, "balance refresh failed, keeping stale balance");
            }
        }
        self.current_wallet()
    }

    /// Replaces the connected snapshot if it still describes the same wallet.
    pub(crate) fn replace_snapshot(&self, snapshot: WalletSnapshot) -> bool {
        let replaced = self.inner.state.send_if_modified(|state| match state {
            ConnectionState::Connected(current) if current.same_wallet(&snapshot) => {
                *current = snapshot.clone();
                true
            }
            _ => false,
        });
        if replaced {
            self.inner.session.save(&snapshot);
        }
        replaced
    }

    pub(crate) fn payment_lock(&self) -> &Mutex<()> {
        &self.inner.payment_lock
    }
}

impl std::fmt::Debug for ConnectionController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectionController")
            .field("registry", &self.inner.registry)
            .field("state", &*self.inner.state.borrow())
            .finish()
    }
}
