//! Scriptable wallet provider and controller fixtures for unit tests.

use async_trait::async_trait;
use edupay_chain_demo::{DemoLedger, DemoLedgerProvider, DemoProviderConfig};
use edupay_types::error::{RefreshError, WalletError};
use edupay_types::notification::Notification;
use edupay_types::provider::{Connection, ProviderKind, WalletProvider};
use edupay_types::snapshot::WalletSnapshot;
use edupay_types::storage::{MemorySessionStorage, SessionStorage};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::{Notify, broadcast};

use crate::controller::ConnectionController;
use crate::notify::Notifier;
use crate::registry::ProviderRegistry;
use crate::session::SessionStore;

pub struct FakeProvider {
    kind: ProviderKind,
    installed: bool,
    connect: Mutex<Result<Connection, WalletError>>,
    refresh: Mutex<Result<String, RefreshError>>,
    gate: Option<Arc<Notify>>,
    connect_calls: AtomicUsize,
}

impl FakeProvider {
    pub fn new(snapshot: WalletSnapshot) -> Self {
        Self {
            kind: snapshot.provider,
            installed: true,
            refresh: Mutex::new(Ok(snapshot.balance.clone())),
            connect: Mutex::new(Ok(Connection::new(snapshot))),
            gate: None,
            connect_calls: AtomicUsize::new(0),
        }
    }

    pub fn not_installed(mut self) -> Self {
        self.installed = false;
        self
    }

    pub fn failing(self, error: WalletError) -> Self {
        *self.connect.lock().unwrap() = Err(error);
        self
    }

    pub fn with_connection(self, connection: Connection) -> Self {
        *self.connect.lock().unwrap() = Ok(connection);
        self
    }

    pub fn refreshing(self, result: Result<String, RefreshError>) -> Self {
        *self.refresh.lock().unwrap() = result;
        self
    }

    /// Holds every `connect` until the gate is notified.
    pub fn gated(mut self, gate: Arc<Notify>) -> Self {
        self.gate = Some(gate);
        self
    }

    pub fn connect_calls(&self) -> usize {
        self.connect_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl WalletProvider for FakeProvider {
    fn kind(&self) -> ProviderKind {
        self.kind
    }

    fn probe_installed(&self) -> bool {
        self.installed
    }

    async fn connect(&self) -> Result<Connection, WalletError> {
        self.connect_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        self.connect.lock().unwrap().clone()
    }

    async fn refresh_balance(&self, _snapshot: &WalletSnapshot) -> Result<String, RefreshError> {
        self.refresh.lock().unwrap().clone()
    }
}

pub fn evm_snapshot() -> WalletSnapshot {
    WalletSnapshot {
        address: "0x1234567890abcdef1234567890abcdef12345678".to_string(),
        network: "Ethereum Mainnet".to_string(),
        balance: "1.0000 ETH".to_string(),
        provider: ProviderKind::Evm,
        nft_count: 0,
        tx_count: 7,
    }
}

pub fn solana_snapshot() -> WalletSnapshot {
    WalletSnapshot {
        address: "9WzDXwBbmkg8ZTbNMqUxvQRAyrZzDsGYdLVL9zYtAWWM".to_string(),
        network: "Solana".to_string(),
        balance: "2.0000 SOL".to_string(),
        provider: ProviderKind::Solana,
        nft_count: 0,
        tx_count: 3,
    }
}

pub struct Fixture {
    pub controller: ConnectionController,
    pub storage: Arc<dyn SessionStorage>,
    pub notifications: broadcast::Receiver<Notification>,
}

impl Fixture {
    /// Controller over the given providers plus an instant demo ledger.
    pub fn new(providers: Vec<Arc<dyn WalletProvider>>) -> Self {
        Self::with_storage(providers, Arc::new(MemorySessionStorage::new()))
    }

    pub fn with_storage(
        providers: Vec<Arc<dyn WalletProvider>>,
        storage: Arc<dyn SessionStorage>,
    ) -> Self {
        let instant = DemoProviderConfig {
            connect_latency_ms: 0,
            settlement_latency_ms: 0,
        };
        let demo = DemoLedgerProvider::new(DemoLedger::new(Some(storage.clone())), &instant);
        let registry = ProviderRegistry::new(
            std::iter::once(Arc::new(demo) as Arc<dyn WalletProvider>).chain(providers),
        );
        let notifier = Notifier::new();
        let notifications = notifier.subscribe();
        let controller = ConnectionController::new(registry, SessionStore::new(storage.clone()), notifier);
        Self {
            controller,
            storage,
            notifications,
        }
    }

    /// Titles of the notifications emitted since the last call.
    pub fn drain_titles(&mut self) -> Vec<String> {
        let mut titles = Vec::new();
        while let Ok(notification) = self.notifications.try_recv() {
            titles.push(notification.title);
        }
        titles
    }

    pub fn drain(&mut self) -> Vec<Notification> {
        let mut notifications = Vec::new();
        while let Ok(notification) = self.notifications.try_recv() {
            notifications.push(notification);
        }
        notifications
    }
}
