//! Persistence of the connected wallet across reloads.

use edupay_types::error::WalletError;
use edupay_types::snapshot::WalletSnapshot;
use edupay_types::storage::SessionStorage;
use std::sync::Arc;

/// Session storage key of the connected wallet.
pub const SESSION_KEY: &str = "connectedWallet";

/// Reads and writes the last connected [`WalletSnapshot`].
///
/// Nothing here fails: a missing, unreadable or malformed entry means "no wallet".
/// Malformed entries are removed so they are not read again.
#[derive(Debug, Clone)]
pub struct SessionStore {
    storage: Arc<dyn SessionStorage>,
}

impl SessionStore {
    pub fn new(storage: Arc<dyn SessionStorage>) -> Self {
        Self { storage }
    }

    pub fn storage(&self) -> &Arc<dyn SessionStorage> {
        &self.storage
    }

    pub fn load(&self) -> Option<WalletSnapshot> {
        let raw = match self.storage.get(SESSION_KEY) {
            Ok(raw) => raw?,
            Err(e) => {
                tracing::warn!(error = %e, "failed to read session storage");
                return None;
            }
        };
        match serde_json::from_str::<WalletSnapshot>(&raw) {
            Ok(snapshot) => Some(snapshot),
            Err(e) => {
                let error = WalletError::CorruptPersistedState(e.to_string());
                tracing::warn!(%error, "discarding persisted wallet");
                self.clear();
                None
            }
        }
    }

    pub fn save(&self, snapshot: &WalletSnapshot) {
        let result = serde_json::to_string(snapshot)
            .map_err(|e| e.to_string())
            .and_then(|raw| {
                self.storage
                    .set(SESSION_KEY, raw)
                    .map_err(|e| e.to_string())
            });
        if let Err(e) = result {
            tracing::warn!(error = %e, "failed to persist wallet");
        }
    }

    pub fn clear(&self) {
        if let Err(e) = self.storage.remove(SESSION_KEY) {
            tracing::warn!(error = %e, "failed to clear persisted wallet");
        }
    }
}
