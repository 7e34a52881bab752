//! The demo ledger account store.
//!
//! The demo wallet never touches a network. Its only state is one account with a
//! numeric balance, which is the authoritative value behind the displayed balance
//! string. The account is written through to session storage so a restarted process
//! can pick it up again.

use edupay_types::error::{RefreshError, WalletError};
use edupay_types::rates::CryptoCurrency;
use edupay_types::storage::SessionStorage;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;

/// Session storage key of the persisted account.
pub const STORAGE_KEY: &str = "demoLedgerAccount";

pub const DEMO_ACCOUNT_ID: &str = "0.0.123456";

/// Balance of a freshly opened account, in HBAR.
pub fn opening_balance() -> Decimal {
    Decimal::new(12505, 1)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DemoLedgerAccount {
    pub account_id: String,
    pub balance: Decimal,
}

impl DemoLedgerAccount {
    pub fn opening() -> Self {
        Self {
            account_id: DEMO_ACCOUNT_ID.to_string(),
            balance: opening_balance(),
        }
    }
}

/// Shared handle to the demo account.
///
/// Clones share the same account. Every read and write goes through one async lock,
/// so a debit's balance check, its processing delay and the debit itself are never
/// interleaved with another debit.
#[derive(Debug, Clone, Default)]
pub struct DemoLedger {
    inner: Arc<DemoLedgerInner>,
}

#[derive(Debug, Default)]
struct DemoLedgerInner {
    account: Mutex<Option<DemoLedgerAccount>>,
    storage: Option<Arc<dyn SessionStorage>>,
}

impl DemoLedger {
    pub fn new(storage: Option<Arc<dyn SessionStorage>>) -> Self {
        Self {
            inner: Arc::new(DemoLedgerInner {
                account: Mutex::new(None),
                storage,
            }),
        }
    }

    /// Opens the demo account with the opening balance, replacing any previous one.
    pub async fn open(&self) -> DemoLedgerAccount {
        let mut slot = self.inner.account.lock().await;
        let account = DemoLedgerAccount::opening();
        self.persist(&account);
        *slot = Some(account.clone());
        account
    }

    /// Current account, if one is open here or was persisted by an earlier process.
    pub async fn account(&self) -> Option<DemoLedgerAccount> {
        let mut slot = self.inner.account.lock().await;
        self.rehydrate(&mut slot);
        slot.clone()
    }

    pub async fn balance(&self) -> Result<Decimal, RefreshError> {
        self.account()
            .await
            .map(|account| account.balance)
            .ok_or_else(|| RefreshError::Unavailable("Demo ledger account is not open".to_string()))
    }

    /// Debits `amount` after `latency`, returning the new balance.
    ///
    /// Fails with [`WalletError::InsufficientBalance`] and leaves the balance untouched
    /// when the account cannot cover `amount`.
    pub async fn debit(&self, amount: Decimal, latency: Duration) -> Result<Decimal, WalletError> {
        let mut slot = self.inner.account.lock().await;
        self.rehydrate(&mut slot);
        let available = slot
            .as_ref()
            .map(|account| account.balance)
            .ok_or_else(|| WalletError::Provider("Demo ledger account is not open".to_string()))?;
        if available < amount {
            return Err(WalletError::InsufficientBalance {
                required: amount,
                available,
                currency: CryptoCurrency::Hbar,
            });
        }
        tokio::time::sleep(latency).await;
        let account = DemoLedgerAccount {
            account_id: slot
                .as_ref()
                .map(|account| account.account_id.clone())
                .unwrap_or_else(|| DEMO_ACCOUNT_ID.to_string()),
            balance: available - amount,
        };
        self.persist(&account);
        let balance = account.balance;
        *slot = Some(account);
        tracing::debug!(%amount, %balance, "demo ledger debited");
        Ok(balance)
    }

    fn rehydrate(&self, slot: &mut Option<DemoLedgerAccount>) {
        if slot.is_some() {
            return;
        }
        let Some(storage) = &self.inner.storage else {
            return;
        };
        match storage.get(STORAGE_KEY) {
            Ok(Some(raw)) => match serde_json::from_str::<DemoLedgerAccount>(&raw) {
                Ok(account) => {
                    tracing::debug!(account_id = %account.account_id, balance = %account.balance, "demo ledger rehydrated");
                    *slot = Some(account);
                }
                Err(e) => {
                    tracing::warn!(error = %e, "discarding corrupt demo ledger account");
                    if let Err(e) = storage.remove(STORAGE_KEY) {
                        tracing::warn!(error = %e, "failed to remove demo ledger account");
                    }
                }
            },
            Ok(None) => {}
            Err(e) => tracing::warn!(error = %e, "failed to read demo ledger account"),
        }
    }

    fn persist(&self, account: &DemoLedgerAccount) {
        let Some(storage) = &self.inner.storage else {
            return;
        };
        let result = serde_json::to_string(account)
            .map_err(|e| e.to_string())
            .and_then(|raw| storage.set(STORAGE_KEY, raw).map_err(|e| e.to_string()));
        if let Err(e) = result {
            tracing::warn!(error = %e, "failed to persist demo ledger account");
        }
    }
}
