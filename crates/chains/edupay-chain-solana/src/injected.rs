//! The injected Solana wallet seam.
//!
//! Phantom-style wallets expose a `connect()` that prompts the visitor and resolves to
//! the wallet's public key. [`WatchOnlySolanaWallet`] stands in for it in a headless
//! process: it is configured with a public key and hands it out without a prompt.

use solana_pubkey::Pubkey;

/// Wallet error code for a request the user declined.
pub const USER_REJECTED_CODE: i64 = 4001;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InjectedWalletError {
    #[error("User rejected the request")]
    UserRejected,
    #[error("{message}")]
    Wallet { code: Option<i64>, message: String },
}

impl InjectedWalletError {
    /// Maps a wallet error code, treating 4001 as a user rejection.
    pub fn from_code(code: Option<i64>, message: impl Into<String>) -> Self {
        match code {
            Some(USER_REJECTED_CODE) => InjectedWalletError::UserRejected,
            code => InjectedWalletError::Wallet {
                code,
                message: message.into(),
            },
        }
    }
}

#[async_trait::async_trait]
pub trait InjectedSolanaWallet: Send + Sync {
    /// Whether the wallet announces itself as Phantom (`window.solana.isPhantom`).
    fn is_phantom(&self) -> bool;

    async fn connect(&self) -> Result<Pubkey, InjectedWalletError>;
}

#[derive(Debug, Clone)]
pub struct WatchOnlySolanaWallet {
    pubkey: Pubkey,
    announce_phantom: bool,
}

impl WatchOnlySolanaWallet {
    pub fn new(pubkey: Pubkey) -> Self {
        Self {
            pubkey,
            announce_phantom: true,
        }
    }

    pub fn with_announce_phantom(mut self, announce_phantom: bool) -> Self {
        self.announce_phantom = announce_phantom;
        self
    }
}

#[async_trait::async_trait]
impl InjectedSolanaWallet for WatchOnlySolanaWallet {
    fn is_phantom(&self) -> bool {
        self.announce_phantom
    }

    async fn connect(&self) -> Result<Pubkey, InjectedWalletError> {
        Ok(self.pubkey)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(
            InjectedWalletError::from_code(Some(4001), "declined"),
            InjectedWalletError::UserRejected
        );
        assert_eq!(
            InjectedWalletError::from_code(None, "locked").to_string(),
            "locked"
        );
    }

    #[tokio::test]
    async fn test_watch_only_connect() {
        let pubkey = Pubkey::new_from_array([7u8; 32]);
        let wallet = WatchOnlySolanaWallet::new(pubkey).with_announce_phantom(false);
        assert!(!wallet.is_phantom());
        assert_eq!(wallet.connect().await.unwrap(), pubkey);
    }
}
