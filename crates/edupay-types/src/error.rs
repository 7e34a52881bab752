use rust_decimal::Decimal;

use crate::provider::ProviderKind;
use crate::rates::CryptoCurrency;
use crate::util::format_amount;

/// Failures of the connect and payment paths.
///
/// None of these is fatal to the host: connect failures leave the visitor disconnected,
/// payment failures leave the payment not completed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WalletError {
    #[error("{provider} is not installed")]
    NotInstalled { provider: ProviderKind },
    #[error("User rejected the connection request")]
    UserRejected,
    #[error("Network error: {0}")]
    NetworkError(String),
    #[error(
        "You need {} but only have {}",
        display_amount(.required, .currency),
        display_amount(.available, .currency)
    )]
    InsufficientBalance {
        required: Decimal,
        available: Decimal,
        currency: CryptoCurrency,
    },
    #[error("Please connect a wallet to make payments")]
    NoWalletConnected,
    #[error("Persisted wallet state is corrupt: {0}")]
    CorruptPersistedState(String),
    #[error("A wallet connection is already in progress")]
    ConnectionInFlight,
    #[error("A wallet is already connected")]
    AlreadyConnected,
    #[error("Unsupported reference currency {0}")]
    UnsupportedCurrency(String),
    #[error("Invalid payment amount: {0}")]
    InvalidAmount(String),
    #[error("{0}")]
    Provider(String),
}

fn display_amount(amount: &Decimal, currency: &CryptoCurrency) -> String {
    format_amount(*amount, *currency)
}

/// Failure of a best-effort balance refresh. Logged and discarded by callers.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RefreshError {
    #[error("Balance lookup failed: {0}")]
    Network(String),
    #[error("Balance source unavailable: {0}")]
    Unavailable(String),
}
