use edupay_types::config::LiteralOrEnv;
use serde::Deserialize;
use solana_pubkey::Pubkey;
use url::Url;

pub const DEFAULT_RPC: &str = "https://api.mainnet-beta.solana.com";

/// Configuration of the Solana wallet adapter.
///
/// ```json
/// {
///   "rpc": "https://api.mainnet-beta.solana.com",
///   "wallet": "$SOLANA_WALLET_PUBKEY"
/// }
/// ```
///
/// Without a `wallet` the Phantom wallet is reported as not installed.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SolanaProviderConfig {
    #[serde(default = "solana_provider_config::default_rpc")]
    pub rpc: LiteralOrEnv<Url>,
    /// Public key of the watch-only wallet.
    #[serde(default)]
    pub wallet: Option<LiteralOrEnv<Pubkey>>,
    #[serde(default = "solana_provider_config::default_announce_phantom")]
    pub announce_phantom: bool,
}

impl Default for SolanaProviderConfig {
    fn default() -> Self {
        Self {
            rpc: solana_provider_config::default_rpc(),
            wallet: None,
            announce_phantom: solana_provider_config::default_announce_phantom(),
        }
    }
}

mod solana_provider_config {
    use super::*;

    pub fn default_rpc() -> LiteralOrEnv<Url> {
        LiteralOrEnv::from_literal(Url::parse(DEFAULT_RPC).expect("valid default Solana RPC URL"))
    }

    pub fn default_announce_phantom() -> bool {
        true
    }
}
