//! Wallet provider configuration.
//!
//! ```json
//! {
//!   "evm": { "rpc": "$EVM_WALLET_RPC" },
//!   "solana": { "rpc": "https://api.mainnet-beta.solana.com", "wallet": "$SOLANA_WALLET_PUBKEY" },
//!   "demo": { "connectLatencyMs": 1500, "settlementLatencyMs": 2000 }
//! }
//! ```
//!
//! Every section is optional. A wallet without the environment it needs (no EVM
//! endpoint, no Solana key) is still offered, but reported as not installed.

use edupay_chain_demo::DemoProviderConfig;
use edupay_chain_eip155::Eip155ProviderConfig;
use edupay_chain_solana::SolanaProviderConfig;
use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProvidersConfig {
    #[serde(default)]
    pub evm: Option<Eip155ProviderConfig>,
    #[serde(default)]
    pub solana: SolanaProviderConfig,
    #[serde(default)]
    pub demo: DemoProviderConfig,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config() {
        let config: ProvidersConfig = serde_json::from_str("{}").unwrap();
        assert!(config.evm.is_none());
        assert!(config.solana.wallet.is_none());
        assert_eq!(config.demo.connect_latency_ms, 1500);
    }

    #[test]
    fn test_full_config() {
        let config: ProvidersConfig = serde_json::from_str(
            r#"{
                "evm": { "rpc": "http://localhost:8545" },
                "solana": { "wallet": "9WzDXwBbmkg8ZTbNMqUxvQRAyrZzDsGYdLVL9zYtAWWM" },
                "demo": { "connectLatencyMs": 0, "settlementLatencyMs": 0 }
            }"#,
        )
        .unwrap();
        assert!(config.evm.is_some());
        assert!(config.solana.wallet.is_some());
        assert_eq!(config.demo.settlement_latency_ms, 0);
    }
}
