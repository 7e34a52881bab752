use alloy_primitives::Address;
use edupay_types::config::LiteralOrEnv;
use serde::Deserialize;
use url::Url;

/// Configuration of the injected EVM provider.
///
/// Without this section the EVM wallet is reported as not installed.
///
/// ```json
/// {
///   "rpc": "$EVM_WALLET_RPC",
///   "account": "0x000000000000000000000000000000000000dEaD",
///   "announceMetamask": true
/// }
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Eip155ProviderConfig {
    /// JSON-RPC endpoint the provider forwards requests to.
    pub rpc: LiteralOrEnv<Url>,
    /// Watch-only account returned for `eth_requestAccounts`.
    #[serde(default)]
    pub account: Option<LiteralOrEnv<Address>>,
    /// Whether the provider announces itself as MetaMask.
    #[serde(default = "eip155_provider_config::default_announce_metamask")]
    pub announce_metamask: bool,
}

mod eip155_provider_config {
    pub fn default_announce_metamask() -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config: Eip155ProviderConfig =
            serde_json::from_str(r#"{"rpc": "http://localhost:8545"}"#).unwrap();
        assert!(config.announce_metamask);
        assert!(config.account.is_none());
        assert_eq!(config.rpc.port(), Some(8545));
    }

    #[test]
    fn test_account() {
        let config: Eip155ProviderConfig = serde_json::from_str(
            r#"{"rpc": "http://localhost:8545", "account": "0x000000000000000000000000000000000000dEaD", "announceMetamask": false}"#,
        )
        .unwrap();
        assert!(!config.announce_metamask);
        assert!(config.account.is_some());
    }
}
