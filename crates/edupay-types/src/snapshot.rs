use serde::{Deserialize, Serialize};

use crate::provider::ProviderKind;

/// Normalized, display-ready state of a connected wallet.
///
/// A snapshot is a value: updates build a new snapshot and replace the old one
/// wholesale. `address` keeps the provider's own format (hex, base58, `0.0.n`) and is
/// never rewritten. `balance` is a formatted string such as `"1.2345 ETH"` and is not
/// meant for arithmetic.
///
/// The serialized form matches the session payload the marketplace pages read:
///
/// ```json
/// {
///   "address": "0.0.123456",
///   "network": "Hedera Testnet",
///   "balance": "1250.5000 HBAR",
///   "provider": "Hashpack",
///   "nfts": 3,
///   "transactions": 47
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletSnapshot {
    pub address: String,
    pub network: String,
    pub balance: String,
    pub provider: ProviderKind,
    #[serde(rename = "nfts", default)]
    pub nft_count: u32,
    #[serde(rename = "transactions", default)]
    pub tx_count: u64,
}

impl WalletSnapshot {
    /// Returns a copy of this snapshot showing a different balance.
    pub fn with_balance(&self, balance: impl Into<String>) -> Self {
        Self {
            balance: balance.into(),
            ..self.clone()
        }
    }

    /// Whether `other` describes the same wallet, regardless of balance or counters.
    pub fn same_wallet(&self, other: &WalletSnapshot) -> bool {
        self.provider == other.provider && self.address == other.address
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot() -> WalletSnapshot {
        WalletSnapshot {
            address: "0xAbCdEf0000000000000000000000000000001234".to_string(),
            network: "Polygon".to_string(),
            balance: "0.5000 ETH".to_string(),
            provider: ProviderKind::Evm,
            nft_count: 0,
            tx_count: 12,
        }
    }

    #[test]
    fn test_snapshot_json_shape() {
        let json = serde_json::to_value(snapshot()).unwrap();
        assert_eq!(json["provider"], "MetaMask");
        assert_eq!(json["nfts"], 0);
        assert_eq!(json["transactions"], 12);
        assert_eq!(
            json["address"],
            "0xAbCdEf0000000000000000000000000000001234"
        );
    }

    #[test]
    fn test_snapshot_counters_default_when_absent() {
        let json = r#"{"address":"So1ana","network":"Solana","balance":"0 SOL","provider":"Phantom"}"#;
        let snapshot: WalletSnapshot = serde_json::from_str(json).unwrap();
        assert_eq!(snapshot.nft_count, 0);
        assert_eq!(snapshot.tx_count, 0);
    }

    #[test]
    fn test_with_balance_keeps_identity() {
        let original = snapshot();
        let updated = original.with_balance("0.2500 ETH");
        assert_eq!(updated.balance, "0.2500 ETH");
        assert_eq!(original.balance, "0.5000 ETH");
        assert!(updated.same_wallet(&original));
    }
}
