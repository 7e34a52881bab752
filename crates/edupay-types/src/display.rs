//! Presentation helpers for wallet addresses.

use crate::provider::ProviderKind;
use crate::snapshot::WalletSnapshot;

/// Shortens an address for the wallet button.
///
/// Hedera account ids (`0.0.123456`) are short already and shown whole.
pub fn shorten_address(address: &str) -> String {
    if address.is_empty() || address.contains('.') {
        return address.to_string();
    }
    let chars: Vec<char> = address.chars().collect();
    if chars.len() <= 10 {
        return address.to_string();
    }
    let head: String = chars[..6].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{head}...{tail}")
}

/// Block explorer page for the connected account.
pub fn explorer_url(snapshot: &WalletSnapshot) -> String {
    let address = &snapshot.address;
    match snapshot.provider {
        ProviderKind::DemoLedger => format!("https://hashscan.io/testnet/account/{address}"),
        ProviderKind::Solana => format!("https://explorer.solana.com/address/{address}"),
        ProviderKind::Evm if snapshot.network == "Polygon" => {
            format!("https://polygonscan.com/address/{address}")
        }
        ProviderKind::Evm => format!("https://etherscan.io/address/{address}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(provider: ProviderKind, network: &str, address: &str) -> WalletSnapshot {
        WalletSnapshot {
            address: address.to_string(),
            network: network.to_string(),
            balance: "0".to_string(),
            provider,
            nft_count: 0,
            tx_count: 0,
        }
    }

    #[test]
    fn test_shorten_hex_address() {
        assert_eq!(
            shorten_address("0x1234567890abcdef1234567890abcdef12345678"),
            "0x1234...5678"
        );
    }

    #[test]
    fn test_shorten_keeps_hedera_account_id() {
        assert_eq!(shorten_address("0.0.123456"), "0.0.123456");
        assert_eq!(shorten_address(""), "");
    }

    #[test]
    fn test_explorer_urls() {
        let polygon = snapshot(ProviderKind::Evm, "Polygon", "0xabc");
        assert_eq!(explorer_url(&polygon), "https://polygonscan.com/address/0xabc");
        let arbitrum = snapshot(ProviderKind::Evm, "Arbitrum", "0xabc");
        assert_eq!(explorer_url(&arbitrum), "https://etherscan.io/address/0xabc");
        let demo = snapshot(ProviderKind::DemoLedger, "Hedera Testnet", "0.0.123456");
        assert_eq!(
            explorer_url(&demo),
            "https://hashscan.io/testnet/account/0.0.123456"
        );
    }
}
