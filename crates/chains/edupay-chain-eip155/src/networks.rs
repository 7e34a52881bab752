//! Display names of the EVM networks the marketplace recognizes.
//!
//! Chain ids arrive from the wallet as hex quantities (`"0x89"`). They are compared
//! numerically, so `"0x01"` and `"0x1"` name the same chain.

/// Shown for any chain id outside the table. Not an error.
pub const UNKNOWN_NETWORK: &str = "Unknown Network";

/// `(chain id, display name)` pairs of the known networks.
pub const KNOWN_NETWORKS: [(u64, &str); 4] = [
    (1, "Ethereum Mainnet"),
    (137, "Polygon"),
    (10, "Optimism"),
    (42161, "Arbitrum"),
];

/// Display name of a numeric chain id.
pub fn network_name(chain_id: u64) -> &'static str {
    KNOWN_NETWORKS
        .iter()
        .find(|(id, _)| *id == chain_id)
        .map(|(_, name)| *name)
        .unwrap_or(UNKNOWN_NETWORK)
}

/// Display name of a hex chain id as returned by `eth_chainId`.
pub fn network_name_from_hex(chain_id: &str) -> &'static str {
    parse_chain_id(chain_id)
        .map(network_name)
        .unwrap_or(UNKNOWN_NETWORK)
}

/// Parses a `0x`-prefixed hex quantity into a chain id.
pub fn parse_chain_id(chain_id: &str) -> Option<u64> {
    let digits = chain_id
        .strip_prefix("0x")
        .or_else(|| chain_id.strip_prefix("0X"))?;
    u64::from_str_radix(digits, 16).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_chain_ids() {
        assert_eq!(network_name_from_hex("0x1"), "Ethereum Mainnet");
        assert_eq!(network_name_from_hex("0x89"), "Polygon");
        assert_eq!(network_name_from_hex("0xa"), "Optimism");
        assert_eq!(network_name_from_hex("0xa4b1"), "Arbitrum");
    }

    #[test]
    fn test_chain_ids_compare_numerically() {
        assert_eq!(network_name_from_hex("0x01"), "Ethereum Mainnet");
        assert_eq!(network_name_from_hex("0xA4B1"), "Arbitrum");
    }

    #[test]
    fn test_unknown_chain_ids() {
        assert_eq!(network_name_from_hex("0x2105"), UNKNOWN_NETWORK);
        assert_eq!(network_name_from_hex("garbage"), UNKNOWN_NETWORK);
        assert_eq!(network_name_from_hex("0x"), UNKNOWN_NETWORK);
    }
}
