use solana_client::client_error::ClientError;
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_client::rpc_client::GetConfirmedSignaturesForAddress2Config;
use solana_pubkey::Pubkey;

/// Upper bound of signatures read to estimate an account's activity.
pub const SIGNATURE_LIMIT: usize = 1000;

#[derive(Debug, thiserror::Error)]
pub enum SolanaRpcError {
    #[error(transparent)]
    Client(Box<ClientError>),
    #[error("{0}")]
    Custom(String),
}

impl From<ClientError> for SolanaRpcError {
    fn from(error: ClientError) -> Self {
        SolanaRpcError::Client(Box::new(error))
    }
}

/// The Solana JSON-RPC calls the wallet adapter needs.
pub trait SolanaRpc: Send + Sync {
    /// Balance in lamports (`getBalance`).
    fn get_balance(
        &self,
        pubkey: &Pubkey,
    ) -> impl Future<Output = Result<u64, SolanaRpcError>> + Send;

    /// Number of signatures involving `pubkey`, at most `limit` (`getSignaturesForAddress`).
    fn get_signature_count(
        &self,
        pubkey: &Pubkey,
        limit: usize,
    ) -> impl Future<Output = Result<usize, SolanaRpcError>> + Send;
}

impl SolanaRpc for RpcClient {
    async fn get_balance(&self, pubkey: &Pubkey) -> Result<u64, SolanaRpcError> {
        let lamports = RpcClient::get_balance(self, pubkey).await?;
        Ok(lamports)
    }

    async fn get_signature_count(
        &self,
        pubkey: &Pubkey,
        limit: usize,
    ) -> Result<usize, SolanaRpcError> {
        let config = GetConfirmedSignaturesForAddress2Config {
            limit: Some(limit),
            ..Default::default()
        };
        let signatures = self
            .get_signatures_for_address_with_config(pubkey, config)
            .await?;
        Ok(signatures.len())
    }
}
