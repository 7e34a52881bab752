//! The injected EVM provider seam.
//!
//! Browser wallets expose an [EIP-1193] object with a single `request` method. The
//! adapter only ever talks to that shape, through [`Eip1193Provider`].
//! [`HttpEip1193Provider`] implements it on top of a JSON-RPC endpoint, which is how
//! the bridge process reaches a node (or a local dev chain with unlocked accounts).
//!
//! [EIP-1193]: https://eips.ethereum.org/EIPS/eip-1193

use alloy_primitives::Address;
use alloy_rpc_client::RpcClient;
use alloy_transport::TransportError;
use serde_json::Value;
use std::fmt::{Debug, Formatter};
use url::Url;

/// Provider error code for a request the user declined.
pub const USER_REJECTED_CODE: i64 = 4001;

/// Error returned by an EIP-1193 `request`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct Eip1193Error {
    pub code: Option<i64>,
    pub message: String,
}

impl Eip1193Error {
    pub fn new(code: i64, message: impl Into<String>) -> Self {
        Self {
            code: Some(code),
            message: message.into(),
        }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self {
            code: None,
            message: message.into(),
        }
    }

    pub fn user_rejected() -> Self {
        Self::new(USER_REJECTED_CODE, "User rejected the request.")
    }

    pub fn is_user_rejection(&self) -> bool {
        self.code == Some(USER_REJECTED_CODE)
    }
}

impl From<TransportError> for Eip1193Error {
    fn from(error: TransportError) -> Self {
        match error.as_error_resp() {
            Some(payload) => Eip1193Error::new(payload.code, payload.message.to_string()),
            None => Eip1193Error::transport(error.to_string()),
        }
    }
}

/// An EIP-1193 request interface.
#[async_trait::async_trait]
pub trait Eip1193Provider: Send + Sync {
    /// Whether the provider announces itself as MetaMask (`window.ethereum.isMetaMask`).
    fn is_metamask(&self) -> bool;

    async fn request(&self, method: &str, params: Value) -> Result<Value, Eip1193Error>;
}

/// [`Eip1193Provider`] backed by an HTTP JSON-RPC endpoint.
///
/// `eth_requestAccounts` has no meaning on a plain node. When a watch-only `account`
/// is configured it answers with that account; otherwise the request is forwarded as
/// `eth_accounts`, which dev chains answer with their unlocked accounts.
pub struct HttpEip1193Provider {
    client: RpcClient,
    endpoint: Url,
    account: Option<Address>,
    announce_metamask: bool,
}

impl HttpEip1193Provider {
    pub fn new(endpoint: Url) -> Self {
        let client = RpcClient::new_http(endpoint.clone());
        Self {
            client,
            endpoint,
            account: None,
            announce_metamask: true,
        }
    }

    pub fn with_account(mut self, account: Option<Address>) -> Self {
        self.account = account;
        self
    }

    pub fn with_announce_metamask(mut self, announce_metamask: bool) -> Self {
        self.announce_metamask = announce_metamask;
        self
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    async fn forward(&self, method: &str, params: Value) -> Result<Value, Eip1193Error> {
        let response = self
            .client
            .request::<Value, Value>(method.to_string(), params)
            .await?;
        Ok(response)
    }
}

impl Debug for HttpEip1193Provider {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpEip1193Provider")
            .field("endpoint", &self.endpoint.as_str())
            .field("account", &self.account)
            .field("announce_metamask", &self.announce_metamask)
            .finish()
    }
}

#[async_trait::async_trait]
impl Eip1193Provider for HttpEip1193Provider {
    fn is_metamask(&self) -> bool {
        self.announce_metamask
    }

    async fn request(&self, method: &str, params: Value) -> Result<Value, Eip1193Error> {
        tracing::trace!(endpoint = %self.endpoint, method, "eip1193 request");
        match (method, self.account) {
            ("eth_requestAccounts" | "eth_accounts", Some(account)) => {
                Ok(Value::Array(vec![Value::String(account.to_checksum(None))]))
            }
            ("eth_requestAccounts", None) => self.forward("eth_accounts", params).await,
            _ => self.forward(method, params).await,
        }
    }
}
