//! HTTP endpoints over the wallet session.
//!
//! Each handler is a thin call into [`ConnectionController`]; the controller already
//! reports outcomes to the visitor through its notifier, so handlers only translate
//! results into status codes.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use edupay::ConnectionController;
use edupay_types::display::{explorer_url, shorten_address};
use edupay_types::error::WalletError;
use edupay_types::provider::{ProviderKind, UnknownProviderError};
use edupay_types::util::MoneyAmount;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::instrument;

pub fn routes() -> Router<ConnectionController> {
    Router::new()
        .route("/providers", get(get_providers))
        .route("/wallet", get(get_wallet))
        .route("/state", get(get_state))
        .route("/explorer", get(get_explorer))
        .route("/connect", post(post_connect))
        .route("/disconnect", post(post_disconnect))
        .route("/pay", post(post_pay))
}

#[derive(Debug, thiserror::Error)]
pub enum BridgeError {
    #[error(transparent)]
    Wallet(#[from] WalletError),
    #[error(transparent)]
    UnknownProvider(#[from] UnknownProviderError),
    #[error("No wallet connected")]
    NoWallet,
}

impl BridgeError {
    fn status(&self) -> StatusCode {
        match self {
            BridgeError::UnknownProvider(_) => StatusCode::BAD_REQUEST,
            BridgeError::NoWallet => StatusCode::NOT_FOUND,
            BridgeError::Wallet(WalletError::NotInstalled { .. }) => StatusCode::NOT_FOUND,
            BridgeError::Wallet(WalletError::ConnectionInFlight | WalletError::AlreadyConnected) => {
                StatusCode::CONFLICT
            }
            BridgeError::Wallet(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for BridgeError {
    fn into_response(self) -> Response {
        (self.status(), Json(json!({ "error": self.to_string() }))).into_response()
    }
}

#[derive(Debug, Deserialize)]
pub struct ConnectRequest {
    /// Wallet brand name, matched case-insensitively.
    pub provider: String,
}

#[derive(Debug, Deserialize)]
pub struct PayRequest {
    pub amount: MoneyAmount,
    #[serde(default)]
    pub currency: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PayResponse {
    pub success: bool,
}

/// `GET /providers`: the wallet picker.
#[instrument(skip_all)]
pub async fn get_providers(State(controller): State<ConnectionController>) -> impl IntoResponse {
    Json(controller.detect_providers())
}

/// `GET /wallet`: the connected wallet, or `null`.
#[instrument(skip_all)]
pub async fn get_wallet(State(controller): State<ConnectionController>) -> impl IntoResponse {
    Json(controller.current_wallet())
}

#[instrument(skip_all)]
pub async fn get_state(State(controller): State<ConnectionController>) -> impl IntoResponse {
    Json(controller.state())
}

/// `GET /explorer`: where the visitor can inspect the connected wallet, with the
/// address shortened for the link text.
#[instrument(skip_all)]
pub async fn get_explorer(
    State(controller): State<ConnectionController>,
) -> Result<impl IntoResponse, BridgeError> {
    let snapshot = controller.current_wallet().ok_or(BridgeError::NoWallet)?;
    Ok(Json(json!({
        "url": explorer_url(&snapshot),
        "label": shorten_address(&snapshot.address),
    })))
}

/// `POST /connect`: connects the named wallet and returns its snapshot.
#[instrument(skip_all, fields(provider = %body.provider))]
pub async fn post_connect(
    State(controller): State<ConnectionController>,
    Json(body): Json<ConnectRequest>,
) -> Result<impl IntoResponse, BridgeError> {
    let kind: ProviderKind = body.provider.parse()?;
    let snapshot = controller.select_provider(kind).await?;
    Ok(Json(snapshot))
}

#[instrument(skip_all)]
pub async fn post_disconnect(State(controller): State<ConnectionController>) -> StatusCode {
    controller.disconnect();
    StatusCode::NO_CONTENT
}

/// `POST /pay`: always answers 200 with `{ "success": bool }`.
#[instrument(skip_all, fields(amount = %body.amount))]
pub async fn post_pay(
    State(controller): State<ConnectionController>,
    Json(body): Json<PayRequest>,
) -> impl IntoResponse {
    let currency = body.currency.as_deref().unwrap_or("USD");
    let success = controller
        .context()
        .pay(body.amount.to_decimal(), currency)
        .await;
    Json(PayResponse { success })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{Body, to_bytes};
    use axum::http::Request;
    use edupay::{Notifier, ProviderRegistry, ProvidersConfig, SessionStore};
    use edupay_types::snapshot::WalletSnapshot;
    use edupay_types::storage::{MemorySessionStorage, SessionStorage};
    use serde_json::Value;
    use std::sync::Arc;
    use tower::ServiceExt;

    fn controller() -> ConnectionController {
        let storage: Arc<dyn SessionStorage> = Arc::new(MemorySessionStorage::new());
        let config: ProvidersConfig = serde_json::from_str(
            r#"{ "demo": { "connectLatencyMs": 0, "settlementLatencyMs": 0 } }"#,
        )
        .unwrap();
        let registry = ProviderRegistry::from_config(&config, Some(storage.clone()));
        ConnectionController::new(registry, SessionStore::new(storage), Notifier::new())
    }

    async fn call(
        controller: &ConnectionController,
        method: &str,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let request = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => request
                .header("content-type", "application/json")
                .body(Body::from(body.to_string())),
            None => request.body(Body::empty()),
        }
        .unwrap();
        let response = routes()
            .with_state(controller.clone())
            .oneshot(request)
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    #[tokio::test]
    async fn test_providers_listing() {
        let controller = controller();
        let (status, body) = call(&controller, "GET", "/providers", None).await;
        assert_eq!(status, StatusCode::OK);
        let names: Vec<_> = body
            .as_array()
            .unwrap()
            .iter()
            .map(|p| p["displayName"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(names, vec!["Hashpack", "MetaMask", "Phantom"]);
        assert_eq!(body[0]["installed"], Value::Bool(true));
        assert_eq!(body[1]["installed"], Value::Bool(false));
        assert_eq!(body[0]["supportedNetworks"], json!(["Hedera"]));
    }

    #[tokio::test]
    async fn test_connect_pay_disconnect() {
        let controller = controller();
        let (status, body) = call(&controller, "GET", "/wallet", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, Value::Null);

        let (status, body) = call(
            &controller,
            "POST",
            "/connect",
            Some(json!({ "provider": "hashpack" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let snapshot: WalletSnapshot = serde_json::from_value(body).unwrap();
        assert_eq!(snapshot.balance, "1250.5000 HBAR");

        let (status, body) = call(&controller, "GET", "/explorer", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body["url"],
            "https://hashscan.io/testnet/account/0.0.123456"
        );
        assert_eq!(body["label"], "0.0.123456");

        let (status, body) = call(
            &controller,
            "POST",
            "/pay",
            Some(json!({ "amount": "$49.99" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], Value::Bool(true));
        assert_eq!(
            controller.current_wallet().unwrap().balance,
            "750.6000 HBAR"
        );

        let (status, body) = call(
            &controller,
            "POST",
            "/pay",
            Some(json!({ "amount": 1000, "currency": "USD" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], Value::Bool(false));

        let (status, _) = call(&controller, "POST", "/disconnect", None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        assert!(controller.current_wallet().is_none());

        let (status, _) = call(&controller, "GET", "/explorer", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_connect_errors() {
        let controller = controller();
        let (status, body) = call(
            &controller,
            "POST",
            "/connect",
            Some(json!({ "provider": "MetaMask" })),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "MetaMask is not installed");

        let (status, _) = call(
            &controller,
            "POST",
            "/connect",
            Some(json!({ "provider": "Coinbase" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        call(
            &controller,
            "POST",
            "/connect",
            Some(json!({ "provider": "Hashpack" })),
        )
        .await;
        let (status, _) = call(
            &controller,
            "POST",
            "/connect",
            Some(json!({ "provider": "Hashpack" })),
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn test_pay_without_wallet() {
        let controller = controller();
        let (status, body) = call(&controller, "POST", "/pay", Some(json!({ "amount": 10 }))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], Value::Bool(false));
    }
}
