use edupay_types::snapshot::WalletSnapshot;
use rust_decimal::Decimal;
use tokio::sync::watch;

use crate::controller::{ConnectionController, ConnectionState};
use crate::payment::PaymentDispatcher;

/// Read access to the connected wallet plus the payment entry point.
///
/// Handed to any component that needs the wallet without owning the connection:
/// course pages read [`WalletContext::current_wallet`] and call [`WalletContext::pay`].
/// Clones are cheap and observe the same state.
#[derive(Debug, Clone)]
pub struct WalletContext {
    state: watch::Receiver<ConnectionState>,
    dispatcher: PaymentDispatcher,
}

impl WalletContext {
    pub(crate) fn new(controller: ConnectionController) -> Self {
        Self {
            state: controller.subscribe(),
            dispatcher: PaymentDispatcher::new(controller),
        }
    }

    pub fn current_wallet(&self) -> Option<WalletSnapshot> {
        self.state.borrow().snapshot().cloned()
    }

    pub fn state(&self) -> ConnectionState {
        self.state.borrow().clone()
    }

    /// Resolves when the connection state changes. Returns `false` once the controller
    /// is gone.
    pub async fn changed(&mut self) -> bool {
        self.state.changed().await.is_ok()
    }

    /// See [`PaymentDispatcher::pay`].
    pub async fn pay(&self, amount: Decimal, reference_currency: &str) -> bool {
        self.dispatcher.pay(amount, reference_currency).await
    }

    pub fn dispatcher(&self) -> &PaymentDispatcher {
        &self.dispatcher
    }
}
