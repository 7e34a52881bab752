//! Paying for a course with the connected wallet.

use edupay_types::error::WalletError;
use edupay_types::notification::Notification;
use edupay_types::provider::Settlement;
use edupay_types::rates::{CryptoCurrency, ReferenceCurrency};
use edupay_types::snapshot::WalletSnapshot;
use edupay_types::util::format_amount;
use rust_decimal::Decimal;

use crate::controller::ConnectionController;

/// A completed payment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentReceipt {
    /// Amount charged, in the wallet's native currency.
    pub amount: Decimal,
    pub currency: CryptoCurrency,
    pub settlement: Settlement,
}

/// Converts course prices into the connected wallet's currency and settles them.
///
/// Payments are serialized: a second payment waits until the first has settled.
#[derive(Debug, Clone)]
pub struct PaymentDispatcher {
    controller: ConnectionController,
}

impl PaymentDispatcher {
    pub fn new(controller: ConnectionController) -> Self {
        Self { controller }
    }

    /// Pays `amount` of `reference_currency` with the connected wallet.
    ///
    /// Reports the outcome to the visitor and returns whether the payment went through.
    /// Never fails otherwise.
    pub async fn pay(&self, amount: Decimal, reference_currency: &str) -> bool {
        self.try_pay(amount, reference_currency).await.is_ok()
    }

    /// Like [`PaymentDispatcher::pay`], returning the receipt or the reason for failure.
    #[tracing::instrument(skip_all, fields(%amount, currency = reference_currency))]
    pub async fn try_pay(
        &self,
        amount: Decimal,
        reference_currency: &str,
    ) -> Result<PaymentReceipt, WalletError> {
        let _guard = self.controller.payment_lock().lock().await;
        let notifier = self.controller.notifier();

        let Some(snapshot) = self.controller.current_wallet() else {
            let error = WalletError::NoWalletConnected;
            notifier.notify(Notification::destructive(
                "No wallet connected",
                error.to_string(),
            ));
            return Err(error);
        };

        match self.settle(&snapshot, amount, reference_currency).await {
            Ok(receipt) => {
                tracing::info!(amount = %receipt.amount, currency = %receipt.currency, "payment successful");
                notifier.notify(Notification::info(
                    "Payment successful",
                    format!(
                        "Payment of {} completed successfully!",
                        format_amount(receipt.amount, receipt.currency)
                    ),
                ));
                Ok(receipt)
            }
            Err(error @ WalletError::InsufficientBalance { .. }) => {
                tracing::info!(%error, "payment refused");
                notifier.notify(Notification::destructive(
                    "Insufficient balance",
                    error.to_string(),
                ));
                Err(error)
            }
            Err(error) => {
                tracing::warn!(%error, "payment failed");
                notifier.notify(Notification::destructive(
                    "Payment failed",
                    "There was an error processing your payment",
                ));
                Err(error)
            }
        }
    }

    async fn settle(
        &self,
        snapshot: &WalletSnapshot,
        amount: Decimal,
        reference_currency: &str,
    ) -> Result<PaymentReceipt, WalletError> {
        let reference: ReferenceCurrency = reference_currency.parse()?;
        let currency = snapshot.provider.currency();
        let crypto_amount = reference.convert(amount, currency)?;
        let provider = self
            .controller
            .registry()
            .get(snapshot.provider)
            .ok_or(WalletError::NotInstalled {
                provider: snapshot.provider,
            })?;

        if let Some(available) = provider.available_balance().await? {
            if available < crypto_amount {
                return Err(WalletError::InsufficientBalance {
                    required: crypto_amount,
                    available,
                    currency,
                });
            }
        }

        self.controller.notifier().notify(Notification::info(
            "Processing payment",
            format!("Sending {}...", format_amount(crypto_amount, currency)),
        ));
        let settlement = provider.settle(snapshot, crypto_amount).await?;
        if let Settlement::Debited { balance } = &settlement {
            self.controller
                .replace_snapshot(snapshot.with_balance(balance.clone()));
        }
        Ok(PaymentReceipt {
            amount: crypto_amount,
            currency,
            settlement,
        })
    }
}
