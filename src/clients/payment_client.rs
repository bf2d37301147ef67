use tracing::{debug, instrument};

use crate::actor_framework::StoreClient;
use crate::domain::PaymentId;
use crate::error::ShopResult;
use crate::payment_actor::{actions, CreatePaymentRequest, PaymentCreated, PaymentOutcome};

/// Client for the payment workflow.
#[derive(Clone)]
pub struct PaymentClient {
    store: StoreClient,
}

impl_client_new!(PaymentClient);

impl PaymentClient {
    #[instrument(skip(self))]
    pub async fn create_payment(
        &self,
        email: &str,
        request: CreatePaymentRequest,
    ) -> ShopResult<PaymentCreated> {
        debug!("Sending request");
        let email = email.to_string();
        self.store
            .transact("create_payment", move |tx| {
                actions::create_payment(tx, &email, request)
            })
            .await
    }

    #[instrument(skip(self))]
    pub async fn confirm_payment(
        &self,
        email: &str,
        payment_id: PaymentId,
    ) -> ShopResult<PaymentOutcome> {
        debug!("Sending request");
        let email = email.to_string();
        self.store
            .transact("confirm_payment", move |tx| {
                actions::confirm_payment(tx, &email, payment_id)
            })
            .await
    }

    #[instrument(skip(self))]
    pub async fn cancel_payment(
        &self,
        email: &str,
        payment_id: PaymentId,
    ) -> ShopResult<PaymentOutcome> {
        debug!("Sending request");
        let email = email.to_string();
        self.store
            .transact("cancel_payment", move |tx| {
                actions::cancel_payment(tx, &email, payment_id)
            })
            .await
    }
}
