use tracing::{debug, info, instrument};

use crate::actor_framework::StoreClient;
use crate::domain::OrderId;
use crate::error::ShopResult;
use crate::order_actor::{actions, CreateOrderRequest, OrderCreated, OrderSummary};

/// Client for placing and reading orders on behalf of a user.
///
/// Order creation reserves stock for every line in the same transaction as
/// the order itself, so a failing line leaves no stock reserved.
#[derive(Clone)]
pub struct OrderClient {
    store: StoreClient,
}

impl_client_new!(OrderClient);

impl OrderClient {
    #[instrument(skip(self, request), fields(lines = request.items.len()))]
    pub async fn create_order(
        &self,
        email: &str,
        request: CreateOrderRequest,
    ) -> ShopResult<OrderCreated> {
        info!("Processing create_order request (Client Side)");
        let email = email.to_string();
        self.store
            .transact("create_order", move |tx| {
                actions::create_order(tx, &email, request)
            })
            .await
    }

    /// The user's orders, newest first.
    #[instrument(skip(self))]
    pub async fn list_orders(&self, email: &str) -> ShopResult<Vec<OrderSummary>> {
        debug!("Sending request");
        let email = email.to_string();
        self.store
            .transact("list_orders", move |tx| actions::list_orders(tx, &email))
            .await
    }

    #[instrument(skip(self))]
    pub async fn get_order(&self, email: &str, id: OrderId) -> ShopResult<OrderSummary> {
        debug!("Sending request");
        let email = email.to_string();
        self.store
            .transact("get_order", move |tx| {
                actions::get_order(tx, &email, id).map(|order| OrderSummary::from(&order))
            })
            .await
    }
}
