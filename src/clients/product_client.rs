use tracing::{debug, instrument};

use crate::actor_framework::StoreClient;
use crate::domain::{Product, ProductId};
use crate::error::ShopResult;
use crate::product_actor::{actions, ProductSummary};

/// Client for the product catalog.
#[derive(Clone)]
pub struct ProductClient {
    store: StoreClient,
}

impl_client_new!(ProductClient);

impl ProductClient {
    #[instrument(skip(self))]
    pub async fn list_products(&self) -> ShopResult<Vec<ProductSummary>> {
        debug!("Sending request");
        self.store
            .transact("list_products", |tx| Ok(actions::list_products(tx)))
            .await
    }

    #[instrument(skip(self))]
    pub async fn get_product(&self, id: ProductId) -> ShopResult<ProductSummary> {
        debug!("Sending request");
        self.store
            .transact("get_product", move |tx| {
                actions::get_product(tx, id).map(|product| ProductSummary::from(&product))
            })
            .await
    }

    /// Loads `products` unless the catalog already has rows.
    #[instrument(skip(self, products), fields(count = products.len()))]
    pub async fn seed_catalog(&self, products: Vec<Product>) -> ShopResult<usize> {
        debug!("Sending request");
        self.store
            .transact("seed_catalog", move |tx| Ok(actions::seed_catalog(tx, products)))
            .await
    }
}
