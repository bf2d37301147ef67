use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::{error, info};

use crate::actor_framework::{StoreActor, StoreClient};
use crate::app_system::ShopConfig;
use crate::clients::{OrderClient, PaymentClient, ProductClient, UserClient};
use crate::credentials::{Argon2Hasher, CredentialHasher};
use crate::error::{ShopError, ShopResult};
use crate::product_actor::actions::demo_catalog;

/// The running shop: the store task plus a client per workflow area.
///
/// Clients are cheap to clone and may be handed to any number of tasks.
pub struct ShopSystem {
    pub user_client: UserClient,
    pub product_client: ProductClient,
    pub order_client: OrderClient,
    pub payment_client: PaymentClient,
    store: StoreClient,
    handles: Vec<JoinHandle<()>>,
}

impl ShopSystem {
    /// Starts the store with an Argon2id hasher built from `config`.
    pub async fn start(config: ShopConfig) -> ShopResult<Self> {
        let hasher = Argon2Hasher::new(config.hash_memory_kib, config.hash_iterations)?;
        Self::start_with_hasher(config, Arc::new(hasher)).await
    }

    pub async fn start_with_hasher(
        config: ShopConfig,
        hasher: Arc<dyn CredentialHasher>,
    ) -> ShopResult<Self> {
        info!(?config, "Starting shop system");
        let (store_actor, store) = StoreActor::new(config.channel_buffer);
        let store_handle = tokio::spawn(store_actor.run());

        let system = Self {
            user_client: UserClient::new(store.clone(), hasher, config.signup_points),
            product_client: ProductClient::new(store.clone()),
            order_client: OrderClient::new(store.clone()),
            payment_client: PaymentClient::new(store.clone()),
            store,
            handles: vec![store_handle],
        };

        if config.seed_catalog {
            let seeded = system.product_client.seed_catalog(demo_catalog()?).await?;
            info!(seeded, "Catalog ready");
        }
        Ok(system)
    }

    pub async fn shutdown(self) -> ShopResult<()> {
        info!("Shutting down system...");
        self.store.shutdown().await?;

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Store task failed: {:?}", e);
                return Err(ShopError::Unavailable(format!("Store task failed: {e}")));
            }
        }

        info!("System shutdown complete.");
        Ok(())
    }
}
