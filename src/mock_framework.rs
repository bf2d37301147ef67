//! # Mock Framework
//!
//! Utilities for testing clients without a running store task.
//!
//! [`create_mock_store`] hands out a [`StoreClient`] wired to a receiver the
//! test controls. [`expect_transaction`] pulls the next submitted job so the
//! test can inspect its label and run it against fixture tables.

use tokio::sync::mpsc;

use crate::actor_framework::{Job, StoreClient, StoreRequest};

/// Creates a store client and the receiving end of its channel.
pub fn create_mock_store(buffer_size: usize) -> (StoreClient, mpsc::Receiver<StoreRequest>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (StoreClient::new(sender), receiver)
}

/// Returns the next request if it is a transaction.
pub async fn expect_transaction(
    receiver: &mut mpsc::Receiver<StoreRequest>,
) -> Option<(&'static str, Job)> {
    match receiver.recv().await {
        Some(StoreRequest::Transact { label, job }) => Some((label, job)),
        _ => None,
    }
}

/// Returns `true` if the next request is a shutdown.
pub async fn expect_shutdown(receiver: &mut mpsc::Receiver<StoreRequest>) -> bool {
    matches!(receiver.recv().await, Some(StoreRequest::Shutdown))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::ProductClient;
    use crate::domain::{Product, ProductId};
    use crate::error::ShopError;
    use crate::store::{Repository, Tables, Transaction};

    fn fixture_tables() -> Tables {
        let mut tables = Tables::default();
        let mut tx = Transaction::begin(&mut tables);
        tx.save(Product::new("USB-C Hub", 39_000, 100).unwrap());
        tx.commit();
        tables
    }

    #[tokio::test]
    async fn test_client_request_runs_against_fixture_tables() {
        let (store, mut receiver) = create_mock_store(10);
        let client = ProductClient::new(store);

        let task = tokio::spawn(async move { client.get_product(ProductId(1)).await });

        let (label, job) = expect_transaction(&mut receiver)
            .await
            .expect("Expected a transaction");
        assert_eq!(label, "get_product");
        let mut tables = fixture_tables();
        job(&mut tables);

        let product = task.await.unwrap().unwrap();
        assert_eq!(product.name, "USB-C Hub");
        assert_eq!(product.stock, 100);
    }

    #[tokio::test]
    async fn test_dropped_job_surfaces_as_unavailable() {
        let (store, mut receiver) = create_mock_store(10);
        let client = ProductClient::new(store);

        let task = tokio::spawn(async move { client.list_products().await });

        let (_, job) = expect_transaction(&mut receiver).await.unwrap();
        drop(job);

        assert!(matches!(task.await.unwrap(), Err(ShopError::Unavailable(_))));
    }

    #[tokio::test]
    async fn test_expect_shutdown() {
        let (store, mut receiver) = create_mock_store(10);
        let task = tokio::spawn(async move { store.shutdown().await });

        assert!(expect_shutdown(&mut receiver).await);
        assert_eq!(task.await.unwrap(), Ok(()));
    }
}
