#[cfg(test)]
mod tests {
    use crate::app_system::{ShopConfig, ShopSystem};
    use crate::clients::{OrderClient, PaymentClient, UserClient};
    use crate::credentials::Argon2Hasher;
    use crate::domain::{OrderStatus, PaymentStatus, Product, ProductId};
    use crate::error::{ResponseStatus, ShopError};
    use crate::mock_framework::{create_mock_store, expect_transaction};
    use crate::order_actor::{CreateOrderRequest, OrderLine};
    use crate::payment_actor::CreatePaymentRequest;
    use crate::store::{Repository, Tables, Transaction};
    use crate::user_actor::RegisterRequest;
    use std::sync::Arc;

    const ALICE: &str = "alice@example.com";

    fn test_config() -> ShopConfig {
        ShopConfig::default()
            .with_channel_buffer(16)
            .with_seed_catalog(false)
            .with_hash_cost(64, 1)
    }

    fn registration(email: &str) -> RegisterRequest {
        RegisterRequest {
            email: email.to_string(),
            password: "correct horse".to_string(),
            name: "Alice".to_string(),
            phone: "010-1234-5678".to_string(),
        }
    }

    fn order_of(lines: &[(ProductId, u32)]) -> CreateOrderRequest {
        CreateOrderRequest {
            items: lines
                .iter()
                .map(|&(product_id, quantity)| OrderLine { product_id, quantity })
                .collect(),
        }
    }

    /// A system with Alice registered and one product of price 1000 and the
    /// given stock.
    async fn shop_with_product(stock: u32) -> (ShopSystem, ProductId) {
        let system = ShopSystem::start(test_config()).await.unwrap();
        system.user_client.register(registration(ALICE)).await.unwrap();
        system
            .product_client
            .seed_catalog(vec![Product::new("Test Product", 1000, stock).unwrap()])
            .await
            .unwrap();
        (system, ProductId(1))
    }

    #[tokio::test]
    async fn test_points_lifecycle_end_to_end() {
        let (system, product_id) = shop_with_product(50).await;

        let created = system
            .order_client
            .create_order(ALICE, order_of(&[(product_id, 2)]))
            .await
            .unwrap();
        assert_eq!(created.total_amount, 2000);
        assert_eq!(system.product_client.get_product(product_id).await.unwrap().stock, 48);

        let payment = system
            .payment_client
            .create_payment(
                ALICE,
                CreatePaymentRequest {
                    order_id: created.order_id,
                    total_amount: 2000,
                    points_to_use: Some(500),
                },
            )
            .await
            .unwrap();
        assert_eq!(payment.status, PaymentStatus::Pending);
        let order = system.order_client.get_order(ALICE, created.order_id).await.unwrap();
        assert_eq!((order.used_points, order.final_amount), (500, 1500));
        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(system.user_client.profile(ALICE).await.unwrap().point_balance, 1000);

        let confirmed = system
            .payment_client
            .confirm_payment(ALICE, payment.payment_id)
            .await
            .unwrap();
        assert_eq!(confirmed.status, PaymentStatus::Paid);
        assert_eq!(system.user_client.profile(ALICE).await.unwrap().point_balance, 500);
        let order = system.order_client.get_order(ALICE, created.order_id).await.unwrap();
        assert_eq!(order.status, OrderStatus::Paid);

        let again = system
            .payment_client
            .confirm_payment(ALICE, payment.payment_id)
            .await
            .unwrap();
        assert!(!again.changed);
        assert_eq!(system.user_client.profile(ALICE).await.unwrap().point_balance, 500);

        let cancelled = system
            .payment_client
            .cancel_payment(ALICE, payment.payment_id)
            .await
            .unwrap();
        assert_eq!(cancelled.status, PaymentStatus::Cancelled);
        assert_eq!(system.user_client.profile(ALICE).await.unwrap().point_balance, 1000);
        let order = system.order_client.get_order(ALICE, created.order_id).await.unwrap();
        assert_eq!(order.status, OrderStatus::Cancelled);

        system.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn test_cancel_before_confirm_keeps_balance() {
        let (system, product_id) = shop_with_product(50).await;
        let created = system
            .order_client
            .create_order(ALICE, order_of(&[(product_id, 1)]))
            .await
            .unwrap();
        let payment = system
            .payment_client
            .create_payment(
                ALICE,
                CreatePaymentRequest {
                    order_id: created.order_id,
                    total_amount: 1000,
                    points_to_use: Some(300),
                },
            )
            .await
            .unwrap();

        let cancelled = system
            .payment_client
            .cancel_payment(ALICE, payment.payment_id)
            .await
            .unwrap();
        assert!(cancelled.changed);
        assert_eq!(system.user_client.profile(ALICE).await.unwrap().point_balance, 1000);

        assert_eq!(
            system.payment_client.confirm_payment(ALICE, payment.payment_id).await,
            Err(ShopError::PaymentCancelled(payment.payment_id))
        );
        assert_eq!(system.user_client.profile(ALICE).await.unwrap().point_balance, 1000);
        let order = system.order_client.get_order(ALICE, created.order_id).await.unwrap();
        assert_eq!(order.status, OrderStatus::Cancelled);

        system.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn test_amount_mismatch_leaves_order_untouched() {
        let (system, product_id) = shop_with_product(50).await;
        let created = system
            .order_client
            .create_order(ALICE, order_of(&[(product_id, 2)]))
            .await
            .unwrap();
        let before = system.order_client.get_order(ALICE, created.order_id).await.unwrap();

        let result = system
            .payment_client
            .create_payment(
                ALICE,
                CreatePaymentRequest {
                    order_id: created.order_id,
                    total_amount: 1999,
                    points_to_use: Some(500),
                },
            )
            .await;
        assert_eq!(
            result,
            Err(ShopError::AmountMismatch { expected: 1999, actual: 2000 })
        );

        let after = system.order_client.get_order(ALICE, created.order_id).await.unwrap();
        assert_eq!(before, after);
        assert_eq!(system.user_client.profile(ALICE).await.unwrap().point_balance, 1000);

        system.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn test_failed_line_rolls_back_earlier_lines() {
        let system = ShopSystem::start(test_config()).await.unwrap();
        system.user_client.register(registration(ALICE)).await.unwrap();
        system
            .product_client
            .seed_catalog(vec![
                Product::new("Plenty", 1000, 10).unwrap(),
                Product::new("Scarce", 5000, 1).unwrap(),
            ])
            .await
            .unwrap();

        let result = system
            .order_client
            .create_order(ALICE, order_of(&[(ProductId(1), 3), (ProductId(2), 2)]))
            .await;
        assert_eq!(
            result,
            Err(ShopError::InsufficientStock { requested: 2, available: 1 })
        );

        assert_eq!(system.product_client.get_product(ProductId(1)).await.unwrap().stock, 10);
        assert!(system.order_client.list_orders(ALICE).await.unwrap().is_empty());

        system.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn test_register_and_login() {
        let system = ShopSystem::start(test_config()).await.unwrap();
        let id = system.user_client.register(registration(ALICE)).await.unwrap();
        assert_eq!(id.to_string(), "user_1");

        let duplicate = system.user_client.register(registration(ALICE)).await;
        assert_eq!(duplicate, Err(ShopError::AlreadyRegistered(ALICE.to_string())));
        assert_eq!(duplicate.unwrap_err().status(), ResponseStatus::Conflict);

        let profile = system.user_client.login(ALICE, "correct horse").await.unwrap();
        assert_eq!(profile.point_balance, 1000);
        assert!(profile.customer_uid.starts_with("CUST_"));

        assert_eq!(
            system.user_client.login(ALICE, "wrong").await,
            Err(ShopError::InvalidCredentials)
        );
        assert_eq!(
            system.user_client.login("ghost@example.com", "correct horse").await,
            Err(ShopError::InvalidCredentials)
        );

        let mut blank = registration("bob@example.com");
        blank.phone = "  ".to_string();
        assert!(matches!(
            system.user_client.register(blank).await,
            Err(ShopError::Validation(_))
        ));

        system.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn test_start_seeds_demo_catalog_once() {
        let system = ShopSystem::start(test_config().with_seed_catalog(true))
            .await
            .unwrap();
        let products = system.product_client.list_products().await.unwrap();
        assert_eq!(products.len(), 5);
        assert_eq!(products[0].price, 89_000);

        let reseeded = system
            .product_client
            .seed_catalog(vec![Product::new("Extra", 1, 1).unwrap()])
            .await
            .unwrap();
        assert_eq!(reseeded, 0);

        system.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn test_list_orders_is_scoped_and_newest_first() {
        let (system, product_id) = shop_with_product(50).await;
        system.user_client.register(registration("bob@example.com")).await.unwrap();

        let first = system
            .order_client
            .create_order(ALICE, order_of(&[(product_id, 1)]))
            .await
            .unwrap();
        let second = system
            .order_client
            .create_order(ALICE, order_of(&[(product_id, 1)]))
            .await
            .unwrap();

        let orders = system.order_client.list_orders(ALICE).await.unwrap();
        let ids: Vec<_> = orders.iter().map(|order| order.order_id).collect();
        assert_eq!(ids, vec![second.order_id, first.order_id]);
        assert!(system.order_client.list_orders("bob@example.com").await.unwrap().is_empty());
        assert_eq!(
            system.order_client.get_order("bob@example.com", first.order_id).await,
            Err(ShopError::not_found("Order", first.order_id))
        );

        system.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn test_concurrent_orders_never_oversell() {
        let (system, product_id) = shop_with_product(5).await;

        let tasks: Vec<_> = (0..8)
            .map(|_| {
                let client = system.order_client.clone();
                tokio::spawn(async move {
                    client.create_order(ALICE, order_of(&[(product_id, 1)])).await
                })
            })
            .collect();

        let mut placed = 0;
        for task in tasks {
            match task.await.unwrap() {
                Ok(_) => placed += 1,
                Err(e) => assert!(matches!(e, ShopError::InsufficientStock { .. })),
            }
        }
        assert_eq!(placed, 5);
        assert_eq!(system.product_client.get_product(product_id).await.unwrap().stock, 0);

        system.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn test_order_client_with_mock_store() {
        let (store, mut receiver) = create_mock_store(10);
        let client = OrderClient::new(store);

        let task = tokio::spawn(async move {
            client.create_order(ALICE, order_of(&[(ProductId(1), 2)])).await
        });

        let (label, job) = expect_transaction(&mut receiver)
            .await
            .expect("Expected create_order transaction");
        assert_eq!(label, "create_order");

        let mut tables = Tables::default();
        {
            let mut tx = Transaction::begin(&mut tables);
            tx.save(crate::domain::User::register(ALICE, "digest", "Alice", "010", 0));
            tx.save(Product::new("Earbuds", 89_000, 3).unwrap());
            tx.commit();
        }
        job(&mut tables);

        let created = task.await.unwrap().unwrap();
        assert_eq!(created.total_amount, 178_000);
        assert_eq!(tables.products.get(ProductId(1)).unwrap().stock(), 1);
        assert_eq!(tables.orders.len(), 1);
    }

    #[tokio::test]
    async fn test_payment_client_rolls_back_on_mock_store() {
        let (store, mut receiver) = create_mock_store(10);
        let client = PaymentClient::new(store);

        let task = tokio::spawn(async move {
            client.confirm_payment(ALICE, crate::domain::PaymentId(1)).await
        });

        let (label, job) = expect_transaction(&mut receiver).await.unwrap();
        assert_eq!(label, "confirm_payment");
        let mut tables = Tables::default();
        job(&mut tables);

        assert_eq!(
            task.await.unwrap(),
            Err(ShopError::not_found("User", ALICE))
        );
        assert!(tables.payments.is_empty());
    }

    #[tokio::test]
    async fn test_user_client_hashes_outside_the_store() {
        let (store, mut receiver) = create_mock_store(10);
        let hasher = Arc::new(Argon2Hasher::new(64, 1).unwrap());
        let client = UserClient::new(store, hasher, 1000);

        let task = tokio::spawn(async move { client.register(registration(ALICE)).await });

        let (label, job) = expect_transaction(&mut receiver).await.unwrap();
        assert_eq!(label, "register");
        let mut tables = Tables::default();
        job(&mut tables);

        assert_eq!(task.await.unwrap().unwrap().to_string(), "user_1");
        let tx = Transaction::begin(&mut tables);
        let user = tx.find_user_by_email(ALICE).unwrap();
        assert!(user.password_hash().starts_with("$argon2id$"));
        assert_ne!(user.password_hash(), "correct horse");
    }
}
