mod actor_framework;
mod app_system;
mod clients;
mod credentials;
mod domain;
mod error;
mod order_actor;
mod payment_actor;
mod product_actor;
mod store;
mod user_actor;

#[cfg(test)]
mod integration_tests;
#[cfg(test)]
mod mock_framework;

use tracing::{error, info, Instrument};

use crate::app_system::{setup_tracing, ShopConfig, ShopSystem};
use crate::domain::ProductId;
use crate::error::ShopResult;
use crate::order_actor::{CreateOrderRequest, OrderLine};
use crate::payment_actor::CreatePaymentRequest;
use crate::user_actor::RegisterRequest;

const DEMO_EMAIL: &str = "alice@example.com";

#[tokio::main]
async fn main() -> ShopResult<()> {
    // Setup tracing once for the entire application
    setup_tracing();

    let config = ShopConfig::from_env()?;
    info!("Starting points shop");

    let system = ShopSystem::start(config).await?;

    let span = tracing::info_span!("user_registration");
    let user_id = async {
        info!("Registering demo user");
        system
            .user_client
            .register(RegisterRequest {
                email: DEMO_EMAIL.to_string(),
                password: "correct horse battery staple".to_string(),
                name: "Alice".to_string(),
                phone: "010-1234-5678".to_string(),
            })
            .await
    }
    .instrument(span)
    .await?;
    info!(user_id = %user_id, "User registered successfully");

    let profile = system
        .user_client
        .login(DEMO_EMAIL, "correct horse battery staple")
        .await?;
    info!(balance = profile.point_balance, "Logged in");

    for product in system.product_client.list_products().await? {
        info!(product_id = %product.id, name = %product.name, price = product.price, stock = product.stock, "Catalog entry");
    }

    let span = tracing::info_span!("order_processing");
    let checkout = async {
        let order = system
            .order_client
            .create_order(
                DEMO_EMAIL,
                CreateOrderRequest {
                    items: vec![
                        OrderLine { product_id: ProductId(1), quantity: 1 },
                        OrderLine { product_id: ProductId(5), quantity: 2 },
                    ],
                },
            )
            .await?;
        info!(order_id = %order.order_id, total = order.total_amount, "Order placed");

        let payment = system
            .payment_client
            .create_payment(
                DEMO_EMAIL,
                CreatePaymentRequest {
                    order_id: order.order_id,
                    total_amount: order.total_amount,
                    points_to_use: Some(500),
                },
            )
            .await?;
        system
            .payment_client
            .confirm_payment(DEMO_EMAIL, payment.payment_id)
            .await
    }
    .instrument(span)
    .await;

    match checkout {
        Ok(outcome) => info!(order_id = %outcome.order_id, status = %outcome.status, "Checkout completed"),
        Err(e) => error!(error = %e, status = ?e.status(), "Checkout failed"),
    }

    let hub = system.product_client.get_product(ProductId(5)).await?;
    info!(product_id = %hub.id, stock = hub.stock, "Stock after checkout");

    let span = tracing::info_span!("order_cancellation");
    let cancellation = async {
        let order = system
            .order_client
            .create_order(
                DEMO_EMAIL,
                CreateOrderRequest {
                    items: vec![OrderLine { product_id: ProductId(3), quantity: 1 }],
                },
            )
            .await?;
        let payment = system
            .payment_client
            .create_payment(
                DEMO_EMAIL,
                CreatePaymentRequest {
                    order_id: order.order_id,
                    total_amount: order.total_amount,
                    points_to_use: None,
                },
            )
            .await?;
        system
            .payment_client
            .cancel_payment(DEMO_EMAIL, payment.payment_id)
            .await?;
        system.order_client.get_order(DEMO_EMAIL, order.order_id).await
    }
    .instrument(span)
    .await;

    match cancellation {
        Ok(order) => info!(order_id = %order.order_id, status = %order.status, "Order cancelled"),
        Err(e) => error!(error = %e, status = ?e.status(), "Cancellation failed"),
    }

    for order in system.order_client.list_orders(DEMO_EMAIL).await? {
        info!(
            order_number = %order.order_number,
            status = %order.status,
            final_amount = order.final_amount,
            created_at = %order.created_at,
            "Order history"
        );
    }

    let profile = system.user_client.profile(DEMO_EMAIL).await?;
    info!(balance = profile.point_balance, "Final point balance");

    // Shutdown system gracefully
    system.shutdown().await?;

    info!("Application completed successfully");
    Ok(())
}
