use std::cmp::Reverse;

use tracing::{debug, info};

use crate::domain::{Order, OrderId};
use crate::error::{ShopError, ShopResult};
use crate::order_actor::{CreateOrderRequest, OrderCreated, OrderSummary};
use crate::product_actor::actions::get_product;
use crate::store::{Repository, Transaction};
use crate::user_actor::actions::find_by_email;

/// Builds and saves an order for `email`, reserving stock for every line.
///
/// Lines for the same product see each other's stock changes because each
/// decremented product is staged before the next line is resolved.
pub fn create_order(
    tx: &mut Transaction<'_>,
    email: &str,
    request: CreateOrderRequest,
) -> ShopResult<OrderCreated> {
    if request.items.is_empty() {
        return Err(ShopError::Validation("Order has no items".to_string()));
    }
    let user = find_by_email(tx, email)?;

    let mut order = Order::create(&user);
    for line in request.items {
        let mut product = get_product(tx, line.product_id)?;
        let item = order.add_item(&mut product, line.quantity)?;
        debug!(
            product_id = %item.product_id(),
            quantity = item.quantity(),
            subtotal = item.subtotal(),
            remaining_stock = product.stock(),
            "Order line added"
        );
        tx.save(product);
    }

    let order = tx.save(order);
    info!(
        order_id = %order.id(),
        order_number = %order.order_number(),
        total = order.total_amount(),
        "Order created"
    );
    Ok(OrderCreated {
        order_id: order.id(),
        total_amount: order.total_amount(),
        order_number: order.order_number().to_string(),
    })
}

/// The user's orders, newest first.
pub fn list_orders(tx: &Transaction<'_>, email: &str) -> ShopResult<Vec<OrderSummary>> {
    let user = find_by_email(tx, email)?;
    let mut orders = tx.find_all_by_user::<Order>(user.id());
    orders.sort_by_key(|order| Reverse((order.created_at(), order.id())));
    Ok(orders.iter().map(OrderSummary::from).collect())
}

pub fn get_order(tx: &Transaction<'_>, email: &str, id: OrderId) -> ShopResult<Order> {
    let user = find_by_email(tx, email)?;
    tx.find_by_user_and_id(user.id(), id)
        .ok_or_else(|| ShopError::not_found("Order", id))
}
