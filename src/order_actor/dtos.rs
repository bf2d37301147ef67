use chrono::SecondsFormat;

use crate::domain::{Amount, Order, OrderId, OrderStatus, ProductId};

/// One requested line: which product and how many.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderLine {
    pub product_id: ProductId,
    pub quantity: u32,
}

#[derive(Debug, Clone, Default)]
pub struct CreateOrderRequest {
    pub items: Vec<OrderLine>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderCreated {
    pub order_id: OrderId,
    pub total_amount: Amount,
    pub order_number: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderSummary {
    pub order_id: OrderId,
    pub order_number: String,
    pub total_amount: Amount,
    pub used_points: Amount,
    pub final_amount: Amount,
    pub earned_points: Amount,
    pub currency: String,
    pub status: OrderStatus,
    /// RFC 3339, UTC.
    pub created_at: String,
}

impl From<&Order> for OrderSummary {
    fn from(order: &Order) -> Self {
        Self {
            order_id: order.id(),
            order_number: order.order_number().to_string(),
            total_amount: order.total_amount(),
            used_points: order.used_points(),
            final_amount: order.final_amount(),
            earned_points: order.earned_points(),
            currency: order.currency().to_string(),
            status: order.status(),
            created_at: order
                .created_at()
                .to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}
