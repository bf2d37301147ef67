use std::fmt;

use chrono::{DateTime, Utc};
use rand::Rng;

use crate::domain::{Amount, OrderId, Product, ProductId, User, UserId};
use crate::error::{ShopError, ShopResult};

pub const CURRENCY: &str = "KRW";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderStatus {
    Pending,
    Paid,
    Cancelled,
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OrderStatus::Pending => "PENDING",
            OrderStatus::Paid => "PAID",
            OrderStatus::Cancelled => "CANCELLED",
        };
        f.write_str(name)
    }
}

/// One line of an order. The unit price is a snapshot taken when the line
/// was added and does not follow later catalog changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderItem {
    line: u32,
    product_id: ProductId,
    quantity: u32,
    unit_price: Amount,
    subtotal: Amount,
}

impl OrderItem {
    fn snapshot(line: u32, product: &Product, quantity: u32) -> ShopResult<Self> {
        let subtotal = product
            .price()
            .checked_mul(Amount::from(quantity))
            .ok_or_else(|| ShopError::Validation("Order amount overflow".to_string()))?;
        Ok(Self {
            line,
            product_id: product.id(),
            quantity,
            unit_price: product.price(),
            subtotal,
        })
    }

    #[allow(dead_code)]
    pub fn line(&self) -> u32 {
        self.line
    }

    pub fn product_id(&self) -> ProductId {
        self.product_id
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    #[allow(dead_code)]
    pub fn unit_price(&self) -> Amount {
        self.unit_price
    }

    pub fn subtotal(&self) -> Amount {
        self.subtotal
    }
}

/// A customer order and its line items.
///
/// `total_amount` is always the sum of item subtotals and `final_amount` is
/// `total_amount - used_points`. Status only moves through the payment
/// workflow; orders are never deleted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    pub(crate) id: OrderId,
    order_number: String,
    user_id: UserId,
    items: Vec<OrderItem>,
    total_amount: Amount,
    used_points: Amount,
    final_amount: Amount,
    earned_points: Amount,
    currency: &'static str,
    status: OrderStatus,
    created_at: DateTime<Utc>,
}

impl Order {
    pub fn create(user: &User) -> Self {
        let created_at = Utc::now();
        Self {
            id: OrderId(0),
            order_number: generate_order_number(created_at),
            user_id: user.id(),
            items: Vec::new(),
            total_amount: 0,
            used_points: 0,
            final_amount: 0,
            earned_points: 0,
            currency: CURRENCY,
            status: OrderStatus::Pending,
            created_at,
        }
    }

    pub fn id(&self) -> OrderId {
        self.id
    }

    pub fn order_number(&self) -> &str {
        &self.order_number
    }

    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    #[allow(dead_code)]
    pub fn items(&self) -> &[OrderItem] {
        &self.items
    }

    pub fn total_amount(&self) -> Amount {
        self.total_amount
    }

    pub fn used_points(&self) -> Amount {
        self.used_points
    }

    pub fn final_amount(&self) -> Amount {
        self.final_amount
    }

    pub fn earned_points(&self) -> Amount {
        self.earned_points
    }

    pub fn currency(&self) -> &str {
        self.currency
    }

    pub fn status(&self) -> OrderStatus {
        self.status
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Reserves `quantity` units of `product` and appends a line for them.
    ///
    /// # Errors
    /// Propagates the stock errors of [`Product::decrease_stock`]. Neither
    /// the order nor the product changes on error.
    pub fn add_item(&mut self, product: &mut Product, quantity: u32) -> ShopResult<&OrderItem> {
        let line = u32::try_from(self.items.len() + 1)
            .map_err(|_| ShopError::Validation("Too many order lines".to_string()))?;
        let item = OrderItem::snapshot(line, product, quantity)?;
        let total_amount = self
            .total_amount
            .checked_add(item.subtotal)
            .ok_or_else(|| ShopError::Validation("Order amount overflow".to_string()))?;

        product.decrease_stock(quantity)?;
        self.items.push(item);
        self.recalculate_totals(total_amount);
        Ok(&self.items[self.items.len() - 1])
    }

    /// Holds `points` against the order total without touching any balance.
    pub fn apply_points(&mut self, points: Amount) -> ShopResult<()> {
        if points < 0 || points > self.total_amount {
            return Err(ShopError::InvalidPoints(points));
        }
        self.used_points = points;
        self.final_amount = self.total_amount - points;
        Ok(())
    }

    pub fn ensure_payable(&self, expected_total: Amount) -> ShopResult<()> {
        if self.status != OrderStatus::Pending {
            return Err(ShopError::NotPending {
                order: self.id,
                status: self.status,
            });
        }
        if self.total_amount != expected_total {
            return Err(ShopError::AmountMismatch {
                expected: expected_total,
                actual: self.total_amount,
            });
        }
        Ok(())
    }

    pub fn mark_paid(&mut self) {
        self.status = OrderStatus::Paid;
    }

    pub fn mark_cancelled(&mut self) {
        self.status = OrderStatus::Cancelled;
    }

    fn recalculate_totals(&mut self, total_amount: Amount) {
        debug_assert_eq!(
            total_amount,
            self.items.iter().map(OrderItem::subtotal).sum::<Amount>()
        );
        self.total_amount = total_amount;
        self.final_amount = total_amount - self.used_points;
    }
}

/// `ORD-<epoch millis>-<salt>`. Unique in practice, not guaranteed.
fn generate_order_number(now: DateTime<Utc>) -> String {
    let salt: u32 = rand::thread_rng().gen_range(0..1000);
    format!("ORD-{}-{}", now.timestamp_millis(), salt)
}
