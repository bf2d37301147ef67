use crate::domain::{Amount, OrderId, PaymentId, PaymentStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CreatePaymentRequest {
    pub order_id: OrderId,
    /// Must equal the order's current total.
    pub total_amount: Amount,
    /// Missing means no points.
    pub points_to_use: Option<Amount>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaymentCreated {
    pub payment_id: PaymentId,
    pub status: PaymentStatus,
}

/// Result of a confirm or cancel call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaymentOutcome {
    pub order_id: OrderId,
    pub status: PaymentStatus,
    /// `false` when the payment was already in the requested state.
    pub changed: bool,
}
