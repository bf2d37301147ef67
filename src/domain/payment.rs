use std::fmt;

use chrono::{DateTime, Utc};

use crate::domain::{Amount, Order, OrderId, PaymentId, User, UserId};
use crate::error::{ShopError, ShopResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentStatus {
    Pending,
    Paid,
    Cancelled,
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PaymentStatus::Pending => "PENDING",
            PaymentStatus::Paid => "PAID",
            PaymentStatus::Cancelled => "CANCELLED",
        };
        f.write_str(name)
    }
}

/// A payment attempt against a pending order.
///
/// Lifecycle: `PENDING -> PAID`, `PENDING -> CANCELLED` and
/// `PAID -> CANCELLED`. Points are only held on the order until the payment
/// is confirmed; confirmation consumes them and a cancel after confirmation
/// refunds them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Payment {
    pub(crate) id: PaymentId,
    order_id: OrderId,
    user_id: UserId,
    total_amount: Amount,
    points_to_use: Amount,
    status: PaymentStatus,
    created_at: DateTime<Utc>,
}

impl Payment {
    /// Validates the order and the user's balance, then holds the points on
    /// the order. The user's balance is not touched.
    ///
    /// # Errors
    /// `NotPending` or `AmountMismatch` from the order, `InsufficientPoints`
    /// or `InvalidPoints` for the points request. Nothing is mutated on error.
    pub fn create(
        order: &mut Order,
        user: &User,
        total_amount: Amount,
        points_to_use: Amount,
    ) -> ShopResult<Self> {
        order.ensure_payable(total_amount)?;
        if points_to_use > 0 {
            user.ensure_can_use_points(points_to_use)?;
        }
        order.apply_points(points_to_use)?;

        Ok(Self {
            id: PaymentId(0),
            order_id: order.id(),
            user_id: user.id(),
            total_amount,
            points_to_use,
            status: PaymentStatus::Pending,
            created_at: Utc::now(),
        })
    }

    pub fn id(&self) -> PaymentId {
        self.id
    }

    pub fn order_id(&self) -> OrderId {
        self.order_id
    }

    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    #[allow(dead_code)]
    pub fn total_amount(&self) -> Amount {
        self.total_amount
    }

    pub fn points_to_use(&self) -> Amount {
        self.points_to_use
    }

    pub fn status(&self) -> PaymentStatus {
        self.status
    }

    #[allow(dead_code)]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Consumes the held points and marks payment and order paid.
    ///
    /// Returns `false` without side effects when already paid. A cancelled
    /// payment is terminal and fails with `PaymentCancelled`. Points are
    /// consumed before the order transitions, so a balance that shrank since
    /// the hold fails the call before anything is marked.
    pub fn confirm(&mut self, order: &mut Order, user: &mut User) -> ShopResult<bool> {
        debug_assert_eq!(order.id(), self.order_id);
        debug_assert_eq!(user.id(), self.user_id);
        match self.status {
            PaymentStatus::Paid => return Ok(false),
            PaymentStatus::Cancelled => return Err(ShopError::PaymentCancelled(self.id)),
            PaymentStatus::Pending => {}
        }

        if self.points_to_use > 0 {
            user.consume_points(self.points_to_use)?;
        }
        order.mark_paid();
        self.status = PaymentStatus::Paid;
        Ok(true)
    }

    /// Cancels payment and order, refunding points only if they were
    /// actually consumed by an earlier confirmation.
    ///
    /// Returns `false` without side effects when already cancelled.
    pub fn cancel(&mut self, order: &mut Order, user: &mut User) -> ShopResult<bool> {
        debug_assert_eq!(order.id(), self.order_id);
        debug_assert_eq!(user.id(), self.user_id);
        if self.status == PaymentStatus::Cancelled {
            return Ok(false);
        }

        let was_paid = self.status == PaymentStatus::Paid;
        order.mark_cancelled();
        self.status = PaymentStatus::Cancelled;

        if was_paid && self.points_to_use > 0 {
            user.refund_points(self.points_to_use)?;
        }
        Ok(true)
    }
}
