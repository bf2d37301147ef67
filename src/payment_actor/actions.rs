use tracing::{debug, info};

use crate::domain::{Order, Payment, PaymentId, User};
use crate::error::{ShopError, ShopResult};
use crate::payment_actor::{CreatePaymentRequest, PaymentCreated, PaymentOutcome};
use crate::store::{Repository, Transaction};
use crate::user_actor::actions::find_by_email;

/// Opens a pending payment for one of the user's orders and holds the
/// requested points on the order. The user's balance is not touched.
pub fn create_payment(
    tx: &mut Transaction<'_>,
    email: &str,
    request: CreatePaymentRequest,
) -> ShopResult<PaymentCreated> {
    let points_to_use = request.points_to_use.unwrap_or(0);
    let user = find_by_email(tx, email)?;
    let mut order: Order = tx
        .find_by_user_and_id(user.id(), request.order_id)
        .ok_or_else(|| ShopError::not_found("Order", request.order_id))?;

    let payment = Payment::create(&mut order, &user, request.total_amount, points_to_use)?;
    let order = tx.save(order);
    let payment = tx.save(payment);

    info!(
        payment_id = %payment.id(),
        order_id = %order.id(),
        points_held = points_to_use,
        final_amount = order.final_amount(),
        "Payment created"
    );
    Ok(PaymentCreated {
        payment_id: payment.id(),
        status: payment.status(),
    })
}

pub fn confirm_payment(
    tx: &mut Transaction<'_>,
    email: &str,
    payment_id: PaymentId,
) -> ShopResult<PaymentOutcome> {
    let (mut user, mut payment, mut order) = load_payment(tx, email, payment_id)?;

    let changed = payment.confirm(&mut order, &mut user)?;
    if changed {
        info!(
            payment_id = %payment.id(),
            points_consumed = payment.points_to_use(),
            balance = user.point_balance(),
            "Payment confirmed"
        );
        save_all(tx, user, &payment, order);
    } else {
        debug!(payment_id = %payment.id(), "Payment already confirmed");
    }
    Ok(PaymentOutcome {
        order_id: payment.order_id(),
        status: payment.status(),
        changed,
    })
}

pub fn cancel_payment(
    tx: &mut Transaction<'_>,
    email: &str,
    payment_id: PaymentId,
) -> ShopResult<PaymentOutcome> {
    let (mut user, mut payment, mut order) = load_payment(tx, email, payment_id)?;

    let changed = payment.cancel(&mut order, &mut user)?;
    if changed {
        info!(
            payment_id = %payment.id(),
            balance = user.point_balance(),
            "Payment cancelled"
        );
        save_all(tx, user, &payment, order);
    } else {
        debug!(payment_id = %payment.id(), "Payment already cancelled");
    }
    Ok(PaymentOutcome {
        order_id: payment.order_id(),
        status: payment.status(),
        changed,
    })
}

fn load_payment(
    tx: &Transaction<'_>,
    email: &str,
    payment_id: PaymentId,
) -> ShopResult<(User, Payment, Order)> {
    let user = find_by_email(tx, email)?;
    let payment: Payment = tx
        .find_by_user_and_id(user.id(), payment_id)
        .ok_or_else(|| ShopError::not_found("Payment", payment_id))?;
    let order = tx
        .find_by_id(payment.order_id())
        .ok_or_else(|| ShopError::not_found("Order", payment.order_id()))?;
    Ok((user, payment, order))
}

fn save_all(tx: &mut Transaction<'_>, user: User, payment: &Payment, order: Order) {
    tx.save(user);
    tx.save(order);
    tx.save(payment.clone());
}
