//! Caller-facing handles. Every method ships one workflow to the store task
//! and waits for its result.

#[macro_use]
mod macros;

mod order_client;
mod payment_client;
mod product_client;
mod user_client;

pub use order_client::OrderClient;
pub use payment_client::PaymentClient;
pub use product_client::ProductClient;
pub use user_client::UserClient;
