//! Order placement and the customer's order history.

pub mod actions;
mod dtos;
pub mod entity;

pub use dtos::*;
