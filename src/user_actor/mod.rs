//! Accounts: registration, credentials and the point balance.

pub mod actions;
mod dtos;
pub mod entity;

pub use dtos::*;
