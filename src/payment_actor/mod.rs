//! The payment workflow: hold, confirm and cancel.

pub mod actions;
mod dtos;
pub mod entity;

pub use dtos::*;
