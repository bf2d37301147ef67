//! Catalog: product lookups, stock and start-up seeding.

pub mod actions;
mod dtos;
pub mod entity;

pub use dtos::*;
