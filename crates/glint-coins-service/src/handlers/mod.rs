//! API handlers.

pub mod admin;
pub mod gifts;
pub mod health;
pub mod subscriptions;
pub mod tips;
pub mod wallet;
