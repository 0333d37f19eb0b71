//! Glint Coins HTTP API Service.
//!
//! This crate provides the HTTP API for the platform's virtual currency:
//!
//! - Wallet balance and transaction history
//! - Gift catalog and gift sending
//! - Tips
//! - Creator subscriptions
//! - Admin catalog/tier management and coin grants
//!
//! # Authentication
//!
//! The service supports two authentication methods:
//!
//! 1. **User JWT tokens** - For end-user requests (HS256, `sub` = user id)
//! 2. **Service API keys** - For admin and service-to-service requests

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
// Allow some pedantic lints that are noisy for Axum handler functions
#![allow(clippy::missing_errors_doc)] // Axum handlers all return Result
#![allow(clippy::unused_async)] // Some handlers are async only for routing consistency

pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod push;
pub mod routes;
pub mod state;

pub use config::ServiceConfig;
pub use error::ApiError;
pub use push::PushClient;
pub use routes::create_router;
pub use state::AppState;
