//! Glint Coins Client SDK.
//!
//! This crate provides a client library for platform services (feed,
//! streaming, messaging) to interact with the coins API.
//!
//! # Example
//!
//! ```no_run
//! use glint_coins_client::GlintCoinsClient;
//!
//! # async fn example() -> Result<(), glint_coins_client::ClientError> {
//! let client = GlintCoinsClient::new(
//!     "http://glint-coins.platform.svc:8080",
//!     "your-service-api-key",
//! );
//!
//! // Grant promo coins from a backend job
//! let response = client
//!     .grant_coins("user-uuid", 500, "Launch promo")
//!     .await?;
//!
//! println!("New balance: {} coins", response.coin_balance);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod client;
mod error;
mod types;

pub use client::{ClientOptions, GlintCoinsClient};
pub use error::ClientError;
pub use types::*;
