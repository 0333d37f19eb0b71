//! Client error types.

/// Errors that can occur when using the coins client.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Server returned an error response.
    #[error("API error: {code} - {message}")]
    Api {
        /// Error code.
        code: String,
        /// Error message.
        message: String,
        /// HTTP status code.
        status: u16,
    },

    /// Insufficient coins.
    #[error("insufficient coins: balance={balance}, required={required}")]
    InsufficientCoins {
        /// Current balance.
        balance: i64,
        /// Required amount.
        required: i64,
    },

    /// Resource not found.
    #[error("not found: {message}")]
    NotFound {
        /// Server-provided message naming the missing record.
        message: String,
    },
}
