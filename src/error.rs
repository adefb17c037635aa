//! Error types for the token risk scanner
//!
//! Two tiers: configuration and metadata failures abort the run, while
//! liquidity listing failures are absorbed by the liquidity fetcher.

use thiserror::Error;

/// Application-level errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// RPC/Solana error
    #[error("RPC error: {0}")]
    Rpc(String),

    /// Account missing on chain
    #[error("Not found: {0}")]
    NotFound(String),

    /// Account or response decoding error
    #[error("Parse error: {0}")]
    Parse(String),

    /// HTTP error talking to the DEX API
    #[error("HTTP error: {0}")]
    Http(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias for convenience
pub type AppResult<T> = Result<T, AppError>;
