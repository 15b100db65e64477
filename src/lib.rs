//! # SouthXchange Client
//!
//! An async Rust client library for the SouthXchange REST API v4.
//!
//! ## Features
//!
//! - Public market data and private account endpoints
//! - HMAC-SHA512 request signing with strictly increasing nonces
//! - Market history by granularity, with bucket spacing checks
//! - Financial precision with `rust_decimal`
//! - Pluggable HTTP transport
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use southxchange_api_client::rest::SxcRestClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = SxcRestClient::new()?;
//!     let markets = client.list_markets().await?;
//!     println!("{} markets", markets.len());
//!     Ok(())
//! }
//! ```

pub mod auth;
pub mod error;
pub mod rest;
pub mod types;

// Re-export commonly used types at crate root
pub use error::{ApiError, ApiErrorKind, ErrorKind, SxcError};
pub use rest::{SxcRestClient, SxcRestClientBuilder};
pub use types::common::{
    MAX_MARKET_HISTORY_PERIODS, MAX_PAGE_SIZE, MarketHistoryInterval, OrderType, TransactionType,
    WithdrawalDestinationType,
};

/// Result type alias using SxcError
pub type Result<T> = std::result::Result<T, SxcError>;
