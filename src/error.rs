//! Error types for the SouthXchange client library.

use thiserror::Error;

/// The main error type for all SouthXchange client operations.
#[derive(Error, Debug)]
pub enum SxcError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// HTTP request with middleware failed
    #[error("HTTP request failed: {0}")]
    HttpMiddleware(#[from] reqwest_middleware::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// URL parsing error
    #[error("URL parsing error: {0}")]
    Url(#[from] url::ParseError),

    /// SouthXchange API rejected the request
    #[error("SouthXchange API error: {0}")]
    Api(ApiError),

    /// Authentication error (signing could not be performed)
    #[error("Authentication error: {0}")]
    Auth(String),

    /// The client cannot be built from the given settings
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Invalid response from the API
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Caller-supplied arguments violate a precondition
    #[error("Invalid argument: {0}")]
    Validation(String),

    /// Market history buckets do not match the requested granularity
    #[error(
        "Granularity in the response does not match the given one: {observed} vs {requested}"
    )]
    GranularityMismatch {
        /// Requested spacing between candles, in seconds
        requested: i64,
        /// First spacing observed in the response, truncated to whole seconds
        observed: i64,
    },

    /// Request timeout
    #[error("Request timed out")]
    Timeout,

    /// Missing required credentials
    #[error("Missing credentials: access key and secret key required for private endpoints")]
    MissingCredentials,
}

/// Coarse classification of [`SxcError`] variants.
///
/// Every variant maps onto exactly one kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Client is misconfigured (missing credentials, unusable secret, bad base URL).
    Configuration,
    /// Caller arguments were rejected before any request was sent.
    Validation,
    /// Network or connection level failure.
    Transport,
    /// The response violated the expected JSON or envelope contract.
    Protocol,
    /// The exchange explicitly rejected the request.
    Api,
    /// Market history spacing did not match the requested granularity.
    GranularityMismatch,
}

impl SxcError {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            SxcError::MissingCredentials
            | SxcError::Auth(_)
            | SxcError::Url(_)
            | SxcError::Configuration(_) => ErrorKind::Configuration,
            SxcError::Validation(_) => ErrorKind::Validation,
            SxcError::Timeout => ErrorKind::Transport,
            SxcError::Http(e) if e.is_builder() => ErrorKind::Configuration,
            SxcError::Http(e) if e.is_decode() => ErrorKind::Protocol,
            SxcError::Http(_) | SxcError::HttpMiddleware(_) => ErrorKind::Transport,
            SxcError::Json(_) | SxcError::InvalidResponse(_) => ErrorKind::Protocol,
            SxcError::Api(_) => ErrorKind::Api,
            SxcError::GranularityMismatch { .. } => ErrorKind::GranularityMismatch,
        }
    }

    /// Whether a caller may reasonably retry the failed operation.
    ///
    /// The client itself never retries.
    pub fn is_transient(&self) -> bool {
        self.kind() == ErrorKind::Transport
    }

    /// The exchange rejection carried by this error, if any.
    pub fn api_error(&self) -> Option<&ApiError> {
        match self {
            SxcError::Api(api_error) => Some(api_error),
            _ => None,
        }
    }
}

/// SouthXchange API error codes and messages.
///
/// These are rejections returned by the SouthXchange API itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    /// The error code reported by the exchange, or the HTTP status when none was given
    pub code: String,
    /// Human-readable error message, verbatim
    pub message: String,
    /// HTTP status of the response
    pub status: u16,
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

/// Known rejection reasons documented by SouthXchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApiErrorKind {
    InvalidKeyOrNonce,
    InvalidHash,
    AnotherOrderInProcess,
    NotEnoughBalance,
    NotEnoughPermission,
    TooManyOrders,
    UnsupportedCurrency,
    InvalidDestinationType,
    InvalidMarket,
    AmountBelowMinimum,
    /// Any rejection not listed above
    Other,
}

impl ApiError {
    /// Create a new API error from code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>, status: u16) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            status,
        }
    }

    /// Classify the rejection by its message.
    pub fn kind(&self) -> ApiErrorKind {
        let msg = self.message.trim().trim_matches('"');
        match msg {
            messages::INVALID_KEY_OR_NONCE => ApiErrorKind::InvalidKeyOrNonce,
            messages::INVALID_HASH => ApiErrorKind::InvalidHash,
            messages::ANOTHER_ORDER_IN_PROCESS => ApiErrorKind::AnotherOrderInProcess,
            messages::NOT_ENOUGH_BALANCE => ApiErrorKind::NotEnoughBalance,
            messages::NOT_ENOUGH_PERMISSION => ApiErrorKind::NotEnoughPermission,
            messages::INVALID_DESTINATION_TYPE => ApiErrorKind::InvalidDestinationType,
            messages::MARKET_DOES_NOT_EXIST => ApiErrorKind::InvalidMarket,
            messages::AMOUNT_BELOW_MINIMUM => ApiErrorKind::AmountBelowMinimum,
            _ if is_too_many_orders(msg) => ApiErrorKind::TooManyOrders,
            _ if is_unsupported_invoice_currency(msg) => ApiErrorKind::UnsupportedCurrency,
            _ => ApiErrorKind::Other,
        }
    }

    /// Check if this is an invalid key or nonce error.
    pub fn is_invalid_nonce(&self) -> bool {
        self.kind() == ApiErrorKind::InvalidKeyOrNonce
    }

    /// Check if this is an invalid signature error.
    pub fn is_invalid_signature(&self) -> bool {
        self.kind() == ApiErrorKind::InvalidHash
    }

    /// Check if this is an insufficient balance error.
    pub fn is_insufficient_balance(&self) -> bool {
        self.kind() == ApiErrorKind::NotEnoughBalance
    }

    /// Check if this is a permission denied error.
    pub fn is_permission_denied(&self) -> bool {
        self.kind() == ApiErrorKind::NotEnoughPermission
    }
}

// "You cannot have more than 100 orders in this market"
fn is_too_many_orders(msg: &str) -> bool {
    msg.strip_prefix("You cannot have more than ")
        .and_then(|rest| rest.strip_suffix(" orders in this market"))
        .is_some_and(|n| !n.is_empty() && n.bytes().all(|b| b.is_ascii_digit()))
}

// "Currency XYZ does not support lightning invoice"
fn is_unsupported_invoice_currency(msg: &str) -> bool {
    msg.strip_prefix("Currency ")
        .and_then(|rest| rest.strip_suffix(" does not support lightning invoice"))
        .is_some_and(|code| !code.is_empty() && !code.contains(char::is_whitespace))
}

/// Rejection messages returned verbatim by SouthXchange.
pub mod messages {
    pub const INVALID_KEY_OR_NONCE: &str = "Invalid API key or nonce";
    pub const INVALID_HASH: &str = "Invalid API hash";
    pub const ANOTHER_ORDER_IN_PROCESS: &str =
        "There is another order currently being processed in this market. Please wait.";
    pub const NOT_ENOUGH_BALANCE: &str = "Not enough balance";
    pub const NOT_ENOUGH_PERMISSION: &str = "API key with not enough permission";
    pub const INVALID_DESTINATION_TYPE: &str = "Destination Type invalid";
    pub const MARKET_DOES_NOT_EXIST: &str = "Market does not exist.";
    pub const AMOUNT_BELOW_MINIMUM: &str = "Amount below minimum";
}
