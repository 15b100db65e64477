//! SouthXchange REST API client implementation.

use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{
    CACHE_CONTROL, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue, PRAGMA, USER_AGENT,
};
use reqwest_middleware::ClientBuilder;
use reqwest_tracing::TracingMiddleware;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};
use url::Url;

use crate::auth::{CredentialsProvider, IncreasingNonce, NonceProvider, Signer};
use crate::error::{ApiError, SxcError};
use crate::rest::endpoints::SXC_BASE_URL;
use crate::rest::request::ApiRequest;
use crate::rest::transport::{HttpRequest, HttpResponse, HttpTransport, Transport};

/// Header carrying the request signature (`Hash`).
pub const HASH_HEADER: &str = "hash";

/// The SouthXchange REST API client.
///
/// Every endpoint method funnels through [`SxcRestClient::call`], which signs
/// private requests, sends them through the configured [`Transport`] and
/// translates the response. Nothing is cached and nothing is retried: each
/// call is exactly one HTTP round trip.
///
/// # Example
///
/// ```rust,no_run
/// use southxchange_api_client::rest::SxcRestClient;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     // Create a client for public endpoints only
///     let client = SxcRestClient::new()?;
///
///     let book = client.list_order_book("ETH", "BTC").await?;
///     println!("Best bid: {:?}", book.buy_orders.first());
///
///     Ok(())
/// }
/// ```
///
/// For private endpoints, provide credentials:
///
/// ```rust,no_run
/// use southxchange_api_client::rest::SxcRestClient;
/// use southxchange_api_client::auth::StaticCredentials;
/// use std::sync::Arc;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let credentials = Arc::new(StaticCredentials::new("access_key", "secret_key"));
///     let client = SxcRestClient::builder()
///         .credentials(credentials)
///         .build()?;
///
///     let balances = client.list_balances().await?;
///     println!("Balances: {:?}", balances);
///
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct SxcRestClient<T = HttpTransport> {
    transport: T,
    base_url: String,
    signer: Option<Signer>,
}

impl SxcRestClient {
    /// Create a new client with default settings.
    ///
    /// This client can only access public endpoints.
    /// Use [`SxcRestClient::builder()`] to configure credentials for private endpoints.
    pub fn new() -> Result<Self, SxcError> {
        Self::builder().build()
    }

    /// Create a new client builder.
    pub fn builder() -> SxcRestClientBuilder {
        SxcRestClientBuilder::new()
    }
}

impl<T> SxcRestClient<T> {
    /// Whether this client was configured with complete credentials.
    pub fn has_credentials(&self) -> bool {
        self.signer.as_ref().is_some_and(Signer::has_credentials)
    }

    /// The base URL requests are sent to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl<T: Transport> SxcRestClient<T> {

    /// Dispatch a request and return the decoded JSON payload.
    ///
    /// - Private requests without credentials fail with
    ///   [`SxcError::MissingCredentials`] before anything is sent.
    /// - Transport failures are returned as is; nothing is retried.
    /// - Non-2xx responses and error envelopes become [`SxcError::Api`].
    /// - A 2xx body that is not JSON becomes [`SxcError::InvalidResponse`].
    /// - An empty body (or HTTP 204) decodes to `Value::Null`.
    pub async fn call(&self, request: ApiRequest) -> Result<Value, SxcError> {
        let ApiRequest {
            method,
            endpoint,
            params,
            private,
        } = request;

        let mut headers = HeaderMap::new();
        headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-cache"));
        headers.insert(PRAGMA, HeaderValue::from_static("no-cache"));

        let body = if private {
            let signer = self
                .signer
                .as_ref()
                .filter(|signer| signer.has_credentials())
                .ok_or(SxcError::MissingCredentials)?;

            // The nonce is consumed here even if the request later fails.
            let nonce = signer.next_nonce();
            let signed = signer.sign(&params, nonce)?;
            let hash = HeaderValue::from_str(&signed.hash)
                .map_err(|e| SxcError::Auth(format!("Invalid signature header: {e}")))?;
            headers.insert(HeaderName::from_static(HASH_HEADER), hash);
            Some(signed.body)
        } else if params.is_empty() {
            None
        } else {
            Some(serde_json::to_string(&params)?)
        };

        if body.is_some() {
            headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        }

        debug!(%method, %endpoint, private, "dispatching SouthXchange request");

        let response = self
            .transport
            .send(HttpRequest {
                method,
                url: format!("{}{}", self.base_url, endpoint),
                headers,
                body,
            })
            .await?;

        decode_response(&endpoint, response)
    }

    /// Dispatch a request and decode the payload into `R`.
    ///
    /// A payload that does not match `R` is reported as
    /// [`SxcError::InvalidResponse`].
    pub async fn call_typed<R>(&self, request: ApiRequest) -> Result<R, SxcError>
    where
        R: DeserializeOwned,
    {
        let endpoint = request.endpoint.clone();
        let value = self.call(request).await?;
        decode_value(&endpoint, value)
    }
}

/// Decode a JSON payload into a defined structure.
pub(crate) fn decode_value<R>(endpoint: &str, value: Value) -> Result<R, SxcError>
where
    R: DeserializeOwned,
{
    serde_json::from_value(value).map_err(|e| {
        warn!(%endpoint, error = %e, "unexpected response shape");
        SxcError::InvalidResponse(format!("Unexpected response from {endpoint}: {e}"))
    })
}

/// Classify a raw response.
fn decode_response(endpoint: &str, response: HttpResponse) -> Result<Value, SxcError> {
    let HttpResponse { status, body } = response;
    let body = body.trim();

    if !(200..300).contains(&status) {
        let api_error = rejection(status, body);
        warn!(%endpoint, status, code = %api_error.code, message = %api_error.message, "SouthXchange rejected request");
        return Err(SxcError::Api(api_error));
    }

    if status == 204 || body.is_empty() {
        return Ok(Value::Null);
    }

    let value: Value = serde_json::from_str(body).map_err(|e| {
        warn!(%endpoint, status, "response body is not JSON");
        SxcError::InvalidResponse(format!("Failed to parse response: {}. Body: {}", e, body))
    })?;

    if let Some(api_error) = envelope_error(&value, status) {
        warn!(%endpoint, status, code = %api_error.code, message = %api_error.message, "SouthXchange returned an error envelope");
        return Err(SxcError::Api(api_error));
    }

    Ok(value)
}

/// Build the error for a non-2xx response.
///
/// An error envelope keeps its code. A bare JSON string or plain text body
/// becomes the message, with the HTTP status as the code.
fn rejection(status: u16, body: &str) -> ApiError {
    match serde_json::from_str::<Value>(body) {
        Ok(value) => envelope_error(&value, status).unwrap_or_else(|| match value {
            Value::String(message) => ApiError::new(status.to_string(), message, status),
            other => ApiError::new(status.to_string(), other.to_string(), status),
        }),
        Err(_) => ApiError::new(status.to_string(), body, status),
    }
}

/// Recognise an `{"Code": .., "Message": ..}` error envelope.
///
/// Field names are matched in PascalCase or camelCase. The code may be a
/// string or a number; anything else is not an envelope.
fn envelope_error(value: &Value, status: u16) -> Option<ApiError> {
    let object = value.as_object()?;
    let code = object.get("Code").or_else(|| object.get("code"))?;
    let message = object.get("Message").or_else(|| object.get("message"))?;

    let code = match code {
        Value::String(code) => code.clone(),
        Value::Number(code) => code.to_string(),
        _ => return None,
    };
    let message = message.as_str()?;

    Some(ApiError::new(code, message, status))
}

impl Default for SxcRestClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> std::fmt::Debug for SxcRestClient<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SxcRestClient")
            .field("base_url", &self.base_url)
            .field("has_credentials", &self.has_credentials())
            .finish()
    }
}

/// Builder for [`SxcRestClient`].
pub struct SxcRestClientBuilder {
    base_url: String,
    credentials: Option<Arc<dyn CredentialsProvider>>,
    nonce_provider: Option<Arc<dyn NonceProvider>>,
    user_agent: Option<String>,
    timeout: Option<Duration>,
}

impl SxcRestClientBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self {
            base_url: SXC_BASE_URL.to_string(),
            credentials: None,
            nonce_provider: None,
            user_agent: None,
            timeout: None,
        }
    }

    /// Set the base URL (useful for testing with a mock server).
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the credentials provider for authenticated requests.
    pub fn credentials(mut self, credentials: Arc<dyn CredentialsProvider>) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Set a custom nonce provider.
    pub fn nonce_provider(mut self, provider: Arc<dyn NonceProvider>) -> Self {
        self.nonce_provider = Some(provider);
        self
    }

    /// Set a custom user agent.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Set a timeout covering each whole request.
    ///
    /// A request that times out after being signed has still used up its nonce.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Build the client with the default HTTP transport.
    pub fn build(self) -> Result<SxcRestClient, SxcError> {
        // Build default headers.
        let mut headers = HeaderMap::new();
        let user_agent = self
            .user_agent
            .clone()
            .unwrap_or_else(|| format!("southxchange-api-client/{}", env!("CARGO_PKG_VERSION")));
        let header_value = HeaderValue::from_str(&user_agent)
            .unwrap_or_else(|_| HeaderValue::from_static("southxchange-api-client"));
        headers.insert(USER_AGENT, header_value);

        let mut reqwest_builder = reqwest::Client::builder().default_headers(headers);
        if let Some(timeout) = self.timeout {
            reqwest_builder = reqwest_builder.timeout(timeout);
        }
        let reqwest_client = reqwest_builder.build()?;

        let client = ClientBuilder::new(reqwest_client)
            .with(TracingMiddleware::default())
            .build();

        self.build_with_transport(HttpTransport::new(client))
    }

    /// Build the client on top of a custom [`Transport`].
    ///
    /// `user_agent` and `timeout` only apply to the default HTTP transport.
    pub fn build_with_transport<T: Transport>(
        self,
        transport: T,
    ) -> Result<SxcRestClient<T>, SxcError> {
        let base_url = Url::parse(&self.base_url)?;
        if base_url.cannot_be_a_base() {
            return Err(SxcError::Configuration(format!(
                "Base URL cannot carry endpoint paths: {}",
                self.base_url
            )));
        }

        let nonce_provider = self
            .nonce_provider
            .unwrap_or_else(|| Arc::new(IncreasingNonce::new()));
        let signer = self
            .credentials
            .map(|credentials| Signer::new(credentials, nonce_provider));

        Ok(SxcRestClient {
            transport,
            base_url: self.base_url.trim_end_matches('/').to_string(),
            signer,
        })
    }
}
