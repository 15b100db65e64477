//! HTTP transport used by the REST client.
//!
//! The [`Transport`] trait is the seam between request dispatch and the
//! network. [`HttpTransport`] is the production implementation; tests can plug
//! in their own to observe or script exchanges.

use std::future::Future;
use std::sync::Arc;

use reqwest::Method;
use reqwest::header::HeaderMap;
use reqwest_middleware::ClientWithMiddleware;

use crate::error::SxcError;

/// A fully formed HTTP request.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    /// HTTP method
    pub method: Method,
    /// Absolute URL
    pub url: String,
    /// Request headers
    pub headers: HeaderMap,
    /// Request body, sent as is
    pub body: Option<String>,
}

/// Raw status and body of an HTTP response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    /// HTTP status code
    pub status: u16,
    /// Response body as text
    pub body: String,
}

impl HttpResponse {
    /// Create a response from a status code and body.
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// Performs network calls for the REST client.
///
/// Implementations must not retry. A signed request is sent at most once.
pub trait Transport: Send + Sync {
    /// Send a request and return the raw response.
    ///
    /// Connection level failures are reported as errors; any HTTP status,
    /// including non-2xx, is a successful transport round trip.
    fn send(
        &self,
        request: HttpRequest,
    ) -> impl Future<Output = Result<HttpResponse, SxcError>> + Send;
}

impl<T: Transport> Transport for Arc<T> {
    fn send(
        &self,
        request: HttpRequest,
    ) -> impl Future<Output = Result<HttpResponse, SxcError>> + Send {
        (**self).send(request)
    }
}

/// [`Transport`] backed by a `reqwest` client with tracing middleware.
#[derive(Clone, Debug)]
pub struct HttpTransport {
    client: ClientWithMiddleware,
}

impl HttpTransport {
    /// Wrap an existing middleware client.
    pub fn new(client: ClientWithMiddleware) -> Self {
        Self { client }
    }
}

impl Transport for HttpTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, SxcError> {
        let mut builder = self
            .client
            .request(request.method, &request.url)
            .headers(request.headers);
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await.map_err(|e| match e {
            reqwest_middleware::Error::Reqwest(ref inner) if inner.is_timeout() => {
                SxcError::Timeout
            }
            other => SxcError::HttpMiddleware(other),
        })?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(|e| {
            if e.is_timeout() {
                SxcError::Timeout
            } else {
                SxcError::Http(e)
            }
        })?;

        Ok(HttpResponse { status, body })
    }
}
