//! SouthXchange REST API client.
//!
//! Every endpoint method on [`SxcRestClient`] builds an [`ApiRequest`] and
//! hands it to [`SxcRestClient::call`], which signs private requests and
//! sends them through a [`Transport`].
//!
//! # Custom transports
//!
//! The client is generic over its [`Transport`]. [`HttpTransport`] is used by
//! default; any other implementation can be plugged in with
//! [`SxcRestClientBuilder::build_with_transport`]:
//!
//! ```rust,ignore
//! use southxchange_api_client::rest::{HttpRequest, HttpResponse, SxcRestClient, Transport};
//! use southxchange_api_client::error::SxcError;
//!
//! struct Recorded(String);
//!
//! impl Transport for Recorded {
//!     async fn send(&self, _request: HttpRequest) -> Result<HttpResponse, SxcError> {
//!         Ok(HttpResponse::new(200, self.0.clone()))
//!     }
//! }
//!
//! let client = SxcRestClient::builder().build_with_transport(Recorded("[]".into()))?;
//! ```

mod client;
mod endpoints;
mod history;
#[cfg(test)]
mod mock;
pub mod private;
pub mod public;
mod request;
mod transport;

pub use client::{HASH_HEADER, SxcRestClient, SxcRestClientBuilder};
pub use endpoints::*;
pub use history::{CandleSeries, HistoryReconciler, HistoryRequest};
pub use request::ApiRequest;
pub use transport::{HttpRequest, HttpResponse, HttpTransport, Transport};
