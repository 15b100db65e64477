//! Scripted transport for unit tests.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use serde_json::Value;

use crate::auth::{NonceProvider, StaticCredentials};
use crate::error::SxcError;
use crate::rest::transport::{HttpRequest, HttpResponse, Transport};
use crate::rest::{SxcRestClient, SxcRestClientBuilder};

/// Replays queued responses in order and records every request it sees.
#[derive(Default)]
pub(crate) struct MockTransport {
    responses: Mutex<VecDeque<Result<HttpResponse, SxcError>>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl MockTransport {
    pub(crate) fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub(crate) fn push(&self, response: Result<HttpResponse, SxcError>) {
        self.responses.lock().unwrap().push_back(response);
    }

    pub(crate) fn push_status(&self, status: u16, body: impl Into<String>) {
        self.push(Ok(HttpResponse::new(status, body)));
    }

    pub(crate) fn push_json(&self, value: Value) {
        self.push_status(200, value.to_string());
    }

    pub(crate) fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub(crate) fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl Transport for MockTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, SxcError> {
        self.requests.lock().unwrap().push(request);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(SxcError::InvalidResponse("no scripted response".into())))
    }
}

/// Always returns the same nonce.
pub(crate) struct FixedNonce(pub(crate) u64);

impl NonceProvider for FixedNonce {
    fn next_nonce(&self) -> u64 {
        self.0
    }
}

pub(crate) const BASE_URL: &str = "https://sxc.test/api/v4";

pub(crate) fn public_client(transport: &Arc<MockTransport>) -> SxcRestClient<Arc<MockTransport>> {
    SxcRestClientBuilder::new()
        .base_url(BASE_URL)
        .build_with_transport(transport.clone())
        .unwrap()
}

pub(crate) fn private_client(
    transport: &Arc<MockTransport>,
) -> SxcRestClient<Arc<MockTransport>> {
    SxcRestClientBuilder::new()
        .base_url(BASE_URL)
        .credentials(Arc::new(StaticCredentials::new("access", "secret")))
        .nonce_provider(Arc::new(FixedNonce(1_000)))
        .build_with_transport(transport.clone())
        .unwrap()
}
