//! Request descriptors consumed by the REST client.

use reqwest::Method;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::SxcError;

/// Description of one API call: method, endpoint, parameters and whether it
/// must be signed.
///
/// Built fresh for every call.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    /// HTTP method
    pub method: Method,
    /// Endpoint path relative to the base URL, e.g. `/placeOrder`
    pub endpoint: String,
    /// Body parameters
    pub params: Map<String, Value>,
    /// Whether the request carries authentication
    pub private: bool,
}

impl ApiRequest {
    fn new(method: Method, endpoint: impl Into<String>, private: bool) -> Self {
        Self {
            method,
            endpoint: endpoint.into(),
            params: Map::new(),
            private,
        }
    }

    /// Unauthenticated GET.
    pub fn public_get(endpoint: impl Into<String>) -> Self {
        Self::new(Method::GET, endpoint, false)
    }

    /// Authenticated GET. The signed JSON body is sent with the GET request.
    pub fn private_get(endpoint: impl Into<String>) -> Self {
        Self::new(Method::GET, endpoint, true)
    }

    /// Authenticated POST.
    pub fn private_post(endpoint: impl Into<String>) -> Self {
        Self::new(Method::POST, endpoint, true)
    }

    /// Replace the parameters with the fields of `params`.
    ///
    /// `params` must serialize to a JSON object (or `null` for none).
    pub fn with_params<P>(mut self, params: &P) -> Result<Self, SxcError>
    where
        P: Serialize + ?Sized,
    {
        match serde_json::to_value(params)? {
            Value::Object(map) => self.params = map,
            Value::Null => self.params.clear(),
            other => {
                return Err(SxcError::Validation(format!(
                    "Request parameters must serialize to a JSON object, got: {other}"
                )));
            }
        }
        Ok(self)
    }

    /// Set a single parameter.
    pub fn param(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.params.insert(name.into(), value.into());
        self
    }
}

/// Build a market path such as `/book/ETH/BTC`.
///
/// Currency codes must be non-empty and must not contain path separators.
pub(crate) fn market_path(
    prefix: &str,
    target_currency: &str,
    reference_currency: &str,
) -> Result<String, SxcError> {
    for code in [target_currency, reference_currency] {
        if code.is_empty() || code.contains(['/', '?', '#']) || code.contains(char::is_whitespace)
        {
            return Err(SxcError::Validation(format!(
                "Invalid currency code: '{code}'"
            )));
        }
    }
    Ok(format!("{prefix}/{target_currency}/{reference_currency}"))
}
