//! HMAC-SHA512 signature generation for SouthXchange API authentication.
//!
//! SouthXchange private endpoints take a JSON body that carries the access key
//! and a nonce next to the endpoint parameters:
//! ```text
//! {"amount":0.5,"currency":"LTC","key":"<access key>","nonce":1668012323000000}
//! ```
//! The signature is computed as:
//! ```text
//! hex(HMAC-SHA512(body, secret_key))
//! ```
//! and sent in the `Hash` header. The exchange recomputes the MAC over the
//! bytes it received, so the signed body must be sent unmodified.

use std::collections::BTreeMap;
use std::sync::Arc;

use hmac::{Hmac, Mac};
use serde_json::{Map, Value};
use sha2::Sha512;

use crate::auth::{Credentials, CredentialsProvider, NonceProvider};
use crate::error::SxcError;

type HmacSha512 = Hmac<Sha512>;

/// Body field carrying the access key.
pub const KEY_FIELD: &str = "key";
/// Body field carrying the nonce.
pub const NONCE_FIELD: &str = "nonce";

/// Sign a serialized request body for SouthXchange's private API.
///
/// # Returns
///
/// Lowercase hex-encoded HMAC-SHA512 signature.
///
/// # Example
///
/// ```rust
/// use southxchange_api_client::auth::{Credentials, sign_payload};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let credentials = Credentials::new("access_key", "secret_key");
/// let hash = sign_payload(&credentials, r#"{"key":"access_key","nonce":1}"#)?;
/// assert_eq!(hash.len(), 128);
/// # Ok(())
/// # }
/// ```
pub fn sign_payload(credentials: &Credentials, body: &str) -> Result<String, SxcError> {
    let mut hmac = HmacSha512::new_from_slice(credentials.expose_secret().as_bytes())
        .map_err(|e| SxcError::Auth(format!("Invalid HMAC key: {e}")))?;
    hmac.update(body.as_bytes());
    Ok(hex::encode(hmac.finalize().into_bytes()))
}

/// Build the canonical JSON body for a signed request.
///
/// The access key and nonce are injected as fields and take precedence over
/// caller parameters of the same name. Keys are emitted in lexicographic
/// order, compact, so the same inputs always produce the same bytes.
pub fn canonical_body(
    params: &Map<String, Value>,
    access_key: &str,
    nonce: u64,
) -> Result<String, SxcError> {
    let key = Value::from(access_key);
    let nonce = Value::from(nonce);
    let mut body: BTreeMap<&str, &Value> = params.iter().map(|(k, v)| (k.as_str(), v)).collect();
    body.insert(KEY_FIELD, &key);
    body.insert(NONCE_FIELD, &nonce);
    Ok(serde_json::to_string(&body)?)
}

/// A signed request body together with its authentication material.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedPayload {
    /// The nonce embedded in `body`
    pub nonce: u64,
    /// Exact JSON body to send
    pub body: String,
    /// Hex signature for the `Hash` header
    pub hash: String,
}

/// Produces authentication material for private requests.
///
/// Owns the credentials and the nonce floor. Cloning shares the same floor, so
/// every clone keeps issuing strictly increasing nonces.
#[derive(Clone)]
pub struct Signer {
    credentials: Arc<dyn CredentialsProvider>,
    nonce_provider: Arc<dyn NonceProvider>,
}

impl Signer {
    /// Create a signer from a credentials provider and a nonce provider.
    pub fn new(
        credentials: Arc<dyn CredentialsProvider>,
        nonce_provider: Arc<dyn NonceProvider>,
    ) -> Self {
        Self {
            credentials,
            nonce_provider,
        }
    }

    /// The credentials this signer signs with.
    pub fn credentials(&self) -> &Credentials {
        self.credentials.credentials()
    }

    /// Whether both keys are present.
    pub fn has_credentials(&self) -> bool {
        self.credentials().is_complete()
    }

    /// Next strictly increasing nonce.
    pub fn next_nonce(&self) -> u64 {
        self.nonce_provider.next_nonce()
    }

    /// Sign `params` with the given nonce.
    ///
    /// Fails with [`SxcError::MissingCredentials`] if either key is empty.
    pub fn sign(&self, params: &Map<String, Value>, nonce: u64) -> Result<SignedPayload, SxcError> {
        let credentials = self.credentials();
        if !credentials.is_complete() {
            return Err(SxcError::MissingCredentials);
        }
        let body = canonical_body(params, &credentials.access_key, nonce)?;
        let hash = sign_payload(credentials, &body)?;
        Ok(SignedPayload { nonce, body, hash })
    }
}

impl std::fmt::Debug for Signer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Signer")
            .field("credentials", self.credentials())
            .finish()
    }
}
