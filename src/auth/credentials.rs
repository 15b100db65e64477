//! SouthXchange key pairs and where they come from.

use secrecy::{ExposeSecret, SecretString};

/// Environment variable read by [`EnvCredentials::try_from_env`] for the access key.
pub const ACCESS_KEY_VAR: &str = "SXC_ACCESS_KEY";
/// Environment variable read by [`EnvCredentials::try_from_env`] for the secret key.
pub const SECRET_KEY_VAR: &str = "SXC_SECRET_KEY";

/// A SouthXchange key pair.
///
/// The access key travels in every signed body as `key`. The secret key
/// never leaves the process; it only keys the HMAC over that body.
#[derive(Clone)]
pub struct Credentials {
    /// Public half of the pair, sent as `key`
    pub access_key: String,
    secret_key: SecretString,
}

impl Credentials {
    /// Create a key pair. Empty keys are accepted here and rejected when signing.
    pub fn new(access_key: impl Into<String>, secret_key: impl Into<String>) -> Self {
        Self {
            access_key: access_key.into(),
            secret_key: SecretString::from(secret_key.into()),
        }
    }

    /// Raw secret bytes for the signer.
    pub fn expose_secret(&self) -> &str {
        self.secret_key.expose_secret()
    }

    /// Both keys are non-empty.
    pub fn is_complete(&self) -> bool {
        !self.access_key.is_empty() && !self.secret_key.expose_secret().is_empty()
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("access_key", &self.access_key)
            .field("secret_key", &"[REDACTED]")
            .finish()
    }
}

/// Supplies the key pair used by the signer.
///
/// The client holds one provider for its whole lifetime and asks it for the
/// key pair on every private call.
pub trait CredentialsProvider: Send + Sync {
    /// The key pair to sign the next request with.
    fn credentials(&self) -> &Credentials;
}

/// A key pair fixed at construction.
#[derive(Clone, Debug)]
pub struct StaticCredentials(Credentials);

impl StaticCredentials {
    /// Wrap a key pair given as plain strings.
    pub fn new(access_key: impl Into<String>, secret_key: impl Into<String>) -> Self {
        Self(Credentials::new(access_key, secret_key))
    }
}

impl From<Credentials> for StaticCredentials {
    fn from(credentials: Credentials) -> Self {
        Self(credentials)
    }
}

impl CredentialsProvider for StaticCredentials {
    fn credentials(&self) -> &Credentials {
        &self.0
    }
}

/// A key pair read once from the process environment.
#[derive(Debug)]
pub struct EnvCredentials(Credentials);

impl EnvCredentials {
    /// Read [`ACCESS_KEY_VAR`] and [`SECRET_KEY_VAR`].
    pub fn try_from_env() -> Option<Self> {
        Self::try_from_env_vars(ACCESS_KEY_VAR, SECRET_KEY_VAR)
    }

    /// Read the key pair from the named variables.
    ///
    /// `None` when either variable is unset or empty.
    pub fn try_from_env_vars(access_key_var: &str, secret_key_var: &str) -> Option<Self> {
        let pair = Credentials::new(
            std::env::var(access_key_var).ok()?,
            std::env::var(secret_key_var).ok()?,
        );
        pair.is_complete().then_some(Self(pair))
    }
}

impl CredentialsProvider for EnvCredentials {
    fn credentials(&self) -> &Credentials {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_hides_secret_key() {
        let pair = Credentials::new("sxc-access", "sxc-secret-value");
        let rendered = format!("{pair:?}");

        assert!(rendered.contains("sxc-access"));
        assert!(!rendered.contains("sxc-secret-value"));
    }

    #[test]
    fn test_static_provider_returns_same_pair() {
        let provider = StaticCredentials::from(Credentials::new("sxc-access", "sxc-secret"));
        let pair = provider.credentials();

        assert_eq!(pair.access_key, "sxc-access");
        assert_eq!(pair.expose_secret(), "sxc-secret");
        assert!(pair.is_complete());
    }

    #[test]
    fn test_empty_half_is_incomplete() {
        assert!(!Credentials::new("", "sxc-secret").is_complete());
        assert!(!Credentials::new("sxc-access", "").is_complete());
    }

    #[test]
    fn test_unset_env_vars_yield_nothing() {
        let provider = EnvCredentials::try_from_env_vars(
            "SXC_TEST_UNSET_ACCESS_KEY_VAR",
            "SXC_TEST_UNSET_SECRET_KEY_VAR",
        );
        assert!(provider.is_none());
    }
}
