//! Passphrase sourcing for the encryption layer.
//!
//! The codec never owns the passphrase configuration. It asks a
//! `SecretProvider` exactly once per session and caches the result in its
//! [`KeyContext`](crate::KeyContext). Production wires in
//! [`EnvSecretProvider`]; tests use [`StaticSecretProvider`].

use async_trait::async_trait;
use thiserror::Error;

/// Default environment variable holding the vault passphrase.
pub const DEFAULT_SECRET_ENV: &str = "KEEPSAKE_ENCRYPTION_KEY";

/// Errors from passphrase lookup.
#[derive(Debug, Error)]
pub enum SecretError {
    /// No passphrase is configured at the given source.
    #[error("no encryption passphrase configured ({0})")]
    NotConfigured(String),
    /// A passphrase was found but is empty. An empty passphrase would
    /// silently derive a fixed key, so it is rejected outright.
    #[error("configured encryption passphrase is empty")]
    Empty,
}

pub type SecretResult<T> = Result<T, SecretError>;

/// Source of the raw vault passphrase.
///
/// Implementations must fail loudly when no passphrase is configured —
/// the codec has no default and will propagate the failure to the caller
/// rather than encrypting under a guessed key.
#[async_trait]
pub trait SecretProvider: Send + Sync {
    /// Returns the configured passphrase. Must be non-empty.
    async fn passphrase(&self) -> SecretResult<String>;
}

/// Reads the passphrase from an environment variable.
pub struct EnvSecretProvider {
    var: String,
}

impl EnvSecretProvider {
    /// Provider reading [`DEFAULT_SECRET_ENV`].
    pub fn new() -> Self {
        Self::from_var(DEFAULT_SECRET_ENV)
    }

    /// Provider reading a custom environment variable.
    pub fn from_var(var: impl Into<String>) -> Self {
        Self { var: var.into() }
    }
}

impl Default for EnvSecretProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SecretProvider for EnvSecretProvider {
    async fn passphrase(&self) -> SecretResult<String> {
        match std::env::var(&self.var) {
            Ok(value) if value.is_empty() => Err(SecretError::Empty),
            Ok(value) => Ok(value),
            Err(_) => Err(SecretError::NotConfigured(self.var.clone())),
        }
    }
}

/// Fixed-passphrase provider for tests and tooling.
pub struct StaticSecretProvider(String);

impl StaticSecretProvider {
    pub fn new(passphrase: impl Into<String>) -> Self {
        Self(passphrase.into())
    }
}

#[async_trait]
impl SecretProvider for StaticSecretProvider {
    async fn passphrase(&self) -> SecretResult<String> {
        if self.0.is_empty() {
            return Err(SecretError::Empty);
        }
        Ok(self.0.clone())
    }
}

/// Provider that always fails, for exercising missing-configuration paths.
pub struct UnavailableSecretProvider;

#[async_trait]
impl SecretProvider for UnavailableSecretProvider {
    async fn passphrase(&self) -> SecretResult<String> {
        Err(SecretError::NotConfigured("unavailable".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn static_provider_returns_passphrase() {
        let provider = StaticSecretProvider::new("hunter2-passphrase");
        assert_eq!(provider.passphrase().await.unwrap(), "hunter2-passphrase");
    }

    #[tokio::test]
    async fn empty_static_passphrase_rejected() {
        let provider = StaticSecretProvider::new("");
        assert!(matches!(
            provider.passphrase().await,
            Err(SecretError::Empty)
        ));
    }

    #[tokio::test]
    async fn missing_env_var_fails_loudly() {
        let provider = EnvSecretProvider::from_var("KEEPSAKE_TEST_UNSET_VAR");
        assert!(matches!(
            provider.passphrase().await,
            Err(SecretError::NotConfigured(_))
        ));
    }
}
