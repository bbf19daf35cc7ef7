//! Client configuration.
//!
//! A [`ClientConfig`] is built once per facade and never changes afterwards.
//! The API key comes from the builder or, failing that, from
//! [`API_KEY_ENV`](crate::constants::API_KEY_ENV). A missing key is not an
//! error: unauthenticated endpoints keep working and authenticated ones fail
//! with [`Error::Unauthorized`](crate::Error::Unauthorized) at call time.

use std::fmt;
use std::time::Duration;

use url::Url;

use crate::constants::{API_KEY_ENV, DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
use crate::error::ConfigError;

/// Immutable settings shared by every call a facade makes.
#[derive(Clone, PartialEq, Eq)]
pub struct ClientConfig {
    api_key: Option<String>,
    base_url: Url,
    timeout: Duration,
}

impl ClientConfig {
    /// Starts a builder with default settings.
    #[must_use]
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::default()
    }

    /// Default settings, with the API key taken from the environment.
    ///
    /// # Errors
    ///
    /// Never fails with the built-in base URL; the `Result` mirrors
    /// [`ClientConfigBuilder::build`].
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::builder().build()
    }

    /// The effective API key, if any.
    #[must_use]
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }

    /// Base URL every request path is resolved against.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Time limit applied to each request/response call.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("base_url", &self.base_url.as_str())
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Builder for [`ClientConfig`].
#[derive(Clone, Default)]
pub struct ClientConfigBuilder {
    api_key: Option<String>,
    base_url: Option<String>,
    timeout: Option<Duration>,
}

impl ClientConfigBuilder {
    /// Sets the API key. Takes precedence over the environment.
    #[must_use]
    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Overrides the base URL (default `https://api.ln.bot`).
    #[must_use]
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Overrides the per-request timeout (default 30 seconds).
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Validates the settings and reads the environment once.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the base URL does not parse, is not
    /// `http`/`https`, or cannot carry a path.
    pub fn build(self) -> Result<ClientConfig, ConfigError> {
        self.build_with_env(|name| std::env::var(name).ok())
    }

    pub(crate) fn build_with_env<F>(self, env: F) -> Result<ClientConfig, ConfigError>
    where
        F: FnOnce(&str) -> Option<String>,
    {
        let api_key = self
            .api_key
            .filter(|key| !key.is_empty())
            .or_else(|| env(API_KEY_ENV).filter(|key| !key.is_empty()));
        let base_url = parse_base_url(self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL))?;
        Ok(ClientConfig {
            api_key,
            base_url,
            timeout: self.timeout.unwrap_or(DEFAULT_TIMEOUT),
        })
    }
}

impl fmt::Debug for ClientConfigBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfigBuilder")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

fn parse_base_url(raw: &str) -> Result<Url, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');
    let url = Url::parse(trimmed).map_err(|source| ConfigError::InvalidBaseUrl {
        url: raw.to_owned(),
        source,
    })?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::UnsupportedScheme(raw.to_owned()));
    }
    if url.cannot_be_a_base() {
        return Err(ConfigError::NotABase(raw.to_owned()));
    }
    Ok(url)
}
