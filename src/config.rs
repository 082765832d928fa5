// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Session configuration.

use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;

use serde::Deserialize;

use crate::error::ConfigError;

/// Vendor media type sent as both `Content-Type` and `Accept`.
pub const MEDIA_TYPE: &str = "application/vnd.alertme.zoo-6.1+json";

/// Header carrying the session identifier once a login succeeded.
pub const ACCESS_TOKEN_HEADER: &str = "X-Omnia-Access-Token";

/// Header identifying the client to the service.
pub const CLIENT_HEADER: &str = "X-Omnia-Client";

/// Configuration for a Hive session.
///
/// Starts from the service defaults; override what you need with the
/// `with_*` methods or by applying a [`ConfigOverride`].
///
/// # Examples
///
/// ```
/// use hive_lib::HiveConfig;
/// use std::time::Duration;
///
/// let config = HiveConfig::default()
///     .with_credentials("user@example.com", "secret")
///     .with_idle_threshold(Duration::from_secs(10 * 60));
///
/// assert_eq!(config.username(), "user@example.com");
/// assert_eq!(config.endpoint(), HiveConfig::DEFAULT_ENDPOINT);
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct HiveConfig {
    username: String,
    password: String,
    endpoint: String,
    headers: BTreeMap<String, String>,
    idle_threshold: Duration,
    timeout: Duration,
}

impl HiveConfig {
    /// Default API endpoint.
    pub const DEFAULT_ENDPOINT: &'static str = "https://api-prod.bgchprod.info:443/omnia";
    /// Default idle threshold after which a new login is attempted.
    pub const DEFAULT_IDLE_THRESHOLD: Duration = Duration::from_secs(20 * 60);
    /// Default request timeout.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

    /// Returns the header set sent with every request before login.
    #[must_use]
    pub fn default_headers() -> BTreeMap<String, String> {
        BTreeMap::from([
            ("Content-Type".to_string(), MEDIA_TYPE.to_string()),
            ("Accept".to_string(), MEDIA_TYPE.to_string()),
            (CLIENT_HEADER.to_string(), "Hive Web Dashboard".to_string()),
        ])
    }

    /// Sets the account credentials.
    #[must_use]
    pub fn with_credentials(
        mut self,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        self.username = username.into();
        self.password = password.into();
        self
    }

    /// Sets the API endpoint. A trailing slash is ignored.
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into().trim_end_matches('/').to_string();
        self
    }

    /// Sets the idle threshold.
    #[must_use]
    pub fn with_idle_threshold(mut self, idle_threshold: Duration) -> Self {
        self.idle_threshold = idle_threshold;
        self
    }

    /// Adds or replaces a single header.
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Replaces the whole header set.
    #[must_use]
    pub fn with_headers(mut self, headers: BTreeMap<String, String>) -> Self {
        self.headers = headers;
        self
    }

    /// Sets the request timeout used by the default HTTP transport.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Applies a partial override, replacing only the fields it names.
    ///
    /// A supplied header map replaces the current one entirely.
    #[must_use]
    pub fn apply(mut self, overrides: ConfigOverride) -> Self {
        if let Some(username) = overrides.username {
            self.username = username;
        }
        if let Some(password) = overrides.password {
            self.password = password;
        }
        if let Some(endpoint) = overrides.endpoint {
            self = self.with_endpoint(endpoint);
        }
        if let Some(headers) = overrides.headers {
            self.headers = headers;
        }
        if let Some(minutes) = overrides.idle_minutes {
            self.idle_threshold = Duration::try_from_secs_f64((minutes * 60.0).max(0.0))
                .unwrap_or(Duration::MAX);
        }
        if let Some(seconds) = overrides.timeout_secs {
            self.timeout = Duration::from_secs(seconds);
        }
        self
    }

    /// Checks that credentials were supplied.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingCredentials`] if the username or the
    /// password is empty.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.username.is_empty() || self.password.is_empty() {
            return Err(ConfigError::MissingCredentials);
        }
        Ok(())
    }

    /// Returns the username.
    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Returns the password.
    #[must_use]
    pub fn password(&self) -> &str {
        &self.password
    }

    /// Returns the API endpoint.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Returns the configured header set.
    #[must_use]
    pub fn headers(&self) -> &BTreeMap<String, String> {
        &self.headers
    }

    /// Returns the idle threshold.
    #[must_use]
    pub fn idle_threshold(&self) -> Duration {
        self.idle_threshold
    }

    /// Returns the request timeout.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Builds the URL of an API path below the endpoint.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.endpoint, path.trim_start_matches('/'))
    }
}

impl Default for HiveConfig {
    fn default() -> Self {
        Self {
            username: String::new(),
            password: String::new(),
            endpoint: Self::DEFAULT_ENDPOINT.to_string(),
            headers: Self::default_headers(),
            idle_threshold: Self::DEFAULT_IDLE_THRESHOLD,
            timeout: Self::DEFAULT_TIMEOUT,
        }
    }
}

impl fmt::Debug for HiveConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HiveConfig")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("endpoint", &self.endpoint)
            .field("headers", &self.headers)
            .field("idle_threshold", &self.idle_threshold)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// A partial configuration, typically deserialized from a settings file.
///
/// Field names follow the service's own conventions (`idleMinutes`).
///
/// # Examples
///
/// ```
/// use hive_lib::{ConfigOverride, HiveConfig};
///
/// let overrides: ConfigOverride =
///     serde_json::from_str(r#"{"username": "a", "password": "b"}"#).unwrap();
/// let config = HiveConfig::default().apply(overrides);
///
/// assert_eq!(config.username(), "a");
/// assert_eq!(config.idle_threshold(), HiveConfig::DEFAULT_IDLE_THRESHOLD);
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigOverride {
    /// Account username.
    pub username: Option<String>,
    /// Account password.
    pub password: Option<String>,
    /// API endpoint.
    pub endpoint: Option<String>,
    /// Full replacement header set.
    pub headers: Option<BTreeMap<String, String>>,
    /// Idle threshold in minutes; fractions are allowed.
    pub idle_minutes: Option<f64>,
    /// Request timeout in seconds.
    pub timeout_secs: Option<u64>,
}

impl ConfigOverride {
    /// Creates an override carrying only credentials.
    #[must_use]
    pub fn credentials(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: Some(username.into()),
            password: Some(password.into()),
            ..Self::default()
        }
    }
}
