//
//  topsort-sdk
//  config/client.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/19.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Client configuration.
//!
//! A [`ClientConfig`] is built and validated once, then moved into a
//! [`TopsortClient`](crate::api::TopsortClient). It cannot change afterwards.
//!
//! ```rust
//! use std::time::Duration;
//! use topsort::config::ClientConfig;
//!
//! let config = ClientConfig::new("my-api-key")?
//!     .with_base_url("https://api.topsort.com")?
//!     .with_timeout(Duration::from_secs(5));
//! assert_eq!(config.base_url(), "https://api.topsort.com");
//! # Ok::<(), topsort::api::TopsortError>(())
//! ```

use std::fmt;
use std::time::Duration;

use url::Url;

use crate::api::error::{ErrorCause, Result, TopsortError};

/// Production API endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.topsort.com";

/// Connection settings for one client instance.
#[derive(Clone, PartialEq)]
pub struct ClientConfig {
    api_key: String,
    base_url: String,
    timeout: Option<Duration>,
}

fn invalid(detail: String) -> TopsortError {
    let cause = ErrorCause::InvalidConfig(detail);
    TopsortError::new(cause.to_string(), cause)
}

/// Checks that `base_url` is an absolute `http` or `https` URL.
pub fn validate_base_url(base_url: &str) -> Result<()> {
    let parsed =
        Url::parse(base_url).map_err(|e| invalid(format!("Invalid base URL '{}': {}", base_url, e)))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(invalid(format!("Unsupported URL scheme: {}", parsed.scheme())));
    }
    Ok(())
}

impl ClientConfig {
    /// Creates a configuration for the production endpoint.
    ///
    /// # Errors
    ///
    /// Returns an error if `api_key` is empty.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(invalid("API key must not be empty".to_string()));
        }
        Ok(Self {
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: None,
        })
    }

    /// Points the client at another endpoint, e.g. a staging server.
    ///
    /// A trailing slash is dropped.
    ///
    /// # Errors
    ///
    /// Returns an error unless `base_url` is an absolute `http` or `https` URL.
    pub fn with_base_url(mut self, base_url: &str) -> Result<Self> {
        validate_base_url(base_url)?;
        self.base_url = base_url.trim_end_matches('/').to_string();
        Ok(self)
    }

    /// Sets a request timeout for the HTTP client.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// The API key sent as a bearer token.
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// The API endpoint, without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Request timeout, if one was set.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}
