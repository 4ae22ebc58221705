//
//  topsort-sdk
//  api/transport.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/19.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! HTTP transport for the Topsort API.
//!
//! A thin layer over [`reqwest::Client`] that resolves paths against the
//! configured base URL and attaches the headers every request needs:
//!
//! - `Authorization: Bearer <api key>`
//! - `User-Agent: Topsort/Rust-SDK <version>`
//!
//! Each call makes exactly one attempt. Retries and timeouts belong to the
//! `reqwest` client configuration.

use reqwest::{Client, Method, Response};
use serde_json::Value;

use super::error::{ErrorCause, Result, TopsortError};
use crate::config::ClientConfig;

/// Issues authenticated JSON requests against one Topsort base URL.
#[derive(Clone)]
pub struct HttpTransport {
    /// The underlying HTTP client
    http: Client,
    /// Base URL without a trailing slash
    base_url: String,
    api_key: String,
}

impl HttpTransport {
    /// Builds a transport from a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be created.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let mut builder = Client::builder().user_agent(crate::user_agent());
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }

        let http = builder
            .build()
            .map_err(|e| TopsortError::new("Could not create HTTP client", ErrorCause::Client(e)))?;

        Ok(Self {
            http,
            base_url: config.base_url().to_string(),
            api_key: config.api_key().to_string(),
        })
    }

    /// The base URL requests are resolved against.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Full URL for an API path.
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Sends one request and returns the raw response.
    ///
    /// Non-success statuses are returned as responses, not errors; only
    /// failures to get any response at all are `Err`.
    pub async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> std::result::Result<Response, reqwest::Error> {
        let url = self.url(path);
        tracing::debug!("{} {}", method, url);

        let mut request = self.http.request(method, &url).bearer_auth(&self.api_key);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        tracing::debug!("{} -> {}", url, response.status());
        Ok(response)
    }
}
