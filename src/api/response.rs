//
//  topsort-sdk
//  api/response.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/19.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Response normalization.
//!
//! Collapses the outcome of a transport call into `Result<Value, TopsortError>`:
//!
//! - 2xx: body decoded as JSON and returned unchanged (empty body is `null`)
//! - non-2xx: `<operation>: Content: <body>`, or `<operation>: Message: <status message>`
//!   when the body is empty
//! - no response: `<operation>: Could not connect to <url>`
//!
//! Nothing is retried or recovered here.

use reqwest::{Response, StatusCode};
use serde_json::Value;

use super::error::{ErrorCause, Result, TopsortError};

/// Normalizes a transport outcome for `operation` against `url`.
pub async fn normalize(
    operation: &str,
    url: &str,
    outcome: std::result::Result<Response, reqwest::Error>,
) -> Result<Value> {
    let response = match outcome {
        Ok(response) => response,
        Err(err) => return Err(connect_failure(operation, url, err)),
    };

    let status = response.status();
    if !status.is_success() {
        let message = response
            .error_for_status_ref()
            .err()
            .map(|e| e.to_string())
            .unwrap_or_else(|| status.to_string());
        let body = response.text().await.unwrap_or_default();
        return Err(http_failure(operation, status, body, &message));
    }

    let bytes = response
        .bytes()
        .await
        .map_err(|e| connect_failure(operation, url, e))?;
    decode_body(operation, &bytes)
}

/// Error for a request that never got a response.
pub fn connect_failure(operation: &str, url: &str, err: reqwest::Error) -> TopsortError {
    let target = err.url().map(|u| u.to_string()).unwrap_or_else(|| url.to_string());
    tracing::debug!("{} ({})", operation, err);
    TopsortError::new(
        format!("{}: Could not connect to {}", operation, target),
        ErrorCause::Transport(err),
    )
}

/// Error for a non-success response.
///
/// The body is preferred as diagnostic content; `transport_message` is used
/// when the body is empty.
pub fn http_failure(
    operation: &str,
    status: StatusCode,
    body: String,
    transport_message: &str,
) -> TopsortError {
    let message = if body.is_empty() {
        format!("{}: Message: {}", operation, transport_message)
    } else {
        format!("{}: Content: {}", operation, body)
    };
    TopsortError::new(message, ErrorCause::Http { status, body })
}

/// Decodes a success body. An empty body decodes to `Value::Null`.
pub fn decode_body(operation: &str, bytes: &[u8]) -> Result<Value> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Null);
    }
    serde_json::from_slice(bytes).map_err(|e| {
        TopsortError::new(
            format!("{}: Could not decode response: {}", operation, e),
            ErrorCause::Decode(e),
        )
    })
}
