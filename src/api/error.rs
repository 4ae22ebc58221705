//
//  topsort-sdk
//  api/error.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/19.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Error types for Topsort API operations
//!
//! Every failure that reaches a caller of the SDK is a [`TopsortError`]: a
//! human-readable message plus the underlying [`ErrorCause`] for inspection.
//! Transport exceptions, HTTP status failures and decode failures are never
//! exposed raw.
//!
//! # Message Format
//!
//! | Failure | Message |
//! |---------|---------|
//! | Non-2xx with body | `<operation>: Content: <body>` |
//! | Non-2xx without body | `<operation>: Message: <transport message>` |
//! | No response | `<operation>: Could not connect to <url>` |
//! | Invalid JSON response | `<operation>: Could not decode response: <error>` |
//!
//! # Example
//!
//! ```rust
//! use topsort::api::{ErrorCause, TopsortError};
//!
//! fn describe(err: &TopsortError) -> &'static str {
//!     match err.cause() {
//!         Some(ErrorCause::Transport(_)) => "network",
//!         Some(ErrorCause::Http { .. }) => "server",
//!         Some(ErrorCause::InvalidEventType(_)) => "caller",
//!         _ => "other",
//!     }
//! }
//! ```

use reqwest::StatusCode;
use thiserror::Error;

/// Result alias used throughout the SDK.
pub type Result<T> = std::result::Result<T, TopsortError>;

/// The single error type surfaced by every SDK operation.
///
/// Carries a message suitable for logs and end users, and the original
/// cause (if any) through [`std::error::Error::source`].
#[derive(Error, Debug)]
#[error("{message}")]
pub struct TopsortError {
    message: String,
    #[source]
    cause: Option<ErrorCause>,
}

/// What went wrong underneath a [`TopsortError`].
#[derive(Error, Debug)]
pub enum ErrorCause {
    /// The event kind is not one of `impression`, `click` or `purchase`.
    #[error("Invalid event type: {0}")]
    InvalidEventType(String),

    /// Raw event data was not a JSON object.
    #[error("Invalid event data: {0}")]
    InvalidEventData(String),

    /// The client configuration was rejected at construction time.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// An auction cannot be sent as given, e.g. a listings auction with no scope.
    #[error("Invalid auction: {0}")]
    InvalidAuction(String),

    /// The underlying HTTP client could not be built.
    #[error("Could not create HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    /// A request body could not be encoded as JSON.
    #[error("Could not encode request: {0}")]
    Encode(#[source] serde_json::Error),

    /// No response was received (connection refused, DNS failure, timeout).
    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    ///
    /// The body is already part of the [`TopsortError`] message, so it is
    /// left out of this display.
    #[error("HTTP {status}")]
    Http {
        /// Status code of the response
        status: StatusCode,
        /// Response body as text, possibly empty
        body: String,
    },

    /// A success response carried a body that is not valid JSON.
    #[error("Could not decode response: {0}")]
    Decode(#[source] serde_json::Error),
}

impl TopsortError {
    /// Creates an error with a message and an underlying cause.
    pub fn new(message: impl Into<String>, cause: ErrorCause) -> Self {
        Self {
            message: message.into(),
            cause: Some(cause),
        }
    }

    /// Creates an error that has no underlying cause.
    pub fn msg(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            cause: None,
        }
    }

    /// Error raised for an unrecognized event kind.
    pub fn invalid_event_type(kind: &str) -> Self {
        let cause = ErrorCause::InvalidEventType(kind.to_string());
        Self::new(cause.to_string(), cause)
    }

    /// The human-readable message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The underlying cause, if any.
    pub fn cause(&self) -> Option<&ErrorCause> {
        self.cause.as_ref()
    }

    /// HTTP status of the failed response, when the server answered.
    pub fn status(&self) -> Option<StatusCode> {
        match &self.cause {
            Some(ErrorCause::Http { status, .. }) => Some(*status),
            Some(ErrorCause::Transport(err)) => err.status(),
            _ => None,
        }
    }

    /// Returns `true` if a request was attempted and no response came back.
    ///
    /// Failures to build the HTTP client are [`ErrorCause::Client`] and do
    /// not count.
    pub fn is_connect(&self) -> bool {
        matches!(self.cause, Some(ErrorCause::Transport(_)))
    }

    /// Returns `true` if the error came from an unrecognized event kind.
    pub fn is_invalid_event_type(&self) -> bool {
        matches!(self.cause, Some(ErrorCause::InvalidEventType(_)))
    }
}
