//
//  topsort-sdk
//  api/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/19.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # API Client Layer
//!
//! This module provides the client for Topsort's auctions and events API.
//!
//! ## Architecture
//!
//! The API layer is organized as follows:
//!
//! - [`client`]: The [`TopsortClient`] facade exposed to callers
//! - [`auction`] and [`events`]: Typed request models for the v2 API
//! - [`payload`]: Request body construction and event defaults
//! - [`transport`]: Authenticated HTTP requests over `reqwest`
//! - [`response`]: Response decoding and error translation
//! - [`error`]: The [`TopsortError`] type
//! - [`legacy`]: The v1 API, kept for compatibility
//!
//! ## Usage
//!
//! ```rust,no_run
//! use topsort::api::TopsortClient;
//! use topsort::api::events::{Entity, InteractionEvent};
//! use topsort::config::ClientConfig;
//!
//! # async fn example() -> topsort::api::Result<()> {
//! let client = TopsortClient::new(ClientConfig::new("my-api-key")?)?;
//! client
//!     .report_click(InteractionEvent {
//!         entity: Some(Entity::product("p-1")),
//!         ..Default::default()
//!     })
//!     .await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! Every operation returns [`Result`], whose error is always a
//! [`TopsortError`]. Its message says which operation failed and why; the
//! [`ErrorCause`] keeps the underlying transport, HTTP or decode error.

/// The public client facade.
pub mod client;

/// v2 auction request models.
pub mod auction;

/// v2 event request models.
pub mod events;

/// Request body construction.
pub mod payload;

/// HTTP transport.
pub mod transport;

/// Response normalization.
pub mod response;

/// Error types.
pub mod error;

/// Legacy v1 endpoints.
pub mod legacy;

pub use client::TopsortClient;
pub use error::{ErrorCause, Result, TopsortError};
