//
//  topsort-sdk
//  lib.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/19.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Topsort SDK
//!
//! A client library for the Topsort retail media API, with a small
//! command-line tool on top.
//!
//! ## Overview
//!
//! Marketplaces use Topsort to decide which products or banners to promote
//! and to report how shoppers interact with them. This crate lets a
//! marketplace backend:
//!
//! - run auctions for promotional slots (listings and banners)
//! - report impressions, clicks and purchases
//! - reach the legacy v1 endpoints for older integrations
//!
//! ## Module Structure
//!
//! - [`api`]: The [`TopsortClient`] and its request/response layers
//! - [`identity`]: Opaque user id providers and stores
//! - [`config`]: Client settings and the CLI configuration file
//! - [`cli`]: Command-line interface definitions using clap
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use topsort::api::auction::{Auction, ListingsAuction};
//! use topsort::{ClientConfig, TopsortClient};
//!
//! # async fn example() -> Result<(), topsort::TopsortError> {
//! let client = TopsortClient::new(ClientConfig::new("my-api-key")?)?;
//!
//! let auction = Auction::Listings(ListingsAuction::new(2).with_category("shoes"));
//! let result = client.create_auction(&auction).await?;
//! println!("{}", result);
//! # Ok(())
//! # }
//! ```

/// Topsort API client.
///
/// The facade, typed request models, payload builder, transport,
/// response normalizer and error types.
pub mod api;

/// Opaque user identifiers.
///
/// The provider capability the client uses to fill `opaqueUserId` on
/// events, and cookie-like stores that persist the identifier.
pub mod identity;

/// Configuration.
///
/// [`ClientConfig`] for the library and the CLI's TOML file.
pub mod config;

/// Command-line interface definitions.
pub mod cli;

pub use api::{TopsortClient, TopsortError};
pub use config::ClientConfig;

/// Application name, used for the binary and configuration paths.
pub const APP_NAME: &str = "topsort";

/// SDK version, derived from Cargo.toml at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// The `User-Agent` sent with every request.
///
/// ```rust
/// assert!(topsort::user_agent().starts_with("Topsort/Rust-SDK "));
/// ```
pub fn user_agent() -> String {
    format!("Topsort/Rust-SDK {}", VERSION)
}

/// Exit codes for the CLI.
pub mod exit_codes {
    /// Successful execution.
    pub const SUCCESS: i32 = 0;

    /// Any failure.
    pub const ERROR: i32 = 1;
}
