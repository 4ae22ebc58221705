//
//  topsort-sdk
//  api/client.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/19.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Topsort API Client
//!
//! [`TopsortClient`] is the public entry point of the SDK. It composes the
//! payload builder, the HTTP transport and the response normalizer:
//!
//! ```text
//! caller -> TopsortClient -> payload (+ opaque user id) -> HttpTransport -> normalize -> caller
//! ```
//!
//! ## Features
//!
//! - Listings and banner auctions (`POST /v2/auctions`)
//! - Impression, click and purchase events (`POST /v2/events`)
//! - Legacy v1 endpoints through [`TopsortClient::legacy`]
//! - A single error type, [`TopsortError`], for every failure
//!
//! The client holds only immutable configuration. It is cheap to clone and
//! can be shared between tasks; concurrent calls are independent.

use std::sync::Arc;

use reqwest::Method;
use serde_json::Value;

use super::auction::{Auction, BannerAuction};
use super::error::Result;
use super::events::{Event, InteractionEvent, PurchaseEvent};
use super::legacy::LegacyApi;
use super::payload;
use super::response::normalize;
use super::transport::HttpTransport;
use crate::config::ClientConfig;
use crate::identity::{MemoryStore, OpaqueUserIdProvider, StoredIdentifierProvider};

/// Path for auction requests.
pub const AUCTIONS_PATH: &str = "/v2/auctions";

/// Path for event reports.
pub const EVENTS_PATH: &str = "/v2/events";

pub(crate) const AUCTION_FAILED: &str = "Auction creation failed";
pub(crate) const EVENT_FAILED: &str = "Event creation failed";

/// Client for the Topsort auctions and events API.
///
/// # Creating a Client
///
/// ```rust,no_run
/// use topsort::api::TopsortClient;
/// use topsort::config::ClientConfig;
///
/// let client = TopsortClient::new(ClientConfig::new("my-api-key")?)?;
/// # Ok::<(), topsort::api::TopsortError>(())
/// ```
///
/// # Running an Auction
///
/// ```rust,no_run
/// use topsort::api::auction::{Auction, ListingsAuction};
/// # use topsort::api::TopsortClient;
///
/// # async fn example(client: TopsortClient) -> topsort::api::Result<()> {
/// let auction = Auction::Listings(
///     ListingsAuction::new(2).with_products(vec!["p-1".into(), "p-2".into()]),
/// );
/// let result = client.create_auction(&auction).await?;
/// println!("{}", result["results"][0]["winners"]);
/// # Ok(())
/// # }
/// ```
///
/// # Opaque User Ids
///
/// Events without an `opaqueUserId` get one from the client's
/// [`OpaqueUserIdProvider`]. By default this is an in-memory store, so the
/// id lives as long as the client; inject another provider with
/// [`TopsortClient::with_identifier_provider`].
#[derive(Clone)]
pub struct TopsortClient {
    config: ClientConfig,
    transport: HttpTransport,
    identity: Arc<dyn OpaqueUserIdProvider>,
}

impl TopsortClient {
    /// Creates a client from a configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let transport = HttpTransport::new(&config)?;
        Ok(Self {
            config,
            transport,
            identity: Arc::new(StoredIdentifierProvider::new(MemoryStore::new())),
        })
    }

    /// Replaces the opaque user id provider.
    pub fn with_identifier_provider(mut self, provider: impl OpaqueUserIdProvider + 'static) -> Self {
        self.identity = Arc::new(provider);
        self
    }

    /// The configuration this client was built with.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Access to the legacy v1 endpoints.
    pub fn legacy(&self) -> LegacyApi<'_> {
        LegacyApi::new(self)
    }

    pub(crate) fn identity(&self) -> &dyn OpaqueUserIdProvider {
        self.identity.as_ref()
    }

    /// Sends one request and normalizes the outcome under `operation`.
    pub(crate) async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
        operation: &str,
    ) -> Result<Value> {
        let url = self.transport.url(path);
        let outcome = self.transport.send(method, path, body).await;
        normalize(operation, &url, outcome).await
    }

    /// Runs an auction and returns the server's result unchanged.
    ///
    /// Sends `{"auctions": [auction]}` to `POST /v2/auctions`.
    ///
    /// # Errors
    ///
    /// Fails with "Auction creation failed: ..." on any transport or HTTP
    /// failure.
    pub async fn create_auction(&self, auction: &Auction) -> Result<Value> {
        let body = payload::build_auction_body(auction)?;
        self.request(Method::POST, AUCTIONS_PATH, Some(&body), AUCTION_FAILED)
            .await
    }

    /// Runs several auctions in one request.
    ///
    /// The result lists one entry per auction, in request order.
    pub async fn create_auctions(&self, auctions: &[Auction]) -> Result<Value> {
        let body = payload::build_auctions_body(auctions)?;
        self.request(Method::POST, AUCTIONS_PATH, Some(&body), AUCTION_FAILED)
            .await
    }

    /// Runs a banner auction.
    ///
    /// Sends `{"auctions": [{"type": "banners", ...options}]}`.
    pub async fn create_banner_auction(&self, options: &BannerAuction) -> Result<Value> {
        self.create_auction(&Auction::Banners(options.clone())).await
    }

    async fn report(&self, events: &[Event]) -> Result<()> {
        let (kind, body) = payload::build_event_body(events, self.identity())?;
        tracing::debug!("Reporting {} {} event(s)", events.len(), kind);
        self.request(Method::POST, EVENTS_PATH, Some(&body), EVENT_FAILED)
            .await?;
        Ok(())
    }

    /// Reports a click.
    pub async fn report_click(&self, click: InteractionEvent) -> Result<()> {
        self.report(&[Event::Click(click)]).await
    }

    /// Reports one or more impressions in a single request.
    pub async fn report_impressions(&self, impressions: Vec<InteractionEvent>) -> Result<()> {
        let events: Vec<Event> = impressions.into_iter().map(Event::Impression).collect();
        self.report(&events).await
    }

    /// Reports a purchase.
    pub async fn report_purchase(&self, purchase: PurchaseEvent) -> Result<()> {
        self.report(&[Event::Purchase(purchase)]).await
    }

    /// Reports an event given by kind name and raw JSON data.
    ///
    /// `kind` is one of `impression`, `click` or `purchase`, in any case.
    /// Unknown fields in `data` are sent unchanged.
    ///
    /// # Errors
    ///
    /// Fails with an invalid event type error, before any request is made,
    /// if `kind` is not recognized.
    pub async fn report_event(&self, kind: &str, data: Value) -> Result<()> {
        let body = payload::build_raw_event_body(kind, data, self.identity())?;
        self.request(Method::POST, EVENTS_PATH, Some(&body), EVENT_FAILED)
            .await?;
        Ok(())
    }
}

impl std::fmt::Debug for TopsortClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TopsortClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
