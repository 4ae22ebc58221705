//
//  topsort-sdk
//  api/payload.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/19.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Request body construction for the v2 API.
//!
//! Turns typed auctions and events into the JSON bodies the server expects:
//!
//! ```text
//! POST /v2/auctions  {"auctions": [{"type": "listings", "slots": 2, "products": {...}}]}
//! POST /v2/events    {"clicks": [{"id": "...", "ocurredAt": "...", "opaqueUserId": "...", ...}]}
//! ```
//!
//! Event defaults are applied here, so every event leaving this module has a
//! non-empty `id`, `ocurredAt` and `opaqueUserId`.

use chrono::{SecondsFormat, Utc};
use serde_json::{json, Map, Value};

use super::auction::{Auction, ListingsAuction, ListingsTarget};
use super::error::{ErrorCause, Result, TopsortError};
use super::events::{Event, EventKind};
use crate::identity::{new_identifier, OpaqueUserIdProvider};

fn encode<T: serde::Serialize>(value: &T) -> Result<Value> {
    serde_json::to_value(value)
        .map_err(|e| TopsortError::new(format!("Could not encode request: {}", e), ErrorCause::Encode(e)))
}

/// Keys that scope a listings auction; only one may be sent.
const LISTINGS_SCOPE_KEYS: [&str; 3] = ["products", "category", "searchQuery"];

fn listings_value(auction: &ListingsAuction) -> Result<Value> {
    let mut body = Map::new();
    body.insert("type".to_string(), json!("listings"));
    body.insert("slots".to_string(), json!(auction.slots));

    match auction.target() {
        Some(ListingsTarget::Products(products)) => {
            body.insert("products".to_string(), encode(products)?);
        }
        Some(ListingsTarget::Category(category)) => {
            body.insert("category".to_string(), encode(category)?);
        }
        Some(ListingsTarget::SearchQuery(query)) => {
            body.insert("searchQuery".to_string(), json!(query));
        }
        None => {
            let cause = ErrorCause::InvalidAuction(
                "listings auction needs products, a category or a search query".to_string(),
            );
            return Err(TopsortError::new(cause.to_string(), cause));
        }
    }

    for (key, value) in &auction.extra {
        if LISTINGS_SCOPE_KEYS.contains(&key.as_str()) {
            continue;
        }
        body.entry(key.clone()).or_insert_with(|| value.clone());
    }

    Ok(Value::Object(body))
}

/// Encodes one auction in its wire form.
///
/// Listings auctions carry only the scope picked by
/// [`ListingsAuction::target`]; banner auctions are encoded verbatim.
///
/// # Errors
///
/// Fails with [`ErrorCause::InvalidAuction`] for a listings auction with no
/// scope.
pub fn auction_value(auction: &Auction) -> Result<Value> {
    match auction {
        Auction::Listings(listings) => listings_value(listings),
        Auction::Banners(_) => encode(auction),
    }
}

/// Builds the body for a single auction: `{"auctions": [auction]}`.
pub fn build_auction_body(auction: &Auction) -> Result<Value> {
    build_auctions_body(std::slice::from_ref(auction))
}

/// Builds the body for several auctions run in one request.
pub fn build_auctions_body(auctions: &[Auction]) -> Result<Value> {
    let auctions = auctions
        .iter()
        .map(auction_value)
        .collect::<Result<Vec<_>>>()?;
    Ok(json!({ "auctions": auctions }))
}

fn is_blank(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.is_empty(),
        Some(_) => false,
    }
}

/// Fills `id`, `ocurredAt` and `opaqueUserId` when missing, null or empty.
///
/// Present values are left untouched. `ocurredAt` defaults to the current
/// time in RFC 3339 UTC.
pub fn apply_event_defaults(data: &mut Map<String, Value>, provider: &dyn OpaqueUserIdProvider) {
    if is_blank(data.get("id")) {
        data.insert("id".to_string(), json!(new_identifier()));
    }
    if is_blank(data.get("ocurredAt")) {
        let now = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
        data.insert("ocurredAt".to_string(), json!(now));
    }
    if is_blank(data.get("opaqueUserId")) {
        data.insert("opaqueUserId".to_string(), json!(provider.opaque_user_id()));
    }
}

fn wrap_events(kind: EventKind, events: Vec<Value>) -> Value {
    let mut body = Map::new();
    body.insert(kind.plural().to_string(), Value::Array(events));
    Value::Object(body)
}

fn event_object(kind: EventKind, data: Value, provider: &dyn OpaqueUserIdProvider) -> Result<Value> {
    match data {
        Value::Object(mut map) => {
            apply_event_defaults(&mut map, provider);
            Ok(Value::Object(map))
        }
        other => {
            let cause = ErrorCause::InvalidEventData(format!(
                "{} data must be a JSON object, got {}",
                kind, other
            ));
            Err(TopsortError::new(cause.to_string(), cause))
        }
    }
}

/// Builds the body for a batch of events of one kind.
///
/// Returns the batch kind alongside the body.
///
/// # Errors
///
/// Fails if `events` is empty or mixes kinds.
pub fn build_event_body(
    events: &[Event],
    provider: &dyn OpaqueUserIdProvider,
) -> Result<(EventKind, Value)> {
    let kind = events
        .first()
        .map(Event::kind)
        .ok_or_else(|| TopsortError::msg("No events to report"))?;

    let mut values = Vec::with_capacity(events.len());
    for event in events {
        if event.kind() != kind {
            return Err(TopsortError::msg(format!(
                "Cannot report {} and {} events in one request",
                kind,
                event.kind()
            )));
        }
        let value = event
            .to_value()
            .map_err(|e| TopsortError::new(format!("Could not encode request: {}", e), ErrorCause::Encode(e)))?;
        values.push(event_object(kind, value, provider)?);
    }

    Ok((kind, wrap_events(kind, values)))
}

/// Builds an event body from a kind name and raw JSON data.
///
/// `kind` is matched case-insensitively against `impression`, `click` and
/// `purchase`; the result is `{"<kind>s": [data]}` with defaults applied.
///
/// # Errors
///
/// - `InvalidEventType` for any other kind
/// - `InvalidEventData` if `data` is not a JSON object
pub fn build_raw_event_body(
    kind: &str,
    data: Value,
    provider: &dyn OpaqueUserIdProvider,
) -> Result<Value> {
    let kind: EventKind = kind.parse()?;
    let event = event_object(kind, data, provider)?;
    Ok(wrap_events(kind, vec![event]))
}
