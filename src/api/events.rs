//
//  topsort-sdk
//  api/events.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/19.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Event types for the v2 events API.
//!
//! Events are feedback signals used by Topsort for billing and ranking:
//!
//! | Kind | Wire Key | Payload |
//! |------|----------|---------|
//! | Impression | `impressions` | [`InteractionEvent`] |
//! | Click | `clicks` | [`InteractionEvent`] |
//! | Purchase | `purchases` | [`PurchaseEvent`] |
//!
//! Every event needs an `id`, an `ocurredAt` timestamp and an
//! `opaqueUserId`. Leave them as `None` and the client fills them in.
//!
//! # Example
//!
//! ```rust
//! use topsort::api::events::{Entity, InteractionEvent};
//!
//! let click = InteractionEvent {
//!     entity: Some(Entity::product("p-1")),
//!     resolved_bid_id: Some("bid-123".to_string()),
//!     ..Default::default()
//! };
//! ```

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::error::TopsortError;

/// The kind of an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// An ad or listing was shown
    Impression,
    /// An ad or listing was clicked
    Click,
    /// Products were bought
    Purchase,
}

impl EventKind {
    /// Key under which events of this kind are batched on the wire.
    pub fn plural(&self) -> &'static str {
        match self {
            Self::Impression => "impressions",
            Self::Click => "clicks",
            Self::Purchase => "purchases",
        }
    }

    /// Name used by the legacy v1 `eventType` field.
    pub fn legacy_name(&self) -> &'static str {
        match self {
            Self::Impression => "Impression",
            Self::Click => "Click",
            Self::Purchase => "Purchase",
        }
    }
}

impl FromStr for EventKind {
    type Err = TopsortError;

    /// Parses `impression`, `click` or `purchase`, ignoring case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "impression" => Ok(Self::Impression),
            "click" => Ok(Self::Click),
            "purchase" => Ok(Self::Purchase),
            _ => Err(TopsortError::invalid_event_type(s)),
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Impression => write!(f, "impression"),
            Self::Click => write!(f, "click"),
            Self::Purchase => write!(f, "purchase"),
        }
    }
}

/// The advertised object an interaction refers to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    /// Entity type, e.g. `product` or `vendor`.
    #[serde(rename = "type")]
    pub entity_type: String,
    /// Entity id.
    pub id: String,

    /// Unmodelled fields, e.g. `vendorId`, passed through unchanged.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Entity {
    /// A product entity.
    pub fn product(id: impl Into<String>) -> Self {
        Self {
            entity_type: "product".to_string(),
            id: id.into(),
            extra: Map::new(),
        }
    }
}

/// Where on the site an interaction happened.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Placement {
    /// Path of the page, e.g. `/category/shoes`.
    pub path: String,

    /// 1-based position within the list.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_ids: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search_query: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// An impression or click.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InteractionEvent {
    /// Marketplace-supplied unique id; generated when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// When the interaction happened; now when absent.
    #[serde(default, rename = "ocurredAt", skip_serializing_if = "Option::is_none")]
    pub ocurred_at: Option<DateTime<Utc>>,

    /// Visitor id; taken from the identifier provider when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opaque_user_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placement: Option<Placement>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity: Option<Entity>,

    /// Bid id from the auction response, for promoted items.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolved_bid_id: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One line of a purchase.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseItem {
    pub product_id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<u32>,

    /// Price of one unit, in the marketplace currency.
    pub unit_price: f64,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A purchase.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseEvent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(default, rename = "ocurredAt", skip_serializing_if = "Option::is_none")]
    pub ocurred_at: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opaque_user_id: Option<String>,

    pub items: Vec<PurchaseItem>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// An event of any kind.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Impression(InteractionEvent),
    Click(InteractionEvent),
    Purchase(PurchaseEvent),
}

impl Event {
    /// The kind of this event.
    pub fn kind(&self) -> EventKind {
        match self {
            Self::Impression(_) => EventKind::Impression,
            Self::Click(_) => EventKind::Click,
            Self::Purchase(_) => EventKind::Purchase,
        }
    }

    /// Serializes the event payload, without the kind wrapper.
    pub fn to_value(&self) -> serde_json::Result<Value> {
        match self {
            Self::Impression(e) | Self::Click(e) => serde_json::to_value(e),
            Self::Purchase(e) => serde_json::to_value(e),
        }
    }
}
