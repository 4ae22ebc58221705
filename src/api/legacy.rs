//
//  topsort-sdk
//  api/legacy.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/19.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Legacy v1 API.
//!
//! The v1 API predates typed auctions and opaque user ids: auctions are
//! keyed by slot kind, and every call carries a [`Session`]. It is kept for
//! marketplaces that still integrate against it; new code should use the v2
//! methods on [`TopsortClient`].
//!
//! | Operation | Method | Path |
//! |-----------|--------|------|
//! | Create auction | POST | `/v1/auctions` |
//! | Get auction | GET | `/v1/auctions/<id>` |
//! | Report event | POST | `/v1/events` |
//! | Ad locations | GET | `/api/v1/ad_configs` |
//!
//! # Example
//!
//! ```rust,no_run
//! use topsort::api::legacy::{Product, Session, Slots};
//! # use topsort::api::TopsortClient;
//!
//! # async fn example(client: TopsortClient) -> topsort::api::Result<()> {
//! let slots = Slots { listings: Some(2), ..Default::default() };
//! let products = vec![Product::new("p-1"), Product::new("p-2")];
//! let session = Session::new("session-1");
//!
//! let result = client.legacy().create_auction(&slots, &products, &session).await?;
//! # Ok(())
//! # }
//! ```

use chrono::{DateTime, Utc};
use reqwest::Method;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{json, Map, Value};
use url::Url;

use super::client::{TopsortClient, AUCTION_FAILED, EVENT_FAILED};
use super::error::{ErrorCause, Result, TopsortError};
use super::events::EventKind;

/// Path for v1 auctions.
pub const LEGACY_AUCTIONS_PATH: &str = "/v1/auctions";

/// Path for v1 events.
pub const LEGACY_EVENTS_PATH: &str = "/v1/events";

/// Path for the ad location configuration.
pub const AD_CONFIGS_PATH: &str = "/api/v1/ad_configs";

const GET_AUCTION_FAILED: &str = "Failed to get auction";

/// Path of one v1 auction.
///
/// The id is percent-encoded as a single path segment, so `/`, `?` and `#`
/// cannot change the request target.
pub fn auction_path(auction_id: &str) -> Result<String> {
    let mut url = Url::parse(&format!("http://localhost{}", LEGACY_AUCTIONS_PATH))
        .map_err(|e| TopsortError::msg(format!("Could not build auction path: {}", e)))?;
    url.path_segments_mut()
        .map_err(|()| TopsortError::msg("Could not build auction path"))?
        .push(auction_id);
    Ok(url.path().to_string())
}
const AD_LOCATIONS_FAILED: &str = "Failed to get Ad Locations";

/// Slot counts per placement kind.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Slots {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub listings: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_ads: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub banner_ads: Option<u32>,
}

/// A candidate product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Marketplace product id.
    pub product_id: String,
    /// Optional quality score, sent as given.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quality: Option<String>,
}

impl Product {
    /// Creates a product with no quality score.
    ///
    /// # Example
    ///
    /// ```rust
    /// use topsort::api::legacy::Product;
    ///
    /// let product = Product::new("p-1");
    /// assert!(product.quality.is_none());
    /// ```
    pub fn new(product_id: impl Into<String>) -> Self {
        Self {
            product_id: product_id.into(),
            quality: None,
        }
    }
}

/// The shopper session a v1 call belongs to.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    /// Id of the shopper session.
    pub session_id: String,
    /// Logged-in consumer, if known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub consumer_id: Option<String>,
    /// Cart or checkout the session is working on.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_intent_id: Option<String>,
    /// Completed order, for purchase events.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_id: Option<String>,
}

impl Session {
    /// Creates a session with only its id set.
    pub fn new(session_id: impl Into<String>) -> Self {
        Self {
            session_id: session_id.into(),
            ..Default::default()
        }
    }
}

/// Page and location of a v1 placement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    /// Page name, e.g. `Search` or `Home-Page`.
    pub page: String,
    /// Location on the page, e.g. `top`.
    pub location: String,
}

/// A v1 click.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Click {
    pub session: Session,
    pub placement: Placement,
    /// The clicked product.
    pub product_id: String,
    /// Auction the product won, from the auction response.
    pub auction_id: String,
    /// Marketplace-supplied event id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

/// One impression inside a v1 impression report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Impression {
    pub placement: Placement,
    pub product_id: String,
    pub auction_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

/// A v1 impression report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Impressions {
    pub session: Session,
    pub impressions: Vec<Impression>,
}

/// One line of a v1 purchase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseItem {
    /// The purchased product.
    pub product_id: String,
    /// Auction the product won, for promoted purchases.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auction_id: Option<String>,
    /// Units bought; the server assumes 1 when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<u32>,
    /// Unit price in minor currency units.
    pub unit_price: i64,
}

fn rfc3339<S: Serializer>(at: &DateTime<Utc>, serializer: S) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_str(&at.to_rfc3339())
}

/// A v1 purchase.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Purchase {
    pub session: Session,
    /// Order id.
    pub id: String,
    /// When the order was placed; sent as RFC 3339.
    #[serde(serialize_with = "rfc3339")]
    pub purchased_at: DateTime<Utc>,
    pub items: Vec<PurchaseItem>,
}

/// A banner location as configured in the Topsort dashboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdLocation {
    /// Banner size, e.g. `"300x250"`, or `null` when not configured.
    pub dimensions: Value,
    /// Banner aspect ratio, or `null` when not configured.
    pub aspect_ratio: Value,
    pub placement: AdPlacement,
}

/// Page an ad location is shown on.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AdPlacement {
    pub page: String,
}

/// Ad locations grouped by kind.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdLocations {
    pub banner_ads: Vec<AdLocation>,
}

/// Maps a configured position to its page name.
pub fn placement_page(position: &str) -> &'static str {
    match position {
        "search" => "Search",
        "category" => "Category",
        _ => "Home-Page",
    }
}

/// Converts an `/api/v1/ad_configs` response into [`AdLocations`].
///
/// Each banner config contributes its first dimension's `size` and
/// `aspectRatio`; missing values become `null`.
pub fn ad_locations_from(config: &Value) -> AdLocations {
    let banner_ads = config
        .get("bannerAds")
        .and_then(Value::as_array)
        .map(|ads| {
            ads.iter()
                .map(|ad| {
                    let dimension = &ad["dimensions"][0];
                    AdLocation {
                        dimensions: dimension["size"].clone(),
                        aspect_ratio: dimension["aspectRatio"].clone(),
                        placement: AdPlacement {
                            page: placement_page(ad["position"].as_str().unwrap_or_default()).to_string(),
                        },
                    }
                })
                .collect()
        })
        .unwrap_or_default();

    AdLocations { banner_ads }
}

fn encode<T: Serialize>(value: &T) -> Result<Value> {
    serde_json::to_value(value)
        .map_err(|e| TopsortError::new(format!("Could not encode request: {}", e), ErrorCause::Encode(e)))
}

/// Builds a v1 auction body: `{"slots", "products", "session"}`.
pub fn build_auction_body(slots: &Slots, products: &[Product], session: &Session) -> Result<Value> {
    Ok(json!({
        "slots": encode(slots)?,
        "products": encode(&products)?,
        "session": encode(session)?,
    }))
}

/// Builds a v1 event body: `{"eventType": "<Kind>", ...data}`.
pub fn build_event_body<T: Serialize>(kind: EventKind, data: &T) -> Result<Value> {
    let mut body = Map::new();
    body.insert("eventType".to_string(), json!(kind.legacy_name()));
    match encode(data)? {
        Value::Object(fields) => body.extend(fields),
        other => {
            let cause = ErrorCause::InvalidEventData(format!("{} data must be a JSON object, got {}", kind, other));
            return Err(TopsortError::new(cause.to_string(), cause));
        }
    }
    Ok(Value::Object(body))
}

/// Handle on the v1 endpoints of a [`TopsortClient`].
#[derive(Debug, Clone, Copy)]
pub struct LegacyApi<'a> {
    client: &'a TopsortClient,
}

impl<'a> LegacyApi<'a> {
    pub(crate) fn new(client: &'a TopsortClient) -> Self {
        Self { client }
    }

    /// Runs a v1 auction between `products` for `slots`.
    pub async fn create_auction(&self, slots: &Slots, products: &[Product], session: &Session) -> Result<Value> {
        let body = build_auction_body(slots, products, session)?;
        self.client
            .request(Method::POST, LEGACY_AUCTIONS_PATH, Some(&body), AUCTION_FAILED)
            .await
    }

    /// Fetches an earlier auction result by id.
    pub async fn get_auction(&self, auction_id: &str) -> Result<Value> {
        let path = auction_path(auction_id)?;
        self.client
            .request(Method::GET, &path, None, GET_AUCTION_FAILED)
            .await
    }

    async fn create_event<T: Serialize>(&self, kind: EventKind, data: &T) -> Result<Value> {
        let body = build_event_body(kind, data)?;
        self.client
            .request(Method::POST, LEGACY_EVENTS_PATH, Some(&body), EVENT_FAILED)
            .await
    }

    pub async fn report_click(&self, click: &Click) -> Result<Value> {
        self.create_event(EventKind::Click, click).await
    }

    pub async fn report_impressions(&self, impressions: &Impressions) -> Result<Value> {
        self.create_event(EventKind::Impression, impressions).await
    }

    pub async fn report_purchase(&self, purchase: &Purchase) -> Result<Value> {
        self.create_event(EventKind::Purchase, purchase).await
    }

    /// Fetches the banner locations configured for the marketplace.
    pub async fn ad_locations(&self) -> Result<AdLocations> {
        let config = self
            .client
            .request(Method::GET, AD_CONFIGS_PATH, None, AD_LOCATIONS_FAILED)
            .await?;
        Ok(ad_locations_from(&config))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auction_body() {
        let slots = Slots {
            listings: Some(2),
            banner_ads: Some(1),
            ..Default::default()
        };
        let body = build_auction_body(&slots, &[Product::new("p1")], &Session::new("s1")).unwrap();
        assert_eq!(
            body,
            json!({
                "slots": {"listings": 2, "bannerAds": 1},
                "products": [{"productId": "p1"}],
                "session": {"sessionId": "s1"}
            })
        );
    }

    #[test]
    fn test_click_body_is_flat() {
        let click = Click {
            session: Session::new("s1"),
            placement: Placement {
                page: "Search".into(),
                location: "top".into(),
            },
            product_id: "p1".into(),
            auction_id: "a1".into(),
            id: None,
        };
        let body = build_event_body(EventKind::Click, &click).unwrap();
        assert_eq!(body["eventType"], json!("Click"));
        assert_eq!(body["productId"], json!("p1"));
        assert_eq!(body["session"], json!({"sessionId": "s1"}));
    }

    #[test]
    fn test_purchase_date_is_rfc3339() {
        let purchase = Purchase {
            session: Session::new("s1"),
            id: "o1".into(),
            purchased_at: DateTime::parse_from_rfc3339("2026-10-19T08:30:00Z")
                .unwrap()
                .with_timezone(&Utc),
            items: vec![PurchaseItem {
                product_id: "p1".into(),
                auction_id: None,
                quantity: Some(1),
                unit_price: 1299,
            }],
        };
        let body = build_event_body(EventKind::Purchase, &purchase).unwrap();
        assert_eq!(body["eventType"], json!("Purchase"));
        assert_eq!(body["purchasedAt"], json!("2026-10-19T08:30:00+00:00"));
    }

    #[test]
    fn test_auction_path_encodes_id() {
        assert_eq!(auction_path("auction-42").unwrap(), "/v1/auctions/auction-42");
        assert_eq!(auction_path("a/b?c#d").unwrap(), "/v1/auctions/a%2Fb%3Fc%23d");
    }

    #[test]
    fn test_placement_page() {
        assert_eq!(placement_page("search"), "Search");
        assert_eq!(placement_page("category"), "Category");
        assert_eq!(placement_page("home"), "Home-Page");
        assert_eq!(placement_page("checkout"), "Home-Page");
    }

    #[test]
    fn test_ad_locations_from_config() {
        let config = json!({
            "bannerAds": [
                {"position": "search", "dimensions": [{"size": "728x90", "aspectRatio": "8:1"}]},
                {"position": "pdp", "dimensions": []}
            ]
        });
        let locations = ad_locations_from(&config);
        assert_eq!(locations.banner_ads.len(), 2);
        assert_eq!(locations.banner_ads[0].dimensions, json!("728x90"));
        assert_eq!(locations.banner_ads[0].placement.page, "Search");
        assert_eq!(locations.banner_ads[1].aspect_ratio, Value::Null);
        assert_eq!(locations.banner_ads[1].placement.page, "Home-Page");

        assert!(ad_locations_from(&json!({})).banner_ads.is_empty());
    }
}
