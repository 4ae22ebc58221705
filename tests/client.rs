//
//  topsort-sdk
//  tests/client.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/19.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

use chrono::{DateTime, Utc};
use mockito::{Matcher, Server};
use serde_json::json;

use topsort::api::auction::{Auction, BannerAuction, ListingsAuction};
use topsort::api::events::{Entity, InteractionEvent, Placement, PurchaseEvent, PurchaseItem};
use topsort::api::legacy::{Product, Session, Slots};
use topsort::api::ErrorCause;
use topsort::identity::FixedIdentifier;
use topsort::{ClientConfig, TopsortClient};

fn client_for(url: &str) -> TopsortClient {
    let config = ClientConfig::new("test-key")
        .unwrap()
        .with_base_url(url)
        .unwrap();
    TopsortClient::new(config)
        .unwrap()
        .with_identifier_provider(FixedIdentifier::new("visitor-1"))
}

fn at(s: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc)
}

#[tokio::test]
async fn test_create_auction_sends_wrapped_listings_body() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/v2/auctions")
        .match_header("authorization", "Bearer test-key")
        .match_header("user-agent", Matcher::Regex("^Topsort/Rust-SDK ".to_string()))
        .match_body(Matcher::Json(json!({
            "auctions": [{"type": "listings", "slots": 2, "products": {"ids": ["a", "b"]}}]
        })))
        .with_status(201)
        .with_header("content-type", "application/json")
        .with_body(r#"{"results": [{"resultType": "listings", "winners": [], "error": false}]}"#)
        .create_async()
        .await;

    let client = client_for(&server.url());
    let auction = Auction::Listings(ListingsAuction::new(2).with_products(vec!["a".into(), "b".into()]));
    let result = client.create_auction(&auction).await.unwrap();

    assert_eq!(result["results"][0]["resultType"], "listings");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_auction_result_is_returned_unchanged() {
    let payload = json!({
        "results": [{
            "resultType": "listings",
            "winners": [
                {"rank": 1, "type": "product", "id": "p1", "resolvedBidId": "b1", "campaignId": "c1"},
                {"rank": 2, "type": "product", "id": "p2", "resolvedBidId": "b2"}
            ],
            "error": false
        }]
    });

    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", "/v2/auctions")
        .with_status(200)
        .with_body(payload.to_string())
        .create_async()
        .await;

    let client = client_for(&server.url());
    let auction = Auction::Listings(ListingsAuction::new(2).with_category("c-1"));
    assert_eq!(client.create_auction(&auction).await.unwrap(), payload);
}

#[tokio::test]
async fn test_create_banner_auction() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/v2/auctions")
        .match_body(Matcher::Json(json!({
            "auctions": [{"type": "banners", "slots": 1, "slotId": "home-top", "device": "mobile"}]
        })))
        .with_status(200)
        .with_body(r#"{"results": []}"#)
        .create_async()
        .await;

    let mut banner = BannerAuction::new(1, "home-top");
    banner.device = Some("mobile".to_string());

    let client = client_for(&server.url());
    client.create_banner_auction(&banner).await.unwrap();
    mock.assert_async().await;
}

#[tokio::test]
async fn test_server_error_carries_body_content() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", "/v2/auctions")
        .with_status(500)
        .with_body("invalid auction")
        .create_async()
        .await;

    let client = client_for(&server.url());
    let auction = Auction::Listings(ListingsAuction::new(1).with_search_query("shoes"));
    let err = client.create_auction(&auction).await.unwrap_err();

    assert!(err.message().ends_with("Content: invalid auction"));
    assert!(err.message().starts_with("Auction creation failed: "));
    assert_eq!(err.status().map(|s| s.as_u16()), Some(500));
}

#[tokio::test]
async fn test_server_error_without_body_uses_transport_message() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", "/v2/auctions")
        .with_status(503)
        .create_async()
        .await;

    let client = client_for(&server.url());
    let auction = Auction::Listings(ListingsAuction::new(1).with_search_query("shoes"));
    let err = client.create_auction(&auction).await.unwrap_err();

    assert!(err.message().starts_with("Auction creation failed: Message: "));
    assert!(err.message().contains("503"));
}

#[tokio::test]
async fn test_connection_refused() {
    let client = client_for("http://127.0.0.1:1");
    let auction = Auction::Listings(ListingsAuction::new(1).with_search_query("shoes"));
    let err = client.create_auction(&auction).await.unwrap_err();

    assert!(err.is_connect());
    assert!(err.message().contains("Could not connect to"));
    assert!(err.message().contains("http://127.0.0.1:1/v2/auctions"));
}

#[tokio::test]
async fn test_invalid_json_response_is_wrapped() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", "/v2/auctions")
        .with_status(200)
        .with_body("<html>ok</html>")
        .create_async()
        .await;

    let client = client_for(&server.url());
    let auction = Auction::Listings(ListingsAuction::new(1).with_search_query("shoes"));
    let err = client.create_auction(&auction).await.unwrap_err();

    assert!(err.message().starts_with("Auction creation failed: Could not decode response"));
    assert!(matches!(err.cause(), Some(ErrorCause::Decode(_))));
}

#[tokio::test]
async fn test_report_click_fills_defaults() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/v2/events")
        .match_header("authorization", "Bearer test-key")
        .match_body(Matcher::AllOf(vec![
            Matcher::Regex(r#"^\{"clicks":\[\{"#.to_string()),
            Matcher::Regex(r#""type":"product""#.to_string()),
            Matcher::Regex(r#""id":"p1""#.to_string()),
            Matcher::Regex(r#""opaqueUserId":"visitor-1""#.to_string()),
            Matcher::Regex(r#""ocurredAt":"\d{4}-\d{2}-\d{2}T"#.to_string()),
        ]))
        .with_status(204)
        .create_async()
        .await;

    let client = client_for(&server.url());
    client
        .report_click(InteractionEvent {
            entity: Some(Entity::product("p1")),
            ..Default::default()
        })
        .await
        .unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn test_report_click_with_supplied_fields() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/v2/events")
        .match_body(Matcher::Json(json!({
            "clicks": [{
                "id": "click-1",
                "ocurredAt": "2026-10-19T12:00:00Z",
                "opaqueUserId": "visitor-1",
                "placement": {"path": "/search/shoes", "position": 3},
                "entity": {"type": "product", "id": "p1"},
                "resolvedBidId": "bid-1"
            }]
        })))
        .with_status(200)
        .with_body("{}")
        .create_async()
        .await;

    let client = client_for(&server.url());
    client
        .report_click(InteractionEvent {
            id: Some("click-1".to_string()),
            ocurred_at: Some(at("2026-10-19T12:00:00Z")),
            placement: Some(Placement {
                path: "/search/shoes".to_string(),
                position: Some(3),
                ..Default::default()
            }),
            entity: Some(Entity::product("p1")),
            resolved_bid_id: Some("bid-1".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn test_report_impressions_batches() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/v2/events")
        .match_body(Matcher::Regex(r#"^\{"impressions":\["#.to_string()))
        .with_status(200)
        .create_async()
        .await;

    let client = client_for(&server.url());
    client
        .report_impressions(vec![
            InteractionEvent {
                resolved_bid_id: Some("b1".to_string()),
                ..Default::default()
            },
            InteractionEvent {
                resolved_bid_id: Some("b2".to_string()),
                ..Default::default()
            },
        ])
        .await
        .unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn test_report_purchase() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/v2/events")
        .match_body(Matcher::Json(json!({
            "purchases": [{
                "id": "order-1",
                "ocurredAt": "2026-10-19T12:00:00Z",
                "opaqueUserId": "visitor-1",
                "items": [{"productId": "p1", "quantity": 2, "unitPrice": 10.5}]
            }]
        })))
        .with_status(200)
        .create_async()
        .await;

    let client = client_for(&server.url());
    client
        .report_purchase(PurchaseEvent {
            id: Some("order-1".to_string()),
            ocurred_at: Some(at("2026-10-19T12:00:00Z")),
            items: vec![PurchaseItem {
                product_id: "p1".to_string(),
                quantity: Some(2),
                unit_price: 10.5,
                ..Default::default()
            }],
            ..Default::default()
        })
        .await
        .unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn test_event_failure_message() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", "/v2/events")
        .with_status(400)
        .with_body(r#"{"message": "missing entity"}"#)
        .create_async()
        .await;

    let client = client_for(&server.url());
    let err = client.report_click(InteractionEvent::default()).await.unwrap_err();
    assert_eq!(
        err.message(),
        r#"Event creation failed: Content: {"message": "missing entity"}"#
    );
}

#[tokio::test]
async fn test_raw_event_kind_is_case_insensitive() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/v2/events")
        .match_body(Matcher::AllOf(vec![
            Matcher::Regex(r#"^\{"impressions":\[\{"#.to_string()),
            Matcher::Regex(r#""custom":"kept""#.to_string()),
        ]))
        .with_status(200)
        .create_async()
        .await;

    let client = client_for(&server.url());
    client
        .report_event("Impression", json!({"resolvedBidId": "b1", "custom": "kept"}))
        .await
        .unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn test_invalid_event_type_makes_no_request() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/v2/events")
        .expect(0)
        .create_async()
        .await;

    let client = client_for(&server.url());
    let err = client.report_event("signup", json!({})).await.unwrap_err();

    assert!(err.is_invalid_event_type());
    assert_eq!(err.message(), "Invalid event type: signup");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_concurrent_calls_are_independent() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/v2/auctions")
        .with_status(200)
        .with_body(r#"{"results": []}"#)
        .expect(2)
        .create_async()
        .await;

    let client = client_for(&server.url());
    let first = Auction::Listings(ListingsAuction::new(1).with_search_query("a"));
    let second = Auction::Listings(ListingsAuction::new(1).with_search_query("b"));

    let (a, b) = tokio::join!(client.create_auction(&first), client.create_auction(&second));
    assert!(a.is_ok());
    assert!(b.is_ok());
    mock.assert_async().await;
}

#[tokio::test]
async fn test_legacy_create_auction() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/v1/auctions")
        .match_body(Matcher::Json(json!({
            "slots": {"listings": 1},
            "products": [{"productId": "p1"}],
            "session": {"sessionId": "s1"}
        })))
        .with_status(200)
        .with_body(r#"{"slots": {"listings": {"winners": []}}}"#)
        .create_async()
        .await;

    let client = client_for(&server.url());
    let slots = Slots {
        listings: Some(1),
        ..Default::default()
    };
    client
        .legacy()
        .create_auction(&slots, &[Product::new("p1")], &Session::new("s1"))
        .await
        .unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn test_legacy_get_auction() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/v1/auctions/auction-42")
        .match_header("authorization", "Bearer test-key")
        .with_status(200)
        .with_body(r#"{"id": "auction-42"}"#)
        .create_async()
        .await;

    let client = client_for(&server.url());
    let result = client.legacy().get_auction("auction-42").await.unwrap();
    assert_eq!(result, json!({"id": "auction-42"}));
}

#[tokio::test]
async fn test_legacy_get_auction_failure_label() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/v1/auctions/missing")
        .with_status(404)
        .with_body("not found")
        .create_async()
        .await;

    let client = client_for(&server.url());
    let err = client.legacy().get_auction("missing").await.unwrap_err();
    assert_eq!(err.message(), "Failed to get auction: Content: not found");
}

#[tokio::test]
async fn test_legacy_ad_locations() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/api/v1/ad_configs")
        .with_status(200)
        .with_body(
            json!({
                "bannerAds": [
                    {"position": "category", "dimensions": [{"size": "300x250", "aspectRatio": "6:5"}]}
                ]
            })
            .to_string(),
        )
        .create_async()
        .await;

    let client = client_for(&server.url());
    let locations = client.legacy().ad_locations().await.unwrap();
    assert_eq!(
        serde_json::to_value(&locations).unwrap(),
        json!({"bannerAds": [{
            "dimensions": "300x250",
            "aspectRatio": "6:5",
            "placement": {"page": "Category"}
        }]})
    );
}

#[tokio::test]
async fn test_listings_without_scope_makes_no_request() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/v2/auctions")
        .expect(0)
        .create_async()
        .await;

    let client = client_for(&server.url());
    let err = client
        .create_auction(&Auction::Listings(ListingsAuction::new(2)))
        .await
        .unwrap_err();

    assert!(matches!(err.cause(), Some(ErrorCause::InvalidAuction(_))));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_nested_unknown_fields_reach_the_server() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/v2/auctions")
        .match_body(Matcher::Json(json!({
            "auctions": [{"type": "listings", "slots": 1, "products": {"ids": ["a"], "vendorIds": ["v1"]}}]
        })))
        .with_status(200)
        .with_body(r#"{"results": []}"#)
        .create_async()
        .await;

    let auction: Auction = serde_json::from_value(json!({
        "type": "listings",
        "slots": 1,
        "products": {"ids": ["a"], "vendorIds": ["v1"]}
    }))
    .unwrap();

    let client = client_for(&server.url());
    client.create_auction(&auction).await.unwrap();
    mock.assert_async().await;
}

#[tokio::test]
async fn test_legacy_get_auction_encodes_id() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/v1/auctions/a%2Fb%3Fc")
        .with_status(200)
        .with_body(r#"{"id": "a/b?c"}"#)
        .create_async()
        .await;

    let client = client_for(&server.url());
    let result = client.legacy().get_auction("a/b?c").await.unwrap();
    assert_eq!(result["id"], "a/b?c");
    mock.assert_async().await;
}
