//
//  topsort-sdk
//  api/auction.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/19.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Auction request types for the v2 API.
//!
//! An auction asks Topsort to rank candidate products or banners for a
//! fixed number of promotional slots. Two variants exist, tagged by `type`
//! on the wire:
//!
//! - `listings`: promote products within a results list
//! - `banners`: fill a display/banner placement
//!
//! # Listings Targeting
//!
//! A listings auction is scoped by exactly one of `products`, `category` or
//! `searchQuery`. Callers may set several; the request carries only the
//! first non-empty one in that order (see [`ListingsAuction::target`]).
//!
//! # Example
//!
//! ```rust
//! use topsort::api::auction::{Auction, ListingsAuction};
//!
//! let auction = Auction::Listings(
//!     ListingsAuction::new(2).with_products(vec!["p-1".into(), "p-2".into()]),
//! );
//! ```
//!
//! # Notes
//!
//! - Fields this SDK does not model are kept in `extra` and sent verbatim
//! - The auction result is returned as raw JSON and not validated

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A single auction in a v2 auction request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Auction {
    /// Sponsored listings auction
    Listings(ListingsAuction),
    /// Banner auction
    Banners(BannerAuction),
}

/// Products competing in a listings auction.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Products {
    /// Candidate product ids.
    pub ids: Vec<String>,

    /// Optional quality scores, index-aligned with `ids`.
    ///
    /// Lengths are not checked against `ids`; the server decides.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quality_scores: Option<Vec<f64>>,

    /// Unmodelled fields, e.g. `vendorIds`, passed through unchanged.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A category scope.
///
/// Usually a single `id`, but other shapes such as `{"ids": [...]}` or
/// `{"disjunctions": [...]}` are kept in `extra` and sent as given.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Category {
    /// Category id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Category {
    /// Creates a category scope from an id.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            extra: Map::new(),
        }
    }

    /// Returns `true` if the category carries no id and no other field.
    pub fn is_empty(&self) -> bool {
        self.id.as_deref().map_or(true, str::is_empty) && self.extra.is_empty()
    }
}

/// A sponsored listings auction.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingsAuction {
    /// Number of promotional slots to fill.
    pub slots: u32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub products: Option<Products>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search_query: Option<String>,

    /// Unmodelled fields, passed through unchanged.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// The one scope a listings auction is sent with.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ListingsTarget<'a> {
    /// Compete the given products
    Products(&'a Products),
    /// Compete products of a category
    Category(&'a Category),
    /// Compete products matching a search
    SearchQuery(&'a str),
}

impl ListingsAuction {
    /// Creates an auction for `slots` slots with no scope set.
    pub fn new(slots: u32) -> Self {
        Self {
            slots,
            ..Default::default()
        }
    }

    /// Scopes the auction to a list of product ids.
    pub fn with_products(mut self, ids: Vec<String>) -> Self {
        self.products = Some(Products {
            ids,
            ..Default::default()
        });
        self
    }

    /// Scopes the auction to products with quality scores.
    pub fn with_scored_products(mut self, ids: Vec<String>, quality_scores: Vec<f64>) -> Self {
        self.products = Some(Products {
            ids,
            quality_scores: Some(quality_scores),
            ..Default::default()
        });
        self
    }

    /// Scopes the auction to a category.
    pub fn with_category(mut self, id: impl Into<String>) -> Self {
        self.category = Some(Category::new(id));
        self
    }

    /// Scopes the auction to a search query.
    pub fn with_search_query(mut self, query: impl Into<String>) -> Self {
        self.search_query = Some(query.into());
        self
    }

    /// Resolves the scope this auction is sent with.
    ///
    /// Priority is products (when `ids` is non-empty), then category, then
    /// a non-empty search query. Returns `None` if nothing is set.
    pub fn target(&self) -> Option<ListingsTarget<'_>> {
        if let Some(products) = self.products.as_ref().filter(|p| !p.ids.is_empty()) {
            return Some(ListingsTarget::Products(products));
        }
        if let Some(category) = self.category.as_ref().filter(|c| !c.is_empty()) {
            return Some(ListingsTarget::Category(category));
        }
        self.search_query
            .as_deref()
            .filter(|q| !q.is_empty())
            .map(ListingsTarget::SearchQuery)
    }
}

/// A banner auction.
///
/// Sent as `{"type": "banners", ...}` with every field verbatim.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BannerAuction {
    /// Number of banners to return.
    pub slots: u32,

    /// Id of the banner slot being filled.
    pub slot_id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search_query: Option<String>,

    /// Device class, e.g. `desktop` or `mobile`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl BannerAuction {
    /// Creates a banner auction for a slot.
    pub fn new(slots: u32, slot_id: impl Into<String>) -> Self {
        Self {
            slots,
            slot_id: slot_id.into(),
            ..Default::default()
        }
    }
}
