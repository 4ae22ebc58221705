//
//  topsort-sdk
//  cli/auction.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/19.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Auction commands
//!
//! ## Examples
//!
//! ```bash
//! # Listings auction between two products
//! topsort auction create --slots 2 --product-id p-1 --product-id p-2
//!
//! # Auction described in a file (any v2 auction, tagged by "type")
//! topsort auction create --file auction.json
//!
//! # Banner auction
//! topsort auction banner --slots 1 --slot-id home-top --device mobile
//!
//! # Earlier auction result (v1 API)
//! topsort auction get 7b8f0c4e
//! ```

use anyhow::{bail, Result};
use clap::{Args, Subcommand};

use crate::api::auction::{Auction, BannerAuction, Category, ListingsAuction};

use super::{print_json, read_json, GlobalOptions};

/// Run auctions
#[derive(Args, Debug)]
pub struct AuctionCommand {
    #[command(subcommand)]
    pub command: AuctionSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum AuctionSubcommand {
    /// Run a listings auction, or any auction given as JSON
    Create(CreateArgs),

    /// Run a banner auction
    Banner(BannerArgs),

    /// Get an earlier auction result (v1 API)
    Get(GetArgs),
}

#[derive(Args, Debug)]
pub struct CreateArgs {
    /// Read the auction from a JSON file (- for stdin)
    #[arg(long, short = 'f', conflicts_with = "json")]
    pub file: Option<String>,

    /// Auction as an inline JSON string
    #[arg(long)]
    pub json: Option<String>,

    /// Number of slots to fill
    #[arg(long, short = 's')]
    pub slots: Option<u32>,

    /// Candidate product id (can be specified multiple times)
    #[arg(long = "product-id", action = clap::ArgAction::Append)]
    pub product_ids: Vec<String>,

    /// Quality score per product id, in the same order
    #[arg(long = "quality-score", action = clap::ArgAction::Append)]
    pub quality_scores: Vec<f64>,

    /// Category id
    #[arg(long)]
    pub category: Option<String>,

    /// Search query
    #[arg(long)]
    pub search_query: Option<String>,
}

#[derive(Args, Debug)]
pub struct BannerArgs {
    /// Number of banners to return
    #[arg(long, short = 's', default_value = "1")]
    pub slots: u32,

    /// Banner slot id
    #[arg(long)]
    pub slot_id: String,

    /// Category id
    #[arg(long)]
    pub category: Option<String>,

    /// Search query
    #[arg(long)]
    pub search_query: Option<String>,

    /// Device class (desktop, mobile)
    #[arg(long)]
    pub device: Option<String>,
}

#[derive(Args, Debug)]
pub struct GetArgs {
    /// Auction id
    pub id: String,
}

impl CreateArgs {
    /// Builds the auction from a JSON document or from flags.
    fn auction(&self) -> Result<Auction> {
        if let Some(value) = read_json(self.file.as_deref(), self.json.as_deref())? {
            return Ok(serde_json::from_value(value)?);
        }

        let Some(slots) = self.slots else {
            bail!("Provide --slots, or the auction with --file or --json");
        };

        let mut auction = ListingsAuction::new(slots);
        if !self.product_ids.is_empty() {
            auction = if self.quality_scores.is_empty() {
                auction.with_products(self.product_ids.clone())
            } else {
                auction.with_scored_products(self.product_ids.clone(), self.quality_scores.clone())
            };
        }
        if let Some(category) = &self.category {
            auction = auction.with_category(category);
        }
        if let Some(query) = &self.search_query {
            auction = auction.with_search_query(query);
        }
        Ok(Auction::Listings(auction))
    }
}

impl BannerArgs {
    fn auction(&self) -> BannerAuction {
        let mut banner = BannerAuction::new(self.slots, &self.slot_id);
        banner.category = self.category.as_deref().map(Category::new);
        banner.search_query = self.search_query.clone();
        banner.device = self.device.clone();
        banner
    }
}

impl AuctionCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        match &self.command {
            AuctionSubcommand::Create(args) => {
                let auction = args.auction()?;
                let result = global.client()?.create_auction(&auction).await?;
                print_json(&result)
            }
            AuctionSubcommand::Banner(args) => {
                let result = global.client()?.create_banner_auction(&args.auction()).await?;
                print_json(&result)
            }
            AuctionSubcommand::Get(args) => {
                let client = global.client()?;
                let result = client.legacy().get_auction(&args.id).await?;
                print_json(&result)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_args() -> CreateArgs {
        CreateArgs {
            file: None,
            json: None,
            slots: None,
            product_ids: vec![],
            quality_scores: vec![],
            category: None,
            search_query: None,
        }
    }

    #[test]
    fn test_auction_from_flags() {
        let args = CreateArgs {
            slots: Some(2),
            product_ids: vec!["a".into(), "b".into()],
            ..create_args()
        };
        match args.auction().unwrap() {
            Auction::Listings(listings) => {
                assert_eq!(listings.slots, 2);
                assert_eq!(listings.products.unwrap().ids, vec!["a", "b"]);
            }
            other => panic!("unexpected auction: {:?}", other),
        }
    }

    #[test]
    fn test_auction_from_json() {
        let args = CreateArgs {
            json: Some(r#"{"type": "banners", "slots": 1, "slotId": "s"}"#.into()),
            ..create_args()
        };
        assert!(matches!(args.auction().unwrap(), Auction::Banners(_)));
    }

    #[test]
    fn test_slots_required_without_json() {
        assert!(create_args().auction().is_err());
    }

    #[test]
    fn test_banner_from_flags() {
        let args = BannerArgs {
            slots: 2,
            slot_id: "home-top".into(),
            category: Some("c-1".into()),
            search_query: None,
            device: Some("mobile".into()),
        };
        let banner = args.auction();
        assert_eq!(banner.slot_id, "home-top");
        assert_eq!(banner.category.unwrap().id.as_deref(), Some("c-1"));
        assert_eq!(banner.device.as_deref(), Some("mobile"));
    }
}
