//
//  topsort-sdk
//  cli/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/19.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! CLI command definitions using clap derive macros

mod auction;
mod config;
mod event;

pub use auction::AuctionCommand;
pub use config::ConfigCommand;
pub use event::EventCommand;

use std::io::Read;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use serde_json::Value;

use crate::api::TopsortClient;
use crate::config::Config;
use crate::identity::{FileStore, StoredIdentifierProvider};

/// Topsort CLI - Run auctions and report events from the command line
#[derive(Parser, Debug)]
#[command(
    name = "topsort",
    version,
    about = "Run Topsort auctions and report events from the command line",
    propagate_version = true,
    after_help = "Use 'topsort <command> --help' for more information about a command."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalOptions,
}

/// Global options available to all commands
#[derive(Parser, Debug, Clone, Default)]
pub struct GlobalOptions {
    /// Topsort API key
    #[arg(long, global = true, env = "TOPSORT_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// API base URL
    #[arg(long, global = true, env = "TOPSORT_BASE_URL")]
    pub base_url: Option<String>,

    /// Request timeout in seconds
    #[arg(long, global = true)]
    pub timeout: Option<u64>,
}

impl GlobalOptions {
    /// Merges flags over the configuration file.
    pub fn resolve(&self, mut config: Config) -> Config {
        if let Some(api_key) = &self.api_key {
            config.api_key = Some(api_key.clone());
        }
        if let Some(base_url) = &self.base_url {
            config.base_url = Some(base_url.clone());
        }
        if let Some(timeout) = self.timeout {
            config.timeout = Some(timeout);
        }
        config
    }

    /// Builds a client from flags, environment and the configuration file.
    ///
    /// The opaque user id is persisted in the platform data directory.
    pub fn client(&self) -> Result<TopsortClient> {
        let config = self.resolve(Config::load()?);
        let client = TopsortClient::new(config.client_config()?)?;
        Ok(match FileStore::default_location() {
            Ok(store) => client.with_identifier_provider(StoredIdentifierProvider::new(store)),
            Err(e) => {
                tracing::warn!("Opaque user id will not be persisted: {}", e);
                client
            }
        })
    }
}

/// Top-level commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run auctions
    #[command(visible_alias = "a")]
    Auction(AuctionCommand),

    /// Report events
    #[command(visible_alias = "e")]
    Event(EventCommand),

    /// Manage CLI configuration
    Config(ConfigCommand),

    /// Print version information
    Version,
}

/// Reads a JSON document from `--file` (`-` for stdin) or `--json`.
pub(crate) fn read_json(file: Option<&str>, json: Option<&str>) -> Result<Option<Value>> {
    let content = match (file, json) {
        (Some(_), Some(_)) => bail!("Use either --file or --json, not both"),
        (Some("-"), None) => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
        (Some(path), None) => {
            std::fs::read_to_string(path).with_context(|| format!("Could not read {}", path))?
        }
        (None, Some(json)) => json.to_string(),
        (None, None) => return Ok(None),
    };

    let value = serde_json::from_str(&content).context("Input is not valid JSON")?;
    Ok(Some(value))
}

/// Prints a value as pretty JSON on stdout.
pub(crate) fn print_json(value: &impl serde::Serialize) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
