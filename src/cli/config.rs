//
//  topsort-sdk
//  cli/config.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/19.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! CLI configuration commands
//!
//! Reads and writes the `topsort` configuration file. Flags and environment
//! variables still take precedence over stored values.

use anyhow::{bail, Result};
use clap::{Args, Subcommand};

use crate::config::Config;

use super::GlobalOptions;

/// Valid configuration keys
const VALID_KEYS: &[&str] = &["api_key", "base_url", "timeout"];

/// Manage CLI configuration
#[derive(Args, Debug)]
pub struct ConfigCommand {
    #[command(subcommand)]
    pub command: ConfigSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum ConfigSubcommand {
    /// Get a configuration value
    Get(GetArgs),

    /// Set a configuration value
    Set(SetArgs),

    /// Show configuration file path
    Path,
}

#[derive(Args, Debug)]
pub struct GetArgs {
    /// Configuration key
    pub key: String,
}

#[derive(Args, Debug)]
pub struct SetArgs {
    /// Configuration key
    pub key: String,

    /// Configuration value
    pub value: String,
}

fn check_key(key: &str) -> Result<()> {
    if !VALID_KEYS.contains(&key) {
        bail!(
            "Unknown configuration key: {}. Valid keys: {}",
            key,
            VALID_KEYS.join(", ")
        );
    }
    Ok(())
}

impl ConfigCommand {
    pub async fn run(&self, _global: &GlobalOptions) -> Result<()> {
        match &self.command {
            ConfigSubcommand::Get(args) => {
                check_key(&args.key)?;
                let config = Config::load()?;
                match config.get(&args.key) {
                    // Never echo the key itself
                    Some(_) if args.key == "api_key" => println!("<set>"),
                    Some(value) => println!("{}", value),
                    None => println!("<unset>"),
                }
                Ok(())
            }
            ConfigSubcommand::Set(args) => {
                check_key(&args.key)?;
                let mut config = Config::load()?;
                config.set(&args.key, args.value.clone())?;
                config.validate()?;
                config.save()?;
                eprintln!("Set {}", args.key);
                Ok(())
            }
            ConfigSubcommand::Path => {
                println!("{}", Config::config_path()?.display());
                Ok(())
            }
        }
    }
}
