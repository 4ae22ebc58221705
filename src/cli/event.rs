//
//  topsort-sdk
//  cli/event.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/19.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Event commands
//!
//! ## Examples
//!
//! ```bash
//! # Report a click on a promoted product
//! topsort event report click --json '{"entity": {"type": "product", "id": "p-1"}, "resolvedBidId": "b-1"}'
//!
//! # Report a purchase described in a file
//! topsort event report purchase --file purchase.json
//! ```
//!
//! `id`, `ocurredAt` and `opaqueUserId` are filled in when missing. The
//! opaque user id is kept in the CLI's data directory between runs unless
//! `--opaque-user-id` is given.

use anyhow::{Context, Result};
use clap::{Args, Subcommand};

use crate::identity::FixedIdentifier;

use super::{read_json, GlobalOptions};

/// Report events
#[derive(Args, Debug)]
pub struct EventCommand {
    #[command(subcommand)]
    pub command: EventSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum EventSubcommand {
    /// Report an impression, click or purchase
    Report(ReportArgs),
}

#[derive(Args, Debug)]
pub struct ReportArgs {
    /// Event kind: impression, click or purchase
    pub kind: String,

    /// Read the event data from a JSON file (- for stdin)
    #[arg(long, short = 'f', conflicts_with = "json")]
    pub file: Option<String>,

    /// Event data as an inline JSON string
    #[arg(long)]
    pub json: Option<String>,

    /// Opaque user id to attach instead of the stored one
    #[arg(long)]
    pub opaque_user_id: Option<String>,
}

impl EventCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        match &self.command {
            EventSubcommand::Report(args) => self.report(args, global).await,
        }
    }

    async fn report(&self, args: &ReportArgs, global: &GlobalOptions) -> Result<()> {
        let data = read_json(args.file.as_deref(), args.json.as_deref())?
            .context("Provide the event data with --file or --json")?;

        let mut client = global.client()?;
        if let Some(id) = &args.opaque_user_id {
            client = client.with_identifier_provider(FixedIdentifier::new(id));
        }

        client.report_event(&args.kind, data).await?;
        eprintln!("Reported {} event", args.kind.to_lowercase());
        Ok(())
    }
}
