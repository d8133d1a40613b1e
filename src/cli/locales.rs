//
//  smartling-files
//  cli/locales.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Authorized locale commands

use anyhow::Result;
use clap::{Args, Subcommand};

use super::{report, GlobalOptions};

/// Manage the locales a file is authorized for
#[derive(Args, Debug)]
pub struct LocalesCommand {
    #[command(subcommand)]
    pub command: LocalesSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum LocalesSubcommand {
    /// List the locales a file is authorized for
    #[command(visible_alias = "ls")]
    List(ListArgs),

    /// Authorize a file for translation into locales
    Add(ChangeArgs),

    /// Remove authorization for locales
    #[command(visible_alias = "rm")]
    Remove(ChangeArgs),
}

#[derive(Args, Debug)]
pub struct ListArgs {
    /// File URI in the project
    pub file_uri: String,
}

#[derive(Args, Debug)]
pub struct ChangeArgs {
    /// File URI in the project
    pub file_uri: String,

    /// Locales to change, e.g. fr-FR de-DE
    #[arg(required = true)]
    pub locales: Vec<String>,
}

impl LocalesCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        let api = global.client()?;
        match &self.command {
            LocalesSubcommand::List(args) => {
                let output = api.authorized_locales(&args.file_uri).await?;
                report(global, &output)
            }
            LocalesSubcommand::Add(args) => {
                let output = api.authorize_locales(&args.file_uri, &args.locales).await?;
                report(global, &output)?;
                global.writer().write_success(&format!(
                    "Authorized {} for {}",
                    args.file_uri,
                    args.locales.join(", ")
                ));
                Ok(())
            }
            LocalesSubcommand::Remove(args) => {
                let output = api
                    .unauthorize_locales(&args.file_uri, &args.locales)
                    .await?;
                report(global, &output)?;
                global.writer().write_success(&format!(
                    "Removed {} from {}",
                    args.locales.join(", "),
                    args.file_uri
                ));
                Ok(())
            }
        }
    }
}
