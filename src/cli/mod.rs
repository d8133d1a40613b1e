//
//  smartling-files
//  cli/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! CLI command definitions using clap derive macros

mod config;
mod download;
mod locales;
mod manage;
mod upload;

pub use config::ConfigCommand;
pub use download::{GetAllCommand, GetCommand, GetMultipleCommand, GetOriginalCommand};
pub use locales::LocalesCommand;
pub use manage::{
    DeleteCommand, FileTypesCommand, LastModifiedCommand, ListCommand, RenameCommand,
    StatusCommand,
};
pub use upload::{ImportCommand, UploadCommand};

use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use tracing::debug;

use crate::api::{CommandOutput, FileApi};
use crate::config::Config;
use crate::output::{failure_reason, OutputFormat, OutputWriter};

/// Smartling Files CLI - Manage translatable files from the command line
#[derive(Parser, Debug)]
#[command(
    name = "sl",
    version,
    about = "Manage Smartling files from the command line",
    long_about = "sl uploads source files to a Smartling project, downloads their \
                  translations and manages the files stored in the project.",
    propagate_version = true,
    after_help = "Use 'sl <command> --help' for more information about a command."
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
    /// Project to operate on
    #[arg(long, short = 'p', global = true, env = "SL_PROJECT_ID")]
    pub project: Option<String>,

    /// API host, e.g. https://api.smartling.com
    #[arg(long, global = true, env = "SL_HOST")]
    pub host: Option<String>,

    /// Configuration file to use instead of the default
    #[arg(long, global = true, env = "SL_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output format as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Print response bodies exactly as received
    #[arg(long, global = true)]
    pub raw: bool,
}

impl GlobalOptions {
    pub fn output_format(&self) -> OutputFormat {
        if self.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }

    /// Loads the configuration with environment and command-line overrides applied.
    pub fn load_config(&self) -> Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::load_from(path)?,
            None => Config::load()?,
        };
        config.apply_env();

        if let Some(project) = self.project.as_deref().filter(|p| !p.is_empty()) {
            config.project_id = Some(project.to_string());
        }
        if let Some(host) = self.host.as_deref().filter(|h| !h.is_empty()) {
            config.host = Some(host.trim_end_matches('/').to_string());
        }
        Ok(config)
    }

    /// Builds a Files API client from the effective configuration.
    pub fn client(&self) -> Result<FileApi> {
        let config = self.load_config()?;
        let client_config = config.client_config()?;
        debug!(host = %client_config.host, project = %client_config.project_id, "creating client");

        let mut api = FileApi::new(&client_config)?;
        if self.raw {
            api.set_raw_mode(true);
        }
        Ok(api)
    }

    pub fn writer(&self) -> OutputWriter {
        OutputWriter::new(self.output_format())
    }
}

/// Top-level commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Upload a source file
    #[command(visible_alias = "up")]
    Upload(UploadCommand),

    /// Import existing translations of a file
    Import(ImportCommand),

    /// Download the translation of a file for one locale
    Get(GetCommand),

    /// Download translations for several locales as a ZIP archive
    #[command(name = "get-multiple")]
    GetMultiple(GetMultipleCommand),

    /// Download translations for every locale (ZIP, or CSV with --csv)
    #[command(name = "get-all")]
    GetAll(GetAllCommand),

    /// Download the originally uploaded file
    #[command(name = "get-original")]
    GetOriginal(GetOriginalCommand),

    /// List files in the project
    #[command(visible_alias = "ls")]
    List(ListCommand),

    /// List file types used in the project
    #[command(name = "file-types")]
    FileTypes(FileTypesCommand),

    /// Show when a file's translations last changed
    #[command(name = "last-modified")]
    LastModified(LastModifiedCommand),

    /// Delete a file and its translations
    #[command(visible_alias = "rm")]
    Delete(DeleteCommand),

    /// Show the translation status of a file
    Status(StatusCommand),

    /// Rename a file
    #[command(visible_alias = "mv")]
    Rename(RenameCommand),

    /// Manage the locales a file is authorized for
    Locales(LocalesCommand),

    /// Manage CLI configuration
    Config(ConfigCommand),
}

/// Prints a command result; a non-2xx result becomes an error.
///
/// In text mode a failed result is only reported through the error.
pub(crate) fn report(global: &GlobalOptions, output: &CommandOutput) -> Result<()> {
    let writer = global.writer();
    if output.is_success() || global.json || global.raw {
        writer.write_output(output)?;
    }
    if !output.is_success() {
        bail!("{}", failure_reason(output));
    }
    Ok(())
}

/// Parses a `KEY=VALUE` argument.
pub(crate) fn parse_key_value(s: &str) -> std::result::Result<(String, String), String> {
    match s.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(format!("expected KEY=VALUE, got `{}`", s)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_key_value() {
        assert_eq!(
            parse_key_value("smartling.namespace=app"),
            Ok(("smartling.namespace".to_string(), "app".to_string()))
        );
        assert_eq!(parse_key_value("a=b=c"), Ok(("a".to_string(), "b=c".to_string())));
        assert_eq!(parse_key_value("empty="), Ok(("empty".to_string(), String::new())));
        assert!(parse_key_value("novalue").is_err());
        assert!(parse_key_value("=x").is_err());
    }

    #[test]
    fn test_global_overrides_win() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("config.toml");
        std::fs::write(&path, "project_id = \"from-file\"\nhost = \"https://file.example.com\"\n").unwrap();

        let global = GlobalOptions {
            project: Some("from-flag".to_string()),
            host: Some("https://flag.example.com/".to_string()),
            config: Some(path),
            ..Default::default()
        };
        let config = global.load_config().unwrap();
        assert_eq!(config.project_id.as_deref(), Some("from-flag"));
        assert_eq!(config.host(), "https://flag.example.com");
    }

    #[test]
    fn test_parse_get_command() {
        let cli = Cli::try_parse_from([
            "sl",
            "get",
            "/app/en.json",
            "fr-FR",
            "--retrieval-type",
            "pseudo",
            "-o",
            "fr.json",
            "--json",
        ])
        .unwrap();
        assert!(cli.global.json);
        match cli.command {
            Commands::Get(cmd) => {
                assert_eq!(cmd.file_uri, "/app/en.json");
                assert_eq!(cmd.locale, "fr-FR");
                assert_eq!(cmd.download.retrieval_type.as_deref(), Some("pseudo"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
