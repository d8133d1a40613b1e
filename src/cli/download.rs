//
//  smartling-files
//  cli/download.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Download commands
//!
//! Each command writes the downloaded body to `--output`, or to stdout when
//! no output path is given. Without `--output`, `--json` and `--raw` print the
//! response instead. With `--raw --output` the body is saved exactly as
//! received, whatever the status.

use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::Args;

use crate::api::common::Params;
use crate::api::files::DownloadOptions;
use crate::api::CommandOutput;
use crate::output::{failure_reason, save_body, write_download};

use super::{parse_key_value, report, GlobalOptions};

/// Options shared by the translation downloads
#[derive(Args, Debug, Clone, Default)]
pub struct DownloadArgs {
    /// pending, published, pseudo or contextMatchingInstrumented
    #[arg(long, short = 'r')]
    pub retrieval_type: Option<String>,

    /// Fall back to source strings for untranslated content (true/false)
    #[arg(long, value_name = "BOOL")]
    pub include_original_strings: Option<bool>,

    /// Write the download to this file instead of stdout
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,

    /// Extra request parameter as KEY=VALUE (repeatable)
    #[arg(long = "param", value_name = "KEY=VALUE", value_parser = parse_key_value)]
    pub params: Vec<(String, String)>,
}

impl DownloadArgs {
    fn options(&self) -> DownloadOptions {
        let mut options = DownloadOptions::new();
        for (key, value) in &self.params {
            options = options.param(key.as_str(), value.as_str());
        }
        if let Some(retrieval_type) = &self.retrieval_type {
            options = options.retrieval_type(retrieval_type.as_str());
        }
        if let Some(include) = self.include_original_strings {
            options = options.include_original_strings(include);
        }
        options
    }
}

/// Saves or prints a download result.
fn finish(global: &GlobalOptions, output: &CommandOutput, destination: Option<&PathBuf>) -> Result<()> {
    let Some(path) = destination else {
        if global.json || global.raw {
            return report(global, output);
        }
        write_download(output, None)?;
        return Ok(());
    };

    if global.raw {
        save_body(output.body(), path)?;
        if !output.is_success() {
            bail!("{}", failure_reason(output));
        }
        return Ok(());
    }

    let written = write_download(output, Some(path))?;
    if global.json {
        return report(global, output);
    }
    global
        .writer()
        .write_success(&format!("Saved {} bytes to {}", written, path.display()));
    Ok(())
}

/// Download the translation of a file for one locale
#[derive(Args, Debug)]
pub struct GetCommand {
    /// File URI in the project
    pub file_uri: String,

    /// Locale to download, e.g. fr-FR
    pub locale: String,

    #[command(flatten)]
    pub download: DownloadArgs,
}

impl GetCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        let api = global.client()?;
        let output = api
            .get(&self.file_uri, &self.locale, &self.download.options())
            .await?;
        finish(global, &output, self.download.output.as_ref())
    }
}

/// Download translations for several locales as a ZIP archive
#[derive(Args, Debug)]
pub struct GetMultipleCommand {
    /// File URI in the project
    pub file_uri: String,

    /// Locale to include (repeatable)
    #[arg(long = "locale", short = 'l', required = true, value_name = "LOCALE")]
    pub locales: Vec<String>,

    /// UNCHANGED, TRIM_LEADING or LOCALE_LAST
    #[arg(long)]
    pub file_name_mode: Option<String>,

    /// LOCALE_IN_PATH, LOCALE_IN_NAME or LOCALE_IN_NAME_AND_PATH
    #[arg(long)]
    pub locale_mode: Option<String>,

    /// Name of the archive built by the service
    #[arg(long)]
    pub zip_file_name: Option<String>,

    #[command(flatten)]
    pub download: DownloadArgs,
}

impl GetMultipleCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        let mut options = self.download.options();
        if let Some(mode) = &self.file_name_mode {
            options = options.file_name_mode(mode.as_str());
        }
        if let Some(mode) = &self.locale_mode {
            options = options.locale_mode(mode.as_str());
        }
        if let Some(name) = &self.zip_file_name {
            options = options.zip_file_name(name.as_str());
        }

        let api = global.client()?;
        let output = api
            .get_multiple_locales(&self.file_uri, &self.locales, &options)
            .await?;
        finish(global, &output, self.download.output.as_ref())
    }
}

/// Download translations for every locale
#[derive(Args, Debug)]
pub struct GetAllCommand {
    /// File URI in the project
    pub file_uri: String,

    /// Download a single CSV file instead of a ZIP archive
    #[arg(long)]
    pub csv: bool,

    #[command(flatten)]
    pub download: DownloadArgs,
}

impl GetAllCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        let api = global.client()?;
        let options = self.download.options();
        let output = if self.csv {
            api.get_all_locales_csv(&self.file_uri, &options).await?
        } else {
            api.get_all_locales_zip(&self.file_uri, &options).await?
        };
        finish(global, &output, self.download.output.as_ref())
    }
}

/// Download the originally uploaded file
#[derive(Args, Debug)]
pub struct GetOriginalCommand {
    /// File URI in the project
    pub file_uri: String,

    /// Write the download to this file instead of stdout
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,

    /// Extra request parameter as KEY=VALUE (repeatable)
    #[arg(long = "param", value_name = "KEY=VALUE", value_parser = parse_key_value)]
    pub params: Vec<(String, String)>,
}

impl GetOriginalCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        let mut params = Params::new();
        for (key, value) in &self.params {
            params.insert_text(key.as_str(), value.as_str());
        }

        let api = global.client()?;
        let output = api.get_original(&self.file_uri, params).await?;
        finish(global, &output, self.output.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_download_args_named_options_win() {
        let args = DownloadArgs {
            retrieval_type: Some("published".to_string()),
            include_original_strings: Some(true),
            output: None,
            params: vec![
                ("retrievalType".to_string(), "pending".to_string()),
                ("debug".to_string(), "1".to_string()),
            ],
        };

        let options = args.options();
        assert_eq!(options.retrieval_type.as_deref(), Some("published"));
        assert_eq!(options.include_original_strings, Some(true));
        assert_eq!(options.extra.get("debug").map(String::as_str), Some("1"));
    }

    #[test]
    fn test_raw_download_saved_to_output_file() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("fr.properties");
        let global = GlobalOptions {
            raw: true,
            ..Default::default()
        };
        let output = CommandOutput::Raw {
            body: b"key=valeur\n".to_vec(),
            status: 200,
        };

        finish(&global, &output, Some(&path)).unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), b"key=valeur\n");
    }

    #[test]
    fn test_raw_download_failure_still_saved() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("fr.json");
        let global = GlobalOptions {
            raw: true,
            ..Default::default()
        };
        let output = CommandOutput::Raw {
            body: b"not found".to_vec(),
            status: 404,
        };

        let err = finish(&global, &output, Some(&path)).unwrap_err();
        assert!(err.to_string().contains("HTTP 404"));
        assert_eq!(std::fs::read(&path).unwrap(), b"not found");
    }

    #[test]
    fn test_json_download_still_writes_file() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("fr.json");
        let global = GlobalOptions {
            json: true,
            ..Default::default()
        };
        let output = CommandOutput::Response(crate::api::ApiResponse::new("{\"a\":1}\n", 200));

        finish(&global, &output, Some(&path)).unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), b"{\"a\":1}\n");
    }
}
