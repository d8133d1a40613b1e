//
//  smartling-files
//  cli/manage.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! File management commands: list, file types, last modified, delete,
//! status and rename

use anyhow::Result;
use chrono::{DateTime, Utc};
use clap::Args;

use crate::api::files::ListOptions;

use super::{report, GlobalOptions};

/// List files in the project
#[derive(Args, Debug)]
pub struct ListCommand {
    /// Only files whose URI contains this text
    #[arg(long)]
    pub uri_mask: Option<String>,

    /// Only files of this type (repeatable)
    #[arg(long = "type", short = 't', value_name = "TYPE")]
    pub file_types: Vec<String>,

    /// Only files uploaded after this time (RFC 3339)
    #[arg(long, value_name = "TIME")]
    pub uploaded_after: Option<DateTime<Utc>>,

    /// Only files uploaded before this time (RFC 3339)
    #[arg(long, value_name = "TIME")]
    pub uploaded_before: Option<DateTime<Utc>>,

    /// Sort order, e.g. lastUploaded_desc
    #[arg(long)]
    pub order_by: Option<String>,

    /// Maximum number of files to return
    #[arg(long, short = 'L')]
    pub limit: Option<u32>,

    /// Number of files to skip
    #[arg(long)]
    pub offset: Option<u32>,
}

impl ListCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        let api = global.client()?;
        let output = api.list(&self.options()).await?;
        report(global, &output)
    }

    fn options(&self) -> ListOptions {
        let mut options = ListOptions::new();
        if let Some(mask) = &self.uri_mask {
            options = options.uri_mask(mask.as_str());
        }
        for file_type in &self.file_types {
            options = options.file_type(file_type.as_str());
        }
        if let Some(after) = self.uploaded_after {
            options = options.uploaded_after(after);
        }
        if let Some(before) = self.uploaded_before {
            options = options.uploaded_before(before);
        }
        if let Some(order) = &self.order_by {
            options = options.order_by(order.as_str());
        }
        if let Some(limit) = self.limit {
            options = options.limit(limit);
        }
        if let Some(offset) = self.offset {
            options = options.offset(offset);
        }
        options
    }
}

/// List file types used in the project
#[derive(Args, Debug)]
pub struct FileTypesCommand {}

impl FileTypesCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        let api = global.client()?;
        let output = api.list_file_types().await?;
        report(global, &output)
    }
}

/// Show when a file's translations last changed
#[derive(Args, Debug)]
pub struct LastModifiedCommand {
    /// File URI in the project
    pub file_uri: String,

    /// Only report this locale
    #[arg(long, short = 'l')]
    pub locale: Option<String>,
}

impl LastModifiedCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        let api = global.client()?;
        let output = api
            .last_modified(&self.file_uri, self.locale.as_deref())
            .await?;
        report(global, &output)
    }
}

/// Delete a file and its translations
#[derive(Args, Debug)]
pub struct DeleteCommand {
    /// File URI in the project
    pub file_uri: String,
}

impl DeleteCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        let api = global.client()?;
        let output = api.delete(&self.file_uri).await?;
        report(global, &output)?;
        global
            .writer()
            .write_success(&format!("Deleted {}", self.file_uri));
        Ok(())
    }
}

/// Show the translation status of a file
#[derive(Args, Debug)]
pub struct StatusCommand {
    /// File URI in the project
    pub file_uri: String,

    /// Locale to report; all locales when omitted
    pub locale: Option<String>,
}

impl StatusCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        let api = global.client()?;
        let output = match &self.locale {
            Some(locale) => api.status(&self.file_uri, locale).await?,
            None => api.status_all_locales(&self.file_uri).await?,
        };
        report(global, &output)
    }
}

/// Rename a file
#[derive(Args, Debug)]
pub struct RenameCommand {
    /// Current file URI
    pub file_uri: String,

    /// New file URI
    pub new_uri: String,
}

impl RenameCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        let api = global.client()?;
        let output = api.rename(&self.file_uri, &self.new_uri).await?;
        report(global, &output)?;
        global
            .writer()
            .write_success(&format!("Renamed {} to {}", self.file_uri, self.new_uri));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{Cli, Commands};
    use clap::Parser;

    #[test]
    fn test_list_options_from_args() {
        let cli = Cli::try_parse_from([
            "sl",
            "list",
            "--uri-mask",
            "/app/",
            "-t",
            "json",
            "-t",
            "yaml",
            "--uploaded-after",
            "2024-03-01T12:00:00Z",
            "-L",
            "20",
        ])
        .unwrap();

        let Commands::List(cmd) = cli.command else {
            panic!("expected list command");
        };
        let options = cmd.options();
        assert_eq!(options.uri_mask.as_deref(), Some("/app/"));
        assert_eq!(options.file_types, vec!["json".to_string(), "yaml".to_string()]);
        assert_eq!(
            options.last_uploaded_after.map(|t| t.to_rfc3339()),
            Some("2024-03-01T12:00:00+00:00".to_string())
        );
        assert_eq!(options.limit, Some(20));
        assert_eq!(options.offset, None);
    }

    #[test]
    fn test_status_locale_is_optional() {
        let cli = Cli::try_parse_from(["sl", "status", "a.json"]).unwrap();
        let Commands::Status(cmd) = cli.command else {
            panic!("expected status command");
        };
        assert_eq!(cmd.locale, None);
    }
}
