//
//  smartling-files
//  cli/upload.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Upload and import commands

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;

use crate::api::files::{Directive, ImportOptions, UploadData, DIRECTIVE_PREFIX};

use super::{parse_key_value, report, GlobalOptions};

/// Arguments describing the local file, shared by upload and import
#[derive(Args, Debug, Clone)]
pub struct FileArgs {
    /// Path of the local file
    pub file: PathBuf,

    /// Smartling file type (json, android, ios, gettext, yaml, ...)
    #[arg(long = "type", short = 't')]
    pub file_type: String,

    /// File URI in the project (defaults to the file name)
    #[arg(long, short = 'u')]
    pub uri: Option<String>,
}

impl FileArgs {
    fn upload_data(&self) -> Result<UploadData> {
        let (dir, name) = split_path(&self.file)?;
        let mut upload = UploadData::new(dir, name, self.file_type.as_str());
        if let Some(uri) = &self.uri {
            upload = upload.with_uri(uri.as_str());
        }
        Ok(upload)
    }
}

/// Upload a source file
#[derive(Args, Debug)]
pub struct UploadCommand {
    #[command(flatten)]
    pub file: FileArgs,

    /// Authorize the content for translation
    #[arg(long)]
    pub approve: bool,

    /// URL called when the file is fully translated
    #[arg(long)]
    pub callback_url: Option<String>,

    /// Locale to authorize (repeatable)
    #[arg(long = "approve-locale", value_name = "LOCALE")]
    pub approve_locales: Vec<String>,

    /// Upload directive as NAME=VALUE (repeatable)
    #[arg(long = "directive", short = 'd', value_name = "NAME=VALUE", value_parser = parse_key_value)]
    pub directives: Vec<(String, String)>,

    /// Namespace prepended to directive names
    #[arg(long, default_value = DIRECTIVE_PREFIX)]
    pub directive_prefix: String,
}

impl UploadCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        let upload = self.upload_data()?;
        let api = global.client()?;

        let output = api.upload(&upload).await?;
        report(global, &output)?;
        global
            .writer()
            .write_success(&format!("Uploaded {} as {}", self.file.file.display(), upload.file_uri()));
        Ok(())
    }

    fn upload_data(&self) -> Result<UploadData> {
        let mut upload = self
            .file
            .upload_data()?
            .approve(self.approve)
            .approve_locales(self.approve_locales.iter().cloned());
        if let Some(url) = &self.callback_url {
            upload = upload.with_callback_url(url.as_str());
        }
        for (name, value) in &self.directives {
            upload = upload.directive(
                Directive::new(name.as_str(), value.as_str()).with_prefix(self.directive_prefix.as_str()),
            );
        }
        Ok(upload)
    }
}

/// Import existing translations of a file
#[derive(Args, Debug)]
pub struct ImportCommand {
    #[command(flatten)]
    pub file: FileArgs,

    /// Locale of the translations
    #[arg(long, short = 'l')]
    pub locale: String,

    /// PUBLISHED or POST_TRANSLATION
    #[arg(long)]
    pub translation_state: Option<String>,

    /// Replace existing translations
    #[arg(long)]
    pub overwrite: bool,
}

impl ImportCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        let upload = self.file.upload_data()?;
        let mut options = ImportOptions::new();
        if let Some(state) = &self.translation_state {
            options = options.translation_state(state.as_str());
        }
        if self.overwrite {
            options = options.overwrite(true);
        }

        let api = global.client()?;
        let output = api.import(&upload, &self.locale, &options).await?;
        report(global, &output)?;
        global.writer().write_success(&format!(
            "Imported {} translations for {}",
            self.locale,
            upload.file_uri()
        ));
        Ok(())
    }
}

/// Splits a file path into its directory and file name.
fn split_path(path: &Path) -> Result<(PathBuf, String)> {
    let name = path
        .file_name()
        .with_context(|| format!("Not a file path: {}", path.display()))?
        .to_string_lossy()
        .into_owned();
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    Ok((dir, name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_path() {
        let (dir, name) = split_path(Path::new("locales/en.json")).unwrap();
        assert_eq!(dir, PathBuf::from("locales"));
        assert_eq!(name, "en.json");

        let (dir, name) = split_path(Path::new("en.json")).unwrap();
        assert_eq!(dir, PathBuf::from("."));
        assert_eq!(name, "en.json");

        assert!(split_path(Path::new("/")).is_err());
    }

    #[test]
    fn test_upload_data_from_args() {
        let command = UploadCommand {
            file: FileArgs {
                file: PathBuf::from("locales/en.json"),
                file_type: "json".to_string(),
                uri: Some("/app/en.json".to_string()),
            },
            approve: true,
            callback_url: None,
            approve_locales: vec!["fr-FR".to_string()],
            directives: vec![("namespace".to_string(), "web".to_string())],
            directive_prefix: DIRECTIVE_PREFIX.to_string(),
        };

        let upload = command.upload_data().unwrap();
        assert_eq!(upload.file_uri(), "/app/en.json");
        assert_eq!(upload.local_path(), PathBuf::from("locales/en.json"));
        assert!(upload.approve_content);
        assert_eq!(upload.locales_to_approve, vec!["fr-FR".to_string()]);
        assert_eq!(upload.directives[0].key(), "smartling.namespace");
    }
}
