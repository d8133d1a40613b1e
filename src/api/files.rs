//
//  smartling-files
//  api/files.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Inputs of the file commands.
//!
//! [`UploadData`] describes a local file to upload or import. The options
//! types enumerate the optional parameters each family of commands
//! understands. Each options type also carries an `extra` map whose entries
//! are forwarded unchanged, so parameters added to the service later can be
//! used without a new release.

use std::collections::BTreeMap;
use std::path::PathBuf;

use chrono::{DateTime, SecondsFormat, Utc};

use crate::api::common::{keys, Params};

/// Default namespace of upload directives.
pub const DIRECTIVE_PREFIX: &str = "smartling.";

/// A free-form upload instruction, sent as `prefix + name = value`.
///
/// # Example
///
/// ```rust
/// use smartling_files::api::files::Directive;
///
/// let directive = Directive::new("placeholder_format_custom", "\\[.+?\\]");
/// assert_eq!(directive.key(), "smartling.placeholder_format_custom");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directive {
    pub name: String,
    pub value: String,
    pub prefix: String,
}

impl Directive {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            prefix: DIRECTIVE_PREFIX.to_string(),
        }
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Namespaced parameter name.
    pub fn key(&self) -> String {
        format!("{}{}", self.prefix, self.name)
    }
}

/// Describes a local file to upload or import.
///
/// # Example
///
/// ```rust
/// use smartling_files::api::files::{Directive, UploadData};
///
/// let upload = UploadData::new("./locales/", "en.json", "json")
///     .with_uri("/app/en.json")
///     .approve_locales(["fr-FR", "de-DE"])
///     .directive(Directive::new("translate_paths", "*/text"));
///
/// assert_eq!(upload.file_uri(), "/app/en.json");
/// assert_eq!(upload.local_path().file_name().unwrap(), "en.json");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadData {
    /// Service-side file URI; defaults to `name`
    pub uri: Option<String>,
    /// Smartling file type, e.g. `json`, `android`, `gettext`
    pub file_type: String,
    /// Directory containing the file
    pub path: PathBuf,
    /// File name inside `path`
    pub name: String,
    /// Authorize the content for translation on upload
    pub approve_content: bool,
    /// URL the service calls when the file is fully translated
    pub callback_url: Option<String>,
    /// Locales to authorize, in order
    pub locales_to_approve: Vec<String>,
    /// Upload directives, in order
    pub directives: Vec<Directive>,
}

impl UploadData {
    pub fn new(path: impl Into<PathBuf>, name: impl Into<String>, file_type: impl Into<String>) -> Self {
        Self {
            uri: None,
            file_type: file_type.into(),
            path: path.into(),
            name: name.into(),
            approve_content: false,
            callback_url: None,
            locales_to_approve: Vec::new(),
            directives: Vec::new(),
        }
    }

    pub fn with_uri(mut self, uri: impl Into<String>) -> Self {
        self.uri = Some(uri.into());
        self
    }

    pub fn approve(mut self, approve: bool) -> Self {
        self.approve_content = approve;
        self
    }

    pub fn with_callback_url(mut self, url: impl Into<String>) -> Self {
        self.callback_url = Some(url.into());
        self
    }

    pub fn approve_locales<I, S>(mut self, locales: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.locales_to_approve.extend(locales.into_iter().map(Into::into));
        self
    }

    pub fn directive(mut self, directive: Directive) -> Self {
        self.directives.push(directive);
        self
    }

    /// The URI the file is stored under on the service.
    pub fn file_uri(&self) -> &str {
        match &self.uri {
            Some(uri) if !uri.is_empty() => uri,
            _ => &self.name,
        }
    }

    /// Full local path of the file.
    pub fn local_path(&self) -> PathBuf {
        self.path.join(&self.name)
    }
}

/// Optional parameters of the download commands.
///
/// | Field | Parameter | Commands |
/// |-------|-----------|----------|
/// | `retrieval_type` | `retrievalType` | all downloads except original |
/// | `include_original_strings` | `includeOriginalStrings` | single locale, multiple locales |
/// | `file_name_mode` | `fileNameMode` | multiple locales |
/// | `locale_mode` | `localeMode` | multiple locales |
/// | `zip_file_name` | `zipFileName` | multiple locales |
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DownloadOptions {
    pub retrieval_type: Option<String>,
    pub include_original_strings: Option<bool>,
    pub file_name_mode: Option<String>,
    pub locale_mode: Option<String>,
    pub zip_file_name: Option<String>,
    pub extra: BTreeMap<String, String>,
}

impl DownloadOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accepts a [`RetrievalType`](crate::api::common::RetrievalType) or its wire value.
    pub fn retrieval_type(mut self, value: impl Into<String>) -> Self {
        self.retrieval_type = Some(value.into());
        self
    }

    pub fn include_original_strings(mut self, include: bool) -> Self {
        self.include_original_strings = Some(include);
        self
    }

    pub fn file_name_mode(mut self, mode: impl Into<String>) -> Self {
        self.file_name_mode = Some(mode.into());
        self
    }

    pub fn locale_mode(mut self, mode: impl Into<String>) -> Self {
        self.locale_mode = Some(mode.into());
        self
    }

    pub fn zip_file_name(mut self, name: impl Into<String>) -> Self {
        self.zip_file_name = Some(name.into());
        self
    }

    /// Adds a pass-through parameter.
    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    pub(crate) fn to_params(&self) -> Params {
        let mut params = Params::new();
        params.extend_text(&self.extra);

        if let Some(value) = &self.retrieval_type {
            params.insert_text(keys::RETRIEVAL_TYPE, value);
        }
        if let Some(include) = self.include_original_strings {
            params.insert_text(keys::INCLUDE_ORIGINAL_STRINGS, include.to_string());
        }
        if let Some(mode) = &self.file_name_mode {
            params.insert_text(keys::FILE_NAME_MODE, mode);
        }
        if let Some(mode) = &self.locale_mode {
            params.insert_text(keys::LOCALE_MODE, mode);
        }
        if let Some(name) = &self.zip_file_name {
            params.insert_text(keys::ZIP_FILE_NAME, name);
        }
        params
    }
}

/// Optional parameters of the import command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportOptions {
    /// `PUBLISHED` or `POST_TRANSLATION`
    pub translation_state: Option<String>,
    /// Replace existing translations
    pub overwrite: Option<bool>,
    pub extra: BTreeMap<String, String>,
}

impl ImportOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accepts a [`TranslationState`](crate::api::common::TranslationState) or its wire value.
    pub fn translation_state(mut self, state: impl Into<String>) -> Self {
        self.translation_state = Some(state.into());
        self
    }

    pub fn overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = Some(overwrite);
        self
    }

    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    pub(crate) fn apply(&self, params: &mut Params) {
        params.extend_text(&self.extra);
        if let Some(state) = &self.translation_state {
            params.insert_text(keys::TRANSLATION_STATE, state);
        }
        if let Some(overwrite) = self.overwrite {
            params.insert_text(keys::OVERWRITE, overwrite.to_string());
        }
    }
}

/// Filters and paging of the list command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListOptions {
    /// Substring the file URI must contain
    pub uri_mask: Option<String>,
    pub file_types: Vec<String>,
    pub last_uploaded_after: Option<DateTime<Utc>>,
    pub last_uploaded_before: Option<DateTime<Utc>>,
    /// e.g. `lastUploaded_desc`
    pub order_by: Option<String>,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
    pub extra: BTreeMap<String, String>,
}

impl ListOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn uri_mask(mut self, mask: impl Into<String>) -> Self {
        self.uri_mask = Some(mask.into());
        self
    }

    pub fn file_type(mut self, file_type: impl Into<String>) -> Self {
        self.file_types.push(file_type.into());
        self
    }

    pub fn uploaded_after(mut self, when: DateTime<Utc>) -> Self {
        self.last_uploaded_after = Some(when);
        self
    }

    pub fn uploaded_before(mut self, when: DateTime<Utc>) -> Self {
        self.last_uploaded_before = Some(when);
        self
    }

    pub fn order_by(mut self, order: impl Into<String>) -> Self {
        self.order_by = Some(order.into());
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn offset(mut self, offset: u32) -> Self {
        self.offset = Some(offset);
        self
    }

    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    pub(crate) fn to_params(&self) -> Params {
        let mut params = Params::new();
        params.extend_text(&self.extra);

        if let Some(mask) = &self.uri_mask {
            params.insert_text(keys::URI_MASK, mask);
        }
        if !self.file_types.is_empty() {
            params.insert_list(keys::FILE_TYPES, self.file_types.iter().cloned());
        }
        if let Some(after) = self.last_uploaded_after {
            params.insert_text(keys::LAST_UPLOADED_AFTER, format_timestamp(after));
        }
        if let Some(before) = self.last_uploaded_before {
            params.insert_text(keys::LAST_UPLOADED_BEFORE, format_timestamp(before));
        }
        if let Some(order) = &self.order_by {
            params.insert_text(keys::ORDER_BY, order);
        }
        if let Some(limit) = self.limit {
            params.insert_text(keys::LIMIT, limit.to_string());
        }
        if let Some(offset) = self.offset {
            params.insert_text(keys::OFFSET, offset.to_string());
        }
        params
    }
}

fn format_timestamp(when: DateTime<Utc>) -> String {
    when.to_rfc3339_opts(SecondsFormat::Secs, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::common::{ParamValue, RetrievalType};
    use chrono::TimeZone;

    #[test]
    fn test_file_uri_defaults_to_name() {
        let upload = UploadData::new("/tmp", "app.json", "json");
        assert_eq!(upload.file_uri(), "app.json");

        let upload = upload.with_uri("");
        assert_eq!(upload.file_uri(), "app.json");

        let upload = upload.with_uri("/custom/app.json");
        assert_eq!(upload.file_uri(), "/custom/app.json");
    }

    #[test]
    fn test_local_path_joins_directory_and_name() {
        let upload = UploadData::new("/data/strings", "en.properties", "javaProperties");
        assert_eq!(upload.local_path(), PathBuf::from("/data/strings/en.properties"));
    }

    #[test]
    fn test_download_options_named_fields_win_over_extra() {
        let params = DownloadOptions::new()
            .param("retrievalType", "pending")
            .param("debugMode", "1")
            .retrieval_type(RetrievalType::Published)
            .include_original_strings(false)
            .to_params();

        assert_eq!(params.get_text("retrievalType"), Some("published"));
        assert_eq!(params.get_text("includeOriginalStrings"), Some("false"));
        assert_eq!(params.get_text("debugMode"), Some("1"));
    }

    #[test]
    fn test_list_options_params() {
        let after = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        let params = ListOptions::new()
            .uri_mask("/app/")
            .file_type("json")
            .file_type("yaml")
            .uploaded_after(after)
            .limit(50)
            .to_params();

        assert_eq!(params.get_text("uriMask"), Some("/app/"));
        assert_eq!(params.get_text("lastUploadedAfter"), Some("2024-03-01T12:00:00Z"));
        assert_eq!(params.get_text("limit"), Some("50"));
        match params.get("fileTypes[]") {
            Some(ParamValue::List(types)) => assert_eq!(types, &vec!["json".to_string(), "yaml".to_string()]),
            other => panic!("unexpected value: {other:?}"),
        }
        assert!(!params.contains_key("offset"));
    }

    #[test]
    fn test_import_options_apply() {
        let mut params = Params::new();
        ImportOptions::new()
            .translation_state("POST_TRANSLATION")
            .overwrite(true)
            .apply(&mut params);

        assert_eq!(params.get_text("translationState"), Some("POST_TRANSLATION"));
        assert_eq!(params.get_text("overwrite"), Some("true"));
    }
}
