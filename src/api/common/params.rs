//
//  smartling-files
//  api/common/params.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Request parameter mapping and the helpers that shape it.
//!
//! Every command builds a fresh [`Params`] value, fills it from its inputs and
//! hands it to the transport. Keys come from the [`keys`] vocabulary; keys the
//! caller adds through an options object's `extra` map are forwarded as-is.

use std::collections::btree_map::{self, BTreeMap};
use std::fmt;
use std::str::FromStr;

use super::ApiError;
use crate::api::files::Directive;

/// Wire names of the parameters understood by the Files API.
pub mod keys {
    pub const FILE_URI: &str = "fileUri";
    pub const FILE_URIS: &str = "fileUris[]";
    pub const NEW_FILE_URI: &str = "newFileUri";
    pub const FILE_TYPE: &str = "fileType";
    pub const FILE_TYPES: &str = "fileTypes[]";
    /// Multipart field carrying the file content.
    pub const FILE: &str = "file";
    /// Local path of the file to upload. Never sent over the wire.
    pub const FILE_PATH: &str = "filePath";
    pub const LOCALE: &str = "locale";
    pub const LOCALE_IDS: &str = "localeIds[]";
    pub const RETRIEVAL_TYPE: &str = "retrievalType";
    pub const INCLUDE_ORIGINAL_STRINGS: &str = "includeOriginalStrings";
    pub const FILE_NAME_MODE: &str = "fileNameMode";
    pub const LOCALE_MODE: &str = "localeMode";
    pub const ZIP_FILE_NAME: &str = "zipFileName";
    pub const APPROVED: &str = "approved";
    pub const CALLBACK_URL: &str = "callbackUrl";
    pub const LOCALES_TO_APPROVE: &str = "localesToApprove";
    pub const TRANSLATION_STATE: &str = "translationState";
    pub const OVERWRITE: &str = "overwrite";
    pub const URI_MASK: &str = "uriMask";
    pub const LAST_UPLOADED_AFTER: &str = "lastUploadedAfter";
    pub const LAST_UPLOADED_BEFORE: &str = "lastUploadedBefore";
    pub const ORDER_BY: &str = "orderBy";
    pub const LIMIT: &str = "limit";
    pub const OFFSET: &str = "offset";
}

/// Allowed values of `fileNameMode` for multi-locale downloads.
pub const FILE_NAME_MODES: &[&str] = &["UNCHANGED", "TRIM_LEADING", "LOCALE_LAST"];

/// Allowed values of `localeMode` for multi-locale downloads.
pub const LOCALE_MODES: &[&str] = &["LOCALE_IN_PATH", "LOCALE_IN_NAME", "LOCALE_IN_NAME_AND_PATH"];

/// An open local file travelling as the content of a multipart field.
///
/// The handle lives exactly as long as the request that carries it.
#[derive(Debug)]
pub struct FilePart {
    /// File name reported in the multipart `Content-Disposition`
    pub file_name: String,
    /// MIME type of the part
    pub mime: String,
    /// Open handle, streamed as the part body
    pub file: tokio::fs::File,
}

/// A single parameter value.
#[derive(Debug)]
pub enum ParamValue {
    /// Plain string value
    Text(String),
    /// Repeated key, one entry per value (e.g. `localeIds[]`)
    List(Vec<String>),
    /// Live file content for a multipart upload
    File(FilePart),
}

impl ParamValue {
    /// Returns the string value for [`ParamValue::Text`].
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(value) => Some(value),
            _ => None,
        }
    }
}

/// Ordered mapping from parameter name to value, built fresh per command.
///
/// # Example
///
/// ```rust
/// use smartling_files::api::common::{keys, Params};
///
/// let mut params = Params::new();
/// params.insert_text(keys::FILE_URI, "/strings/app.json");
/// params.insert_list(keys::LOCALE_IDS, ["fr-FR", "de-DE"]);
///
/// assert_eq!(params.get_text(keys::FILE_URI), Some("/strings/app.json"));
/// assert_eq!(params.len(), 2);
/// ```
#[derive(Debug, Default)]
pub struct Params {
    entries: BTreeMap<String, ParamValue>,
}

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`Params::insert_text`].
    pub fn with_text(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert_text(key, value);
        self
    }

    pub fn insert_text(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), ParamValue::Text(value.into()));
    }

    pub fn insert_list<I, S>(&mut self, key: impl Into<String>, values: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let values = values.into_iter().map(Into::into).collect();
        self.entries.insert(key.into(), ParamValue::List(values));
    }

    pub fn insert_file(&mut self, key: impl Into<String>, part: FilePart) {
        self.entries.insert(key.into(), ParamValue::File(part));
    }

    /// Copies every pass-through entry into the mapping.
    pub fn extend_text(&mut self, extra: &BTreeMap<String, String>) {
        for (key, value) in extra {
            self.insert_text(key.clone(), value.clone());
        }
    }

    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.entries.get(key)
    }

    pub fn get_text(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(ParamValue::as_text)
    }

    pub fn remove(&mut self, key: &str) -> Option<ParamValue> {
        self.entries.remove(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, ParamValue> {
        self.entries.iter()
    }

    /// Returns `true` if any value is a live file reference.
    pub fn has_file(&self) -> bool {
        self.entries.values().any(|v| matches!(v, ParamValue::File(_)))
    }
}

impl IntoIterator for Params {
    type Item = (String, ParamValue);
    type IntoIter = btree_map::IntoIter<String, ParamValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a Params {
    type Item = (&'a String, &'a ParamValue);
    type IntoIter = btree_map::Iter<'a, String, ParamValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Controls which translations a download contains.
///
/// | Variant | Wire value |
/// |---------|------------|
/// | `Pending` | `pending` |
/// | `Published` | `published` |
/// | `Pseudo` | `pseudo` |
/// | `ContextMatchingInstrumented` | `contextMatchingInstrumented` |
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetrievalType {
    Pending,
    Published,
    Pseudo,
    ContextMatchingInstrumented,
}

impl RetrievalType {
    pub const ALLOWED: &'static [&'static str] =
        &["pending", "published", "pseudo", "contextMatchingInstrumented"];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Published => "published",
            Self::Pseudo => "pseudo",
            Self::ContextMatchingInstrumented => "contextMatchingInstrumented",
        }
    }
}

impl fmt::Display for RetrievalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RetrievalType {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "published" => Ok(Self::Published),
            "pseudo" => Ok(Self::Pseudo),
            "contextMatchingInstrumented" => Ok(Self::ContextMatchingInstrumented),
            other => Err(ApiError::invalid_parameter(
                keys::RETRIEVAL_TYPE,
                other,
                Self::ALLOWED,
            )),
        }
    }
}

impl From<RetrievalType> for String {
    fn from(value: RetrievalType) -> Self {
        value.as_str().to_string()
    }
}

/// State imported translations are stored in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TranslationState {
    Published,
    PostTranslation,
}

impl TranslationState {
    pub const ALLOWED: &'static [&'static str] = &["PUBLISHED", "POST_TRANSLATION"];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Published => "PUBLISHED",
            Self::PostTranslation => "POST_TRANSLATION",
        }
    }
}

impl fmt::Display for TranslationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TranslationState {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PUBLISHED" => Ok(Self::Published),
            "POST_TRANSLATION" => Ok(Self::PostTranslation),
            other => Err(ApiError::invalid_parameter(
                keys::TRANSLATION_STATE,
                other,
                Self::ALLOWED,
            )),
        }
    }
}

impl From<TranslationState> for String {
    fn from(value: TranslationState) -> Self {
        value.as_str().to_string()
    }
}

/// Checks an enumerated parameter against its allowed values.
///
/// Absent parameters pass. A present value that is not a plain string or is
/// not in `allowed` fails with [`ApiError::InvalidParameter`].
pub fn validate_allowed(params: &Params, name: &str, allowed: &[&str]) -> Result<(), ApiError> {
    match params.get(name) {
        None => Ok(()),
        Some(ParamValue::Text(value)) if allowed.contains(&value.as_str()) => Ok(()),
        Some(ParamValue::Text(value)) => Err(ApiError::invalid_parameter(name, value, allowed)),
        Some(ParamValue::List(values)) => Err(ApiError::invalid_parameter(
            name,
            &values.join(","),
            allowed,
        )),
        Some(ParamValue::File(part)) => {
            Err(ApiError::invalid_parameter(name, &part.file_name, allowed))
        }
    }
}

/// Adds each directive under its namespaced key (`prefix + name`).
pub fn flatten_directives(params: &mut Params, directives: &[Directive]) {
    for directive in directives {
        params.insert_text(directive.key(), directive.value.clone());
    }
}

/// Adds each locale under an indexed `localesToApprove[i]` key, preserving order.
pub fn flatten_locales_to_approve(params: &mut Params, locales: &[String]) {
    for (index, locale) in locales.iter().enumerate() {
        params.insert_text(
            format!("{}[{}]", keys::LOCALES_TO_APPROVE, index),
            locale.clone(),
        );
    }
}
