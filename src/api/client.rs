//
//  smartling-files
//  api/client.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # File Command Client
//!
//! [`FileApi`] exposes one method per Files API operation. Every method
//! follows the same steps:
//!
//! 1. Shape a fresh [`Params`] mapping from its inputs
//! 2. Validate enumerated parameters (no network call on failure)
//! 3. Resolve the endpoint path for a per-call [`RequestContext`]
//! 4. Obtain a bearer token from the [`TokenProvider`]
//! 5. Perform exactly one exchange through the [`Transport`]
//! 6. Wrap the result in a [`CommandOutput`]
//!
//! Non-2xx responses are returned, not raised; check
//! [`CommandOutput::is_success`].

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use reqwest::Method;
use tracing::debug;

use crate::api::common::{
    flatten_directives, flatten_locales_to_approve, keys, validate_allowed, ApiError,
    ApiResponse, FilePart, ParamValue, Params, Result, RetrievalType, TranslationState,
    FILE_NAME_MODES, LOCALE_MODES,
};
use crate::api::files::{DownloadOptions, ImportOptions, ListOptions, UploadData};
use crate::api::transport::{Encoding, RawResponse, Request, ReqwestTransport, Transport};
use crate::api::urls::{Endpoint, FilesApiV2, RequestContext, UrlBuilder};
use crate::auth::{bearer_header, AuthClient, TokenProvider};
use crate::config::ClientConfig;

const UPLOAD_MIME: &str = "application/octet-stream";
const IMPORT_MIME: &str = "text/plain";

/// Result of a command: the wrapped response, or the raw pair in raw mode.
#[derive(Debug, Clone)]
pub enum CommandOutput {
    /// Normal mode
    Response(ApiResponse),
    /// Raw mode: body and status exactly as the transport returned them
    Raw { body: Vec<u8>, status: u16 },
}

impl CommandOutput {
    pub fn status(&self) -> u16 {
        match self {
            Self::Response(response) => response.status(),
            Self::Raw { status, .. } => *status,
        }
    }

    /// Returns `true` for 2xx statuses.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status())
    }

    pub fn body(&self) -> &[u8] {
        match self {
            Self::Response(response) => response.body(),
            Self::Raw { body, .. } => body,
        }
    }

    /// The wrapped response, unless the client is in raw mode.
    pub fn response(&self) -> Option<&ApiResponse> {
        match self {
            Self::Response(response) => Some(response),
            Self::Raw { .. } => None,
        }
    }

    pub fn into_response(self) -> Option<ApiResponse> {
        match self {
            Self::Response(response) => Some(response),
            Self::Raw { .. } => None,
        }
    }
}

/// Client for the Smartling Files API v2.
///
/// # Example
///
/// ```rust,no_run
/// use smartling_files::api::FileApi;
/// use smartling_files::api::files::{DownloadOptions, UploadData};
/// use smartling_files::config::ClientConfig;
///
/// # async fn example() -> Result<(), smartling_files::api::common::ApiError> {
/// let config = ClientConfig::new("user-id", "user-secret", "project-id");
/// let api = FileApi::new(&config)?;
///
/// let upload = UploadData::new("./locales", "en.json", "json").approve(true);
/// let output = api.upload(&upload).await?;
/// println!("upload status: {}", output.status());
///
/// let output = api
///     .get("en.json", "fr-FR", &DownloadOptions::new().retrieval_type("published"))
///     .await?;
/// std::fs::write("fr.json", output.body()).ok();
/// # Ok(())
/// # }
/// ```
///
/// # Concurrency
///
/// Locale scoping is carried by a value built per call, so a single client
/// may run commands concurrently.
pub struct FileApi {
    host: String,
    project_id: String,
    transport: Arc<dyn Transport>,
    tokens: Arc<dyn TokenProvider>,
    urls: Arc<dyn UrlBuilder>,
    raw_mode: bool,
    api_keys: BTreeMap<String, String>,
}

impl FileApi {
    /// Creates a client using the reqwest transport and the Smartling auth API.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let transport = ReqwestTransport::with_options(config.proxy.as_ref(), config.timeout)?;
        let tokens = AuthClient::new(
            &config.host,
            &config.user_identifier,
            &config.user_secret,
            config.proxy.as_ref(),
        )?;

        let mut api = Self::with_parts(
            &config.host,
            &config.project_id,
            Arc::new(transport),
            Arc::new(tokens),
        );
        api.raw_mode = config.response_as_string;
        api.api_keys = config.api_keys.clone();
        Ok(api)
    }

    /// Creates a client from explicit collaborators.
    pub fn with_parts(
        host: &str,
        project_id: &str,
        transport: Arc<dyn Transport>,
        tokens: Arc<dyn TokenProvider>,
    ) -> Self {
        Self {
            host: host.trim_end_matches('/').to_string(),
            project_id: project_id.to_string(),
            transport,
            tokens,
            urls: Arc::new(FilesApiV2),
            raw_mode: false,
            api_keys: BTreeMap::new(),
        }
    }

    /// Replaces the endpoint path table.
    pub fn with_url_builder(mut self, urls: Arc<dyn UrlBuilder>) -> Self {
        self.urls = urls;
        self
    }

    /// Builder form of [`FileApi::set_raw_mode`].
    pub fn raw_mode(mut self, raw: bool) -> Self {
        self.raw_mode = raw;
        self
    }

    /// When set, every subsequent command returns [`CommandOutput::Raw`].
    pub fn set_raw_mode(&mut self, raw: bool) {
        self.raw_mode = raw;
    }

    pub fn is_raw_mode(&self) -> bool {
        self.raw_mode
    }

    /// Adds a key sent with every import.
    pub fn with_api_key(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.api_keys.insert(name.into(), value.into());
        self
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn project_id(&self) -> &str {
        &self.project_id
    }

    /// Context with the locale unset.
    pub fn context(&self) -> RequestContext {
        RequestContext::new(&self.project_id)
    }

    /// Full URL of `endpoint` under `ctx`.
    pub fn url(&self, endpoint: Endpoint, ctx: &RequestContext) -> Result<String> {
        Ok(format!("{}{}", self.host, self.urls.path(endpoint, ctx)?))
    }

    // Commands

    /// Uploads a source file.
    pub async fn upload(&self, upload: &UploadData) -> Result<CommandOutput> {
        let params = upload_params(upload);
        self.upload_multipart(Endpoint::Upload, &self.context(), params, UPLOAD_MIME)
            .await
    }

    /// Imports existing translations of a file for `locale`.
    pub async fn import(
        &self,
        upload: &UploadData,
        locale: &str,
        options: &ImportOptions,
    ) -> Result<CommandOutput> {
        let mut params = upload_params(upload);
        options.apply(&mut params);
        params.insert_text(keys::LOCALE, locale);
        params.extend_text(&self.api_keys);
        validate_allowed(&params, keys::TRANSLATION_STATE, TranslationState::ALLOWED)?;

        let ctx = self.context().with_locale(locale);
        self.upload_multipart(Endpoint::Import, &ctx, params, IMPORT_MIME)
            .await
    }

    /// Downloads the translation of a file for a single locale.
    pub async fn get(
        &self,
        file_uri: &str,
        locale: &str,
        options: &DownloadOptions,
    ) -> Result<CommandOutput> {
        let mut params = options.to_params();
        params.insert_text(keys::FILE_URI, file_uri);
        validate_allowed(&params, keys::RETRIEVAL_TYPE, RetrievalType::ALLOWED)?;

        let ctx = self.context().with_locale(locale);
        self.command(Method::GET, Endpoint::Get, &ctx, params).await
    }

    /// Downloads translations for several locales as a ZIP archive.
    pub async fn get_multiple_locales(
        &self,
        file_uri: &str,
        locale_ids: &[String],
        options: &DownloadOptions,
    ) -> Result<CommandOutput> {
        let mut params = options.to_params();
        params.insert_list(keys::FILE_URIS, [file_uri]);
        params.insert_list(keys::LOCALE_IDS, locale_ids.iter().cloned());
        validate_allowed(&params, keys::RETRIEVAL_TYPE, RetrievalType::ALLOWED)?;
        validate_allowed(&params, keys::FILE_NAME_MODE, FILE_NAME_MODES)?;
        validate_allowed(&params, keys::LOCALE_MODE, LOCALE_MODES)?;

        let ctx = self.context().all_locales();
        self.command(Method::GET, Endpoint::GetMultipleLocales, &ctx, params)
            .await
    }

    /// Downloads translations for every locale as a ZIP archive.
    pub async fn get_all_locales_zip(
        &self,
        file_uri: &str,
        options: &DownloadOptions,
    ) -> Result<CommandOutput> {
        self.get_all_locales(Endpoint::GetAllLocalesZip, file_uri, options)
            .await
    }

    /// Downloads translations for every locale as a single CSV file.
    pub async fn get_all_locales_csv(
        &self,
        file_uri: &str,
        options: &DownloadOptions,
    ) -> Result<CommandOutput> {
        self.get_all_locales(Endpoint::GetAllLocalesCsv, file_uri, options)
            .await
    }

    /// Downloads the originally uploaded file.
    ///
    /// `params` carries any extra parameters; `fileUri` is set from `file_uri`.
    pub async fn get_original(&self, file_uri: &str, params: Params) -> Result<CommandOutput> {
        let mut params = params;
        params.insert_text(keys::FILE_URI, file_uri);

        let ctx = self.context().all_locales();
        self.command(Method::GET, Endpoint::GetOriginal, &ctx, params)
            .await
    }

    /// Lists the project's files.
    pub async fn list(&self, options: &ListOptions) -> Result<CommandOutput> {
        self.command(Method::GET, Endpoint::ListFiles, &self.context(), options.to_params())
            .await
    }

    /// Lists the file types used in the project.
    pub async fn list_file_types(&self) -> Result<CommandOutput> {
        self.command(Method::GET, Endpoint::ListFileTypes, &self.context(), Params::new())
            .await
    }

    /// Last modification dates of a file's translations.
    ///
    /// With `locale`, only that locale is reported.
    pub async fn last_modified(&self, file_uri: &str, locale: Option<&str>) -> Result<CommandOutput> {
        let mut params = Params::new().with_text(keys::FILE_URI, file_uri);
        let ctx = match locale {
            Some(locale) => {
                params.insert_text(keys::LOCALE, locale);
                self.context().with_locale(locale)
            }
            None => self.context().all_locales(),
        };
        self.command(Method::GET, Endpoint::LastModified, &ctx, params)
            .await
    }

    /// Deletes a file and its translations.
    pub async fn delete(&self, file_uri: &str) -> Result<CommandOutput> {
        let params = Params::new().with_text(keys::FILE_URI, file_uri);
        self.command(Method::POST, Endpoint::Delete, &self.context(), params)
            .await
    }

    /// Translation status of a file for one locale.
    pub async fn status(&self, file_uri: &str, locale: &str) -> Result<CommandOutput> {
        let params = Params::new()
            .with_text(keys::FILE_URI, file_uri)
            .with_text(keys::LOCALE, locale);
        let ctx = self.context().with_locale(locale);
        self.command(Method::POST, Endpoint::Status, &ctx, params).await
    }

    /// Translation status of a file across all locales.
    pub async fn status_all_locales(&self, file_uri: &str) -> Result<CommandOutput> {
        let params = Params::new().with_text(keys::FILE_URI, file_uri);
        let ctx = self.context().all_locales();
        self.command(Method::GET, Endpoint::Status, &ctx, params).await
    }

    /// Renames a file.
    pub async fn rename(&self, file_uri: &str, new_uri: &str) -> Result<CommandOutput> {
        let params = Params::new()
            .with_text(keys::FILE_URI, file_uri)
            .with_text(keys::NEW_FILE_URI, new_uri);
        self.command(Method::POST, Endpoint::Rename, &self.context(), params)
            .await
    }

    /// Locales a file is authorized for.
    pub async fn authorized_locales(&self, file_uri: &str) -> Result<CommandOutput> {
        let params = Params::new().with_text(keys::FILE_URI, file_uri);
        self.command(Method::GET, Endpoint::AuthorizedLocales, &self.context(), params)
            .await
    }

    /// Authorizes a file for translation into `locale_ids`.
    pub async fn authorize_locales(&self, file_uri: &str, locale_ids: &[String]) -> Result<CommandOutput> {
        let params = locale_list_params(file_uri, locale_ids);
        self.command(Method::PUT, Endpoint::AuthorizedLocales, &self.context(), params)
            .await
    }

    /// Removes authorization of a file for `locale_ids`.
    pub async fn unauthorize_locales(&self, file_uri: &str, locale_ids: &[String]) -> Result<CommandOutput> {
        let params = locale_list_params(file_uri, locale_ids);
        self.command(Method::DELETE, Endpoint::AuthorizedLocales, &self.context(), params)
            .await
    }

    // Plumbing

    async fn get_all_locales(
        &self,
        endpoint: Endpoint,
        file_uri: &str,
        options: &DownloadOptions,
    ) -> Result<CommandOutput> {
        let mut params = options.to_params();
        params.insert_text(keys::FILE_URI, file_uri);
        validate_allowed(&params, keys::RETRIEVAL_TYPE, RetrievalType::ALLOWED)?;

        let ctx = self.context().all_locales();
        self.command(Method::GET, endpoint, &ctx, params).await
    }

    async fn command(
        &self,
        method: Method,
        endpoint: Endpoint,
        ctx: &RequestContext,
        params: Params,
    ) -> Result<CommandOutput> {
        let url = self.url(endpoint, ctx)?;
        let headers = self.auth_headers().await?;

        debug!(%endpoint, %method, %url, "sending command");
        self.send(Request {
            method,
            url,
            params,
            encoding: Encoding::Plain,
            headers,
        })
        .await
    }

    /// Replaces the `filePath` entry with the opened file and posts the
    /// parameters as multipart form data.
    async fn upload_multipart(
        &self,
        endpoint: Endpoint,
        ctx: &RequestContext,
        mut params: Params,
        mime: &str,
    ) -> Result<CommandOutput> {
        let url = self.url(endpoint, ctx)?;

        let path = match params.remove(keys::FILE_PATH) {
            Some(ParamValue::Text(path)) => PathBuf::from(path),
            _ => return Err(ApiError::invalid_parameter(keys::FILE_PATH, "", &[])),
        };
        let part = open_file_part(&path, mime).await?;
        params.insert_file(keys::FILE, part);

        let headers = self.auth_headers().await?;

        debug!(%endpoint, %url, path = %path.display(), "uploading file");
        self.send(Request {
            method: Method::POST,
            url,
            params,
            encoding: Encoding::Multipart,
            headers,
        })
        .await
    }

    async fn auth_headers(&self) -> Result<Vec<(String, String)>> {
        match self.tokens.access_token().await? {
            Some(token) if !token.is_empty() => Ok(vec![bearer_header(&token)]),
            _ => Err(ApiError::Authentication(
                "no access token available".to_string(),
            )),
        }
    }

    async fn send(&self, request: Request) -> Result<CommandOutput> {
        let raw = self.transport.send(request).await?;
        debug!(status = raw.status, bytes = raw.body.len(), "command completed");
        Ok(self.wrap(raw))
    }

    fn wrap(&self, raw: RawResponse) -> CommandOutput {
        if self.raw_mode {
            CommandOutput::Raw {
                body: raw.body,
                status: raw.status,
            }
        } else {
            CommandOutput::Response(ApiResponse::new(raw.body, raw.status))
        }
    }
}

/// Parameters shared by upload and import.
fn upload_params(upload: &UploadData) -> Params {
    let mut params = Params::new()
        .with_text(keys::FILE_URI, upload.file_uri())
        .with_text(keys::FILE_TYPE, upload.file_type.as_str())
        .with_text(keys::FILE_PATH, upload.local_path().to_string_lossy());

    if upload.approve_content {
        params.insert_text(keys::APPROVED, "true");
    }
    if let Some(url) = upload.callback_url.as_deref().filter(|u| !u.is_empty()) {
        params.insert_text(keys::CALLBACK_URL, url);
    }
    flatten_directives(&mut params, &upload.directives);
    flatten_locales_to_approve(&mut params, &upload.locales_to_approve);
    params
}

fn locale_list_params(file_uri: &str, locale_ids: &[String]) -> Params {
    let mut params = Params::new().with_text(keys::FILE_URI, file_uri);
    params.insert_list(keys::LOCALE_IDS, locale_ids.iter().cloned());
    params
}

async fn open_file_part(path: &Path, mime: &str) -> Result<FilePart> {
    let file_access = |source| ApiError::FileAccess {
        path: path.to_path_buf(),
        source,
    };

    let file = tokio::fs::File::open(path).await.map_err(file_access)?;
    let metadata = file.metadata().await.map_err(file_access)?;
    if !metadata.is_file() {
        return Err(file_access(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            "not a regular file",
        )));
    }

    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    Ok(FilePart {
        file_name,
        mime: mime.to_string(),
        file,
    })
}
