//
//  smartling-files
//  api/urls.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Endpoint Resolution
//!
//! Maps a logical [`Endpoint`] and a per-request [`RequestContext`] to a path
//! under `/files-api/v2/projects/{projectId}`.
//!
//! The locale a path is scoped to travels in the context value built for each
//! command, never in shared client state, so two commands running on the same
//! client cannot observe each other's locale.
//!
//! | Endpoint | Path (relative to the project) |
//! |----------|--------------------------------|
//! | `Upload`, `GetOriginal` | `/file` |
//! | `Get` | `/locales/{localeId}/file` |
//! | `GetMultipleLocales` | `/files/zip` |
//! | `GetAllLocalesZip` | `/locales/all/file/zip` |
//! | `GetAllLocalesCsv` | `/locales/all/file` |
//! | `ListFiles` | `/files/list` |
//! | `ListFileTypes` | `/file-types` |
//! | `Import` | `/locales/{localeId}/file/import` |
//! | `Status` | `/locales/{localeId}/file/status` or `/file/status` |
//! | `Rename` | `/file/rename` |
//! | `Delete` | `/file/delete` |
//! | `LastModified` | `/locales/{localeId}/file/last-modified` or `/file/last-modified` |
//! | `AuthorizedLocales` | `/file/authorized-locales` |

use std::fmt;

use crate::api::common::ApiError;

/// Root of every Files API v2 path.
pub const FILES_API_BASE: &str = "/files-api/v2/projects";

/// Operations exposed by the Files API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Upload,
    Get,
    GetMultipleLocales,
    GetAllLocalesZip,
    GetAllLocalesCsv,
    GetOriginal,
    ListFiles,
    ListFileTypes,
    Import,
    Status,
    Rename,
    Delete,
    LastModified,
    AuthorizedLocales,
}

impl Endpoint {
    /// Every endpoint, in declaration order.
    pub const ALL: [Endpoint; 14] = [
        Endpoint::Upload,
        Endpoint::Get,
        Endpoint::GetMultipleLocales,
        Endpoint::GetAllLocalesZip,
        Endpoint::GetAllLocalesCsv,
        Endpoint::GetOriginal,
        Endpoint::ListFiles,
        Endpoint::ListFileTypes,
        Endpoint::Import,
        Endpoint::Status,
        Endpoint::Rename,
        Endpoint::Delete,
        Endpoint::LastModified,
        Endpoint::AuthorizedLocales,
    ];

    /// Stable operation key, e.g. `GET_ALL_LOCALES_ZIP`.
    pub fn key(self) -> &'static str {
        match self {
            Self::Upload => "UPLOAD",
            Self::Get => "GET",
            Self::GetMultipleLocales => "GET_MULTIPLE_LOCALES",
            Self::GetAllLocalesZip => "GET_ALL_LOCALES_ZIP",
            Self::GetAllLocalesCsv => "GET_ALL_LOCALES_CSV",
            Self::GetOriginal => "GET_ORIGINAL",
            Self::ListFiles => "LIST_FILES",
            Self::ListFileTypes => "LIST_FILE_TYPES",
            Self::Import => "IMPORT",
            Self::Status => "STATUS",
            Self::Rename => "RENAME",
            Self::Delete => "DELETE",
            Self::LastModified => "LAST_MODIFIED",
            Self::AuthorizedLocales => "AUTHORIZED_LOCALES",
        }
    }

    /// Resolves the endpoint to a path for the given context.
    ///
    /// # Errors
    ///
    /// `Get` and `Import` require [`LocaleScope::Locale`]; resolving them with
    /// any other scope fails with [`ApiError::InvalidParameter`] instead of
    /// producing a path with a placeholder locale.
    ///
    /// # Example
    ///
    /// ```rust
    /// use smartling_files::api::urls::{Endpoint, RequestContext};
    ///
    /// let ctx = RequestContext::new("abc123").with_locale("fr-FR");
    /// assert_eq!(
    ///     Endpoint::Get.path(&ctx)?,
    ///     "/files-api/v2/projects/abc123/locales/fr-FR/file"
    /// );
    /// # Ok::<(), smartling_files::api::common::ApiError>(())
    /// ```
    pub fn path(self, ctx: &RequestContext) -> Result<String, ApiError> {
        let base = format!("{}/{}", FILES_API_BASE, ctx.project_id());

        let path = match self {
            Self::Upload | Self::GetOriginal => format!("{base}/file"),
            Self::Get => format!("{base}/locales/{}/file", ctx.require_locale()?),
            Self::GetMultipleLocales => format!("{base}/files/zip"),
            Self::GetAllLocalesZip => format!("{base}/locales/all/file/zip"),
            Self::GetAllLocalesCsv => format!("{base}/locales/all/file"),
            Self::ListFiles => format!("{base}/files/list"),
            Self::ListFileTypes => format!("{base}/file-types"),
            Self::Import => format!("{base}/locales/{}/file/import", ctx.require_locale()?),
            Self::Status => match ctx.locale() {
                LocaleScope::Locale(_) => {
                    format!("{base}/locales/{}/file/status", ctx.require_locale()?)
                }
                _ => format!("{base}/file/status"),
            },
            Self::Rename => format!("{base}/file/rename"),
            Self::Delete => format!("{base}/file/delete"),
            Self::LastModified => match ctx.locale() {
                LocaleScope::Locale(_) => {
                    format!("{base}/locales/{}/file/last-modified", ctx.require_locale()?)
                }
                _ => format!("{base}/file/last-modified"),
            },
            Self::AuthorizedLocales => format!("{base}/file/authorized-locales"),
        };

        Ok(path)
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Maps an endpoint and a request context to a path.
///
/// [`FilesApiV2`] is the table above. Another implementation can point the
/// client at a different API version or a test server layout.
pub trait UrlBuilder: Send + Sync {
    fn path(&self, endpoint: Endpoint, ctx: &RequestContext) -> Result<String, ApiError>;
}

/// The Files API v2 path table.
#[derive(Debug, Clone, Copy, Default)]
pub struct FilesApiV2;

impl UrlBuilder for FilesApiV2 {
    fn path(&self, endpoint: Endpoint, ctx: &RequestContext) -> Result<String, ApiError> {
        endpoint.path(ctx)
    }
}

/// Locale a request is scoped to.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LocaleScope {
    /// No locale chosen yet
    #[default]
    Unset,
    /// A single locale, e.g. `fr-FR`
    Locale(String),
    /// Locale-agnostic endpoints
    AllLocales,
}

/// Immutable per-command context used to resolve endpoint paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    project_id: String,
    locale: LocaleScope,
}

impl RequestContext {
    /// Creates a context for `project_id` with the locale unset.
    pub fn new(project_id: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            locale: LocaleScope::Unset,
        }
    }

    /// Returns a copy scoped to a single locale.
    pub fn with_locale(&self, locale: impl Into<String>) -> Self {
        Self {
            project_id: self.project_id.clone(),
            locale: LocaleScope::Locale(locale.into()),
        }
    }

    /// Returns a copy scoped to all locales.
    pub fn all_locales(&self) -> Self {
        Self {
            project_id: self.project_id.clone(),
            locale: LocaleScope::AllLocales,
        }
    }

    pub fn project_id(&self) -> &str {
        &self.project_id
    }

    pub fn locale(&self) -> &LocaleScope {
        &self.locale
    }

    /// The single locale this context is scoped to.
    ///
    /// A locale becomes a path segment, so only ASCII letters, digits, `-` and
    /// `_` are accepted.
    fn require_locale(&self) -> Result<&str, ApiError> {
        match &self.locale {
            LocaleScope::Locale(locale) if is_locale_segment(locale) => Ok(locale),
            LocaleScope::Locale(locale) => Err(ApiError::invalid_parameter("localeId", locale, &[])),
            LocaleScope::Unset => Err(ApiError::invalid_parameter("localeId", "<unset>", &[])),
            LocaleScope::AllLocales => Err(ApiError::invalid_parameter("localeId", "<all>", &[])),
        }
    }
}

fn is_locale_segment(locale: &str) -> bool {
    !locale.is_empty()
        && locale
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx() -> RequestContext {
        RequestContext::new("p1")
    }

    #[test]
    fn test_single_locale_then_all_locales() {
        let scoped = ctx().with_locale("L1");
        let single = Endpoint::Get.path(&scoped).unwrap();
        assert_eq!(single, "/files-api/v2/projects/p1/locales/L1/file");

        let all = scoped.all_locales();
        assert_eq!(all.locale(), &LocaleScope::AllLocales);
        let zip = Endpoint::GetAllLocalesZip.path(&all).unwrap();
        assert!(!zip.contains("L1"));
        assert_eq!(zip, "/files-api/v2/projects/p1/locales/all/file/zip");

        let modified = Endpoint::LastModified.path(&all).unwrap();
        assert_eq!(modified, "/files-api/v2/projects/p1/file/last-modified");
    }

    #[test]
    fn test_locale_scoped_paths() {
        let scoped = ctx().with_locale("de-DE");
        assert_eq!(
            Endpoint::Import.path(&scoped).unwrap(),
            "/files-api/v2/projects/p1/locales/de-DE/file/import"
        );
        assert_eq!(
            Endpoint::Status.path(&scoped).unwrap(),
            "/files-api/v2/projects/p1/locales/de-DE/file/status"
        );
        assert_eq!(
            Endpoint::LastModified.path(&scoped).unwrap(),
            "/files-api/v2/projects/p1/locales/de-DE/file/last-modified"
        );
    }

    #[test]
    fn test_locale_agnostic_paths_ignore_locale() {
        let scoped = ctx().with_locale("de-DE");
        assert_eq!(Endpoint::Upload.path(&scoped).unwrap(), "/files-api/v2/projects/p1/file");
        assert_eq!(
            Endpoint::GetMultipleLocales.path(&scoped).unwrap(),
            "/files-api/v2/projects/p1/files/zip"
        );
        assert_eq!(Endpoint::ListFileTypes.path(&ctx()).unwrap(), "/files-api/v2/projects/p1/file-types");
        assert_eq!(
            Endpoint::AuthorizedLocales.path(&ctx()).unwrap(),
            "/files-api/v2/projects/p1/file/authorized-locales"
        );
        assert_eq!(
            Endpoint::GetAllLocalesCsv.path(&ctx()).unwrap(),
            "/files-api/v2/projects/p1/locales/all/file"
        );
    }

    #[test]
    fn test_unset_locale_is_rejected() {
        assert!(matches!(
            Endpoint::Get.path(&ctx()),
            Err(ApiError::InvalidParameter { .. })
        ));
        assert!(Endpoint::Import.path(&ctx().all_locales()).is_err());
        assert!(Endpoint::Get.path(&ctx().with_locale("")).is_err());
        assert!(Endpoint::Get.path(&ctx().with_locale("fr/../x")).is_err());
    }

    #[test]
    fn test_locale_cannot_alter_url() {
        for locale in ["fr?x", "fr#x", "fr%2Fx", "fr x", "fr\\x", "fr.FR"] {
            assert!(
                Endpoint::Get.path(&ctx().with_locale(locale)).is_err(),
                "{locale}"
            );
            assert!(Endpoint::Import.path(&ctx().with_locale(locale)).is_err());
            assert!(Endpoint::Status.path(&ctx().with_locale(locale)).is_err());
            assert!(Endpoint::LastModified.path(&ctx().with_locale(locale)).is_err());
        }
        assert_eq!(
            Endpoint::Get.path(&ctx().with_locale("zh-Hans-CN")).unwrap(),
            "/files-api/v2/projects/p1/locales/zh-Hans-CN/file"
        );
    }

    #[test]
    fn test_every_endpoint_resolves_with_locale() {
        let scoped = ctx().with_locale("fr-FR");
        for endpoint in Endpoint::ALL {
            let path = endpoint.path(&scoped).unwrap();
            assert!(path.starts_with("/files-api/v2/projects/p1/"), "{endpoint}: {path}");
        }
    }
}
