//
//  smartling-files
//  lib.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Smartling Files Library
//!
//! A client library and command-line tool for the Smartling Files API v2.
//!
//! ## Overview
//!
//! The Files API stores translatable source files in a Smartling project and
//! serves their translations back. This library exposes every Files API
//! command as a method on [`FileApi`](api::FileApi): upload, import,
//! downloads for one, several or all locales, listing, status, rename,
//! delete and locale authorization.
//!
//! ## Module Structure
//!
//! - [`api`]: Command client, request shaping, endpoints and HTTP transport
//! - [`auth`]: Bearer token providers (Smartling auth API, static token)
//! - [`config`]: Configuration file management
//! - [`cli`]: Command-line interface definitions using clap
//! - [`output`]: Rendering of command results
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use smartling_files::api::FileApi;
//! use smartling_files::api::files::UploadData;
//! use smartling_files::Config;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let mut config = Config::load()?;
//! config.apply_env();
//!
//! let api = FileApi::new(&config.client_config()?)?;
//! let output = api
//!     .upload(&UploadData::new("./locales", "en.json", "json"))
//!     .await?;
//! println!("HTTP {}", output.status());
//! # Ok(())
//! # }
//! ```

/// Command-line interface definitions.
pub mod cli;

/// Files API client.
///
/// Shapes request parameters, resolves endpoint paths, attaches bearer
/// tokens and wraps responses. HTTP itself goes through a pluggable
/// transport.
pub mod api;

/// Bearer token providers.
pub mod auth;

/// Configuration file management.
///
/// - Linux: `~/.config/smartling/config.toml`
/// - macOS: `~/Library/Application Support/smartling/config.toml`
/// - Windows: `%APPDATA%\smartling\config.toml`
pub mod config;

/// Output formatting for command results.
pub mod output;

pub use cli::Cli;
pub use config::Config;

/// Application name constant.
///
/// # Value
///
/// `"sl"`
pub const APP_NAME: &str = "sl";

/// Application version constant.
///
/// # Example
///
/// ```rust
/// use smartling_files::VERSION;
///
/// println!("sl version {}", VERSION);
/// ```
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Exit codes for the CLI.
///
/// # Example
///
/// ```rust
/// use smartling_files::api::ApiError;
/// use smartling_files::exit_codes;
///
/// let err = anyhow::Error::from(ApiError::Authentication("expired".into()));
/// assert_eq!(exit_codes::for_error(&err), exit_codes::AUTH_ERROR);
/// ```
pub mod exit_codes {
    use crate::api::ApiError;

    /// Successful execution.
    pub const SUCCESS: i32 = 0;

    /// General error, including non-2xx responses from the service.
    pub const ERROR: i32 = 1;

    /// Invalid usage or arguments, including rejected parameter values.
    pub const USAGE: i32 = 2;

    /// A local file could not be read.
    pub const FILE_ERROR: i32 = 3;

    /// No access token could be obtained.
    ///
    /// Check `user_identifier` and `user_secret` with `sl config show`.
    pub const AUTH_ERROR: i32 = 4;

    /// The HTTP exchange itself failed.
    pub const NETWORK_ERROR: i32 = 32;

    /// Maps an application error to an exit code.
    pub fn for_error(error: &anyhow::Error) -> i32 {
        match error.downcast_ref::<ApiError>() {
            Some(ApiError::InvalidParameter { .. }) => USAGE,
            Some(ApiError::FileAccess { .. }) => FILE_ERROR,
            Some(ApiError::Authentication(_)) => AUTH_ERROR,
            Some(ApiError::Transport(_)) => NETWORK_ERROR,
            Some(ApiError::Config(_)) | None => ERROR,
        }
    }

}
