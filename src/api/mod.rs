//
//  smartling-files
//  api/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # API Client Layer
//!
//! This module provides the client for the Smartling Files API v2, which
//! manages source files and their translations inside a project.
//!
//! ## Architecture
//!
//! The API layer is organized as follows:
//!
//! - [`client`]: One method per command, sharing a single request pipeline
//! - [`files`]: Inputs of the commands (upload data and options)
//! - [`urls`]: Endpoint table and per-request locale scoping
//! - [`transport`]: HTTP exchange abstraction and its reqwest implementation
//! - [`common`]: Shared types (parameters, responses, errors)
//!
//! ## Usage
//!
//! ```rust,no_run
//! use smartling_files::api::FileApi;
//! use smartling_files::api::files::ListOptions;
//! use smartling_files::config::ClientConfig;
//!
//! # async fn example() -> Result<(), smartling_files::api::ApiError> {
//! let api = FileApi::new(&ClientConfig::new("user-id", "user-secret", "project-id"))?;
//! let output = api.list(&ListOptions::new().uri_mask("/app/")).await?;
//! if let Some(response) = output.response() {
//!     println!("{} -> {:?}", response.status(), response.code());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! Commands fail with [`ApiError`] only when no exchange could be made or
//! completed:
//!
//! - `Authentication`: no bearer token
//! - `InvalidParameter`: an enumerated parameter has an unknown value
//! - `FileAccess`: the file to upload cannot be opened
//! - `Transport`: the HTTP exchange failed
//!
//! Any HTTP status the service answers with is returned in the output.

/// Command client.
pub mod client;

/// Shared parameter, response and error types.
pub mod common;

/// Command inputs.
pub mod files;

/// HTTP transport abstraction.
pub mod transport;

/// Endpoint paths and request context.
pub mod urls;

pub use client::{CommandOutput, FileApi};
pub use common::{ApiError, ApiResponse};
