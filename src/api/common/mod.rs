//
//  smartling-files
//  api/common/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Common API Types for the Files API
//!
//! This module provides the types shared by every command: the error
//! taxonomy, the request parameter mapping and the response wrapper.
//!
//! # Overview
//!
//! - [`ApiError`] - Closed set of failures a command can report
//! - [`TransportError`] - Failures raised by the HTTP transport
//! - [`Params`] - Parameter mapping sent with every request (re-exported from [`params`])
//! - [`ApiResponse`] - Uniform response wrapper (re-exported from [`response`])
//!
//! # Example
//!
//! ```rust
//! use smartling_files::api::common::ApiError;
//!
//! fn handle_result<T>(result: Result<T, ApiError>) {
//!     match result {
//!         Ok(_) => println!("Success!"),
//!         Err(ApiError::Authentication(reason)) => println!("Please check your credentials: {}", reason),
//!         Err(ApiError::InvalidParameter { name, .. }) => println!("Bad value for {}", name),
//!         Err(e) => println!("Error: {}", e),
//!     }
//! }
//! ```
//!
//! # Notes
//!
//! - A non-2xx HTTP status is never an error; it is reported through
//!   [`ApiResponse::is_success`]
//! - Validation errors are raised before any network call is attempted

use std::path::PathBuf;

use thiserror::Error;

mod params;
mod response;

pub use params::*;
pub use response::*;

/// Result type used throughout the command layer.
pub type Result<T, E = ApiError> = std::result::Result<T, E>;

/// Unified error type for all Files API commands.
///
/// # Variants
///
/// | Variant | Raised when | Network call made |
/// |---------|-------------|-------------------|
/// | `Authentication` | No bearer token could be obtained | No |
/// | `InvalidParameter` | An enumerated parameter has an unknown value | No |
/// | `FileAccess` | The local file for an upload cannot be read | No |
/// | `Transport` | The HTTP exchange itself failed | Yes |
/// | `Config` | The client could not be configured | No |
///
/// # Example
///
/// ```rust
/// use smartling_files::api::common::ApiError;
///
/// let err = ApiError::invalid_parameter("retrievalType", "draft", &["pending", "published"]);
/// assert_eq!(
///     err.to_string(),
///     "Invalid value `draft` for parameter `retrievalType` (expected one of: pending, published)"
/// );
/// ```
#[derive(Error, Debug)]
pub enum ApiError {
    /// A bearer token could not be obtained for the command.
    ///
    /// # Parameters
    ///
    /// - `0` - Reason reported by the token provider
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// A parameter value is outside of its allowed domain.
    #[error("Invalid value `{value}` for parameter `{name}`{}", expected(.allowed))]
    InvalidParameter {
        /// Wire name of the offending parameter
        name: String,
        /// The rejected value
        value: String,
        /// Values the parameter accepts; empty when the domain is open
        allowed: Vec<String>,
    },

    /// The local file referenced by an upload could not be opened.
    #[error("Cannot read file {}: {source}", .path.display())]
    FileAccess {
        /// Path that was opened
        path: PathBuf,
        /// Underlying I/O failure
        #[source]
        source: std::io::Error,
    },

    /// The HTTP exchange failed. Propagated unchanged from the transport.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The client configuration is incomplete or malformed.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ApiError {
    /// Builds an [`ApiError::InvalidParameter`] from borrowed parts.
    pub fn invalid_parameter(name: &str, value: &str, allowed: &[&str]) -> Self {
        Self::InvalidParameter {
            name: name.to_string(),
            value: value.to_string(),
            allowed: allowed.iter().map(|a| a.to_string()).collect(),
        }
    }
}

fn expected(allowed: &[String]) -> String {
    if allowed.is_empty() {
        String::new()
    } else {
        format!(" (expected one of: {})", allowed.join(", "))
    }
}

/// Errors raised by a [`Transport`](crate::api::transport::Transport) implementation.
///
/// Covers connectivity, TLS and timeout failures. The command layer never
/// retries or suppresses these.
#[derive(Error, Debug)]
pub enum TransportError {
    /// A network-level error occurred during the request.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The request could not be encoded for the wire.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_parameter_message_without_domain() {
        let err = ApiError::invalid_parameter("localeId", "", &[]);
        assert_eq!(err.to_string(), "Invalid value `` for parameter `localeId`");
    }

    #[test]
    fn test_file_access_message() {
        let err = ApiError::FileAccess {
            path: PathBuf::from("/tmp/missing.json"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        };
        assert_eq!(err.to_string(), "Cannot read file /tmp/missing.json: not found");
    }

    #[test]
    fn test_transport_error_is_transparent() {
        let err: ApiError = TransportError::InvalidRequest("bad".to_string()).into();
        assert_eq!(err.to_string(), "Invalid request: bad");
    }
}
