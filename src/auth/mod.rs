//
//  smartling-files
//  auth/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Authentication Module
//!
//! Every Files API command carries an `Authorization: Bearer <token>` header.
//! The command layer obtains that token through the [`TokenProvider`] trait
//! and assumes nothing about how it is produced or cached.
//!
//! ## Providers
//!
//! - [`AuthClient`]: exchanges a user identifier and secret for tokens with
//!   the Smartling authentication API and refreshes them as they expire.
//! - [`StaticToken`]: a fixed, pre-obtained token.
//!
//! ## Example
//!
//! ```rust,no_run
//! use smartling_files::auth::{AuthClient, TokenProvider};
//!
//! # async fn example() -> Result<(), smartling_files::api::common::ApiError> {
//! let auth = AuthClient::new("https://api.smartling.com", "user-id", "user-secret", None)?;
//! if let Some(token) = auth.access_token().await? {
//!     println!("Got a token of {} characters", token.len());
//! }
//! # Ok(())
//! # }
//! ```

mod token;

pub use token::*;

use async_trait::async_trait;

use crate::api::common::ApiError;

/// Source of bearer tokens for API commands.
///
/// `Ok(None)` means no token is available. The command layer treats that as
/// an authentication failure and performs no network call.
#[async_trait]
pub trait TokenProvider: Send + Sync {
    async fn access_token(&self) -> Result<Option<String>, ApiError>;
}

/// A fixed token, or none at all.
///
/// # Example
///
/// ```rust
/// use smartling_files::auth::StaticToken;
///
/// let token = StaticToken::new("eyJhbGciOi...");
/// let missing = StaticToken::none();
/// ```
#[derive(Debug, Clone, Default)]
pub struct StaticToken {
    token: Option<String>,
}

impl StaticToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: Some(token.into()),
        }
    }

    pub fn none() -> Self {
        Self { token: None }
    }
}

#[async_trait]
impl TokenProvider for StaticToken {
    async fn access_token(&self) -> Result<Option<String>, ApiError> {
        Ok(self.token.clone())
    }
}

/// Formats the `Authorization` header for a bearer token.
pub fn bearer_header(token: &str) -> (String, String) {
    ("Authorization".to_string(), format!("Bearer {}", token))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bearer_header() {
        assert_eq!(
            bearer_header("abc"),
            ("Authorization".to_string(), "Bearer abc".to_string())
        );
    }

    #[tokio::test]
    async fn test_static_token() {
        assert_eq!(StaticToken::new("t").access_token().await.unwrap(), Some("t".to_string()));
        assert_eq!(StaticToken::none().access_token().await.unwrap(), None);
    }
}
