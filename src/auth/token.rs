//
//  smartling-files
//  auth/token.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Token Authentication Against the Smartling Auth API
//!
//! Smartling issues short-lived access tokens in exchange for a user
//! identifier and secret, together with a longer-lived refresh token.
//!
//! ## Flow
//!
//! 1. **Authenticate**: `POST {host}/auth-api/v2/authenticate` with
//!    `{"userIdentifier": ..., "userSecret": ...}`
//! 2. **Use**: send `Authorization: Bearer {accessToken}` with each command
//! 3. **Refresh**: once the access token expires,
//!    `POST {host}/auth-api/v2/authenticate/refresh` with `{"refreshToken": ...}`
//! 4. **Re-authenticate**: when the refresh token has expired too, or the
//!    refresh is rejected
//!
//! Both endpoints answer with the standard envelope:
//!
//! ```json
//! {"response": {"code": "SUCCESS", "data": {
//!     "accessToken": "...", "refreshToken": "...",
//!     "expiresIn": 480, "refreshExpiresIn": 21600
//! }}}
//! ```

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use reqwest::{Client, Proxy};
use serde::Deserialize;
use serde_json::{json, Value};
use tokio::sync::Mutex;
use tracing::{debug, warn};
use url::Url;

use super::TokenProvider;
use crate::api::common::{ApiError, ApiResponse, TransportError};

const AUTHENTICATE_PATH: &str = "/auth-api/v2/authenticate";
const REFRESH_PATH: &str = "/auth-api/v2/authenticate/refresh";

/// Tokens are treated as expired this many seconds early.
const EXPIRY_MARGIN_SECS: i64 = 30;

/// Access and refresh tokens issued by the auth API.
#[derive(Debug, Clone)]
pub struct Tokens {
    /// Bearer token for API commands
    pub access_token: String,
    /// Token used to obtain a new access token
    pub refresh_token: String,
    /// When `access_token` stops being accepted
    pub expires_at: DateTime<Utc>,
    /// When `refresh_token` stops being accepted
    pub refresh_expires_at: DateTime<Utc>,
}

impl Tokens {
    fn access_valid_at(&self, now: DateTime<Utc>) -> bool {
        now + Duration::seconds(EXPIRY_MARGIN_SECS) < self.expires_at
    }

    fn refresh_valid_at(&self, now: DateTime<Utc>) -> bool {
        now + Duration::seconds(EXPIRY_MARGIN_SECS) < self.refresh_expires_at
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct TokenData {
    access_token: String,
    refresh_token: String,
    expires_in: i64,
    refresh_expires_in: i64,
}

/// [`TokenProvider`] that authenticates with a user identifier and secret.
///
/// Tokens are cached and refreshed on demand. The cache sits behind an async
/// mutex, so one client may serve concurrent commands.
pub struct AuthClient {
    http: Client,
    host: String,
    user_identifier: String,
    user_secret: String,
    tokens: Mutex<Option<Tokens>>,
}

impl AuthClient {
    /// Creates an auth client for `host` (e.g. `https://api.smartling.com`).
    pub fn new(
        host: &str,
        user_identifier: &str,
        user_secret: &str,
        proxy: Option<&Url>,
    ) -> Result<Self, ApiError> {
        let mut builder = Client::builder().user_agent(format!("sl/{}", crate::VERSION));
        if let Some(proxy) = proxy {
            builder = builder.proxy(Proxy::all(proxy.as_str()).map_err(TransportError::from)?);
        }

        Ok(Self {
            http: builder.build().map_err(TransportError::from)?,
            host: host.trim_end_matches('/').to_string(),
            user_identifier: user_identifier.to_string(),
            user_secret: user_secret.to_string(),
            tokens: Mutex::new(None),
        })
    }

    pub fn user_identifier(&self) -> &str {
        &self.user_identifier
    }

    /// Exchanges the credentials for a fresh set of tokens.
    pub async fn authenticate(&self) -> Result<Tokens, ApiError> {
        let body = json!({
            "userIdentifier": self.user_identifier,
            "userSecret": self.user_secret,
        });
        self.request_tokens(AUTHENTICATE_PATH, body).await
    }

    /// Exchanges a refresh token for a fresh set of tokens.
    pub async fn refresh(&self, refresh_token: &str) -> Result<Tokens, ApiError> {
        self.request_tokens(REFRESH_PATH, json!({ "refreshToken": refresh_token }))
            .await
    }

    /// Drops cached tokens; the next call authenticates from scratch.
    pub async fn invalidate(&self) {
        *self.tokens.lock().await = None;
    }

    async fn request_tokens(&self, path: &str, body: Value) -> Result<Tokens, ApiError> {
        let url = format!("{}{}", self.host, path);
        debug!(%url, "requesting access token");

        let response = self
            .http
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(TransportError::from)?;
        let status = response.status().as_u16();
        let bytes = response.bytes().await.map_err(TransportError::from)?;
        let wrapped = ApiResponse::new(bytes.to_vec(), status);

        if !wrapped.is_success() {
            let reason = wrapped
                .envelope()
                .map(|envelope| {
                    let messages = envelope.error_messages();
                    if messages.is_empty() {
                        envelope.code.clone()
                    } else {
                        messages.join("; ")
                    }
                })
                .unwrap_or_else(|| format!("HTTP {}", status));
            return Err(ApiError::Authentication(reason));
        }

        let data = wrapped
            .data()
            .cloned()
            .ok_or_else(|| ApiError::Authentication("token response has no data".to_string()))?;
        let data: TokenData = serde_json::from_value(data)
            .map_err(|e| ApiError::Authentication(format!("malformed token response: {}", e)))?;

        let now = Utc::now();
        Ok(Tokens {
            access_token: data.access_token,
            refresh_token: data.refresh_token,
            expires_at: expiry(now, data.expires_in, "expiresIn")?,
            refresh_expires_at: expiry(now, data.refresh_expires_in, "refreshExpiresIn")?,
        })
    }
}

/// `now` plus a server-supplied lifetime, rejecting values chrono cannot represent.
fn expiry(now: DateTime<Utc>, seconds: i64, field: &str) -> Result<DateTime<Utc>, ApiError> {
    Duration::try_seconds(seconds)
        .and_then(|lifetime| now.checked_add_signed(lifetime))
        .ok_or_else(|| ApiError::Authentication(format!("{} out of range: {}", field, seconds)))
}

#[async_trait]
impl TokenProvider for AuthClient {
    async fn access_token(&self) -> Result<Option<String>, ApiError> {
        let mut cached = self.tokens.lock().await;
        let now = Utc::now();

        if let Some(tokens) = cached.as_ref() {
            if tokens.access_valid_at(now) {
                return Ok(Some(tokens.access_token.clone()));
            }
        }

        let refreshed = match cached.as_ref() {
            Some(tokens) if tokens.refresh_valid_at(now) => {
                match self.refresh(&tokens.refresh_token).await {
                    Ok(tokens) => Some(tokens),
                    Err(e) => {
                        warn!("Token refresh failed, authenticating again: {}", e);
                        None
                    }
                }
            }
            _ => None,
        };

        let tokens = match refreshed {
            Some(tokens) => tokens,
            None => self.authenticate().await?,
        };
        let access_token = tokens.access_token.clone();
        *cached = Some(tokens);

        Ok((!access_token.is_empty()).then_some(access_token))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;

    fn token_body(access: &str, expires_in: i64) -> String {
        json!({
            "response": {
                "code": "SUCCESS",
                "data": {
                    "accessToken": access,
                    "refreshToken": "refresh-1",
                    "expiresIn": expires_in,
                    "refreshExpiresIn": 3600
                }
            }
        })
        .to_string()
    }

    #[tokio::test]
    async fn test_authenticates_once_and_caches() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", AUTHENTICATE_PATH)
            .match_body(Matcher::Json(json!({
                "userIdentifier": "user",
                "userSecret": "secret"
            })))
            .with_status(200)
            .with_body(token_body("access-1", 480))
            .expect(1)
            .create_async()
            .await;

        let auth = AuthClient::new(&server.url(), "user", "secret", None).unwrap();
        assert_eq!(auth.access_token().await.unwrap(), Some("access-1".to_string()));
        assert_eq!(auth.access_token().await.unwrap(), Some("access-1".to_string()));

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_refreshes_expired_access_token() {
        let mut server = mockito::Server::new_async().await;
        let authenticate = server
            .mock("POST", AUTHENTICATE_PATH)
            .with_status(200)
            .with_body(token_body("access-1", 0))
            .expect(1)
            .create_async()
            .await;
        let refresh = server
            .mock("POST", REFRESH_PATH)
            .match_body(Matcher::Json(json!({ "refreshToken": "refresh-1" })))
            .with_status(200)
            .with_body(token_body("access-2", 480))
            .expect(1)
            .create_async()
            .await;

        let auth = AuthClient::new(&server.url(), "user", "secret", None).unwrap();
        assert_eq!(auth.access_token().await.unwrap(), Some("access-1".to_string()));
        assert_eq!(auth.access_token().await.unwrap(), Some("access-2".to_string()));

        authenticate.assert_async().await;
        refresh.assert_async().await;
    }

    #[tokio::test]
    async fn test_rejected_credentials() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", AUTHENTICATE_PATH)
            .with_status(401)
            .with_body(
                r#"{"response":{"code":"AUTHENTICATION_ERROR","errors":[{"key":"invalid_token","message":"Invalid credentials"}]}}"#,
            )
            .create_async()
            .await;

        let auth = AuthClient::new(&server.url(), "user", "wrong", None).unwrap();
        match auth.access_token().await {
            Err(ApiError::Authentication(reason)) => {
                assert_eq!(reason, "invalid_token: Invalid credentials")
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_expiry_rejects_out_of_range_lifetimes() {
        let now = Utc::now();
        assert_eq!(expiry(now, 480, "expiresIn").unwrap(), now + Duration::seconds(480));
        for seconds in [i64::MAX, i64::MIN, 9_000_000_000_000] {
            assert!(matches!(
                expiry(now, seconds, "expiresIn"),
                Err(ApiError::Authentication(_))
            ));
        }
    }

    #[tokio::test]
    async fn test_out_of_range_expiry_is_auth_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", AUTHENTICATE_PATH)
            .with_status(200)
            .with_body(token_body("access-1", i64::MAX))
            .create_async()
            .await;

        let auth = AuthClient::new(&server.url(), "user", "secret", None).unwrap();
        match auth.access_token().await {
            Err(ApiError::Authentication(reason)) => assert!(reason.contains("expiresIn")),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_malformed_token_payload() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", AUTHENTICATE_PATH)
            .with_status(200)
            .with_body(r#"{"response":{"code":"SUCCESS","data":{"unexpected":true}}}"#)
            .create_async()
            .await;

        let auth = AuthClient::new(&server.url(), "user", "secret", None).unwrap();
        assert!(matches!(
            auth.access_token().await,
            Err(ApiError::Authentication(_))
        ));
    }
}
