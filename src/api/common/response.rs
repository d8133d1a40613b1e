//
//  smartling-files
//  api/common/response.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Response Wrapper
//!
//! Every command returns its HTTP exchange normalized into an [`ApiResponse`].
//! The Files API wraps JSON results in a standard envelope:
//!
//! ```json
//! {"response": {"code": "SUCCESS", "data": {...}, "errors": []}}
//! ```
//!
//! When the body matches that shape it is exposed as
//! [`ResponseBody::Parsed`]; anything else (downloaded files, HTML error pages,
//! plain text) is kept as [`ResponseBody::Raw`]. Construction never fails.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A message reported by the service inside the response envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiMessage {
    /// Machine-readable message key, e.g. `"validation.error"`
    #[serde(default)]
    pub key: Option<String>,

    /// Human-readable message
    #[serde(default)]
    pub message: String,

    /// Structured details attached to the message
    #[serde(default)]
    pub details: Option<Value>,
}

/// The parsed `response` object of the standard envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope {
    /// Outcome code, e.g. `SUCCESS`, `VALIDATION_ERROR`, `AUTHENTICATION_ERROR`
    pub code: String,

    /// Error messages (current API versions)
    #[serde(default)]
    pub errors: Vec<ApiMessage>,

    /// Free-form messages (older API versions)
    #[serde(default)]
    pub messages: Vec<String>,

    /// Endpoint-specific payload
    #[serde(default)]
    pub data: Option<Value>,
}

impl Envelope {
    /// Returns `true` when the envelope reports `SUCCESS`.
    pub fn is_success_code(&self) -> bool {
        self.code == "SUCCESS"
    }

    /// Collects every error and message text into one list.
    pub fn error_messages(&self) -> Vec<String> {
        self.errors
            .iter()
            .map(|e| match &e.key {
                Some(key) if !e.message.is_empty() => format!("{}: {}", key, e.message),
                Some(key) => key.clone(),
                None => e.message.clone(),
            })
            .chain(self.messages.iter().cloned())
            .collect()
    }
}

#[derive(Deserialize)]
struct EnvelopeDocument {
    response: Envelope,
}

/// Body of a response: parsed envelope or opaque bytes.
#[derive(Debug, Clone)]
pub enum ResponseBody {
    /// The body matched the standard envelope
    Parsed {
        envelope: Envelope,
        raw: Vec<u8>,
    },
    /// The body is not an envelope (file content, plain text, malformed JSON)
    Raw(Vec<u8>),
}

/// Uniform result of a Files API command.
///
/// # Example
///
/// ```rust
/// use smartling_files::api::ApiResponse;
///
/// let ok = ApiResponse::new(r#"{"response":{"code":"SUCCESS"}}"#, 200);
/// assert!(ok.is_success());
/// assert_eq!(ok.code(), Some("SUCCESS"));
///
/// let failed = ApiResponse::new("oops", 500);
/// assert!(!failed.is_success());
/// assert_eq!(failed.text(), "oops");
/// ```
#[derive(Debug, Clone)]
pub struct ApiResponse {
    status: u16,
    body: ResponseBody,
}

impl ApiResponse {
    /// Wraps a raw `(body, status)` pair.
    ///
    /// The bytes are kept exactly as received; only the copy handed to the
    /// envelope parser has surrounding whitespace trimmed.
    pub fn new(body: impl Into<Vec<u8>>, status: u16) -> Self {
        let raw = body.into();

        let body = match serde_json::from_slice::<EnvelopeDocument>(raw.trim_ascii()) {
            Ok(document) => ResponseBody::Parsed {
                envelope: document.response,
                raw,
            },
            Err(_) => ResponseBody::Raw(raw),
        };

        Self { status, body }
    }

    /// HTTP status code of the exchange.
    pub fn status(&self) -> u16 {
        self.status
    }

    /// Returns `true` for 2xx statuses.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Body bytes as received.
    pub fn body(&self) -> &[u8] {
        match &self.body {
            ResponseBody::Parsed { raw, .. } => raw,
            ResponseBody::Raw(raw) => raw,
        }
    }

    /// Body decoded as UTF-8, with invalid sequences replaced.
    pub fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(self.body())
    }

    pub fn response_body(&self) -> &ResponseBody {
        &self.body
    }

    /// The parsed envelope, if the body had one.
    pub fn envelope(&self) -> Option<&Envelope> {
        match &self.body {
            ResponseBody::Parsed { envelope, .. } => Some(envelope),
            ResponseBody::Raw(_) => None,
        }
    }

    pub fn is_parsed(&self) -> bool {
        self.envelope().is_some()
    }

    /// Envelope outcome code.
    pub fn code(&self) -> Option<&str> {
        self.envelope().map(|e| e.code.as_str())
    }

    /// Envelope payload.
    pub fn data(&self) -> Option<&Value> {
        self.envelope().and_then(|e| e.data.as_ref())
    }

    /// Consumes the wrapper and returns the raw body.
    pub fn into_body(self) -> Vec<u8> {
        match self.body {
            ResponseBody::Parsed { raw, .. } => raw,
            ResponseBody::Raw(raw) => raw,
        }
    }
}
