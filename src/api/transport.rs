//
//  smartling-files
//  api/transport.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # HTTP Transport
//!
//! The command layer performs every HTTP exchange through the [`Transport`]
//! trait. [`ReqwestTransport`] is the default implementation.
//!
//! ## Encoding Rules
//!
//! | Method | [`Encoding::Plain`] | [`Encoding::Multipart`] |
//! |--------|---------------------|-------------------------|
//! | GET, DELETE | query string | multipart body |
//! | POST, PUT | form-encoded body | multipart body |
//!
//! List values are sent as repeated keys. A [`ParamValue::File`] is only
//! accepted with multipart encoding and is streamed from its open handle.
//!
//! Retries, backoff and connection pooling policy belong to the transport;
//! the command layer never retries.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Body, Client, Method, Proxy};
use tracing::trace;
use url::Url;

use crate::api::common::{ParamValue, Params, TransportError};

/// How request parameters are put on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    /// Query string (GET/DELETE) or `application/x-www-form-urlencoded` (POST/PUT)
    Plain,
    /// `multipart/form-data` with one streamed file field
    Multipart,
}

/// A single, fully-shaped HTTP request.
#[derive(Debug)]
pub struct Request {
    pub method: Method,
    pub url: String,
    pub params: Params,
    pub encoding: Encoding,
    pub headers: Vec<(String, String)>,
}

/// Unwrapped result of an exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub body: Vec<u8>,
    pub status: u16,
}

/// Performs one HTTP request/response exchange.
///
/// Implementations must support plain and multipart encodings and must
/// release any file handle carried by the request once the exchange ends.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: Request) -> Result<RawResponse, TransportError>;
}

/// [`Transport`] backed by a `reqwest` client.
///
/// # Example
///
/// ```rust,no_run
/// use std::time::Duration;
/// use smartling_files::api::transport::ReqwestTransport;
///
/// let transport = ReqwestTransport::with_options(None, Some(Duration::from_secs(30)))?;
/// # Ok::<(), smartling_files::api::common::TransportError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    http: Client,
}

impl ReqwestTransport {
    /// Creates a transport with default settings.
    pub fn new() -> Result<Self, TransportError> {
        Self::with_options(None, None)
    }

    /// Creates a transport routed through `proxy` with an optional request timeout.
    pub fn with_options(proxy: Option<&Url>, timeout: Option<Duration>) -> Result<Self, TransportError> {
        let mut builder = Client::builder().user_agent(format!("sl/{}", crate::VERSION));

        if let Some(proxy) = proxy {
            builder = builder.proxy(Proxy::all(proxy.as_str())?);
        }
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            http: builder.build()?,
        })
    }

    /// Wraps an already configured client.
    pub fn from_client(http: Client) -> Self {
        Self { http }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: Request) -> Result<RawResponse, TransportError> {
        let Request {
            method,
            url,
            params,
            encoding,
            headers,
        } = request;

        let mut builder = self.http.request(method.clone(), &url);
        for (name, value) in &headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        builder = match encoding {
            Encoding::Plain => {
                let pairs = plain_pairs(params)?;
                if method == Method::GET || method == Method::DELETE {
                    builder.query(&pairs)
                } else {
                    builder.form(&pairs)
                }
            }
            Encoding::Multipart => builder.multipart(multipart_form(params)?),
        };

        trace!(%method, %url, ?encoding, "sending request");
        let response = builder.send().await?;
        let status = response.status().as_u16();
        let body = response.bytes().await?.to_vec();
        trace!(%method, %url, status, bytes = body.len(), "response received");

        Ok(RawResponse { body, status })
    }
}

fn plain_pairs(params: Params) -> Result<Vec<(String, String)>, TransportError> {
    let mut pairs = Vec::with_capacity(params.len());
    for (key, value) in params {
        match value {
            ParamValue::Text(text) => pairs.push((key, text)),
            ParamValue::List(values) => {
                pairs.extend(values.into_iter().map(|v| (key.clone(), v)));
            }
            ParamValue::File(part) => {
                return Err(TransportError::InvalidRequest(format!(
                    "file parameter `{}` ({}) requires multipart encoding",
                    key, part.file_name
                )));
            }
        }
    }
    Ok(pairs)
}

fn multipart_form(params: Params) -> Result<Form, TransportError> {
    let mut form = Form::new();
    for (key, value) in params {
        form = match value {
            ParamValue::Text(text) => form.text(key, text),
            ParamValue::List(values) => values
                .into_iter()
                .fold(form, |form, v| form.text(key.clone(), v)),
            ParamValue::File(part) => {
                let file_part = Part::stream(Body::from(part.file))
                    .file_name(part.file_name)
                    .mime_str(&part.mime)?;
                form.part(key, file_part)
            }
        };
    }
    Ok(form)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::common::FilePart;
    use mockito::Matcher;

    fn request(method: Method, url: String, params: Params, encoding: Encoding) -> Request {
        Request {
            method,
            url,
            params,
            encoding,
            headers: vec![("Authorization".to_string(), "Bearer t0k".to_string())],
        }
    }

    #[tokio::test]
    async fn test_get_sends_query_and_headers() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/files-api/v2/projects/p1/files/zip")
            .match_header("authorization", "Bearer t0k")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("fileUris[]".into(), "a.json".into()),
                Matcher::UrlEncoded("localeIds[]".into(), "fr-FR".into()),
                Matcher::UrlEncoded("localeIds[]".into(), "de-DE".into()),
            ]))
            .with_status(200)
            .with_body("PK")
            .create_async()
            .await;

        let mut params = Params::new();
        params.insert_list("fileUris[]", ["a.json"]);
        params.insert_list("localeIds[]", ["fr-FR", "de-DE"]);

        let transport = ReqwestTransport::new().unwrap();
        let url = format!("{}/files-api/v2/projects/p1/files/zip", server.url());
        let response = transport
            .send(request(Method::GET, url, params, Encoding::Plain))
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(response.status, 200);
        assert_eq!(response.body, b"PK".to_vec());
    }

    #[tokio::test]
    async fn test_post_sends_form_body() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/file/rename")
            .match_header("content-type", "application/x-www-form-urlencoded")
            .match_body(Matcher::AllOf(vec![
                Matcher::UrlEncoded("fileUri".into(), "old.json".into()),
                Matcher::UrlEncoded("newFileUri".into(), "new.json".into()),
            ]))
            .with_status(404)
            .with_body("missing")
            .create_async()
            .await;

        let params = Params::new()
            .with_text("fileUri", "old.json")
            .with_text("newFileUri", "new.json");

        let transport = ReqwestTransport::new().unwrap();
        let response = transport
            .send(request(
                Method::POST,
                format!("{}/file/rename", server.url()),
                params,
                Encoding::Plain,
            ))
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(response.status, 404);
        assert_eq!(response.body, b"missing".to_vec());
    }

    #[tokio::test]
    async fn test_multipart_streams_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("strings.json");
        std::fs::write(&path, br#"{"hello":"world"}"#).unwrap();

        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/file")
            .match_header("content-type", Matcher::Regex("^multipart/form-data".into()))
            .match_body(Matcher::AllOf(vec![
                Matcher::Regex(r#"name="fileUri""#.into()),
                Matcher::Regex(r#"filename="strings.json""#.into()),
                Matcher::Regex(r#"\{"hello":"world"\}"#.into()),
            ]))
            .with_status(200)
            .with_body(r#"{"response":{"code":"SUCCESS"}}"#)
            .create_async()
            .await;

        let mut params = Params::new().with_text("fileUri", "strings.json");
        params.insert_file(
            "file",
            FilePart {
                file_name: "strings.json".to_string(),
                mime: "application/octet-stream".to_string(),
                file: tokio::fs::File::open(&path).await.unwrap(),
            },
        );

        let transport = ReqwestTransport::new().unwrap();
        let response = transport
            .send(request(
                Method::POST,
                format!("{}/file", server.url()),
                params,
                Encoding::Multipart,
            ))
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(response.status, 200);
    }

    #[tokio::test]
    async fn test_file_requires_multipart() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.txt");
        std::fs::write(&path, b"a").unwrap();

        let mut params = Params::new();
        params.insert_file(
            "file",
            FilePart {
                file_name: "a.txt".to_string(),
                mime: "text/plain".to_string(),
                file: tokio::fs::File::open(&path).await.unwrap(),
            },
        );

        let transport = ReqwestTransport::new().unwrap();
        let result = transport
            .send(request(
                Method::POST,
                "http://127.0.0.1:9/file".to_string(),
                params,
                Encoding::Plain,
            ))
            .await;

        assert!(matches!(result, Err(TransportError::InvalidRequest(_))));
    }
}
