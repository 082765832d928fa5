// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Outbound transport to the Hive REST API.
//!
//! The session logic never talks to the network directly; it hands a fully
//! built [`HttpRequest`] to a [`Transport`] and classifies the
//! [`HttpResponse`] it gets back. [`HttpTransport`] is the default
//! implementation, backed by `reqwest`.

#[cfg(feature = "http")]
mod http;

#[cfg(feature = "http")]
pub use http::HttpTransport;

use std::collections::BTreeMap;
use std::fmt;

use crate::error::{ParseError, TransportError};

/// HTTP method of an outbound request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    /// `GET`
    Get,
    /// `POST`
    Post,
}

impl Method {
    /// Returns the method name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A request ready to be sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    /// Request method.
    pub method: Method,
    /// Absolute URL.
    pub url: String,
    /// Headers sent with the request.
    pub headers: BTreeMap<String, String>,
    /// Serialized JSON body, if any.
    pub body: Option<String>,
}

impl HttpRequest {
    /// Creates a `GET` request.
    #[must_use]
    pub fn get(url: impl Into<String>, headers: BTreeMap<String, String>) -> Self {
        Self {
            method: Method::Get,
            url: url.into(),
            headers,
            body: None,
        }
    }

    /// Creates a `POST` request with a body.
    #[must_use]
    pub fn post(
        url: impl Into<String>,
        headers: BTreeMap<String, String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            method: Method::Post,
            url: url.into(),
            headers,
            body: Some(body.into()),
        }
    }
}

/// Response to an [`HttpRequest`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    status: u16,
    body: String,
}

impl HttpResponse {
    /// Creates a response with the given status and raw body.
    #[must_use]
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Returns the HTTP status code.
    #[must_use]
    pub fn status(&self) -> u16 {
        self.status
    }

    /// Returns true for `200 OK`.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.status == 200
    }

    /// Returns the raw body.
    #[must_use]
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Parses the body as JSON.
    ///
    /// # Errors
    ///
    /// Returns error if the body is not valid JSON for the target type.
    pub fn parse<T: serde::de::DeserializeOwned>(&self) -> Result<T, ParseError> {
        serde_json::from_str(&self.body).map_err(Into::into)
    }
}

/// Trait for the HTTP collaborator that carries requests to the service.
///
/// Implementations only move bytes: status codes and error bodies are
/// interpreted by the session, so a transport returns `Ok` for any
/// response it received, whatever its status.
#[allow(async_fn_in_trait)]
pub trait Transport {
    /// Sends a request and returns the response.
    ///
    /// # Errors
    ///
    /// Returns `TransportError` if no response was received.
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn post_request_carries_body() {
        let request = HttpRequest::post("http://hive/auth/sessions", BTreeMap::new(), "{}");
        assert_eq!(request.method, Method::Post);
        assert_eq!(request.body.as_deref(), Some("{}"));
    }

    #[test]
    fn get_request_has_no_body() {
        let request = HttpRequest::get("http://hive/nodes", BTreeMap::new());
        assert_eq!(request.method.to_string(), "GET");
        assert!(request.body.is_none());
    }

    #[test]
    fn response_parse_rejects_html() {
        let response = HttpResponse::new(502, "<html>Bad Gateway</html>");
        assert!(!response.is_ok());
        assert!(response.parse::<serde_json::Value>().is_err());
    }
}
