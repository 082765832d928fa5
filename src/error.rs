// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the `hive_lib` library.
//!
//! Every failure is returned to the caller as a value. Nothing is retried:
//! a failed login or device fetch must be re-initiated by the next call.

use std::fmt;

use serde_json::Value;
use thiserror::Error;

use crate::types::is_truthy;

/// The main error type for this library.
#[derive(Debug, Error)]
pub enum Error {
    /// The request never produced an HTTP response.
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// The service answered with a structured `error` or `errors` body.
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// The response body could not be decoded.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// The response had neither the expected shape nor an error body.
    #[error("unknown error (HTTP {status})")]
    Unknown {
        /// HTTP status code of the unrecognized response.
        status: u16,
    },

    /// The session configuration is unusable.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Errors raised by the outbound HTTP collaborator.
#[derive(Debug, Error)]
pub enum TransportError {
    /// HTTP request failed.
    #[cfg(feature = "http")]
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Connection to the service failed.
    #[error("connection failed: {0}")]
    ConnectionFailed(String),
}

/// An error body reported by the service.
///
/// The decoded body is kept exactly as received so callers see the same
/// object the service sent, whether it carried a single `error` or a list
/// of `errors`.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiError {
    body: Value,
}

impl ApiError {
    /// Wraps a decoded body if it carries an `error` or `errors` field.
    #[must_use]
    pub fn from_body(body: &Value) -> Option<Self> {
        let is_error = |key: &str| body.get(key).is_some_and(is_truthy);
        if is_error("error") || is_error("errors") {
            Some(Self { body: body.clone() })
        } else {
            None
        }
    }

    /// Returns the full decoded body.
    #[must_use]
    pub fn body(&self) -> &Value {
        &self.body
    }

    /// Returns the single `error` field, if present.
    #[must_use]
    pub fn error(&self) -> Option<&Value> {
        self.body.get("error")
    }

    /// Returns the `errors` list, if present.
    #[must_use]
    pub fn errors(&self) -> Option<&[Value]> {
        self.body
            .get("errors")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
    }

    /// Consumes the error and returns the decoded body.
    #[must_use]
    pub fn into_body(self) -> Value {
        self.body
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.error(), self.errors()) {
            (Some(Value::String(message)), _) => f.write_str(message),
            (Some(error), _) => write!(f, "{error}"),
            (None, Some(errors)) => write!(f, "{} errors reported", errors.len()),
            (None, None) => write!(f, "{}", self.body),
        }
    }
}

impl std::error::Error for ApiError {}

/// Errors related to decoding service responses.
#[derive(Debug, Error)]
pub enum ParseError {
    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// Expected field is missing from the response.
    #[error("missing field in response: {0}")]
    MissingField(String),

    /// Failed to parse a specific value.
    #[error("failed to parse {field}: {message}")]
    InvalidValue {
        /// The field that failed to parse.
        field: String,
        /// Description of the parsing failure.
        message: String,
    },
}

/// Errors related to the session configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Username or password was not supplied.
    #[error("username and password are required")]
    MissingCredentials,
}

/// A specialized Result type for this library.
pub type Result<T> = std::result::Result<T, Error>;
