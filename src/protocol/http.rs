// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `reqwest`-backed transport.

use std::time::Duration;

use reqwest::Client;

use crate::error::TransportError;
use crate::protocol::{HttpRequest, HttpResponse, Method, Transport};

/// HTTP transport built on a shared `reqwest::Client`.
///
/// # Examples
///
/// ```no_run
/// use hive_lib::protocol::HttpTransport;
/// use std::time::Duration;
///
/// let transport = HttpTransport::new(Duration::from_secs(5))?;
/// # Ok::<(), hive_lib::TransportError>(())
/// ```
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Creates a transport with the given request timeout.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be created.
    pub fn new(timeout: Duration) -> Result<Self, TransportError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(TransportError::Http)?;

        Ok(Self { client })
    }

    /// Wraps an existing client.
    #[must_use]
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

impl Transport for HttpTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        tracing::debug!(method = %request.method, url = %request.url, "Sending HTTP request");

        let mut builder = match request.method {
            Method::Get => self.client.get(&request.url),
            Method::Post => self.client.post(&request.url),
        };
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await.map_err(TransportError::Http)?;
        let status = response.status().as_u16();
        let body = response.text().await.map_err(TransportError::Http)?;

        tracing::debug!(status, "Received HTTP response");

        Ok(HttpResponse::new(status, body))
    }
}
