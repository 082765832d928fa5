// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Login request and response bodies.

use serde::{Deserialize, Serialize};

use crate::error::ParseError;

/// Caller identifier sent with every login.
const CALLER: &str = "WEB";

/// Body of `POST /auth/sessions`.
///
/// ```json
/// {"sessions": [{"username": "..", "password": "..", "caller": "WEB"}]}
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest<'a> {
    sessions: [LoginCredentials<'a>; 1],
}

#[derive(Debug, Clone, Serialize)]
struct LoginCredentials<'a> {
    username: &'a str,
    password: &'a str,
    caller: &'a str,
}

impl<'a> LoginRequest<'a> {
    /// Creates a login body for the given credentials.
    #[must_use]
    pub fn new(username: &'a str, password: &'a str) -> Self {
        Self {
            sessions: [LoginCredentials {
                username,
                password,
                caller: CALLER,
            }],
        }
    }
}

/// Successful response of `POST /auth/sessions`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    sessions: Vec<SessionInfo>,
}

/// A session issued by the service.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionInfo {
    #[serde(default)]
    session_id: Option<String>,
    #[serde(default)]
    username: Option<String>,
}

impl SessionInfo {
    /// Returns the account the session belongs to, if echoed back.
    #[must_use]
    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }
}

impl LoginResponse {
    /// Returns the identifier of the first issued session.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::MissingField`] if no session id was issued.
    pub fn session_id(&self) -> Result<&str, ParseError> {
        self.sessions
            .first()
            .and_then(|s| s.session_id.as_deref())
            .filter(|id| !id.is_empty())
            .ok_or_else(|| ParseError::MissingField("sessions[0].sessionId".to_string()))
    }

    /// Returns all issued sessions.
    #[must_use]
    pub fn sessions(&self) -> &[SessionInfo] {
        &self.sessions
    }
}
