// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Session lifecycle and receiver accessors.
//!
//! A [`Session`] logs in lazily: every accessor first checks whether the
//! cached session token is older than the idle threshold, logs in again if
//! so, then fetches the full device list and reads one attribute from the
//! `Receiver` node.
//!
//! # Idle expiry
//!
//! The last-access instant is recorded when a request is *issued*, not when
//! it completes. A call that fails therefore leaves the session looking
//! fresh until the threshold passes again, and the next call inside the
//! window fetches without a session token. Call [`Session::invalidate`]
//! after an authentication failure to force a new login on the next call.
//!
//! Logins are serialized by an async gate held until the token is stored.
//! A call that arrives while a login is in flight waits for it instead of
//! seeing the fresh timestamp and fetching before the token exists, so
//! concurrent calls share one login and every fetch carries its token.

use std::collections::BTreeMap;
use std::fmt;
use std::time::Instant;

use parking_lot::Mutex;
use serde_json::Value;

#[cfg(feature = "http")]
use crate::config::ConfigOverride;
use crate::config::{ACCESS_TOKEN_HEADER, HiveConfig};
use crate::error::{ApiError, Error, ParseError, Result};
#[cfg(feature = "http")]
use crate::protocol::HttpTransport;
use crate::protocol::{HttpRequest, HttpResponse, Transport};
use crate::response::{DeviceList, LoginRequest, LoginResponse};
use crate::types::{Attribute, ReportedValue};

const LOGIN_PATH: &str = "auth/sessions";
const NODES_PATH: &str = "nodes";

/// An authenticated connection to the Hive API.
///
/// # Examples
///
/// ```no_run
/// use hive_lib::{ConfigOverride, Session};
///
/// # async fn example() -> hive_lib::Result<()> {
/// let session = Session::init(ConfigOverride::credentials("user@example.com", "secret"))?;
///
/// let heating = session.heating_is_on().await?;
/// let temperature = session.in_room_temperature().await?;
/// println!("heating {heating}, room {temperature}");
/// # Ok(())
/// # }
/// ```
pub struct Session<T: Transport> {
    config: HiveConfig,
    transport: T,
    state: Mutex<SessionState>,
    login_gate: tokio::sync::Mutex<()>,
}

struct SessionState {
    last_access: Option<Instant>,
    headers: BTreeMap<String, String>,
}

impl<T: Transport + fmt::Debug> fmt::Debug for Session<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("config", &self.config)
            .field("transport", &self.transport)
            .field("state", &*self.state.lock())
            .finish_non_exhaustive()
    }
}

impl fmt::Debug for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let headers: BTreeMap<&str, &str> = self
            .headers
            .iter()
            .map(|(name, value)| {
                let value = if name == ACCESS_TOKEN_HEADER {
                    "<redacted>"
                } else {
                    value.as_str()
                };
                (name.as_str(), value)
            })
            .collect();
        f.debug_struct("SessionState")
            .field("last_access", &self.last_access)
            .field("headers", &headers)
            .finish()
    }
}

#[cfg(feature = "http")]
impl Session<HttpTransport> {
    /// Creates a session from the defaults and a partial override.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the override leaves the credentials
    /// empty, or [`Error::Transport`] if the HTTP client cannot be built.
    pub fn init(overrides: ConfigOverride) -> Result<Self> {
        Self::new(HiveConfig::default().apply(overrides))
    }

    /// Creates a session using the default HTTP transport.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the credentials are empty, or
    /// [`Error::Transport`] if the HTTP client cannot be built.
    pub fn new(config: HiveConfig) -> Result<Self> {
        config.validate()?;
        let transport = HttpTransport::new(config.timeout())?;
        Self::with_transport(config, transport)
    }
}

impl<T: Transport> Session<T> {
    /// Creates a session that sends its requests through `transport`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the credentials are empty.
    pub fn with_transport(config: HiveConfig, transport: T) -> Result<Self> {
        config.validate()?;
        let state = SessionState {
            last_access: None,
            headers: config.headers().clone(),
        };
        Ok(Self {
            config,
            transport,
            state: Mutex::new(state),
            login_gate: tokio::sync::Mutex::new(()),
        })
    }

    /// Returns the session configuration.
    #[must_use]
    pub fn config(&self) -> &HiveConfig {
        &self.config
    }

    /// Returns the transport.
    #[must_use]
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Returns the session token issued by the last successful login.
    #[must_use]
    pub fn access_token(&self) -> Option<String> {
        self.state.lock().headers.get(ACCESS_TOKEN_HEADER).cloned()
    }

    /// Returns the headers sent with the next request.
    #[must_use]
    pub fn headers(&self) -> BTreeMap<String, String> {
        self.state.lock().headers.clone()
    }

    /// Returns when the last request was issued.
    #[must_use]
    pub fn last_access(&self) -> Option<Instant> {
        self.state.lock().last_access
    }

    /// Returns true if the next call has to log in first.
    #[must_use]
    pub fn needs_login(&self) -> bool {
        self.needs_login_at(Instant::now())
    }

    /// Returns true if a call issued at `now` would have to log in first.
    #[must_use]
    pub fn needs_login_at(&self, now: Instant) -> bool {
        self.is_stale(self.state.lock().last_access, now)
    }

    fn is_stale(&self, last_access: Option<Instant>, now: Instant) -> bool {
        last_access.is_none_or(|last| {
            now.saturating_duration_since(last) >= self.config.idle_threshold()
        })
    }

    /// Forgets the session token so the next call logs in again.
    pub fn invalidate(&self) {
        let mut state = self.state.lock();
        state.last_access = None;
        state.headers.remove(ACCESS_TOKEN_HEADER);
        tracing::debug!("Session invalidated");
    }

    /// Logs in unless the current session is still within the idle window.
    ///
    /// Waits for any login already in flight before deciding.
    ///
    /// # Errors
    ///
    /// - [`Error::Transport`] if the request could not be sent
    /// - [`Error::Parse`] if the body is not JSON or carries no session id
    /// - [`Error::Api`] if the service reported an error
    /// - [`Error::Unknown`] for any other non-200 response
    pub async fn login(&self) -> Result<()> {
        let _gate = self.login_gate.lock().await;
        let request = {
            let mut state = self.state.lock();
            let now = Instant::now();
            if !self.is_stale(state.last_access, now) {
                tracing::trace!("Session still fresh, skipping login");
                return Ok(());
            }
            state.last_access = Some(now);

            let body = serde_json::to_string(&LoginRequest::new(
                self.config.username(),
                self.config.password(),
            ))
            .map_err(ParseError::Json)?;
            HttpRequest::post(self.config.url(LOGIN_PATH), state.headers.clone(), body)
        };

        tracing::debug!(username = %self.config.username(), "Logging in");

        let response = self.transport.send(request).await?;
        let body = decode(&response)?;
        let login: LoginResponse = serde_json::from_value(body).map_err(ParseError::Json)?;
        let session_id = login.session_id()?.to_string();

        self.state
            .lock()
            .headers
            .insert(ACCESS_TOKEN_HEADER.to_string(), session_id);

        tracing::debug!("Login successful");
        Ok(())
    }

    /// Logs in if needed, then runs `op`.
    ///
    /// If the login fails its error is returned and `op` is not run.
    ///
    /// # Errors
    ///
    /// Returns the login error or the error returned by `op`.
    pub async fn logged_in<R, F>(&self, op: F) -> Result<R>
    where
        F: AsyncFnOnce(&Self) -> Result<R>,
    {
        self.login().await?;
        op(self).await
    }

    /// Fetches every device node on the account.
    ///
    /// # Errors
    ///
    /// Returns the login error, or the fetch error classified like
    /// [`login`](Self::login).
    pub async fn devices(&self) -> Result<DeviceList> {
        self.logged_in(async |session: &Self| session.fetch_devices().await).await
    }

    async fn fetch_devices(&self) -> Result<DeviceList> {
        let request = {
            let mut state = self.state.lock();
            state.last_access = Some(Instant::now());
            HttpRequest::get(self.config.url(NODES_PATH), state.headers.clone())
        };

        let response = self.transport.send(request).await?;
        let body = decode(&response)?;
        let devices: DeviceList = serde_json::from_value(body).map_err(ParseError::Json)?;

        tracing::debug!(count = devices.nodes().len(), "Fetched device list");
        Ok(devices)
    }

    /// Reads a single attribute from the receiver.
    ///
    /// # Errors
    ///
    /// Returns error if the login or the device fetch fails. A missing
    /// receiver or attribute is not an error: it yields
    /// [`ReportedValue::Unknown`].
    pub async fn attribute(&self, attribute: Attribute) -> Result<ReportedValue> {
        let devices = self.devices().await?;
        let value = devices.extract(attribute);
        tracing::debug!(%attribute, %value, "Read receiver attribute");
        Ok(value)
    }

    // ========== Heating ==========

    /// Heating relay state, `"ON"` or `"OFF"`.
    ///
    /// # Errors
    ///
    /// Returns error if the login or the device fetch fails.
    pub async fn heating_is_on(&self) -> Result<ReportedValue> {
        self.attribute(Attribute::HeatingRelay).await
    }

    /// Temperature measured by the thermostat.
    ///
    /// # Errors
    ///
    /// Returns error if the login or the device fetch fails.
    pub async fn in_room_temperature(&self) -> Result<ReportedValue> {
        self.attribute(Attribute::InRoomTemperature).await
    }

    /// Target heating temperature.
    ///
    /// # Errors
    ///
    /// Returns error if the login or the device fetch fails.
    pub async fn target_heat_temperature(&self) -> Result<ReportedValue> {
        self.attribute(Attribute::TargetHeatTemperature).await
    }

    /// Frost protection temperature.
    ///
    /// # Errors
    ///
    /// Returns error if the login or the device fetch fails.
    pub async fn frost_protect_temperature(&self) -> Result<ReportedValue> {
        self.attribute(Attribute::FrostProtectTemperature).await
    }

    /// Lowest settable heating temperature.
    ///
    /// # Errors
    ///
    /// Returns error if the login or the device fetch fails.
    pub async fn min_heat_temperature(&self) -> Result<ReportedValue> {
        self.attribute(Attribute::MinHeatTemperature).await
    }

    /// Highest settable heating temperature.
    ///
    /// # Errors
    ///
    /// Returns error if the login or the device fetch fails.
    pub async fn max_heat_temperature(&self) -> Result<ReportedValue> {
        self.attribute(Attribute::MaxHeatTemperature).await
    }

    /// Weekly heating schedule as reported by the service.
    ///
    /// # Errors
    ///
    /// Returns error if the login or the device fetch fails.
    pub async fn heating_schedule(&self) -> Result<ReportedValue> {
        self.attribute(Attribute::HeatingSchedule).await
    }

    // ========== Hot water ==========

    /// Hot-water relay state, `"ON"` or `"OFF"`.
    ///
    /// # Errors
    ///
    /// Returns error if the login or the device fetch fails.
    pub async fn hot_water_is_on(&self) -> Result<ReportedValue> {
        self.attribute(Attribute::HotWaterRelay).await
    }

    /// Weekly hot-water schedule as reported by the service.
    ///
    /// # Errors
    ///
    /// Returns error if the login or the device fetch fails.
    pub async fn hot_water_schedule(&self) -> Result<ReportedValue> {
        self.attribute(Attribute::HotWaterSchedule).await
    }
}

/// Classifies a response: error bodies win over the status code.
fn decode(response: &HttpResponse) -> Result<Value> {
    let body: Value = response.parse()?;

    if let Some(error) = ApiError::from_body(&body) {
        tracing::warn!(status = response.status(), %error, "Service reported an error");
        return Err(Error::Api(error));
    }

    if !response.is_ok() {
        tracing::warn!(status = response.status(), "Unexpected response");
        return Err(Error::Unknown {
            status: response.status(),
        });
    }

    Ok(body)
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use serde_json::json;

    use super::*;
    use crate::config::MEDIA_TYPE;
    use crate::error::TransportError;
    use crate::protocol::Method;

    /// Answers login and device requests with fixed responses and records
    /// every request it sees.
    #[derive(Debug, Default)]
    struct MockTransport {
        login: Option<HttpResponse>,
        login_delay: Option<Duration>,
        nodes: Option<HttpResponse>,
        requests: Mutex<Vec<HttpRequest>>,
    }

    impl MockTransport {
        fn new(login: Value, nodes: Value) -> Self {
            Self {
                login: Some(HttpResponse::new(200, login.to_string())),
                login_delay: None,
                nodes: Some(HttpResponse::new(200, nodes.to_string())),
                requests: Mutex::new(Vec::new()),
            }
        }

        fn with_login(mut self, response: Option<HttpResponse>) -> Self {
            self.login = response;
            self
        }

        fn with_login_delay(mut self, delay: Duration) -> Self {
            self.login_delay = Some(delay);
            self
        }

        fn with_nodes(mut self, response: Option<HttpResponse>) -> Self {
            self.nodes = response;
            self
        }

        fn calls(&self) -> usize {
            self.requests.lock().len()
        }

        fn login_calls(&self) -> usize {
            self.requests
                .lock()
                .iter()
                .filter(|r| r.url.ends_with(LOGIN_PATH))
                .count()
        }

        fn request(&self, index: usize) -> HttpRequest {
            self.requests.lock()[index].clone()
        }
    }

    impl Transport for MockTransport {
        async fn send(
            &self,
            request: HttpRequest,
        ) -> std::result::Result<HttpResponse, TransportError> {
            let is_login = request.url.ends_with(LOGIN_PATH);
            let response = if is_login {
                self.login.clone()
            } else {
                self.nodes.clone()
            };
            self.requests.lock().push(request);
            if let (true, Some(delay)) = (is_login, self.login_delay) {
                tokio::time::sleep(delay).await;
            }
            response.ok_or_else(|| TransportError::ConnectionFailed("connection refused".into()))
        }
    }

    fn login_ok() -> Value {
        json!({ "sessions": [{ "sessionId": "token-1", "username": "a" }] })
    }

    fn receiver_nodes() -> Value {
        json!({
            "nodes": [
                { "name": "Receiver", "attributes": {
                    "stateHeatingRelay": { "reportedValue": "ON" },
                    "temperature": { "reportedValue": 19.5 },
                    "targetHeatTemperature": { "reportedValue": 21 },
                    "frostProtectTemperature": { "reportedValue": 7 },
                    "minHeatTemperature": { "reportedValue": 5 },
                    "maxHeatTemperature": { "reportedValue": 32 },
                    "schedule": { "reportedValue": { "monday": [] } }
                } },
                { "name": "Receiver", "attributes": {
                    "stateHotWaterRelay": { "reportedValue": "OFF" },
                    "schedule": { "reportedValue": { "tuesday": [] } }
                } }
            ]
        })
    }

    fn config() -> HiveConfig {
        HiveConfig::default()
            .with_credentials("a", "b")
            .with_endpoint("http://hive.test/omnia")
    }

    fn session(transport: MockTransport) -> Session<MockTransport> {
        Session::with_transport(config(), transport).unwrap()
    }

    #[test]
    fn new_session_needs_login() {
        let session = session(MockTransport::default());
        assert!(session.needs_login());
        assert!(session.access_token().is_none());
        assert!(session.last_access().is_none());
    }

    #[test]
    fn missing_credentials_rejected() {
        let result = Session::with_transport(HiveConfig::default(), MockTransport::default());
        assert!(matches!(
            result,
            Err(Error::Config(crate::error::ConfigError::MissingCredentials))
        ));
    }

    #[test]
    fn needs_login_follows_idle_threshold() {
        let base = Instant::now();
        for minutes in [1_u64, 5, 20, 60] {
            let threshold = Duration::from_secs(minutes * 60);
            let session = Session::with_transport(
                config().with_idle_threshold(threshold),
                MockTransport::default(),
            )
            .unwrap();
            session.state.lock().last_access = Some(base);

            for elapsed_secs in [0, 1, minutes * 60 - 1, minutes * 60, minutes * 60 + 1, 86_400] {
                let now = base + Duration::from_secs(elapsed_secs);
                let elapsed = Duration::from_secs(elapsed_secs);
                assert_eq!(
                    session.needs_login_at(now),
                    elapsed >= threshold,
                    "threshold {minutes} min, elapsed {elapsed_secs} s"
                );
            }
        }
    }

    #[tokio::test]
    async fn login_stores_session_token() {
        let session = session(MockTransport::new(login_ok(), receiver_nodes()));

        session.login().await.unwrap();

        assert_eq!(session.access_token().as_deref(), Some("token-1"));
        assert!(!session.needs_login());

        let request = session.transport().request(0);
        assert_eq!(request.method, Method::Post);
        assert_eq!(request.url, "http://hive.test/omnia/auth/sessions");
        assert_eq!(request.headers["Content-Type"], MEDIA_TYPE);
        assert!(!request.headers.contains_key(ACCESS_TOKEN_HEADER));
        let body: Value = serde_json::from_str(request.body.as_deref().unwrap()).unwrap();
        assert_eq!(
            body,
            json!({ "sessions": [{ "username": "a", "password": "b", "caller": "WEB" }] })
        );
    }

    #[tokio::test]
    async fn login_skipped_within_idle_window() {
        let session = session(MockTransport::new(login_ok(), receiver_nodes()));

        session.login().await.unwrap();
        session.login().await.unwrap();

        assert_eq!(session.transport().calls(), 1);
    }

    #[tokio::test]
    async fn zero_threshold_logs_in_every_time() {
        let session = Session::with_transport(
            config().with_idle_threshold(Duration::ZERO),
            MockTransport::new(login_ok(), receiver_nodes()),
        )
        .unwrap();

        session.heating_is_on().await.unwrap();
        session.heating_is_on().await.unwrap();

        assert_eq!(session.transport().login_calls(), 2);
    }

    #[tokio::test]
    async fn failed_login_still_marks_session_fresh() {
        let session = session(MockTransport::default());

        let result = session.login().await;
        assert!(matches!(result, Err(Error::Transport(_))));
        assert!(session.access_token().is_none());
        assert!(!session.needs_login());

        session.invalidate();
        assert!(session.needs_login());
    }

    #[tokio::test]
    async fn login_api_error() {
        let body = json!({ "errors": [{ "code": "USERNAME_PASSWORD_ERROR" }] });
        let transport = MockTransport::default()
            .with_login(Some(HttpResponse::new(400, body.to_string())));
        let session = session(transport);

        match session.login().await {
            Err(Error::Api(error)) => assert_eq!(error.body(), &body),
            other => panic!("expected API error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn login_api_error_with_ok_status() {
        let body = json!({ "error": "bad credentials" });
        let transport = MockTransport::default()
            .with_login(Some(HttpResponse::new(200, body.to_string())));
        let session = session(transport);

        assert!(matches!(session.login().await, Err(Error::Api(_))));
        assert!(session.access_token().is_none());
    }

    #[tokio::test]
    async fn login_unparseable_body() {
        let transport = MockTransport::default()
            .with_login(Some(HttpResponse::new(502, "<html>Bad Gateway</html>")));
        let session = session(transport);

        assert!(matches!(
            session.login().await,
            Err(Error::Parse(ParseError::Json(_)))
        ));
    }

    #[tokio::test]
    async fn login_without_session_id() {
        let transport = MockTransport::default()
            .with_login(Some(HttpResponse::new(200, r#"{"sessions":[]}"#)));
        let session = session(transport);

        assert!(matches!(
            session.login().await,
            Err(Error::Parse(ParseError::MissingField(_)))
        ));
    }

    #[tokio::test]
    async fn login_unknown_error() {
        let transport = MockTransport::default().with_login(Some(HttpResponse::new(500, "{}")));
        let session = session(transport);

        assert!(matches!(
            session.login().await,
            Err(Error::Unknown { status: 500 })
        ));
    }

    #[tokio::test]
    async fn concurrent_calls_share_one_login() {
        let transport = MockTransport::new(login_ok(), receiver_nodes())
            .with_login_delay(Duration::from_millis(50));
        let session = session(transport);

        let (heating, hot_water) = tokio::join!(session.heating_is_on(), session.hot_water_is_on());

        assert_eq!(heating.unwrap().to_string(), "ON");
        assert_eq!(hot_water.unwrap().to_string(), "OFF");
        assert_eq!(session.transport().login_calls(), 1);
        assert_eq!(session.transport().calls(), 3);
        for index in 1..3 {
            let fetch = session.transport().request(index);
            assert_eq!(fetch.method, Method::Get);
            assert_eq!(
                fetch.headers.get(ACCESS_TOKEN_HEADER).map(String::as_str),
                Some("token-1")
            );
        }
    }

    #[tokio::test]
    async fn debug_redacts_session_token() {
        let session = session(MockTransport::new(login_ok(), receiver_nodes()));
        session.login().await.unwrap();

        let debug = format!("{:?}", *session.state.lock());
        assert!(debug.contains(ACCESS_TOKEN_HEADER));
        assert!(!debug.contains("token-1"));
    }

    #[tokio::test]
    async fn failed_login_skips_operation() {
        let transport = MockTransport::default()
            .with_login(Some(HttpResponse::new(401, r#"{"error":"denied"}"#)))
            .with_nodes(Some(HttpResponse::new(200, receiver_nodes().to_string())));
        let session = session(transport);

        let result = session.heating_is_on().await;

        assert!(matches!(result, Err(Error::Api(_))));
        assert_eq!(session.transport().calls(), 1);
    }

    #[tokio::test]
    async fn logged_in_runs_operation_after_login() {
        let session = session(MockTransport::new(login_ok(), receiver_nodes()));

        let token = session
            .logged_in(async |s: &Session<MockTransport>| Ok::<_, Error>(s.access_token()))
            .await
            .unwrap();

        assert_eq!(token.as_deref(), Some("token-1"));
    }

    #[tokio::test]
    async fn heating_is_on_reads_receiver() {
        let session = session(MockTransport::new(login_ok(), receiver_nodes()));

        let value = session.heating_is_on().await.unwrap();

        assert_eq!(value, ReportedValue::Value(json!("ON")));
        let fetch = session.transport().request(1);
        assert_eq!(fetch.method, Method::Get);
        assert_eq!(fetch.url, "http://hive.test/omnia/nodes");
        assert_eq!(fetch.headers[ACCESS_TOKEN_HEADER], "token-1");
    }

    #[tokio::test]
    async fn every_accessor_reads_its_attribute() {
        let session = session(MockTransport::new(login_ok(), receiver_nodes()));

        assert_eq!(session.in_room_temperature().await.unwrap().as_f64(), Some(19.5));
        assert_eq!(session.target_heat_temperature().await.unwrap().as_f64(), Some(21.0));
        assert_eq!(session.frost_protect_temperature().await.unwrap().as_f64(), Some(7.0));
        assert_eq!(session.min_heat_temperature().await.unwrap().as_f64(), Some(5.0));
        assert_eq!(session.max_heat_temperature().await.unwrap().as_f64(), Some(32.0));
        assert_eq!(
            session.heating_schedule().await.unwrap(),
            ReportedValue::Value(json!({ "monday": [] }))
        );
        assert_eq!(session.hot_water_is_on().await.unwrap().to_string(), "OFF");
        assert_eq!(
            session.hot_water_schedule().await.unwrap(),
            ReportedValue::Value(json!({ "tuesday": [] }))
        );

        // One login, then one fetch per accessor.
        assert_eq!(session.transport().login_calls(), 1);
        assert_eq!(session.transport().calls(), 9);
    }

    #[tokio::test]
    async fn no_receiver_yields_unknown() {
        let nodes = json!({ "nodes": [{ "name": "Thermostat", "attributes": {} }] });
        let session = session(MockTransport::new(login_ok(), nodes));

        for attribute in Attribute::ALL {
            assert_eq!(
                session.attribute(attribute).await.unwrap(),
                ReportedValue::Unknown
            );
        }
    }

    #[tokio::test]
    async fn fetch_error_body_propagates_unchanged() {
        let body = json!({ "error": "bad token" });
        let transport = MockTransport::new(login_ok(), json!({}))
            .with_nodes(Some(HttpResponse::new(200, body.to_string())));
        let session = session(transport);

        for attribute in Attribute::ALL {
            match session.attribute(attribute).await {
                Err(Error::Api(error)) => assert_eq!(error.into_body(), body),
                other => panic!("expected API error for {attribute}, got {other:?}"),
            }
        }
    }

    #[tokio::test]
    async fn fetch_transport_error() {
        let transport = MockTransport::new(login_ok(), json!({})).with_nodes(None);
        let session = session(transport);

        assert!(matches!(
            session.devices().await,
            Err(Error::Transport(TransportError::ConnectionFailed(_)))
        ));
    }

    #[tokio::test]
    async fn fetch_unknown_error() {
        let transport = MockTransport::new(login_ok(), json!({}))
            .with_nodes(Some(HttpResponse::new(404, r#"{"message":"not found"}"#)));
        let session = session(transport);

        assert!(matches!(
            session.devices().await,
            Err(Error::Unknown { status: 404 })
        ));
    }

    #[tokio::test]
    async fn fetch_with_wrong_shape_is_parse_error() {
        let transport = MockTransport::new(login_ok(), json!({}))
            .with_nodes(Some(HttpResponse::new(200, r#"{"nodes":"none"}"#)));
        let session = session(transport);

        assert!(matches!(
            session.devices().await,
            Err(Error::Parse(ParseError::Json(_)))
        ));
    }

    #[tokio::test]
    async fn invalidate_forces_new_login() {
        let session = session(MockTransport::new(login_ok(), receiver_nodes()));

        session.heating_is_on().await.unwrap();
        session.invalidate();
        assert!(session.access_token().is_none());
        session.heating_is_on().await.unwrap();

        assert_eq!(session.transport().login_calls(), 2);
    }
}
