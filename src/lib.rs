// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `hive_lib` - A Rust client for the Hive home-heating REST API (v6).
//!
//! This library logs in to the Hive "Omnia" API and reads the state the
//! heating/hot-water receiver last reported: relay states, temperatures and
//! schedules. It is read-only.
//!
//! # Supported Features
//!
//! - **Session handling**: lazy login, session token caching, re-login after
//!   an idle period (20 minutes by default)
//! - **Heating**: relay state, room/target/frost/min/max temperatures, schedule
//! - **Hot water**: relay state, schedule
//!
//! # Quick Start
//!
//! ```no_run
//! use hive_lib::{ConfigOverride, Session};
//!
//! #[tokio::main]
//! async fn main() -> hive_lib::Result<()> {
//!     let session = Session::init(ConfigOverride::credentials("user@example.com", "secret"))?;
//!
//!     let heating = session.heating_is_on().await?;
//!     if heating.relay_state().is_some_and(|s| s.is_on()) {
//!         println!("Heating is on, target {}", session.target_heat_temperature().await?);
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Custom transport
//!
//! Requests go through the [`Transport`](protocol::Transport) trait. The
//! default [`HttpTransport`](protocol::HttpTransport) uses `reqwest` and is
//! enabled by the `http` feature; any other implementation can be passed to
//! [`Session::with_transport`].

pub mod config;
pub mod error;
pub mod protocol;
pub mod response;
mod session;
pub mod types;

pub use config::{ConfigOverride, HiveConfig};
pub use error::{ApiError, ConfigError, Error, ParseError, Result, TransportError};
pub use response::{DeviceList, Node};
pub use session::Session;
pub use types::{Attribute, Domain, RelayState, ReportedValue};
