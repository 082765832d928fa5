// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Relay state reported by the receiver.

use std::fmt;
use std::str::FromStr;

use crate::error::ParseError;

/// State of the heating or hot-water relay.
///
/// # Examples
///
/// ```
/// use hive_lib::types::RelayState;
///
/// let state: RelayState = "ON".parse().unwrap();
/// assert_eq!(state, RelayState::On);
/// assert!(state.is_on());
/// assert_eq!(RelayState::Off.as_str(), "OFF");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RelayState {
    /// Relay is open.
    Off,
    /// Relay is closed; the boiler is running for this circuit.
    On,
}

impl RelayState {
    /// Returns the wire representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Off => "OFF",
            Self::On => "ON",
        }
    }

    /// Returns true if the relay is on.
    #[must_use]
    pub const fn is_on(&self) -> bool {
        matches!(self, Self::On)
    }
}

impl fmt::Display for RelayState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RelayState {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "OFF" => Ok(Self::Off),
            "ON" => Ok(Self::On),
            _ => Err(ParseError::InvalidValue {
                field: "relay state".to_string(),
                message: format!("expected ON or OFF, got {s:?}"),
            }),
        }
    }
}
