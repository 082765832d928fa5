// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Values returned by the receiver accessors.

use std::fmt;

use serde_json::Value;

use crate::types::RelayState;

/// Literal shown for an attribute the service did not report.
pub const UNKNOWN: &str = "unknown";

/// The reported value of a receiver attribute.
///
/// `Unknown` signals data absence, not a failure: the receiver was not
/// found, the attribute was missing, or its value was empty.
///
/// # Examples
///
/// ```
/// use hive_lib::ReportedValue;
/// use hive_lib::types::RelayState;
///
/// let value = ReportedValue::from_json(Some(&serde_json::json!("ON")));
/// assert_eq!(value.relay_state(), Some(RelayState::On));
///
/// let missing = ReportedValue::from_json(None);
/// assert!(missing.is_unknown());
/// assert_eq!(missing.to_string(), "unknown");
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ReportedValue {
    /// The value as reported by the device.
    Value(Value),
    /// Nothing usable was reported.
    #[default]
    Unknown,
}

/// JSON truthiness: `null`, `false`, `0` and `""` count as absent.
pub(crate) fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

impl ReportedValue {
    /// Wraps a JSON value, mapping absent and falsy values to `Unknown`.
    #[must_use]
    pub fn from_json(value: Option<&Value>) -> Self {
        match value {
            Some(value) if is_truthy(value) => Self::Value(value.clone()),
            _ => Self::Unknown,
        }
    }

    /// Returns true if nothing was reported.
    #[must_use]
    pub fn is_unknown(&self) -> bool {
        matches!(self, Self::Unknown)
    }

    /// Returns the raw JSON value, if any.
    #[must_use]
    pub fn value(&self) -> Option<&Value> {
        match self {
            Self::Value(value) => Some(value),
            Self::Unknown => None,
        }
    }

    /// Returns the value as a string slice if it is a JSON string, or
    /// `"unknown"` if nothing was reported.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Value(value) => value.as_str(),
            Self::Unknown => Some(UNKNOWN),
        }
    }

    /// Interprets the value as a relay state.
    #[must_use]
    pub fn relay_state(&self) -> Option<RelayState> {
        self.value()?.as_str()?.parse().ok()
    }

    /// Interprets the value as a number, accepting numeric strings.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self.value()? {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }
}

impl fmt::Display for ReportedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(Value::String(s)) => f.write_str(s),
            Self::Value(value) => write!(f, "{value}"),
            Self::Unknown => f.write_str(UNKNOWN),
        }
    }
}

impl From<Value> for ReportedValue {
    fn from(value: Value) -> Self {
        Self::from_json(Some(&value))
    }
}
