// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Device list response parsing.

use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::Value;

use crate::types::{Attribute, Domain, RECEIVER_NAME, ReportedValue};

/// Response from `GET /nodes`.
///
/// The service returns every node on the account:
///
/// ```json
/// {"nodes": [{"id": "..", "name": "Receiver",
///             "attributes": {"stateHeatingRelay": {"reportedValue": "ON"}}}]}
/// ```
///
/// # Examples
///
/// ```
/// use hive_lib::response::DeviceList;
/// use hive_lib::types::Attribute;
///
/// let json = r#"{"nodes": [{"name": "Receiver",
///     "attributes": {"stateHeatingRelay": {"reportedValue": "ON"}}}]}"#;
/// let devices: DeviceList = serde_json::from_str(json).unwrap();
/// assert_eq!(devices.extract(Attribute::HeatingRelay).to_string(), "ON");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct DeviceList {
    #[serde(default)]
    nodes: Vec<Node>,
}

impl DeviceList {
    /// Creates a device list from nodes.
    #[must_use]
    pub fn new(nodes: Vec<Node>) -> Self {
        Self { nodes }
    }

    /// Returns all nodes in service order.
    #[must_use]
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Returns the first `Receiver` node serving the given domain.
    #[must_use]
    pub fn receiver(&self, domain: Domain) -> Option<&Node> {
        self.receiver_with(domain.presence_attribute())
    }

    fn receiver_with(&self, presence: &str) -> Option<&Node> {
        self.nodes
            .iter()
            .find(|node| node.name == RECEIVER_NAME && node.has(presence))
    }

    /// Reads an attribute from the receiver serving its domain.
    ///
    /// Returns [`ReportedValue::Unknown`] when no receiver serves the
    /// domain, or when the receiver does not report the attribute.
    #[must_use]
    pub fn extract(&self, attribute: Attribute) -> ReportedValue {
        extract_attribute(self, attribute.domain().presence_attribute(), attribute.name())
    }
}

/// Scans `devices` for the first `Receiver` carrying `presence` and returns
/// its reported `target` value.
///
/// The scan stops at the first match even if that node lacks `target`.
#[must_use]
pub fn extract_attribute(devices: &DeviceList, presence: &str, target: &str) -> ReportedValue {
    devices
        .receiver_with(presence)
        .map_or(ReportedValue::Unknown, |node| node.reported(target))
}

/// A device node.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Node {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    name: String,
    #[serde(default)]
    attributes: BTreeMap<String, NodeAttribute>,
}

impl Node {
    /// Creates a node with the given name and no attributes.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            attributes: BTreeMap::new(),
        }
    }

    /// Adds an attribute with a reported value.
    #[must_use]
    pub fn with_reported(mut self, name: impl Into<String>, value: Value) -> Self {
        self.attributes.insert(
            name.into(),
            NodeAttribute {
                reported_value: Some(value),
                target_value: None,
            },
        );
        self
    }

    /// Returns the node identifier, if the service sent one.
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// Returns the node name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the node's attributes.
    #[must_use]
    pub fn attributes(&self) -> &BTreeMap<String, NodeAttribute> {
        &self.attributes
    }

    /// Returns true if the node carries the attribute, whatever its value.
    #[must_use]
    pub fn has(&self, attribute: &str) -> bool {
        self.attributes.contains_key(attribute)
    }

    /// Returns the reported value of an attribute.
    #[must_use]
    pub fn reported(&self, attribute: &str) -> ReportedValue {
        ReportedValue::from_json(
            self.attributes
                .get(attribute)
                .and_then(|a| a.reported_value.as_ref()),
        )
    }
}

/// A single attribute of a node.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeAttribute {
    #[serde(default)]
    reported_value: Option<Value>,
    #[serde(default)]
    target_value: Option<Value>,
}

impl NodeAttribute {
    /// Value last confirmed by the device.
    #[must_use]
    pub fn reported_value(&self) -> Option<&Value> {
        self.reported_value.as_ref()
    }

    /// Value requested of the device, if a change is pending.
    #[must_use]
    pub fn target_value(&self) -> Option<&Value> {
        self.target_value.as_ref()
    }
}
