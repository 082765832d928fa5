// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Receiver attributes tracked by the library.

use std::fmt;

/// Name of the node representing the heating/hot-water controller.
pub const RECEIVER_NAME: &str = "Receiver";

/// Circuit an attribute belongs to.
///
/// A dual-channel installation reports heating and hot water on separate
/// `Receiver` nodes; the presence attribute tells them apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Domain {
    /// Central heating circuit.
    Heating,
    /// Hot-water circuit.
    HotWater,
}

impl Domain {
    /// Attribute a `Receiver` node must carry to serve this domain.
    #[must_use]
    pub const fn presence_attribute(&self) -> &'static str {
        match self {
            Self::Heating => "stateHeatingRelay",
            Self::HotWater => "stateHotWaterRelay",
        }
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Heating => f.write_str("heating"),
            Self::HotWater => f.write_str("hot water"),
        }
    }
}

/// An attribute readable from the receiver.
///
/// # Examples
///
/// ```
/// use hive_lib::types::{Attribute, Domain};
///
/// let attribute = Attribute::TargetHeatTemperature;
/// assert_eq!(attribute.name(), "targetHeatTemperature");
/// assert_eq!(attribute.domain(), Domain::Heating);
/// assert_eq!(Attribute::HotWaterSchedule.name(), "schedule");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Attribute {
    /// Heating relay state.
    HeatingRelay,
    /// Measured room temperature.
    InRoomTemperature,
    /// Target heating temperature.
    TargetHeatTemperature,
    /// Frost protection temperature.
    FrostProtectTemperature,
    /// Lowest settable heating temperature.
    MinHeatTemperature,
    /// Highest settable heating temperature.
    MaxHeatTemperature,
    /// Weekly heating schedule.
    HeatingSchedule,
    /// Hot-water relay state.
    HotWaterRelay,
    /// Weekly hot-water schedule.
    HotWaterSchedule,
}

impl Attribute {
    /// All attributes, heating first.
    pub const ALL: [Self; 9] = [
        Self::HeatingRelay,
        Self::InRoomTemperature,
        Self::TargetHeatTemperature,
        Self::FrostProtectTemperature,
        Self::MinHeatTemperature,
        Self::MaxHeatTemperature,
        Self::HeatingSchedule,
        Self::HotWaterRelay,
        Self::HotWaterSchedule,
    ];

    /// Attribute key in the node's attribute map.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::HeatingRelay => "stateHeatingRelay",
            Self::InRoomTemperature => "temperature",
            Self::TargetHeatTemperature => "targetHeatTemperature",
            Self::FrostProtectTemperature => "frostProtectTemperature",
            Self::MinHeatTemperature => "minHeatTemperature",
            Self::MaxHeatTemperature => "maxHeatTemperature",
            Self::HeatingSchedule | Self::HotWaterSchedule => "schedule",
            Self::HotWaterRelay => "stateHotWaterRelay",
        }
    }

    /// Circuit the attribute is read from.
    #[must_use]
    pub const fn domain(&self) -> Domain {
        match self {
            Self::HotWaterRelay | Self::HotWaterSchedule => Domain::HotWater,
            _ => Domain::Heating,
        }
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name(), self.domain())
    }
}
