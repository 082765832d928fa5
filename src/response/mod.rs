// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Request and response bodies of the Hive REST API.

mod devices;
mod session;

pub use devices::{DeviceList, Node, NodeAttribute, extract_attribute};
pub use session::{LoginRequest, LoginResponse, SessionInfo};
