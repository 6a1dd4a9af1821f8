// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Response parsing for `MirAIe` cloud JSON responses.
//!
//! This module provides structures for deserializing the login, home
//! listing and device status payloads.

mod home;
mod login;
mod status;

pub use home::{DeviceRecord, HomeRecord, LocatedDevice, SpaceRecord, flatten_homes};
pub use login::LoginResponse;
pub use status::StatusResponse;
