// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Multi-device orchestration.
//!
//! [`DeviceManager`] is the entry point adapters call. It owns the session,
//! the [`DeviceRegistry`] of discovered devices, and fans each operation out
//! to the devices a [`Selector`] names, returning one [`CommandOutcome`] per
//! device.

mod device_manager;
mod outcome;
mod registry;

pub use device_manager::DeviceManager;
pub use outcome::{CommandOutcome, Outcomes, Selector};
pub use registry::DeviceRegistry;
