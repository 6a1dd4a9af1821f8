// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Device state management types.
//!
//! [`DeviceState`] holds the last-known state of an air conditioner, while
//! [`StateChange`] represents individual changes that can be applied to it.

mod device_state;
mod state_change;

pub use device_state::DeviceState;
pub use state_change::StateChange;
