// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `MirAIe` Lib - A Rust library to control `MirAIe` cloud air conditioners.
//!
//! This library provides an async API to authenticate against the `MirAIe`
//! cloud, discover the air conditioners bound to an account, and control
//! them by name or all at once.
//!
//! # Supported Operations
//!
//! - **Power**: turn on, turn off
//! - **Climate**: target temperature (16-30 °C), mode, fan speed, preset
//! - **Airflow**: vertical and horizontal louver position
//! - **Status**: current state of one or all devices, device details
//!
//! # Multi-Device Commands
//!
//! Every operation takes a [`Selector`]: one device name, or all devices.
//! Commands for several devices run concurrently and each device gets its
//! own [`CommandOutcome`], so one offline unit does not hide the others.
//!
//! # Quick Start
//!
//! ```no_run
//! use miraie_lib::{DeviceManager, Mode, Selector};
//!
//! #[tokio::main]
//! async fn main() -> miraie_lib::Result<()> {
//!     // Reads MIRAIE_LOGIN_ID and MIRAIE_PASSWORD
//!     let manager = DeviceManager::initialize_from_env().await?;
//!
//!     manager.turn_on("Living Room").await?;
//!
//!     for outcome in manager.set_mode(Selector::All, Mode::Cool).await? {
//!         println!("{outcome}");
//!     }
//!     Ok(())
//! }
//! ```
//!
//! # Raw Operations
//!
//! Adapters that receive operations as strings can use
//! [`DeviceManager::execute`]; the operand is validated before any device is
//! contacted.
//!
//! ```no_run
//! use miraie_lib::{DeviceManager, OperationKind};
//!
//! # async fn example(manager: DeviceManager) -> miraie_lib::Result<()> {
//! let operation: OperationKind = "set_temperature".parse()?;
//! let outcomes = manager.execute("Bedroom", operation, Some("24")).await?;
//! assert_eq!(outcomes.len(), 1);
//! # Ok(())
//! # }
//! ```

pub mod capabilities;
pub mod command;
pub mod config;
pub mod device;
pub mod error;
pub mod manager;
pub mod protocol;
pub mod response;
pub mod session;
pub mod state;
pub mod types;

pub use capabilities::{Capabilities, CapabilitiesBuilder};
pub use command::{Command, MutationRequest, OperationKind, translate};
pub use config::ClientConfig;
pub use device::{Device, DeviceClient, DeviceSummary};
pub use error::{DeviceError, Error, NetworkError, ParseError, Result, ValueError};
pub use manager::{CommandOutcome, DeviceManager, DeviceRegistry, Outcomes, Selector};
pub use protocol::ApiClient;
pub use session::{Credential, LoginId, Session, SessionState};
pub use state::{DeviceState, StateChange};
pub use types::{
    FanSpeed, Mode, NormalizedValue, PowerState, Preset, SwingPosition, Temperature, ValueKind,
    validate,
};
