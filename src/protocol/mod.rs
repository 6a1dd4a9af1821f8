// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Protocol implementation for communicating with the `MirAIe` cloud.
//!
//! [`ApiClient`] is the only component that performs network I/O. It
//! speaks JSON over HTTPS to two services:
//!
//! - the authentication service (login, logout),
//! - the home/device service (home listing, device status, device control).
//!
//! Every authenticated call carries a bearer token supplied by the caller;
//! the client itself holds no session state.

mod http;

pub use http::ApiClient;
