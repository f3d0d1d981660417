// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) DUSK NETWORK. All rights reserved.

//! REST gateway over an Ethereum node's JSON-RPC endpoint.
//!
//! The crate is split the way the service is wired: [`rpc`] speaks JSON-RPC
//! to the upstream node over an injected HTTP transport, and [`http`]
//! exposes the REST surface, gating construction and readiness on the
//! node's sync state and mediating every request through the
//! panic-containment and latency middlewares.

pub mod config;
pub mod http;
pub mod rpc;
