// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) DUSK NETWORK. All rights reserved.

//! JSON-RPC client for the upstream Ethereum node.
//!
//! [`client`] frames and issues the calls, [`units`] performs the exact
//! wei-to-ether scaling, and [`error`] carries the taxonomy separating
//! transport, decoding, protocol and conversion failures.

pub mod client;
pub mod error;
pub mod units;

pub use client::{NodeAdapter, RpcClient};
pub use error::Error;
