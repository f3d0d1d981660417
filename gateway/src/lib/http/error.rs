// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) DUSK NETWORK. All rights reserved.

use thiserror::Error;

use crate::rpc;

/// Errors raised while building or running the gateway.
///
/// Every variant is fatal to startup: the listener is never bound once one
/// of these surfaces.
#[derive(Debug, Error)]
pub enum Error {
    /// The upstream node reported an active sync during the startup gate.
    #[error("RPC node is syncing at the moment")]
    NodeSyncing,
    /// The startup sync probe could not be completed.
    #[error(transparent)]
    Rpc(#[from] rpc::Error),
    /// Listener bind or serve failure.
    #[error("server error: {0}")]
    Io(#[from] std::io::Error),
}
