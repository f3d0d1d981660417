// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) DUSK NETWORK. All rights reserved.

//! Shared state handed to every request handler.

use std::fmt;
use std::sync::Arc;

use metrics_exporter_prometheus::PrometheusHandle;

use crate::rpc::client::NodeAdapter;

/// Cloneable container holding the node capability and the metrics render
/// handle.
///
/// Both members are read-only after construction, so sharing it across
/// request tasks involves no locking.
#[derive(Clone)]
pub struct AppState {
    node: Arc<dyn NodeAdapter>,
    metrics: PrometheusHandle,
}

impl AppState {
    pub fn new(node: Arc<dyn NodeAdapter>, metrics: PrometheusHandle) -> Self {
        Self { node, metrics }
    }

    /// Node capability used by the balance and readiness handlers.
    pub fn node(&self) -> &dyn NodeAdapter {
        self.node.as_ref()
    }

    /// Render handle backing the `/metrics` route.
    pub fn metrics(&self) -> &PrometheusHandle {
        &self.metrics
    }
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("node", &self.node)
            .finish_non_exhaustive()
    }
}
