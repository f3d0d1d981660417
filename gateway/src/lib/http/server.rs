// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) DUSK NETWORK. All rights reserved.

//! Gateway construction and the HTTP server loop.

use std::net::SocketAddr;

use axum::routing::get;
use axum::{middleware, Router};
use tokio::net::TcpListener;
use tokio::signal;
use tracing::{error, info};

use crate::http::error::Error;
use crate::http::state::AppState;
use crate::http::{handler, middleware as stages};

/// The gateway: a fixed route table over shared [`AppState`], mediated by
/// the panic-containment and latency middlewares.
///
/// Construction runs the one-time sync gate against the upstream node.
/// Once the gate has failed there is no in-process recovery; the process
/// exits before listening and an external restart is the way back in.
/// Subsequent sync state is only re-observed when `/ready` is polled.
#[derive(Debug)]
pub struct Gateway {
    state: AppState,
}

impl Gateway {
    /// Builds the gateway, refusing while the upstream node is mid-sync.
    ///
    /// # Errors
    ///
    /// [`Error::Rpc`] when the startup sync probe cannot be completed, and
    /// [`Error::NodeSyncing`] when it reports an active sync.
    pub async fn build(state: AppState) -> Result<Self, Error> {
        if state.node().eth_syncing().await? {
            return Err(Error::NodeSyncing);
        }

        info!("startup sync probe passed, node is not syncing");
        Ok(Self { state })
    }

    /// Assembles the route table with both middleware stages applied to
    /// every route.
    pub fn router(&self) -> Router {
        Router::new()
            .route("/eth/balance/:address", get(handler::balance))
            .route("/live", get(handler::liveness))
            .route("/ready", get(handler::readiness))
            .route("/metrics", get(handler::metrics))
            .layer(middleware::from_fn(stages::observe_latency))
            .layer(middleware::from_fn(stages::contain_panics))
            .with_state(self.state.clone())
    }
}

/// Binds the listener and serves the gateway until a shutdown signal.
///
/// # Errors
///
/// Fails with [`Error::Io`] when the address cannot be bound or the
/// server loop errors out.
pub async fn run_server(
    bind_address: SocketAddr,
    gateway: Gateway,
) -> Result<(), Error> {
    let listener = TcpListener::bind(bind_address).await.map_err(|e| {
        error!(address = %bind_address, error = %e, "failed to bind HTTP listener");
        e
    })?;
    let local_addr = listener.local_addr()?;
    info!(address = %local_addr, "HTTP server listening");

    axum::serve(listener, gateway.router())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("server shutdown sequence finished");
    Ok(())
}

/// Resolves when the process receives SIGINT or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install CTRL+C signal handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received CTRL+C. Triggering shutdown..."),
        _ = terminate => info!("Received SIGTERM. Triggering shutdown..."),
    }
}
