// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) DUSK NETWORK. All rights reserved.

//! Shared helpers for the integration suites: a scripted node adapter, a
//! stub upstream node, and spawn helpers serving routers on ephemeral
//! ports.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::post;
use axum::{Json, Router};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use serde_json::Value;
use tokio::net::TcpListener;

use gateway::http::server::Gateway;
use gateway::http::state::AppState;
use gateway::rpc::client::NodeAdapter;
use gateway::rpc::error::Error;

/// One scripted answer to an `eth_syncing` probe.
#[derive(Debug, Clone, Copy)]
pub enum SyncResult {
    NotSyncing,
    Syncing,
    Unreachable,
}

/// Node adapter answering from scripted results and counting calls.
#[derive(Debug, Default)]
pub struct MockNodeAdapter {
    balance: Option<String>,
    sync_script: Mutex<VecDeque<SyncResult>>,
    balance_calls: AtomicUsize,
    sync_calls: AtomicUsize,
}

impl MockNodeAdapter {
    /// Adapter whose balance lookups succeed with `balance` and whose sync
    /// probes report "not syncing".
    pub fn with_balance(balance: &str) -> Arc<Self> {
        Arc::new(Self {
            balance: Some(balance.to_string()),
            ..Default::default()
        })
    }

    /// Adapter whose balance lookups fail.
    pub fn with_failing_balance() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Adapter answering sync probes from `script` in order; once the
    /// script runs dry, probes report "not syncing".
    pub fn with_sync_script(script: Vec<SyncResult>) -> Arc<Self> {
        Arc::new(Self {
            sync_script: Mutex::new(script.into()),
            ..Default::default()
        })
    }

    pub fn balance_calls(&self) -> usize {
        self.balance_calls.load(Ordering::SeqCst)
    }

    pub fn sync_calls(&self) -> usize {
        self.sync_calls.load(Ordering::SeqCst)
    }

    fn scripted_error() -> Error {
        Error::Rpc {
            code: -32000,
            message: "scripted upstream failure".to_string(),
        }
    }
}

#[async_trait]
impl NodeAdapter for MockNodeAdapter {
    async fn get_account_balance(&self, _address: &str) -> Result<String, Error> {
        self.balance_calls.fetch_add(1, Ordering::SeqCst);
        self.balance.clone().ok_or_else(Self::scripted_error)
    }

    async fn eth_syncing(&self) -> Result<bool, Error> {
        self.sync_calls.fetch_add(1, Ordering::SeqCst);
        match self.sync_script.lock().unwrap().pop_front() {
            None | Some(SyncResult::NotSyncing) => Ok(false),
            Some(SyncResult::Syncing) => Ok(true),
            Some(SyncResult::Unreachable) => Err(Self::scripted_error()),
        }
    }
}

/// Detached Prometheus render handle, without touching the global
/// recorder.
pub fn metrics_handle() -> PrometheusHandle {
    PrometheusBuilder::new().build_recorder().handle()
}

/// Serves a router on an ephemeral port and returns its base URL.
pub async fn serve(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("failed to bind ephemeral port");
    let addr = listener.local_addr().expect("listener has a local address");

    tokio::spawn(async move {
        axum::serve(listener, router)
            .await
            .expect("test server failed");
    });

    format!("http://{addr}")
}

/// Boots a gateway over the given adapter and returns its base URL.
pub async fn spawn_gateway(node: Arc<MockNodeAdapter>) -> String {
    let state = AppState::new(node, metrics_handle());
    let gateway = Gateway::build(state)
        .await
        .expect("gateway construction should pass the sync gate");
    serve(gateway.router()).await
}

/// A captured upstream request.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub accepts: String,
    pub envelope: Value,
}

#[derive(Clone)]
struct StubState {
    responses: Arc<Vec<(String, StatusCode, String)>>,
    fallback: (StatusCode, String),
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

/// Scripted JSON-RPC node: answers POSTs from a per-method script (or a
/// catch-all), recording what it received.
pub struct StubNode {
    pub url: String,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl StubNode {
    /// Stub answering every request with the same status and body.
    pub async fn spawn(status: u16, body: impl Into<String>) -> Self {
        Self::start(Vec::new(), (status, body.into())).await
    }

    /// Stub answering per JSON-RPC method; unmatched methods get a 404.
    pub async fn spawn_scripted(responses: Vec<(&str, u16, &str)>) -> Self {
        let responses = responses
            .into_iter()
            .map(|(method, status, body)| {
                (method.to_string(), status, body.to_string())
            })
            .collect();
        Self::start(responses, (404, String::new())).await
    }

    async fn start(
        responses: Vec<(String, u16, String)>,
        fallback: (u16, String),
    ) -> Self {
        let requests = Arc::new(Mutex::new(Vec::new()));
        let state = StubState {
            responses: Arc::new(
                responses
                    .into_iter()
                    .map(|(method, status, body)| {
                        (method, stub_status(status), body)
                    })
                    .collect(),
            ),
            fallback: (stub_status(fallback.0), fallback.1),
            requests: Arc::clone(&requests),
        };
        let router = Router::new().route("/", post(answer)).with_state(state);
        let url = serve(router).await;

        Self { url, requests }
    }

    /// Request envelopes received so far.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }
}

fn stub_status(status: u16) -> StatusCode {
    StatusCode::from_u16(status).expect("valid status code")
}

async fn answer(
    State(state): State<StubState>,
    headers: HeaderMap,
    Json(envelope): Json<Value>,
) -> (StatusCode, String) {
    let accepts = headers
        .get("Accepts")
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_string();

    let method = envelope["method"].as_str().unwrap_or_default().to_string();
    state
        .requests
        .lock()
        .unwrap()
        .push(RecordedRequest { accepts, envelope });

    let (status, body) = state
        .responses
        .iter()
        .find(|(scripted, _, _)| *scripted == method)
        .map(|(_, status, body)| (*status, body.clone()))
        .unwrap_or_else(|| state.fallback.clone());

    (status, body)
}
