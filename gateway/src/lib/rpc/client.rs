// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) DUSK NETWORK. All rights reserved.

//! JSON-RPC request framing and the node capability seam.
//!
//! [`RpcClient`] issues one synchronous JSON-RPC call per operation over an
//! injected [`reqwest::Client`]. The gateway never depends on it directly:
//! handlers see the [`NodeAdapter`] trait, so tests (and any future
//! transport) plug in structurally.

use std::fmt::Debug;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::debug;
use url::Url;

use crate::rpc::error::Error;
use crate::rpc::units;

/// JSON-RPC protocol version sent with every request.
const JSONRPC_VERSION: &str = "2.0";

/// Fixed request id. The client is single-call and synchronous per
/// operation, so no id correlation is needed.
const REQUEST_ID: u32 = 1;

/// Block tag selecting the latest state.
const BLOCK_LATEST: &str = "latest";

/// Method returning an account balance in wei.
const METHOD_GET_BALANCE: &str = "eth_getBalance";

/// Method reporting the node's sync status.
const METHOD_SYNCING: &str = "eth_syncing";

/// Operations the gateway requires from an Ethereum node.
///
/// Implementations must be thread-safe; a single instance is shared by
/// every in-flight request. Both operations issue exactly one upstream
/// call and are never retried.
#[async_trait]
pub trait NodeAdapter: Send + Sync + Debug + 'static {
    /// Balance of `address` at the latest block, as a decimal ether string.
    async fn get_account_balance(&self, address: &str) -> Result<String, Error>;

    /// Whether the node is currently syncing.
    async fn eth_syncing(&self) -> Result<bool, Error>;
}

/// A JSON-RPC request envelope, constructed fresh per call.
#[derive(Debug, Serialize)]
struct RpcRequest<'a> {
    jsonrpc: &'static str,
    id: u32,
    method: &'a str,
    params: Vec<Value>,
}

/// A JSON-RPC response envelope.
///
/// A non-null `error` takes precedence over `result`; the result is never
/// consumed then.
#[derive(Debug, Deserialize)]
struct RpcResponse {
    #[serde(default)]
    jsonrpc: String,
    #[serde(default)]
    id: Option<u32>,
    #[serde(default)]
    result: Value,
    error: Option<RpcError>,
}

/// The error object carried in a failed JSON-RPC response.
#[derive(Debug, Deserialize)]
struct RpcError {
    code: i64,
    message: String,
}

/// JSON-RPC client over HTTP.
///
/// Holds no state beyond the injected transport handle and the endpoint;
/// the transport carries the per-call timeout and is safe to share across
/// concurrent requests.
#[derive(Debug, Clone)]
pub struct RpcClient {
    client: reqwest::Client,
    endpoint: Url,
}

impl RpcClient {
    /// Creates a client over an injected transport.
    pub fn new(client: reqwest::Client, endpoint: Url) -> Self {
        Self { client, endpoint }
    }

    /// Issues a single JSON-RPC call and decodes the typed result.
    ///
    /// # Errors
    ///
    /// [`Error::Transport`] when the request cannot be completed,
    /// [`Error::UpstreamStatus`] on a non-2xx reply, [`Error::Decode`] when
    /// the body or the result shape cannot be parsed, and [`Error::Rpc`]
    /// when the envelope carries an error object.
    async fn call<T>(&self, method: &str, params: Vec<Value>) -> Result<T, Error>
    where
        T: serde::de::DeserializeOwned,
    {
        let request = RpcRequest {
            jsonrpc: JSONRPC_VERSION,
            id: REQUEST_ID,
            method,
            params,
        };

        let response = self
            .client
            .post(self.endpoint.clone())
            .header("Accepts", "application/json")
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        let body = response.bytes().await?;
        if !status.is_success() {
            return Err(Error::UpstreamStatus {
                status: status.as_u16(),
                body: String::from_utf8_lossy(&body).into_owned(),
            });
        }

        let envelope: RpcResponse = serde_json::from_slice(&body)?;
        debug!(
            method,
            id = envelope.id,
            version = %envelope.jsonrpc,
            "decoded JSON-RPC envelope"
        );

        if let Some(error) = envelope.error {
            return Err(Error::Rpc {
                code: error.code,
                message: error.message,
            });
        }

        Ok(serde_json::from_value(envelope.result)?)
    }
}

#[async_trait]
impl NodeAdapter for RpcClient {
    async fn get_account_balance(&self, address: &str) -> Result<String, Error> {
        let wei: String = self
            .call(
                METHOD_GET_BALANCE,
                vec![json!(address), json!(BLOCK_LATEST)],
            )
            .await?;

        units::wei_to_ether(&wei)
    }

    async fn eth_syncing(&self) -> Result<bool, Error> {
        self.call(METHOD_SYNCING, Vec::new()).await
    }
}
