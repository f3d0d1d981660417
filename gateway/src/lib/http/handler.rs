// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) DUSK NETWORK. All rights reserved.

//! Handlers behind the gateway's route table.
//!
//! Upstream failures never reach the caller verbatim: every client error
//! collapses into a generic [`ErrorResp`] with an appropriate status, and
//! the detail stays in the logs.

use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use tracing::{error, warn};

use crate::http::model::{Balance, ErrorResp};
use crate::http::state::AppState;

/// Content type stamped on bodyless JSON replies.
const JSON_CONTENT_TYPE: &str = "application/json; charset=UTF-8";

/// Hex digits in an account address, prefix excluded.
const ADDRESS_HEX_DIGITS: usize = 40;

/// `GET /eth/balance/{address}`
///
/// Validates the address before any upstream call; a malformed one is
/// rejected with 400 and no RPC is issued.
pub(crate) async fn balance(
    State(state): State<AppState>,
    Path(address): Path<String>,
) -> Response {
    if !is_hex_address(&address) {
        warn!(%address, "rejected malformed account address");
        return ErrorResp::new(StatusCode::BAD_REQUEST, "address is not valid")
            .into_response();
    }

    match state.node().get_account_balance(&address).await {
        Ok(amount) => (StatusCode::OK, Json(Balance::ether(amount))).into_response(),
        Err(error) => {
            error!(%address, %error, "failed to get balance from node");
            ErrorResp::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                "error getting balance from node",
            )
            .into_response()
        }
    }
}

/// `GET /live` — proves only that the listener accepts connections.
pub(crate) async fn liveness() -> Response {
    (StatusCode::OK, [(header::CONTENT_TYPE, JSON_CONTENT_TYPE)], ())
        .into_response()
}

/// `GET /ready` — re-evaluates the upstream sync state on every call,
/// with no memoised result.
pub(crate) async fn readiness(State(state): State<AppState>) -> Response {
    match state.node().eth_syncing().await {
        Ok(false) => {
            (StatusCode::OK, [(header::CONTENT_TYPE, JSON_CONTENT_TYPE)], ())
                .into_response()
        }
        Ok(true) => {
            warn!("node reports an active sync");
            ErrorResp::new(
                StatusCode::SERVICE_UNAVAILABLE,
                "RPC node is syncing at the moment",
            )
            .into_response()
        }
        Err(error) => {
            error!(%error, "failed to get eth_syncing info from node");
            ErrorResp::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                "error getting eth_syncing info",
            )
            .into_response()
        }
    }
}

/// `GET /metrics` — Prometheus text exposition from the injected handle.
pub(crate) async fn metrics(State(state): State<AppState>) -> String {
    state.metrics().render()
}

/// An account address is the `0x` prefix followed by exactly 40 hex
/// digits.
fn is_hex_address(address: &str) -> bool {
    match address
        .strip_prefix("0x")
        .or_else(|| address.strip_prefix("0X"))
    {
        Some(digits) => {
            digits.len() == ADDRESS_HEX_DIGITS
                && digits.bytes().all(|b| b.is_ascii_hexdigit())
        }
        None => false,
    }
}
