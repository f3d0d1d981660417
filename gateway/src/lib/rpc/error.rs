// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) DUSK NETWORK. All rights reserved.

use thiserror::Error;

/// Errors returned by the JSON-RPC client.
///
/// Callers decide how much of this reaches their own clients; the gateway
/// handlers collapse every variant into a generic message and keep the
/// detail for the logs.
#[derive(Debug, Error)]
pub enum Error {
    /// The upstream call could not be completed.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
    /// The upstream answered outside the 2xx class. The raw body is kept
    /// for diagnostics.
    #[error("request failed, status code {status}, response: {body}")]
    UpstreamStatus { status: u16, body: String },
    /// The response body was not valid JSON, or the result did not have the
    /// shape the operation expects.
    #[error("failed to decode upstream response: {0}")]
    Decode(#[from] serde_json::Error),
    /// The node returned a well-formed JSON-RPC error object.
    #[error("rpc call failed, code {code}, message: {message}")]
    Rpc { code: i64, message: String },
    /// The balance result was not a well-formed integer wei amount.
    #[error("not a well-formed wei amount: {0}")]
    Conversion(String),
}
