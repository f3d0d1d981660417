// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) DUSK NETWORK. All rights reserved.

//! Outbound response bodies.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

/// Unit reported with every balance.
pub const UNIT_ETHER: &str = "ether";

/// Successful balance lookup body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Balance {
    pub balance: String,
    pub unit: String,
}

impl Balance {
    /// Wraps a decimal ether amount.
    pub fn ether(balance: impl Into<String>) -> Self {
        Self {
            balance: balance.into(),
            unit: UNIT_ETHER.to_string(),
        }
    }
}

/// Uniform body for every handler-level failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResp {
    pub message: String,
    pub code: u16,
}

impl ErrorResp {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code: status.as_u16(),
        }
    }
}

impl IntoResponse for ErrorResp {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.code)
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self)).into_response()
    }
}
