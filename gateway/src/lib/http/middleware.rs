// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) DUSK NETWORK. All rights reserved.

//! Request-interceptor stages composed around every handler.
//!
//! Traversal order is [`contain_panics`] first, then [`observe_latency`],
//! then the handler. The stages are independent: containment can
//! short-circuit with a response, timing always wraps and forwards.

use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::time::Instant;

use axum::extract::{MatchedPath, Request};
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use futures_util::FutureExt;
use metrics::{counter, histogram};
use tracing::error;

use crate::http::metrics::{HTTP_REQUESTS_TOTAL, HTTP_REQUEST_DURATION_SECONDS};
use crate::http::model::ErrorResp;

/// Outermost stage: converts an unwinding handler into a plain 500.
///
/// A last-resort boundary. Fallible paths return `Result` and are mapped
/// by the handlers themselves; nothing may unwind past this stage into the
/// listener.
pub async fn contain_panics(request: Request, next: Next) -> Response {
    match AssertUnwindSafe(next.run(request)).catch_unwind().await {
        Ok(response) => response,
        Err(panic) => {
            error!(panic = panic_message(panic.as_ref()), "request handler panicked");
            ErrorResp::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                "unexpected internal error",
            )
            .into_response()
        }
    }
}

/// Times every request under its route template.
///
/// The histogram records through a drop guard, so the duration is observed
/// on normal completion and when a panic unwinds past this stage alike.
pub async fn observe_latency(request: Request, next: Next) -> Response {
    let path = request
        .extensions()
        .get::<MatchedPath>()
        .map(|matched| matched.as_str().to_owned())
        .unwrap_or_else(|| request.uri().path().to_owned());

    let timer = RequestTimer {
        path: path.clone(),
        started: Instant::now(),
    };
    let response = next.run(request).await;
    drop(timer);

    counter!(
        HTTP_REQUESTS_TOTAL,
        "path" => path,
        "status" => response.status().as_u16().to_string()
    )
    .increment(1);

    response
}

struct RequestTimer {
    path: String,
    started: Instant,
}

impl Drop for RequestTimer {
    fn drop(&mut self) {
        histogram!(HTTP_REQUEST_DURATION_SECONDS, "path" => self.path.clone())
            .record(self.started.elapsed().as_secs_f64());
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> &str {
    if let Some(message) = panic.downcast_ref::<&str>() {
        message
    } else if let Some(message) = panic.downcast_ref::<String>() {
        message
    } else {
        "opaque panic payload"
    }
}
