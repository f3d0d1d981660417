// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) DUSK NETWORK. All rights reserved.

//! HTTP metrics collection.
//!
//! Uses the `metrics` facade for recording and
//! `metrics-exporter-prometheus` for exposition. The recorder is built and
//! installed once at startup by [`init_metrics_recorder`]; the returned
//! [`PrometheusHandle`] is the render side, stored in
//! [`AppState`](crate::http::state::AppState) and served by the `/metrics`
//! route.

use metrics::{describe_counter, describe_histogram, Unit};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};
use tracing::info;

/// Histogram of HTTP request latency in seconds.
/// Labels: `path`.
pub const HTTP_REQUEST_DURATION_SECONDS: &str = "http_request_duration_seconds";

/// Counter of HTTP requests served.
/// Labels: `path`, `status`.
pub const HTTP_REQUESTS_TOTAL: &str = "http_requests_total";

/// Registers the gateway metrics with the `metrics` registry.
///
/// Called once after the recorder is installed; adds descriptions and
/// units.
pub fn register_http_metrics() {
    describe_histogram!(
        HTTP_REQUEST_DURATION_SECONDS,
        Unit::Seconds,
        "Duration of HTTP requests"
    );

    describe_counter!(
        HTTP_REQUESTS_TOTAL,
        Unit::Count,
        "Total number of HTTP requests served"
    );
}

/// Installs the Prometheus recorder and returns the handle used to render
/// the metrics page.
///
/// # Errors
///
/// Fails with a [`BuildError`] when a recorder is already installed, so
/// this must run exactly once during startup.
pub fn init_metrics_recorder() -> Result<PrometheusHandle, BuildError> {
    info!("Initializing Prometheus metrics recorder");

    let handle = PrometheusBuilder::new().install_recorder()?;
    register_http_metrics();

    info!("Prometheus metrics recorder installed and metrics registered");
    Ok(handle)
}
