// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) DUSK NETWORK. All rights reserved.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use reqwest::ClientBuilder;
use tracing::info;
use url::Url;

use gateway::config::Config;
use gateway::http::metrics::init_metrics_recorder;
use gateway::http::server::{run_server, Gateway};
use gateway::http::state::AppState;
use gateway::rpc::client::RpcClient;

#[derive(Debug, Parser)]
#[command(
    name = "eth-gateway",
    version,
    about = "REST gateway over an Ethereum node's JSON-RPC endpoint"
)]
struct Args {
    /// JSON-RPC endpoint of the upstream Ethereum node.
    node_url: Url,

    /// Configuration file path.
    #[arg(short, long, env = "ETH_GATEWAY_CONFIG")]
    config: Option<PathBuf>,

    /// Address to bind the HTTP listener to.
    #[arg(long)]
    bind_address: Option<SocketAddr>,

    /// Log verbosity, one of `trace|debug|info|warn|error`.
    #[arg(long)]
    log_level: Option<String>,

    /// Log output format, one of `json|plain|coloured`.
    #[arg(long)]
    log_type: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut config = Config::load(args.config.as_deref())
        .context("error loading configuration")?;
    if let Some(bind_address) = args.bind_address {
        config.bind_address = bind_address;
    }
    if let Some(log_level) = args.log_level {
        config.log_level = log_level;
    }
    if let Some(log_type) = args.log_type {
        config.log_type = log_type;
    }
    config.validate().context("error validating configuration")?;

    // Generate a subscriber with the desired log level.
    let subscriber = tracing_subscriber::fmt::Subscriber::builder()
        .with_max_level(config.log_level());

    // Set the subscriber as global, so every thread uses it for the
    // remainder of the program.
    match config.log_type.as_str() {
        "json" => {
            let subscriber = subscriber.json().flatten_event(true).finish();
            tracing::subscriber::set_global_default(subscriber)?;
        }
        "plain" => {
            let subscriber = subscriber.with_ansi(false).finish();
            tracing::subscriber::set_global_default(subscriber)?;
        }
        "coloured" => {
            let subscriber = subscriber.finish();
            tracing::subscriber::set_global_default(subscriber)?;
        }
        _ => unreachable!(),
    }

    let metrics_handle =
        init_metrics_recorder().context("error installing metrics recorder")?;

    let transport = ClientBuilder::new()
        .timeout(config.request_timeout)
        .connect_timeout(config.connect_timeout)
        .build()
        .context("error building upstream HTTP client")?;
    let client = RpcClient::new(transport, args.node_url);

    let state = AppState::new(Arc::new(client), metrics_handle);
    let gateway = Gateway::build(state)
        .await
        .context("error initializing gateway")?;
    info!("Service is ready");

    run_server(config.bind_address, gateway)
        .await
        .context("server error")?;

    Ok(())
}
