// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) DUSK NETWORK. All rights reserved.

//! Gateway configuration.
//!
//! Defaults, overlaid by an optional TOML file; the binary applies CLI
//! overrides on top and validates the merged result before anything else
//! starts.

use std::net::SocketAddr;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::Level;

/// Port the service binds when none is configured.
const DEFAULT_PORT: u16 = 1903;

/// Accepted log output formats.
const LOG_TYPES: [&str; 3] = ["json", "plain", "coloured"];

/// Errors raised while loading or validating the configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Error reading the configuration file.
    #[error("failed to read configuration file: {0}")]
    FileRead(#[from] std::io::Error),
    /// Error parsing the TOML content.
    #[error("failed to parse configuration file: {0}")]
    Parse(#[from] toml::de::Error),
    /// A value failed validation.
    #[error("invalid configuration: {0}")]
    Validation(String),
}

/// Gateway configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Address the HTTP listener binds to.
    pub bind_address: SocketAddr,
    /// Per-call deadline applied to the upstream transport; the only
    /// deadline mechanism in the request path.
    #[serde(with = "humantime_serde")]
    pub request_timeout: Duration,
    /// Connection establishment deadline for the upstream transport.
    #[serde(with = "humantime_serde")]
    pub connect_timeout: Duration,
    /// Log verbosity, one of `trace|debug|info|warn|error`.
    pub log_level: String,
    /// Log output format, one of `json|plain|coloured`.
    pub log_type: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_address: ([0, 0, 0, 0], DEFAULT_PORT).into(),
            request_timeout: Duration::from_secs(10),
            connect_timeout: Duration::from_secs(30),
            log_level: "info".into(),
            log_type: "coloured".into(),
        }
    }
}

impl Config {
    /// Loads the configuration: defaults when `path` is `None`, otherwise
    /// the given TOML file over the defaults.
    ///
    /// The result is not validated here; callers run [`Config::validate`]
    /// once their own overrides are applied.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Ok(toml::from_str(&std::fs::read_to_string(path)?)?),
            None => Ok(Self::default()),
        }
    }

    /// Parsed log verbosity.
    pub fn log_level(&self) -> Level {
        Level::from_str(&self.log_level).unwrap_or(Level::INFO)
    }

    /// Rejects values the service cannot run with.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Validation`] on zero timeouts or unknown log
    /// settings.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.request_timeout.is_zero() {
            return Err(ConfigError::Validation(
                "request_timeout cannot be zero".into(),
            ));
        }
        if self.connect_timeout.is_zero() {
            return Err(ConfigError::Validation(
                "connect_timeout cannot be zero".into(),
            ));
        }
        if Level::from_str(&self.log_level).is_err() {
            return Err(ConfigError::Validation(format!(
                "unknown log_level `{}`",
                self.log_level
            )));
        }
        if !LOG_TYPES.contains(&self.log_type.as_str()) {
            return Err(ConfigError::Validation(format!(
                "unknown log_type `{}`",
                self.log_type
            )));
        }
        Ok(())
    }
}
