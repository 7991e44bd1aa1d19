//! Configuration for Meridian
//!
//! A single TOML document with `{{ env.VAR }}` placeholders, expanded before
//! deserialization. Every section is optional.

#![allow(clippy::must_use_candidate)]

mod env;
mod loader;
pub mod models;
pub mod telemetry;

use serde::Deserialize;

pub use models::*;
pub use telemetry::*;

/// Top-level Meridian configuration
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Logging configuration
    #[serde(default)]
    pub telemetry: TelemetryConfig,
    /// Model capability and pricing overrides
    #[serde(default)]
    pub models: ModelsConfig,
}
