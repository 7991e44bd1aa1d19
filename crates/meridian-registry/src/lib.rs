//! Model capability and pricing resolution
//!
//! Maps an opaque model identifier to a [`ModelInfo`] record using ordered
//! pattern tables: for every attribute the first matching rule wins, so
//! rules for newer or more specific model families sit above the general
//! catch-alls. Resolution is total; unknown identifiers get the provider's
//! default tier.

#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

pub mod display;
pub mod error;
pub mod model;
pub mod provider;
pub mod resolver;
mod rules;

pub use error::RegistryError;
pub use model::ModelInfo;
pub use provider::Provider;
pub use resolver::{ModelCapabilityResolver, resolve};
