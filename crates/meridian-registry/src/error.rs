//! Registry-specific error types

use thiserror::Error;

/// Errors raised while building a resolver from configuration
///
/// Resolution itself never fails.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// Override pattern is not a valid regex
    #[error("invalid model pattern `{pattern}`: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// Override names a provider this crate does not know
    #[error("unknown provider: {provider}")]
    UnknownProvider { provider: String },
}
