use std::path::PathBuf;

use clap::{Parser, Subcommand};
use meridian_registry::Provider;

/// Meridian payload inspector
#[derive(Debug, Parser)]
#[command(name = "meridian", about = "Normalise captured OpenAI and Anthropic payloads")]
pub struct Args {
    /// Path to configuration file
    #[arg(short, long, env = "MERIDIAN_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log filter used when neither `RUST_LOG` nor the configuration sets one
    #[arg(long, default_value = "warn")]
    pub log_filter: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the canonical view of a complete response payload
    Normalize {
        /// Vendor that produced the payload
        #[arg(short, long)]
        provider: Provider,
        /// Model id to assume when the payload does not report one
        #[arg(short, long)]
        model: Option<String>,
        /// JSON file holding the payload
        path: PathBuf,
    },
    /// Fold a captured stream (NDJSON or SSE) into one message
    Replay {
        #[arg(short, long)]
        provider: Provider,
        /// Capture file, one chunk per line or per `data:` line
        path: PathBuf,
    },
    /// Resolve every model in a listing payload
    Models {
        #[arg(short, long)]
        provider: Provider,
        /// JSON file holding the listing
        path: PathBuf,
    },
    /// Resolve capability and pricing for one model id
    Resolve {
        #[arg(short, long)]
        provider: Provider,
        model: String,
        /// Prompt tokens to price
        #[arg(long, default_value_t = 0)]
        prompt_tokens: u64,
        /// Completion tokens to price
        #[arg(long, default_value_t = 0)]
        completion_tokens: u64,
    },
}
