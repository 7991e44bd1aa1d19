//! Captured stream files
//!
//! Either newline-delimited JSON or raw server-sent events. SSE captures are
//! decoded as an event stream, so one event's `data:` lines join into one
//! payload; events without data and the `[DONE]` sentinel are skipped.

use std::convert::Infallible;

use anyhow::Context;
use eventsource_stream::Eventsource;
use futures_util::StreamExt;
use serde_json::Value;

/// Parse every chunk in a capture, keeping per-frame failures in place
pub async fn frames(capture: &str) -> Vec<anyhow::Result<Value>> {
    if !is_sse(capture) {
        return capture
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(|line| serde_json::from_str(line).context("capture line is not valid JSON"))
            .collect();
    }

    // A trailing blank line closes an unterminated final event
    let body = format!("{capture}\n\n");

    futures_util::stream::iter([Ok::<_, Infallible>(body)])
        .eventsource()
        .filter_map(|event| async move {
            match event {
                Ok(event) => {
                    let data = event.data.trim();
                    if data.is_empty() || data == "[DONE]" {
                        return None;
                    }
                    Some(serde_json::from_str(data).with_context(|| format!("SSE event {:?} is not valid JSON", event.event)))
                }
                Err(e) => Some(Err(anyhow::anyhow!("malformed SSE capture: {e}"))),
            }
        })
        .collect()
        .await
}

fn is_sse(capture: &str) -> bool {
    capture.lines().any(|line| line.starts_with("data:"))
}
