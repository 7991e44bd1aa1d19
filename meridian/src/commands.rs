use std::path::Path;

use anyhow::Context;
use meridian_llm::{aggregate_stream, chunk_adapter, response_adapter};
use meridian_registry::{ModelCapabilityResolver, Provider};
use serde_json::{Value, json};

use crate::args::Command;
use crate::capture;

/// Run one subcommand and return the document to print
pub async fn run(command: Command, resolver: &ModelCapabilityResolver) -> anyhow::Result<Value> {
    match command {
        Command::Normalize { provider, model, path } => {
            let raw = read_json(&path).await?;
            Ok(normalize(provider, &raw, model.as_deref(), resolver))
        }
        Command::Replay { provider, path } => replay(provider, &path, resolver).await,
        Command::Models { provider, path } => {
            let raw = read_json(&path).await?;
            let models = response_adapter(provider, &raw, None).list_models_with(resolver);
            tracing::info!(%provider, count = models.len(), "resolved model listing");
            Ok(serde_json::to_value(models)?)
        }
        Command::Resolve {
            provider,
            model,
            prompt_tokens,
            completion_tokens,
        } => {
            let info = resolver.resolve(&model, provider);
            let cost = info.estimate_cost(prompt_tokens, completion_tokens);
            Ok(json!({ "model": info, "estimated_cost": cost }))
        }
    }
}

fn normalize(provider: Provider, raw: &Value, model_hint: Option<&str>, resolver: &ModelCapabilityResolver) -> Value {
    let response = response_adapter(provider, raw, model_hint);
    let message = response.to_message();
    let usage = response.usage();
    let cost = response
        .model()
        .map(|model| resolver.resolve(model, provider))
        .and_then(|info| info.estimate_cost(usage.prompt_tokens, usage.completion_tokens));

    json!({
        "provider": provider,
        "id": response.id(),
        "model": response.model(),
        "created_at": response.created_at(),
        "finish_kind": response.finish_kind(),
        "message": message,
        "estimated_cost": cost,
    })
}

async fn replay(provider: Provider, path: &Path, resolver: &ModelCapabilityResolver) -> anyhow::Result<Value> {
    let capture = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("failed to read capture {}", path.display()))?;

    let frames = capture::frames(&capture).await;
    let model = frames
        .iter()
        .filter_map(|frame| frame.as_ref().ok())
        .find_map(|raw| chunk_adapter(provider, raw).model().map(str::to_owned));
    tracing::debug!(%provider, frames = frames.len(), model = model.as_deref(), "replaying capture");

    let message = aggregate_stream(provider, futures_util::stream::iter(frames))
        .await
        .with_context(|| format!("failed to replay {}", path.display()))?;

    let cost = model
        .as_deref()
        .map(|model| resolver.resolve(model, provider))
        .zip(message.usage)
        .and_then(|(info, usage)| info.estimate_cost(usage.prompt_tokens, usage.completion_tokens));

    Ok(json!({
        "provider": provider,
        "model": model,
        "finish_kind": message.finish_kind(),
        "message": message,
        "estimated_cost": cost,
    }))
}

async fn read_json(path: &Path) -> anyhow::Result<Value> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("failed to read {}", path.display()))?;

    serde_json::from_str(&raw).with_context(|| format!("{} is not valid JSON", path.display()))
}
