mod harness;

use harness::fixtures::{ANTHROPIC_STREAM, OPENAI_STREAM, frames};
use meridian_llm::{FinishReason, Provider, StreamAggregator, StreamError, aggregate, aggregate_stream, chunk_adapter};
use serde_json::{Value, json};

#[test]
fn providers_produce_the_same_canonical_message() {
    let openai = aggregate(Provider::OpenAi, &frames(OPENAI_STREAM)).unwrap();
    let anthropic = aggregate(Provider::Anthropic, &frames(ANTHROPIC_STREAM)).unwrap();

    assert_eq!(openai.content, "Checking the weather.");
    assert_eq!(anthropic.content, openai.content);
    assert_eq!(anthropic.usage, openai.usage);
    assert_eq!(openai.finish_kind(), Some(FinishReason::ToolCalls));
    assert_eq!(anthropic.finish_kind(), openai.finish_kind());

    for message in [&openai, &anthropic] {
        assert_eq!(message.tool_calls.len(), 1);
        let call = &message.tool_calls[0];
        assert_eq!(call.index, 0);
        assert_eq!(call.name, "get_weather");
        assert_eq!(call.arguments_raw, r#"{"location":"Rome"}"#);
        assert_eq!(call.arguments, Ok(json!({"location": "Rome"})));
    }
    assert_eq!(openai.tool_calls[0].id.as_deref(), Some("call_w1"));
    assert_eq!(anthropic.tool_calls[0].id.as_deref(), Some("toolu_w1"));
}

#[test]
fn content_equals_concatenated_text_fragments() {
    for (provider, capture) in [(Provider::OpenAi, OPENAI_STREAM), (Provider::Anthropic, ANTHROPIC_STREAM)] {
        let chunks = frames(capture);
        let concatenated: String = chunks
            .iter()
            .filter_map(|raw| chunk_adapter(provider, raw).text_fragment().map(str::to_owned))
            .collect();

        assert_eq!(aggregate(provider, &chunks).unwrap().content, concatenated);
    }
}

#[test]
fn partial_state_is_inspectable_when_consumption_stops() {
    let chunks = frames(OPENAI_STREAM);
    let mut aggregator = StreamAggregator::new();
    for raw in &chunks[..5] {
        aggregator.fold(&*chunk_adapter(Provider::OpenAi, raw)).unwrap();
    }

    let state = aggregator.state();
    assert_eq!(state.content(), "Checking the weather.");
    assert_eq!(state.model(), Some("gpt-4o-2024-08-06"));
    assert_eq!(state.tool_buffers()[&0].name, "get_weather");
    assert_eq!(state.tool_buffers()[&0].arguments_raw, r#"{"location":"#);
    assert!(!state.is_ended());

    assert_eq!(aggregator.finalize(), Err(StreamError::NotEnded { chunks: 5 }));
}

#[test]
fn truncated_capture_is_not_a_message() {
    let mut chunks = frames(ANTHROPIC_STREAM);
    chunks.pop();

    let err = aggregate(Provider::Anthropic, &chunks).unwrap_err();
    assert!(matches!(err, StreamError::NotEnded { .. }));
}

#[test]
fn replaying_a_capture_twice_into_one_aggregator_is_rejected() {
    let chunks = frames(OPENAI_STREAM);
    let doubled: Vec<&Value> = chunks.iter().chain(chunks.iter()).collect();

    let err = aggregate(Provider::OpenAi, doubled).unwrap_err();
    assert_eq!(err, StreamError::DuplicateStart { position: chunks.len() });
}

#[tokio::test(flavor = "multi_thread")]
async fn concurrent_streams_use_independent_aggregators() {
    let streams = (0..8).map(|n| {
        let (provider, capture) = if n % 2 == 0 {
            (Provider::OpenAi, OPENAI_STREAM)
        } else {
            (Provider::Anthropic, ANTHROPIC_STREAM)
        };
        let (tx, rx) = futures::channel::mpsc::unbounded::<Result<Value, std::io::Error>>();

        tokio::spawn(async move {
            for frame in frames(capture) {
                tx.unbounded_send(Ok(frame)).unwrap();
                tokio::task::yield_now().await;
            }
        });

        aggregate_stream(provider, rx)
    });

    for message in futures::future::join_all(streams).await {
        let message = message.unwrap();
        assert_eq!(message.content, "Checking the weather.");
        assert_eq!(message.tool_calls.len(), 1);
        assert_eq!(message.tool_calls[0].arguments, Ok(json!({"location": "Rome"})));
    }
}
