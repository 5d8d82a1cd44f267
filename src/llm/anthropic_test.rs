// ABOUTME: Tests for Anthropic provider type conversions.
// ABOUTME: Verifies serialization matches the Anthropic Messages API format.

use super::*;

#[test]
fn test_request_defaults() {
    let params = GenerationParams::new();
    let request = AnthropicRequest::new("Hello", &params, ANTHROPIC_DEFAULT_MODEL);

    assert_eq!(request.model, "claude-3-5-haiku-20241022");
    assert_eq!(request.max_tokens, ANTHROPIC_DEFAULT_MAX_TOKENS);
    assert_eq!(request.messages.len(), 1);
    assert_eq!(request.messages[0].role, "user");
    assert_eq!(request.messages[0].content, "Hello");
}

#[test]
fn test_request_json_format() {
    let params = GenerationParams::new()
        .model("claude-3-haiku-20240307")
        .max_tokens(512)
        .extra("top_k", serde_json::json!(40));
    let request = AnthropicRequest::new("Hello", &params, ANTHROPIC_DEFAULT_MODEL);

    let json = serde_json::to_value(&request).unwrap();
    assert_eq!(json["model"], "claude-3-haiku-20240307");
    assert_eq!(json["max_tokens"], 512);
    assert_eq!(json["messages"][0]["role"], "user");
    assert_eq!(json["messages"][0]["content"], "Hello");
    assert_eq!(json["top_k"], 40);
    // Absent optionals are omitted, not serialized as null
    assert!(json.get("temperature").is_none());
    assert!(json.get("stream").is_none());
}

#[test]
fn test_response_deserialization() {
    let json = r#"{
        "id": "msg_123",
        "model": "claude-3-5-haiku-20241022",
        "content": [{"type": "text", "text": "Hello!"}]
    }"#;

    let response: AnthropicResponse = serde_json::from_str(json).unwrap();
    assert_eq!(response.id, "msg_123");
    let text = response.content.into_iter().find_map(|block| match block {
        AnthropicContent::Text { text } => Some(text),
        AnthropicContent::Other => None,
    });
    assert_eq!(text.as_deref(), Some("Hello!"));
}

#[test]
fn test_response_skips_non_text_blocks() {
    let json = r#"{
        "id": "msg_456",
        "model": "claude-3-5-haiku-20241022",
        "content": [
            {"type": "thinking", "thinking": "hmm"},
            {"type": "text", "text": "Answer"}
        ]
    }"#;

    let response: AnthropicResponse = serde_json::from_str(json).unwrap();
    let text = response.content.into_iter().find_map(|block| match block {
        AnthropicContent::Text { text } => Some(text),
        AnthropicContent::Other => None,
    });
    assert_eq!(text.as_deref(), Some("Answer"));
}

#[test]
fn test_stream_event_text_delta() {
    let json = r#"{"type":"content_block_delta","index":0,"delta":{"type":"text_delta","text":"Hel"}}"#;
    let event: AnthropicStreamEvent = serde_json::from_str(json).unwrap();

    match event {
        AnthropicStreamEvent::ContentBlockDelta { index, delta } => {
            assert_eq!(index, 0);
            match delta {
                AnthropicStreamDelta::TextDelta { text } => assert_eq!(text, "Hel"),
                other => panic!("unexpected delta: {other:?}"),
            }
        }
        other => panic!("unexpected event: {other:?}"),
    }
}

#[test]
fn test_stream_event_error() {
    let json = r#"{"type":"error","error":{"type":"overloaded_error","message":"Overloaded"}}"#;
    let event: AnthropicStreamEvent = serde_json::from_str(json).unwrap();

    match event {
        AnthropicStreamEvent::Error { error } => {
            assert_eq!(error.error_type, "overloaded_error");
            assert_eq!(error.message, "Overloaded");
        }
        other => panic!("unexpected event: {other:?}"),
    }
}

#[test]
fn test_stream_event_unhandled_types_ignored() {
    for json in [
        r#"{"type":"message_start","message":{"id":"msg_1"}}"#,
        r#"{"type":"ping"}"#,
        r#"{"type":"content_block_stop","index":0}"#,
    ] {
        let event: AnthropicStreamEvent = serde_json::from_str(json).unwrap();
        assert!(matches!(event, AnthropicStreamEvent::Other), "{json}");
    }
}

#[test]
fn test_error_response_deserialization() {
    let json = r#"{
        "type": "error",
        "error": {"type": "authentication_error", "message": "invalid x-api-key"}
    }"#;

    let error: AnthropicError = serde_json::from_str(json).unwrap();
    assert_eq!(error.error.message, "invalid x-api-key");
}

#[test]
fn test_available_models() {
    let provider = AnthropicProvider::new("sk-test");
    assert_eq!(provider.available_models(), ANTHROPIC_MODELS);
    assert!(provider.available_models().contains(&ANTHROPIC_DEFAULT_MODEL));
}
