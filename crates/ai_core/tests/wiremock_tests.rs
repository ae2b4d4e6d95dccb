//! Integration tests for the hosted chat clients using WireMock
//!
//! These tests mock the OpenAI-compatible and Gemini HTTP APIs to verify
//! client behavior without network access.

use ai_core::{
    GeminiEngine, InferenceEngine, InferenceError, InferenceRequest, OpenAiCompatibleEngine,
    ProviderClientConfig,
};
use secrecy::SecretString;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_partial_json, header, method, path},
};

// =============================================================================
// Test Helpers
// =============================================================================

fn groq_config(base_url: &str) -> ProviderClientConfig {
    ProviderClientConfig::groq("llama-3.1-70b-versatile", SecretString::from("gsk-test"))
        .with_base_url(base_url)
        .with_timeout_ms(2000)
}

fn gemini_config(base_url: &str) -> ProviderClientConfig {
    ProviderClientConfig::gemini("gemini-1.5-flash", SecretString::from("g-test"))
        .with_base_url(base_url)
        .with_timeout_ms(2000)
}

fn chat_success_response(content: &str) -> serde_json::Value {
    serde_json::json!({
        "id": "chatcmpl-1",
        "model": "llama-3.1-70b-versatile",
        "choices": [{
            "index": 0,
            "message": {"role": "assistant", "content": content},
            "finish_reason": "stop"
        }],
        "usage": {"prompt_tokens": 12, "completion_tokens": 5, "total_tokens": 17}
    })
}

fn gemini_success_response(text: &str) -> serde_json::Value {
    serde_json::json!({
        "candidates": [{
            "content": {"role": "model", "parts": [{"text": text}]},
            "finishReason": "STOP"
        }],
        "usageMetadata": {"promptTokenCount": 8, "candidatesTokenCount": 3, "totalTokenCount": 11}
    })
}

// =============================================================================
// OpenAI-compatible engine
// =============================================================================

#[tokio::test]
async fn chat_completion_sends_system_user_and_temperature() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(header("authorization", "Bearer gsk-test"))
        .and(body_partial_json(serde_json::json!({
            "model": "llama-3.1-70b-versatile",
            "messages": [
                {"role": "system", "content": "S"},
                {"role": "user", "content": "namaste"}
            ],
            "temperature": 0.4
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(chat_success_response("  नमस्ते!  ")))
        .expect(1)
        .mount(&server)
        .await;

    let engine = OpenAiCompatibleEngine::new(groq_config(&server.uri())).unwrap();
    let response = engine
        .generate(InferenceRequest::with_system("S", "namaste"))
        .await
        .unwrap();

    assert_eq!(response.content, "नमस्ते!");
    assert_eq!(response.finish_reason.as_deref(), Some("stop"));
    assert_eq!(response.usage.unwrap().total_tokens, 17);
}

#[tokio::test]
async fn chat_completion_null_content_is_empty() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "choices": [{"message": {"role": "assistant", "content": null}}]
        })))
        .mount(&server)
        .await;

    let engine = OpenAiCompatibleEngine::new(groq_config(&server.uri())).unwrap();
    let response = engine.generate(InferenceRequest::simple("hi")).await.unwrap();

    assert_eq!(response.content, "");
    assert_eq!(response.model, "llama-3.1-70b-versatile");
}

#[tokio::test]
async fn chat_completion_without_choices_is_invalid() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"choices": []})))
        .mount(&server)
        .await;

    let engine = OpenAiCompatibleEngine::new(groq_config(&server.uri())).unwrap();
    let err = engine.generate(InferenceRequest::simple("hi")).await.unwrap_err();

    assert!(matches!(err, InferenceError::InvalidResponse(_)));
}

#[tokio::test]
async fn chat_completion_maps_auth_failure() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(401).set_body_string("invalid api key"))
        .mount(&server)
        .await;

    let engine = OpenAiCompatibleEngine::new(groq_config(&server.uri())).unwrap();
    let err = engine.generate(InferenceRequest::simple("hi")).await.unwrap_err();

    assert!(matches!(err, InferenceError::Unauthorized(_)));
}

#[tokio::test]
async fn chat_completion_maps_rate_limit() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&server)
        .await;

    let engine = OpenAiCompatibleEngine::new(groq_config(&server.uri())).unwrap();
    let err = engine.generate(InferenceRequest::simple("hi")).await.unwrap_err();

    assert!(matches!(err, InferenceError::RateLimited));
}

#[tokio::test]
async fn chat_completion_malformed_json_is_invalid() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let engine = OpenAiCompatibleEngine::new(groq_config(&server.uri())).unwrap();
    let err = engine.generate(InferenceRequest::simple("hi")).await.unwrap_err();

    assert!(matches!(err, InferenceError::InvalidResponse(_)));
}

#[tokio::test]
async fn chat_completion_times_out() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(chat_success_response("late"))
                .set_delay(std::time::Duration::from_millis(500)),
        )
        .mount(&server)
        .await;

    let engine =
        OpenAiCompatibleEngine::new(groq_config(&server.uri()).with_timeout_ms(100)).unwrap();
    let err = engine.generate(InferenceRequest::simple("hi")).await.unwrap_err();

    assert!(matches!(err, InferenceError::Timeout(100)));
}

// =============================================================================
// Gemini engine
// =============================================================================

#[tokio::test]
async fn gemini_sends_key_header_and_prompt() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/models/gemini-1.5-flash:generateContent"))
        .and(header("x-goog-api-key", "g-test"))
        .and(body_partial_json(serde_json::json!({
            "contents": [{"role": "user", "parts": [{"text": "S\n\nUser: hi\nAssistant (Hindi):"}]}]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(gemini_success_response("नमस्ते\n")))
        .expect(1)
        .mount(&server)
        .await;

    let engine = GeminiEngine::new(gemini_config(&server.uri())).unwrap();
    let response = engine
        .generate(InferenceRequest::simple("S\n\nUser: hi\nAssistant (Hindi):"))
        .await
        .unwrap();

    assert_eq!(response.content, "नमस्ते");
    assert_eq!(response.finish_reason.as_deref(), Some("STOP"));
    assert_eq!(response.usage.unwrap().prompt_tokens, 8);
}

#[tokio::test]
async fn gemini_blocked_prompt_is_empty_answer() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/models/gemini-1.5-flash:generateContent"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "promptFeedback": {"blockReason": "SAFETY"}
        })))
        .mount(&server)
        .await;

    let engine = GeminiEngine::new(gemini_config(&server.uri())).unwrap();
    let response = engine.generate(InferenceRequest::simple("x")).await.unwrap();

    assert!(response.content.is_empty());
}

#[tokio::test]
async fn gemini_unknown_model_is_not_available() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/models/gemini-1.5-flash:generateContent"))
        .respond_with(ResponseTemplate::new(404).set_body_string("models/gemini-1.5-flash is not found"))
        .mount(&server)
        .await;

    let engine = GeminiEngine::new(gemini_config(&server.uri())).unwrap();
    let err = engine.generate(InferenceRequest::simple("x")).await.unwrap_err();

    assert!(matches!(err, InferenceError::ModelNotAvailable(_)));
}

#[tokio::test]
async fn gemini_server_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/models/gemini-1.5-flash:generateContent"))
        .respond_with(ResponseTemplate::new(503).set_body_string("overloaded"))
        .mount(&server)
        .await;

    let engine = GeminiEngine::new(gemini_config(&server.uri())).unwrap();
    let err = engine.generate(InferenceRequest::simple("x")).await.unwrap_err();

    assert!(matches!(err, InferenceError::ServerError(ref msg) if msg.contains("overloaded")));
}

#[tokio::test]
async fn connection_refused_is_connection_failed() {
    let engine = GeminiEngine::new(gemini_config("http://127.0.0.1:9")).unwrap();
    let err = engine.generate(InferenceRequest::simple("x")).await.unwrap_err();

    assert!(matches!(err, InferenceError::ConnectionFailed(_)));
}
