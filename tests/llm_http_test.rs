//! Tests for the HTTP chat transport against a mock server.

use commitgen::config::Provider;
use commitgen::error::LlmError;
use commitgen::llm::{ChatMessage, ChatRequest, ChatTransport, Destination, HttpTransport};
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, header_exists, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn destination(server: &MockServer, provider: Provider) -> Destination {
    Destination {
        provider,
        endpoint: format!("{}/v1/chat/completions", server.uri()),
        api_key: "sk-test".to_string(),
        referer: Some("https://example.com".to_string()),
        title: Some("commitgen".to_string()),
    }
}

fn request() -> ChatRequest {
    ChatRequest {
        model: "gpt-5-nano".to_string(),
        messages: vec![ChatMessage::system("sys"), ChatMessage::user("describe")],
        temperature: Some(1.0),
        max_tokens: Some(300),
    }
}

#[tokio::test]
async fn test_successful_completion() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(header("authorization", "Bearer sk-test"))
        .and(body_partial_json(json!({
            "model": "gpt-5-nano",
            "max_completion_tokens": 300,
            "messages": [{"role": "system", "content": "sys"}, {"role": "user", "content": "describe"}]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{"message": {"role": "assistant", "content": "feat(api): add pagination"}}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let transport = HttpTransport::new().unwrap();
    let reply = transport
        .send(&destination(&server, Provider::OpenAi), &request())
        .await
        .unwrap();
    assert_eq!(reply, "feat(api): add pagination");
}

#[tokio::test]
async fn test_openrouter_sends_attribution_headers() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(header("http-referer", "https://example.com"))
        .and(header("x-title", "commitgen"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{"text": "fix: handle timeout"}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let transport = HttpTransport::new().unwrap();
    let reply = transport
        .send(&destination(&server, Provider::OpenRouter), &request())
        .await
        .unwrap();
    assert_eq!(reply, "fix: handle timeout");
}

#[tokio::test]
async fn test_openai_omits_attribution_headers() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(header_exists("x-title"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{"message": {"content": "chore: bump"}}]
        })))
        .mount(&server)
        .await;

    let transport = HttpTransport::new().unwrap();
    let reply = transport
        .send(&destination(&server, Provider::OpenAi), &request())
        .await
        .unwrap();
    assert_eq!(reply, "chore: bump");
}

#[tokio::test]
async fn test_error_status_carries_truncated_body() {
    let server = MockServer::start().await;
    let long_body = "x".repeat(10_000);

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(429).set_body_string(long_body))
        .mount(&server)
        .await;

    let transport = HttpTransport::new().unwrap();
    let err = transport
        .send(&destination(&server, Provider::OpenAi), &request())
        .await
        .unwrap_err();

    match &err {
        LlmError::Http { status, body } => {
            assert_eq!(*status, 429);
            assert_eq!(body.len(), 4096);
        }
        other => panic!("expected http error, got {other:?}"),
    }
    assert!(err.is_transient());
}

#[tokio::test]
async fn test_empty_choices() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"choices": []})))
        .mount(&server)
        .await;

    let transport = HttpTransport::new().unwrap();
    let err = transport
        .send(&destination(&server, Provider::OpenAi), &request())
        .await
        .unwrap_err();
    assert!(matches!(err, LlmError::NoChoices));
    assert!(!err.is_transient());
}

#[tokio::test]
async fn test_malformed_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let transport = HttpTransport::new().unwrap();
    let err = transport
        .send(&destination(&server, Provider::OpenAi), &request())
        .await
        .unwrap_err();
    assert!(matches!(err, LlmError::InvalidResponse(_)));
}
