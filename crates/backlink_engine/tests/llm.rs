use backlink_engine::{ChatClient, ChatRequest, ChatSettings, DeepSeekClient, LlmError};
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client(server: &MockServer) -> DeepSeekClient {
    let settings = ChatSettings {
        api_url: format!("{}/v1/chat/completions", server.uri()),
        ..ChatSettings::new("test-key")
    };
    DeepSeekClient::new(settings).expect("client")
}

fn request() -> ChatRequest {
    ChatRequest {
        system: "be brief".to_string(),
        user: "hello".to_string(),
        temperature: 0.7,
        max_tokens: 500,
    }
}

#[tokio::test]
async fn sends_chat_payload_and_returns_first_choice() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(header("authorization", "Bearer test-key"))
        .and(body_partial_json(json!({
            "model": "deepseek-chat",
            "max_tokens": 500,
            "messages": [
                { "role": "system", "content": "be brief" },
                { "role": "user", "content": "hello" }
            ]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [
                { "message": { "role": "assistant", "content": "hi there" } },
                { "message": { "role": "assistant", "content": "ignored" } }
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let reply = client(&server).complete(request()).await.unwrap();
    assert_eq!(reply, "hi there");
}

#[tokio::test]
async fn api_error_keeps_status_and_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(401).set_body_string("bad key"))
        .mount(&server)
        .await;

    let err = client(&server).complete(request()).await.unwrap_err();
    match err {
        LlmError::Api { status, body } => {
            assert_eq!(status, 401);
            assert_eq!(body, "bad key");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn reply_without_choices_is_empty() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "choices": [] })))
        .mount(&server)
        .await;

    let err = client(&server).complete(request()).await.unwrap_err();
    assert!(matches!(err, LlmError::EmptyReply));
}

#[test]
fn blank_api_key_is_a_config_error() {
    let err = DeepSeekClient::new(ChatSettings::new("  ")).unwrap_err();
    assert!(matches!(err, LlmError::Config(_)));
}
