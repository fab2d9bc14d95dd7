//! End-to-end tests of the OpenAI client against a one-shot local HTTP server.

use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use costbench::chat::{ChatConfig, ChatSession};
use costbench::{ChatCompletionRequest, ChatMessage, CompletionService, Model, OpenAi};

/// Serves exactly one HTTP response and hands back the raw request it received.
async fn serve_once(status: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut raw = Vec::new();
        let mut buf = [0u8; 4096];
        loop {
            let n = socket.read(&mut buf).await.unwrap();
            if n == 0 {
                break;
            }
            raw.extend_from_slice(&buf[..n]);
            if request_complete(&raw) {
                break;
            }
        }
        let response = format!(
            "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        socket.shutdown().await.unwrap();
        String::from_utf8(raw).unwrap()
    });
    (format!("http://{addr}/v1"), handle)
}

fn request_complete(raw: &[u8]) -> bool {
    let text = String::from_utf8_lossy(raw);
    let Some(split) = text.find("\r\n\r\n") else {
        return false;
    };
    let content_length = text[..split]
        .lines()
        .filter_map(|line| line.split_once(':'))
        .find(|(name, _)| name.trim().eq_ignore_ascii_case("content-length"))
        .and_then(|(_, value)| value.trim().parse::<usize>().ok())
        .unwrap_or(0);
    raw.len() >= split + 4 + content_length
}

fn client(base_url: String) -> OpenAi {
    OpenAi::with_options(
        Some("sk-local-test".to_string()),
        Some(base_url),
        Some(Duration::from_secs(10)),
    )
    .unwrap()
}

#[tokio::test]
async fn completes_against_local_server() {
    let (base_url, server) = serve_once(
        "200 OK",
        r#"{"id":"chatcmpl-1","object":"chat.completion","model":"gpt-5.1","choices":[{"index":0,"message":{"role":"assistant","content":"| Step | Description |"},"finish_reason":"stop"}]}"#,
    )
    .await;

    let request = ChatCompletionRequest::new(
        Model::default(),
        vec![ChatMessage::system("be brief"), ChatMessage::user("hub")],
    )
    .with_temperature(Some(1.0));
    let text = client(base_url).complete(&request).await.unwrap();
    assert_eq!(text, "| Step | Description |");

    let raw = server.await.unwrap();
    assert!(raw.starts_with("POST /v1/chat/completions "));
    assert!(raw.to_lowercase().contains("authorization: bearer sk-local-test"));
    let body = &raw[raw.find("\r\n\r\n").unwrap() + 4..];
    let sent: serde_json::Value = serde_json::from_str(body).unwrap();
    assert_eq!(sent["model"], "gpt-5.1");
    assert_eq!(sent["temperature"], 1.0);
    assert_eq!(sent["messages"][0]["role"], "system");
    assert_eq!(sent["messages"][1]["content"], "hub");
}

#[tokio::test]
async fn unauthorized_maps_to_authentication_error() {
    let (base_url, server) = serve_once(
        "401 Unauthorized",
        r#"{"error":{"message":"Incorrect API key provided","type":"invalid_request_error","param":null,"code":"invalid_api_key"}}"#,
    )
    .await;

    let request = ChatCompletionRequest::new(Model::default(), vec![ChatMessage::user("hub")]);
    let err = client(base_url).complete(&request).await.unwrap_err();
    assert!(err.is_authentication());
    assert!(err.to_string().contains("Incorrect API key provided"));
    server.await.unwrap();
}

#[tokio::test]
async fn session_turns_http_failure_into_reply() {
    let (base_url, server) = serve_once(
        "429 Too Many Requests",
        r#"{"error":{"message":"You exceeded your current quota","type":"insufficient_quota"}}"#,
    )
    .await;

    let mut session = ChatSession::new(client(base_url), ChatConfig::default());
    let reply = session
        .submit("Design a cost model for a control arm")
        .await
        .unwrap();

    assert!(reply.starts_with("Error: "));
    assert!(reply.contains("You exceeded your current quota"));
    assert_eq!(session.message_count(), 3);
    server.await.unwrap();
}

#[tokio::test]
async fn empty_choices_is_malformed() {
    let (base_url, server) = serve_once("200 OK", r#"{"choices":[]}"#).await;

    let request = ChatCompletionRequest::new(Model::default(), vec![ChatMessage::user("hub")]);
    let err = client(base_url).complete(&request).await.unwrap_err();
    assert!(err.is_serialization());
    server.await.unwrap();
}

#[tokio::test]
async fn refused_connection_is_reported() {
    // Bind then drop to get a port nothing listens on.
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let request = ChatCompletionRequest::new(Model::default(), vec![ChatMessage::user("hub")]);
    let err = client(format!("http://{addr}/v1"))
        .complete(&request)
        .await
        .unwrap_err();
    assert!(err.is_connection() || matches!(err, costbench::Error::HttpClient { .. }));
}
