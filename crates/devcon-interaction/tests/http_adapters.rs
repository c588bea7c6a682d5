use devcon_core::backend::{AskRequest, ChatBackend, FALLBACK_ANSWER};
use devcon_core::chat::{HistoryEntry, HistoryWindow, MessageLog, TurnIdGenerator, TurnRole, TurnTag};
use devcon_core::config::ClientConfig;
use devcon_core::dashboard::{DashboardBackend, NO_INFORMATION_ANSWER, RebuildRequest};
use devcon_interaction::{HttpChatBackend, HttpDashboardClient};
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config_for(server: &MockServer) -> ClientConfig {
    // Trailing slash must not produce `//api/...`.
    ClientConfig::default().with_backend_url(format!("{}/", server.uri()))
}

#[tokio::test]
async fn test_availability_follows_status_code() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/status"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let backend = HttpChatBackend::new(&config_for(&server)).unwrap();
    assert!(backend.check_availability().await.unwrap());
}

#[tokio::test]
async fn test_availability_false_on_server_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/status"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let backend = HttpChatBackend::new(&config_for(&server)).unwrap();
    assert!(!backend.check_availability().await.unwrap());
}

#[tokio::test]
async fn test_availability_waits_for_slow_status_within_client_timeout() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/status"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(31)))
        .mount(&server)
        .await;

    // A cold service may take longer than 30 s to answer the status check.
    let backend = HttpChatBackend::new(&config_for(&server)).unwrap();
    assert!(backend.check_availability().await.unwrap());
}

#[tokio::test]
async fn test_availability_is_bounded_by_client_timeout() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/status"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(500)))
        .mount(&server)
        .await;

    let backend =
        HttpChatBackend::with_timeout(&config_for(&server), Duration::from_millis(100)).unwrap();
    assert!(backend.check_availability().await.unwrap_err().is_transport());
}

#[tokio::test]
async fn test_availability_errors_when_unreachable() {
    let config = ClientConfig::default().with_backend_url("http://127.0.0.1:9");
    let backend = HttpChatBackend::new(&config).unwrap();
    assert!(backend.check_availability().await.unwrap_err().is_transport());
}

#[tokio::test]
async fn test_ask_sends_query_and_history() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/ask"))
        .and(body_json(json!({
            "query": "What is DEVCON?",
            "history": [
                {"role": "user", "content": "hi"},
                {"role": "assistant", "content": "hello"}
            ]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"answer": "A community."})))
        .expect(1)
        .mount(&server)
        .await;

    let mut ids = TurnIdGenerator::new();
    let mut log = MessageLog::fresh();
    log.append(ids.mint(TurnTag::User, "hi"));
    log.append(ids.mint(TurnTag::Assistant, "hello"));
    let request = AskRequest::new("What is DEVCON?", log.history_window(10));

    let backend = HttpChatBackend::new(&config_for(&server)).unwrap();
    let response = backend.ask(&request).await.unwrap();
    assert_eq!(response.answer_or_fallback(), "A community.");
}

#[tokio::test]
async fn test_ask_without_answer_uses_fallback() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/ask"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let backend = HttpChatBackend::new(&config_for(&server)).unwrap();
    let request = AskRequest::new("q", HistoryWindow::default());
    let response = backend.ask(&request).await.unwrap();
    assert_eq!(response.answer_or_fallback(), FALLBACK_ANSWER);
}

#[tokio::test]
async fn test_ask_non_success_is_transport_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/ask"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let backend = HttpChatBackend::new(&config_for(&server)).unwrap();
    let request = AskRequest::new("q", HistoryWindow::default());
    let err = backend.ask(&request).await.unwrap_err();
    assert!(matches!(
        err,
        devcon_core::DevconError::Transport { status: Some(500), .. }
    ));
}

#[tokio::test]
async fn test_stats_falls_back_to_health() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/stats"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/health"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "healthy",
            "rag_status": "ready",
            "document_count": 12
        })))
        .mount(&server)
        .await;

    let client = HttpDashboardClient::new(config_for(&server)).unwrap();
    let stats = client.stats().await.unwrap();
    assert_eq!(stats.status, "ready");
    assert_eq!(stats.document_count, 12);
}

#[tokio::test]
async fn test_fetch_files_and_rebuild() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/files/fetch"))
        .and(body_json(json!({"folder_id": "folder"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "files": [
                {"id": "a", "name": "Guide.pdf", "mimeType": "application/pdf", "size": "2048"},
                {"id": "b", "name": "Notes"}
            ]
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/v1/rebuild"))
        .and(body_json(json!({"folder_id": "folder", "batch_size": 25, "file_ids": ["a"]})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "completed",
            "processed_files": 1,
            "failed_files": 0,
            "files_details": [{"id": "a", "status": "processed"}]
        })))
        .mount(&server)
        .await;

    let client = HttpDashboardClient::new(config_for(&server)).unwrap();
    let files = client.fetch_files("folder").await.unwrap();
    assert_eq!(files.len(), 2);
    assert_eq!(files[0].size, Some(2048));

    let report = client
        .rebuild(&RebuildRequest::new("folder", 25, vec!["a".into()]))
        .await
        .unwrap();
    assert_eq!(report.processed_files, 1);
    assert_eq!(report.files_details[0].status, "processed");
}

#[tokio::test]
async fn test_probe_answers_detects_empty_index() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/ask"))
        .and(body_json(json!({"query": "test", "history": []})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"answer": NO_INFORMATION_ANSWER})))
        .mount(&server)
        .await;

    let client = HttpDashboardClient::new(config_for(&server)).unwrap();
    assert!(!client.probe_answers().await.unwrap());
}

#[test]
fn test_history_entries_serialize_with_lowercase_roles() {
    let entry = HistoryEntry {
        role: TurnRole::Assistant,
        content: "x".into(),
    };
    assert_eq!(
        serde_json::to_value(entry).unwrap(),
        json!({"role": "assistant", "content": "x"})
    );
}
