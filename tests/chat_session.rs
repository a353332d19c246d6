//! End-to-end exchanges against a mock assistant endpoint.

use humanic_chat::client::build_http_client;
use humanic_chat::config::{DEFAULT_GREETING, DEFAULT_SESSION_KEY};
use humanic_chat::error::{COLD_START_MESSAGE, GENERIC_FAILURE_MESSAGE};
use humanic_chat::{
    ChatSession, FileKeyValueStore, HttpAssistantClient, KeyValueStore, MemoryKeyValueStore,
    Sender, SessionOptions, TurnOutcome,
};
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> HttpAssistantClient {
    HttpAssistantClient::new(
        &format!("{}/chat", server.uri()),
        build_http_client(None, Duration::from_secs(5)),
    )
}

fn file_session(dir: &TempDir) -> (ChatSession, Arc<FileKeyValueStore>) {
    let store = Arc::new(FileKeyValueStore::new(dir.path().join("state.json")));
    let session = ChatSession::new(store.clone(), SessionOptions::default());
    (session, store)
}

#[tokio::test]
async fn hello_round_trip_persists_token() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat"))
        .and(body_json(serde_json::json!({"message": "hello", "session_id": ""})))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "response": "hi",
            "session_id": "abc123"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let tmp = TempDir::new().unwrap();
    let (mut session, store) = file_session(&tmp);
    let client = client_for(&server);

    let outcome = session.submit_user_turn(&client, "hello").await.unwrap();

    assert!(matches!(outcome, TurnOutcome::Replied(_)));
    assert_eq!(session.session_token(), Some("abc123"));
    assert_eq!(
        store.get(DEFAULT_SESSION_KEY).unwrap().as_deref(),
        Some("abc123")
    );
    let reply = session.transcript().last().unwrap();
    assert_eq!(reply.sender, Sender::Assistant);
    assert_eq!(reply.text, "hi");
    assert!(reply.sources().is_empty());
    assert_eq!(session.transcript().len(), 3);
}

#[tokio::test]
async fn token_survives_restart_and_is_sent_back() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat"))
        .and(body_json(serde_json::json!({"message": "first", "session_id": ""})))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "response": "noted",
            "session_id": "conv-42"
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/chat"))
        .and(body_json(
            serde_json::json!({"message": "second", "session_id": "conv-42"}),
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "response": "welcome back",
            "sources": ["notes.md"]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let tmp = TempDir::new().unwrap();
    let client = client_for(&server);
    {
        let (mut session, _) = file_session(&tmp);
        session.submit_user_turn(&client, "first").await.unwrap();
    }

    // simulated reload: fresh session over the same state file
    let (mut session, _) = file_session(&tmp);
    assert_eq!(session.session_token(), Some("conv-42"));
    assert_eq!(session.transcript().len(), 1);

    session.submit_user_turn(&client, "second").await.unwrap();
    let reply = session.transcript().last().unwrap();
    assert_eq!(reply.text, "welcome back");
    assert_eq!(reply.sources(), ["notes.md"]);
    assert_eq!(session.session_token(), Some("conv-42"));
}

#[tokio::test]
async fn cold_start_leaves_only_user_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;

    let store = Arc::new(MemoryKeyValueStore::new());
    let mut session = ChatSession::new(store, SessionOptions::default());
    let client = client_for(&server);

    session.submit_user_turn(&client, "hello").await.unwrap();

    assert_eq!(session.transcript().len(), 2);
    assert_eq!(session.transcript()[1].sender, Sender::User);
    assert_eq!(session.last_error(), Some(COLD_START_MESSAGE));
    assert!(session.state().is_idle());
}

#[tokio::test]
async fn server_error_and_malformed_body_are_generic_failures() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat"))
        .and(body_json(serde_json::json!({"message": "boom", "session_id": ""})))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/chat"))
        .and(body_json(serde_json::json!({"message": "odd", "session_id": ""})))
        .respond_with(ResponseTemplate::new(200).set_body_string("{\"reply\": \"hi\"}"))
        .mount(&server)
        .await;

    let mut session = ChatSession::new(
        Arc::new(MemoryKeyValueStore::new()),
        SessionOptions::default(),
    );
    let client = client_for(&server);

    session.submit_user_turn(&client, "boom").await.unwrap();
    assert_eq!(session.last_error(), Some(GENERIC_FAILURE_MESSAGE));

    session.submit_user_turn(&client, "odd").await.unwrap();
    assert_eq!(session.last_error(), Some(GENERIC_FAILURE_MESSAGE));

    assert_eq!(session.transcript().len(), 3);
    assert!(
        session
            .transcript()
            .iter()
            .skip(1)
            .all(|m| m.sender == Sender::User)
    );
}

#[tokio::test]
async fn session_recovers_after_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat"))
        .respond_with(ResponseTemplate::new(502))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/chat"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"response": "ready"})),
        )
        .mount(&server)
        .await;

    let mut session = ChatSession::new(
        Arc::new(MemoryKeyValueStore::new()),
        SessionOptions::default(),
    );
    let client = client_for(&server);

    session.submit_user_turn(&client, "hello").await.unwrap();
    assert!(session.last_error().is_some());

    session.submit_user_turn(&client, "hello").await.unwrap();
    assert!(session.last_error().is_none());
    assert_eq!(session.transcript().last().unwrap().text, "ready");
    assert_eq!(session.transcript().len(), 4);
}

#[tokio::test]
async fn reset_clears_persisted_token() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "response": "hi",
            "session_id": "abc123"
        })))
        .mount(&server)
        .await;

    let tmp = TempDir::new().unwrap();
    let (mut session, store) = file_session(&tmp);
    session
        .submit_user_turn(&client_for(&server), "hello")
        .await
        .unwrap();

    session.reset();
    session.reset();

    assert_eq!(session.transcript().len(), 1);
    assert_eq!(session.transcript()[0].text, DEFAULT_GREETING);
    assert!(session.session_token().is_none());
    assert!(session.last_error().is_none());
    assert_eq!(store.get(DEFAULT_SESSION_KEY).unwrap(), None);

    let (restarted, _) = file_session(&tmp);
    assert!(restarted.session_token().is_none());
}

#[tokio::test]
async fn reply_arriving_after_reset_is_dropped() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"response": "late", "session_id": "old"}))
                .set_delay(Duration::from_millis(200)),
        )
        .mount(&server)
        .await;

    let tmp = TempDir::new().unwrap();
    let (mut session, store) = file_session(&tmp);
    let client = client_for(&server);

    let ticket = session.begin_turn("hello").unwrap();
    let pending = {
        let request = ticket.request().clone();
        let client = client_for(&server);
        tokio::spawn(async move {
            use humanic_chat::AssistantClient;
            client.exchange(&request).await
        })
    };

    session.reset();
    let result = pending.await.unwrap();
    let outcome = session.complete_turn(ticket, result);

    assert_eq!(outcome, TurnOutcome::Discarded);
    assert_eq!(session.transcript().len(), 1);
    assert!(session.session_token().is_none());
    assert_eq!(store.get(DEFAULT_SESSION_KEY).unwrap(), None);

    // and the session takes new turns again
    assert!(session.submit_user_turn(&client, "again").await.is_some());
}
