//! Session flow over the in-memory store and a scripted endpoint:
//! persistence ordering, history threading, the apology path, and the
//! first-contact greeting.

use std::sync::Arc;

use mentor::config::Config;
use mentor::dispatch::Endpoint;
use mentor::error::APOLOGY;
use mentor::prompt::{LearnerProfile, WELCOME};
use mentor::session::ChatSession;
use mentor::store::{ConversationStore, MemoryStore};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn success_body(text: &str) -> serde_json::Value {
    serde_json::json!({
        "candidates": [
            {"content": {"role": "model", "parts": [{"text": text}]}}
        ]
    })
}

fn config_for(server: &MockServer) -> Config {
    Config {
        api_key: "test-key".to_string(),
        endpoints: vec![Endpoint::new("m", format!("{}/m", server.uri()))],
        profile: LearnerProfile::default(),
    }
}

#[tokio::test]
async fn send_persists_user_and_tutor_turns_in_order() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/m"))
        .respond_with(ResponseTemplate::new(200).set_body_json(success_body("What happens at index 0?")))
        .expect(1)
        .mount(&server)
        .await;

    let store = Arc::new(MemoryStore::new());
    let mut session = ChatSession::new(config_for(&server), store.clone()).unwrap();

    let reply = session.send("My loop is off by one").await;
    assert_eq!(reply, "What happens at index 0?");

    let turns = store.recent(10).await;
    assert_eq!(turns.len(), 2);
    assert_eq!(turns[0].role, "user");
    assert_eq!(turns[0].text, "My loop is off by one");
    assert_eq!(turns[1].role, "assistant");
    assert_eq!(turns[1].text, "What happens at index 0?");
}

#[tokio::test]
async fn prior_exchange_is_threaded_into_the_next_request() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/m"))
        .respond_with(ResponseTemplate::new(200).set_body_json(success_body("Draw the list first.")))
        .expect(2)
        .mount(&server)
        .await;

    let store = Arc::new(MemoryStore::new());
    let mut session = ChatSession::new(config_for(&server), store).unwrap();

    session.send("How do I reverse a list?").await;
    session.send("Like this?").await;

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 2);

    let body: serde_json::Value = serde_json::from_slice(&requests[1].body).unwrap();
    let contents = body["contents"].as_array().unwrap();

    // system prompt + ack + two history turns + new message
    assert_eq!(contents.len(), 5);
    assert_eq!(contents[2]["role"], "user");
    assert_eq!(contents[2]["parts"][0]["text"], "How do I reverse a list?");
    assert_eq!(contents[3]["role"], "model");
    assert_eq!(contents[3]["parts"][0]["text"], "Draw the list first.");
    assert_eq!(contents[4]["parts"][0]["text"], "Like this?");

    assert_eq!(body["generationConfig"]["temperature"], 0.7);
    assert_eq!(body["generationConfig"]["maxOutputTokens"], 2048);
}

#[tokio::test]
async fn exhaustion_replies_with_apology_and_session_stays_usable() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/m"))
        .respond_with(ResponseTemplate::new(500).set_body_string("internal"))
        .expect(2)
        .mount(&server)
        .await;

    let store = Arc::new(MemoryStore::new());
    let mut session = ChatSession::new(config_for(&server), store.clone()).unwrap();

    let reply = session.send("hello?").await;
    assert_eq!(reply, APOLOGY);

    // The apology is persisted as a tutor turn and the session can resend.
    let turns = store.recent(10).await;
    assert_eq!(turns.len(), 2);
    assert_eq!(turns[1].role, "assistant");
    assert_eq!(turns[1].text, APOLOGY);

    let reply = session.send("still there?").await;
    assert_eq!(reply, APOLOGY);
    assert_eq!(store.recent(10).await.len(), 4);
}

#[tokio::test]
async fn greeting_fires_once_on_empty_history() {
    let server = MockServer::start().await;

    let store = Arc::new(MemoryStore::new());
    let mut session = ChatSession::new(config_for(&server), store.clone()).unwrap();

    assert_eq!(session.greeting().await, Some(WELCOME));
    assert_eq!(session.greeting().await, None);

    let turns = store.recent(10).await;
    assert_eq!(turns.len(), 1);
    assert_eq!(turns[0].role, "assistant");
    assert_eq!(turns[0].text, WELCOME);
}
