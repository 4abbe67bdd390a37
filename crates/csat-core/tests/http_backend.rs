//! Integration tests for the HTTP backend against a mock survey API

use csat_core::account::{self, Registration};
use csat_core::config::BackendConfig;
use csat_core::{
    AnswerStore, AnswerValue, Catalog, Credentials, FieldEdit, HttpBackend, Reconciler,
    ResponseEditor, SurveyBackend, SurveyError, UserId,
};
use serde_json::json;
use std::sync::Arc;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn backend_for(server: &MockServer) -> HttpBackend {
    HttpBackend::new(&BackendConfig {
        base_url: server.uri(),
        ..Default::default()
    })
    .expect("valid backend config")
}

fn user() -> UserId {
    UserId::new("user@example.com")
}

#[tokio::test]
async fn test_login_posts_credentials() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/login"))
        .and(body_json(json!({"email": "user@example.com", "password": "secret"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .expect(1)
        .mount(&server)
        .await;

    let backend = backend_for(&server);
    let user = account::login(&backend, &Credentials::new("user@example.com", "secret"))
        .await
        .unwrap();
    assert_eq!(user, UserId::new("user@example.com"));
}

#[tokio::test]
async fn test_login_rejected_with_empty_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/login"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let backend = backend_for(&server);
    let err = account::login(&backend, &Credentials::new("user@example.com", "wrong"))
        .await
        .unwrap_err();
    assert_eq!(err, SurveyError::auth_failed(""));
}

#[tokio::test]
async fn test_register_posts_credentials() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/register"))
        .and(body_json(json!({"email": "new@example.com", "password": "abcd"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"success": true})))
        .expect(1)
        .mount(&server)
        .await;

    let backend = backend_for(&server);
    let registration = Registration::new(Credentials::new("new@example.com", "abcd"), "abcd");
    account::register(&backend, &registration).await.unwrap();
}

#[tokio::test]
async fn test_submit_scenario_single_answer() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/submit-survey"))
        .and(body_json(json!({
            "userId": "user@example.com",
            "answers": [{"questionId": 1, "answer": ["7"]}]
        })))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(json!({"success": true, "message": "saved"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let reconciler = Reconciler::new(Arc::new(backend_for(&server)));
    let mut store = AnswerStore::new(Catalog::standard());
    store.set_answer(1, "7");

    let payload = reconciler.submit(Some(&user()), store.answers()).await.unwrap();
    assert_eq!(payload["message"], "saved");
}

#[tokio::test]
async fn test_submit_duplicate_from_plain_text_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/submit-survey"))
        .respond_with(ResponseTemplate::new(400).set_body_string("Survey already submitted"))
        .mount(&server)
        .await;

    let reconciler = Reconciler::new(Arc::new(backend_for(&server)));
    let mut store = AnswerStore::new(Catalog::standard());
    store.set_answer(2, "Very satisfied");

    let err = reconciler
        .submit(Some(&user()), store.answers())
        .await
        .unwrap_err();
    assert_eq!(err, SurveyError::DuplicateSubmission);
    assert!(store.get_answer(2).is_some());
}

#[tokio::test]
async fn test_undecodable_success_body_is_transport_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/submit-survey"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>ok</html>"))
        .mount(&server)
        .await;

    let backend = backend_for(&server);
    let reconciler = Reconciler::new(Arc::new(backend));
    let err = reconciler
        .submit(Some(&user()), &Default::default())
        .await
        .unwrap_err();
    assert!(matches!(err, SurveyError::Transport { status_code: Some(200), .. }));
}

#[tokio::test]
async fn test_unreachable_backend_is_transport_error() {
    let backend = HttpBackend::new(&BackendConfig {
        base_url: "http://127.0.0.1:1".to_string(),
        connect_timeout_secs: 1,
        request_timeout_secs: 2,
        ..Default::default()
    })
    .unwrap();

    let err = backend.get_responses("user@example.com").await.unwrap_err();
    assert!(matches!(err, SurveyError::Transport { url: Some(_), .. }));
    assert!(csat_core::UnifiedError::is_retryable(&err));
}

#[tokio::test]
async fn test_view_edit_save_round_trip() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/get-responses/user@example.com"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "answers": [
                {"questionId": 1, "answer": "9"},
                {"questionId": 3, "answer": "Reliable"}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/api/update-survey"))
        .and(body_json(json!({
            "userId": "user@example.com",
            "answers": [
                {"questionId": 1, "answer": ["9"]},
                {"questionId": 3, "answer": ["Unique"]}
            ]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .expect(1)
        .mount(&server)
        .await;

    let reconciler = Reconciler::new(Arc::new(backend_for(&server)));
    let mut editor = ResponseEditor::new();
    editor.load(&reconciler, Some(&user())).await.unwrap();
    assert!(editor.has_submission());

    let question = Catalog::standard().get(3).unwrap();
    editor.begin_edit().unwrap();
    editor
        .apply_edit(question, FieldEdit::Toggle("Reliable".into()))
        .unwrap();
    editor
        .apply_edit(question, FieldEdit::Toggle("Unique".into()))
        .unwrap();
    editor.save(&reconciler, Some(&user())).await.unwrap();

    let view = editor.view().unwrap();
    assert_eq!(view.get(3).unwrap().value, AnswerValue::from(vec!["Unique"]));
    assert_eq!(view.get(1).unwrap().value, AnswerValue::from(vec!["9"]));
}

#[tokio::test]
async fn test_fetch_not_found_puts_editor_in_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/get-responses/user@example.com"))
        .respond_with(
            ResponseTemplate::new(404)
                .set_body_json(json!({"success": false, "error": "No responses found"})),
        )
        .mount(&server)
        .await;

    let reconciler = Reconciler::new(Arc::new(backend_for(&server)));
    let mut editor = ResponseEditor::new();
    let err = editor.load(&reconciler, Some(&user())).await.unwrap_err();
    assert_eq!(err, SurveyError::fetch_failed("No responses found"));
    assert_eq!(
        editor.last_error(),
        Some("Failed to load responses. Please try again later.")
    );
}

#[tokio::test]
async fn test_custom_endpoint_paths_and_base_prefix() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/survey/v2/responses"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let mut config = BackendConfig {
        base_url: format!("{}/survey", server.uri()),
        ..Default::default()
    };
    config.endpoints.update_survey = "/v2/responses".to_string();

    let reconciler = Reconciler::new(Arc::new(HttpBackend::new(&config).unwrap()));
    let mut answers = csat_core::AnswerSet::new();
    answers.upsert(10, "All good");

    let persisted = reconciler.update(Some(&user()), &answers).await.unwrap();
    assert_eq!(persisted.get(10).unwrap().value, AnswerValue::from(vec!["All good"]));
}
