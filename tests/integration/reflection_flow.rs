/// End-to-end reflection requests against a stand-in generative service
use std::time::Duration;

use cafecito_journal::config::ReflectionConfig;
use cafecito_journal::*;
use chrono::{DateTime, NaiveDate};
use serde_json::json;
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const ENDPOINT: &str = "/v1beta/models/test-model:generateContent";

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn app_for(server: &MockServer) -> JournalApp {
    let config = ReflectionConfig {
        base_url: server.uri(),
        model: "test-model".to_string(),
        ..ReflectionConfig::default()
    };
    let service = GeminiService::new(&config, "test-key".to_string()).unwrap();
    let storage = SqliteStorage::open_in_memory().unwrap();

    for (ts, text) in [
        ("2024-05-01T09:00:00-03:00", "Empecé el taller de escritura."),
        ("2024-05-03T22:10:00-03:00", "Otra vez la discusión con mi jefe."),
        ("2024-06-20T12:00:00-03:00", "Fuera del rango."),
    ] {
        let entry = JournalEntry::new(text.to_string(), DateTime::parse_from_rfc3339(ts).unwrap(), None).unwrap();
        storage.insert_entry(&entry).unwrap();
    }
    storage.insert_goal(&Goal::new("Cambiar de trabajo".to_string()).unwrap()).unwrap();

    JournalApp::with_storage(storage).with_reflection(ReflectionClient::new(service))
}

fn may_range() -> DateRange {
    DateRange::new(day(2024, 5, 1), day(2024, 5, 7)).unwrap()
}

fn answer(text: String) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "candidates": [{
            "content": { "parts": [{ "text": text }] },
            "groundingMetadata": {
                "groundingChunks": [{ "web": { "uri": "https://example.org/taller", "title": "Taller" } }]
            }
        }]
    }))
}

fn payload() -> String {
    json!({
        "summary": "Un comienzo con tensión laboral.",
        "evolution": "El jefe aparece como figura repetida.",
        "emotionalPoints": [
            {"date": "2024-05-01", "score": 3},
            {"date": "2024-05-03", "score": -2}
        ],
        "guidance": ["Anotá los sueños.", "Volvé al taller.", "Hablá con alguien de confianza."],
        "suggestions": [
            {"title": "Taller", "category": "inspiracion", "description": "Escritura creativa.", "link": "https://example.org/taller"}
        ]
    })
    .to_string()
}

#[tokio::test]
async fn test_reflection_sends_only_entries_in_range() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .and(body_string_contains("Otra vez la discusión con mi jefe."))
        .and(body_string_contains("Cambiar de trabajo (Pendiente)"))
        .respond_with(answer(payload()))
        .expect(1)
        .mount(&server)
        .await;

    let app = app_for(&server);
    let reflection = app.reflect(may_range(), &CancelToken::never()).await.unwrap();

    assert_eq!(reflection.range, may_range());
    assert_eq!(reflection.emotional_points.len(), 2);
    assert_eq!(reflection.suggestions[0].category, SuggestionCategory::Inspiration);
    assert_eq!(reflection.grounding_chunks.as_ref().map(Vec::len), Some(1));

    let requests = server.received_requests().await.unwrap();
    let body = String::from_utf8_lossy(&requests[0].body);
    assert!(!body.contains("Fuera del rango."));

    // Nothing is saved until archived
    assert!(app.storage().list_reports().unwrap().is_empty());
    let report = app.archive(reflection).unwrap();
    assert_eq!(app.storage().list_reports().unwrap(), vec![report]);
}

#[tokio::test]
async fn test_empty_range_never_reaches_the_service() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(answer(payload()))
        .expect(0)
        .mount(&server)
        .await;

    let app = app_for(&server);
    let range = DateRange::new(day(2024, 7, 1), day(2024, 7, 31)).unwrap();
    let result = app.reflect(range, &CancelToken::never()).await;

    assert!(matches!(
        result,
        Err(JournalError::EmptyRangeSelection { start, end }) if start == day(2024, 7, 1) && end == day(2024, 7, 31)
    ));
}

#[tokio::test]
async fn test_unstructured_answer_is_malformed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(answer("Lo siento, hoy no puedo.".to_string()))
        .mount(&server)
        .await;

    let app = app_for(&server);
    let result = app.reflect(may_range(), &CancelToken::never()).await;

    assert!(matches!(result, Err(JournalError::ReflectionMalformed(_))));
}

#[tokio::test]
async fn test_service_error_is_unavailable() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let app = app_for(&server);
    let result = app.reflect(may_range(), &CancelToken::never()).await;

    assert!(matches!(result, Err(JournalError::ReflectionUnavailable(_))));
}

#[tokio::test]
async fn test_cancelled_reflection_yields_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(answer(payload()).set_delay(Duration::from_secs(10)))
        .mount(&server)
        .await;

    let app = app_for(&server);
    let (handle, token) = cancellation();

    let cancel = async {
        tokio::time::sleep(Duration::from_millis(50)).await;
        handle.cancel();
    };
    let (result, _) = tokio::join!(app.reflect(may_range(), &token), cancel);

    assert!(matches!(result, Err(JournalError::ReflectionCancelled)));
    assert!(app.storage().list_reports().unwrap().is_empty());
}

#[tokio::test]
async fn test_app_without_service() {
    let app = JournalApp::with_storage(SqliteStorage::open_in_memory().unwrap());
    let result = app.reflect(may_range(), &CancelToken::never()).await;

    assert!(matches!(result, Err(JournalError::ReflectionUnavailable(_))));
}
