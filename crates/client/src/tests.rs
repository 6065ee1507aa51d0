use std::time::Duration;

use movie_tracker_core::{AppendRequest, MovieId};
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::{ClientError, SheetsClient, truncate};

async fn setup() -> (MockServer, SheetsClient) {
    let server = MockServer::start().await;
    let client = SheetsClient::new(format!("{}/exec", server.uri()), Duration::from_secs(5))
        .unwrap()
        .with_retry_delays(vec![Duration::ZERO, Duration::ZERO]);
    (server, client)
}

fn dune_request() -> AppendRequest {
    AppendRequest {
        title: "Dune".to_owned(),
        score: 2,
        notes: Some("sand".to_owned()),
        date: "2021-10-22".to_owned(),
        year: Some(2021),
    }
}

#[tokio::test]
async fn fetch_all_decodes_movies() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/exec"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": true,
            "movies": [
                {"id": "abc", "title": "Heat", "score": 2, "notes": "", "year": 1995, "date": "1995-01-01"},
                {"id": 17, "title": "Tenet", "score": "-1", "year": 2020}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let movies = client.fetch_all().await.unwrap();
    assert_eq!(movies.len(), 2);
    assert_eq!(movies[0].title.as_deref(), Some("Heat"));
    assert_eq!(movies[1].id, Some(MovieId("17".to_owned())));
    assert_eq!(movies[1].score, Some(-1));
}

#[tokio::test]
async fn fetch_all_retries_on_503_then_succeeds() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/exec"))
        .respond_with(ResponseTemplate::new(503).set_body_string("busy"))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/exec"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"success": true, "movies": []})),
        )
        .expect(1)
        .mount(&server)
        .await;

    assert!(client.fetch_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn busy_failure_envelope_is_retried() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/exec"))
        .respond_with(ResponseTemplate::new(503).set_body_json(serde_json::json!({
            "success": false,
            "error": "spreadsheet busy, retry later",
            "movies": []
        })))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/exec"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": true,
            "movies": [{"title": "Heat", "score": 2, "year": 1995}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let movies = client.fetch_all().await.unwrap();
    assert_eq!(movies.len(), 1);
}

#[tokio::test]
async fn fetch_all_gives_up_after_retries() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/exec"))
        .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
        .expect(3)
        .mount(&server)
        .await;

    let err = client.fetch_all().await.unwrap_err();
    match err {
        ClientError::RetriesExhausted(inner) => {
            assert!(matches!(*inner, ClientError::HttpStatus { code: 502, .. }));
        },
        other => panic!("expected RetriesExhausted, got {other:?}"),
    }
}

#[tokio::test]
async fn fetch_all_does_not_retry_client_errors() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/exec"))
        .respond_with(ResponseTemplate::new(404).set_body_string("not found"))
        .expect(1)
        .mount(&server)
        .await;

    let err = client.fetch_all().await.unwrap_err();
    assert!(matches!(err, ClientError::HttpStatus { code: 404, .. }));
}

#[tokio::test]
async fn failure_envelope_surfaces_remote_message() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/exec"))
        .respond_with(ResponseTemplate::new(500).set_body_json(serde_json::json!({
            "success": false,
            "error": "sheet unavailable",
            "movies": []
        })))
        .expect(1)
        .mount(&server)
        .await;

    let err = client.fetch_all().await.unwrap_err();
    match err {
        ClientError::Remote(message) => assert_eq!(message, "sheet unavailable"),
        other => panic!("expected Remote, got {other:?}"),
    }
}

#[tokio::test]
async fn malformed_body_is_a_parse_error() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/exec"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>login</html>"))
        .mount(&server)
        .await;

    let err = client.fetch_all().await.unwrap_err();
    assert!(matches!(err, ClientError::JsonParse { .. }));
    assert!(!err.is_transient());
}

#[tokio::test]
async fn append_posts_request_body() {
    let (server, client) = setup().await;
    let request = dune_request();

    Mock::given(method("POST"))
        .and(path("/exec"))
        .and(body_json(serde_json::json!({
            "title": "Dune",
            "score": 2,
            "notes": "sand",
            "date": "2021-10-22",
            "year": 2021
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"success": true})))
        .expect(1)
        .mount(&server)
        .await;

    client.append(&request).await.unwrap();
}

#[tokio::test]
async fn append_rejection_is_not_retried() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/exec"))
        .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
            "success": false,
            "error": "Title is required"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let err = client.append(&dune_request()).await.unwrap_err();
    assert!(matches!(err, ClientError::Remote(ref m) if m == "Title is required"));
}

#[tokio::test]
async fn append_server_error_is_reported_without_retry() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/exec"))
        .respond_with(ResponseTemplate::new(503).set_body_string("down"))
        .expect(1)
        .mount(&server)
        .await;

    let err = client.append(&dune_request()).await.unwrap_err();
    assert!(matches!(err, ClientError::HttpStatus { code: 503, .. }));
}

#[test]
fn truncate_respects_char_boundaries() {
    assert_eq!(truncate("hello", 10), "hello");
    assert_eq!(truncate("hello", 3), "hel");
    assert_eq!(truncate("héllo", 2), "h");
}
