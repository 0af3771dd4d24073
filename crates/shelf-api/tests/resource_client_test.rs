#![allow(clippy::unwrap_used)]
// Integration tests for `ResourceClient` using wiremock.

use serde::{Deserialize, Serialize};
use serde_json::json;
use url::Url;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use shelf_api::{Error, ResourceClient};

#[derive(Debug, Serialize, Deserialize, PartialEq)]
struct Book {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    id: Option<String>,
    title: String,
}

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, ResourceClient) {
    let server = MockServer::start().await;
    let base_url = Url::parse(&server.uri()).unwrap();
    let client = ResourceClient::with_client(reqwest::Client::new(), &base_url, "books").unwrap();
    (server, client)
}

// ── Happy path ──────────────────────────────────────────────────────

#[tokio::test]
async fn test_list_preserves_server_order() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/books"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": "2", "title": "Dune" },
            { "id": "1", "title": "Emma" },
        ])))
        .mount(&server)
        .await;

    let books: Vec<Book> = client.list().await.unwrap();

    assert_eq!(books.len(), 2);
    assert_eq!(books[0].id.as_deref(), Some("2"));
    assert_eq!(books[1].title, "Emma");
}

#[tokio::test]
async fn test_get_by_id() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/books/7"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "id": "7", "title": "Ulysses" })),
        )
        .mount(&server)
        .await;

    let book: Book = client.get("7").await.unwrap();
    assert_eq!(book.title, "Ulysses");
}

#[tokio::test]
async fn test_create_posts_body_and_returns_stored_item() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/books"))
        .and(body_json(json!({ "title": "Beloved" })))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(json!({ "id": "11", "title": "Beloved" })),
        )
        .mount(&server)
        .await;

    let draft = Book {
        id: None,
        title: "Beloved".into(),
    };
    let created: Book = client.create(&draft).await.unwrap();
    assert_eq!(created.id.as_deref(), Some("11"));
}

#[tokio::test]
async fn test_replace_puts_to_item_url() {
    let (server, client) = setup().await;

    Mock::given(method("PUT"))
        .and(path("/books/3"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "id": "3", "title": "Persuasion" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let body = json!({ "id": "3", "title": "Persuasion" });
    let updated: Book = client.replace("3", &body).await.unwrap();
    assert_eq!(updated.title, "Persuasion");
}

#[tokio::test]
async fn test_remove_ignores_body() {
    let (server, client) = setup().await;

    Mock::given(method("DELETE"))
        .and(path("/books/3"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
        .expect(1)
        .mount(&server)
        .await;

    client.remove("3").await.unwrap();
}

// ── Error tests ─────────────────────────────────────────────────────

#[tokio::test]
async fn test_not_found_uses_reason_phrase() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/books/404"))
        .respond_with(ResponseTemplate::new(404).set_body_string("{}"))
        .mount(&server)
        .await;

    let err = client.get::<Book>("404").await.unwrap_err();

    assert!(err.is_not_found(), "expected not-found, got: {err:?}");
    assert_eq!(err.to_string(), "HTTP 404: Not Found");
}

#[tokio::test]
async fn test_server_error_carries_body_preview() {
    let (server, client) = setup().await;

    Mock::given(method("DELETE"))
        .respond_with(ResponseTemplate::new(500).set_body_string("database locked"))
        .mount(&server)
        .await;

    let err = client.remove("1").await.unwrap_err();

    match err {
        Error::Http { status, ref message } => {
            assert_eq!(status, 500);
            assert_eq!(message, "database locked");
        }
        ref other => panic!("expected Http error, got: {other:?}"),
    }
    assert!(!err.is_not_found());
}

#[tokio::test]
async fn test_malformed_body_is_deserialization_error() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/books"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let result: Result<Vec<Book>, Error> = client.list().await;

    match result {
        Err(Error::Deserialization { body, .. }) => assert_eq!(body, "<html>oops</html>"),
        other => panic!("expected Deserialization error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_connection_refused_is_transport_error() {
    // Nothing listens on the reserved port 1.
    let base = Url::parse("http://127.0.0.1:1").unwrap();
    let client = ResourceClient::with_client(reqwest::Client::new(), &base, "books").unwrap();

    let err = client.list::<Book>().await.unwrap_err();

    assert!(matches!(err, Error::Transport(_)), "got: {err:?}");
    assert!(!err.is_not_found());
}
