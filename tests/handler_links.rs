mod common;

use axum::http::StatusCode;
use serde_json::{Value, json};

// ─── POST /api/links ─────────────────────────────────────────────────────────

#[tokio::test]
async fn test_create_link_with_requested_code() {
    let (server, _repo) = common::make_server();

    let response = server
        .post("/api/links")
        .json(&json!({ "longUrl": "https://example.com", "shortCode": "abc123" }))
        .await;

    response.assert_status(StatusCode::CREATED);

    let body = response.json::<Value>();
    assert_eq!(body["shortCode"], "abc123");
    assert_eq!(body["longUrl"], "https://example.com");
    assert_eq!(body["clickCount"], 0);
    assert!(body["lastClicked"].is_null());
    assert!(body["createdAt"].is_string());
    assert!(body["id"].is_number());
}

#[tokio::test]
async fn test_create_link_generates_code() {
    let (server, _repo) = common::make_server();

    let response = server
        .post("/api/links")
        .json(&json!({ "longUrl": "https://example.com/some/long/path" }))
        .await;

    response.assert_status(StatusCode::CREATED);

    let body = response.json::<Value>();
    let code = body["shortCode"].as_str().unwrap();
    assert!(common::is_generated_code(code), "unexpected code {code:?}");
}

#[tokio::test]
async fn test_create_link_empty_code_generates() {
    let (server, _repo) = common::make_server();

    let response = server
        .post("/api/links")
        .json(&json!({ "longUrl": "https://example.com", "shortCode": "" }))
        .await;

    response.assert_status(StatusCode::CREATED);
    let body = response.json::<Value>();
    assert!(common::is_generated_code(body["shortCode"].as_str().unwrap()));
}

#[tokio::test]
async fn test_create_many_generated_links_are_unique() {
    let (server, repo) = common::make_server();

    for _ in 0..50 {
        server
            .post("/api/links")
            .json(&json!({ "longUrl": "https://example.com" }))
            .await
            .assert_status(StatusCode::CREATED);
    }

    use quicklink::domain::repositories::LinkRepository;
    let links = repo.list().await.unwrap();
    let codes: std::collections::HashSet<_> = links.iter().map(|l| &l.short_code).collect();
    assert_eq!(codes.len(), 50);
}

#[tokio::test]
async fn test_create_link_missing_long_url() {
    let (server, _repo) = common::make_server();

    let response = server
        .post("/api/links")
        .json(&json!({ "shortCode": "abc123" }))
        .await;

    response.assert_status_bad_request();
    let body = response.json::<Value>();
    assert_eq!(body["error"]["code"], "invalid_input");
    assert_eq!(body["error"]["message"], "longUrl is required");
}

#[tokio::test]
async fn test_create_link_invalid_url_regardless_of_code() {
    let (server, _repo) = common::make_server();

    for payload in [
        json!({ "longUrl": "not-a-url" }),
        json!({ "longUrl": "not-a-url", "shortCode": "valid1" }),
        json!({ "longUrl": "not-a-url", "shortCode": "in-valid" }),
        json!({ "longUrl": "ftp://example.com/file" }),
        json!({ "longUrl": "/relative" }),
    ] {
        let response = server.post("/api/links").json(&payload).await;
        response.assert_status_bad_request();
        assert_eq!(response.json::<Value>()["error"]["code"], "invalid_input");
    }
}

#[tokio::test]
async fn test_create_link_rejects_control_characters() {
    let (server, repo) = common::make_server();

    for url in ["https://example.com/a\nb", "https://example.com/a\u{7f}b"] {
        let response = server
            .post("/api/links")
            .json(&json!({ "longUrl": url, "shortCode": "nl" }))
            .await;

        response.assert_status_bad_request();
        assert_eq!(response.json::<Value>()["error"]["code"], "invalid_input");
    }

    use quicklink::domain::repositories::LinkRepository;
    assert!(repo.get("nl").await.unwrap().is_none());
}

#[tokio::test]
async fn test_create_link_invalid_code_format() {
    let (server, _repo) = common::make_server();

    for code in ["has-dash", "has space", "abcdefghij01234567890", "emoji🙂"] {
        let response = server
            .post("/api/links")
            .json(&json!({ "longUrl": "https://example.com", "shortCode": code }))
            .await;

        response.assert_status_bad_request();
    }
}

#[tokio::test]
async fn test_create_link_duplicate_code_conflict() {
    let (server, _repo) = common::make_server();

    server
        .post("/api/links")
        .json(&json!({ "longUrl": "https://example.com", "shortCode": "ab" }))
        .await
        .assert_status(StatusCode::CREATED);

    let response = server
        .post("/api/links")
        .json(&json!({ "longUrl": "https://other.example.com", "shortCode": "ab" }))
        .await;

    response.assert_status(StatusCode::CONFLICT);
    assert_eq!(response.json::<Value>()["error"]["code"], "conflict");

    let original = server.get("/api/links/ab").await.json::<Value>();
    assert_eq!(original["longUrl"], "https://example.com");
}

#[tokio::test]
async fn test_create_link_codes_are_case_sensitive() {
    let (server, _repo) = common::make_server();

    server
        .post("/api/links")
        .json(&json!({ "longUrl": "https://lower.example.com", "shortCode": "abc" }))
        .await
        .assert_status(StatusCode::CREATED);

    server
        .post("/api/links")
        .json(&json!({ "longUrl": "https://upper.example.com", "shortCode": "ABC" }))
        .await
        .assert_status(StatusCode::CREATED);
}

#[tokio::test]
async fn test_create_link_malformed_json() {
    let (server, _repo) = common::make_server();

    let response = server
        .post("/api/links")
        .content_type("application/json")
        .bytes("{ not json".into())
        .await;

    response.assert_status_bad_request();
    assert_eq!(response.json::<Value>()["error"]["code"], "invalid_input");
}

// ─── GET /api/links ──────────────────────────────────────────────────────────

#[tokio::test]
async fn test_list_links_empty() {
    let (server, _repo) = common::make_server();

    let response = server.get("/api/links").await;

    response.assert_status_ok();
    assert_eq!(response.json::<Value>(), json!([]));
}

#[tokio::test]
async fn test_list_links_newest_first() {
    let (server, repo) = common::make_server();

    common::create_test_link(&repo, "first", "https://one.example.com").await;
    common::create_test_link(&repo, "second", "https://two.example.com").await;
    common::create_test_link(&repo, "third", "https://three.example.com").await;

    let response = server.get("/api/links").await;

    response.assert_status_ok();
    let body = response.json::<Vec<Value>>();
    let codes: Vec<&str> = body
        .iter()
        .map(|l| l["shortCode"].as_str().unwrap())
        .collect();
    assert_eq!(codes, ["third", "second", "first"]);
}

// ─── GET /api/links/{code} ───────────────────────────────────────────────────

#[tokio::test]
async fn test_get_link() {
    let (server, repo) = common::make_server();
    common::create_test_link(&repo, "stats1", "https://example.com").await;

    let response = server.get("/api/links/stats1").await;

    response.assert_status_ok();
    let body = response.json::<Value>();
    assert_eq!(body["shortCode"], "stats1");
    assert_eq!(body["clickCount"], 0);
}

#[tokio::test]
async fn test_get_link_does_not_count_clicks() {
    let (server, repo) = common::make_server();
    common::create_test_link(&repo, "peek", "https://example.com").await;

    let first = server.get("/api/links/peek").await.json::<Value>();
    let second = server.get("/api/links/peek").await.json::<Value>();

    assert_eq!(first, second);
    assert_eq!(second["clickCount"], 0);
}

#[tokio::test]
async fn test_get_link_not_found() {
    let (server, _repo) = common::make_server();

    let response = server.get("/api/links/missing").await;

    response.assert_status_not_found();
    assert_eq!(response.json::<Value>()["error"]["code"], "not_found");
}

// ─── DELETE /api/links/{code} ────────────────────────────────────────────────

#[tokio::test]
async fn test_delete_link_success() {
    let (server, repo) = common::make_server();
    common::create_test_link(&repo, "del001", "https://example.com").await;

    let response = server.delete("/api/links/del001").await;

    response.assert_status(StatusCode::NO_CONTENT);
    assert!(response.as_bytes().is_empty());

    server.get("/api/links/del001").await.assert_status_not_found();
}

#[tokio::test]
async fn test_delete_link_not_found() {
    let (server, _repo) = common::make_server();

    server
        .delete("/api/links/nonexistent")
        .await
        .assert_status_not_found();
}

#[tokio::test]
async fn test_delete_link_twice() {
    let (server, repo) = common::make_server();
    common::create_test_link(&repo, "del002", "https://example.com").await;

    server
        .delete("/api/links/del002")
        .await
        .assert_status(StatusCode::NO_CONTENT);

    server
        .delete("/api/links/del002")
        .await
        .assert_status_not_found();
}

#[tokio::test]
async fn test_deleted_code_can_be_reused() {
    let (server, repo) = common::make_server();
    common::create_test_link(&repo, "reuse", "https://old.example.com").await;

    server
        .delete("/api/links/reuse")
        .await
        .assert_status(StatusCode::NO_CONTENT);

    let response = server
        .post("/api/links")
        .json(&json!({ "longUrl": "https://new.example.com", "shortCode": "reuse" }))
        .await;

    response.assert_status(StatusCode::CREATED);
    assert_eq!(response.json::<Value>()["clickCount"], 0);
}

// ─── CORS ────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_cors_allows_any_origin() {
    let (server, _repo) = common::make_server();

    let response = server
        .get("/api/links")
        .add_header("Origin", "https://dashboard.example.org")
        .await;

    response.assert_status_ok();
    assert_eq!(response.header("access-control-allow-origin"), "*");
}
