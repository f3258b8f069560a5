#![allow(dead_code)]

use axum_test::TestServer;
use quicklink::AppState;
use quicklink::domain::entities::{Link, NewLink};
use quicklink::domain::repositories::LinkRepository;
use quicklink::infrastructure::persistence::InMemoryLinkRepository;
use quicklink::routes::app_router;
use std::sync::Arc;

/// State backed by a fresh in-memory store, with a handle to that store.
pub fn create_test_state() -> (AppState, Arc<InMemoryLinkRepository>) {
    let repo = Arc::new(InMemoryLinkRepository::new());
    let state = AppState::new(repo.clone());
    (state, repo)
}

/// Full application router over a fresh in-memory store.
pub fn make_server() -> (TestServer, Arc<InMemoryLinkRepository>) {
    let (state, repo) = create_test_state();
    let server = TestServer::new(app_router(state)).unwrap();
    (server, repo)
}

pub async fn create_test_link(repo: &InMemoryLinkRepository, code: &str, url: &str) -> Link {
    repo.create(NewLink::new(code, url)).await.unwrap()
}

pub fn is_generated_code(code: &str) -> bool {
    (6..=8).contains(&code.len()) && code.chars().all(|c| c.is_ascii_alphanumeric())
}
