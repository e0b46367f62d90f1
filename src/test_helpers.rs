use std::sync::Arc;

use axum::Router;

use crate::{
    config::AppConfig,
    db::{memory::InMemoryTodoRepository, repository::TodoRepository},
    routes::app,
    services::ServiceContext,
    state::AppState,
};

pub fn test_router_with(repo: Arc<dyn TodoRepository>) -> Router {
    let state = AppState::new(AppConfig::default(), ServiceContext::with_repository(repo));
    app(state)
}

/// Full application over a fresh in-memory store; the store is returned so
/// tests can inspect rows the API no longer exposes.
pub fn test_router() -> (Router, InMemoryTodoRepository) {
    let repo = InMemoryTodoRepository::new();
    (test_router_with(Arc::new(repo.clone())), repo)
}
