use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::{
    db::{dao::DaoContext, repository::TodoRepository},
    services::todo_service::TodoService,
    state::AppState,
};

/// Explicit wiring of services to their storage.
#[derive(Clone)]
pub struct ServiceContext {
    todos: Arc<dyn TodoRepository>,
}

impl ServiceContext {
    pub fn new(db: &DatabaseConnection) -> Self {
        let daos = DaoContext::new(db);
        Self::with_repository(Arc::new(daos.todo()))
    }

    pub fn with_repository(todos: Arc<dyn TodoRepository>) -> Self {
        Self { todos }
    }

    pub fn from_state(state: &AppState) -> Self {
        state.services.clone()
    }

    pub fn todo(&self) -> TodoService {
        TodoService::new(Arc::clone(&self.todos))
    }
}
