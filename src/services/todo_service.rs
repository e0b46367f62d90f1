use std::sync::Arc;

use uuid::Uuid;

use crate::{
    db::dao::DaoLayerError,
    db::entities::todo_item,
    db::repository::{NewTodo, TodoChanges, TodoRepository},
    error::AppError,
};

const NOT_FOUND_MESSAGE: &str = "Todo item not found";

#[derive(Clone, Copy, Debug)]
enum TodoOp {
    List,
    Find,
    Create,
    Update,
    Delete,
}

impl TodoOp {
    fn failure_context(self) -> &'static str {
        match self {
            TodoOp::List | TodoOp::Find => "Find failed",
            TodoOp::Create => "Create failed",
            TodoOp::Update => "Update failed",
            TodoOp::Delete => "Delete failed",
        }
    }
}

/// Existence checks and repository orchestration for todo items.
///
/// Every mutating call resolves the item first, so a missing or
/// soft-deleted id fails with [`AppError::NotFound`] before anything is
/// written. Storage errors are passed through as [`AppError::Storage`]
/// without retries.
#[derive(Clone)]
pub struct TodoService {
    repo: Arc<dyn TodoRepository>,
}

impl TodoService {
    pub fn new(repo: Arc<dyn TodoRepository>) -> Self {
        Self { repo }
    }

    pub async fn find_all(&self) -> Result<Vec<todo_item::Model>, AppError> {
        self.repo
            .find_all()
            .await
            .map_err(|err| map_error(TodoOp::List, err))
    }

    pub async fn find_one_or_fail(&self, id: Uuid) -> Result<todo_item::Model, AppError> {
        self.repo
            .find_one_or_fail(id)
            .await
            .map_err(|err| map_error(TodoOp::Find, err))
    }

    pub async fn create(&self, data: NewTodo) -> Result<todo_item::Model, AppError> {
        let item = self
            .repo
            .create(data)
            .await
            .map_err(|err| map_error(TodoOp::Create, err))?;
        tracing::info!(todo_id = %item.id, "todo created");
        Ok(item)
    }

    pub async fn update(&self, id: Uuid, data: TodoChanges) -> Result<todo_item::Model, AppError> {
        let existing = self.find_one_or_fail(id).await?;
        let merged = self.repo.merge(existing, data);
        let item = self
            .repo
            .save(merged)
            .await
            .map_err(|err| map_error(TodoOp::Update, err))?;
        tracing::debug!(todo_id = %item.id, "todo updated");
        Ok(item)
    }

    pub async fn delete_by_id(&self, id: Uuid) -> Result<(), AppError> {
        self.find_one_or_fail(id).await?;
        self.repo
            .soft_delete(id)
            .await
            .map_err(|err| map_error(TodoOp::Delete, err))?;
        tracing::info!(todo_id = %id, "todo soft-deleted");
        Ok(())
    }
}

fn map_error(op: TodoOp, err: DaoLayerError) -> AppError {
    match err {
        DaoLayerError::NotFound { .. } => AppError::not_found(NOT_FOUND_MESSAGE),
        DaoLayerError::Db(db_err) => {
            let message = format!(
                "{}. Please check the logs for more details",
                op.failure_context()
            );
            AppError::storage(message, db_err)
        }
    }
}
