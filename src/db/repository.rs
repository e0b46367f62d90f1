use async_trait::async_trait;
use uuid::Uuid;

use super::dao::DaoResult;
use super::entities::todo_item;

/// Validated data for a new todo.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTodo {
    pub task: String,
    pub is_done: bool,
}

/// Validated partial update; `None` keeps the stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoChanges {
    pub task: Option<String>,
    pub is_done: Option<bool>,
}

/// Storage capability the todo service is written against.
///
/// `find_all`, `find_one_or_fail`, `save` and `soft_delete` only ever see
/// live rows: a soft-deleted todo behaves exactly like a missing one.
#[async_trait]
pub trait TodoRepository: Send + Sync {
    async fn find_all(&self) -> DaoResult<Vec<todo_item::Model>>;

    async fn find_one_or_fail(&self, id: Uuid) -> DaoResult<todo_item::Model>;

    async fn create(&self, data: NewTodo) -> DaoResult<todo_item::Model>;

    fn merge(&self, mut item: todo_item::Model, changes: TodoChanges) -> todo_item::Model {
        if let Some(task) = changes.task {
            item.task = task;
        }
        if let Some(is_done) = changes.is_done {
            item.is_done = is_done;
        }
        item
    }

    /// Persists `task` and `is_done` of an existing live item.
    async fn save(&self, item: todo_item::Model) -> DaoResult<todo_item::Model>;

    async fn soft_delete(&self, id: Uuid) -> DaoResult<()>;
}
