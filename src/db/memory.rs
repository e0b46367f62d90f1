use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::dao::{DaoLayerError, DaoResult};
use super::entities::{prelude::TodoItem, todo_item};
use super::repository::{NewTodo, TodoRepository};

/// Process-local todo store with the same soft-delete semantics as the
/// relational one. Rows keep insertion order.
#[derive(Clone, Default)]
pub struct InMemoryTodoRepository {
    rows: Arc<RwLock<Vec<todo_item::Model>>>,
}

impl InMemoryTodoRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every stored row, soft-deleted ones included.
    pub async fn snapshot(&self) -> Vec<todo_item::Model> {
        self.rows.read().await.clone()
    }
}

fn not_found(id: Uuid) -> DaoLayerError {
    DaoLayerError::not_found::<TodoItem>(id)
}

#[async_trait]
impl TodoRepository for InMemoryTodoRepository {
    async fn find_all(&self) -> DaoResult<Vec<todo_item::Model>> {
        let rows = self.rows.read().await;
        Ok(rows.iter().filter(|row| !row.is_deleted()).cloned().collect())
    }

    async fn find_one_or_fail(&self, id: Uuid) -> DaoResult<todo_item::Model> {
        let rows = self.rows.read().await;
        rows.iter()
            .find(|row| row.id == id && !row.is_deleted())
            .cloned()
            .ok_or_else(|| not_found(id))
    }

    async fn create(&self, data: NewTodo) -> DaoResult<todo_item::Model> {
        let now = Utc::now().fixed_offset();
        let model = todo_item::Model {
            id: Uuid::new_v4(),
            created_at: now,
            updated_at: now,
            deleted_at: None,
            task: data.task,
            is_done: data.is_done,
        };
        self.rows.write().await.push(model.clone());
        Ok(model)
    }

    async fn save(&self, item: todo_item::Model) -> DaoResult<todo_item::Model> {
        let mut rows = self.rows.write().await;
        let row = rows
            .iter_mut()
            .find(|row| row.id == item.id && !row.is_deleted())
            .ok_or_else(|| not_found(item.id))?;
        row.task = item.task;
        row.is_done = item.is_done;
        row.updated_at = Utc::now().fixed_offset();
        Ok(row.clone())
    }

    async fn soft_delete(&self, id: Uuid) -> DaoResult<()> {
        let mut rows = self.rows.write().await;
        let row = rows
            .iter_mut()
            .find(|row| row.id == id && !row.is_deleted())
            .ok_or_else(|| not_found(id))?;
        row.deleted_at = Some(Utc::now().fixed_offset());
        Ok(())
    }
}
