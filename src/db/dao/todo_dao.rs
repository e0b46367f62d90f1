use async_trait::async_trait;
use sea_orm::{ActiveValue::Unchanged, DatabaseConnection, Set};
use uuid::Uuid;

use super::{DaoBase, DaoResult};
use crate::db::entities::prelude::TodoItem;
use crate::db::entities::todo_item;
use crate::db::repository::{NewTodo, TodoRepository};

#[derive(Clone)]
pub struct TodoDao {
    db: DatabaseConnection,
}

impl DaoBase for TodoDao {
    type Entity = TodoItem;

    fn new(db: &DatabaseConnection) -> Self {
        Self { db: db.clone() }
    }

    fn db(&self) -> &DatabaseConnection {
        &self.db
    }
}

#[async_trait]
impl TodoRepository for TodoDao {
    async fn find_all(&self) -> DaoResult<Vec<todo_item::Model>> {
        DaoBase::find_all(self).await
    }

    async fn find_one_or_fail(&self, id: Uuid) -> DaoResult<todo_item::Model> {
        DaoBase::find_by_id(self, id).await
    }

    async fn create(&self, data: NewTodo) -> DaoResult<todo_item::Model> {
        let model = todo_item::ActiveModel {
            task: Set(data.task),
            is_done: Set(data.is_done),
            ..Default::default()
        };
        DaoBase::create(self, model).await
    }

    async fn save(&self, item: todo_item::Model) -> DaoResult<todo_item::Model> {
        // id and deleted_at stay out of the SET clause
        let active = todo_item::ActiveModel {
            id: Unchanged(item.id),
            task: Set(item.task),
            is_done: Set(item.is_done),
            ..Default::default()
        };
        DaoBase::save(self, item.id, active).await
    }

    async fn soft_delete(&self, id: Uuid) -> DaoResult<()> {
        DaoBase::soft_delete(self, id).await
    }
}
