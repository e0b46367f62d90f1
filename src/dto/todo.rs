use sea_orm::prelude::DateTimeWithTimeZone;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{DoneFlag, Validate};
use crate::{
    db::entities::todo_item,
    db::repository::{NewTodo, TodoChanges},
    error::AppError,
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateTodoInput {
    pub task: String,
    #[serde(default)]
    pub is_done: DoneFlag,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdateTodoInput {
    pub task: Option<String>,
    pub is_done: Option<DoneFlag>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoItemResponse {
    pub id: Uuid,
    pub task: String,
    pub is_done: DoneFlag,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

impl Validate for CreateTodoInput {
    type Output = NewTodo;

    fn validate(self) -> Result<NewTodo, AppError> {
        Ok(NewTodo {
            task: normalize_task(&self.task)?.to_string(),
            is_done: self.is_done.into(),
        })
    }
}

impl Validate for UpdateTodoInput {
    type Output = TodoChanges;

    fn validate(self) -> Result<TodoChanges, AppError> {
        let task = match self.task {
            Some(task) => Some(normalize_task(&task)?.to_string()),
            None => None,
        };
        Ok(TodoChanges {
            task,
            is_done: self.is_done.map(bool::from),
        })
    }
}

fn normalize_task(task: &str) -> Result<&str, AppError> {
    let trimmed = task.trim();
    if trimmed.is_empty() {
        return Err(AppError::validation("Task required"));
    }
    Ok(trimmed)
}

impl From<todo_item::Model> for TodoItemResponse {
    fn from(model: todo_item::Model) -> Self {
        Self {
            id: model.id,
            task: model.task,
            is_done: model.is_done.into(),
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
