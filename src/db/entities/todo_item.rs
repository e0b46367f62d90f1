use base_entity_derive::base_entity;
use sea_orm::entity::prelude::*;

/// A single todo. `deleted_at` (injected by `base_entity`) marks the row as
/// soft-deleted; such rows are invisible to every read in the DAO layer.
#[base_entity]
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize, DeriveEntityModel)]
#[sea_orm(table_name = "todos")]
pub struct Model {
    pub task: String,
    #[sea_orm(default_value = false)]
    pub is_done: bool,
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }
}
