use std::sync::Arc;

use sea_orm::{DatabaseConnection, EntityTrait, PaginatorTrait};
use uuid::Uuid;

use todo_server::{
    config::DatabaseConfig,
    db::{
        connection,
        dao::{DaoContext, DaoLayerError},
        entities::prelude::TodoItem,
        providers::DbProviderId,
        repository::{NewTodo, TodoChanges, TodoRepository},
    },
    error::AppError,
    services::TodoService,
};

async fn sqlite_db() -> DatabaseConnection {
    let cfg = DatabaseConfig {
        url: Some("sqlite::memory:".to_string()),
        driver: DbProviderId::Sqlite,
        ..DatabaseConfig::default()
    };
    connection::connect(&cfg)
        .await
        .expect("in-memory sqlite should connect")
}

fn new_todo(task: &str) -> NewTodo {
    NewTodo {
        task: task.to_string(),
        is_done: false,
    }
}

#[tokio::test]
async fn dao_round_trips_items() {
    let db = sqlite_db().await;
    let dao = DaoContext::new(&db).todo();

    let first = dao.create(new_todo("task 1")).await.unwrap();
    let second = dao.create(new_todo("task 2")).await.unwrap();
    assert_ne!(first.id, second.id);
    assert!(first.deleted_at.is_none());

    let found = dao.find_one_or_fail(first.id).await.unwrap();
    assert_eq!(found.task, "task 1");
    assert!(!found.is_done);

    let all = dao.find_all().await.unwrap();
    let ids: Vec<_> = all.iter().map(|item| item.id).collect();
    assert_eq!(ids, [first.id, second.id]);
}

#[tokio::test]
async fn dao_save_persists_changes() {
    let db = sqlite_db().await;
    let dao = DaoContext::new(&db).todo();

    let item = dao.create(new_todo("task")).await.unwrap();
    let merged = dao.merge(
        item.clone(),
        TodoChanges {
            is_done: Some(true),
            ..TodoChanges::default()
        },
    );
    let saved = dao.save(merged).await.unwrap();
    assert!(saved.is_done);
    assert_eq!(saved.task, "task");
    assert!(saved.updated_at >= item.updated_at);

    let reloaded = dao.find_one_or_fail(item.id).await.unwrap();
    assert!(reloaded.is_done);
}

#[tokio::test]
async fn soft_delete_hides_rows_but_keeps_them() {
    let db = sqlite_db().await;
    let dao = DaoContext::new(&db).todo();

    let keep = dao.create(new_todo("keep")).await.unwrap();
    let gone = dao.create(new_todo("gone")).await.unwrap();

    dao.soft_delete(gone.id).await.unwrap();

    let err = dao.find_one_or_fail(gone.id).await.unwrap_err();
    assert!(matches!(err, DaoLayerError::NotFound { .. }));

    let live = dao.find_all().await.unwrap();
    assert_eq!(live.len(), 1);
    assert_eq!(live[0].id, keep.id);

    let err = dao.soft_delete(gone.id).await.unwrap_err();
    assert!(matches!(err, DaoLayerError::NotFound { .. }));

    let err = dao.save(gone.clone()).await.unwrap_err();
    assert!(matches!(err, DaoLayerError::NotFound { .. }));

    let stored = TodoItem::find_by_id(gone.id)
        .one(&db)
        .await
        .unwrap()
        .expect("soft-deleted row should still exist");
    assert!(stored.deleted_at.is_some());
    assert_eq!(stored.task, "gone");
    assert_eq!(TodoItem::find().count(&db).await.unwrap(), 2);
}

#[tokio::test]
async fn service_flow_over_sqlite() {
    let db = sqlite_db().await;
    let service = TodoService::new(Arc::new(DaoContext::new(&db).todo()));

    let created = service.create(new_todo("buy milk")).await.unwrap();
    let updated = service
        .update(
            created.id,
            TodoChanges {
                task: Some("buy milk and eggs".to_string()),
                is_done: None,
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.task, "buy milk and eggs");
    assert!(!updated.is_done);

    service.delete_by_id(created.id).await.unwrap();

    let err = service.find_one_or_fail(created.id).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
    assert!(service.find_all().await.unwrap().is_empty());

    let err = service.delete_by_id(Uuid::new_v4()).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}
