use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    Router,
    body::{self, Body},
    http::{Request, StatusCode},
};
use sea_orm::DbErr;
use serde_json::json;
use tower::ServiceExt;
use uuid::Uuid;

use todo_server::{
    db::{
        dao::{DaoLayerError, DaoResult},
        entities::todo_item,
        repository::{NewTodo, TodoRepository},
    },
    routes::API_PREFIX,
    test_helpers::{test_router, test_router_with},
};

fn api_path(path: &str) -> String {
    format!("{API_PREFIX}{path}")
}

async fn json_response(app: &Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
    let response = app
        .clone()
        .oneshot(request)
        .await
        .expect("request should succeed");
    let status = response.status();
    let body = body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body should read");
    let json = if body.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&body).expect("body should be json")
    };
    (status, json)
}

fn json_request(method: &str, path: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(api_path(path))
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn empty_request(method: &str, path: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(api_path(path))
        .body(Body::empty())
        .unwrap()
}

async fn create_todo(app: &Router, body: serde_json::Value) -> serde_json::Value {
    let (status, json) = json_response(app, json_request("POST", "/todos", body)).await;
    assert_eq!(status, StatusCode::CREATED);
    json["data"].clone()
}

#[tokio::test]
async fn health_reports_ok() {
    let (app, _) = test_router();
    let (status, json) = json_response(&app, empty_request("GET", "/health")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["ok"], true);
}

#[tokio::test]
async fn create_returns_created_item() {
    let (app, _) = test_router();
    let (status, json) = json_response(
        &app,
        json_request("POST", "/todos", json!({ "task": "buy milk", "isDone": 0 })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(json["status"], 201);
    assert_eq!(json["message"], "created");
    let item = &json["data"];
    assert_eq!(item["task"], "buy milk");
    assert_eq!(item["isDone"], 0);
    let id = item["id"].as_str().expect("id should be a string");
    Uuid::parse_str(id).expect("id should be a uuid");
    assert!(item.get("deletedAt").is_none());
}

#[tokio::test]
async fn create_accepts_boolean_flag_and_defaults_missing_flag() {
    let (app, _) = test_router();

    let done = create_todo(&app, json!({ "task": "done already", "isDone": true })).await;
    let open = create_todo(&app, json!({ "task": "still open" })).await;

    assert_eq!(done["isDone"], 1);
    assert_eq!(open["isDone"], 0);
}

#[tokio::test]
async fn create_rejects_invalid_input() {
    let (app, repo) = test_router();
    let bodies = [
        json!({ "task": "" }),
        json!({ "task": "   " }),
        json!({ "isDone": 1 }),
        json!({ "task": "x", "isDone": 2 }),
        json!({ "task": "x", "owner": "me" }),
    ];

    for body in bodies {
        let (status, json) =
            json_response(&app, json_request("POST", "/todos", body.clone())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{body}");
        assert_eq!(json["status"], 400);
        assert!(json["data"].is_null());
    }

    assert!(repo.snapshot().await.is_empty());
}

#[tokio::test]
async fn create_rejects_malformed_json() {
    let (app, _) = test_router();
    let request = Request::builder()
        .method("POST")
        .uri(api_path("/todos"))
        .header("content-type", "application/json")
        .body(Body::from("{\"task\":"))
        .unwrap();

    let (status, json) = json_response(&app, request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["message"].as_str().is_some());
}

#[tokio::test]
async fn create_without_json_content_type_is_unsupported() {
    let (app, repo) = test_router();
    let request = Request::builder()
        .method("POST")
        .uri(api_path("/todos"))
        .body(Body::from(json!({ "task": "task" }).to_string()))
        .unwrap();

    let (status, json) = json_response(&app, request).await;
    assert_eq!(status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
    assert_eq!(json["status"], 415);
    assert!(json["data"].is_null());
    assert!(repo.snapshot().await.is_empty());
}

#[tokio::test]
async fn create_with_oversized_body_is_too_large() {
    let (app, repo) = test_router();
    let task = "x".repeat(3 * 1024 * 1024);

    let (status, json) =
        json_response(&app, json_request("POST", "/todos", json!({ "task": task }))).await;
    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(json["status"], 413);
    assert!(repo.snapshot().await.is_empty());
}

#[tokio::test]
async fn index_lists_items_in_creation_order() {
    let (app, _) = test_router();
    for task in ["task 1", "task 2", "task 3"] {
        create_todo(&app, json!({ "task": task })).await;
    }

    let (status, json) = json_response(&app, empty_request("GET", "/todos")).await;

    assert_eq!(status, StatusCode::OK);
    let tasks: Vec<_> = json["data"]
        .as_array()
        .expect("data should be a list")
        .iter()
        .map(|item| item["task"].as_str().unwrap_or_default().to_string())
        .collect();
    assert_eq!(tasks, ["task 1", "task 2", "task 3"]);
}

#[tokio::test]
async fn show_returns_item() {
    let (app, _) = test_router();
    let created = create_todo(&app, json!({ "task": "task 1" })).await;
    let id = created["id"].as_str().unwrap();

    let (status, json) = json_response(&app, empty_request("GET", &format!("/todos/{id}"))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"], created);
}

#[tokio::test]
async fn show_unknown_ids_are_not_found() {
    let (app, _) = test_router();

    for id in [Uuid::new_v4().to_string(), "missing-id".to_string()] {
        let (status, json) =
            json_response(&app, empty_request("GET", &format!("/todos/{id}"))).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{id}");
        assert_eq!(json["message"], "Todo item not found");
    }
}

#[tokio::test]
async fn patch_updates_only_present_fields() {
    let (app, _) = test_router();
    let created = create_todo(&app, json!({ "task": "buy milk", "isDone": 1 })).await;
    let id = created["id"].as_str().unwrap();

    let (status, json) = json_response(
        &app,
        json_request(
            "PATCH",
            &format!("/todos/{id}"),
            json!({ "task": "buy milk and eggs" }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["id"], created["id"]);
    assert_eq!(json["data"]["task"], "buy milk and eggs");
    assert_eq!(json["data"]["isDone"], 1);
}

#[tokio::test]
async fn put_is_accepted_as_update() {
    let (app, _) = test_router();
    let created = create_todo(&app, json!({ "task": "task" })).await;
    let id = created["id"].as_str().unwrap();

    let (status, json) = json_response(
        &app,
        json_request("PUT", &format!("/todos/{id}"), json!({ "isDone": 1 })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["task"], "task");
    assert_eq!(json["data"]["isDone"], 1);
}

#[tokio::test]
async fn update_validates_before_lookup() {
    let (app, _) = test_router();
    let created = create_todo(&app, json!({ "task": "task" })).await;
    let id = created["id"].as_str().unwrap();

    let (status, _) = json_response(
        &app,
        json_request("PATCH", &format!("/todos/{id}"), json!({ "task": "" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = json_response(
        &app,
        json_request(
            "PATCH",
            &format!("/todos/{}", Uuid::new_v4()),
            json!({ "task": "valid" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_soft_deletes_item() {
    let (app, repo) = test_router();
    let created = create_todo(&app, json!({ "task": "task" })).await;
    let id = created["id"].as_str().unwrap();
    let path = format!("/todos/{id}");

    let (status, body) = json_response(&app, empty_request("DELETE", &path)).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(body.is_null());

    let (status, _) = json_response(&app, empty_request("GET", &path)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, list) = json_response(&app, empty_request("GET", "/todos")).await;
    assert_eq!(list["data"], json!([]));

    let (status, _) = json_response(
        &app,
        json_request("PATCH", &path, json!({ "task": "revived" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = json_response(&app, empty_request("DELETE", &path)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let rows = repo.snapshot().await;
    assert_eq!(rows.len(), 1);
    assert!(rows[0].deleted_at.is_some());
    assert_eq!(rows[0].task, "task");
}

#[tokio::test]
async fn unknown_route_gets_json_envelope() {
    let (app, _) = test_router();
    let (status, json) = json_response(&app, empty_request("GET", "/nope")).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["status"], 404);
}

#[tokio::test]
async fn wrong_method_keeps_its_status() {
    let (app, _) = test_router();
    let (status, json) = json_response(&app, empty_request("DELETE", "/todos")).await;

    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(json["status"], 405);
}

struct UnavailableRepository;

fn unavailable() -> DaoLayerError {
    DaoLayerError::Db(DbErr::Custom("database unavailable".to_string()))
}

#[async_trait]
impl TodoRepository for UnavailableRepository {
    async fn find_all(&self) -> DaoResult<Vec<todo_item::Model>> {
        Err(unavailable())
    }

    async fn find_one_or_fail(&self, _id: Uuid) -> DaoResult<todo_item::Model> {
        Err(unavailable())
    }

    async fn create(&self, _data: NewTodo) -> DaoResult<todo_item::Model> {
        Err(unavailable())
    }

    async fn save(&self, _item: todo_item::Model) -> DaoResult<todo_item::Model> {
        Err(unavailable())
    }

    async fn soft_delete(&self, _id: Uuid) -> DaoResult<()> {
        Err(unavailable())
    }
}

#[tokio::test]
async fn storage_failures_surface_as_server_errors() {
    let app = test_router_with(Arc::new(UnavailableRepository));

    let (status, json) = json_response(&app, empty_request("GET", "/todos")).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        json["message"],
        "Find failed. Please check the logs for more details"
    );

    let (status, _) = json_response(
        &app,
        json_request("POST", "/todos", json!({ "task": "task" })),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);

    let (status, _) = json_response(
        &app,
        empty_request("GET", &format!("/todos/{}", Uuid::new_v4())),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}
