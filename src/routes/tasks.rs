use crate::{
    auth::Caller,
    error::AppError,
    models::{Task, TaskInput, TaskUpdate},
    state::AppState,
};
use actix_web::{delete, get, post, put, web, HttpResponse, Responder};
use serde_json::json;
use uuid::Uuid;
use validator::Validate;

fn task_not_found() -> AppError {
    AppError::NotFound("Task not found".into())
}

/// Ids that are not UUIDs cannot name any task, so they get the same 404.
fn parse_task_id(raw: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw).map_err(|_| task_not_found())
}

/// Retrieves every task of the caller, oldest first.
///
/// ## Responses:
/// - `200 OK`: JSON array of `Task` objects.
/// - `401 Unauthorized`: missing or invalid token.
/// - `500 Internal Server Error`: store failure.
#[get("")]
pub async fn get_tasks(
    state: web::Data<AppState>,
    caller: Caller,
) -> Result<impl Responder, AppError> {
    let tasks = state.tasks.list_tasks(caller.user_id()).await?;
    Ok(HttpResponse::Ok().json(tasks))
}

/// Creates a task owned by the caller.
///
/// ## Request Body:
/// - `title`: required, non-empty.
/// - `description` (optional).
/// - `category` (optional): `"Work"`, `"Personal"` or `"Other"`; defaults to `"Work"`.
///
/// The owner is always the caller; the body cannot choose it.
///
/// ## Responses:
/// - `201 Created`: the new `Task`, with `completed` set to `false`.
/// - `400 Bad Request`: missing/empty title, unknown category, undecodable body.
/// - `401 Unauthorized`: missing or invalid token.
#[post("")]
pub async fn create_task(
    state: web::Data<AppState>,
    caller: Caller,
    task_data: web::Json<TaskInput>,
) -> Result<impl Responder, AppError> {
    task_data.validate()?;

    let task = Task::new(task_data.into_inner(), caller.user_id());
    let task = state.tasks.create_task(task).await?;
    log::debug!("user {} created task {}", caller.user_id(), task.id);

    Ok(HttpResponse::Created().json(task))
}

/// Retrieves one of the caller's tasks.
///
/// ## Responses:
/// - `200 OK`: the `Task`.
/// - `401 Unauthorized`: missing or invalid token.
/// - `404 Not Found`: no such task, or it belongs to someone else.
#[get("/{id}")]
pub async fn get_task(
    state: web::Data<AppState>,
    caller: Caller,
    task_id: web::Path<String>,
) -> Result<impl Responder, AppError> {
    let id = parse_task_id(&task_id)?;

    match state.tasks.find_task(caller.user_id(), id).await? {
        Some(task) => Ok(HttpResponse::Ok().json(task)),
        None => Err(task_not_found()),
    }
}

/// Updates any of `title`, `description`, `completed` and `category`.
/// Omitted fields keep their value.
///
/// ## Responses:
/// - `200 OK`: the updated `Task`.
/// - `400 Bad Request`: empty title, unknown category, undecodable body.
/// - `401 Unauthorized`: missing or invalid token.
/// - `404 Not Found`: no such task, or it belongs to someone else.
#[put("/{id}")]
pub async fn update_task(
    state: web::Data<AppState>,
    caller: Caller,
    task_id: web::Path<String>,
    task_data: web::Json<TaskUpdate>,
) -> Result<impl Responder, AppError> {
    let id = parse_task_id(&task_id)?;
    task_data.validate()?;

    match state
        .tasks
        .update_task(caller.user_id(), id, task_data.into_inner())
        .await?
    {
        Some(task) => Ok(HttpResponse::Ok().json(task)),
        None => Err(task_not_found()),
    }
}

/// Deletes one of the caller's tasks.
///
/// ## Responses:
/// - `200 OK`: `{"message": "Task deleted successfully"}`.
/// - `401 Unauthorized`: missing or invalid token.
/// - `404 Not Found`: no such task, or it belongs to someone else.
#[delete("/{id}")]
pub async fn delete_task(
    state: web::Data<AppState>,
    caller: Caller,
    task_id: web::Path<String>,
) -> Result<impl Responder, AppError> {
    let id = parse_task_id(&task_id)?;

    if !state.tasks.delete_task(caller.user_id(), id).await? {
        return Err(task_not_found());
    }

    Ok(HttpResponse::Ok().json(json!({ "message": "Task deleted successfully" })))
}

/// Flips `completed` and returns the stored task. Any request body is ignored.
///
/// ## Responses:
/// - `200 OK`: the toggled `Task`.
/// - `401 Unauthorized`: missing or invalid token.
/// - `404 Not Found`: no such task, or it belongs to someone else.
#[put("/{id}/toggle")]
pub async fn toggle_task(
    state: web::Data<AppState>,
    caller: Caller,
    task_id: web::Path<String>,
) -> Result<impl Responder, AppError> {
    let id = parse_task_id(&task_id)?;

    match state.tasks.toggle_task(caller.user_id(), id).await? {
        Some(task) => Ok(HttpResponse::Ok().json(task)),
        None => Err(task_not_found()),
    }
}
