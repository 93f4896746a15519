// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Task endpoints.
//!
//! Every route requires an authenticated caller. Single-task routes resolve
//! the record through [`authorize_owned`], so a caller can never read or
//! change a task owned by someone else.

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Json,
};
use chrono::Utc;
use tracing::debug;
use uuid::Uuid;

use crate::{
    auth::AuthContext,
    error::ApiError,
    models::{CreateTaskRequest, DoneQuery, Task, TaskListQuery, UpdateTaskRequest},
    state::AppState,
    storage::{authorize_owned, StoredTask},
};

const TASK: &str = "task";

#[utoipa::path(
    get,
    path = "/api/task",
    params(TaskListQuery),
    tag = "Tasks",
    security(("bearer" = [])),
    responses(
        (status = 200, body = [Task]),
        (status = 403, description = "Anonymous caller"),
        (status = 422, description = "Unknown sort field or order")
    )
)]
pub async fn list_tasks(
    State(state): State<AppState>,
    ctx: AuthContext,
    query: Result<Query<TaskListQuery>, QueryRejection>,
) -> Result<Json<Vec<Task>>, ApiError> {
    let principal = ctx.require()?;
    let Query(query) = query?;

    let mut tasks = state.tasks.list_by_owner(&principal.id)?;
    query.sort(&mut tasks);
    Ok(Json(tasks.into_iter().map(Task::from).collect()))
}

/// List the caller's finished (or unfinished) tasks, most recently updated
/// first.
#[utoipa::path(
    get,
    path = "/api/task/done",
    params(DoneQuery),
    tag = "Tasks",
    security(("bearer" = [])),
    responses(
        (status = 200, body = [Task]),
        (status = 403, description = "Anonymous caller")
    )
)]
pub async fn list_done_tasks(
    State(state): State<AppState>,
    ctx: AuthContext,
    query: Result<Query<DoneQuery>, QueryRejection>,
) -> Result<Json<Vec<Task>>, ApiError> {
    let principal = ctx.require()?;
    let Query(query) = query?;

    let mut tasks: Vec<StoredTask> = state
        .tasks
        .list_by_owner(&principal.id)?
        .into_iter()
        .filter(|task| task.is_done == query.status)
        .collect();
    tasks.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
    Ok(Json(tasks.into_iter().map(Task::from).collect()))
}

#[utoipa::path(
    post,
    path = "/api/task",
    request_body = CreateTaskRequest,
    tag = "Tasks",
    security(("bearer" = [])),
    responses(
        (status = 201, body = Task),
        (status = 403, description = "Anonymous caller"),
        (status = 422, description = "Invalid title, description or priority")
    )
)]
pub async fn create_task(
    State(state): State<AppState>,
    ctx: AuthContext,
    payload: Result<Json<CreateTaskRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Task>), ApiError> {
    let principal = ctx.require()?;
    let Json(request) = payload?;
    request.validate()?;

    let now = Utc::now();
    let task = StoredTask {
        id: Uuid::new_v4().to_string(),
        owner_id: principal.id.clone(),
        title: request.title.trim().to_string(),
        description: request.description,
        priority: request.priority,
        is_done: false,
        created_at: now,
        updated_at: now,
    };
    state.tasks.insert(task.clone())?;

    debug!(task_id = %task.id, owner_id = %task.owner_id, "task created");
    Ok((StatusCode::CREATED, Json(task.into())))
}

#[utoipa::path(
    get,
    path = "/api/task/{id}",
    params(("id" = String, Path, description = "Task id")),
    tag = "Tasks",
    security(("bearer" = [])),
    responses(
        (status = 200, body = Task),
        (status = 403, description = "Anonymous caller or task owned by another user"),
        (status = 404, description = "No such task")
    )
)]
pub async fn get_task(
    State(state): State<AppState>,
    ctx: AuthContext,
    Path(id): Path<String>,
) -> Result<Json<Task>, ApiError> {
    let task = authorize_owned(&ctx, TASK, || state.tasks.find_by_id(&id))?;
    Ok(Json(task.into()))
}

#[utoipa::path(
    patch,
    path = "/api/task/{id}",
    params(("id" = String, Path, description = "Task id")),
    request_body = UpdateTaskRequest,
    tag = "Tasks",
    security(("bearer" = [])),
    responses(
        (status = 200, body = Task),
        (status = 403, description = "Anonymous caller or task owned by another user"),
        (status = 404, description = "No such task"),
        (status = 422, description = "Invalid title, description or priority")
    )
)]
pub async fn update_task(
    State(state): State<AppState>,
    ctx: AuthContext,
    Path(id): Path<String>,
    payload: Result<Json<UpdateTaskRequest>, JsonRejection>,
) -> Result<Json<Task>, ApiError> {
    let mut task = authorize_owned(&ctx, TASK, || state.tasks.find_by_id(&id))?;
    let Json(request) = payload?;
    request.validate()?;

    request.apply(&mut task, Utc::now());
    state.tasks.update(task.clone())?;
    Ok(Json(task.into()))
}

#[utoipa::path(
    delete,
    path = "/api/task/{id}",
    params(("id" = String, Path, description = "Task id")),
    tag = "Tasks",
    security(("bearer" = [])),
    responses(
        (status = 204, description = "Task deleted"),
        (status = 403, description = "Anonymous caller or task owned by another user"),
        (status = 404, description = "No such task")
    )
)]
pub async fn delete_task(
    State(state): State<AppState>,
    ctx: AuthContext,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let task = authorize_owned(&ctx, TASK, || state.tasks.find_by_id(&id))?;
    state.tasks.delete(&task.id)?;
    Ok(StatusCode::NO_CONTENT)
}
