// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{
    middleware::from_fn_with_state,
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::CorsLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    auth::middleware::authenticate,
    models::{
        CreateTaskRequest, LoginRequest, LoginResponse, Priority, RegisterRequest, SortField,
        SortOrder, Task, UpdateTaskRequest, UserResponse,
    },
    state::AppState,
};

pub mod auth;
pub mod health;
pub mod tasks;
pub mod users;

pub fn router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route(
            "/profile/{id}",
            get(users::get_profile).delete(users::delete_profile),
        )
        .route("/task", get(tasks::list_tasks).post(tasks::create_task))
        .route("/task/done", get(tasks::list_done_tasks))
        .route(
            "/task/{id}",
            get(tasks::get_task)
                .patch(tasks::update_task)
                .delete(tasks::delete_task),
        );

    Router::new()
        .nest("/api", api_routes)
        .route("/health", get(health::health))
        .layer(from_fn_with_state(state.clone(), authenticate))
        .with_state(state)
        .merge(SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(CorsLayer::permissive())
}

struct BearerSecurity;

impl Modify for BearerSecurity {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health,
        auth::register,
        auth::login,
        users::get_profile,
        users::delete_profile,
        tasks::list_tasks,
        tasks::list_done_tasks,
        tasks::create_task,
        tasks::get_task,
        tasks::update_task,
        tasks::delete_task
    ),
    components(
        schemas(
            health::HealthResponse,
            RegisterRequest,
            LoginRequest,
            LoginResponse,
            UserResponse,
            Task,
            Priority,
            SortField,
            SortOrder,
            CreateTaskRequest,
            UpdateTaskRequest
        )
    ),
    modifiers(&BearerSecurity),
    tags(
        (name = "Health", description = "Liveness"),
        (name = "Auth", description = "Registration and token issuance"),
        (name = "Profile", description = "The caller's own account"),
        (name = "Tasks", description = "Task management, scoped to the owner")
    )
)]
struct ApiDoc;
