//! # API REST
//!
//! Reference REST API for dengue notifications.
//!
//! Handles:
//! - HTTP endpoints with axum for notifications, users and health
//! - OpenAPI/Swagger documentation
//! - REST-specific concerns (JSON envelopes, status codes, CORS)
//!
//! Data lives in memory only; restarting the server starts from empty collections. The
//! routes and envelopes match what `dengue-client` expects, which makes this crate both a
//! development server and the test double for the client and form crates.

#![warn(rust_2018_idioms)]

pub mod store;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use dengue_core::{ApiEnvelope, HealthRes, NotificationRecord, User, UserPatch};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub use store::{Store, StoreError};

const MSG_INVALID_DATA: &str = "Dados inválidos";

type Reply<T> = (StatusCode, Json<ApiEnvelope<T>>);

/// Application state shared across REST API handlers.
#[derive(Clone, Default)]
pub struct AppState {
    pub store: Arc<Store>,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health,
        list_notifications,
        create_notification,
        get_notification,
        update_notification,
        delete_notification,
        list_users,
        create_user,
        get_user,
        update_user,
        delete_user,
    ),
    components(schemas(HealthRes, NotificationRecord, User, UserPatch))
)]
struct ApiDoc;

/// Build the router serving `/health`, `/api/dengue-notifications` and `/api/users`.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route(
            "/api/dengue-notifications",
            get(list_notifications).post(create_notification),
        )
        .route(
            "/api/dengue-notifications/:id",
            get(get_notification)
                .put(update_notification)
                .delete(delete_notification),
        )
        .route("/api/users", get(list_users).post(create_user))
        .route(
            "/api/users/:id",
            get(get_user).put(update_user).delete(delete_user),
        )
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health check response", body = HealthRes)
    )
)]
/// Health check endpoint for the REST API
///
/// Used by the form's connection probe.
#[axum::debug_handler]
async fn health() -> Json<HealthRes> {
    Json(HealthRes::healthy())
}

#[utoipa::path(
    get,
    path = "/api/dengue-notifications",
    responses(
        (status = 200, description = "Envelope whose data lists every notification", body = [NotificationRecord])
    )
)]
#[axum::debug_handler]
async fn list_notifications(State(state): State<AppState>) -> Reply<Vec<NotificationRecord>> {
    let notifications = state.store.list_notifications();
    ok(
        StatusCode::OK,
        notifications,
        "Notificações recuperadas com sucesso",
    )
}

#[utoipa::path(
    post,
    path = "/api/dengue-notifications",
    request_body = NotificationRecord,
    responses(
        (status = 201, description = "Envelope whose data is the created notification", body = NotificationRecord),
        (status = 400, description = "Invalid or incomplete notification")
    )
)]
/// Create a notification
///
/// The four mandatory fields must be present; the server assigns the id.
#[axum::debug_handler]
async fn create_notification(
    State(state): State<AppState>,
    body: Result<Json<NotificationRecord>, JsonRejection>,
) -> Reply<NotificationRecord> {
    let Json(record) = match body {
        Ok(body) => body,
        Err(rejection) => return invalid_body(rejection),
    };

    match state.store.create_notification(record) {
        Ok(created) => {
            tracing::info!("created notification {:?}", created.id);
            ok(
                StatusCode::CREATED,
                created,
                "Notificação criada com sucesso",
            )
        }
        Err(e) => store_error(e),
    }
}

#[utoipa::path(
    get,
    path = "/api/dengue-notifications/{id}",
    params(("id" = i64, Path, description = "Notification id")),
    responses(
        (status = 200, description = "Envelope whose data is the notification", body = NotificationRecord),
        (status = 404, description = "Notification not found")
    )
)]
#[axum::debug_handler]
async fn get_notification(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Reply<NotificationRecord> {
    match state.store.notification(id) {
        Ok(record) => ok(
            StatusCode::OK,
            record,
            "Notificação recuperada com sucesso",
        ),
        Err(e) => store_error(e),
    }
}

#[utoipa::path(
    put,
    path = "/api/dengue-notifications/{id}",
    params(("id" = i64, Path, description = "Notification id")),
    request_body = NotificationRecord,
    responses(
        (status = 200, description = "Envelope whose data is the updated notification", body = NotificationRecord),
        (status = 400, description = "Invalid or incomplete notification"),
        (status = 404, description = "Notification not found")
    )
)]
#[axum::debug_handler]
async fn update_notification(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    body: Result<Json<NotificationRecord>, JsonRejection>,
) -> Reply<NotificationRecord> {
    let Json(record) = match body {
        Ok(body) => body,
        Err(rejection) => return invalid_body(rejection),
    };

    match state.store.update_notification(id, record) {
        Ok(updated) => ok(
            StatusCode::OK,
            updated,
            "Notificação atualizada com sucesso",
        ),
        Err(e) => store_error(e),
    }
}

#[utoipa::path(
    delete,
    path = "/api/dengue-notifications/{id}",
    params(("id" = i64, Path, description = "Notification id")),
    responses(
        (status = 200, description = "Notification removed"),
        (status = 404, description = "Notification not found")
    )
)]
#[axum::debug_handler]
async fn delete_notification(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Reply<serde_json::Value> {
    match state.store.delete_notification(id) {
        Ok(()) => done("Notificação removida com sucesso"),
        Err(e) => store_error(e),
    }
}

#[utoipa::path(
    get,
    path = "/api/users",
    responses(
        (status = 200, description = "Envelope whose data lists every user", body = [User])
    )
)]
#[axum::debug_handler]
async fn list_users(State(state): State<AppState>) -> Reply<Vec<User>> {
    ok(
        StatusCode::OK,
        state.store.list_users(),
        "Usuários recuperados com sucesso",
    )
}

#[utoipa::path(
    post,
    path = "/api/users",
    request_body = UserPatch,
    responses(
        (status = 201, description = "Envelope whose data is the created user", body = User),
        (status = 400, description = "Invalid or duplicate user")
    )
)]
#[axum::debug_handler]
async fn create_user(
    State(state): State<AppState>,
    body: Result<Json<UserPatch>, JsonRejection>,
) -> Reply<User> {
    let Json(data) = match body {
        Ok(body) => body,
        Err(rejection) => return invalid_body(rejection),
    };
    if data.is_empty() {
        return failure(
            StatusCode::BAD_REQUEST,
            "Corpo da requisição vazio",
            "Dados são obrigatórios",
        );
    }

    match state.store.create_user(data) {
        Ok(user) => ok(StatusCode::CREATED, user, "Usuário criado com sucesso"),
        Err(e) => store_error(e),
    }
}

#[utoipa::path(
    get,
    path = "/api/users/{id}",
    params(("id" = i64, Path, description = "User id")),
    responses(
        (status = 200, description = "Envelope whose data is the user", body = User),
        (status = 404, description = "User not found")
    )
)]
#[axum::debug_handler]
async fn get_user(State(state): State<AppState>, Path(id): Path<i64>) -> Reply<User> {
    match state.store.user(id) {
        Ok(user) => ok(StatusCode::OK, user, "Usuário recuperado com sucesso"),
        Err(e) => store_error(e),
    }
}

#[utoipa::path(
    put,
    path = "/api/users/{id}",
    params(("id" = i64, Path, description = "User id")),
    request_body = UserPatch,
    responses(
        (status = 200, description = "Envelope whose data is the updated user", body = User),
        (status = 400, description = "Invalid or duplicate user"),
        (status = 404, description = "User not found")
    )
)]
#[axum::debug_handler]
async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    body: Result<Json<UserPatch>, JsonRejection>,
) -> Reply<User> {
    let Json(patch) = match body {
        Ok(body) => body,
        Err(rejection) => return invalid_body(rejection),
    };
    if patch.is_empty() {
        return failure(
            StatusCode::BAD_REQUEST,
            "Corpo da requisição vazio",
            "Dados são obrigatórios",
        );
    }

    match state.store.update_user(id, patch) {
        Ok(user) => ok(StatusCode::OK, user, "Usuário atualizado com sucesso"),
        Err(e) => store_error(e),
    }
}

#[utoipa::path(
    delete,
    path = "/api/users/{id}",
    params(("id" = i64, Path, description = "User id")),
    responses(
        (status = 200, description = "User removed"),
        (status = 404, description = "User not found")
    )
)]
#[axum::debug_handler]
async fn delete_user(State(state): State<AppState>, Path(id): Path<i64>) -> Reply<serde_json::Value> {
    match state.store.delete_user(id) {
        Ok(()) => done("Usuário removido com sucesso"),
        Err(e) => store_error(e),
    }
}

fn ok<T>(status: StatusCode, data: T, message: &str) -> Reply<T> {
    (status, Json(ApiEnvelope::ok(data, message)))
}

fn done<T>(message: &str) -> Reply<T> {
    (StatusCode::OK, Json(ApiEnvelope::done(message)))
}

fn failure<T>(status: StatusCode, error: impl Into<String>, message: &str) -> Reply<T> {
    (status, Json(ApiEnvelope::failure(error, message)))
}

fn invalid_body<T>(rejection: JsonRejection) -> Reply<T> {
    tracing::warn!("rejected request body: {rejection}");
    failure(StatusCode::BAD_REQUEST, rejection.body_text(), MSG_INVALID_DATA)
}

fn store_error<T>(err: StoreError) -> Reply<T> {
    tracing::debug!("store error: {err}");
    match err {
        StoreError::Invalid(msg) => failure(StatusCode::BAD_REQUEST, msg, MSG_INVALID_DATA),
        StoreError::NotificationNotFound(_) => failure(
            StatusCode::NOT_FOUND,
            err.to_string(),
            "Notificação não encontrada",
        ),
        StoreError::UserNotFound(_) => failure(
            StatusCode::NOT_FOUND,
            err.to_string(),
            "Usuário não encontrado",
        ),
    }
}
