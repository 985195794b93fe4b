use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};

use siteboard_core::UserId;
use siteboard_infra::{CommentStore, UserStore};
use siteboard_users::{NewUser, UpdateUser, User};

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/", post(create_user).get(list_users))
        .route("/:id", get(get_user).patch(update_user).delete(delete_user))
}

#[utoipa::path(
    post,
    path = "/api/users",
    request_body = dto::CreateUserRequest,
    responses(
        (status = 201, description = "User created"),
        (status = 400, description = "Validation failure")
    ),
    tag = "users"
)]
pub async fn create_user(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::CreateUserRequest>,
) -> axum::response::Response {
    let user = match User::create(NewUser {
        name: body.name,
        email: body.email,
    }) {
        Ok(user) => user,
        Err(e) => return errors::domain_error_to_response(e),
    };

    if let Err(e) = services.users.insert(user.clone()) {
        return errors::abort_with_error(&e);
    }

    (StatusCode::CREATED, Json(dto::user_to_json(&user))).into_response()
}

#[utoipa::path(
    get,
    path = "/api/users",
    responses((status = 200, description = "All users, oldest first")),
    tag = "users"
)]
pub async fn list_users(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    let users = match services.users.list() {
        Ok(users) => users,
        Err(e) => return errors::abort_with_error(&e),
    };

    let items = users.iter().map(dto::user_to_json).collect::<Vec<_>>();
    (StatusCode::OK, Json(serde_json::json!({ "items": items }))).into_response()
}

#[utoipa::path(
    get,
    path = "/api/users/{id}",
    params(("id" = String, Path, description = "User id")),
    responses(
        (status = 200, description = "The user"),
        (status = 404, description = "No such user")
    ),
    tag = "users"
)]
pub async fn get_user(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: UserId = match id.parse() {
        Ok(id) => id,
        Err(e) => return errors::domain_error_to_response(e),
    };

    match services.users.get(id) {
        Ok(Some(user)) => (StatusCode::OK, Json(dto::user_to_json(&user))).into_response(),
        Ok(None) => errors::json_error(StatusCode::NOT_FOUND, "not_found", "user not found"),
        Err(e) => errors::abort_with_error(&e),
    }
}

#[utoipa::path(
    patch,
    path = "/api/users/{id}",
    params(("id" = String, Path, description = "User id")),
    request_body = dto::UpdateUserRequest,
    responses(
        (status = 200, description = "Updated user"),
        (status = 400, description = "Validation failure"),
        (status = 404, description = "No such user")
    ),
    tag = "users"
)]
pub async fn update_user(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    Json(body): Json<dto::UpdateUserRequest>,
) -> axum::response::Response {
    let id: UserId = match id.parse() {
        Ok(id) => id,
        Err(e) => return errors::domain_error_to_response(e),
    };

    let mut user = match services.users.get(id) {
        Ok(Some(user)) => user,
        Ok(None) => return errors::json_error(StatusCode::NOT_FOUND, "not_found", "user not found"),
        Err(e) => return errors::abort_with_error(&e),
    };

    if let Err(e) = user.apply_update(UpdateUser {
        name: body.name,
        email: body.email,
    }) {
        return errors::domain_error_to_response(e);
    }

    if let Err(e) = services.users.update(user.clone()) {
        return errors::abort_with_error(&e);
    }

    (StatusCode::OK, Json(dto::user_to_json(&user))).into_response()
}

#[utoipa::path(
    delete,
    path = "/api/users/{id}",
    params(("id" = String, Path, description = "User id")),
    responses(
        (status = 204, description = "User and their comments deleted"),
        (status = 404, description = "No such user")
    ),
    tag = "users"
)]
pub async fn delete_user(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: UserId = match id.parse() {
        Ok(id) => id,
        Err(e) => return errors::domain_error_to_response(e),
    };

    match services.users.delete(id) {
        Ok(true) => {}
        Ok(false) => return errors::json_error(StatusCode::NOT_FOUND, "not_found", "user not found"),
        Err(e) => return errors::abort_with_error(&e),
    }

    // A deleted user takes their comments with them.
    if let Err(e) = services.comments.delete_by_user(id) {
        return errors::abort_with_error(&e);
    }

    StatusCode::NO_CONTENT.into_response()
}
