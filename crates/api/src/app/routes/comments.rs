use std::sync::Arc;

use axum::{
    extract::{Extension, Path, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};

use siteboard_comments::{Comment, NewComment};
use siteboard_core::{CommentId, UserId};
use siteboard_infra::{CommentStore, UserStore};

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/", post(create_comment).get(list_comments))
        .route("/:id", get(get_comment).delete(delete_comment))
}

#[utoipa::path(
    post,
    path = "/api/comments",
    request_body = dto::CreateCommentRequest,
    responses(
        (status = 201, description = "Comment created"),
        (status = 400, description = "Validation failure"),
        (status = 404, description = "Commenting user does not exist")
    ),
    tag = "comments"
)]
pub async fn create_comment(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::CreateCommentRequest>,
) -> axum::response::Response {
    let user_id: UserId = match body.user_id.parse() {
        Ok(id) => id,
        Err(e) => return errors::domain_error_to_response(e),
    };

    // Comments only attach to existing users.
    match services.users.get(user_id) {
        Ok(Some(_)) => {}
        Ok(None) => return errors::json_error(StatusCode::NOT_FOUND, "not_found", "user not found"),
        Err(e) => return errors::abort_with_error(&e),
    }

    let comment = match Comment::create(NewComment {
        user_id,
        body: body.body,
    }) {
        Ok(comment) => comment,
        Err(e) => return errors::domain_error_to_response(e),
    };

    if let Err(e) = services.comments.insert(comment.clone()) {
        return errors::abort_with_error(&e);
    }

    (StatusCode::CREATED, Json(dto::comment_to_json(&comment))).into_response()
}

#[utoipa::path(
    get,
    path = "/api/comments",
    params(dto::ListCommentsQuery),
    responses((status = 200, description = "Comments, oldest first")),
    tag = "comments"
)]
pub async fn list_comments(
    Extension(services): Extension<Arc<AppServices>>,
    Query(query): Query<dto::ListCommentsQuery>,
) -> axum::response::Response {
    let comments = match &query.user_id {
        Some(raw) => {
            let user_id: UserId = match raw.parse() {
                Ok(id) => id,
                Err(e) => return errors::domain_error_to_response(e),
            };
            services.comments.list_by_user(user_id)
        }
        None => services.comments.list(),
    };

    let comments = match comments {
        Ok(comments) => comments,
        Err(e) => return errors::abort_with_error(&e),
    };

    let items = comments.iter().map(dto::comment_to_json).collect::<Vec<_>>();
    (StatusCode::OK, Json(serde_json::json!({ "items": items }))).into_response()
}

#[utoipa::path(
    get,
    path = "/api/comments/{id}",
    params(("id" = String, Path, description = "Comment id")),
    responses(
        (status = 200, description = "The comment"),
        (status = 404, description = "No such comment")
    ),
    tag = "comments"
)]
pub async fn get_comment(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: CommentId = match id.parse() {
        Ok(id) => id,
        Err(e) => return errors::domain_error_to_response(e),
    };

    match services.comments.get(id) {
        Ok(Some(comment)) => (StatusCode::OK, Json(dto::comment_to_json(&comment))).into_response(),
        Ok(None) => errors::json_error(StatusCode::NOT_FOUND, "not_found", "comment not found"),
        Err(e) => errors::abort_with_error(&e),
    }
}

#[utoipa::path(
    delete,
    path = "/api/comments/{id}",
    params(("id" = String, Path, description = "Comment id")),
    responses(
        (status = 204, description = "Comment deleted"),
        (status = 404, description = "No such comment")
    ),
    tag = "comments"
)]
pub async fn delete_comment(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: CommentId = match id.parse() {
        Ok(id) => id,
        Err(e) => return errors::domain_error_to_response(e),
    };

    match services.comments.delete(id) {
        Ok(true) => StatusCode::NO_CONTENT.into_response(),
        Ok(false) => errors::json_error(StatusCode::NOT_FOUND, "not_found", "comment not found"),
        Err(e) => errors::abort_with_error(&e),
    }
}
