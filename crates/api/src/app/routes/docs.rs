//! Generated API documentation.
//!
//! The document metadata (title, description, version) is static; the server
//! entry is filled in from the runtime configuration when the router is
//! built.

use std::sync::Arc;

use axum::{extract::Extension, response::IntoResponse, routing::get, Json, Router};
use utoipa::OpenApi;

use crate::app::dto;
use crate::config::ServerConfig;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "siteboard API",
        description = "This is a sample siteboard server.",
        version = "1.0"
    ),
    paths(
        super::system::echo,
        super::users::create_user,
        super::users::list_users,
        super::users::get_user,
        super::users::update_user,
        super::users::delete_user,
        super::comments::create_comment,
        super::comments::list_comments,
        super::comments::get_comment,
        super::comments::delete_comment,
    ),
    components(schemas(
        dto::CreateUserRequest,
        dto::UpdateUserRequest,
        dto::CreateCommentRequest,
    )),
    tags(
        (name = "system", description = "Health and diagnostics"),
        (name = "users", description = "User accounts"),
        (name = "comments", description = "Comments left by users")
    )
)]
struct ApiDoc;

/// Router serving the OpenAPI document under the docs prefix.
pub fn router(config: &ServerConfig) -> Router {
    let doc = Arc::new(openapi(config));
    Router::new()
        .route("/", get(serve_doc))
        .route("/openapi.json", get(serve_doc))
        .layer(Extension(doc))
}

fn openapi(config: &ServerConfig) -> utoipa::openapi::OpenApi {
    let mut doc = ApiDoc::openapi();
    doc.servers = Some(vec![
        utoipa::openapi::server::ServerBuilder::new()
            .url(format!("http://{}:{}", config.host, config.port))
            .build(),
    ]);
    doc
}

async fn serve_doc(
    Extension(doc): Extension<Arc<utoipa::openapi::OpenApi>>,
) -> impl IntoResponse {
    Json((*doc).clone())
}
