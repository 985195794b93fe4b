use axum::{routing::get, Router};

pub mod comments;
pub mod docs;
pub mod system;
pub mod users;

/// Router for everything mounted under `/api`.
pub fn router() -> Router {
    Router::new()
        .route("/echo", get(system::echo))
        .nest("/users", users::router())
        .nest("/comments", comments::router())
}
