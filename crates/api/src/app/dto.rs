use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

use siteboard_comments::Comment;
use siteboard_users::User;

// -------------------------
// Request DTOs
// -------------------------

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateUserRequest {
    pub name: String,
    pub email: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateUserRequest {
    pub name: Option<String>,
    pub email: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateCommentRequest {
    /// Id of the commenting user.
    pub user_id: String,
    pub body: String,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct ListCommentsQuery {
    /// Restrict the listing to one user's comments.
    pub user_id: Option<String>,
}

// -------------------------
// JSON mapping helpers
// -------------------------

pub fn user_to_json(user: &User) -> serde_json::Value {
    serde_json::json!({
        "id": user.id_typed().to_string(),
        "name": user.name(),
        "email": user.email(),
        "created_at": user.created_at().to_rfc3339(),
    })
}

pub fn comment_to_json(comment: &Comment) -> serde_json::Value {
    serde_json::json!({
        "id": comment.id_typed().to_string(),
        "user_id": comment.user_id().to_string(),
        "body": comment.body(),
        "created_at": comment.created_at().to_rfc3339(),
    })
}
