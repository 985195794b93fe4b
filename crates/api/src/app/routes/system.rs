use axum::Json;

/// Liveness echo: a fixed payload, no dependencies touched.
#[utoipa::path(
    get,
    path = "/api/echo",
    responses((status = 200, description = "Fixed hello payload", body = String)),
    tag = "system"
)]
pub async fn echo() -> Json<&'static str> {
    Json("hello world!")
}
