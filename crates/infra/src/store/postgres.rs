//! Postgres-backed stores.
//!
//! Tables:
//! - `users (id uuid primary key, name text, email text, created_at timestamptz)`
//! - `comments (id uuid primary key, user_id uuid, body text, created_at timestamptz)`
//!
//! The store traits are synchronous, so queries run on the current tokio
//! runtime via `block_in_place`; these stores require the multi-threaded
//! runtime.

use std::future::Future;
use std::sync::Arc;

use sqlx::{PgPool, Row};

use siteboard_comments::Comment;
use siteboard_core::{AppError, CommentId, UserId};
use siteboard_users::User;

use super::{CommentStore, UserStore};

fn run_blocking<T>(
    what: &str,
    fut: impl Future<Output = Result<T, sqlx::Error>>,
) -> Result<T, AppError> {
    let span = tracing::debug_span!("store_query", operation = what);
    let _guard = span.enter();

    let handle = tokio::runtime::Handle::try_current()
        .map_err(|_| AppError::traced(format!("{what}: no tokio runtime")))?;
    tokio::task::block_in_place(|| handle.block_on(fut))
        .map_err(|e| AppError::traced(format!("{what}: {e}")))
}

fn user_from_row(row: &sqlx::postgres::PgRow) -> Result<User, sqlx::Error> {
    Ok(User::from_parts(
        UserId::from_uuid(row.try_get("id")?),
        row.try_get("name")?,
        row.try_get("email")?,
        row.try_get("created_at")?,
    ))
}

fn comment_from_row(row: &sqlx::postgres::PgRow) -> Result<Comment, sqlx::Error> {
    Ok(Comment::from_parts(
        CommentId::from_uuid(row.try_get("id")?),
        UserId::from_uuid(row.try_get("user_id")?),
        row.try_get("body")?,
        row.try_get("created_at")?,
    ))
}

/// Postgres user store over a shared connection pool.
pub struct PostgresUserStore {
    pool: Arc<PgPool>,
}

impl PostgresUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool: Arc::new(pool),
        }
    }
}

impl UserStore for PostgresUserStore {
    fn insert(&self, user: User) -> Result<(), AppError> {
        let pool = self.pool.clone();
        run_blocking("insert user", async move {
            sqlx::query(
                "INSERT INTO users (id, name, email, created_at) VALUES ($1, $2, $3, $4)",
            )
            .bind(user.id_typed().as_uuid())
            .bind(user.name())
            .bind(user.email())
            .bind(user.created_at())
            .execute(&*pool)
            .await?;
            Ok(())
        })
    }

    fn get(&self, id: UserId) -> Result<Option<User>, AppError> {
        let pool = self.pool.clone();
        run_blocking("get user", async move {
            let row = sqlx::query(
                "SELECT id, name, email, created_at FROM users WHERE id = $1",
            )
            .bind(id.as_uuid())
            .fetch_optional(&*pool)
            .await?;
            row.as_ref().map(user_from_row).transpose()
        })
    }

    fn list(&self) -> Result<Vec<User>, AppError> {
        let pool = self.pool.clone();
        run_blocking("list users", async move {
            let rows = sqlx::query(
                "SELECT id, name, email, created_at FROM users ORDER BY created_at",
            )
            .fetch_all(&*pool)
            .await?;
            rows.iter().map(user_from_row).collect()
        })
    }

    fn update(&self, user: User) -> Result<(), AppError> {
        let pool = self.pool.clone();
        run_blocking("update user", async move {
            sqlx::query("UPDATE users SET name = $2, email = $3 WHERE id = $1")
                .bind(user.id_typed().as_uuid())
                .bind(user.name())
                .bind(user.email())
                .execute(&*pool)
                .await?;
            Ok(())
        })
    }

    fn delete(&self, id: UserId) -> Result<bool, AppError> {
        let pool = self.pool.clone();
        run_blocking("delete user", async move {
            let result = sqlx::query("DELETE FROM users WHERE id = $1")
                .bind(id.as_uuid())
                .execute(&*pool)
                .await?;
            Ok(result.rows_affected() > 0)
        })
    }
}

/// Postgres comment store over a shared connection pool.
pub struct PostgresCommentStore {
    pool: Arc<PgPool>,
}

impl PostgresCommentStore {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool: Arc::new(pool),
        }
    }
}

impl CommentStore for PostgresCommentStore {
    fn insert(&self, comment: Comment) -> Result<(), AppError> {
        let pool = self.pool.clone();
        run_blocking("insert comment", async move {
            sqlx::query(
                "INSERT INTO comments (id, user_id, body, created_at) VALUES ($1, $2, $3, $4)",
            )
            .bind(comment.id_typed().as_uuid())
            .bind(comment.user_id().as_uuid())
            .bind(comment.body())
            .bind(comment.created_at())
            .execute(&*pool)
            .await?;
            Ok(())
        })
    }

    fn get(&self, id: CommentId) -> Result<Option<Comment>, AppError> {
        let pool = self.pool.clone();
        run_blocking("get comment", async move {
            let row = sqlx::query(
                "SELECT id, user_id, body, created_at FROM comments WHERE id = $1",
            )
            .bind(id.as_uuid())
            .fetch_optional(&*pool)
            .await?;
            row.as_ref().map(comment_from_row).transpose()
        })
    }

    fn list(&self) -> Result<Vec<Comment>, AppError> {
        let pool = self.pool.clone();
        run_blocking("list comments", async move {
            let rows = sqlx::query(
                "SELECT id, user_id, body, created_at FROM comments ORDER BY created_at",
            )
            .fetch_all(&*pool)
            .await?;
            rows.iter().map(comment_from_row).collect()
        })
    }

    fn list_by_user(&self, user_id: UserId) -> Result<Vec<Comment>, AppError> {
        let pool = self.pool.clone();
        run_blocking("list comments by user", async move {
            let rows = sqlx::query(
                "SELECT id, user_id, body, created_at FROM comments \
                 WHERE user_id = $1 ORDER BY created_at",
            )
            .bind(user_id.as_uuid())
            .fetch_all(&*pool)
            .await?;
            rows.iter().map(comment_from_row).collect()
        })
    }

    fn delete(&self, id: CommentId) -> Result<bool, AppError> {
        let pool = self.pool.clone();
        run_blocking("delete comment", async move {
            let result = sqlx::query("DELETE FROM comments WHERE id = $1")
                .bind(id.as_uuid())
                .execute(&*pool)
                .await?;
            Ok(result.rows_affected() > 0)
        })
    }

    fn delete_by_user(&self, user_id: UserId) -> Result<usize, AppError> {
        let pool = self.pool.clone();
        run_blocking("delete comments by user", async move {
            let result = sqlx::query("DELETE FROM comments WHERE user_id = $1")
                .bind(user_id.as_uuid())
                .execute(&*pool)
                .await?;
            Ok(result.rows_affected() as usize)
        })
    }
}
