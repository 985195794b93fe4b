//! Store wiring shared by all handlers.

use std::sync::Arc;

use siteboard_core::AppError;
use siteboard_infra::{CommentStore, InMemoryCommentStore, InMemoryUserStore, UserStore};

#[cfg(feature = "postgres")]
use siteboard_infra::{PostgresCommentStore, PostgresUserStore};

/// Shared handler dependencies: one store per resource.
pub struct AppServices {
    pub users: Arc<dyn UserStore>,
    pub comments: Arc<dyn CommentStore>,
}

impl AppServices {
    /// Build the stores for this process.
    ///
    /// Defaults to in-memory stores; with the `postgres` feature and
    /// `USE_PERSISTENT_STORES=true`, connects to Postgres instead.
    /// Connection failure is an initialization error, not a panic.
    pub async fn build() -> Result<Self, AppError> {
        let use_persistent = std::env::var("USE_PERSISTENT_STORES")
            .unwrap_or_else(|_| "false".to_string())
            .parse::<bool>()
            .unwrap_or(false);

        if use_persistent {
            #[cfg(feature = "postgres")]
            {
                return Self::build_persistent().await;
            }
            #[cfg(not(feature = "postgres"))]
            tracing::warn!(
                "USE_PERSISTENT_STORES=true but postgres feature not enabled, falling back to in-memory"
            );
        }

        Ok(Self::in_memory())
    }

    /// In-memory wiring (dev/test).
    pub fn in_memory() -> Self {
        Self {
            users: Arc::new(InMemoryUserStore::new()),
            comments: Arc::new(InMemoryCommentStore::new()),
        }
    }

    #[cfg(feature = "postgres")]
    async fn build_persistent() -> Result<Self, AppError> {
        let database_url = std::env::var("DATABASE_URL")
            .map_err(|_| AppError::new("DATABASE_URL must be set when USE_PERSISTENT_STORES=true"))?;

        let pool = sqlx::PgPool::connect(&database_url)
            .await
            .map_err(|e| AppError::traced(format!("failed to connect to postgres: {e}")))?;

        Ok(Self {
            users: Arc::new(PostgresUserStore::new(pool.clone())),
            comments: Arc::new(PostgresCommentStore::new(pool)),
        })
    }
}
