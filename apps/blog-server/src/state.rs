//! Application state - shared across all handlers.

use std::sync::Arc;

use blog_core::ports::PostRepository;
use blog_infra::database::{DatabaseConfig, DatabaseConnections, InMemoryPostRepository};

#[cfg(feature = "postgres")]
use blog_infra::database::PostgresPostRepository;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub posts: Arc<dyn PostRepository>,
    pub db: Option<Arc<DatabaseConnections>>,
}

impl AppState {
    /// State backed by a fresh in-memory store.
    pub fn in_memory() -> Self {
        Self::with_repository(Arc::new(InMemoryPostRepository::new()))
    }

    /// State backed by an arbitrary repository, with no database pool to manage.
    pub fn with_repository(posts: Arc<dyn PostRepository>) -> Self {
        Self { posts, db: None }
    }

    /// Build the application state, connecting to the database when one is configured.
    ///
    /// A configured database that cannot be reached fails startup.
    pub async fn connect(db_config: Option<&DatabaseConfig>) -> anyhow::Result<Self> {
        match db_config {
            Some(config) => Self::connect_database(config).await,
            None => {
                tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
                Ok(Self::in_memory())
            }
        }
    }

    #[cfg(feature = "postgres")]
    async fn connect_database(config: &DatabaseConfig) -> anyhow::Result<Self> {
        use anyhow::Context;

        let connections = DatabaseConnections::init(config)
            .await
            .context("failed to connect to the posts database")?;
        let conn = Arc::new(connections);
        let posts = Arc::new(PostgresPostRepository::new(conn.main.clone()));

        tracing::info!("Application state initialized (postgres)");
        Ok(Self {
            posts,
            db: Some(conn),
        })
    }

    #[cfg(not(feature = "postgres"))]
    async fn connect_database(_config: &DatabaseConfig) -> anyhow::Result<Self> {
        tracing::warn!(
            "DATABASE_URL ignored: built without postgres feature - using in-memory repository"
        );
        Ok(Self::in_memory())
    }

    /// Name of the storage backend, as reported by the health endpoint.
    pub fn storage_kind(&self) -> &'static str {
        if self.db.is_some() { "postgres" } else { "memory" }
    }

    /// Release the storage connection. Call only after the listener has stopped.
    pub async fn close(self) {
        let Some(db) = self.db else {
            return;
        };

        drop(self.posts);
        match Arc::try_unwrap(db) {
            Ok(connections) => connections.close().await,
            Err(_) => {
                tracing::warn!("Database pool still shared at shutdown; dropping without close")
            }
        }
    }
}
