//! Application state shared across handlers.

use std::sync::Arc;

use sqlx::PgPool;

/// Handle to the connection pool.
///
/// Cloning only bumps a reference count.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    pool: PgPool,
}

impl AppState {
    /// Wrap an open pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self {
            inner: Arc::new(AppStateInner { pool }),
        }
    }

    /// Shared `PostgreSQL` pool.
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.inner.pool
    }
}
