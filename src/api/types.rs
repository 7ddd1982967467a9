//! Shared state for the API router.

use std::sync::{Arc, Mutex, MutexGuard};

use rusqlite::Connection;

use crate::api::error::ApiError;
use crate::screening::AnemiaScreener;

/// Shared context for all API routes: the store connection and the
/// screening backend. Handlers receive an already-resolved context;
/// no ambient global state exists.
#[derive(Clone)]
pub struct ApiContext {
    db: Arc<Mutex<Connection>>,
    pub screener: Arc<dyn AnemiaScreener>,
}

impl ApiContext {
    pub fn new(conn: Connection, screener: Arc<dyn AnemiaScreener>) -> Self {
        Self {
            db: Arc::new(Mutex::new(conn)),
            screener,
        }
    }

    /// Acquire the store connection. The lock serializes all store
    /// access; each handler performs at most one write under it.
    pub fn conn(&self) -> Result<MutexGuard<'_, Connection>, ApiError> {
        self.db
            .lock()
            .map_err(|_| ApiError::Internal("database lock poisoned".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::sqlite::open_memory_database;
    use crate::screening::RandomScreener;

    #[test]
    fn context_hands_out_connection() {
        let ctx = ApiContext::new(open_memory_database().unwrap(), Arc::new(RandomScreener));
        let conn = ctx.conn().unwrap();
        let one: i64 = conn.query_row("SELECT 1", [], |r| r.get(0)).unwrap();
        assert_eq!(one, 1);
    }

    #[test]
    fn context_clones_share_the_store() {
        let ctx = ApiContext::new(open_memory_database().unwrap(), Arc::new(RandomScreener));
        let clone = ctx.clone();
        ctx.conn()
            .unwrap()
            .execute("CREATE TABLE scratch (x INTEGER)", [])
            .unwrap();
        let count: i64 = clone
            .conn()
            .unwrap()
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE name = 'scratch'",
                [],
                |r| r.get(0),
            )
            .unwrap();
        assert_eq!(count, 1);
    }
}
