//! HTTP server configuration object.

use std::net::SocketAddr;

use rentomatic::outbound::persistence::DbPool;

/// Default number of Actix workers.
pub const DEFAULT_WORKERS: usize = 4;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) workers: usize,
    pub(crate) db_pool: Option<DbPool>,
}

impl ServerConfig {
    #[must_use]
    pub fn new(bind_addr: SocketAddr) -> Self {
        Self {
            bind_addr,
            workers: DEFAULT_WORKERS,
            db_pool: None,
        }
    }

    /// Set the number of worker threads; zero is treated as one.
    #[must_use]
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers.max(1);
        self
    }

    /// Attach a database pool. Without one the server lists the in-memory
    /// sample rooms.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }
}
