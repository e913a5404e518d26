//! Shared application state handed to the route builders.

use mongodb::{Client, Database};

/// Cloning is cheap: the client and database share one connection pool.
#[derive(Clone)]
pub struct AppState {
    pub config: crate::config::Config,
    pub mongo_client: Client,
    /// Database named by `MONGODB_DATABASE`
    pub db: Database,
}
