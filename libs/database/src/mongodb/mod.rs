//! MongoDB connector, health probe and document store primitives

mod collection;
mod config;
mod connector;
mod health;

pub use collection::{DocumentCollection, DocumentStream};
pub use config::MongoConfig;
pub use connector::{connect, connect_from_config, ping};
pub use health::{HealthStatus, check_health_detailed};

// Re-export MongoDB types for convenience
pub use ::mongodb::{Client, ClientSession, Database};
