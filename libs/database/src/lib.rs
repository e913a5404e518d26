//! Database connectors and document store primitives.
//!
//! # Features
//!
//! - `mongodb` (default) - MongoDB connection management and the
//!   collection-scoped [`mongodb::DocumentCollection`]
//! - `config` - `MongoConfig` loading through `core_config::FromEnv`
//!
//! # Example
//!
//! ```ignore
//! use database::mongodb::{self, DocumentCollection, MongoConfig};
//!
//! let config = MongoConfig::with_database("mongodb://localhost:27017", "shows");
//! let client = mongodb::connect_from_config(&config).await?;
//! let shows = DocumentCollection::new(&client.database(config.database()), "wotb_shows");
//! let id = shows.insert(doc! { "venueName": "The Shed" }, None).await?;
//! ```

pub mod common;

#[cfg(feature = "mongodb")]
pub mod mongodb;

pub use common::{DatabaseError, DatabaseResult};
