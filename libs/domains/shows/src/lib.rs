//! Shows Domain
//!
//! Live-event records ("shows") with nested checklist items, stored in MongoDB.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← Validation, absence → NotFound
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← Data access (trait + MongoDB implementation)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Entities, DTOs, document decoding
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use axum::Router;
//! use domain_shows::{MongoShowRepository, ShowService, handlers};
//! use mongodb::Client;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = Client::with_uri_str("mongodb://localhost:27017").await?;
//! let db = client.database("shows");
//!
//! let repository = MongoShowRepository::new(&db);
//! let service = ShowService::new(repository);
//!
//! let app: Router = Router::new().nest("/shows", handlers::router(service));
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod handlers;
pub mod models;
pub mod mongodb;
pub mod repository;
pub mod service;

// Re-export commonly used types
pub use error::{ShowError, ShowResult};
pub use handlers::ApiDoc;
pub use models::{
    Address, ChecklistItem, CreatedShow, NewChecklistItem, NewShow, Show, ShowUpdate,
    parse_show_id,
};
pub use crate::mongodb::{DEFAULT_COLLECTION, MongoShowRepository};
pub use repository::ShowRepository;
pub use service::ShowService;
