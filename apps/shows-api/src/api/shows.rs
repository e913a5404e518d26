//! Wires the shows domain to the configured collection.

use axum::Router;
use domain_shows::{MongoShowRepository, ShowService, handlers};

use crate::state::AppState;

pub fn router(state: &AppState) -> Router {
    let repository = MongoShowRepository::with_collection(&state.db, &state.config.shows_collection);
    handlers::router(ShowService::new(repository))
}
