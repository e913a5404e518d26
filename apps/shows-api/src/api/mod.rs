//! HTTP routes for the Shows API, served from the root path.

pub mod health;
pub mod root;
pub mod shows;

use axum::Router;

use crate::state::AppState;

pub fn routes(state: &AppState) -> Router {
    Router::new()
        .nest("/shows", shows::router(state))
        .merge(root::router())
        .merge(health::router(state.clone()))
}
