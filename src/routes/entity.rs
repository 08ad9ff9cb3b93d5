//! Entity routes. Any method is accepted; the dispatcher resolves the service from the
//! first path segment and routes by method itself. Unmatched paths go to the same
//! dispatcher through the fallback, so every miss gets a plain-text body.

use crate::handlers::entity::{dispatch_collection, dispatch_fallback, dispatch_item};
use crate::state::AppState;
use axum::{routing::any, Router};

pub fn entity_routes(state: AppState) -> Router {
    Router::new()
        .route("/:context", any(dispatch_collection))
        .route("/:context/:id", any(dispatch_item))
        .fallback(dispatch_fallback)
        .with_state(state)
}
