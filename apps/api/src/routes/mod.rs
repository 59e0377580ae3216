pub mod health;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use crate::auth::verify_token;
use crate::enrichment::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let protected = Router::new()
        .route("/enrich", post(handlers::handle_enrich))
        .route_layer(middleware::from_fn_with_state(state.clone(), verify_token));

    Router::new()
        .route("/health", get(health::health_handler))
        .merge(protected)
        .with_state(state)
}
