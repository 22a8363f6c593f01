pub mod error;
pub mod handlers;
pub mod rate_limit;

use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::context::AppContext;

/// Request pipeline: trace, then rate limiter, then typed extraction and validation, then handler.
pub fn router(ctx: Arc<AppContext>) -> Router {
    let invite = Router::new()
        .route("/check_code/{code}", get(handlers::check_code))
        .route("/check_address/{address}", get(handlers::check_address))
        .route("/activate", post(handlers::activate))
        .route("/generate", post(handlers::generate))
        .route("/get_address_code/{address}", post(handlers::get_address_code))
        .route("/get_code_detail/{code}", post(handlers::get_code_detail))
        .route_layer(middleware::from_fn_with_state(ctx.clone(), rate_limit::rate_limit));

    Router::new()
        .nest("/api/invite", invite)
        .route("/health", get(handlers::health))
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
        .with_state(ctx)
}
