pub(crate) mod api_error;
pub(crate) mod handlers;
pub(crate) mod response;
pub(crate) mod state;
pub(crate) mod validation;

use std::sync::Arc;

use axum::{extract::DefaultBodyLimit, routing::get, Router};
use tower_http::trace::TraceLayer;

use crate::api::{
    handlers::{mutate_handler, readiness_handler},
    state::ApiServerState,
};

/// Largest AdmissionReview accepted. An UPDATE review carries both the new
/// and the old object, each of them can be as big as the 1.5 MiB etcd allows.
pub(crate) const MAX_REVIEW_BODY_SIZE: usize = 8 * 1024 * 1024;

/// Every path except the readiness probe reaches the admission handler,
/// whatever the HTTP method.
pub(crate) fn router(state: Arc<ApiServerState>) -> Router {
    Router::new()
        .route("/readiness", get(readiness_handler))
        .fallback(mutate_handler)
        .with_state(state)
        .layer(DefaultBodyLimit::max(MAX_REVIEW_BODY_SIZE))
        .layer(TraceLayer::new_for_http())
}
