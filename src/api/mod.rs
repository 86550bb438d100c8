pub mod extract;
pub mod handlers;

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use crate::auth::CredentialStore;
use crate::dataset::DatasetStore;

pub struct AppState {
    pub datasets: DatasetStore,
    pub credentials: CredentialStore,
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/get_random_records", get(handlers::get_random_records))
        .route("/get_prediction", get(handlers::get_prediction))
        .route("/post_predictions", post(handlers::post_predictions))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
