//! africasuite-api
//!
//! HTTP surface of the report pipeline. The binary in `main.rs` wires
//! configuration and logging; [`app`] builds the router so tests can drive it
//! without a socket.

pub mod error;
pub mod middleware;
pub mod routes;
pub mod state;

use axum::middleware as axum_mw;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};

pub use state::AppState;

pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(routes::health::health_check))
        .route("/templates", get(routes::templates::list_templates))
        .route("/templates/{id}", get(routes::templates::get_template))
        .route("/reports/generate", post(routes::reports::generate_report))
        .route("/reports/batch", post(routes::reports::generate_batch))
        .route("/jobs", post(routes::jobs::enqueue_job))
        .route("/jobs", get(routes::jobs::list_jobs))
        .route("/jobs/{id}", get(routes::jobs::get_job))
        .route("/jobs/{id}/result", get(routes::jobs::get_job_result))
        .layer(axum_mw::from_fn(middleware::audit::audit_log))
        .layer(cors)
        .with_state(state)
}
