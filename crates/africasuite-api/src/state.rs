use std::sync::Arc;

use africasuite_reports::ReportService;

/// Shared application state, injected into all route handlers via Axum state.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<ReportService>,
}

impl AppState {
    pub fn new(service: Arc<ReportService>) -> Self {
        Self { service }
    }
}
