use axum::extract::State;
use axum::Json;
use serde::Serialize;

use africasuite_reports::cache::CacheStats;

use crate::state::AppState;

#[derive(Serialize)]
pub struct Health {
    status: &'static str,
    templates: usize,
    cache: CacheStats,
}

pub async fn health_check(State(state): State<AppState>) -> Json<Health> {
    Json(Health {
        status: "ok",
        templates: state.service.list_templates().len(),
        cache: state.service.cache_stats().await,
    })
}
