use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use africasuite_api::{app, AppState};
use africasuite_reports::config::ReportsConfig;
use africasuite_reports::synth::MockDataSource;
use africasuite_reports::ReportService;
use africasuite_templates::TemplateRegistry;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if env::var_os("AFRICASUITE_LOG_JSON").is_some() {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }

    let config = match env::var_os("AFRICASUITE_CONFIG") {
        Some(path) => ReportsConfig::load(&PathBuf::from(path))?,
        None => ReportsConfig::default(),
    };

    let mut registry = TemplateRegistry::builtin();
    if let Some(dir) = env::var_os("AFRICASUITE_TEMPLATES_DIR") {
        let loaded = registry.load_json_dir(&PathBuf::from(dir))?;
        tracing::info!(loaded, "custom templates loaded");
    }
    tracing::info!(templates = registry.len(), "template registry ready");

    let service = Arc::new(ReportService::new(
        Arc::new(registry),
        MockDataSource::new(),
        config,
    ));
    service.start();

    let bind: SocketAddr = env::var("AFRICASUITE_BIND")
        .unwrap_or_else(|_| "127.0.0.1:8080".to_string())
        .parse()?;
    let listener = tokio::net::TcpListener::bind(bind).await?;
    tracing::info!(%bind, "http server listening");

    axum::serve(listener, app(AppState::new(Arc::clone(&service))))
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "failed to listen for shutdown signal");
            }
        })
        .await?;

    service.shutdown().await;
    Ok(())
}
