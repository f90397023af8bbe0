use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tsa_checker::config::{Config, StorageBackend};
use tsa_checker::services::{
    ClassificationService, ClassificationStore, LLMClient, SqliteStore, SupabaseStore,
};
use tsa_checker::{AppState, db, router};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration first
    let config = Config::load()?;

    // Initialize logging
    let log_filter = tracing_subscriber::EnvFilter::new(&config.logging.level);

    let registry = tracing_subscriber::registry().with(log_filter);

    // Held until shutdown so buffered file lines get flushed
    let mut _log_guard = None;

    if let Some(log_file) = &config.logging.file {
        let log_path = std::path::Path::new(log_file);
        if let Some(parent) = log_path.parent() {
            let _ = std::fs::create_dir_all(parent);
        }

        let log_dir = log_path.parent().and_then(|p| p.to_str()).unwrap_or("logs");
        let file_name = log_path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("tsa_checker.log");
        // Rolling appender adds its own date suffix
        let file_prefix = file_name.strip_suffix(".log").unwrap_or(file_name);

        let file_appender = tracing_appender::rolling::daily(log_dir, file_prefix);
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
        _log_guard = Some(guard);
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(non_blocking))
            .with(tracing_subscriber::fmt::layer())
            .init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
    tracing::info!("TSA Item Checker starting up");
    tracing::info!("Configuration loaded successfully");

    let completion = Arc::new(LLMClient::new(&config.inference));
    tracing::info!(
        "Inference client initialized (base: {}, model: {})",
        config.inference.api_base,
        config.inference.model
    );

    let store: Arc<dyn ClassificationStore> = match config.storage.backend {
        StorageBackend::Supabase => Arc::new(SupabaseStore::new(
            &config.storage.supabase_url,
            &config.storage.supabase_anon_key,
            &config.storage.table,
            config.storage.timeout_secs,
        )),
        StorageBackend::Sqlite => {
            let pool = db::create_pool(&config.storage.sqlite_url).await?;
            tracing::info!("SQLite pool created at {}", config.storage.sqlite_url);
            Arc::new(SqliteStore::new(pool))
        },
    };
    tracing::info!("History store initialized ({})", store.name());

    let app_state = AppState {
        classification_service: Arc::new(ClassificationService::new(completion, store)),
    };

    let app = router::create_router(Arc::new(app_state));

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Server listening on http://{}", addr);
    tracing::info!("API documentation available at http://{}/docs", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
