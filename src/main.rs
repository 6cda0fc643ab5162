/// API сервер для ML моделей

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use labor_ml::{
    api::{self, AppState},
    config::AppConfig,
    Dataset, PredictionService,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load()?;

    // Инициализация логирования
    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&config.log_level)
            .with_context(|| format!("invalid log level '{}'", config.log_level))?,
    };
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let dataset = match &config.dataset_path {
        Some(path) => Dataset::from_csv_path(path)?,
        None => {
            tracing::info!("LABOR_DATASET not set, using sample data");
            Dataset::sample()
        }
    };

    let state = AppState::new(dataset, PredictionService::new(config.max_iterations));
    let app = api::router(state);

    let addr = config.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    tracing::info!("Server listening on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
