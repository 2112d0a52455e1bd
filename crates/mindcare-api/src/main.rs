use tracing_subscriber::EnvFilter;

use mindcare_api::config::ApiConfig;
use mindcare_api::state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Structured JSON logging for CloudWatch
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .init();

    let config = ApiConfig::from_env()?;
    tracing::info!(
        bucket = %config.bucket,
        store = ?config.store,
        escalation_delay_ms = config.escalation_delay.as_millis() as u64,
        "starting mindcare api"
    );

    let state = AppState::from_config(&config).await?;
    let app = mindcare_api::app(state);

    lambda_http::run(app).await.map_err(|e| eyre::eyre!(e))
}
