use anyhow::Context;
use analyzer::SentimentService;
use sentiment_dashboard::app;
use sentiment_dashboard::config::AppConfig;
use sentiment_dashboard::state::AppState;
use std::net::SocketAddr;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Log initialized");

    let config = AppConfig::from_env();
    tracing::info!("Search API: {}", config.search.base_url);

    // Initialize HTTP Client
    let http_client = reqwest::Client::builder()
        .user_agent("TopicSentimentDashboard/1.0")
        .build()
        .context("Failed to build HTTP client")?;

    // トークンがなければ起動しない
    let service = SentimentService::from_config(http_client, &config.search)
        .context("Set BEARER_TOKEN in your environment or .env file")?;

    let app_state = AppState::new(service);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Sentiment dashboard listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app(app_state)).await?;

    Ok(())
}
