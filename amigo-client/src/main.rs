use amigo_api::AppConfig;
use amigo_client::AppState;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "amigo_client=info,amigo_chat=info,amigo_api=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::load().expect("Failed to load config");
    tracing::info!("Starting amiGO client against {}", config.api.base_url);

    let state = AppState::new(config)?;
    amigo_client::repl::run(state).await
}
