use std::sync::Arc;

use tokio::net::TcpListener;
use tracing_subscriber::{fmt, EnvFilter};

use virtual_tutor::adapters::ai::OpenAIProvider;
use virtual_tutor::adapters::inference::LlmInferenceService;
use virtual_tutor::adapters::websocket::{tutor_router, TutorState};
use virtual_tutor::application::SessionRegistry;
use virtual_tutor::config::{AppConfig, LogFormat, ServerConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    init_tracing(&config.server);
    config.validate()?;

    let script = Arc::new(config.tutor.load_script()?);
    let provider = Arc::new(OpenAIProvider::new(config.ai.to_openai_config()?)?);
    let inference = Arc::new(LlmInferenceService::new(provider));
    let registry = Arc::new(SessionRegistry::new(script, inference));

    let app = tutor_router(TutorState::new(registry));

    let addr = config.server.socket_addr()?;
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(
        address = %addr,
        model = %config.ai.model,
        environment = ?config.server.environment,
        "Virtual tutor listening"
    );

    axum::serve(listener, app).await?;
    Ok(())
}

/// `RUST_LOG` wins over the configured filter.
fn init_tracing(server: &ServerConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&server.log_level));

    let subscriber = fmt().with_env_filter(filter).with_target(true);
    match server.log_format {
        LogFormat::Json => subscriber.json().init(),
        LogFormat::Pretty => subscriber.init(),
    }
}
