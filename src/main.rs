//! Chat support server binary.
//!
//! Loads configuration from the environment, connects to PostgreSQL and the
//! completion provider, then serves the chat API until shutdown.

use std::process::ExitCode;
use std::sync::Arc;

use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use chat_support::adapters::ai::{OpenAIConfig, OpenAIProvider};
use chat_support::adapters::http::{chat_router, ChatAppState};
use chat_support::adapters::postgres::{connect_pool, PostgresConversationStore};
use chat_support::config::{AiConfig, AppConfig};

const FALLBACK_LOG_FILTER: &str = "info";

#[tokio::main]
async fn main() -> ExitCode {
    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(e) => {
            init_tracing(FALLBACK_LOG_FILTER, false);
            tracing::error!(error = %e, "failed to load configuration");
            return ExitCode::FAILURE;
        }
    };

    init_tracing(&config.server.log_level, config.is_production());

    if let Err(e) = config.validate() {
        tracing::error!(error = %e, "invalid configuration");
        return ExitCode::FAILURE;
    }

    match run(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "server stopped");
            ExitCode::FAILURE
        }
    }
}

async fn run(config: AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    let addr = config.server.socket_addr()?;

    let pool = connect_pool(&config.database).await?;

    let provider = OpenAIProvider::new(provider_config(&config.ai))?;
    tracing::info!(
        provider = %config.ai.provider_name,
        model = %config.ai.model,
        "completion provider ready"
    );

    let state = ChatAppState::new(
        Arc::new(PostgresConversationStore::new(pool)),
        Arc::new(provider),
        Arc::new(config.assistant.store_knowledge()),
    );
    let app = chat_router(state, &config.server.cors_origins_list());

    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

fn provider_config(ai: &AiConfig) -> OpenAIConfig {
    OpenAIConfig::new(ai.api_key.clone().unwrap_or_default())
        .with_provider_name(&ai.provider_name)
        .with_base_url(&ai.base_url)
        .with_model(&ai.model)
        .with_timeout(ai.timeout())
}

fn init_tracing(default_filter: &str, json: bool) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    let registry = tracing_subscriber::registry().with(filter);

    if json {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}
