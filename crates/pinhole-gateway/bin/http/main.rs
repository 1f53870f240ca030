mod cli;

use crate::cli::{Cli, GeneratorArg, LogFormat, StorageBackendArg};
use anyhow::Context;
use clap::Parser;
use pinhole_core::{Repository, Shortener};
use pinhole_gateway::{App, AppState};
use pinhole_generator::{ClockGenerator, ClockSettings, RandomGenerator, RandomSettings};
use pinhole_shortener::ShortenerService;
use pinhole_storage::{InMemoryRepository, RedisRepository, RedisSettings};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str =
    "pinhole=info,pinhole_gateway=info,pinhole_shortener=info,pinhole_storage=info,tower_http=info";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Cli::parse();
    init_tracing(config.log_format);

    info!(
        listen_addr = %config.listen_addr,
        base_url = %config.base_url,
        storage_backend = %config.storage,
        generator = %config.generator,
        max_attempts = config.max_attempts,
        "starting pinhole gateway"
    );

    let shortener = build_shortener(&config).await?;
    let state = AppState::new(shortener, config.base_url.clone());

    let listener = tokio::net::TcpListener::bind(config.listen_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.listen_addr))?;
    info!(listen_addr = %listener.local_addr()?, "listening");

    axum::serve(listener, App::router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("gateway stopped");
    Ok(())
}

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Text => registry.with(tracing_subscriber::fmt::layer()).init(),
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json())
            .init(),
    }
}

async fn build_shortener(config: &Cli) -> anyhow::Result<Arc<dyn Shortener>> {
    match config.storage {
        StorageBackendArg::InMemory => with_generator(config, InMemoryRepository::new()),
        StorageBackendArg::Redis => {
            let redis_url = config
                .redis_url
                .clone()
                .context("redis url is required when storage backend is redis")?;
            let settings = RedisSettings::builder()
                .url(redis_url)
                .key_prefix(config.redis_key_prefix.clone())
                .timeout(Duration::from_millis(config.redis_timeout_ms))
                .build();
            let repository = RedisRepository::connect(settings)
                .await
                .context("failed to open redis storage")?;
            with_generator(config, repository)
        }
    }
}

fn with_generator<R: Repository>(
    config: &Cli,
    repository: R,
) -> anyhow::Result<Arc<dyn Shortener>> {
    let shortener: Arc<dyn Shortener> = match config.generator {
        GeneratorArg::Random => {
            let settings = RandomSettings::builder()
                .length(config.code_length)
                .build();
            let generator = RandomGenerator::new(settings).context("invalid code length")?;
            info!(
                entropy_bits = generator.entropy_bits(),
                "using random short codes"
            );
            Arc::new(
                ShortenerService::new(repository, generator)
                    .with_max_attempts(config.max_attempts),
            )
        }
        GeneratorArg::Clock => {
            let settings = ClockSettings::builder()
                .prefix(config.clock_prefix.clone())
                .build();
            let generator = ClockGenerator::new(settings).context("invalid clock prefix")?;
            info!(prefix = %config.clock_prefix, "using clock-derived short codes");
            Arc::new(
                ShortenerService::new(repository, generator)
                    .with_max_attempts(config.max_attempts),
            )
        }
    };

    Ok(shortener)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("shutdown signal received");
}
