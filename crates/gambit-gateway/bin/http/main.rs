mod cli;

use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use gambit_codec::{CodecSettings, SequenceCodec};
use gambit_core::Shortener;
use gambit_gateway::{App, AppState};
use gambit_shortener::ShortenerService;
use gambit_storage::{InMemoryRepository, MySqlRepository};
use gambit_telemetry::TelemetryConfig;
use tracing::info;

use crate::cli::{StorageBackendArg, CLI};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CLI::parse();

    let telemetry = TelemetryConfig::builder()
        .service_name("gambit-gateway")
        .log_format(config.log_format.into())
        .otlp_endpoint(config.otlp_endpoint.clone());
    let _telemetry = gambit_telemetry::init(telemetry.build())?;

    let codec = SequenceCodec::new(
        CodecSettings::builder()
            .sequence_length(config.sequence_length)
            .separator(config.separator)
            .build(),
    )?;

    info!(
        listen_addr = %config.listen_addr,
        public_base_url = %config.public_base_url,
        sequence_length = config.sequence_length,
        storage_backend = %config.storage,
        "starting gateway server"
    );

    let shortener: Arc<dyn Shortener> = match config.storage {
        StorageBackendArg::InMemory => {
            Arc::new(ShortenerService::new(InMemoryRepository::new(), codec))
        }
        StorageBackendArg::Mysql => {
            let mysql_dsn = config
                .mysql_dsn
                .as_deref()
                .context("mysql dsn is required when storage backend is mysql")?;
            let repository = MySqlRepository::connect(mysql_dsn).await?;
            repository.ensure_schema().await?;
            Arc::new(ShortenerService::new(repository, codec))
        }
    };

    let app = App::router(AppState::new(shortener, config.public_base_url));

    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    info!(listen_addr = %listener.local_addr()?, "gateway listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("gateway stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %err, "failed to listen for shutdown signal");
    }
}
