use anyhow::Result;
use clap::Parser;
use screencastd::analytics::TracingAnalytics;
use screencastd::demomode::LoggingBroadcaster;
use screencastd::notify::LoggingNotifier;
use screencastd::overlay::{LoggingOverlay, StaticOverlayPermission};
use screencastd::{create_router, AppState, Config, RecordingService};
use std::sync::Arc;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "screencastd", about = "Screen-recording session service")]
struct Args {
    /// Configuration file (extension optional, as accepted by the config
    /// crate); defaults apply when the file is absent.
    #[arg(long, default_value = "config/screencastd")]
    config: String,

    /// Override the configured HTTP port.
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let args = Args::parse();
    let cfg = Config::load(&args.config)?;

    info!("screencastd v{}", env!("CARGO_PKG_VERSION"));
    info!("Loaded config: {}", cfg.service.name);
    info!("Recordings directory: {}", cfg.recording.output_dir.display());

    let service = RecordingService::new(
        cfg.recording.clone(),
        Arc::new(LoggingBroadcaster),
        Arc::new(LoggingNotifier),
        Arc::new(LoggingOverlay),
    );

    let state = AppState::new(
        Arc::clone(&service),
        Arc::new(StaticOverlayPermission::granted()),
        Arc::new(TracingAnalytics),
    );
    let router = create_router(state);

    let port = args.port.unwrap_or(cfg.service.http.port);
    let addr = format!("{}:{}", cfg.service.http.bind, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown(service))
        .await?;

    Ok(())
}

/// Wait for ctrl-c, then tear down the active session so nothing armed at
/// prepare time outlives the process.
async fn shutdown(service: Arc<RecordingService>) {
    if tokio::signal::ctrl_c().await.is_err() {
        return;
    }
    info!("Shutdown signal received");
    service.destroy().await;
}
