use anyhow::{Context, Result};
use clap::Parser;
use meeting_bridge::{
    create_router, AppState, ChannelEmitter, Config, JsonJoinConfigParser, SessionController,
    SimulatedBackendFactory, StaticPermissionOracle,
};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "meeting-bridge", about = "Bridge between a web meeting UI and a native session")]
struct Args {
    /// Config file path (extension optional)
    #[arg(long, default_value = "config/meeting-bridge")]
    config: String,

    /// Override the configured HTTP port
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    let cfg = Config::load(&args.config)?;

    info!("Meeting Bridge v{}", env!("CARGO_PKG_VERSION"));
    info!("Loaded config: {}", cfg.service.name);
    info!(
        "Permissions: audio={:?} video={:?} grant_on_prompt={}",
        cfg.permissions.audio, cfg.permissions.video, cfg.permissions.grant_on_prompt
    );
    info!("Audio inputs: {:?}", cfg.devices.audio_inputs);

    let events = ChannelEmitter::default();
    let controller = SessionController::new(
        Arc::new(events.clone()),
        Arc::new(JsonJoinConfigParser),
        Arc::new(SimulatedBackendFactory::new(
            &cfg.devices.audio_inputs,
            cfg.simulation.fail_start,
        )),
        Arc::new(StaticPermissionOracle::new(
            cfg.permissions.audio,
            cfg.permissions.video,
            cfg.permissions.grant_on_prompt,
        )),
    );

    let state = AppState::new(controller, events);
    let app = create_router(state.clone());

    let port = args.port.unwrap_or(cfg.service.http.port);
    let addr = format!("{}:{}", cfg.service.http.bind, port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!("HTTP server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!("Failed to listen for shutdown signal: {}", e);
            }
        })
        .await
        .context("HTTP server failed")?;

    state.controller.lock().await.shutdown();
    info!("Meeting Bridge stopped");

    Ok(())
}
