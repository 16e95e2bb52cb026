use anyhow::{Context, Result};
use clap::Parser;
use speech_translator::{
    create_router, AppState, Config, ScriptedSourceFactory, SessionController, SourceFactory,
};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

#[derive(Debug, Parser)]
#[command(name = "speech-translator", about = "Real-time speech translation API")]
struct Args {
    /// Path to a config file (extension decides the format)
    #[arg(long)]
    config: Option<String>,

    /// Override the configured bind address
    #[arg(long)]
    bind: Option<String>,

    /// Override the configured port
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let args = Args::parse();
    let mut cfg = Config::load(args.config.as_deref())?;
    if let Some(bind) = args.bind {
        cfg.service.http.bind = bind;
    }
    if let Some(port) = args.port {
        cfg.service.http.port = port;
    }

    info!("{} starting", cfg.service.name);
    info!(
        "translation provider: {} (region {}, endpoint {})",
        cfg.speech.provider, cfg.speech.region, cfg.speech.endpoint
    );

    let factory = source_factory(&cfg)?;
    let controller = Arc::new(SessionController::new(
        factory,
        Duration::from_secs(cfg.session.stop_grace_secs),
    ));
    let router = create_router(AppState::new(controller), &cfg.cors.allowed_origins)?;

    let addr = format!("{}:{}", cfg.service.http.bind, cfg.service.http.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!("listening on {addr}");

    axum::serve(listener, router).await?;

    Ok(())
}

fn source_factory(cfg: &Config) -> Result<Arc<dyn SourceFactory>> {
    match cfg.speech.provider.as_str() {
        "scripted" => Ok(Arc::new(ScriptedSourceFactory)),
        other => anyhow::bail!("unsupported translation provider: {other}"),
    }
}
