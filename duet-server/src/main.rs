//! duet signaling server.
//!
//! Pairs two peers per room over WebSocket and relays their WebRTC
//! negotiation (plus chat and editor deltas) between them. Media never
//! touches this process.

use anyhow::Context;
use clap::Parser;
use duet_server::router;
use std::net::SocketAddr;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "duet-server", about = "Two-peer WebRTC signaling relay")]
struct Args {
    /// Address to listen on.
    #[arg(long, env = "DUET_BIND", default_value = "0.0.0.0:3000")]
    bind: SocketAddr,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "duet_server=debug".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    let listener = tokio::net::TcpListener::bind(args.bind)
        .await
        .with_context(|| format!("failed to bind {}", args.bind))?;

    info!(bind = %args.bind, "signaling server listening");

    axum::serve(listener, router())
        .await
        .context("server error")?;

    Ok(())
}
