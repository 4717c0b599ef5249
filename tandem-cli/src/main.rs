use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use tandem::RoomId;
use tandem::model::IceServerConfig;
use tandem::peer::{
    PeerSession, ReceiveOnly, RelayClient, SessionEvent, TransportConfig, WebRtcTransportFactory,
};
use tandem::server::{ServerConfig, serve};

#[derive(Parser)]
#[command(name = "tandem", version, about = "Two-party video call relay")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the signaling relay.
    Serve {
        #[arg(long, env = "TANDEM_HOST", default_value = "0.0.0.0")]
        host: String,

        #[arg(long, env = "PORT", default_value_t = 8080)]
        port: u16,

        /// Capacity of the relay command queue.
        #[arg(
            long,
            default_value_t = 256,
            value_parser = clap::builder::RangedU64ValueParser::<usize>::new().range(1..)
        )]
        relay_buffer: usize,
    },

    /// Join a room as a receive-only participant and log the session.
    Join {
        room: String,

        #[arg(long, env = "TANDEM_URL", default_value = "ws://127.0.0.1:8080/ws")]
        url: String,

        /// STUN server URL. Repeat for several.
        #[arg(long = "stun", default_value = "stun:stun.l.google.com:19302")]
        stun: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    match Cli::parse().command {
        Commands::Serve {
            host,
            port,
            relay_buffer,
        } => {
            serve(ServerConfig {
                host,
                port,
                relay_buffer,
            })
            .await
        }
        Commands::Join { room, url, stun } => join(room, &url, stun).await,
    }
}

async fn join(room: String, url: &str, stun: Vec<String>) -> Result<()> {
    let channels = RelayClient::connect(url)
        .await
        .with_context(|| format!("Failed to reach relay at {}", url))?;

    let ice_servers = if stun.is_empty() {
        Vec::new()
    } else {
        vec![IceServerConfig {
            urls: stun,
            username: None,
            credential: None,
        }]
    };
    let factory = WebRtcTransportFactory::new(TransportConfig { ice_servers });

    let (session, mut handle) = PeerSession::new(
        RoomId::from(room),
        channels,
        Arc::new(ReceiveOnly),
        Arc::new(factory),
    );
    let task = tokio::spawn(session.run());

    loop {
        tokio::select! {
            event = handle.next_event() => match event {
                Some(SessionEvent::Closed) | None => break,
                Some(SessionEvent::RoomFull) => warn!("Room is full, giving up"),
                Some(SessionEvent::MediaFailed { kind, error }) => {
                    info!("{} Continuing receive-only.", error.user_message(kind));
                }
                Some(event) => info!("{:?}", event),
            },

            _ = tokio::signal::ctrl_c() => {
                info!("Leaving room");
                if handle.leave().is_err() {
                    break;
                }
            }
        }
    }

    task.await.context("Session task panicked")?;
    Ok(())
}
