use crate::error::RelayClientError;
use futures::{SinkExt, StreamExt};
use tandem_core::{ClientEvent, ServerEvent};
use tokio::sync::mpsc;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;
use tracing::{debug, info, warn};

/// Both directions of a relay connection.
///
/// Dropping `outgoing` closes the socket. `incoming` ends when the relay
/// goes away.
pub struct RelayChannels {
    pub outgoing: mpsc::UnboundedSender<ClientEvent>,
    pub incoming: mpsc::UnboundedReceiver<ServerEvent>,
}

impl RelayChannels {
    /// Channels not backed by a socket. The caller holds the other ends.
    pub fn pair() -> (
        Self,
        mpsc::UnboundedReceiver<ClientEvent>,
        mpsc::UnboundedSender<ServerEvent>,
    ) {
        let (outgoing, outgoing_rx) = mpsc::unbounded_channel();
        let (incoming_tx, incoming) = mpsc::unbounded_channel();
        (Self { outgoing, incoming }, outgoing_rx, incoming_tx)
    }
}

pub struct RelayClient;

impl RelayClient {
    /// Opens a WebSocket to the relay at `url` (e.g. `ws://host:8080/ws`).
    pub async fn connect(url: &str) -> Result<RelayChannels, RelayClientError> {
        let (ws_stream, _) = connect_async(url).await?;
        info!("[RelayClient] Connected to {}", url);

        let (mut write, mut read) = ws_stream.split();
        let (channels, mut outgoing_rx, incoming_tx) = RelayChannels::pair();

        tokio::spawn(async move {
            while let Some(event) = outgoing_rx.recv().await {
                let json = match serde_json::to_string(&event) {
                    Ok(json) => json,
                    Err(e) => {
                        warn!("[RelayClient] Failed to encode {:?}: {}", event, e);
                        continue;
                    }
                };
                if write.send(Message::Text(json.into())).await.is_err() {
                    break;
                }
            }
            let _ = write.close().await;
            debug!("[RelayClient] Writer stopped");
        });

        tokio::spawn(async move {
            while let Some(Ok(msg)) = read.next().await {
                match msg {
                    Message::Text(text) => match serde_json::from_str::<ServerEvent>(&text) {
                        Ok(event) => {
                            if incoming_tx.send(event).is_err() {
                                break;
                            }
                        }
                        Err(e) => warn!("[RelayClient] Invalid frame: {}", e),
                    },
                    Message::Close(_) => break,
                    _ => {}
                }
            }
            debug!("[RelayClient] Reader stopped");
        });

        Ok(channels)
    }
}
