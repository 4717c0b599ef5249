use crate::room::RelayCommand;
use crate::signaling::{SignalRelay, SignalingOutput};
use async_trait::async_trait;
use axum::extract::ws::Message;
use dashmap::DashMap;
use std::sync::Arc;
use tandem_core::{PeerId, RoomId, ServerEvent};
use tokio::sync::{mpsc, oneshot};
use tracing::{error, warn};

struct SignalingInner {
    peers: DashMap<PeerId, mpsc::UnboundedSender<Message>>,
}

/// Connection table plus the handle to the relay loop.
#[derive(Clone)]
pub struct SignalingService {
    inner: Arc<SignalingInner>,
    pub(crate) relay_tx: mpsc::Sender<RelayCommand>,
}

impl SignalingService {
    pub fn new(relay_tx: mpsc::Sender<RelayCommand>) -> Self {
        Self {
            inner: Arc::new(SignalingInner {
                peers: DashMap::new(),
            }),
            relay_tx,
        }
    }

    /// Creates the service and spawns the relay loop that feeds it.
    ///
    /// A `buffer` of zero is raised to one.
    pub fn spawn(buffer: usize) -> Self {
        let (relay_tx, relay_rx) = mpsc::channel(buffer.max(1));
        let service = Self::new(relay_tx);

        let relay = SignalRelay::new(relay_rx, Arc::new(service.clone()));
        tokio::spawn(relay.run());

        service
    }

    pub fn add_peer(&self, peer_id: PeerId, tx: mpsc::UnboundedSender<Message>) {
        self.inner.peers.insert(peer_id, tx);
    }

    pub fn remove_peer(&self, peer_id: &PeerId) {
        self.inner.peers.remove(peer_id);
    }

    pub fn connection_count(&self) -> usize {
        self.inner.peers.len()
    }

    /// Current occupants of `room_id` as seen by the relay loop.
    pub async fn occupants(&self, room_id: RoomId) -> Vec<PeerId> {
        let (reply, rx) = oneshot::channel();
        if self
            .relay_tx
            .send(RelayCommand::Occupants { room_id, reply })
            .await
            .is_err()
        {
            return Vec::new();
        }
        rx.await.unwrap_or_default()
    }

    fn send_signal(&self, peer_id: &PeerId, event: &ServerEvent) {
        if let Some(peer) = self.inner.peers.get(peer_id) {
            match serde_json::to_string(event) {
                Ok(json) => {
                    if let Err(e) = peer.send(Message::Text(json.into())) {
                        error!("Failed to send WS message to {}: {:?}", peer_id, e);
                    }
                }
                Err(e) => error!("Failed to serialize relay event: {}", e),
            }
        } else {
            warn!("Attempted to send event to disconnected peer {}", peer_id);
        }
    }
}

#[async_trait]
impl SignalingOutput for SignalingService {
    async fn send_event(&self, peer_id: &PeerId, event: ServerEvent) {
        self.send_signal(peer_id, &event);
    }
}
