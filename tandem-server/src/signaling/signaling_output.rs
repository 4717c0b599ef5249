use async_trait::async_trait;
use tandem_core::{PeerId, ServerEvent};

/// Outbound side of the relay: whatever can push a frame to one connection.
#[async_trait]
pub trait SignalingOutput: Send + Sync {
    /// Deliver `event` to `peer_id`. Unknown or closed connections are skipped.
    async fn send_event(&self, peer_id: &PeerId, event: ServerEvent);
}
