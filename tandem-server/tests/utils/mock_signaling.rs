use async_trait::async_trait;
use std::sync::Arc;
use tandem_core::{PeerId, ServerEvent};
use tandem_server::SignalingOutput;
use tokio::sync::{Mutex, mpsc};

/// One frame the relay tried to deliver.
#[derive(Debug, Clone, PartialEq)]
pub struct CapturedEvent {
    pub peer_id: PeerId,
    pub event: ServerEvent,
}

/// Mock SignalingOutput that captures all outgoing events.
#[derive(Clone)]
pub struct MockSignalingOutput {
    /// Channel to send captured events.
    tx: mpsc::UnboundedSender<CapturedEvent>,
    /// All captured events (for verification).
    events: Arc<Mutex<Vec<CapturedEvent>>>,
}

impl MockSignalingOutput {
    /// Create a new MockSignalingOutput and its receiver channel.
    pub fn new() -> (Self, mpsc::UnboundedReceiver<CapturedEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let signaling = Self {
            tx,
            events: Arc::new(Mutex::new(Vec::new())),
        };
        (signaling, rx)
    }

    /// Every event delivered to `peer_id`, oldest first.
    pub async fn events_for(&self, peer_id: &PeerId) -> Vec<ServerEvent> {
        self.events
            .lock()
            .await
            .iter()
            .filter(|c| &c.peer_id == peer_id)
            .map(|c| c.event.clone())
            .collect()
    }
}

#[async_trait]
impl SignalingOutput for MockSignalingOutput {
    async fn send_event(&self, peer_id: &PeerId, event: ServerEvent) {
        tracing::debug!("[MockSignaling] {:?} to {}", event, peer_id);

        let captured = CapturedEvent {
            peer_id: peer_id.clone(),
            event,
        };

        self.events.lock().await.push(captured.clone());
        let _ = self.tx.send(captured);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_signaling_captures_event() {
        let (signaling, mut rx) = MockSignalingOutput::new();
        let peer_id = PeerId::new();

        signaling.send_event(&peer_id, ServerEvent::Ready).await;

        let captured = rx.recv().await.unwrap();
        assert_eq!(captured.event, ServerEvent::Ready);
        assert_eq!(signaling.events_for(&peer_id).await, vec![ServerEvent::Ready]);
    }
}
