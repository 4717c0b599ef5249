use crate::media::LocalStream;
use crate::transport::TransportEvent;
use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;
use tandem_core::{IceCandidate, SessionDescription};
use tokio::sync::mpsc;

/// Offer/answer state as reported by the transport. Read-only for callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignalingState {
    Stable,
    HaveLocalOffer,
    HaveRemoteOffer,
    HaveLocalPranswer,
    HaveRemotePranswer,
    Closed,
}

/// The media transport a negotiation engine drives.
#[async_trait]
pub trait MediaTransport: Send + Sync {
    fn signaling_state(&self) -> SignalingState;

    /// Creates the description the current state calls for (an offer when
    /// stable, an answer after a remote offer), commits it and returns it.
    async fn set_local_description(&self) -> Result<SessionDescription>;

    /// Applies a remote description. A remote offer arriving over a pending
    /// local offer rolls the local one back first.
    async fn set_remote_description(&self, description: SessionDescription) -> Result<()>;

    async fn add_ice_candidate(&self, candidate: IceCandidate) -> Result<()>;

    async fn add_stream(&self, stream: &LocalStream) -> Result<()>;

    async fn close(&self) -> Result<()>;
}

/// Builds one transport per pairing. `events` is dedicated to that transport.
#[async_trait]
pub trait TransportFactory: Send + Sync {
    async fn create(&self, events: mpsc::Sender<TransportEvent>) -> Result<Arc<dyn MediaTransport>>;
}
