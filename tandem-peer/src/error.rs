use tandem_core::SdpType;
use thiserror::Error;

/// The WebSocket to the relay is gone; nothing more can be sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("relay connection closed")]
pub struct RelayClosed;

/// The session task has stopped and accepts no more commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("session closed")]
pub struct SessionClosed;

/// Failures of one negotiation step. Contained to the pairing they occur in.
#[derive(Debug, Error)]
pub enum NegotiationError {
    #[error("failed to create local description: {0:#}")]
    LocalDescription(anyhow::Error),

    #[error("failed to apply remote {sdp_type:?}: {reason:#}")]
    RemoteDescription {
        sdp_type: SdpType,
        reason: anyhow::Error,
    },

    #[error("failed to add ICE candidate: {0:#}")]
    CandidateApply(anyhow::Error),

    #[error(transparent)]
    Relay(#[from] RelayClosed),
}

#[derive(Debug, Error)]
pub enum RelayClientError {
    #[error("WebSocket error: {0}")]
    WebSocket(#[from] tokio_tungstenite::tungstenite::Error),
}
