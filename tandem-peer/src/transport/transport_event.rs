use tandem_core::IceCandidate;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    New,
    Connecting,
    Connected,
    Disconnected,
    Failed,
    Closed,
}

/// Events a transport raises for the session that owns it.
#[derive(Debug, Clone, PartialEq)]
pub enum TransportEvent {
    /// Local media changed and a new offer is due.
    NegotiationNeeded,

    /// A local ICE candidate to trickle to the peer.
    CandidateGenerated(IceCandidate),

    /// A remote track arrived, tagged with the sender's stream id.
    TrackReceived { stream_id: String, track_id: String },

    ConnectionStateChanged(ConnectionState),
}
