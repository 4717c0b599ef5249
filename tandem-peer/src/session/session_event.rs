use crate::content::RenderTarget;
use crate::media::{CaptureKind, MediaError};
use crate::transport::ConnectionState;
use tandem_core::{ContentLabel, PeerId, Role};

/// What the session reports to its user interface.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    /// The relay accepted the join. The role fixes who yields on glare.
    Joined { role: Role },

    /// The room already has two participants. The session has stopped.
    RoomFull,

    LocalStreamStarted { stream_id: String, label: ContentLabel },

    MediaFailed { kind: CaptureKind, error: MediaError },

    /// A remote stream has a known label and can be shown.
    TrackRouted { stream_id: String, target: RenderTarget },

    /// A remote stream arrived before its label. It is routed once a
    /// snapshot names it.
    TrackUnroutable { stream_id: String },

    ConnectionState(ConnectionState),

    NegotiationFailed(String),

    /// The other participant left and its pairing was torn down.
    RemoteCleared { peer_id: PeerId },

    Closed,
}
