pub mod content;
pub mod error;
pub mod media;
pub mod negotiation;
pub mod session;
pub mod signaling;
pub mod transport;

pub use content::{ContentDirectory, RenderTarget};
pub use error::{NegotiationError, RelayClientError, RelayClosed, SessionClosed};
pub use media::{CaptureKind, LocalStream, MediaCapture, MediaError, MediaKind, ReceiveOnly};
pub use negotiation::{NegotiationEngine, NegotiationState, SignalOutcome};
pub use session::{PeerSession, SessionCommand, SessionEvent, SessionHandle};
pub use signaling::{RelayChannels, RelayClient, RoomLink};
pub use transport::{
    ConnectionState, MediaTransport, SignalingState, TransportConfig, TransportEvent,
    TransportFactory, WebRtcTransport, WebRtcTransportFactory,
};
