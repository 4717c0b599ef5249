mod content;
mod event;
mod peer;
mod room;
mod signaling;

pub use content::{ContentEntry, ContentLabel};
pub use event::{ClientEvent, ServerEvent};
pub use peer::{PeerId, Role};
pub use room::{JoinOutcome, RoomId};
pub use signaling::{IceCandidate, IceServerConfig, SdpType, SessionDescription, SignalMessage};
