use crate::model::content::ContentEntry;
use crate::model::peer::PeerId;
use crate::model::room::RoomId;
use crate::model::signaling::SignalMessage;
use serde::{Deserialize, Serialize};

/// Frames a participant sends to the relay.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "event", content = "data", rename_all = "kebab-case")]
pub enum ClientEvent {
    RoomJoin {
        room: RoomId,
    },
    Ready {
        room: RoomId,
    },
    Message {
        message: SignalMessage,
        room: RoomId,
    },
    #[serde(rename = "id2Content")]
    Id2Content {
        entries: Vec<ContentEntry>,
        room: RoomId,
    },
}

impl ClientEvent {
    /// Room the event targets.
    pub fn room(&self) -> &RoomId {
        match self {
            ClientEvent::RoomJoin { room }
            | ClientEvent::Ready { room }
            | ClientEvent::Message { room, .. }
            | ClientEvent::Id2Content { room, .. } => room,
        }
    }
}

/// Frames the relay sends to a participant.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "event", content = "data", rename_all = "kebab-case")]
pub enum ServerEvent {
    RoomCreated,
    RoomJoined,
    RoomFull,
    Ready,
    Message {
        message: SignalMessage,
    },
    #[serde(rename = "id2Content")]
    Id2Content {
        entries: Vec<ContentEntry>,
    },
    UserDisconnected {
        peer_id: PeerId,
    },
}
