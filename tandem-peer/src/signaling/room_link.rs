use crate::error::RelayClosed;
use tandem_core::{ClientEvent, ContentEntry, RoomId, SignalMessage};
use tokio::sync::mpsc;

/// Sends relay frames scoped to one room.
#[derive(Debug, Clone)]
pub struct RoomLink {
    room: RoomId,
    tx: mpsc::UnboundedSender<ClientEvent>,
}

impl RoomLink {
    pub fn new(room: RoomId, tx: mpsc::UnboundedSender<ClientEvent>) -> Self {
        Self { room, tx }
    }

    pub fn room(&self) -> &RoomId {
        &self.room
    }

    pub fn join(&self) -> Result<(), RelayClosed> {
        self.send(ClientEvent::RoomJoin {
            room: self.room.clone(),
        })
    }

    pub fn ready(&self) -> Result<(), RelayClosed> {
        self.send(ClientEvent::Ready {
            room: self.room.clone(),
        })
    }

    pub fn send_message(&self, message: SignalMessage) -> Result<(), RelayClosed> {
        self.send(ClientEvent::Message {
            message,
            room: self.room.clone(),
        })
    }

    pub fn send_content(&self, entries: Vec<ContentEntry>) -> Result<(), RelayClosed> {
        self.send(ClientEvent::Id2Content {
            entries,
            room: self.room.clone(),
        })
    }

    fn send(&self, event: ClientEvent) -> Result<(), RelayClosed> {
        self.tx.send(event).map_err(|_| RelayClosed)
    }
}
