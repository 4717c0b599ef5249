use tandem_core::{ClientEvent, PeerId, RoomId};
use tokio::sync::oneshot;

/// Commands handed from WebSocket tasks to the relay loop.
#[derive(Debug)]
pub enum RelayCommand {
    /// A decoded frame from a connection.
    Event { peer_id: PeerId, event: ClientEvent },

    /// The connection's socket closed.
    Disconnect { peer_id: PeerId },

    /// Snapshot of a room's occupants, in join order.
    Occupants {
        room_id: RoomId,
        reply: oneshot::Sender<Vec<PeerId>>,
    },
}
