use crate::room::{RelayCommand, RoomRegistry};
use crate::signaling::SignalingOutput;
use std::sync::Arc;
use tandem_core::{ClientEvent, JoinOutcome, PeerId, RoomId, ServerEvent};
use tokio::sync::mpsc;
use tracing::{debug, info};

/// Pairs connections into rooms and forwards their signaling frames.
///
/// One instance runs as a single task; every command is applied to the
/// registry before the next is read, so concurrent joins to the same room
/// are resolved in arrival order.
pub struct SignalRelay {
    registry: RoomRegistry,
    command_rx: mpsc::Receiver<RelayCommand>,
    signaling: Arc<dyn SignalingOutput>,
}

impl SignalRelay {
    pub fn new(command_rx: mpsc::Receiver<RelayCommand>, signaling: Arc<dyn SignalingOutput>) -> Self {
        Self {
            registry: RoomRegistry::new(),
            command_rx,
            signaling,
        }
    }

    pub async fn run(mut self) {
        info!("Relay event loop started");

        while let Some(cmd) = self.command_rx.recv().await {
            self.handle_command(cmd).await;
        }

        info!("Command channel closed. Relay event loop finished");
    }

    async fn handle_command(&mut self, cmd: RelayCommand) {
        match cmd {
            RelayCommand::Event { peer_id, event } => self.handle_event(peer_id, event).await,

            RelayCommand::Disconnect { peer_id } => self.disconnect(&peer_id).await,

            RelayCommand::Occupants { room_id, reply } => {
                let _ = reply.send(self.registry.occupants(&room_id));
            }
        }
    }

    async fn handle_event(&mut self, peer_id: PeerId, event: ClientEvent) {
        match event {
            ClientEvent::RoomJoin { room } => {
                let outcome = self.registry.join(&room, &peer_id);
                info!(
                    "Peer {} join '{}': {:?}, role {:?}",
                    peer_id,
                    room,
                    outcome,
                    outcome.role()
                );

                let reply = match outcome {
                    JoinOutcome::Created => ServerEvent::RoomCreated,
                    JoinOutcome::Joined => ServerEvent::RoomJoined,
                    JoinOutcome::Full => ServerEvent::RoomFull,
                };
                self.signaling.send_event(&peer_id, reply).await;
            }

            ClientEvent::Ready { room } => {
                self.relay(&room, &peer_id, ServerEvent::Ready).await;
            }

            ClientEvent::Message { message, room } => {
                self.relay(&room, &peer_id, ServerEvent::Message { message })
                    .await;
            }

            ClientEvent::Id2Content { entries, room } => {
                debug!("Peer {} content snapshot: {:?}", peer_id, entries);
                self.relay(&room, &peer_id, ServerEvent::Id2Content { entries })
                    .await;
            }
        }
    }

    /// Sends `event` to every occupant of `room_id` except `sender`.
    ///
    /// A missing room or a sender alone in it is not an error: the other side
    /// has usually just left.
    async fn relay(&self, room_id: &RoomId, sender: &PeerId, event: ServerEvent) {
        let recipients = self.registry.recipients(room_id, sender);
        if recipients.is_empty() {
            debug!("Nothing to relay in room '{}' from {}", room_id, sender);
            return;
        }

        for peer_id in recipients {
            self.signaling.send_event(&peer_id, event.clone()).await;
        }
    }

    async fn disconnect(&mut self, peer_id: &PeerId) {
        let departures = self.registry.leave(peer_id);
        if departures.is_empty() {
            return;
        }

        info!("Peer {} left {} room(s)", peer_id, departures.len());
        for departure in departures {
            for remaining in departure.remaining {
                self.signaling
                    .send_event(
                        &remaining,
                        ServerEvent::UserDisconnected {
                            peer_id: peer_id.clone(),
                        },
                    )
                    .await;
            }
        }
    }
}
