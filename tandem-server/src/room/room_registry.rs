use crate::room::Room;
use std::collections::{HashMap, HashSet};
use tandem_core::{JoinOutcome, PeerId, RoomId};
use tracing::{debug, info};

/// A room the departing connection left behind, with whoever is still in it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Departure {
    pub room_id: RoomId,
    pub remaining: Vec<PeerId>,
}

/// Room id → occupants, plus the reverse connection → rooms index used on
/// disconnect.
///
/// Not synchronized: the relay task owns the only instance and applies one
/// command at a time, which makes `join` atomic per room.
#[derive(Debug, Default)]
pub struct RoomRegistry {
    rooms: HashMap<RoomId, Room>,
    memberships: HashMap<PeerId, HashSet<RoomId>>,
}

impl RoomRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn join(&mut self, room_id: &RoomId, peer_id: &PeerId) -> JoinOutcome {
        let outcome = match self.rooms.get_mut(room_id) {
            None => {
                info!("Creating new room: {}", room_id);
                self.rooms
                    .insert(room_id.clone(), Room::new(peer_id.clone()));
                JoinOutcome::Created
            }
            // Repeated join from an occupant keeps the role it already has.
            Some(room) if room.contains(peer_id) => {
                debug!("Peer {} already in room {}", peer_id, room_id);
                if room.is_creator(peer_id) {
                    JoinOutcome::Created
                } else {
                    JoinOutcome::Joined
                }
            }
            Some(room) if room.is_full() => return JoinOutcome::Full,
            Some(room) => {
                room.add(peer_id.clone());
                JoinOutcome::Joined
            }
        };

        self.memberships
            .entry(peer_id.clone())
            .or_default()
            .insert(room_id.clone());

        outcome
    }

    /// Removes `peer_id` from every room it joined. Empty rooms are dropped.
    pub fn leave(&mut self, peer_id: &PeerId) -> Vec<Departure> {
        let Some(rooms) = self.memberships.remove(peer_id) else {
            return Vec::new();
        };

        let mut departures = Vec::with_capacity(rooms.len());
        for room_id in rooms {
            let Some(room) = self.rooms.get_mut(&room_id) else {
                continue;
            };
            room.remove(peer_id);

            if room.is_empty() {
                info!("Room {} is empty, removing", room_id);
                self.rooms.remove(&room_id);
                departures.push(Departure {
                    room_id,
                    remaining: Vec::new(),
                });
            } else {
                departures.push(Departure {
                    remaining: room.occupants().to_vec(),
                    room_id,
                });
            }
        }

        departures
    }

    /// Occupants of `room_id` other than `sender`. Empty for unknown rooms.
    pub fn recipients(&self, room_id: &RoomId, sender: &PeerId) -> Vec<PeerId> {
        self.rooms
            .get(room_id)
            .map(|room| room.others(sender).cloned().collect())
            .unwrap_or_default()
    }

    pub fn occupants(&self, room_id: &RoomId) -> Vec<PeerId> {
        self.rooms
            .get(room_id)
            .map(|room| room.occupants().to_vec())
            .unwrap_or_default()
    }

    pub fn rooms_of(&self, peer_id: &PeerId) -> Vec<RoomId> {
        self.memberships
            .get(peer_id)
            .map(|rooms| rooms.iter().cloned().collect())
            .unwrap_or_default()
    }

    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }
}
