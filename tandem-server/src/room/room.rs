use tandem_core::PeerId;

/// A room never holds more than this many connections.
pub const MAX_OCCUPANTS: usize = 2;

/// Occupants of one room, in join order. The first occupant created the room.
#[derive(Debug, Clone)]
pub struct Room {
    occupants: Vec<PeerId>,
}

impl Room {
    pub(crate) fn new(creator: PeerId) -> Self {
        Self {
            occupants: vec![creator],
        }
    }

    pub fn occupants(&self) -> &[PeerId] {
        &self.occupants
    }

    pub fn contains(&self, peer_id: &PeerId) -> bool {
        self.occupants.contains(peer_id)
    }

    pub fn is_full(&self) -> bool {
        self.occupants.len() >= MAX_OCCUPANTS
    }

    pub fn is_empty(&self) -> bool {
        self.occupants.is_empty()
    }

    /// Whether `peer_id` is the occupant the room was created for.
    pub fn is_creator(&self, peer_id: &PeerId) -> bool {
        self.occupants.first() == Some(peer_id)
    }

    /// Everyone in the room except `sender`.
    pub fn others<'a>(&'a self, sender: &'a PeerId) -> impl Iterator<Item = &'a PeerId> + 'a {
        self.occupants.iter().filter(move |p| *p != sender)
    }

    pub(crate) fn add(&mut self, peer_id: PeerId) -> bool {
        if self.is_full() || self.contains(&peer_id) {
            return false;
        }
        self.occupants.push(peer_id);
        true
    }

    pub(crate) fn remove(&mut self, peer_id: &PeerId) -> bool {
        let before = self.occupants.len();
        self.occupants.retain(|p| p != peer_id);
        self.occupants.len() != before
    }
}
