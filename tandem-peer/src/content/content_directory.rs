use crate::error::RelayClosed;
use crate::signaling::RoomLink;
use tandem_core::{ContentEntry, ContentLabel};

/// Where an inbound stream should be shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderTarget {
    Webcam,
    Screen,
    /// No label known yet for the stream.
    Unknown,
}

impl From<ContentLabel> for RenderTarget {
    fn from(label: ContentLabel) -> Self {
        match label {
            ContentLabel::Webcam => RenderTarget::Webcam,
            ContentLabel::Screen => RenderTarget::Screen,
        }
    }
}

/// Stream id to content label mapping, shared between both peers as full
/// snapshots. Entries keep insertion order and are never removed.
#[derive(Debug, Clone, Default)]
pub struct ContentDirectory {
    entries: Vec<ContentEntry>,
}

impl ContentDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the label of a locally captured stream.
    pub fn set_local(&mut self, stream_id: impl Into<String>, label: ContentLabel) {
        self.upsert(ContentEntry::new(stream_id, label));
    }

    /// Applies a peer snapshot. Later labels win; absent ids are kept.
    pub fn merge_remote(&mut self, entries: Vec<ContentEntry>) {
        for entry in entries {
            self.upsert(entry);
        }
    }

    pub fn snapshot(&self) -> Vec<ContentEntry> {
        self.entries.clone()
    }

    pub fn broadcast_snapshot(&self, link: &RoomLink) -> Result<(), RelayClosed> {
        link.send_content(self.snapshot())
    }

    pub fn resolve_render_target(&self, stream_id: &str) -> RenderTarget {
        self.entries
            .iter()
            .find(|e| e.stream_id() == stream_id)
            .map(|e| RenderTarget::from(e.label()))
            .unwrap_or(RenderTarget::Unknown)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn upsert(&mut self, entry: ContentEntry) {
        match self
            .entries
            .iter_mut()
            .find(|e| e.stream_id() == entry.stream_id())
        {
            Some(existing) => existing.1 = entry.1,
            None => self.entries.push(entry),
        }
    }
}
