use serde::{Deserialize, Serialize};

/// What a media stream shows on the sending side.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ContentLabel {
    Webcam,
    Screen,
}

/// One `(streamId, label)` pair. Serialized as a two element array.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ContentEntry(pub String, pub ContentLabel);

impl ContentEntry {
    pub fn new(stream_id: impl Into<String>, label: ContentLabel) -> Self {
        Self(stream_id.into(), label)
    }

    pub fn stream_id(&self) -> &str {
        &self.0
    }

    pub fn label(&self) -> ContentLabel {
        self.1
    }
}
