use crate::media::MediaError;
use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;
use tandem_core::ContentLabel;
use webrtc::track::track_local::TrackLocal;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureKind {
    Camera,
    Screen,
}

impl CaptureKind {
    pub fn label(self) -> ContentLabel {
        match self {
            CaptureKind::Camera => ContentLabel::Webcam,
            CaptureKind::Screen => ContentLabel::Screen,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Audio,
    Video,
}

/// A captured stream: an id the peer will see on its inbound tracks, plus
/// the tracks to send.
#[derive(Clone)]
pub struct LocalStream {
    pub id: String,
    pub tracks: Vec<Arc<dyn TrackLocal + Send + Sync>>,
}

impl fmt::Debug for LocalStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocalStream")
            .field("id", &self.id)
            .field("tracks", &self.tracks.len())
            .finish()
    }
}

/// Camera and screen capture devices.
#[async_trait]
pub trait MediaCapture: Send + Sync {
    async fn capture(&self, kind: CaptureKind) -> Result<LocalStream, MediaError>;

    /// Mutes or unmutes already captured tracks of one kind.
    fn set_enabled(&self, _kind: MediaKind, _enabled: bool) {}
}

/// Capture that never has a device, for receive-only participants.
#[derive(Debug, Default, Clone, Copy)]
pub struct ReceiveOnly;

#[async_trait]
impl MediaCapture for ReceiveOnly {
    async fn capture(&self, _kind: CaptureKind) -> Result<LocalStream, MediaError> {
        Err(MediaError::NotFound)
    }
}
