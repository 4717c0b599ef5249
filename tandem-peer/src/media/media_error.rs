use crate::media::CaptureKind;
use thiserror::Error;

/// Why a local capture could not start. The session keeps running without
/// that stream.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MediaError {
    #[error("permission to capture was denied")]
    NotAllowed,

    #[error("no capture device found")]
    NotFound,

    #[error("capture device is in use or unreadable")]
    NotReadable,

    #[error("constraints cannot be satisfied by available devices")]
    Overconstrained,

    #[error("capture was aborted")]
    Aborted,

    #[error("unknown capture failure: {0}")]
    Unknown(String),
}

impl MediaError {
    /// Short text suitable for a transient notification.
    pub fn user_message(&self, kind: CaptureKind) -> String {
        match (self, kind) {
            (MediaError::NotAllowed, CaptureKind::Camera) => {
                "Permission denied: Please allow access to camera/microphone.".to_owned()
            }
            (MediaError::NotAllowed, CaptureKind::Screen) => {
                "Permission denied: Please allow access to screen sharing.".to_owned()
            }
            (MediaError::NotFound, CaptureKind::Camera) => {
                "No camera/microphone found on this device.".to_owned()
            }
            (MediaError::NotFound, CaptureKind::Screen) => "No screen found on this device.".to_owned(),
            (MediaError::NotReadable, _) => {
                "Could not access your media devices. They may be in use by another application."
                    .to_owned()
            }
            (MediaError::Overconstrained, _) => {
                "Constraints cannot be satisfied by available devices.".to_owned()
            }
            (MediaError::Aborted, _) => "Media capture was aborted.".to_owned(),
            (MediaError::Unknown(_), _) => {
                "An unknown error occurred while trying to access media devices.".to_owned()
            }
        }
    }
}
