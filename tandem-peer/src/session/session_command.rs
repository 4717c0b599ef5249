/// What the local user asks the session to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionCommand {
    StartScreenShare,
    SetAudioEnabled(bool),
    SetVideoEnabled(bool),
    Leave,
}
