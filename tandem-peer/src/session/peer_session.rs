use crate::content::{ContentDirectory, RenderTarget};
use crate::error::{NegotiationError, RelayClosed, SessionClosed};
use crate::media::{CaptureKind, LocalStream, MediaCapture, MediaKind};
use crate::negotiation::NegotiationEngine;
use crate::session::{SessionCommand, SessionEvent};
use crate::signaling::{RelayChannels, RoomLink};
use crate::transport::{TransportEvent, TransportFactory};
use std::ops::ControlFlow;
use std::sync::Arc;
use tandem_core::{ContentEntry, PeerId, RoomId, Role, ServerEvent, SignalMessage};
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

const TRANSPORT_EVENT_BUFFER: usize = 64;

/// One live pairing with the other participant. Its event channel is
/// dropped with it, so a closed transport cannot reach the next pairing.
struct Pairing {
    engine: NegotiationEngine,
    events: mpsc::Receiver<TransportEvent>,
}

/// A participant in one room: joins through the relay, captures local media,
/// negotiates with the other occupant and routes the streams it receives.
pub struct PeerSession {
    link: RoomLink,
    relay_rx: mpsc::UnboundedReceiver<ServerEvent>,
    command_rx: mpsc::UnboundedReceiver<SessionCommand>,
    event_tx: mpsc::UnboundedSender<SessionEvent>,
    capture: Arc<dyn MediaCapture>,
    factory: Arc<dyn TransportFactory>,
    role: Option<Role>,
    content: ContentDirectory,
    local_streams: Vec<LocalStream>,
    pairing: Option<Pairing>,
    /// Remote streams waiting for a label.
    unroutable: Vec<String>,
}

impl PeerSession {
    pub fn new(
        room: RoomId,
        relay: RelayChannels,
        capture: Arc<dyn MediaCapture>,
        factory: Arc<dyn TransportFactory>,
    ) -> (Self, SessionHandle) {
        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let (event_tx, event_rx) = mpsc::unbounded_channel();

        let session = Self {
            link: RoomLink::new(room, relay.outgoing),
            relay_rx: relay.incoming,
            command_rx,
            event_tx,
            capture,
            factory,
            role: None,
            content: ContentDirectory::new(),
            local_streams: Vec::new(),
            pairing: None,
            unroutable: Vec::new(),
        };
        let handle = SessionHandle {
            commands: command_tx,
            events: event_rx,
        };
        (session, handle)
    }

    /// Joins the room and processes relay, transport and user input until
    /// the room is full, the user leaves or the relay goes away.
    pub async fn run(mut self) {
        info!("[Session] Joining room {}", self.link.room());

        if self.link.join().is_ok() {
            loop {
                let flow = tokio::select! {
                    event = self.relay_rx.recv() => match event {
                        Some(e) => self.handle_relay_event(e).await,
                        None => {
                            warn!("[Session] Relay connection closed");
                            ControlFlow::Break(())
                        }
                    },

                    cmd = self.command_rx.recv() => match cmd {
                        Some(c) => self.handle_command(c).await,
                        None => {
                            debug!("[Session] Handle dropped, leaving");
                            ControlFlow::Break(())
                        }
                    },

                    Some(evt) = next_transport_event(&mut self.pairing) => {
                        self.handle_transport_event(evt).await;
                        ControlFlow::Continue(())
                    }
                };

                if flow.is_break() {
                    break;
                }
            }
        } else {
            warn!("[Session] Relay closed before join");
        }

        self.teardown_pairing().await;
        self.emit(SessionEvent::Closed);
        info!("[Session] Finished");
    }

    async fn handle_relay_event(&mut self, event: ServerEvent) -> ControlFlow<()> {
        match event {
            ServerEvent::RoomCreated => {
                info!("[Session] Created room {}", self.link.room());
                self.set_role(Role::Impolite);
                self.acquire(CaptureKind::Camera).await;
            }

            ServerEvent::RoomJoined => {
                info!("[Session] Joined room {}", self.link.room());
                self.set_role(Role::Polite);
                self.start_pairing().await;
                self.acquire(CaptureKind::Camera).await;
                self.send_or_warn(self.link.ready());
                self.send_or_warn(self.content.broadcast_snapshot(&self.link));
            }

            ServerEvent::RoomFull => {
                warn!("[Session] Room {} is full", self.link.room());
                self.emit(SessionEvent::RoomFull);
                return ControlFlow::Break(());
            }

            ServerEvent::Ready => {
                if self.pairing.is_some() {
                    debug!("[Session] Already paired, ignoring ready");
                } else {
                    self.start_pairing().await;
                    self.send_or_warn(self.content.broadcast_snapshot(&self.link));
                }
            }

            ServerEvent::Message { message } => self.handle_signal(message).await,

            ServerEvent::Id2Content { entries } => self.merge_content(entries),

            ServerEvent::UserDisconnected { peer_id } => self.handle_peer_left(peer_id).await,
        }

        ControlFlow::Continue(())
    }

    async fn handle_command(&mut self, command: SessionCommand) -> ControlFlow<()> {
        match command {
            SessionCommand::StartScreenShare => {
                if self.acquire(CaptureKind::Screen).await {
                    self.send_or_warn(self.content.broadcast_snapshot(&self.link));
                }
            }
            SessionCommand::SetAudioEnabled(enabled) => {
                self.capture.set_enabled(MediaKind::Audio, enabled);
            }
            SessionCommand::SetVideoEnabled(enabled) => {
                self.capture.set_enabled(MediaKind::Video, enabled);
            }
            SessionCommand::Leave => {
                info!("[Session] Leaving room {}", self.link.room());
                return ControlFlow::Break(());
            }
        }

        ControlFlow::Continue(())
    }

    async fn handle_transport_event(&mut self, event: TransportEvent) {
        match event {
            TransportEvent::NegotiationNeeded => {
                let Some(pairing) = self.pairing.as_mut() else {
                    return;
                };
                match pairing.engine.on_negotiation_needed().await {
                    Ok(outcome) => debug!("[Session] Negotiation needed: {:?}", outcome),
                    Err(e) => self.negotiation_failed(e),
                }
            }

            TransportEvent::CandidateGenerated(candidate) => {
                self.send_or_warn(self.link.send_message(SignalMessage::Candidate(candidate)));
            }

            TransportEvent::TrackReceived {
                stream_id,
                track_id,
            } => {
                debug!("[Session] Track {} on stream {}", track_id, stream_id);
                self.route_track(stream_id);
            }

            TransportEvent::ConnectionStateChanged(state) => {
                self.emit(SessionEvent::ConnectionState(state));
            }
        }
    }

    async fn handle_signal(&mut self, message: SignalMessage) {
        let Some(pairing) = self.pairing.as_mut() else {
            debug!("[Session] No pairing, dropping signal");
            return;
        };

        match pairing.engine.on_remote_signal(message).await {
            Ok(outcome) => debug!("[Session] Remote signal: {:?}", outcome),
            Err(e) => self.negotiation_failed(e),
        }
    }

    fn merge_content(&mut self, entries: Vec<ContentEntry>) {
        self.content.merge_remote(entries);

        let pending = std::mem::take(&mut self.unroutable);
        for stream_id in pending {
            match self.content.resolve_render_target(&stream_id) {
                RenderTarget::Unknown => self.unroutable.push(stream_id),
                target => {
                    info!("[Session] Stream {} now routed to {:?}", stream_id, target);
                    self.emit(SessionEvent::TrackRouted { stream_id, target });
                }
            }
        }
    }

    async fn handle_peer_left(&mut self, peer_id: PeerId) {
        info!("[Session] Peer {} left", peer_id);
        self.teardown_pairing().await;
        // The remaining participant is now the room's first occupant.
        self.role = Some(Role::Impolite);
        self.emit(SessionEvent::RemoteCleared { peer_id });
    }

    fn set_role(&mut self, role: Role) {
        self.role = Some(role);
        self.emit(SessionEvent::Joined { role });
    }

    /// Creates a transport for the current role and attaches local media.
    async fn start_pairing(&mut self) {
        let Some(role) = self.role else {
            warn!("[Session] Cannot pair before joining");
            return;
        };

        let (tx, rx) = mpsc::channel(TRANSPORT_EVENT_BUFFER);
        let transport = match self.factory.create(tx).await {
            Ok(t) => t,
            Err(e) => {
                error!("[Session] Failed to create transport: {:#}", e);
                self.emit(SessionEvent::NegotiationFailed(format!("{e:#}")));
                return;
            }
        };

        for stream in &self.local_streams {
            if let Err(e) = transport.add_stream(stream).await {
                warn!("[Session] Failed to attach stream {}: {:#}", stream.id, e);
            }
        }

        info!("[Session] Pairing started as {:?}", role);
        self.pairing = Some(Pairing {
            engine: NegotiationEngine::new(role, transport, self.link.clone()),
            events: rx,
        });
    }

    async fn teardown_pairing(&mut self) {
        if let Some(pairing) = self.pairing.take() {
            info!("[Session] Closing pairing");
            pairing.engine.close().await;
        }
        self.unroutable.clear();
    }

    /// Captures a local stream and labels it. Returns whether it started.
    async fn acquire(&mut self, kind: CaptureKind) -> bool {
        let stream = match self.capture.capture(kind).await {
            Ok(s) => s,
            Err(error) => {
                warn!("[Session] {}", error.user_message(kind));
                self.emit(SessionEvent::MediaFailed { kind, error });
                return false;
            }
        };

        let label = kind.label();
        self.content.set_local(stream.id.clone(), label);

        if let Some(pairing) = &self.pairing {
            if let Err(e) = pairing.engine.transport().add_stream(&stream).await {
                warn!("[Session] Failed to attach stream {}: {:#}", stream.id, e);
            }
        }

        self.emit(SessionEvent::LocalStreamStarted {
            stream_id: stream.id.clone(),
            label,
        });
        self.local_streams.push(stream);
        true
    }

    fn route_track(&mut self, stream_id: String) {
        match self.content.resolve_render_target(&stream_id) {
            RenderTarget::Unknown => {
                debug!("[Session] No label yet for stream {}", stream_id);
                if !self.unroutable.contains(&stream_id) {
                    self.unroutable.push(stream_id.clone());
                }
                self.emit(SessionEvent::TrackUnroutable { stream_id });
            }
            target => self.emit(SessionEvent::TrackRouted { stream_id, target }),
        }
    }

    fn negotiation_failed(&self, e: NegotiationError) {
        warn!("[Session] Negotiation step failed: {}", e);
        self.emit(SessionEvent::NegotiationFailed(e.to_string()));
    }

    fn send_or_warn(&self, result: Result<(), RelayClosed>) {
        if let Err(e) = result {
            warn!("[Session] {}", e);
        }
    }

    fn emit(&self, event: SessionEvent) {
        let _ = self.event_tx.send(event);
    }
}

async fn next_transport_event(pairing: &mut Option<Pairing>) -> Option<TransportEvent> {
    match pairing {
        Some(p) => p.events.recv().await,
        None => std::future::pending().await,
    }
}

/// The user's side of a running `PeerSession`.
pub struct SessionHandle {
    commands: mpsc::UnboundedSender<SessionCommand>,
    events: mpsc::UnboundedReceiver<SessionEvent>,
}

impl SessionHandle {
    pub fn send(&self, command: SessionCommand) -> Result<(), SessionClosed> {
        self.commands.send(command).map_err(|_| SessionClosed)
    }

    pub fn start_screen_share(&self) -> Result<(), SessionClosed> {
        self.send(SessionCommand::StartScreenShare)
    }

    pub fn set_audio_enabled(&self, enabled: bool) -> Result<(), SessionClosed> {
        self.send(SessionCommand::SetAudioEnabled(enabled))
    }

    pub fn set_video_enabled(&self, enabled: bool) -> Result<(), SessionClosed> {
        self.send(SessionCommand::SetVideoEnabled(enabled))
    }

    pub fn leave(&self) -> Result<(), SessionClosed> {
        self.send(SessionCommand::Leave)
    }

    /// Next event, or `None` once the session has stopped and all events
    /// were read.
    pub async fn next_event(&mut self) -> Option<SessionEvent> {
        self.events.recv().await
    }
}
