use anyhow::{Context, Result};
use std::sync::Arc;
use std::time::Duration;
use tandem_core::{ClientEvent, Role, RoomId, ServerEvent};
use tandem_peer::{NegotiationEngine, PeerSession, RelayChannels, RoomLink, SessionEvent, SessionHandle};
use tokio::sync::mpsc;
use tracing::Level;

use super::{FakeCapture, FakeTransport, FakeTransportFactory};

/// Timeout for one expected event (ms).
pub const EVENT_TIMEOUT_MS: u64 = 2000;

/// Window during which nothing is expected (ms).
pub const SILENCE_WINDOW_MS: u64 = 200;

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(Level::DEBUG)
        .with_test_writer()
        .try_init();
}

/// A session wired to in-memory relay channels the test plays the relay on.
pub struct TestSession {
    pub handle: SessionHandle,
    pub sent: mpsc::UnboundedReceiver<ClientEvent>,
    pub relay: mpsc::UnboundedSender<ServerEvent>,
    pub capture: FakeCapture,
    pub factory: FakeTransportFactory,
}

impl TestSession {
    pub fn spawn(room: &str, capture: FakeCapture) -> Self {
        let (channels, sent, relay) = RelayChannels::pair();
        let factory = FakeTransportFactory::new();

        let (session, handle) = PeerSession::new(
            RoomId::from(room),
            channels,
            Arc::new(capture.clone()),
            Arc::new(factory.clone()),
        );
        tokio::spawn(session.run());

        Self {
            handle,
            sent,
            relay,
            capture,
            factory,
        }
    }

    pub fn deliver(&self, event: ServerEvent) {
        self.relay.send(event).expect("session dropped the relay");
    }

    pub async fn next_sent(&mut self) -> Result<ClientEvent> {
        tokio::time::timeout(Duration::from_millis(EVENT_TIMEOUT_MS), self.sent.recv())
            .await
            .context("Timeout waiting for a relay frame")?
            .context("Session closed the relay link")
    }

    pub async fn expect_nothing_sent(&mut self) -> Result<()> {
        match tokio::time::timeout(Duration::from_millis(SILENCE_WINDOW_MS), self.sent.recv()).await
        {
            Ok(Some(event)) => anyhow::bail!("Unexpected frame: {:?}", event),
            _ => Ok(()),
        }
    }

    pub async fn next_event(&mut self) -> Result<SessionEvent> {
        next_session_event(&mut self.handle).await
    }

    /// Skips events until one matches.
    pub async fn wait_for(&mut self, matches: impl Fn(&SessionEvent) -> bool) -> Result<SessionEvent> {
        wait_for_event(&mut self.handle, matches).await
    }
}

pub async fn next_session_event(handle: &mut SessionHandle) -> Result<SessionEvent> {
    tokio::time::timeout(Duration::from_millis(EVENT_TIMEOUT_MS), handle.next_event())
        .await
        .context("Timeout waiting for a session event")?
        .context("Session event stream ended")
}

pub async fn wait_for_event(
    handle: &mut SessionHandle,
    matches: impl Fn(&SessionEvent) -> bool,
) -> Result<SessionEvent> {
    loop {
        let event = next_session_event(handle).await?;
        if matches(&event) {
            return Ok(event);
        }
    }
}

/// Polls `condition` until it holds or the event timeout elapses.
pub async fn wait_until(condition: impl Fn() -> bool) -> Result<()> {
    let poll = async {
        while !condition() {
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    };
    tokio::time::timeout(Duration::from_millis(EVENT_TIMEOUT_MS), poll)
        .await
        .context("Condition not reached in time")
}

/// An engine over a fake transport whose outgoing frames land in the
/// returned receiver.
pub fn engine_with_fake(
    role: Role,
) -> (
    NegotiationEngine,
    Arc<FakeTransport>,
    mpsc::UnboundedReceiver<ClientEvent>,
) {
    let (tx, rx) = mpsc::unbounded_channel();
    let transport = FakeTransport::new();
    let link = RoomLink::new(RoomId::from("test-room"), tx);
    let engine = NegotiationEngine::new(role, transport.clone(), link);
    (engine, transport, rx)
}

/// The signal inside a `message` frame.
pub fn signal_of(event: ClientEvent) -> tandem_core::SignalMessage {
    match event {
        ClientEvent::Message { message, .. } => message,
        other => panic!("expected a message frame, got {:?}", other),
    }
}
