use tandem_core::ServerEvent;
use tandem_peer::SessionEvent;

use crate::utils::{FakeCapture, TestSession, init_tracing};

#[tokio::test]
async fn test_leave_closes_transport() {
    init_tracing();

    let mut a = TestSession::spawn("r1", FakeCapture::new("a"));
    a.deliver(ServerEvent::RoomCreated);
    a.deliver(ServerEvent::Ready);
    a.next_sent().await.unwrap();
    a.next_sent().await.unwrap();

    a.handle.leave().unwrap();
    a.wait_for(|e| *e == SessionEvent::Closed).await.unwrap();
    assert!(a.factory.get(0).transport.state().closed);
}

#[tokio::test]
async fn test_relay_loss_ends_session() {
    init_tracing();

    let TestSession {
        mut handle, relay, ..
    } = TestSession::spawn("r1", FakeCapture::new("a"));
    drop(relay);

    assert_eq!(
        crate::utils::next_session_event(&mut handle).await.unwrap(),
        SessionEvent::Closed
    );
}
