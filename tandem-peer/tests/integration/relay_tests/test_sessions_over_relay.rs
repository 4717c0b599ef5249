use tandem_core::Role;
use tandem_peer::{RenderTarget, SessionEvent, SignalingState, TransportEvent};

use super::{connect_session, spawn_relay};
use crate::utils::{init_tracing, wait_for_event, wait_until};

#[tokio::test]
async fn test_two_sessions_negotiate_through_relay() {
    init_tracing();

    let url = spawn_relay().await;

    let (mut a, a_factory) = connect_session(&url, "e2e", "a").await;
    assert_eq!(
        wait_for_event(&mut a, |e| matches!(e, SessionEvent::Joined { .. }))
            .await
            .unwrap(),
        SessionEvent::Joined {
            role: Role::Impolite
        }
    );

    let (mut b, b_factory) = connect_session(&url, "e2e", "b").await;
    assert_eq!(
        wait_for_event(&mut b, |e| matches!(e, SessionEvent::Joined { .. }))
            .await
            .unwrap(),
        SessionEvent::Joined { role: Role::Polite }
    );

    wait_until(|| a_factory.count() == 1 && b_factory.count() == 1)
        .await
        .unwrap();
    let a_pairing = a_factory.get(0);
    let b_pairing = b_factory.get(0);

    // Both sides want to offer at the same moment.
    a_pairing.raise(TransportEvent::NegotiationNeeded).await;
    b_pairing.raise(TransportEvent::NegotiationNeeded).await;

    let (a_transport, b_transport) = (a_pairing.transport.clone(), b_pairing.transport.clone());
    wait_until(|| {
        let (a_state, b_state) = (a_transport.state(), b_transport.state());
        a_state.signaling == SignalingState::Stable
            && b_state.signaling == SignalingState::Stable
            && !a_state.remote_descriptions.is_empty()
            && !b_state.remote_descriptions.is_empty()
    })
    .await
    .unwrap();
    assert_eq!(a_transport.state().rollbacks, 0);

    // B's camera was announced in its snapshot.
    a_pairing
        .raise(TransportEvent::TrackReceived {
            stream_id: "b-camera".to_owned(),
            track_id: "b-video".to_owned(),
        })
        .await;
    assert_eq!(
        wait_for_event(&mut a, |e| matches!(e, SessionEvent::TrackRouted { .. }))
            .await
            .unwrap(),
        SessionEvent::TrackRouted {
            stream_id: "b-camera".to_owned(),
            target: RenderTarget::Webcam,
        }
    );

    let (mut c, c_factory) = connect_session(&url, "e2e", "c").await;
    wait_for_event(&mut c, |e| *e == SessionEvent::RoomFull)
        .await
        .unwrap();
    assert_eq!(c_factory.count(), 0);

    b.leave().unwrap();
    wait_for_event(&mut a, |e| matches!(e, SessionEvent::RemoteCleared { .. }))
        .await
        .unwrap();
    assert!(a_transport.state().closed);
}
