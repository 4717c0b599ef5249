use tandem_core::{ClientEvent, PeerId, SessionDescription, SignalMessage};

use crate::integration::{create_test_relay, init_tracing};
use crate::utils::{expect_silence, join, next_event, send_event};

#[tokio::test]
async fn test_relay_with_sender_alone_delivers_nothing() {
    init_tracing();

    let (relay_tx, mut event_rx, _signaling) = create_test_relay();
    let a = PeerId::new();

    join(&relay_tx, &a, "r1").await.expect("join failed");
    next_event(&mut event_rx).await.expect("no join reply");

    send_event(&relay_tx, &a, ClientEvent::Ready { room: "r1".into() })
        .await
        .expect("send failed");
    send_event(
        &relay_tx,
        &a,
        ClientEvent::Message {
            message: SignalMessage::Description(SessionDescription::offer("v=0")),
            room: "r1".into(),
        },
    )
    .await
    .expect("send failed");

    expect_silence(&mut event_rx).await.expect("unexpected delivery");
}

#[tokio::test]
async fn test_relay_to_unknown_room_is_silent() {
    init_tracing();

    let (relay_tx, mut event_rx, _signaling) = create_test_relay();

    send_event(
        &relay_tx,
        &PeerId::new(),
        ClientEvent::Id2Content {
            entries: Vec::new(),
            room: "nowhere".into(),
        },
    )
    .await
    .expect("send failed");

    expect_silence(&mut event_rx).await.expect("unexpected delivery");
}
