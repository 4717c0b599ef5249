use tandem_core::{ClientEvent, ServerEvent};

use crate::integration::init_tracing;
use crate::utils::{WsTestClient, spawn_server};

#[tokio::test]
async fn test_invalid_frames_do_not_close_the_connection() {
    init_tracing();

    let (addr, _state) = spawn_server().await.expect("server failed to start");
    let mut client = WsTestClient::connect(addr).await.expect("connect failed");

    client
        .send_raw(r#"{"event":"no-such-event"}"#.to_owned())
        .await
        .expect("send failed");
    client.send_raw("not json".to_owned()).await.expect("send failed");
    client.expect_silence().await.expect("no reply expected");

    client
        .send(&ClientEvent::RoomJoin { room: "r9".into() })
        .await
        .expect("send failed");
    assert_eq!(client.recv().await.expect("reply"), ServerEvent::RoomCreated);

    client.close().await.expect("close failed");
}
