use crate::media::LocalStream;
use crate::transport::{
    ConnectionState, MediaTransport, SignalingState, TransportConfig, TransportEvent,
    TransportFactory,
};
use anyhow::{Context, Result, bail};
use async_trait::async_trait;
use std::sync::Arc;
use tandem_core::{IceCandidate, SdpType, SessionDescription};
use tokio::sync::mpsc;
use tracing::{debug, info};
use webrtc::api::APIBuilder;
use webrtc::api::interceptor_registry::register_default_interceptors;
use webrtc::api::media_engine::MediaEngine;
use webrtc::ice_transport::ice_candidate::{RTCIceCandidate, RTCIceCandidateInit};
use webrtc::ice_transport::ice_server::RTCIceServer;
use webrtc::interceptor::registry::Registry;
use webrtc::peer_connection::RTCPeerConnection;
use webrtc::peer_connection::configuration::RTCConfiguration;
use webrtc::peer_connection::peer_connection_state::RTCPeerConnectionState;
use webrtc::peer_connection::sdp::sdp_type::RTCSdpType;
use webrtc::peer_connection::sdp::session_description::RTCSessionDescription;
use webrtc::peer_connection::signaling_state::RTCSignalingState;
use webrtc::rtp_transceiver::RTCRtpTransceiver;
use webrtc::rtp_transceiver::rtp_receiver::RTCRtpReceiver;
use webrtc::track::track_remote::TrackRemote;

/// `MediaTransport` backed by a webrtc-rs peer connection.
pub struct WebRtcTransport {
    peer_connection: Arc<RTCPeerConnection>,
}

impl WebRtcTransport {
    /// Builds the peer connection and wires its callbacks into `event_tx`.
    pub async fn new(config: TransportConfig, event_tx: mpsc::Sender<TransportEvent>) -> Result<Self> {
        let mut m = MediaEngine::default();
        m.register_default_codecs()?;
        let registry = register_default_interceptors(Registry::new(), &mut m)?;

        let api = APIBuilder::new()
            .with_media_engine(m)
            .with_interceptor_registry(registry)
            .build();

        let rtc_config = RTCConfiguration {
            ice_servers: config
                .ice_servers
                .into_iter()
                .map(|server| RTCIceServer {
                    urls: server.urls,
                    username: server.username.unwrap_or_default(),
                    credential: server.credential.unwrap_or_default(),
                })
                .collect(),
            ..Default::default()
        };

        let peer_connection = Arc::new(api.new_peer_connection(rtc_config).await?);

        let state_tx = event_tx.clone();
        peer_connection.on_peer_connection_state_change(Box::new(
            move |s: RTCPeerConnectionState| {
                let tx = state_tx.clone();

                Box::pin(async move {
                    info!("Peer connection state changed: {:?}", s);
                    let state = match s {
                        RTCPeerConnectionState::Connecting => ConnectionState::Connecting,
                        RTCPeerConnectionState::Connected => ConnectionState::Connected,
                        RTCPeerConnectionState::Disconnected => ConnectionState::Disconnected,
                        RTCPeerConnectionState::Failed => ConnectionState::Failed,
                        RTCPeerConnectionState::Closed => ConnectionState::Closed,
                        _ => ConnectionState::New,
                    };
                    let _ = tx.send(TransportEvent::ConnectionStateChanged(state)).await;
                })
            },
        ));

        let ice_tx = event_tx.clone();
        peer_connection.on_ice_candidate(Box::new(move |c: Option<RTCIceCandidate>| {
            let tx = ice_tx.clone();

            Box::pin(async move {
                let Some(candidate) = c else { return };
                let Ok(init) = candidate.to_json() else {
                    return;
                };
                let candidate = IceCandidate {
                    candidate: init.candidate,
                    sdp_mid: init.sdp_mid,
                    sdp_m_line_index: init.sdp_mline_index,
                    username_fragment: init.username_fragment,
                };
                let _ = tx.send(TransportEvent::CandidateGenerated(candidate)).await;
            })
        }));

        let negotiation_tx = event_tx.clone();
        peer_connection.on_negotiation_needed(Box::new(move || {
            let tx = negotiation_tx.clone();

            Box::pin(async move {
                debug!("Negotiation needed");
                let _ = tx.send(TransportEvent::NegotiationNeeded).await;
            })
        }));

        let track_tx = event_tx;
        peer_connection.on_track(Box::new(
            move |track: Arc<TrackRemote>, _: Arc<RTCRtpReceiver>, _: Arc<RTCRtpTransceiver>| {
                let tx = track_tx.clone();

                Box::pin(async move {
                    let stream_id = track.stream_id();
                    let track_id = track.id();
                    info!("Remote track {} on stream {}", track_id, stream_id);
                    let _ = tx
                        .send(TransportEvent::TrackReceived {
                            stream_id,
                            track_id,
                        })
                        .await;
                })
            },
        ));

        Ok(Self { peer_connection })
    }
}

fn to_rtc(description: SessionDescription) -> Result<RTCSessionDescription> {
    let rtc = match description.sdp_type {
        SdpType::Offer => RTCSessionDescription::offer(description.sdp)?,
        SdpType::Answer => RTCSessionDescription::answer(description.sdp)?,
        SdpType::Pranswer => RTCSessionDescription::pranswer(description.sdp)?,
        SdpType::Rollback => bail!("Remote rollback descriptions are not accepted"),
    };
    Ok(rtc)
}

fn from_rtc(description: RTCSessionDescription) -> Result<SessionDescription> {
    let sdp_type = match description.sdp_type {
        RTCSdpType::Offer => SdpType::Offer,
        RTCSdpType::Answer => SdpType::Answer,
        RTCSdpType::Pranswer => SdpType::Pranswer,
        RTCSdpType::Rollback => SdpType::Rollback,
        RTCSdpType::Unspecified => bail!("Local description has no type"),
    };
    Ok(SessionDescription {
        sdp_type,
        sdp: description.sdp,
    })
}

#[async_trait]
impl MediaTransport for WebRtcTransport {
    fn signaling_state(&self) -> SignalingState {
        match self.peer_connection.signaling_state() {
            RTCSignalingState::HaveLocalOffer => SignalingState::HaveLocalOffer,
            RTCSignalingState::HaveRemoteOffer => SignalingState::HaveRemoteOffer,
            RTCSignalingState::HaveLocalPranswer => SignalingState::HaveLocalPranswer,
            RTCSignalingState::HaveRemotePranswer => SignalingState::HaveRemotePranswer,
            RTCSignalingState::Closed => SignalingState::Closed,
            _ => SignalingState::Stable,
        }
    }

    async fn set_local_description(&self) -> Result<SessionDescription> {
        let description = match self.peer_connection.signaling_state() {
            RTCSignalingState::HaveRemoteOffer | RTCSignalingState::HaveLocalPranswer => self
                .peer_connection
                .create_answer(None)
                .await
                .context("Failed to create answer")?,
            _ => self
                .peer_connection
                .create_offer(None)
                .await
                .context("Failed to create offer")?,
        };

        self.peer_connection
            .set_local_description(description.clone())
            .await?;

        let committed = self
            .peer_connection
            .local_description()
            .await
            .unwrap_or(description);
        from_rtc(committed)
    }

    async fn set_remote_description(&self, description: SessionDescription) -> Result<()> {
        if description.is_offer()
            && self.peer_connection.signaling_state() == RTCSignalingState::HaveLocalOffer
        {
            debug!("Rolling back local offer");
            // The rollback must carry a parseable SDP, so reuse the pending offer.
            let mut rollback = self
                .peer_connection
                .pending_local_description()
                .await
                .context("No pending local offer to roll back")?;
            rollback.sdp_type = RTCSdpType::Rollback;
            self.peer_connection
                .set_local_description(rollback)
                .await
                .context("Failed to roll back local offer")?;
        }

        let desc = to_rtc(description)?;
        self.peer_connection.set_remote_description(desc).await?;
        Ok(())
    }

    async fn add_ice_candidate(&self, candidate: IceCandidate) -> Result<()> {
        let init = RTCIceCandidateInit {
            candidate: candidate.candidate,
            sdp_mid: candidate.sdp_mid,
            sdp_mline_index: candidate.sdp_m_line_index,
            username_fragment: candidate.username_fragment,
        };
        self.peer_connection.add_ice_candidate(init).await?;
        Ok(())
    }

    async fn add_stream(&self, stream: &LocalStream) -> Result<()> {
        for track in &stream.tracks {
            self.peer_connection
                .add_track(Arc::clone(track))
                .await
                .with_context(|| format!("Failed to add track of stream {}", stream.id))?;
        }
        Ok(())
    }

    async fn close(&self) -> Result<()> {
        self.peer_connection.close().await?;
        Ok(())
    }
}

/// Creates a fresh `WebRtcTransport` for every pairing.
#[derive(Debug, Clone, Default)]
pub struct WebRtcTransportFactory {
    config: TransportConfig,
}

impl WebRtcTransportFactory {
    pub fn new(config: TransportConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl TransportFactory for WebRtcTransportFactory {
    async fn create(&self, events: mpsc::Sender<TransportEvent>) -> Result<Arc<dyn MediaTransport>> {
        let transport = WebRtcTransport::new(self.config.clone(), events).await?;
        Ok(Arc::new(transport))
    }
}
