use crate::error::NegotiationError;
use crate::negotiation::{NegotiationState, SignalOutcome};
use crate::signaling::RoomLink;
use crate::transport::{MediaTransport, SignalingState};
use std::sync::Arc;
use tandem_core::{IceCandidate, Role, SessionDescription, SignalMessage};
use tracing::{debug, info, warn};

/// Perfect negotiation over one transport.
///
/// Both sides may offer whenever their local media changes. When offers
/// cross, the impolite side ignores the incoming one and the polite side
/// rolls its own back and answers, so exactly one offer survives.
///
/// All methods take `&mut self`; the owning session drives them one at a
/// time, in the order messages arrive.
pub struct NegotiationEngine {
    role: Role,
    state: NegotiationState,
    transport: Arc<dyn MediaTransport>,
    link: RoomLink,
}

impl NegotiationEngine {
    pub fn new(role: Role, transport: Arc<dyn MediaTransport>, link: RoomLink) -> Self {
        Self {
            role,
            state: NegotiationState::Idle,
            transport,
            link,
        }
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn state(&self) -> NegotiationState {
        self.state
    }

    pub fn transport(&self) -> &Arc<dyn MediaTransport> {
        &self.transport
    }

    /// Creates, commits and sends a local offer.
    ///
    /// `&mut self` keeps a second request from starting while this offer is
    /// still being produced, so one offer is in flight at a time.
    pub async fn on_negotiation_needed(&mut self) -> Result<SignalOutcome, NegotiationError> {
        let previous = self.state;
        self.state = NegotiationState::Offering;
        let result = self.send_local_description().await;
        self.state = NegotiationState::after_offer(previous);

        result.map(|_| SignalOutcome::OfferSent)
    }

    pub async fn on_remote_signal(
        &mut self,
        signal: SignalMessage,
    ) -> Result<SignalOutcome, NegotiationError> {
        match signal {
            SignalMessage::Description(description) => self.on_description(description).await,
            SignalMessage::Candidate(candidate) => self.on_candidate(candidate).await,
        }
    }

    async fn on_description(
        &mut self,
        description: SessionDescription,
    ) -> Result<SignalOutcome, NegotiationError> {
        let is_offer = description.is_offer();
        let offer_collision = is_offer
            && (self.state == NegotiationState::Offering
                || self.transport.signaling_state() != SignalingState::Stable);

        if offer_collision && !self.role.is_polite() {
            info!("[Negotiation] Ignoring colliding offer ({:?})", self.role);
            self.state = NegotiationState::CollisionDeferred;
            return Ok(SignalOutcome::GlareIgnored);
        }

        self.state = NegotiationState::Idle;
        let sdp_type = description.sdp_type;
        self.transport
            .set_remote_description(description)
            .await
            .map_err(|reason| NegotiationError::RemoteDescription { sdp_type, reason })?;

        if !is_offer {
            debug!("[Negotiation] Applied remote {:?}", sdp_type);
            return Ok(SignalOutcome::DescriptionApplied);
        }

        self.state = NegotiationState::Answering;
        let result = self.send_local_description().await;
        self.state = NegotiationState::Idle;

        result.map(|_| SignalOutcome::AnswerSent)
    }

    async fn on_candidate(
        &mut self,
        candidate: IceCandidate,
    ) -> Result<SignalOutcome, NegotiationError> {
        match self.transport.add_ice_candidate(candidate).await {
            Ok(()) => Ok(SignalOutcome::CandidateAdded),
            Err(e) if self.state == NegotiationState::CollisionDeferred => {
                debug!("[Negotiation] Dropping candidate of ignored offer: {:#}", e);
                Ok(SignalOutcome::CandidateSuppressed)
            }
            Err(e) => Err(NegotiationError::CandidateApply(e)),
        }
    }

    async fn send_local_description(&self) -> Result<SessionDescription, NegotiationError> {
        let description = self
            .transport
            .set_local_description()
            .await
            .map_err(NegotiationError::LocalDescription)?;

        debug!("[Negotiation] Sending local {:?}", description.sdp_type);
        self.link
            .send_message(SignalMessage::Description(description.clone()))?;
        Ok(description)
    }

    /// Closes the transport. The engine is unusable afterwards.
    pub async fn close(self) {
        if let Err(e) = self.transport.close().await {
            warn!("[Negotiation] Failed to close transport: {:#}", e);
        }
    }
}
