/// Where the local side is in the offer/answer exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NegotiationState {
    #[default]
    Idle,

    /// A local offer is being created and sent.
    Offering,

    /// A colliding remote offer was ignored. Candidates belonging to it may
    /// fail to apply and are dropped quietly.
    CollisionDeferred,

    /// A remote offer was applied and the answer is being produced.
    Answering,
}

impl NegotiationState {
    /// The state to restore once an offer attempt ends, whatever its result.
    pub(crate) fn after_offer(previous: NegotiationState) -> NegotiationState {
        match previous {
            NegotiationState::CollisionDeferred => NegotiationState::CollisionDeferred,
            _ => NegotiationState::Idle,
        }
    }
}

/// What a negotiation step did, for logging and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignalOutcome {
    OfferSent,

    /// A remote answer (or pranswer) was applied.
    DescriptionApplied,

    /// A remote offer was applied and answered.
    AnswerSent,

    /// A colliding offer reached the impolite side and was dropped.
    GlareIgnored,

    CandidateAdded,

    /// A candidate failed to apply after an ignored offer.
    CandidateSuppressed,
}
