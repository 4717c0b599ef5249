use tandem_core::{Role, SdpType, SignalMessage};
use tandem_peer::{NegotiationState, SignalOutcome, SignalingState};

use crate::utils::{engine_with_fake, init_tracing, signal_of};

#[tokio::test]
async fn test_impolite_offer_wins_collision() {
    init_tracing();

    let (mut impolite, impolite_transport, mut impolite_sent) = engine_with_fake(Role::Impolite);
    let (mut polite, polite_transport, mut polite_sent) = engine_with_fake(Role::Polite);

    // Both sides offer before either sees the other's offer.
    impolite.on_negotiation_needed().await.unwrap();
    polite.on_negotiation_needed().await.unwrap();
    let impolite_offer = signal_of(impolite_sent.try_recv().unwrap());
    let polite_offer = signal_of(polite_sent.try_recv().unwrap());

    assert_eq!(
        impolite.on_remote_signal(polite_offer).await.unwrap(),
        SignalOutcome::GlareIgnored
    );
    assert_eq!(impolite.state(), NegotiationState::CollisionDeferred);
    assert_eq!(impolite_transport.state().signaling, SignalingState::HaveLocalOffer);
    assert!(impolite_sent.try_recv().is_err());

    assert_eq!(
        polite.on_remote_signal(impolite_offer).await.unwrap(),
        SignalOutcome::AnswerSent
    );
    assert_eq!(polite_transport.state().rollbacks, 1);
    let answer = signal_of(polite_sent.try_recv().unwrap());

    assert_eq!(
        impolite.on_remote_signal(answer).await.unwrap(),
        SignalOutcome::DescriptionApplied
    );
    assert_eq!(impolite.state(), NegotiationState::Idle);
    assert_eq!(impolite_transport.state().signaling, SignalingState::Stable);
    assert_eq!(polite_transport.state().signaling, SignalingState::Stable);
    assert_eq!(impolite_transport.state().rollbacks, 0);
}

#[tokio::test]
async fn test_polite_side_yields_over_pending_offer() {
    init_tracing();

    let (mut polite, transport, mut sent) = engine_with_fake(Role::Polite);
    let (mut other, _other_transport, mut other_sent) = engine_with_fake(Role::Impolite);

    polite.on_negotiation_needed().await.unwrap();
    let _discarded = sent.try_recv().unwrap();

    other.on_negotiation_needed().await.unwrap();
    let offer = signal_of(other_sent.try_recv().unwrap());

    assert_eq!(polite.on_remote_signal(offer).await.unwrap(), SignalOutcome::AnswerSent);
    assert_eq!(transport.state().remote_descriptions, vec![SdpType::Offer]);
    assert_eq!(
        transport.state().local_descriptions,
        vec![SdpType::Offer, SdpType::Answer]
    );
    assert!(matches!(
        signal_of(sent.try_recv().unwrap()),
        SignalMessage::Description(d) if d.sdp_type == SdpType::Answer
    ));
}

#[tokio::test]
async fn test_offer_after_ignored_collision_keeps_deferral() {
    init_tracing();

    let (mut impolite, _transport, mut sent) = engine_with_fake(Role::Impolite);
    let (mut polite, _polite_transport, mut polite_sent) = engine_with_fake(Role::Polite);

    impolite.on_negotiation_needed().await.unwrap();
    polite.on_negotiation_needed().await.unwrap();
    let polite_offer = signal_of(polite_sent.try_recv().unwrap());
    impolite.on_remote_signal(polite_offer).await.unwrap();
    assert_eq!(impolite.state(), NegotiationState::CollisionDeferred);

    // A renegotiation while deferred returns to the deferred state.
    assert_eq!(
        impolite.on_negotiation_needed().await.unwrap(),
        SignalOutcome::OfferSent
    );
    assert_eq!(impolite.state(), NegotiationState::CollisionDeferred);

    let mut offers = 0;
    while sent.try_recv().is_ok() {
        offers += 1;
    }
    assert_eq!(offers, 2);
}
