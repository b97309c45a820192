//! Fallback chain behavior across tiers: ordering, short-circuit,
//! credential gating, timeout cancellation, and trail completeness.

use std::sync::Arc;
use std::time::{Duration, Instant};

use marketpulse_core::chain::ChainExecutor;
use marketpulse_core::provider::{FetchError, SignalSource};
use marketpulse_core::{FailureReason, Headline, ProviderId, SignalKind, Symbol, Tier};
use marketpulse_tests::support::{headline, price_quote, Reply, ScriptedSource};

fn symbol() -> Symbol {
    Symbol::parse("TSLA").expect("valid symbol")
}

fn news_chain(
    tiers: Vec<Arc<dyn SignalSource<Payload = Vec<Headline>>>>,
) -> ChainExecutor<Vec<Headline>> {
    ChainExecutor::new(SignalKind::News, tiers)
}

#[tokio::test]
async fn winning_first_tier_prevents_every_later_call() {
    let first = ScriptedSource::new(
        ProviderId::Googlenews,
        SignalKind::News,
        1,
        Reply::Success(vec![headline("Profits soar")]),
    );
    let second = ScriptedSource::new(
        ProviderId::Ddg,
        SignalKind::News,
        2,
        Reply::Success(vec![headline("never fetched")]),
    );

    let chain = news_chain(vec![first.clone(), second.clone()]);
    let outcome = chain.run(&symbol(), None).await;

    assert_eq!(outcome.tier, Tier::Provider(ProviderId::Googlenews));
    assert_eq!(first.calls(), 1);
    assert_eq!(second.calls(), 0);
    assert_eq!(outcome.attempts.len(), 1);
    assert!(outcome.attempts[0].is_success());
}

#[tokio::test]
async fn failures_accumulate_in_declared_priority_order() {
    let first = ScriptedSource::new(
        ProviderId::Googlenews,
        SignalKind::News,
        1,
        Reply::Failure(FetchError::transport("dns failure")),
    );
    let second = ScriptedSource::new(
        ProviderId::Ddg,
        SignalKind::News,
        2,
        Reply::Failure(FetchError::no_data("index empty")),
    );

    let chain = news_chain(vec![second.clone(), first.clone()]);
    let outcome = chain.run(&symbol(), None).await;

    assert_eq!(outcome.tier, Tier::Exhausted);
    assert!(outcome.payload.is_none());

    let providers: Vec<ProviderId> = outcome
        .attempts
        .iter()
        .map(|attempt| attempt.provider())
        .collect();
    assert_eq!(providers, vec![ProviderId::Googlenews, ProviderId::Ddg]);
    assert_eq!(
        outcome.attempts[0].reason(),
        Some(FailureReason::TransportError)
    );
    assert_eq!(outcome.attempts[1].reason(), Some(FailureReason::NoData));
}

#[tokio::test]
async fn credential_gated_tier_is_skipped_with_zero_network_cost() {
    let gated = ScriptedSource::without_credentials(
        ProviderId::Reddit,
        SignalKind::Social,
        1,
        Reply::Success(vec![marketpulse_tests::support::social_post(
            "hidden", "r/stocks", 1,
        )]),
    );
    let open = ScriptedSource::new(
        ProviderId::Ddg,
        SignalKind::Social,
        2,
        Reply::Success(vec![marketpulse_tests::support::social_post(
            "visible", "r/stocks", 1,
        )]),
    );

    let tiers: Vec<Arc<dyn SignalSource<Payload = Vec<marketpulse_core::SocialPost>>>> =
        vec![gated.clone(), open];
    let chain = ChainExecutor::new(SignalKind::Social, tiers);
    let outcome = chain.run(&symbol(), None).await;

    assert_eq!(gated.calls(), 0);
    assert_eq!(outcome.tier, Tier::Provider(ProviderId::Ddg));
    assert_eq!(
        outcome.attempts[0].reason(),
        Some(FailureReason::MissingCredentials)
    );
}

#[tokio::test(start_paused = true)]
async fn hung_tier_is_cancelled_at_its_own_budget() {
    let hung = ScriptedSource::new(ProviderId::Googlenews, SignalKind::News, 1, Reply::Hang);
    let rescue = ScriptedSource::new(
        ProviderId::Ddg,
        SignalKind::News,
        2,
        Reply::Success(vec![headline("rescued")]),
    );

    let chain = news_chain(vec![hung, rescue]);
    let outcome = chain.run(&symbol(), None).await;

    assert_eq!(outcome.attempts[0].reason(), Some(FailureReason::Timeout));
    assert_eq!(outcome.tier, Tier::Provider(ProviderId::Ddg));
}

#[tokio::test(start_paused = true)]
async fn request_deadline_caps_a_generous_provider_budget() {
    // Provider would allow a day; the request deadline allows 50ms.
    let hung = ScriptedSource::with_timeout(
        ProviderId::Googlenews,
        SignalKind::News,
        1,
        Duration::from_secs(86_400),
        Reply::Hang,
    );

    let chain = news_chain(vec![hung]);
    let deadline = Instant::now() + Duration::from_millis(50);
    let outcome = chain.run(&symbol(), Some(deadline)).await;

    assert_eq!(outcome.tier, Tier::Exhausted);
    assert_eq!(outcome.attempts[0].reason(), Some(FailureReason::Timeout));
}

#[tokio::test]
async fn empty_success_falls_through_as_no_data() {
    let empty = ScriptedSource::new(
        ProviderId::Googlenews,
        SignalKind::News,
        1,
        Reply::Success(Vec::new()),
    );
    let second = ScriptedSource::new(
        ProviderId::Ddg,
        SignalKind::News,
        2,
        Reply::Success(vec![headline("real content")]),
    );

    let chain = news_chain(vec![empty, second]);
    let outcome = chain.run(&symbol(), None).await;

    assert_eq!(outcome.attempts[0].reason(), Some(FailureReason::NoData));
    assert_eq!(outcome.tier, Tier::Provider(ProviderId::Ddg));
}

#[tokio::test]
async fn price_chain_never_treats_a_quote_as_empty() {
    let source = ScriptedSource::new(
        ProviderId::Yahoo,
        SignalKind::Price,
        1,
        Reply::Success(price_quote(420.69, 408.10)),
    );

    let tiers: Vec<Arc<dyn SignalSource<Payload = marketpulse_core::PriceQuote>>> = vec![source];
    let chain = ChainExecutor::new(SignalKind::Price, tiers);
    let outcome = chain.run(&symbol(), None).await;

    assert_eq!(outcome.tier, Tier::Provider(ProviderId::Yahoo));
    assert!((outcome.payload.expect("quote").last - 420.69).abs() < 1e-9);
}
