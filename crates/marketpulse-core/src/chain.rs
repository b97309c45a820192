//! Fallback chain executor.
//!
//! Drives an ordered list of [`SignalSource`]s for one signal kind:
//! strictly in priority order, one attempt per tier, hard timeout per
//! call, short-circuit on the first success. Every attempt (including the
//! ones skipped for missing credentials) lands in the trail, and an
//! exhausted chain reports `tier = "exhausted"` with no payload. The
//! executor never invents data; synthetic fallbacks are the fetchers' job.

use std::sync::Arc;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::provider::{FetchOutcome, SignalPayload, SignalSource};
use crate::{FailureReason, ProviderId, SignalKind, Symbol, Tier};

/// Result of running a full chain.
#[derive(Debug)]
pub struct ChainOutcome<P> {
    pub payload: Option<P>,
    pub tier: Tier,
    /// Ordered record of every tier attempted.
    pub attempts: Vec<FetchOutcome>,
}

/// Provenance metadata attached to each signal result in a snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChainReport {
    pub tier: Tier,
    pub attempts: Vec<FetchOutcome>,
}

/// Ordered provider chain for one signal kind.
pub struct ChainExecutor<P: SignalPayload + Send> {
    kind: SignalKind,
    tiers: Vec<Arc<dyn SignalSource<Payload = P>>>,
}

impl<P: SignalPayload + Send> ChainExecutor<P> {
    /// Build an executor. Tiers are sorted by declared priority once, here;
    /// execution order never changes afterwards.
    pub fn new(kind: SignalKind, mut tiers: Vec<Arc<dyn SignalSource<Payload = P>>>) -> Self {
        tiers.sort_by_key(|tier| tier.spec().priority);
        Self { kind, tiers }
    }

    pub fn kind(&self) -> SignalKind {
        self.kind
    }

    pub fn tier_ids(&self) -> Vec<ProviderId> {
        self.tiers.iter().map(|tier| tier.id()).collect()
    }

    /// Run the chain for one symbol.
    ///
    /// `deadline` is the optional request-level cutoff: each call's budget
    /// is the smaller of the provider's own timeout and the time remaining,
    /// and a tier reached after the deadline is recorded as a `Timeout`
    /// failure without being invoked. Cancellation at the deadline behaves
    /// exactly like an ordinary per-call timeout.
    pub async fn run(&self, symbol: &Symbol, deadline: Option<Instant>) -> ChainOutcome<P> {
        let mut attempts = Vec::with_capacity(self.tiers.len());

        for source in &self.tiers {
            let spec = source.spec();
            let provider = spec.id;
            debug!(kind = %self.kind, %provider, %symbol, "attempting tier");

            if !source.credentials_ready() {
                let message = format!(
                    "provider '{provider}' skipped: missing {}",
                    spec.credential_keys.join(", ")
                );
                debug!(kind = %self.kind, %provider, "skipping tier: credentials absent");
                attempts.push(FetchOutcome::Failure {
                    provider,
                    reason: FailureReason::MissingCredentials,
                    message,
                    latency_ms: 0,
                });
                continue;
            }

            let Some(budget) = effective_budget(spec.timeout, deadline) else {
                attempts.push(FetchOutcome::Failure {
                    provider,
                    reason: FailureReason::Timeout,
                    message: format!("provider '{provider}' skipped: request deadline exhausted"),
                    latency_ms: 0,
                });
                continue;
            };

            let started = Instant::now();
            let result = tokio::time::timeout(budget, source.fetch(symbol)).await;
            let latency_ms = elapsed_ms(started);

            match result {
                Err(_elapsed) => {
                    warn!(kind = %self.kind, %provider, budget_ms = budget.as_millis() as u64, "tier timed out");
                    attempts.push(FetchOutcome::Failure {
                        provider,
                        reason: FailureReason::Timeout,
                        message: format!(
                            "provider '{provider}' produced no response within {}ms",
                            budget.as_millis()
                        ),
                        latency_ms,
                    });
                }
                Ok(Err(error)) => {
                    warn!(kind = %self.kind, %provider, reason = %error.reason(), "tier failed");
                    attempts.push(FetchOutcome::Failure {
                        provider,
                        reason: error.reason(),
                        message: error.message().to_owned(),
                        latency_ms,
                    });
                }
                Ok(Ok(payload)) if payload.is_empty_payload() => {
                    // Empty success counts as NoData so the next tier still runs.
                    warn!(kind = %self.kind, %provider, "tier returned empty result");
                    attempts.push(FetchOutcome::Failure {
                        provider,
                        reason: FailureReason::NoData,
                        message: format!("provider '{provider}' returned an empty result set"),
                        latency_ms,
                    });
                }
                Ok(Ok(payload)) => {
                    debug!(kind = %self.kind, %provider, latency_ms, "tier succeeded");
                    attempts.push(FetchOutcome::Success {
                        provider,
                        latency_ms,
                    });
                    return ChainOutcome {
                        payload: Some(payload),
                        tier: Tier::Provider(provider),
                        attempts,
                    };
                }
            }
        }

        warn!(kind = %self.kind, %symbol, tiers = self.tiers.len(), "chain exhausted");
        ChainOutcome {
            payload: None,
            tier: Tier::Exhausted,
            attempts,
        }
    }
}

fn effective_budget(timeout: Duration, deadline: Option<Instant>) -> Option<Duration> {
    match deadline {
        None => Some(timeout),
        Some(deadline) => {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                None
            } else {
                Some(timeout.min(remaining))
            }
        }
    }
}

fn elapsed_ms(started: Instant) -> u64 {
    started.elapsed().as_millis().min(u128::from(u64::MAX)) as u64
}
