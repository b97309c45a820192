//! Provider adapter contract and the per-attempt failure taxonomy.
//!
//! Every upstream source is wrapped in a [`SignalSource`]: one fetch
//! operation for one signal kind, bounded by the timeout declared in its
//! [`ProviderSpec`]. Failures never escape as panics or raw transport
//! errors; each one is classified into a [`FailureReason`] so the chain
//! executor can record it and move on.

use std::fmt::{Display, Formatter};
use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::http_client::HttpError;
use crate::{Headline, PriceQuote, ProviderId, SignalKind, SocialPost, Symbol};

/// Immutable description of one provider within a chain. Defined at process
/// start as part of the chain plan; never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderSpec {
    pub id: ProviderId,
    pub kind: SignalKind,
    /// Named configuration values that must be present before `fetch` may
    /// be attempted. Declared by the provider, checked by the chain.
    pub credential_keys: &'static [&'static str],
    /// Hard per-call budget enforced by the chain executor.
    pub timeout: Duration,
    /// Rank within the chain; lower runs first.
    pub priority: u8,
}

impl ProviderSpec {
    pub fn new(id: ProviderId, kind: SignalKind, priority: u8, timeout: Duration) -> Self {
        Self {
            id,
            kind,
            credential_keys: id.credential_keys(),
            timeout,
            priority,
        }
    }
}

/// Why a single provider attempt failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureReason {
    MissingCredentials,
    Timeout,
    MalformedResponse,
    NoData,
    TransportError,
}

impl FailureReason {
    pub const fn code(self) -> &'static str {
        match self {
            Self::MissingCredentials => "fetch.missing_credentials",
            Self::Timeout => "fetch.timeout",
            Self::MalformedResponse => "fetch.malformed_response",
            Self::NoData => "fetch.no_data",
            Self::TransportError => "fetch.transport_error",
        }
    }
}

impl Display for FailureReason {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// Classified failure returned by a provider adapter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchError {
    reason: FailureReason,
    message: String,
}

impl FetchError {
    pub fn missing_credentials(message: impl Into<String>) -> Self {
        Self {
            reason: FailureReason::MissingCredentials,
            message: message.into(),
        }
    }

    pub fn timeout(message: impl Into<String>) -> Self {
        Self {
            reason: FailureReason::Timeout,
            message: message.into(),
        }
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        Self {
            reason: FailureReason::MalformedResponse,
            message: message.into(),
        }
    }

    pub fn no_data(message: impl Into<String>) -> Self {
        Self {
            reason: FailureReason::NoData,
            message: message.into(),
        }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self {
            reason: FailureReason::TransportError,
            message: message.into(),
        }
    }

    pub const fn reason(&self) -> FailureReason {
        self.reason
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl Display for FetchError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.message, self.reason.code())
    }
}

impl std::error::Error for FetchError {}

impl From<HttpError> for FetchError {
    fn from(error: HttpError) -> Self {
        if error.timed_out() {
            Self::timeout(error.message().to_owned())
        } else {
            Self::transport(error.message().to_owned())
        }
    }
}

/// One entry in a chain's attempt trail. The winning payload itself is not
/// duplicated here; it travels in `ChainOutcome::payload`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum FetchOutcome {
    Success {
        provider: ProviderId,
        latency_ms: u64,
    },
    Failure {
        provider: ProviderId,
        reason: FailureReason,
        message: String,
        latency_ms: u64,
    },
}

impl FetchOutcome {
    pub const fn provider(&self) -> ProviderId {
        match self {
            Self::Success { provider, .. } | Self::Failure { provider, .. } => *provider,
        }
    }

    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    pub const fn reason(&self) -> Option<FailureReason> {
        match self {
            Self::Success { .. } => None,
            Self::Failure { reason, .. } => Some(*reason),
        }
    }
}

/// Payload-level emptiness, used by the chain executor to turn a
/// successful-but-empty response into a `NoData` failure so lower tiers
/// still get their chance.
pub trait SignalPayload {
    fn is_empty_payload(&self) -> bool;
}

impl SignalPayload for PriceQuote {
    fn is_empty_payload(&self) -> bool {
        false
    }
}

impl SignalPayload for Vec<Headline> {
    fn is_empty_payload(&self) -> bool {
        self.is_empty()
    }
}

impl SignalPayload for Vec<SocialPost> {
    fn is_empty_payload(&self) -> bool {
        self.is_empty()
    }
}

pub type SourceFuture<'a, T> =
    Pin<Box<dyn Future<Output = Result<T, FetchError>> + Send + 'a>>;

/// Uniform capability wrapping one upstream source for one signal kind.
///
/// Implementations must be cheap to construct, hold only read-only
/// configuration, and never panic out of `fetch`: every failure mode maps
/// to a [`FetchError`].
pub trait SignalSource: Send + Sync {
    type Payload: SignalPayload + Send;

    fn spec(&self) -> &ProviderSpec;

    fn id(&self) -> ProviderId {
        self.spec().id
    }

    /// Whether the credentials declared in [`ProviderSpec`] are present.
    /// Checked by the chain before `fetch`, so a misconfigured provider is
    /// skipped with near-zero latency instead of waiting out a connection
    /// failure. Anonymous providers are always ready.
    fn credentials_ready(&self) -> bool {
        true
    }

    fn fetch<'a>(&'a self, symbol: &'a Symbol) -> SourceFuture<'a, Self::Payload>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spec_inherits_credential_keys_from_provider() {
        let spec = ProviderSpec::new(
            ProviderId::Reddit,
            SignalKind::Social,
            1,
            Duration::from_secs(6),
        );
        assert_eq!(
            spec.credential_keys.to_vec(),
            vec!["REDDIT_CLIENT_ID", "REDDIT_CLIENT_SECRET"]
        );
    }

    #[test]
    fn http_timeout_maps_to_timeout_reason() {
        let error = FetchError::from(HttpError::timeout("upstream stalled"));
        assert_eq!(error.reason(), FailureReason::Timeout);

        let error = FetchError::from(HttpError::new("connection refused"));
        assert_eq!(error.reason(), FailureReason::TransportError);
    }

    #[test]
    fn failure_reasons_carry_stable_codes() {
        assert_eq!(FailureReason::NoData.code(), "fetch.no_data");
        assert_eq!(
            FailureReason::MissingCredentials.code(),
            "fetch.missing_credentials"
        );
    }

    #[test]
    fn empty_headline_list_is_empty_payload() {
        assert!(Vec::<Headline>::new().is_empty_payload());

        let quote = PriceQuote::placeholder(&Symbol::parse("TSLA").expect("valid symbol"));
        assert!(!quote.is_empty_payload());
    }

    #[test]
    fn outcome_exposes_provider_and_reason() {
        let outcome = FetchOutcome::Failure {
            provider: ProviderId::Yahoo,
            reason: FailureReason::NoData,
            message: String::from("no quote rows"),
            latency_ms: 12,
        };
        assert_eq!(outcome.provider(), ProviderId::Yahoo);
        assert_eq!(outcome.reason(), Some(FailureReason::NoData));
        assert!(!outcome.is_success());
    }
}
