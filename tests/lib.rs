//! Shared fixtures for the marketpulse behavioral tests.

pub use marketpulse_core::{
    chain::{ChainExecutor, ChainReport},
    fetch::{NewsFetcher, PriceFetcher, SocialFetcher},
    provider::{FetchError, ProviderSpec, SignalPayload, SignalSource, SourceFuture},
    AppConfig, FailureReason, Headline, PriceQuote, ProviderId, SignalKind, Snapshot,
    SnapshotAggregator, SocialPost, Symbol, Tier,
};

pub mod support {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    use marketpulse_core::provider::{
        FetchError, ProviderSpec, SignalPayload, SignalSource, SourceFuture,
    };
    use marketpulse_core::{ProviderId, SignalKind, Symbol};

    /// What a scripted source does when its tier is reached.
    pub enum Reply<P> {
        Success(P),
        Failure(FetchError),
        /// Never resolves; exercises the per-call timeout.
        Hang,
    }

    /// Deterministic [`SignalSource`] with call counting, for short-circuit
    /// and fallback assertions.
    pub struct ScriptedSource<P> {
        spec: ProviderSpec,
        reply: Reply<P>,
        ready: bool,
        calls: AtomicUsize,
    }

    impl<P> ScriptedSource<P> {
        pub fn new(id: ProviderId, kind: SignalKind, priority: u8, reply: Reply<P>) -> Arc<Self> {
            Arc::new(Self {
                spec: ProviderSpec::new(id, kind, priority, Duration::from_millis(100)),
                reply,
                ready: true,
                calls: AtomicUsize::new(0),
            })
        }

        pub fn with_timeout(
            id: ProviderId,
            kind: SignalKind,
            priority: u8,
            timeout: Duration,
            reply: Reply<P>,
        ) -> Arc<Self> {
            Arc::new(Self {
                spec: ProviderSpec::new(id, kind, priority, timeout),
                reply,
                ready: true,
                calls: AtomicUsize::new(0),
            })
        }

        pub fn without_credentials(
            id: ProviderId,
            kind: SignalKind,
            priority: u8,
            reply: Reply<P>,
        ) -> Arc<Self> {
            Arc::new(Self {
                spec: ProviderSpec::new(id, kind, priority, Duration::from_millis(100)),
                reply,
                ready: false,
                calls: AtomicUsize::new(0),
            })
        }

        pub fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl<P> SignalSource for ScriptedSource<P>
    where
        P: SignalPayload + Clone + Send + Sync + 'static,
    {
        type Payload = P;

        fn spec(&self) -> &ProviderSpec {
            &self.spec
        }

        fn credentials_ready(&self) -> bool {
            self.ready
        }

        fn fetch<'a>(&'a self, _symbol: &'a Symbol) -> SourceFuture<'a, P> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match &self.reply {
                Reply::Success(payload) => {
                    let payload = payload.clone();
                    Box::pin(async move { Ok(payload) })
                }
                Reply::Failure(error) => {
                    let error = error.clone();
                    Box::pin(async move { Err(error) })
                }
                Reply::Hang => Box::pin(async move {
                    tokio::time::sleep(Duration::from_secs(86_400)).await;
                    Err(FetchError::transport("unreachable"))
                }),
            }
        }
    }

    pub fn price_quote(last: f64, previous_close: f64) -> marketpulse_core::PriceQuote {
        marketpulse_core::PriceQuote::new(
            "Scripted Corp",
            last,
            Some(previous_close),
            None,
            None,
            None,
            None,
            None,
            None,
        )
        .expect("valid quote")
    }

    pub fn headline(title: &str) -> marketpulse_core::Headline {
        marketpulse_core::Headline::new(title, "wire", None).expect("valid headline")
    }

    pub fn social_post(
        excerpt: &str,
        community: &str,
        engagement: u64,
    ) -> marketpulse_core::SocialPost {
        marketpulse_core::SocialPost::new(excerpt, community, engagement).expect("valid post")
    }
}
