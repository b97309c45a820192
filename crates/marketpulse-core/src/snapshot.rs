//! Snapshot aggregation: the one externally-facing operation of the core.
//!
//! [`SnapshotAggregator::aggregate`] normalizes the requested symbol, runs
//! the three signal fetchers concurrently, and merges their results with a
//! timestamp. Fetcher degradation never propagates: each signal falls back
//! to its own synthetic tier independently, so for any valid symbol the
//! aggregator returns a complete, renderable [`Snapshot`].

use std::sync::Arc;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::adapters::{
    DdgNewsAdapter, DdgSocialAdapter, GoogleNewsAdapter, RedditAdapter, TwelveDataAdapter,
    YahooQuoteAdapter,
};
use crate::chain::ChainExecutor;
use crate::config::AppConfig;
use crate::fetch::{NewsFetcher, NewsResult, PriceFetcher, PriceResult, SocialFetcher, SocialResult};
use crate::http_client::{HttpClient, ReqwestHttpClient};
use crate::provider::{SignalSource, SignalPayload};
use crate::{Headline, PriceQuote, ProviderId, SignalKind, SocialPost, Symbol, UtcDateTime, ValidationError};

/// One normalized multi-signal snapshot for a symbol.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub symbol: Symbol,
    pub generated_at: UtcDateTime,
    pub price: PriceResult,
    pub news: NewsResult,
    pub social: SocialResult,
}

impl Snapshot {
    /// Whether every signal came from a live provider tier.
    pub fn is_fully_live(&self) -> bool {
        !self.price.is_synthetic && !self.news.is_synthetic && !self.social.is_synthetic
    }
}

/// The only failure the aggregator can report. Upstream conditions are
/// absorbed below this boundary.
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("invalid symbol: {0}")]
    InvalidSymbol(#[from] ValidationError),
}

/// Runs the three signal fetchers for one requested symbol.
pub struct SnapshotAggregator {
    price: PriceFetcher,
    news: NewsFetcher,
    social: SocialFetcher,
    total_deadline: Option<Duration>,
}

impl SnapshotAggregator {
    /// Production wiring: real HTTP transport, chains and credentials from
    /// the given configuration.
    pub fn new(config: &AppConfig) -> Self {
        Self::with_http_client(config, Arc::new(ReqwestHttpClient::new()))
    }

    /// Same wiring with an injected transport; tests use this to stay
    /// fully offline.
    pub fn with_http_client(config: &AppConfig, http: Arc<dyn HttpClient>) -> Self {
        let price_tiers: Vec<Arc<dyn SignalSource<Payload = PriceQuote>>> = config
            .chains
            .price
            .iter()
            .filter_map(|spec| match spec.id {
                ProviderId::Twelvedata => Some(Arc::new(TwelveDataAdapter::new(
                    spec.clone(),
                    http.clone(),
                    config.credentials.twelvedata_api_key.clone(),
                ))
                    as Arc<dyn SignalSource<Payload = PriceQuote>>),
                ProviderId::Yahoo => Some(Arc::new(YahooQuoteAdapter::new(
                    spec.clone(),
                    http.clone(),
                ))),
                other => skip_misplanned(other, spec.kind),
            })
            .collect();

        let news_tiers: Vec<Arc<dyn SignalSource<Payload = Vec<Headline>>>> = config
            .chains
            .news
            .iter()
            .filter_map(|spec| match spec.id {
                ProviderId::Googlenews => Some(Arc::new(GoogleNewsAdapter::new(
                    spec.clone(),
                    http.clone(),
                ))
                    as Arc<dyn SignalSource<Payload = Vec<Headline>>>),
                ProviderId::Ddg => Some(Arc::new(DdgNewsAdapter::new(spec.clone(), http.clone()))),
                other => skip_misplanned(other, spec.kind),
            })
            .collect();

        let social_tiers: Vec<Arc<dyn SignalSource<Payload = Vec<SocialPost>>>> = config
            .chains
            .social
            .iter()
            .filter_map(|spec| match spec.id {
                ProviderId::Reddit => Some(Arc::new(RedditAdapter::new(
                    spec.clone(),
                    http.clone(),
                    config.credentials.reddit_client_id.clone(),
                    config.credentials.reddit_client_secret.clone(),
                    config.credentials.reddit_user_agent.clone(),
                ))
                    as Arc<dyn SignalSource<Payload = Vec<SocialPost>>>),
                ProviderId::Ddg => Some(Arc::new(DdgSocialAdapter::new(spec.clone(), http.clone()))),
                other => skip_misplanned(other, spec.kind),
            })
            .collect();

        Self {
            price: PriceFetcher::new(ChainExecutor::new(SignalKind::Price, price_tiers)),
            news: NewsFetcher::new(
                ChainExecutor::new(SignalKind::News, news_tiers),
                config.limits.max_news_items,
            ),
            social: SocialFetcher::new(
                ChainExecutor::new(SignalKind::Social, social_tiers),
                config.limits.max_social_posts,
            ),
            total_deadline: config.total_deadline,
        }
    }

    /// Assemble an aggregator from already-built fetchers. Test seam.
    pub fn from_fetchers(
        price: PriceFetcher,
        news: NewsFetcher,
        social: SocialFetcher,
        total_deadline: Option<Duration>,
    ) -> Self {
        Self {
            price,
            news,
            social,
            total_deadline,
        }
    }

    /// Aggregate all three signals for a raw symbol string.
    ///
    /// The symbol is normalized first; an unparseable symbol is the sole
    /// error path. The fetchers run concurrently and each degrades to its
    /// own fallback independently, bounded by the shared request deadline.
    pub async fn aggregate(&self, raw_symbol: &str) -> Result<Snapshot, SnapshotError> {
        let symbol = Symbol::parse(raw_symbol)?;
        let deadline = self.total_deadline.map(|budget| Instant::now() + budget);
        debug!(%symbol, deadline_ms = ?self.total_deadline.map(|d| d.as_millis()), "aggregating snapshot");

        let (price, news, social) = tokio::join!(
            self.price.fetch(&symbol, deadline),
            self.news.fetch(&symbol, deadline),
            self.social.fetch(&symbol, deadline),
        );

        Ok(Snapshot {
            symbol,
            generated_at: UtcDateTime::now(),
            price,
            news,
            social,
        })
    }
}

fn skip_misplanned<P: SignalPayload + Send>(
    provider: ProviderId,
    kind: SignalKind,
) -> Option<Arc<dyn SignalSource<Payload = P>>> {
    tracing::warn!(%provider, %kind, "provider does not serve this signal kind; dropping from chain");
    None
}
