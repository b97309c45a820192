//! # marketpulse-core
//!
//! Resilient multi-source aggregation of market signals (price, news,
//! social commentary) into one normalized snapshot per symbol.
//!
//! ## Overview
//!
//! For each signal kind an ordered chain of provider adapters is tried in
//! priority order with a hard per-call timeout. The first success wins;
//! every failure is classified and recorded in the attempt trail; an
//! exhausted chain degrades to a clearly-flagged synthetic tier so the
//! aggregator always returns a renderable [`Snapshot`].
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`adapters`] | Provider adapters (Twelve Data, Yahoo, Google News, Reddit, DuckDuckGo) |
//! | [`chain`] | Fallback chain executor and provenance reports |
//! | [`config`] | Immutable process-wide configuration |
//! | [`domain`] | Domain models (Symbol, PriceQuote, Headline, SocialPost) |
//! | [`fetch`] | Per-signal fetchers with synthetic final tiers |
//! | [`http_client`] | HTTP transport abstraction |
//! | [`provider`] | Adapter contract and failure taxonomy |
//! | [`sentiment`] | Deterministic lexical sentiment scoring |
//! | [`snapshot`] | Snapshot aggregator |
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use marketpulse_core::{AppConfig, SnapshotAggregator};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = AppConfig::from_env();
//!     let aggregator = SnapshotAggregator::new(&config);
//!
//!     let snapshot = aggregator.aggregate("TSLA").await?;
//!     println!("{} @ {}{:.2} (tier: {})",
//!         snapshot.symbol,
//!         snapshot.price.currency.glyph(),
//!         snapshot.price.quote.last,
//!         snapshot.price.provenance.tier,
//!     );
//!     Ok(())
//! }
//! ```
//!
//! ## Error handling
//!
//! Provider failures (`MissingCredentials`, `Timeout`, `MalformedResponse`,
//! `NoData`, `TransportError`) never escape the chain; an exhausted chain
//! never escapes its fetcher. The one error the aggregator can return is
//! [`SnapshotError::InvalidSymbol`] for input that fails normalization.

pub mod adapters;
pub mod chain;
pub mod config;
pub mod domain;
pub mod fetch;
pub mod http_client;
pub mod provider;
pub mod sentiment;
pub mod snapshot;

mod error;
mod source;

// Re-export commonly used types at the crate root.

pub use chain::{ChainExecutor, ChainOutcome, ChainReport};
pub use config::{AppConfig, ChainPlan, Credentials, FetchLimits};
pub use domain::{Currency, Headline, Market, PriceQuote, SocialPost, Symbol, UtcDateTime};
pub use error::{CoreError, ValidationError};
pub use fetch::{
    NewsFetcher, NewsResult, PriceFetcher, PriceResult, ScoredHeadline, ScoredPost, SocialFetcher,
    SocialResult,
};
pub use http_client::{
    HttpAuth, HttpClient, HttpError, HttpMethod, HttpRequest, HttpResponse, NoopHttpClient,
    ReqwestHttpClient,
};
pub use provider::{
    FailureReason, FetchError, FetchOutcome, ProviderSpec, SignalPayload, SignalSource,
    SourceFuture,
};
pub use sentiment::SentimentScore;
pub use snapshot::{Snapshot, SnapshotAggregator, SnapshotError};
pub use source::{ProviderId, SignalKind, Tier};
