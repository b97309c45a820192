//! Signal fetchers: one per signal kind.
//!
//! Each fetcher composes a fallback chain with the synthetic final tier the
//! chain itself never applies, so every fetch produces a renderable result
//! with explicit provenance.

mod news;
mod price;
mod social;

pub use news::{NewsFetcher, NewsResult, ScoredHeadline};
pub use price::{PriceFetcher, PriceResult};
pub use social::{ScoredPost, SocialFetcher, SocialResult};
