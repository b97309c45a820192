use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::chain::{ChainExecutor, ChainReport};
use crate::sentiment::{self, SentimentScore};
use crate::{Headline, Symbol, Tier};

/// One headline with its sentiment score attached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredHeadline {
    #[serde(flatten)]
    pub headline: Headline,
    pub sentiment: SentimentScore,
}

/// Normalized news signal for one snapshot. `items` is never empty: an
/// exhausted chain yields one clearly-synthetic informational item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsResult {
    pub items: Vec<ScoredHeadline>,
    pub is_synthetic: bool,
    pub provenance: ChainReport,
}

/// News signal fetcher: the news chain, the item cap, per-headline
/// sentiment scoring, and the static final tier.
pub struct NewsFetcher {
    chain: ChainExecutor<Vec<Headline>>,
    max_items: usize,
}

impl NewsFetcher {
    pub fn new(chain: ChainExecutor<Vec<Headline>>, max_items: usize) -> Self {
        Self { chain, max_items }
    }

    pub fn chain(&self) -> &ChainExecutor<Vec<Headline>> {
        &self.chain
    }

    pub async fn fetch(&self, symbol: &Symbol, deadline: Option<Instant>) -> NewsResult {
        let outcome = self.chain.run(symbol, deadline).await;

        match outcome.payload {
            Some(headlines) => {
                let items = headlines
                    .into_iter()
                    .take(self.max_items)
                    .map(|headline| ScoredHeadline {
                        sentiment: sentiment::score(&headline.title),
                        headline,
                    })
                    .collect();

                NewsResult {
                    items,
                    is_synthetic: false,
                    provenance: ChainReport {
                        tier: outcome.tier,
                        attempts: outcome.attempts,
                    },
                }
            }
            None => {
                info!(%symbol, "news chain exhausted; serving static item");
                NewsResult {
                    items: vec![static_item(symbol)],
                    is_synthetic: true,
                    provenance: ChainReport {
                        tier: Tier::FallbackStatic,
                        attempts: outcome.attempts,
                    },
                }
            }
        }
    }
}

fn static_item(symbol: &Symbol) -> ScoredHeadline {
    ScoredHeadline {
        headline: Headline::new(
            format!("No live market headlines available for {symbol} right now."),
            "marketpulse",
            None,
        )
        .expect("static headline is valid"),
        sentiment: SentimentScore::NEUTRAL,
    }
}
