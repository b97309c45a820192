use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::chain::{ChainExecutor, ChainReport};
use crate::sentiment::{self, SentimentScore};
use crate::{SocialPost, Symbol, Tier};

/// One community post with its sentiment score attached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredPost {
    #[serde(flatten)]
    pub post: SocialPost,
    pub sentiment: SentimentScore,
}

/// Normalized social signal for one snapshot. `posts` is never empty and
/// is ranked by engagement within the answering tier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SocialResult {
    pub posts: Vec<ScoredPost>,
    pub is_synthetic: bool,
    pub provenance: ChainReport,
}

/// Social signal fetcher: authenticated tier, anonymous tier, then the
/// static final tier. Posts from a successful tier are ranked by
/// engagement descending before the cap; the sort is stable, so ties keep
/// their discovery order.
pub struct SocialFetcher {
    chain: ChainExecutor<Vec<SocialPost>>,
    max_posts: usize,
}

impl SocialFetcher {
    pub fn new(chain: ChainExecutor<Vec<SocialPost>>, max_posts: usize) -> Self {
        Self { chain, max_posts }
    }

    pub fn chain(&self) -> &ChainExecutor<Vec<SocialPost>> {
        &self.chain
    }

    pub async fn fetch(&self, symbol: &Symbol, deadline: Option<Instant>) -> SocialResult {
        let outcome = self.chain.run(symbol, deadline).await;

        match outcome.payload {
            Some(mut posts) => {
                posts.sort_by(|a, b| b.engagement.cmp(&a.engagement));
                let posts = posts
                    .into_iter()
                    .take(self.max_posts)
                    .map(|post| ScoredPost {
                        sentiment: sentiment::score(&post.excerpt),
                        post,
                    })
                    .collect();

                SocialResult {
                    posts,
                    is_synthetic: false,
                    provenance: ChainReport {
                        tier: outcome.tier,
                        attempts: outcome.attempts,
                    },
                }
            }
            None => {
                info!(%symbol, "social chain exhausted; serving static post");
                SocialResult {
                    posts: vec![static_post(symbol)],
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

fn static_post(symbol: &Symbol) -> ScoredPost {
    ScoredPost {
        post: SocialPost::new(
            format!("No live community discussion found for {symbol}."),
            "marketpulse",
            0,
        )
        .expect("static post is valid"),
        sentiment: SentimentScore::NEUTRAL,
    }
}
