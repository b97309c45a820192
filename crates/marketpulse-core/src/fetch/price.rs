use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::chain::{ChainExecutor, ChainReport};
use crate::{Currency, PriceQuote, Symbol, Tier};

/// Normalized price signal for one snapshot.
///
/// `currency` always comes from the symbol's market suffix; a provider from
/// another market cannot override it. `is_synthetic` marks the static
/// placeholder tier so consumers never mistake it for live data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceResult {
    pub quote: PriceQuote,
    pub currency: Currency,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub change_percent: Option<f64>,
    pub is_synthetic: bool,
    pub provenance: ChainReport,
}

/// Price signal fetcher: the price chain plus the static final tier.
pub struct PriceFetcher {
    chain: ChainExecutor<PriceQuote>,
}

impl PriceFetcher {
    pub fn new(chain: ChainExecutor<PriceQuote>) -> Self {
        Self { chain }
    }

    pub fn chain(&self) -> &ChainExecutor<PriceQuote> {
        &self.chain
    }

    pub async fn fetch(&self, symbol: &Symbol, deadline: Option<Instant>) -> PriceResult {
        let outcome = self.chain.run(symbol, deadline).await;
        let currency = symbol.currency();

        match outcome.payload {
            Some(quote) => PriceResult {
                change_percent: quote.change_percent(),
                currency,
                is_synthetic: false,
                provenance: ChainReport {
                    tier: outcome.tier,
                    attempts: outcome.attempts,
                },
                quote,
            },
            None => {
                info!(%symbol, "price chain exhausted; serving static placeholder");
                PriceResult {
                    quote: PriceQuote::placeholder(symbol),
                    currency,
                    change_percent: None,
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
