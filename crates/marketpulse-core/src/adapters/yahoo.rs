//! Yahoo Finance quote adapter: the anonymous secondary price tier.

use std::sync::Arc;

use serde::Deserialize;

use crate::http_client::{HttpClient, HttpRequest};
use crate::provider::{FetchError, ProviderSpec, SignalSource, SourceFuture};
use crate::{PriceQuote, Symbol};

pub struct YahooQuoteAdapter {
    spec: ProviderSpec,
    http: Arc<dyn HttpClient>,
}

impl YahooQuoteAdapter {
    pub fn new(spec: ProviderSpec, http: Arc<dyn HttpClient>) -> Self {
        Self { spec, http }
    }

    fn quote_url(&self, symbol: &Symbol) -> String {
        format!(
            "https://query1.finance.yahoo.com/v7/finance/quote?symbols={}",
            urlencoding::encode(symbol.as_str())
        )
    }
}

impl SignalSource for YahooQuoteAdapter {
    type Payload = PriceQuote;

    fn spec(&self) -> &ProviderSpec {
        &self.spec
    }

    fn fetch<'a>(&'a self, symbol: &'a Symbol) -> SourceFuture<'a, PriceQuote> {
        Box::pin(async move {
            let request = HttpRequest::get(self.quote_url(symbol))
                .with_header("accept", "application/json")
                .with_timeout_ms(self.spec.timeout.as_millis() as u64);
            let response = self.http.execute(request).await.map_err(FetchError::from)?;

            if !response.is_success() {
                return Err(FetchError::transport(format!(
                    "yahoo upstream returned status {}",
                    response.status
                )));
            }

            let envelope: YahooEnvelope = serde_json::from_str(&response.body).map_err(|error| {
                FetchError::malformed(format!("yahoo response did not parse: {error}"))
            })?;

            normalize_quote(symbol, envelope)
        })
    }
}

#[derive(Debug, Deserialize)]
struct YahooEnvelope {
    #[serde(rename = "quoteResponse")]
    quote_response: Option<YahooQuoteResponse>,
}

#[derive(Debug, Deserialize)]
struct YahooQuoteResponse {
    #[serde(default)]
    result: Vec<YahooQuote>,
    #[serde(default)]
    error: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct YahooQuote {
    #[serde(default)]
    short_name: Option<String>,
    #[serde(default)]
    long_name: Option<String>,
    #[serde(default)]
    regular_market_price: Option<f64>,
    #[serde(default)]
    regular_market_previous_close: Option<f64>,
    #[serde(default)]
    regular_market_day_high: Option<f64>,
    #[serde(default)]
    regular_market_day_low: Option<f64>,
    #[serde(default)]
    fifty_two_week_high: Option<f64>,
    #[serde(default)]
    fifty_two_week_low: Option<f64>,
    #[serde(default)]
    regular_market_volume: Option<u64>,
    #[serde(default)]
    market_cap: Option<f64>,
}

fn normalize_quote(symbol: &Symbol, envelope: YahooEnvelope) -> Result<PriceQuote, FetchError> {
    let Some(quote_response) = envelope.quote_response else {
        return Err(FetchError::malformed(
            "yahoo response is missing the quoteResponse envelope",
        ));
    };

    if let Some(error) = quote_response.error {
        return Err(FetchError::no_data(format!(
            "yahoo reported an error for '{symbol}': {error}"
        )));
    }

    let Some(quote) = quote_response.result.into_iter().next() else {
        return Err(FetchError::no_data(format!(
            "yahoo returned no quote rows for '{symbol}'"
        )));
    };

    let Some(last) = quote.regular_market_price else {
        return Err(FetchError::malformed(format!(
            "yahoo quote for '{symbol}' carries no regular market price"
        )));
    };

    let name = quote
        .long_name
        .or(quote.short_name)
        .unwrap_or_else(|| symbol.as_str().to_owned());

    PriceQuote::new(
        name,
        last,
        quote.regular_market_previous_close,
        quote.regular_market_day_high,
        quote.regular_market_day_low,
        quote.fifty_two_week_high,
        quote.fifty_two_week_low,
        quote.regular_market_volume,
        quote.market_cap,
    )
    .map_err(|error| FetchError::malformed(format!("yahoo quote invalid: {error}")))
}
