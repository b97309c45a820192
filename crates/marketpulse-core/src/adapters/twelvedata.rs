//! Twelve Data quote adapter: the primary price tier.
//!
//! Twelve Data serves quote fields as numeric strings; normalization parses
//! them here, at the adapter boundary, so the rest of the pipeline only
//! ever sees a validated [`PriceQuote`].

use std::sync::Arc;

use serde::Deserialize;

use crate::http_client::{HttpClient, HttpRequest};
use crate::provider::{FetchError, ProviderSpec, SignalSource, SourceFuture};
use crate::{PriceQuote, Symbol};

pub struct TwelveDataAdapter {
    spec: ProviderSpec,
    http: Arc<dyn HttpClient>,
    api_key: Option<String>,
}

impl TwelveDataAdapter {
    pub fn new(spec: ProviderSpec, http: Arc<dyn HttpClient>, api_key: Option<String>) -> Self {
        Self {
            spec,
            http,
            api_key: api_key.filter(|key| !key.trim().is_empty()),
        }
    }

    fn quote_url(&self, symbol: &Symbol, api_key: &str) -> String {
        format!(
            "https://api.twelvedata.com/quote?symbol={}&apikey={}",
            urlencoding::encode(symbol.as_str()),
            urlencoding::encode(api_key)
        )
    }
}

impl SignalSource for TwelveDataAdapter {
    type Payload = PriceQuote;

    fn spec(&self) -> &ProviderSpec {
        &self.spec
    }

    fn credentials_ready(&self) -> bool {
        self.api_key.is_some()
    }

    fn fetch<'a>(&'a self, symbol: &'a Symbol) -> SourceFuture<'a, PriceQuote> {
        Box::pin(async move {
            let Some(api_key) = self.api_key.as_deref() else {
                return Err(FetchError::missing_credentials(
                    "twelvedata api key not configured",
                ));
            };

            let request = HttpRequest::get(self.quote_url(symbol, api_key))
                .with_timeout_ms(self.spec.timeout.as_millis() as u64);
            let response = self.http.execute(request).await.map_err(FetchError::from)?;

            if !response.is_success() {
                return Err(FetchError::transport(format!(
                    "twelvedata upstream returned status {}",
                    response.status
                )));
            }

            let raw: TwelveDataQuote = serde_json::from_str(&response.body).map_err(|error| {
                FetchError::malformed(format!("twelvedata response did not parse: {error}"))
            })?;

            normalize_quote(symbol, raw)
        })
    }
}

/// Upstream quote shape. Error payloads reuse the same endpoint with
/// `code`/`message` instead of quote fields.
#[derive(Debug, Deserialize)]
struct TwelveDataQuote {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    close: Option<String>,
    #[serde(default)]
    previous_close: Option<String>,
    #[serde(default)]
    high: Option<String>,
    #[serde(default)]
    low: Option<String>,
    #[serde(default)]
    volume: Option<String>,
    #[serde(default)]
    fifty_two_week: Option<TwelveDataFiftyTwoWeek>,
    #[serde(default)]
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TwelveDataFiftyTwoWeek {
    #[serde(default)]
    high: Option<String>,
    #[serde(default)]
    low: Option<String>,
}

fn normalize_quote(symbol: &Symbol, raw: TwelveDataQuote) -> Result<PriceQuote, FetchError> {
    if raw.close.is_none() {
        let detail = raw
            .message
            .unwrap_or_else(|| String::from("quote carries no close price"));
        return Err(FetchError::no_data(format!(
            "twelvedata returned no quote for '{symbol}': {detail}"
        )));
    }

    let last = parse_field("close", raw.close.as_deref())?.ok_or_else(|| {
        FetchError::no_data(format!("twelvedata quote for '{symbol}' has an unusable close"))
    })?;

    let (week52_high, week52_low) = match &raw.fifty_two_week {
        Some(range) => (
            parse_field("fifty_two_week.high", range.high.as_deref())?,
            parse_field("fifty_two_week.low", range.low.as_deref())?,
        ),
        None => (None, None),
    };

    let volume = parse_field("volume", raw.volume.as_deref())?
        .filter(|value| *value >= 0.0)
        .map(|value| value as u64);

    PriceQuote::new(
        raw.name.unwrap_or_else(|| symbol.as_str().to_owned()),
        last,
        parse_field("previous_close", raw.previous_close.as_deref())?,
        parse_field("high", raw.high.as_deref())?,
        parse_field("low", raw.low.as_deref())?,
        week52_high,
        week52_low,
        volume,
        None, // the quote endpoint carries no market cap
    )
    .map_err(|error| FetchError::malformed(format!("twelvedata quote invalid: {error}")))
}

/// Parse one numeric-string field. Absent, blank, and "N/A" values map to
/// `None`; anything else that fails to parse is a malformed response.
fn parse_field(field: &'static str, value: Option<&str>) -> Result<Option<f64>, FetchError> {
    let Some(value) = value else {
        return Ok(None);
    };

    let trimmed = value.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("n/a") {
        return Ok(None);
    }

    trimmed
        .parse::<f64>()
        .map(Some)
        .map_err(|_| FetchError::malformed(format!("twelvedata field '{field}' is not numeric: '{trimmed}'")))
}
