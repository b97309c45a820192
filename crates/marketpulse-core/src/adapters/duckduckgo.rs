//! DuckDuckGo instant-answer adapters: the anonymous web-search fallbacks.
//!
//! One upstream endpoint serves two tiers: a general web-search news
//! fallback and a `site:reddit.com` discussion lookup for when the
//! authenticated forum tier is unavailable. Neither needs credentials.

use std::sync::Arc;

use serde::Deserialize;

use crate::http_client::{HttpClient, HttpRequest};
use crate::provider::{FetchError, ProviderSpec, SignalSource, SourceFuture};
use crate::{Headline, SocialPost, Symbol};

const MAX_RESULTS: usize = 10;

/// General web search used as the news fallback tier.
pub struct DdgNewsAdapter {
    spec: ProviderSpec,
    http: Arc<dyn HttpClient>,
}

impl DdgNewsAdapter {
    pub fn new(spec: ProviderSpec, http: Arc<dyn HttpClient>) -> Self {
        Self { spec, http }
    }
}

impl SignalSource for DdgNewsAdapter {
    type Payload = Vec<Headline>;

    fn spec(&self) -> &ProviderSpec {
        &self.spec
    }

    fn fetch<'a>(&'a self, symbol: &'a Symbol) -> SourceFuture<'a, Vec<Headline>> {
        Box::pin(async move {
            let query = format!("{} stock news", symbol.base());
            let response = instant_answer(&self.http, &self.spec, &query).await?;

            let headlines = flatten_topics(response.related_topics)
                .into_iter()
                .filter_map(|topic| {
                    let source = host_of(&topic.first_url)
                        .map(str::to_owned)
                        .unwrap_or_else(|| String::from("DuckDuckGo"));
                    Headline::new(topic.text, source, None).ok()
                })
                .take(MAX_RESULTS)
                .collect();

            Ok(headlines)
        })
    }
}

/// `site:reddit.com` discussion lookup used as the anonymous social tier.
/// Search results carry no vote counts, so every post reports zero
/// engagement and keeps its discovery order through the fetcher's stable
/// ranking.
pub struct DdgSocialAdapter {
    spec: ProviderSpec,
    http: Arc<dyn HttpClient>,
}

impl DdgSocialAdapter {
    pub fn new(spec: ProviderSpec, http: Arc<dyn HttpClient>) -> Self {
        Self { spec, http }
    }
}

impl SignalSource for DdgSocialAdapter {
    type Payload = Vec<SocialPost>;

    fn spec(&self) -> &ProviderSpec {
        &self.spec
    }

    fn fetch<'a>(&'a self, symbol: &'a Symbol) -> SourceFuture<'a, Vec<SocialPost>> {
        Box::pin(async move {
            let query = format!("{} stock site:reddit.com", symbol.base());
            let response = instant_answer(&self.http, &self.spec, &query).await?;

            let posts = flatten_topics(response.related_topics)
                .into_iter()
                .filter_map(|topic| {
                    let community = community_of(&topic.first_url);
                    SocialPost::new(topic.text, community, 0).ok()
                })
                .take(MAX_RESULTS)
                .collect();

            Ok(posts)
        })
    }
}

async fn instant_answer(
    http: &Arc<dyn HttpClient>,
    spec: &ProviderSpec,
    query: &str,
) -> Result<DdgResponse, FetchError> {
    let url = format!(
        "https://api.duckduckgo.com/?q={}&format=json&no_redirect=1&no_html=1",
        urlencoding::encode(query)
    );
    let request = HttpRequest::get(url).with_timeout_ms(spec.timeout.as_millis() as u64);
    let response = http.execute(request).await.map_err(FetchError::from)?;

    if !response.is_success() {
        return Err(FetchError::transport(format!(
            "ddg upstream returned status {}",
            response.status
        )));
    }

    serde_json::from_str(&response.body)
        .map_err(|error| FetchError::malformed(format!("ddg response did not parse: {error}")))
}

#[derive(Debug, Deserialize)]
struct DdgResponse {
    #[serde(rename = "RelatedTopics", default)]
    related_topics: Vec<DdgTopic>,
}

/// Topics either carry a result directly or nest a category of further
/// topics; flattening handles both.
#[derive(Debug, Deserialize)]
struct DdgTopic {
    #[serde(rename = "Text", default)]
    text: String,
    #[serde(rename = "FirstURL", default)]
    first_url: String,
    #[serde(rename = "Topics", default)]
    topics: Vec<DdgTopic>,
}

fn flatten_topics(topics: Vec<DdgTopic>) -> Vec<DdgTopic> {
    let mut flat = Vec::new();
    for topic in topics {
        if topic.topics.is_empty() {
            if !topic.text.trim().is_empty() {
                flat.push(topic);
            }
        } else {
            flat.extend(flatten_topics(topic.topics));
        }
    }
    flat
}

fn host_of(url: &str) -> Option<&str> {
    let rest = url.strip_prefix("https://").or_else(|| url.strip_prefix("http://"))?;
    let host = rest.split('/').next()?;
    if host.is_empty() {
        None
    } else {
        Some(host)
    }
}

/// Extract `r/<name>` from a reddit URL, falling back to plain "reddit".
fn community_of(url: &str) -> String {
    url.split("/r/")
        .nth(1)
        .and_then(|rest| rest.split('/').next())
        .filter(|name| !name.is_empty())
        .map(|name| format!("r/{name}"))
        .unwrap_or_else(|| String::from("reddit"))
}
