//! Reddit search adapter: the authenticated discussion-forum tier.
//!
//! Uses the client-credentials OAuth flow: one token request with Basic
//! auth, then a search call against `oauth.reddit.com`. Both calls carry
//! the configured user agent; Reddit rejects anonymous-looking clients.

use std::sync::Arc;

use serde::Deserialize;

use crate::http_client::{HttpAuth, HttpClient, HttpRequest};
use crate::provider::{FetchError, ProviderSpec, SignalSource, SourceFuture};
use crate::{SocialPost, Symbol};

const MAX_POSTS: usize = 10;
const EXCERPT_CHARS: usize = 200;

pub struct RedditAdapter {
    spec: ProviderSpec,
    http: Arc<dyn HttpClient>,
    client_id: Option<String>,
    client_secret: Option<String>,
    user_agent: String,
}

impl RedditAdapter {
    pub fn new(
        spec: ProviderSpec,
        http: Arc<dyn HttpClient>,
        client_id: Option<String>,
        client_secret: Option<String>,
        user_agent: impl Into<String>,
    ) -> Self {
        Self {
            spec,
            http,
            client_id: client_id.filter(|value| !value.trim().is_empty()),
            client_secret: client_secret.filter(|value| !value.trim().is_empty()),
            user_agent: user_agent.into(),
        }
    }

    async fn obtain_token(&self, client_id: &str, client_secret: &str) -> Result<String, FetchError> {
        let request = HttpRequest::post("https://www.reddit.com/api/v1/access_token")
            .with_body("grant_type=client_credentials")
            .with_header("content-type", "application/x-www-form-urlencoded")
            .with_header("user-agent", &self.user_agent)
            .with_auth(&HttpAuth::Basic {
                username: client_id.to_owned(),
                password: client_secret.to_owned(),
            })
            .with_timeout_ms(self.spec.timeout.as_millis() as u64);

        let response = self.http.execute(request).await.map_err(FetchError::from)?;
        if !response.is_success() {
            return Err(FetchError::transport(format!(
                "reddit token endpoint returned status {}",
                response.status
            )));
        }

        let token: RedditToken = serde_json::from_str(&response.body).map_err(|error| {
            FetchError::malformed(format!("reddit token response did not parse: {error}"))
        })?;

        token.access_token.ok_or_else(|| {
            FetchError::malformed("reddit token response carries no access_token")
        })
    }

    fn search_url(&self, symbol: &Symbol) -> String {
        let query = format!("{} stock", symbol.base());
        format!(
            "https://oauth.reddit.com/search?q={}&sort=top&t=week&limit={MAX_POSTS}&raw_json=1",
            urlencoding::encode(&query)
        )
    }
}

impl SignalSource for RedditAdapter {
    type Payload = Vec<SocialPost>;

    fn spec(&self) -> &ProviderSpec {
        &self.spec
    }

    fn credentials_ready(&self) -> bool {
        self.client_id.is_some() && self.client_secret.is_some()
    }

    fn fetch<'a>(&'a self, symbol: &'a Symbol) -> SourceFuture<'a, Vec<SocialPost>> {
        Box::pin(async move {
            let (Some(client_id), Some(client_secret)) =
                (self.client_id.as_deref(), self.client_secret.as_deref())
            else {
                return Err(FetchError::missing_credentials(
                    "reddit client id/secret not configured",
                ));
            };

            let token = self.obtain_token(client_id, client_secret).await?;

            let request = HttpRequest::get(self.search_url(symbol))
                .with_header("user-agent", &self.user_agent)
                .with_auth(&HttpAuth::Bearer(token))
                .with_timeout_ms(self.spec.timeout.as_millis() as u64);

            let response = self.http.execute(request).await.map_err(FetchError::from)?;
            if !response.is_success() {
                return Err(FetchError::transport(format!(
                    "reddit search returned status {}",
                    response.status
                )));
            }

            let listing: RedditListing = serde_json::from_str(&response.body).map_err(|error| {
                FetchError::malformed(format!("reddit listing did not parse: {error}"))
            })?;

            Ok(normalize_listing(listing))
        })
    }
}

#[derive(Debug, Deserialize)]
struct RedditToken {
    #[serde(default)]
    access_token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RedditListing {
    #[serde(default)]
    data: Option<RedditListingData>,
}

#[derive(Debug, Deserialize)]
struct RedditListingData {
    #[serde(default)]
    children: Vec<RedditChild>,
}

#[derive(Debug, Deserialize)]
struct RedditChild {
    #[serde(default)]
    data: Option<RedditPost>,
}

#[derive(Debug, Deserialize)]
struct RedditPost {
    #[serde(default)]
    title: String,
    #[serde(default)]
    subreddit: String,
    #[serde(default)]
    score: i64,
    #[serde(default)]
    selftext: String,
}

fn normalize_listing(listing: RedditListing) -> Vec<SocialPost> {
    let children = listing
        .data
        .map(|data| data.children)
        .unwrap_or_default();

    children
        .into_iter()
        .filter_map(|child| child.data)
        .filter_map(|post| {
            let excerpt = build_excerpt(&post.title, &post.selftext);
            let community = if post.subreddit.is_empty() {
                String::from("reddit")
            } else {
                format!("r/{}", post.subreddit)
            };
            // Downvoted-below-zero posts count as zero engagement.
            let engagement = post.score.max(0) as u64;
            SocialPost::new(excerpt, community, engagement).ok()
        })
        .take(MAX_POSTS)
        .collect()
}

fn build_excerpt(title: &str, selftext: &str) -> String {
    let body: String = selftext.chars().take(EXCERPT_CHARS).collect();
    let body = body.trim();
    if body.is_empty() {
        title.to_owned()
    } else {
        format!("{title} {body}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http_client::{HttpError, HttpResponse};
    use crate::{FailureReason, ProviderId, SignalKind};
    use std::sync::Mutex;
    use std::time::Duration;

    /// Replays one scripted response per call, in order.
    struct SequencedHttpClient {
        responses: Mutex<Vec<Result<HttpResponse, HttpError>>>,
        requests: Mutex<Vec<HttpRequest>>,
    }

    impl SequencedHttpClient {
        fn new(responses: Vec<Result<HttpResponse, HttpError>>) -> Arc<Self> {
            Arc::new(Self {
                responses: Mutex::new(responses),
                requests: Mutex::new(Vec::new()),
            })
        }

        fn recorded_requests(&self) -> Vec<HttpRequest> {
            self.requests
                .lock()
                .expect("request store should not be poisoned")
                .clone()
        }
    }

    impl HttpClient for SequencedHttpClient {
        fn execute<'a>(
            &'a self,
            request: HttpRequest,
        ) -> std::pin::Pin<
            Box<dyn std::future::Future<Output = Result<HttpResponse, HttpError>> + Send + 'a>,
        > {
            self.requests
                .lock()
                .expect("request store should not be poisoned")
                .push(request);
            let mut responses = self
                .responses
                .lock()
                .expect("response store should not be poisoned");
            let response = if responses.is_empty() {
                Err(HttpError::new("no scripted response left"))
            } else {
                responses.remove(0)
            };
            Box::pin(async move { response })
        }
    }

    fn spec() -> ProviderSpec {
        ProviderSpec::new(
            ProviderId::Reddit,
            SignalKind::Social,
            1,
            Duration::from_secs(6),
        )
    }

    fn adapter(client: Arc<SequencedHttpClient>) -> RedditAdapter {
        RedditAdapter::new(
            spec(),
            client,
            Some(String::from("client-id")),
            Some(String::from("client-secret")),
            "marketpulse-test/0.1",
        )
    }

    fn symbol() -> Symbol {
        Symbol::parse("TSLA").expect("valid symbol")
    }

    const TOKEN_BODY: &str = r#"{"access_token": "tok-123", "token_type": "bearer"}"#;
    const LISTING_BODY: &str = r#"{"data": {"children": [
        {"data": {"title": "TSLA to the moon", "subreddit": "wallstreetbets", "score": 2300, "selftext": ""}},
        {"data": {"title": "Valuation check", "subreddit": "stocks", "score": 856, "selftext": "Is growth priced in?"}}
    ]}}"#;

    #[tokio::test]
    async fn authenticates_then_searches() {
        let client = SequencedHttpClient::new(vec![
            Ok(HttpResponse::ok_json(TOKEN_BODY)),
            Ok(HttpResponse::ok_json(LISTING_BODY)),
        ]);
        let posts = adapter(client.clone())
            .fetch(&symbol())
            .await
            .expect("search should succeed");

        assert_eq!(posts.len(), 2);
        assert_eq!(posts[0].community, "r/wallstreetbets");
        assert_eq!(posts[0].engagement, 2300);
        assert!(posts[1].excerpt.contains("Is growth priced in?"));

        let requests = client.recorded_requests();
        assert_eq!(requests.len(), 2);
        assert!(requests[0].url.ends_with("/api/v1/access_token"));
        assert!(requests[0]
            .headers
            .get("authorization")
            .is_some_and(|value| value.starts_with("Basic ")));
        assert!(requests[1].url.contains("oauth.reddit.com/search"));
        assert_eq!(
            requests[1].headers.get("authorization").map(String::as_str),
            Some("Bearer tok-123")
        );
    }

    #[tokio::test]
    async fn missing_credentials_never_hit_the_network() {
        let client = SequencedHttpClient::new(Vec::new());
        let adapter = RedditAdapter::new(spec(), client.clone(), None, None, "ua");

        assert!(!adapter.credentials_ready());
        let error = adapter.fetch(&symbol()).await.expect_err("must fail");
        assert_eq!(error.reason(), FailureReason::MissingCredentials);
        assert!(client.recorded_requests().is_empty());
    }

    #[tokio::test]
    async fn rejected_token_request_maps_to_transport_error() {
        let client = SequencedHttpClient::new(vec![Ok(HttpResponse {
            status: 401,
            body: String::from("{}"),
        })]);

        let error = adapter(client).fetch(&symbol()).await.expect_err("must fail");
        assert_eq!(error.reason(), FailureReason::TransportError);
    }

    #[tokio::test]
    async fn token_without_access_token_is_malformed() {
        let client = SequencedHttpClient::new(vec![Ok(HttpResponse::ok_json(
            r#"{"error": "invalid_grant"}"#,
        ))]);

        let error = adapter(client).fetch(&symbol()).await.expect_err("must fail");
        assert_eq!(error.reason(), FailureReason::MalformedResponse);
    }

    #[tokio::test]
    async fn empty_listing_returns_empty_vec_for_chain_policy() {
        let client = SequencedHttpClient::new(vec![
            Ok(HttpResponse::ok_json(TOKEN_BODY)),
            Ok(HttpResponse::ok_json(r#"{"data": {"children": []}}"#)),
        ]);

        let posts = adapter(client)
            .fetch(&symbol())
            .await
            .expect("empty listing still parses");
        assert!(posts.is_empty());
    }

    #[test]
    fn excerpt_truncates_long_selftext() {
        let long_body = "x".repeat(1000);
        let excerpt = build_excerpt("Title", &long_body);
        assert!(excerpt.chars().count() <= EXCERPT_CHARS + "Title ".chars().count());
    }

    #[test]
    fn negative_score_counts_as_zero_engagement() {
        let listing = RedditListing {
            data: Some(RedditListingData {
                children: vec![RedditChild {
                    data: Some(RedditPost {
                        title: String::from("Contrarian take"),
                        subreddit: String::from("stocks"),
                        score: -42,
                        selftext: String::new(),
                    }),
                }],
            }),
        };

        let posts = normalize_listing(listing);
        assert_eq!(posts[0].engagement, 0);
    }
}
