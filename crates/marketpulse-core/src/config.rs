//! Process-wide configuration.
//!
//! Everything an adapter or chain needs is resolved here, once, at startup:
//! [`AppConfig::from_env`] is the single place the environment is read.
//! Adapters receive their credentials at construction and never consult the
//! environment from inside fetch logic. Absence of a credential is a normal
//! handled condition, not a startup failure.

use std::env;
use std::time::Duration;

use crate::provider::ProviderSpec;
use crate::{ProviderId, SignalKind};

const DEFAULT_PRICE_TIMEOUT: Duration = Duration::from_secs(5);
const DEFAULT_NEWS_TIMEOUT: Duration = Duration::from_secs(6);
const DEFAULT_SOCIAL_TIMEOUT: Duration = Duration::from_secs(6);
const DEFAULT_TOTAL_DEADLINE: Duration = Duration::from_secs(20);

const DEFAULT_MAX_NEWS_ITEMS: usize = 5;
const DEFAULT_MAX_SOCIAL_POSTS: usize = 5;

/// Credentials for the authenticated providers. All optional.
#[derive(Debug, Clone, Default)]
pub struct Credentials {
    pub twelvedata_api_key: Option<String>,
    pub reddit_client_id: Option<String>,
    pub reddit_client_secret: Option<String>,
    pub reddit_user_agent: String,
}

impl Credentials {
    /// Read credentials from the environment. Each value is looked up under
    /// a `MARKETPULSE_`-prefixed name first, then the provider's
    /// conventional name.
    pub fn from_env() -> Self {
        Self {
            twelvedata_api_key: env_var("MARKETPULSE_TWELVEDATA_API_KEY", "TWELVE_DATA_API_KEY"),
            reddit_client_id: env_var("MARKETPULSE_REDDIT_CLIENT_ID", "REDDIT_CLIENT_ID"),
            reddit_client_secret: env_var(
                "MARKETPULSE_REDDIT_CLIENT_SECRET",
                "REDDIT_CLIENT_SECRET",
            ),
            reddit_user_agent: env_var("MARKETPULSE_REDDIT_USER_AGENT", "REDDIT_USER_AGENT")
                .unwrap_or_else(|| String::from("marketpulse/0.1")),
        }
    }

    /// Whether the named credential key is present.
    pub fn has(&self, key: &str) -> bool {
        match key {
            "TWELVE_DATA_API_KEY" => self.twelvedata_api_key.is_some(),
            "REDDIT_CLIENT_ID" => self.reddit_client_id.is_some(),
            "REDDIT_CLIENT_SECRET" => self.reddit_client_secret.is_some(),
            _ => false,
        }
    }

    /// Whether every credential a provider declares is present.
    pub fn satisfies(&self, spec: &ProviderSpec) -> bool {
        spec.credential_keys.iter().all(|key| self.has(key))
    }
}

fn env_var(primary: &str, fallback: &str) -> Option<String> {
    env::var(primary)
        .or_else(|_| env::var(fallback))
        .ok()
        .filter(|value| !value.trim().is_empty())
}

/// Ordered provider chains, one per signal kind.
///
/// This is the canonical ordering that resolves the upstream divergence:
/// priorities are explicit configuration, so a deployment can reorder
/// tiers without code changes.
#[derive(Debug, Clone)]
pub struct ChainPlan {
    pub price: Vec<ProviderSpec>,
    pub news: Vec<ProviderSpec>,
    pub social: Vec<ProviderSpec>,
}

impl Default for ChainPlan {
    fn default() -> Self {
        Self {
            price: vec![
                ProviderSpec::new(
                    ProviderId::Twelvedata,
                    SignalKind::Price,
                    1,
                    DEFAULT_PRICE_TIMEOUT,
                ),
                ProviderSpec::new(ProviderId::Yahoo, SignalKind::Price, 2, DEFAULT_PRICE_TIMEOUT),
            ],
            news: vec![
                ProviderSpec::new(
                    ProviderId::Googlenews,
                    SignalKind::News,
                    1,
                    DEFAULT_NEWS_TIMEOUT,
                ),
                ProviderSpec::new(ProviderId::Ddg, SignalKind::News, 2, DEFAULT_NEWS_TIMEOUT),
            ],
            social: vec![
                ProviderSpec::new(
                    ProviderId::Reddit,
                    SignalKind::Social,
                    1,
                    DEFAULT_SOCIAL_TIMEOUT,
                ),
                ProviderSpec::new(ProviderId::Ddg, SignalKind::Social, 2, DEFAULT_SOCIAL_TIMEOUT),
            ],
        }
    }
}

impl ChainPlan {
    pub fn for_kind(&self, kind: SignalKind) -> &[ProviderSpec] {
        match kind {
            SignalKind::Price => &self.price,
            SignalKind::News => &self.news,
            SignalKind::Social => &self.social,
        }
    }
}

/// Result-size caps applied by the fetchers.
#[derive(Debug, Clone, Copy)]
pub struct FetchLimits {
    pub max_news_items: usize,
    pub max_social_posts: usize,
}

impl Default for FetchLimits {
    fn default() -> Self {
        Self {
            max_news_items: DEFAULT_MAX_NEWS_ITEMS,
            max_social_posts: DEFAULT_MAX_SOCIAL_POSTS,
        }
    }
}

/// Immutable application configuration, assembled once at process start.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub credentials: Credentials,
    pub chains: ChainPlan,
    pub limits: FetchLimits,
    /// Request-level deadline for one whole aggregation. `None` disables
    /// the overall cutoff; per-call timeouts still apply.
    pub total_deadline: Option<Duration>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            credentials: Credentials::default(),
            chains: ChainPlan::default(),
            limits: FetchLimits::default(),
            total_deadline: Some(DEFAULT_TOTAL_DEADLINE),
        }
    }
}

impl AppConfig {
    /// Build the production configuration: default chain plan and limits,
    /// credentials from the environment.
    pub fn from_env() -> Self {
        Self {
            credentials: Credentials::from_env(),
            ..Self::default()
        }
    }

    pub fn with_credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = credentials;
        self
    }

    pub fn with_total_deadline(mut self, deadline: Option<Duration>) -> Self {
        self.total_deadline = deadline;
        self
    }

    pub fn with_limits(mut self, limits: FetchLimits) -> Self {
        self.limits = limits;
        self
    }
}
