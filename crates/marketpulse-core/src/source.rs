use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::ValidationError;

/// Canonical provider identifiers used in chain plans and attempt trails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderId {
    Twelvedata,
    Yahoo,
    Googlenews,
    Reddit,
    Ddg,
}

impl ProviderId {
    pub const ALL: [Self; 5] = [
        Self::Twelvedata,
        Self::Yahoo,
        Self::Googlenews,
        Self::Reddit,
        Self::Ddg,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Twelvedata => "twelvedata",
            Self::Yahoo => "yahoo",
            Self::Googlenews => "googlenews",
            Self::Reddit => "reddit",
            Self::Ddg => "ddg",
        }
    }

    /// Named configuration values this provider needs before it may be called.
    pub const fn credential_keys(self) -> &'static [&'static str] {
        match self {
            Self::Twelvedata => &["TWELVE_DATA_API_KEY"],
            Self::Reddit => &["REDDIT_CLIENT_ID", "REDDIT_CLIENT_SECRET"],
            Self::Yahoo | Self::Googlenews | Self::Ddg => &[],
        }
    }
}

impl Display for ProviderId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderId {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "twelvedata" => Ok(Self::Twelvedata),
            "yahoo" => Ok(Self::Yahoo),
            "googlenews" => Ok(Self::Googlenews),
            "reddit" => Ok(Self::Reddit),
            "ddg" => Ok(Self::Ddg),
            other => Err(ValidationError::InvalidProvider {
                value: other.to_owned(),
            }),
        }
    }
}

/// One category of fetched data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SignalKind {
    Price,
    News,
    Social,
}

impl SignalKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Price => "price",
            Self::News => "news",
            Self::Social => "social",
        }
    }
}

impl Display for SignalKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The rank that ultimately produced a chain result.
///
/// Serialized as the provider name, `"fallback-static"`, or `"exhausted"`
/// so downstream consumers can render provenance labels directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    Provider(ProviderId),
    FallbackStatic,
    Exhausted,
}

impl Tier {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Provider(provider) => provider.as_str(),
            Self::FallbackStatic => "fallback-static",
            Self::Exhausted => "exhausted",
        }
    }

    pub const fn is_live(self) -> bool {
        matches!(self, Self::Provider(_))
    }
}

impl Display for Tier {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Tier {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Tier {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        match value.as_str() {
            "fallback-static" => Ok(Self::FallbackStatic),
            "exhausted" => Ok(Self::Exhausted),
            other => ProviderId::from_str(other)
                .map(Self::Provider)
                .map_err(D::Error::custom),
        }
    }
}
