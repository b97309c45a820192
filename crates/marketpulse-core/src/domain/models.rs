use serde::{Deserialize, Serialize};

use crate::{Symbol, ValidationError};

/// Normalized price payload produced by the price provider adapters.
///
/// Optional fields stay `None` when a provider's quote shape does not carry
/// them; the fetcher layer never fills them in from another source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceQuote {
    pub name: String,
    pub last: f64,
    pub previous_close: Option<f64>,
    pub day_high: Option<f64>,
    pub day_low: Option<f64>,
    pub week52_high: Option<f64>,
    pub week52_low: Option<f64>,
    pub volume: Option<u64>,
    pub market_cap: Option<f64>,
}

impl PriceQuote {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        name: impl Into<String>,
        last: f64,
        previous_close: Option<f64>,
        day_high: Option<f64>,
        day_low: Option<f64>,
        week52_high: Option<f64>,
        week52_low: Option<f64>,
        volume: Option<u64>,
        market_cap: Option<f64>,
    ) -> Result<Self, ValidationError> {
        validate_non_negative("last", last)?;
        validate_optional_non_negative("previous_close", previous_close)?;
        validate_optional_non_negative("day_high", day_high)?;
        validate_optional_non_negative("day_low", day_low)?;
        validate_optional_non_negative("week52_high", week52_high)?;
        validate_optional_non_negative("week52_low", week52_low)?;
        validate_optional_non_negative("market_cap", market_cap)?;

        if let (Some(high), Some(low)) = (day_high, day_low) {
            if high < low {
                return Err(ValidationError::InvalidDayRange);
            }
        }
        if let (Some(high), Some(low)) = (week52_high, week52_low) {
            if high < low {
                return Err(ValidationError::InvalidYearRange);
            }
        }

        Ok(Self {
            name: name.into(),
            last,
            previous_close,
            day_high,
            day_low,
            week52_high,
            week52_low,
            volume,
            market_cap,
        })
    }

    /// The designated static default used when every live price tier fails.
    /// Not derived from any cached live quote.
    pub fn placeholder(symbol: &Symbol) -> Self {
        Self {
            name: format!("{symbol} (data unavailable)"),
            last: 0.0,
            previous_close: None,
            day_high: None,
            day_low: None,
            week52_high: None,
            week52_low: None,
            volume: None,
            market_cap: None,
        }
    }

    /// Day change in percent, when the quote carries a usable previous close.
    pub fn change_percent(&self) -> Option<f64> {
        let prev = self.previous_close?;
        if prev <= 0.0 {
            return None;
        }
        Some(((self.last - prev) / prev) * 100.0)
    }
}

/// One news headline as returned by a news provider adapter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Headline {
    pub title: String,
    pub source: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published: Option<String>,
}

impl Headline {
    pub fn new(
        title: impl Into<String>,
        source: impl Into<String>,
        published: Option<String>,
    ) -> Result<Self, ValidationError> {
        let title = title.into().trim().to_owned();
        if title.is_empty() {
            return Err(ValidationError::EmptyField { field: "title" });
        }

        let source = source.into().trim().to_owned();
        let source = if source.is_empty() {
            String::from("unknown")
        } else {
            source
        };

        Ok(Self {
            title,
            source,
            published,
        })
    }
}

/// One community post excerpt as returned by a social provider adapter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialPost {
    pub excerpt: String,
    pub community: String,
    pub engagement: u64,
}

impl SocialPost {
    pub fn new(
        excerpt: impl Into<String>,
        community: impl Into<String>,
        engagement: u64,
    ) -> Result<Self, ValidationError> {
        let excerpt = excerpt.into().trim().to_owned();
        if excerpt.is_empty() {
            return Err(ValidationError::EmptyField { field: "excerpt" });
        }

        let community = community.into().trim().to_owned();
        let community = if community.is_empty() {
            String::from("unknown")
        } else {
            community
        };

        Ok(Self {
            excerpt,
            community,
            engagement,
        })
    }
}

fn validate_non_negative(field: &'static str, value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::NonFiniteValue { field });
    }
    if value < 0.0 {
        return Err(ValidationError::NegativeValue { field });
    }
    Ok(())
}

fn validate_optional_non_negative(
    field: &'static str,
    value: Option<f64>,
) -> Result<(), ValidationError> {
    match value {
        Some(value) => validate_non_negative(field, value),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_negative_price() {
        let err = PriceQuote::new("Tesla", -1.0, None, None, None, None, None, None, None)
            .expect_err("must fail");
        assert!(matches!(err, ValidationError::NegativeValue { field: "last" }));
    }

    #[test]
    fn rejects_inverted_day_range() {
        let err = PriceQuote::new(
            "Tesla",
            100.0,
            None,
            Some(90.0),
            Some(110.0),
            None,
            None,
            None,
            None,
        )
        .expect_err("must fail");
        assert!(matches!(err, ValidationError::InvalidDayRange));
    }

    #[test]
    fn change_percent_needs_previous_close() {
        let quote = PriceQuote::new("Tesla", 110.0, Some(100.0), None, None, None, None, None, None)
            .expect("valid quote");
        let change = quote.change_percent().expect("has previous close");
        assert!((change - 10.0).abs() < 1e-9);

        let quote = PriceQuote::new("Tesla", 110.0, None, None, None, None, None, None, None)
            .expect("valid quote");
        assert_eq!(quote.change_percent(), None);
    }

    #[test]
    fn placeholder_is_flagged_by_name_and_zero_price() {
        let symbol = Symbol::parse("TSLA").expect("valid symbol");
        let placeholder = PriceQuote::placeholder(&symbol);
        assert_eq!(placeholder.last, 0.0);
        assert!(placeholder.name.contains("TSLA"));
        assert_eq!(placeholder.change_percent(), None);
    }

    #[test]
    fn headline_rejects_blank_title_and_defaults_source() {
        assert!(matches!(
            Headline::new("  ", "Reuters", None),
            Err(ValidationError::EmptyField { field: "title" })
        ));

        let headline = Headline::new("Profits soar", "", None).expect("valid headline");
        assert_eq!(headline.source, "unknown");
    }

    #[test]
    fn social_post_rejects_blank_excerpt() {
        assert!(matches!(
            SocialPost::new("", "wallstreetbets", 10),
            Err(ValidationError::EmptyField { field: "excerpt" })
        ));
    }
}
