use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::ValidationError;

const MAX_SYMBOL_LEN: usize = 15;

/// Listing market implied by a symbol's exchange suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Market {
    /// National Stock Exchange of India (`.NS`).
    Nse,
    /// Bombay Stock Exchange (`.BO`).
    Bse,
    /// Everything else; quoted in USD.
    Global,
}

impl Market {
    pub const fn currency(self) -> Currency {
        match self {
            Self::Nse | Self::Bse => Currency::Inr,
            Self::Global => Currency::Usd,
        }
    }

    const fn suffix(self) -> Option<&'static str> {
        match self {
            Self::Nse => Some(".NS"),
            Self::Bse => Some(".BO"),
            Self::Global => None,
        }
    }
}

/// Display currency for a quote. Derived from the symbol's market suffix,
/// never from whichever provider happened to answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    Inr,
    Usd,
}

impl Currency {
    pub const fn code(self) -> &'static str {
        match self {
            Self::Inr => "INR",
            Self::Usd => "USD",
        }
    }

    pub const fn glyph(self) -> &'static str {
        match self {
            Self::Inr => "₹",
            Self::Usd => "$",
        }
    }
}

impl Display for Currency {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// Normalized instrument symbol.
///
/// Normalization (trim + uppercase) is idempotent: parsing an already
/// normalized symbol yields the same value. The market suffix is preserved
/// so that `ZOMATO.NS` and a hypothetical US `ZOMATO` stay distinct.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Symbol(String);

impl Symbol {
    /// Parse and normalize a raw symbol string.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::EmptySymbol);
        }

        let normalized = trimmed.to_ascii_uppercase();
        let len = normalized.chars().count();
        if len > MAX_SYMBOL_LEN {
            return Err(ValidationError::SymbolTooLong {
                len,
                max: MAX_SYMBOL_LEN,
            });
        }

        if let Some(first) = normalized.chars().next() {
            if !first.is_ascii_alphabetic() {
                return Err(ValidationError::SymbolInvalidStart { ch: first });
            }
        }

        for (index, ch) in normalized.chars().enumerate() {
            let valid = ch.is_ascii_alphanumeric() || ch == '.' || ch == '-';
            if !valid {
                return Err(ValidationError::SymbolInvalidChar { ch, index });
            }
        }

        Ok(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn market(&self) -> Market {
        if self.0.ends_with(".NS") {
            Market::Nse
        } else if self.0.ends_with(".BO") {
            Market::Bse
        } else {
            Market::Global
        }
    }

    pub fn currency(&self) -> Currency {
        self.market().currency()
    }

    /// The symbol without its market suffix, used as the search term for
    /// news and social providers ("ZOMATO.NS" searches as "ZOMATO").
    pub fn base(&self) -> &str {
        match self.market().suffix() {
            Some(suffix) => self
                .0
                .strip_suffix(suffix)
                .unwrap_or(self.0.as_str()),
            None => self.0.as_str(),
        }
    }
}

impl Display for Symbol {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for Symbol {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl TryFrom<&str> for Symbol {
    type Error = ValidationError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<Symbol> for String {
    fn from(value: Symbol) -> Self {
        value.0
    }
}
