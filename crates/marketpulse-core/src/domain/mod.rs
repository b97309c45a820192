//! Canonical domain types for marketpulse signals.
//!
//! All models validate their invariants at construction time and carry full
//! serde support, so a [`crate::Snapshot`] can be handed to the UI or the
//! advisory layer as plain JSON.

mod models;
mod symbol;
mod timestamp;

pub use models::{Headline, PriceQuote, SocialPost};
pub use symbol::{Currency, Market, Symbol};
pub use timestamp::UtcDateTime;
