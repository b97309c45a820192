//! Provider adapters.
//!
//! One module per upstream source. Each adapter owns its provider's
//! idiosyncratic response shape and translates it into the uniform payload
//! contract; nothing upstream-specific leaks past this boundary.

mod duckduckgo;
mod googlenews;
mod reddit;
mod twelvedata;
mod yahoo;

pub use duckduckgo::{DdgNewsAdapter, DdgSocialAdapter};
pub use googlenews::GoogleNewsAdapter;
pub use reddit::RedditAdapter;
pub use twelvedata::TwelveDataAdapter;
pub use yahoo::YahooQuoteAdapter;
