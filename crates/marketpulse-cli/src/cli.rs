//! CLI argument definitions for marketpulse.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `snapshot` | Aggregate price, news, and social signals for a symbol |
//! | `sources` | Show the configured provider chains and credential state |
//! | `score` | Run the sentiment scorer on a text string |

use clap::{Parser, Subcommand};

/// Multi-source market signal snapshots with explicit provenance.
#[derive(Debug, Parser)]
#[command(
    name = "marketpulse",
    version,
    about = "Aggregate price, news, and social signals for a symbol",
    long_about = "marketpulse queries independent upstream providers per signal kind \
(price, news, social) in a configured priority order, with per-call timeouts \
and a synthetic fallback tier, and prints one normalized snapshot.\n\
\n\
Degraded tiers are always labeled: check `provenance.tier` and the \
`is_synthetic` flags before treating data as live."
)]
pub struct Cli {
    /// Pretty-print JSON output with indentation.
    #[arg(long, global = true, default_value_t = false)]
    pub pretty: bool,

    /// Request-level deadline in milliseconds for one whole aggregation.
    /// Overrides the configured default; 0 disables the overall cutoff.
    #[arg(long, global = true)]
    pub deadline_ms: Option<u64>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Aggregate all three signals for one symbol and print the snapshot.
    Snapshot {
        /// Instrument symbol, market suffix preserved (TSLA, ZOMATO.NS).
        symbol: String,
    },
    /// Show each signal's provider chain in priority order, with timeouts
    /// and credential presence.
    Sources,
    /// Score a text string with the lexical sentiment scorer.
    Score {
        /// Text to score; quote it to keep it one argument.
        text: String,
    },
}
