use marketpulse_core::{AppConfig, SentimentScore, Snapshot};

use crate::error::CliError;

pub fn render_snapshot(snapshot: &Snapshot, pretty: bool) -> Result<(), CliError> {
    let json = if pretty {
        serde_json::to_string_pretty(snapshot)?
    } else {
        serde_json::to_string(snapshot)?
    };
    println!("{json}");
    Ok(())
}

pub fn render_sources(config: &AppConfig) {
    for (label, specs) in [
        ("price", &config.chains.price),
        ("news", &config.chains.news),
        ("social", &config.chains.social),
    ] {
        println!("{label}:");
        for spec in specs.iter() {
            let credentials = if spec.credential_keys.is_empty() {
                "none required"
            } else if config.credentials.satisfies(spec) {
                "present"
            } else {
                "MISSING"
            };
            println!(
                "  {}. {:<12} timeout={}ms credentials={credentials}",
                spec.priority,
                spec.id.as_str(),
                spec.timeout.as_millis(),
            );
        }
    }
}

pub fn render_score(text: &str, score: SentimentScore) {
    println!("{score} {} \"{text}\"", score.label());
}
