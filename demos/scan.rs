//! Scans a few query templates and logs what the scanner makes of them.
//!
//! Run with:
//!
//! ```text
//! RUST_LOG=trace cargo run --example scan
//! ```
//!
//! Extra templates can be passed as arguments.

use pgph::escape::escape_owned;
use pgph::query::{Template, scan};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

const SAMPLES: &[&str] = &[
    "select %s from %s %% %b",
    "%(k1) %% and %% %(k2) where %(k3)",
    "mixed %(keyword) and %s positional %b",
];

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
        )
        .init();

    let extra: Vec<String> = std::env::args().skip(1).collect();
    let templates = SAMPLES
        .iter()
        .copied()
        .chain(extra.iter().map(String::as_str));

    for query in templates {
        report(query);
    }
}

fn report(query: &str) {
    let bytes = query.as_bytes();

    match scan(bytes) {
        Ok(summary) => info!(query, count = summary.count, style = ?summary.style, "scanned"),
        Err(e) => {
            error!(query, code = e.code(), error = %e, "scan failed");
            return;
        }
    }

    if let Ok(escaped) = escape_owned(bytes) {
        info!(query, escaped = %String::from_utf8_lossy(&escaped), "escaped");
    }

    let converted = Template::parse(bytes).and_then(|template| template.to_postgres());
    match converted {
        Ok(pg) => info!(
            query,
            postgres = %String::from_utf8_lossy(pg.text()),
            params = pg.params().len(),
            "converted"
        ),
        Err(e) => error!(query, error = %e, "conversion failed"),
    }
}
