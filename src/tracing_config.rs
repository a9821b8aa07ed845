//! Tracing setup for the sharpfix binary.
//!
//! `SHARPFIX_LOG_FORMAT` picks the output:
//!
//! - `text` (default): flat `tracing-subscriber` lines
//! - `tree`: indented spans and events via `tracing-tree`
//! - `json`: one JSON object per event
//!
//! ```bash
//! SHARPFIX_LOG=debug sharpfix apply fixture.json --index 0
//! SHARPFIX_LOG=sharpfix_implement::placement=trace SHARPFIX_LOG_FORMAT=tree sharpfix actions fixture.json
//! ```
//!
//! Nothing is installed unless `SHARPFIX_LOG` or `RUST_LOG` is set.

use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, Registry, fmt};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Tree,
    Json,
}

impl LogFormat {
    pub fn parse(value: &str) -> Self {
        match value.to_lowercase().as_str() {
            "tree" => Self::Tree,
            "json" => Self::Json,
            _ => Self::Text,
        }
    }

    fn from_env() -> Self {
        Self::parse(&std::env::var("SHARPFIX_LOG_FORMAT").unwrap_or_default())
    }
}

/// `SHARPFIX_LOG` wins over `RUST_LOG`.
fn build_filter() -> EnvFilter {
    match std::env::var("SHARPFIX_LOG") {
        Ok(value) => EnvFilter::builder().parse_lossy(value),
        Err(_) => EnvFilter::from_default_env(),
    }
}

/// Install the global subscriber, writing to stderr. A no-op when neither
/// variable is set.
pub fn init_tracing() {
    if std::env::var_os("SHARPFIX_LOG").is_none() && std::env::var_os("RUST_LOG").is_none() {
        return;
    }

    let filter = build_filter();
    match LogFormat::from_env() {
        LogFormat::Tree => {
            let tree_layer = tracing_tree::HierarchicalLayer::default()
                .with_writer(std::io::stderr)
                .with_indent_amount(2)
                .with_indent_lines(true)
                .with_targets(true);
            Registry::default().with(filter).with(tree_layer).init();
        }
        LogFormat::Json => {
            let json_layer = fmt::layer().json().with_writer(std::io::stderr);
            Registry::default().with(filter).with(json_layer).init();
        }
        LogFormat::Text => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}

#[cfg(test)]
#[path = "tests/tracing_config_tests.rs"]
mod tests;
