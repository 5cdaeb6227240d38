//! Tracing setup shared by the job binaries.

use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use crate::error::{PrepError, PrepResult};

/// Map a `--log-level` argument to a tracing level. Unknown values fall back to INFO.
pub fn parse_level(log_level: &str) -> Level {
    match log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    }
}

/// Install the global subscriber. `json` switches to line-delimited JSON output.
pub fn init_tracing(log_level: &str, json: bool) -> PrepResult<()> {
    let builder = FmtSubscriber::builder()
        .with_max_level(parse_level(log_level))
        .with_target(true);

    let result = if json {
        tracing::subscriber::set_global_default(builder.json().finish())
    } else {
        tracing::subscriber::set_global_default(builder.finish())
    };

    result.map_err(|e| PrepError::Logging(e.to_string()))
}
