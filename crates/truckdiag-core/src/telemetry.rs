//! Centralised tracing initialisation for Truckdiag binaries.
//!
//! Call [`init_tracing`] once at program start to configure the global
//! subscriber with an `EnvFilter` and optional JSON formatting.

use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter, Layer};

/// Filter directive variable checked before `RUST_LOG`.
pub const LOG_ENV: &str = "TRUCKDIAG_LOG";

/// Initialise the global tracing subscriber.
///
/// * `json` - emit newline-delimited JSON log lines.
/// * `level` - default verbosity when neither `TRUCKDIAG_LOG` nor
///   `RUST_LOG` is set.
///
/// Logs go to stderr; stdout is left to command output.
/// HTTP client internals are capped at `warn` unless a directive says
/// otherwise. Returns `false` when a global subscriber was already set.
pub fn init_tracing(json: bool, level: Level) -> bool {
    let env_filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| default_filter(level));

    let format = if json {
        fmt::layer()
            .with_target(false)
            .with_writer(std::io::stderr)
            .json()
            .boxed()
    } else {
        fmt::layer()
            .with_target(false)
            .with_writer(std::io::stderr)
            .boxed()
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(format)
        .try_init()
        .is_ok()
}

fn default_filter(level: Level) -> EnvFilter {
    EnvFilter::new(format!(
        "{},hyper=warn,hyper_util=warn,reqwest=warn",
        level.as_str().to_ascii_lowercase()
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter_caps_http_noise() {
        let filter = default_filter(Level::DEBUG).to_string();
        assert!(filter.contains("debug"));
        assert!(filter.contains("reqwest=warn"));
    }
}
