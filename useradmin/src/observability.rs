//! Tracing setup
//!
//! Log lines always go to stderr so that tables and JSON printed on stdout
//! stay machine-readable.

use tracing_subscriber::EnvFilter;

use crate::config::{LogConfig, LogFormat};

/// Initialize tracing from the log configuration
///
/// `RUST_LOG`, when set, takes precedence over the configured level.
/// Calling this twice is harmless; the second subscriber is ignored.
pub fn init_tracing(config: &LogConfig) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    let result = match config.format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Pretty => builder.compact().try_init(),
    };

    if result.is_ok() {
        tracing::debug!("Tracing initialized ({:?}, level {})", config.format, config.level);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_tracing_twice_does_not_panic() {
        let config = LogConfig::default();
        init_tracing(&config);
        init_tracing(&LogConfig {
            level: "not a [valid directive".to_string(),
            format: LogFormat::Json,
        });
    }
}
