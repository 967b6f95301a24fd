//! Logger setup for the Rage command-line tools.
//!
//! Logs go to stderr so stdout carries only program output. The level comes
//! from the `RAGE_LOG` environment variable when set, otherwise from the
//! number of `-v` flags.

use tracing_subscriber::{
    EnvFilter, filter::LevelFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt,
};

/// Environment variable holding an explicit filter, e.g. `rage_codegen=trace`.
pub const LOG_ENV: &str = "RAGE_LOG";

/// Maps `-v` occurrences to a level: none is `warn`, up to `trace`.
#[must_use]
pub const fn level_for_verbosity(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

/// Builds the filter, preferring a valid `RAGE_LOG` directive.
#[must_use]
pub fn filter_for(verbosity: u8, directive: Option<&str>) -> EnvFilter {
    directive
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::default().add_directive(level_for_verbosity(verbosity).into()))
}

/// Installs the global subscriber. Later calls are ignored.
pub fn init(verbosity: u8) {
    let directive = std::env::var(LOG_ENV).ok();
    let filter = filter_for(verbosity, directive.as_deref());

    let layer = fmt::layer()
        .without_time()
        .with_target(verbosity >= 2)
        .with_writer(std::io::stderr)
        .compact();

    // Fails only if a subscriber is already installed.
    let _ = tracing_subscriber::registry().with(filter).with(layer).try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbosity_levels() {
        assert_eq!(level_for_verbosity(0), LevelFilter::WARN);
        assert_eq!(level_for_verbosity(1), LevelFilter::INFO);
        assert_eq!(level_for_verbosity(2), LevelFilter::DEBUG);
        assert_eq!(level_for_verbosity(7), LevelFilter::TRACE);
    }

    #[test]
    fn test_env_directive_wins() {
        let filter = filter_for(0, Some("rage_codegen=trace"));
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::TRACE));

        let fallback = filter_for(1, None);
        assert_eq!(fallback.max_level_hint(), Some(LevelFilter::INFO));
    }

    #[test]
    fn test_init_twice_is_harmless() {
        init(0);
        init(3);
    }
}
