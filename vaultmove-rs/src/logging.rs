//! Tracing subscriber setup for the CLI.

use tracing_subscriber::filter::{EnvFilter, LevelFilter};
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;

/// Install a stderr subscriber.
///
/// `RUST_LOG` takes precedence; otherwise the configured level is raised by
/// one step per `-v`. `quiet` forces `error`.
pub fn init(level: &str, verbose: u8, quiet: bool) {
    let base = parse_level(level).unwrap_or(LevelFilter::WARN);
    let effective = if quiet { LevelFilter::ERROR } else { raise(base, verbose) };

    let filter = EnvFilter::builder()
        .with_default_directive(effective.into())
        .from_env_lossy();

    let layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_filter(filter);

    // A global subscriber may already be installed.
    let _ = tracing_subscriber::registry().with(layer).try_init();
}

fn parse_level(s: &str) -> Option<LevelFilter> {
    match s.to_lowercase().as_str() {
        "off" => Some(LevelFilter::OFF),
        "error" => Some(LevelFilter::ERROR),
        "warn" => Some(LevelFilter::WARN),
        "info" => Some(LevelFilter::INFO),
        "debug" => Some(LevelFilter::DEBUG),
        "trace" => Some(LevelFilter::TRACE),
        _ => None,
    }
}

fn raise(level: LevelFilter, steps: u8) -> LevelFilter {
    const LADDER: [LevelFilter; 6] = [
        LevelFilter::OFF,
        LevelFilter::ERROR,
        LevelFilter::WARN,
        LevelFilter::INFO,
        LevelFilter::DEBUG,
        LevelFilter::TRACE,
    ];
    let pos = LADDER.iter().position(|l| *l == level).unwrap_or(2);
    LADDER[(pos + steps as usize).min(LADDER.len() - 1)]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level("error"), Some(LevelFilter::ERROR));
        assert_eq!(parse_level("WARN"), Some(LevelFilter::WARN));
        assert_eq!(parse_level("Info"), Some(LevelFilter::INFO));
        assert_eq!(parse_level("debug"), Some(LevelFilter::DEBUG));
        assert_eq!(parse_level("trace"), Some(LevelFilter::TRACE));
        assert_eq!(parse_level("invalid"), None);
        assert_eq!(parse_level(""), None);
    }

    #[test]
    fn test_raise() {
        assert_eq!(raise(LevelFilter::WARN, 0), LevelFilter::WARN);
        assert_eq!(raise(LevelFilter::WARN, 1), LevelFilter::INFO);
        assert_eq!(raise(LevelFilter::WARN, 2), LevelFilter::DEBUG);
        assert_eq!(raise(LevelFilter::WARN, 9), LevelFilter::TRACE);
    }
}
