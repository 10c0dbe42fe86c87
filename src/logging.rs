//! Tracing subscriber initialization.
//!
//! Logs go to stderr so stdout carries only the rendered page. `RUST_LOG`
//! wins when set; otherwise the level is `warn`, or `debug` with `--verbose`.

use tracing_subscriber::EnvFilter;

use crate::error::RosterError;

pub fn default_directive(verbose: bool) -> &'static str {
    if verbose { "roster=debug" } else { "warn" }
}

pub fn init(verbose: bool) -> Result<(), RosterError> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| RosterError::Logging(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbose_raises_crate_level() {
        assert_eq!(default_directive(false), "warn");
        assert_eq!(default_directive(true), "roster=debug");
    }

    #[test]
    fn second_init_fails() {
        let _ = init(false);
        assert!(matches!(init(false), Err(RosterError::Logging(_))));
    }
}
