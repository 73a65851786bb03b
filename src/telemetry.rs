use crate::error::{CareerError, Result};
use tracing_subscriber::EnvFilter;

/// Picks the log filter: `RUST_LOG` wins, then `-q`/`-v` flags, then the
/// configured level.
pub fn filter_directive(verbose: u8, quiet: bool, configured: &str) -> String {
    if quiet {
        return "error".to_string();
    }
    match verbose {
        0 => configured.to_string(),
        1 => "info".to_string(),
        _ => "debug".to_string(),
    }
}

pub fn init(verbose: u8, quiet: bool, configured: &str) -> Result<()> {
    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => {
            let directive = filter_directive(verbose, quiet, configured);
            EnvFilter::try_new(&directive).map_err(|e| {
                CareerError::ConfigParse(format!("invalid log filter '{directive}': {e}"))
            })?
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .with_ansi(false)
        .try_init()
        .map_err(|e| CareerError::ConfigParse(format!("telemetry error: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quiet_overrides_verbosity() {
        assert_eq!(filter_directive(2, true, "info"), "error");
    }

    #[test]
    fn verbosity_raises_configured_level() {
        assert_eq!(filter_directive(0, false, "warn"), "warn");
        assert_eq!(filter_directive(1, false, "warn"), "info");
        assert_eq!(filter_directive(3, false, "warn"), "debug");
    }
}
