//! Logging setup for the invasion binary.

use anyhow::Result;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Default filter when `RUST_LOG` is unset
fn default_filter(debug: bool) -> &'static str {
    if debug {
        "info,invasion_cli=debug,invasion_world=debug"
    } else {
        "info"
    }
}

/// Install the global subscriber. `json` switches the fmt layer to one JSON
/// object per event.
pub fn init_logging(debug: bool, json: bool) -> Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter(debug)));
    let registry = tracing_subscriber::registry().with(filter);

    if json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_target(true))
            .try_init()?;
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_target(true))
            .try_init()?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter_parses() {
        for debug in [false, true] {
            assert!(default_filter(debug).parse::<EnvFilter>().is_ok());
        }
    }
}
