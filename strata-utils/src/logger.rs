//! Logging bootstrap.
//!
//! Library crates log through the `log` facade. Hosts call [`init`] once to
//! install a `tracing` fmt subscriber and route `log` records into it.

use std::sync::Once;

use tracing_subscriber::EnvFilter;

static INIT: Once = Once::new();

/// Default filter used when `RUST_LOG` is not set.
pub const DEFAULT_FILTER: &str = "info";

/// Installs the global subscriber.
///
/// `filter` is used when the `RUST_LOG` environment variable is absent or
/// invalid. Calling this more than once is harmless; only the first call
/// has an effect.
pub fn init(filter: &str) {
    INIT.call_once(|| {
        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

        // `try_init` also installs the `tracing-log` bridge for `log` records.
        if let Err(err) = tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(true)
            .try_init()
        {
            log::debug!("logger already installed: {err}");
        }
    });
}

/// Installs a subscriber that writes through the test harness capture.
pub fn init_for_tests() {
    INIT.call_once(|| {
        if let Err(err) = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::new("debug"))
            .with_test_writer()
            .try_init()
        {
            log::debug!("logger already installed: {err}");
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_is_idempotent() {
        init_for_tests();
        init(DEFAULT_FILTER);
        log::info!("logger initialised");
        tracing::info!("tracing initialised");
    }
}
