//! Logging bootstrap for quillkey
//!
//! All crates log through `tracing`; the embedding host calls `init_logging`
//! once at startup. Level selection follows the `QUILLKEY_LOG` environment
//! variable, falling back to `info`.

use std::sync::Once;

use tracing_subscriber::EnvFilter;

static INIT: Once = Once::new();

/// Initialize the global tracing subscriber.
///
/// Safe to call more than once; only the first call installs a subscriber.
pub fn init_logging() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env("QUILLKEY_LOG")
            .unwrap_or_else(|_| EnvFilter::new("info"));

        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .init();
    });
}
