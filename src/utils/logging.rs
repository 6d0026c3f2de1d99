//! Diagnostic logging setup.
//!
//! Logs go to stderr through `tracing`. The `RUST_LOG` environment variable
//! takes precedence; otherwise only warnings from this crate are shown, or
//! everything down to `debug` with `--verbose`.

use std::sync::Once;

use tracing_subscriber::{EnvFilter, fmt};

static TRACING_INIT: Once = Once::new();

/// Initialize the global tracing subscriber. Later calls are no-ops.
pub fn init_tracing(verbose: bool) {
    TRACING_INIT.call_once(|| {
        let default_directive = if verbose {
            "desk_tools=debug"
        } else {
            "desk_tools=warn"
        };

        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(default_directive));

        // Another subscriber may already be installed (e.g. by a test harness).
        let _ = fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .without_time()
            .with_target(false)
            .try_init();
    });
}
