// Shared helpers for the integration tests
//
// Each test binary compiles this module separately and uses a different part
// of it.
#![allow(dead_code)]

pub mod fake_shop;

use tracing_subscriber::EnvFilter;

/// Installs a test-friendly subscriber once per binary. `RUST_LOG` selects the
/// level (default: warn).
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_test_writer()
        .try_init();
}
