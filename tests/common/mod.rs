//! Shared test setup.

use tracing_subscriber::EnvFilter;

/// Routes crate logs to the test writer, filtered by `RUST_LOG`.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
