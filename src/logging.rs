//! Tracing initialization for tests and downstream binaries.
//!
//! Provides centralized tracing setup with environment-based filtering,
//! mirroring the rest of this crate's ambient conventions: structured
//! logging everywhere, no ad-hoc `println!` debugging.

#[cfg(test)]
use once_cell::sync::Lazy;

/// Initialize tracing for tests with environment-based filtering.
///
/// Uses `RUST_LOG` to control output, e.g. `RUST_LOG=nr_ldpc_fec=debug` or
/// `RUST_LOG=nr_ldpc_fec::decoder=trace`. Safe to call from every test that
/// wants tracing output; only the first call actually installs a subscriber.
#[cfg(test)]
pub fn init_test_tracing() {
    static TRACING: Lazy<()> = Lazy::new(|| {
        use tracing_subscriber::{fmt, EnvFilter};

        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("nr_ldpc_fec=warn"));

        fmt()
            .with_env_filter(filter)
            .with_target(true)
            .with_thread_ids(false)
            .with_line_number(true)
            .with_test_writer()
            .init();
    });

    Lazy::force(&TRACING);
}

/// Initialize tracing for downstream binaries. Call once, early in `main()`.
pub fn init_tracing() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("nr_ldpc_fec=info"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .with_line_number(true)
        .init();
}
