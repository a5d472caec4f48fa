//! Diagnostic logging setup.
//!
//! Logs go to stderr so stdout carries only the report. `RUST_LOG` wins when
//! set; otherwise the level is `warn`, or `debug` for this crate with
//! `--verbose`.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn default_directive(verbose: bool) -> &'static str {
    if verbose {
        "warn,si_usage_report=debug"
    } else {
        "warn"
    }
}

fn env_filter(verbose: bool) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)))
}

/// Installs the global subscriber. Safe to call more than once; later calls
/// are ignored.
pub fn init(verbose: bool) {
    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(verbose);

    let _ = tracing_subscriber::registry()
        .with(env_filter(verbose))
        .with(stderr_layer)
        .try_init();
}
