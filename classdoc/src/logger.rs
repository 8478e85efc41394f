//! Logging setup on top of `tracing-subscriber`.
//!
//! Everything goes to stderr so single-file mode can write the page to stdout.

use std::io::IsTerminal;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install the global subscriber. Call once, before anything logs.
///
/// With neither `verbose` nor `quiet`, `RUST_LOG` is honored and the default
/// is `info`.
pub fn init_logger(verbose: bool, quiet: bool) {
    let filter = if verbose {
        EnvFilter::new("classdoc=debug")
    } else if quiet {
        EnvFilter::new("classdoc=error")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("classdoc=info"))
    };

    let fmt_layer = fmt::layer()
        .with_target(false)
        .without_time()
        .with_ansi(std::io::stderr().is_terminal())
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}
