//! Tracing setup for the command-line tool

/// Initialize tracing on stderr.
///
/// `RUST_LOG` wins when set; otherwise only warnings are shown, or debug
/// output from this crate when `verbose` is on.
pub fn init_tracing(verbose: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let default = if verbose { "warn,windcfg=debug" } else { "warn" };
        tracing_subscriber::EnvFilter::new(default)
    });

    // A second init (e.g. from tests) keeps the first subscriber
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
