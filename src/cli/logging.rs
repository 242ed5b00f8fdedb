//! Tracing setup for the agent process

use tracing_subscriber::EnvFilter;

/// Initialize log output on stderr.
///
/// `RUST_LOG` takes precedence when set; otherwise `verbose` picks
/// between debug and info for this crate.
pub fn init(verbose: bool) {
    let default = if verbose {
        "quillshift=debug,info"
    } else {
        "info"
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
