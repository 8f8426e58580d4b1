use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "info";

/// Install the process-wide subscriber. `log` records from the library are
/// bridged into it. Output goes to stderr so stdout stays machine-readable.
///
/// `RUST_LOG` wins over `level`; both fall back to `info`.
pub fn init(level: Option<&str>) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level.unwrap_or(DEFAULT_FILTER)))
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let result = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();

    if let Err(e) = result {
        eprintln!("[Logging] Subscriber already installed: {}", e);
    }
}
