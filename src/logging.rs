use tracing_subscriber::filter::EnvFilter;

/// Install the stderr subscriber. Filter comes from `RUST_LOG`, default `info`.
/// Safe to call more than once; later calls are ignored.
pub fn init_logging() {
    let filter = EnvFilter::builder()
        .with_default_directive(tracing::Level::INFO.into())
        .from_env_lossy();

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
