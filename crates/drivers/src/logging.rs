use tracing_subscriber::EnvFilter;

/// `RUST_LOG` wins when set; otherwise boardkit crates log at `level`.
pub fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "warn,boardkit={level},boardkit_application={level},boardkit_adapters={level}"
        ))
    });

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .try_init();
}
