use tracing_subscriber::EnvFilter;

/// Environment variable holding the tracing filter directives.
pub const LOG_ENV: &str = "TUNETAG_LOG";

/// Diagnostics go to stderr so they never interleave with the report on stdout.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    if let Err(err) = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
    {
        eprintln!("tunetag: failed to initialise logging: {err}");
    }
}
