use std::io;

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Environment variable holding the log filter, e.g. `PILE_LOG=debug`
pub const LOG_ENV: &str = "PILE_LOG";

/// Diagnostics go to stderr so they never mix with docker's table output.
pub fn init_logger() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(io::stderr)
                .with_target(false)
                .without_time()
                .compact(),
        )
        .try_init();
}
