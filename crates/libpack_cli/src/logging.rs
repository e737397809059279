//! Logging is owned by the CLI, library crates only emit `tracing` events.

use tracing::level_filters::LevelFilter;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// `verbosity`: 0 keeps `RUST_LOG` (or warnings), 1 is debug, 2 and more is trace.
pub fn init(verbosity: u8, silent: bool) {
  let filter = match (silent, verbosity) {
    (true, _) => EnvFilter::default().add_directive(LevelFilter::ERROR.into()),
    (false, 0) => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
    (false, 1) => EnvFilter::default().add_directive(LevelFilter::DEBUG.into()),
    (false, _) => EnvFilter::default().add_directive(LevelFilter::TRACE.into()),
  };

  // Fails only if a subscriber is already installed.
  let _ = tracing_subscriber::registry()
    .with(filter)
    .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
    .try_init();
}
