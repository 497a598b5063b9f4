//! Tracing subscriber setup.

use tracing::{Level, subscriber::SetGlobalDefaultError};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Maps a `-v` count onto a [`Level`].
///
/// No flag logs errors only, every additional `v` adds one level up to `TRACE`.
pub const fn verbosity_level(verbosity: u8) -> Level {
    match verbosity {
        0 => Level::ERROR,
        1 => Level::WARN,
        2 => Level::INFO,
        3 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

/// Initializes the global tracing subscriber.
///
/// Uses `env_filter` if given, otherwise the `RUST_LOG` directives, and adds the level
/// selected by `verbosity` on top.
pub fn init_tracing_subscriber(
    verbosity: u8,
    env_filter: Option<impl Into<EnvFilter>>,
) -> Result<(), SetGlobalDefaultError> {
    let filter = env_filter
        .map(Into::into)
        .unwrap_or_else(EnvFilter::from_default_env)
        .add_directive(verbosity_level(verbosity).into());

    let subscriber = tracing_subscriber::registry().with(filter).with(fmt::layer());
    tracing::subscriber::set_global_default(subscriber)
}
