// ---------------------------------------- //
// Re-Exports
// ---------------------------------------- //

pub mod macros {
    pub use tracing::{debug, error, info, trace, warn};
}

// ---------------------------------------- //
// Error
// ---------------------------------------- //

#[derive(thiserror::Error, Debug)]
pub enum LogError {
    #[error(transparent)]
    SetLogger(#[from] tracing_subscriber::util::TryInitError),
}

pub type LogResult<T> = Result<T, LogError>;

// ---------------------------------------- //
// Log
// ---------------------------------------- //

/// Installs the global subscriber.
///
/// `RUST_LOG` wins over `filter` when set; an unparsable filter falls back to `info`.
pub fn init(filter: impl AsRef<str>) -> LogResult<()> {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(filter.as_ref()))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .compact()
                .with_writer(std::io::stderr)
                .with_file(true)
                .with_line_number(true)
                .with_target(true),
        )
        .try_init()
        .map_err(Into::into)
}

// ---------------------------------------- //
// Test
// ---------------------------------------- //
