use std::{fs::File, path::Path, sync::Mutex};

use anyhow::Context as _;
use tracing::Level;
use tracing_subscriber::{EnvFilter, filter::LevelFilter, fmt, prelude::*};

/// Maps the `-v` count to the default log level.
pub(crate) fn verbosity_level(verbose: u8) -> Level {
    match verbose {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

/// Installs the global subscriber.
///
/// The terminal UI owns stdout, so logs only go to `log_file`. Without one
/// no subscriber is installed. `RUST_LOG` directives refine the level chosen
/// by `verbose`.
pub(crate) fn init(verbose: u8, log_file: Option<&Path>) -> anyhow::Result<()> {
    let Some(path) = log_file else {
        return Ok(());
    };
    let file = File::create(path)
        .with_context(|| format!("Failed to create log file: {}", path.display()))?;

    let level = verbosity_level(verbose);
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::from_level(level).into())
        .from_env_lossy();

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .with(filter)
        .try_init()
        .context("Failed to install log subscriber")?;

    tracing::info!(%level, path = %path.display(), "logging initialized");
    Ok(())
}
