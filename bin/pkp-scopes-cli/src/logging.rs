use anyhow::anyhow;
use pkp_scopes_client::config::LoggingConfig;
use std::{ffi::OsStr, path::Path};
use tracing::Level;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{filter::Targets, prelude::*, EnvFilter};

/// Keeps the log file writer alive. Do not do anything with the guard, just
/// make sure it is not dropped before the program ends.
#[derive(Default)]
pub struct LoggingGuards {
    _file_layer_guard: Option<WorkerGuard>,
}

/// Initialize our logging with up to two layers:
/// 1) Log messages from our pkp_scopes* crates at the configured level to
/// standard error.
/// 2) (OPTIONAL) Log all messages (TRACE or higher) from our pkp_scopes* crates
/// as JSON to the path specified by `log_file`.
///
/// `RUST_LOG`, when set, further narrows what both layers see.
pub fn init_logging(config: &LoggingConfig) -> anyhow::Result<LoggingGuards> {
    let env_filter = EnvFilter::try_from_default_env().ok();

    let stdout_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .with_filter(our_targets_filter(config.stdout_log_level));

    let logging_guards = match &config.log_file {
        Some(log_file) => {
            let (log_dir, log_file_name) = get_paths(log_file)?;
            let file_appender = tracing_appender::rolling::never(log_dir, log_file_name);
            let (non_blocking, file_layer_guard) = tracing_appender::non_blocking(file_appender);
            let file_layer = tracing_subscriber::fmt::layer()
                .json()
                .with_writer(non_blocking)
                .with_filter(our_targets_filter(Level::TRACE));

            tracing_subscriber::registry()
                .with(env_filter)
                .with(stdout_layer)
                .with(file_layer)
                .init();

            LoggingGuards {
                _file_layer_guard: Some(file_layer_guard),
            }
        }
        None => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(stdout_layer)
                .init();

            LoggingGuards::default()
        }
    };

    Ok(logging_guards)
}

/// Return the path directory and the file name. Needed for passing to
/// tracing_appender.
fn get_paths(path: &Path) -> anyhow::Result<(&Path, &OsStr)> {
    let dir = path
        .parent()
        .ok_or_else(|| anyhow!("Invalid log file path: {}", path.display()))?;

    let file_name = path
        .file_name()
        .ok_or_else(|| anyhow!("Invalid log file path: {}", path.display()))?;
    Ok((dir, file_name))
}

/// Create filters for logging events originating from our pkp_scopes* crates.
fn our_targets_filter(level: Level) -> Targets {
    Targets::new()
        .with_target("pkp_scopes_cli", level)
        .with_target("pkp_scopes_client", level)
        .with_target("pkp_scopes", level)
}
