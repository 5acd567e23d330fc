use std::path::PathBuf;

use flexi_logger::{Cleanup, Criterion, FileSpec, Logger, LoggerHandle, Naming};

use crate::config::LoggingConfig;

/// Starts the logger. `RUST_LOG` takes precedence over the configured level.
/// The returned handle must stay alive for file output to be flushed.
pub fn init_logging(config: &LoggingConfig) -> anyhow::Result<LoggerHandle> {
    let logger = Logger::try_with_env_or_str(&config.level)?;
    let Some(path) = config.path.as_ref() else {
        return Ok(logger.log_to_stderr().start()?);
    };
    let log_path = PathBuf::from(path);
    let directory = log_path
        .parent()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));
    let basename = log_path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("agent-batch")
        .to_string();
    let handle = logger
        .log_to_file(FileSpec::default().directory(directory).basename(basename))
        .rotate(
            Criterion::Size(config.rotate_size),
            Naming::Numbers,
            Cleanup::KeepLogFiles(config.rotate_keep),
        )
        .start()?;
    Ok(handle)
}
