use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use spdlog::sink::{RotatingFileSink, RotationPolicy, Sink, StdStream, StdStreamSink};
use spdlog::{Level, LevelFilter, Logger};

use crate::config::{Config, LogLevel};

impl LogLevel {
    pub fn as_level(self) -> Level {
        match self {
            LogLevel::Critical => Level::Critical,
            LogLevel::Error => Level::Error,
            LogLevel::Warn => Level::Warn,
            LogLevel::Info => Level::Info,
            LogLevel::Debug => Level::Debug,
            LogLevel::Trace => Level::Trace,
        }
    }
}

/// Below warn goes to stdout, warn and above to stderr.
fn terminal_sinks() -> spdlog::Result<Vec<Arc<dyn Sink>>> {
    let progress: Arc<dyn Sink> = Arc::new(StdStreamSink::builder()
        .std_stream(StdStream::Stdout)
        .level_filter(LevelFilter::MoreVerbose(Level::Warn))
        .build()?);
    let problems: Arc<dyn Sink> = Arc::new(StdStreamSink::builder()
        .std_stream(StdStream::Stderr)
        .level_filter(LevelFilter::MoreSevereEqual(Level::Warn))
        .build()?);
    Ok(vec![progress, problems])
}

pub fn default_log_location() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("postmatter")
        .join("log")
        .join("postmatter.log")
}

/// Installs the default logger. Without a `[log]` section, messages only go to the terminal, at info.
pub fn configure_logger(config: &Config) -> spdlog::Result<()> {
    let (sinks, level) = match config.log {
        Some(ref log) => {
            let location = log.location.clone().unwrap_or_else(default_log_location);
            let daily_sink: Arc<dyn Sink> = Arc::new(RotatingFileSink::builder()
                .base_path(location)
                .rotation_policy(RotationPolicy::Daily { hour: 0, minute: 0 })
                .max_files(60)
                .rotate_on_open(false)
                .build()?);
            let mut sinks = vec![daily_sink];
            if log.log_to_console {
                sinks.extend(terminal_sinks()?);
            }
            (sinks, log.level.as_level())
        }
        None => (terminal_sinks()?, Level::Info),
    };

    let logger = Arc::new(Logger::builder().sinks(sinks).build()?);
    logger.set_flush_level_filter(LevelFilter::MoreSevereEqual(Level::Info));
    logger.set_flush_period(Some(Duration::from_secs(2)));
    logger.set_level_filter(LevelFilter::MoreSevereEqual(level));

    spdlog::set_default_logger(logger);

    Ok(())
}
