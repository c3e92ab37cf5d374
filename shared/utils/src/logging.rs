use anyhow::Result;
use std::sync::Mutex;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::LoggingConfig;

/// Install the global subscriber. Console output goes to stderr so that
/// stdout only carries the completion message.
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let registry = tracing_subscriber::registry().with(env_filter);

    match config.format.as_str() {
        "json" => {
            let fmt_layer = fmt::layer().json().with_target(false);

            if let Some(file_path) = &config.file_path {
                let file = open_log_file(file_path)?;
                registry.with(fmt_layer.with_writer(Mutex::new(file))).try_init()?;
            } else {
                registry.with(fmt_layer.with_writer(std::io::stderr)).try_init()?;
            }
        }
        _ => {
            let fmt_layer = fmt::layer().with_target(false);

            if let Some(file_path) = &config.file_path {
                let file = open_log_file(file_path)?;
                registry
                    .with(fmt_layer.with_ansi(false).with_writer(Mutex::new(file)))
                    .try_init()?;
            } else {
                registry.with(fmt_layer.with_writer(std::io::stderr)).try_init()?;
            }
        }
    }

    tracing::debug!(level = %config.level, format = %config.format, "Logging initialized");
    Ok(())
}

fn open_log_file(file_path: &str) -> Result<std::fs::File> {
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(file_path)?;
    Ok(file)
}
