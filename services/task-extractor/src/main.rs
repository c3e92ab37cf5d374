//! BoQ Task Extractor
//!
//! Reads the first sheet of the contract bill of quantities and writes the
//! project task list as CSV. Paths come from configuration; see `AppConfig`.

use anyhow::{Context, Result};
use tracing::info;

use boq_utils::{extract_file, init_logging, AppConfig};

fn main() -> Result<()> {
    let config = AppConfig::load().context("Failed to load configuration")?;
    init_logging(&config.logging)?;
    info!("Starting BoQ task extraction");

    let report = extract_file(&config.extractor).with_context(|| {
        format!(
            "Failed to extract tasks from {}",
            config.extractor.input_path
        )
    })?;

    println!(
        "Exported {} with {} rows.",
        report.output_path.display(),
        report.record_count
    );
    Ok(())
}
