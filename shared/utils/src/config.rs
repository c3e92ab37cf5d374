use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_INPUT_PATH: &str = "PLHD.xlsx";
pub const DEFAULT_OUTPUT_PATH: &str = "project_tasks_ready.csv";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub extractor: ExtractorConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractorConfig {
    /// Source bill-of-quantities workbook (first sheet is read)
    pub input_path: String,
    /// Destination CSV
    pub output_path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
    #[serde(default)]
    pub file_path: Option<String>,
}

impl AppConfig {
    /// Load configuration relative to the working directory
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(Path::new("config"))
    }

    /// Load configuration from `config_dir`, falling back to built-in defaults
    pub fn load_from(config_dir: &Path) -> Result<Self, ConfigError> {
        // Load .env file if it exists
        dotenvy::dotenv().ok();

        let config = Self::with_defaults(Config::builder())?
            .add_source(File::from(config_dir.join("default")).required(false))
            // Add local config (gitignored)
            .add_source(File::from(config_dir.join("local")).required(false))
            // BOQ__EXTRACTOR__INPUT_PATH, BOQ__LOGGING__LEVEL, ...
            .add_source(Environment::with_prefix("BOQ").separator("__"));

        config.build()?.try_deserialize()
    }

    fn with_defaults(
        builder: ConfigBuilder<DefaultState>,
    ) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        let defaults = Self::default();
        builder
            .set_default("extractor.input_path", defaults.extractor.input_path)?
            .set_default("extractor.output_path", defaults.extractor.output_path)?
            .set_default("logging.level", defaults.logging.level)?
            .set_default("logging.format", defaults.logging.format)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            extractor: ExtractorConfig::default(),
            logging: LoggingConfig {
                level: "info".to_string(),
                format: "pretty".to_string(),
                file_path: None,
            },
        }
    }
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            input_path: DEFAULT_INPUT_PATH.to_string(),
            output_path: DEFAULT_OUTPUT_PATH.to_string(),
        }
    }
}
