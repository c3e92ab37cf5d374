use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExtractError {
    #[error("I/O error: {path} - {message}")]
    Io { path: String, message: String },

    #[error("Workbook error: {message}")]
    Workbook { message: String },

    #[error("Workbook has no readable sheet: {path}")]
    EmptyWorkbook { path: String },

    #[error("Unsupported input format: {path}")]
    UnsupportedFormat { path: String },

    #[error("Missing expected columns: {}", .columns.join(", "))]
    MissingColumns { columns: Vec<String> },

    #[error("CSV error: {message}")]
    Csv { message: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

impl ExtractError {
    pub fn io(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Io {
            path: path.into(),
            message: message.into(),
        }
    }

    pub fn workbook(message: impl Into<String>) -> Self {
        Self::Workbook {
            message: message.into(),
        }
    }

    pub fn empty_workbook(path: impl Into<String>) -> Self {
        Self::EmptyWorkbook { path: path.into() }
    }

    pub fn unsupported_format(path: impl Into<String>) -> Self {
        Self::UnsupportedFormat { path: path.into() }
    }

    pub fn missing_columns<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::MissingColumns {
            columns: columns.into_iter().map(Into::into).collect(),
        }
    }

    pub fn csv(message: impl Into<String>) -> Self {
        Self::Csv {
            message: message.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Io { .. } => "IO_ERROR",
            Self::Workbook { .. } => "WORKBOOK_ERROR",
            Self::EmptyWorkbook { .. } => "EMPTY_WORKBOOK",
            Self::UnsupportedFormat { .. } => "UNSUPPORTED_FORMAT",
            Self::MissingColumns { .. } => "MISSING_COLUMNS",
            Self::Csv { .. } => "CSV_ERROR",
            Self::Configuration { .. } => "CONFIGURATION_ERROR",
        }
    }
}

pub type ExtractResult<T> = Result<T, ExtractError>;

// Conversion from common error types
impl From<std::io::Error> for ExtractError {
    fn from(error: std::io::Error) -> Self {
        Self::io("<stream>", error.to_string())
    }
}

impl From<calamine::Error> for ExtractError {
    fn from(error: calamine::Error) -> Self {
        Self::workbook(error.to_string())
    }
}

impl From<csv::Error> for ExtractError {
    fn from(error: csv::Error) -> Self {
        Self::csv(error.to_string())
    }
}

impl From<config::ConfigError> for ExtractError {
    fn from(error: config::ConfigError) -> Self {
        Self::configuration(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_columns_message_lists_every_column() {
        let error = ExtractError::missing_columns(["STT", "Khối lượng"]);
        assert_eq!(error.to_string(), "Missing expected columns: STT, Khối lượng");
        assert_eq!(error.error_code(), "MISSING_COLUMNS");
    }

    #[test]
    fn test_io_conversion_keeps_message() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let error = ExtractError::from(io);
        assert_eq!(error.error_code(), "IO_ERROR");
        assert!(error.to_string().contains("no such file"));
    }
}
