use std::path::PathBuf;
use thiserror::Error;

/// Typed failures raised by the metric calculators.
///
/// Validators never produce these; structural problems come back as
/// [`ValidationReport`](crate::validation::ValidationReport) data. A
/// calculation error aborts the one calculation that raised it, nothing more.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CalculationError {
    #[error(
        "Period '{period}' not found in P&L data. Available periods: {}. \
         Please ensure the requested period exists in your data.",
        .available_periods.join(", ")
    )]
    MissingPeriod {
        period: String,
        available_periods: Vec<String>,
    },

    #[error(
        "{data_type} is required for {calculation_type} calculation but is not present in P&L data. \
         Please ensure your P&L statement includes {data_type} section."
    )]
    InvalidData {
        data_type: String,
        calculation_type: String,
    },

    #[error(
        "Cannot calculate {calculation_type}: {denominator_type} is zero{}. \
         Division by zero is undefined. Please review your data to ensure {denominator_type} is non-zero.",
        .period.as_deref().map(|p| format!(" for period '{p}'")).unwrap_or_default()
    )]
    ZeroDivision {
        denominator_type: String,
        calculation_type: String,
        period: Option<String>,
    },
}

pub type Result<T> = std::result::Result<T, CalculationError>;

/// Failures from client configuration persistence.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Invalid config path '{}': must be within the config directory", .path.display())]
    PathOutsideConfigDir { path: PathBuf },

    #[error("Malformed configuration: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
