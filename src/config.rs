//! Per-client analysis configuration and its JSON persistence.
//!
//! The GUI edits these values between pipeline runs; the core only ever sees
//! the resulting plain data. Schema generation mirrors the statement layout
//! conventions: the published JSON schema is what the form layer renders and
//! validates against.

use crate::error::ConfigError;
use crate::validation::{
    ParameterKind, ParameterSet, ParameterValue, RangeValidationRule, RequiredParametersRule,
    TypeValidationRule, ValidationReport, ValidationRule, Validator,
};
use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Component, Path, PathBuf};

pub const DEFAULT_REVENUE_GROWTH: f64 = 0.05;
pub const DEFAULT_EXPENSE_ADJUSTMENT: f64 = 1.0;
pub const DEFAULT_METHODOLOGY: &str = "Growth from Prior Year";

pub const REVENUE_GROWTH_KEY: &str = "revenue_growth_rate";
pub const EXPENSE_ADJUSTMENT_KEY: &str = "expense_adjustment";
pub const METHODOLOGY_KEY: &str = "budget_methodology";

/// Tunable analysis parameters for one client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct AnalysisParameters {
    #[schemars(
        description = "Expected year-over-year revenue growth as a fraction (-1.0 to 1.0). 0.05 means 5% growth."
    )]
    pub revenue_growth_rate: f64,

    #[schemars(
        description = "Multiplier applied to projected expenses (0.0 to 10.0). 1.0 means no adjustment."
    )]
    pub expense_adjustment: f64,

    #[schemars(description = "Budgeting methodology label shown in generated reports.")]
    pub budget_methodology: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(description = "Date the analysis pipeline last ran for this client, if ever.")]
    pub last_run: Option<NaiveDate>,
}

impl Default for AnalysisParameters {
    fn default() -> Self {
        Self {
            revenue_growth_rate: DEFAULT_REVENUE_GROWTH,
            expense_adjustment: DEFAULT_EXPENSE_ADJUSTMENT,
            budget_methodology: DEFAULT_METHODOLOGY.to_string(),
            last_run: None,
        }
    }
}

impl AnalysisParameters {
    /// Flat key→value view, the input shape of the parameter rules.
    pub fn to_parameter_set(&self) -> ParameterSet {
        ParameterSet::from([
            (
                REVENUE_GROWTH_KEY.to_string(),
                ParameterValue::Number(self.revenue_growth_rate),
            ),
            (
                EXPENSE_ADJUSTMENT_KEY.to_string(),
                ParameterValue::Number(self.expense_adjustment),
            ),
            (
                METHODOLOGY_KEY.to_string(),
                ParameterValue::Text(self.budget_methodology.clone()),
            ),
        ])
    }

    /// The rule stack guarding these parameters.
    pub fn validation_rules() -> Vec<Box<dyn ValidationRule<ParameterSet>>> {
        vec![
            Box::new(RequiredParametersRule::new([
                REVENUE_GROWTH_KEY,
                EXPENSE_ADJUSTMENT_KEY,
                METHODOLOGY_KEY,
            ])),
            Box::new(RangeValidationRule::new(REVENUE_GROWTH_KEY, -1.0, 1.0)),
            Box::new(RangeValidationRule::new(EXPENSE_ADJUSTMENT_KEY, 0.0, 10.0)),
            Box::new(TypeValidationRule::new(METHODOLOGY_KEY, ParameterKind::Text)),
        ]
    }

    pub fn validate(&self) -> ValidationReport {
        Validator::new(Self::validation_rules()).validate(&self.to_parameter_set(), false)
    }
}

/// Stored configuration for one client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ClientConfig {
    #[schemars(description = "Client display name; also names the client's data folder.")]
    pub client_name: String,

    #[serde(default)]
    pub parameters: AnalysisParameters,
}

impl ClientConfig {
    pub fn new(client_name: impl Into<String>) -> Self {
        Self {
            client_name: client_name.into(),
            parameters: AnalysisParameters::default(),
        }
    }

    pub fn schema_as_json() -> Result<String, serde_json::Error> {
        let schema = schemars::schema_for!(ClientConfig);
        serde_json::to_string_pretty(&schema)
    }
}

/// JSON config file I/O rooted at one config directory.
///
/// Every requested path must resolve inside that directory; `..` traversal
/// out of it is rejected before any file is touched.
pub struct ConfigManager {
    config_dir: PathBuf,
}

impl ConfigManager {
    pub fn new(config_dir: impl Into<PathBuf>) -> Self {
        Self {
            config_dir: normalize(&config_dir.into()),
        }
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    pub fn load(&self, filepath: impl AsRef<Path>) -> Result<ClientConfig, ConfigError> {
        let path = self.resolve(filepath.as_ref())?;
        if !path.exists() {
            return Err(ConfigError::NotFound(path));
        }
        let text = fs::read_to_string(&path)?;
        Ok(serde_json::from_str(&text)?)
    }

    pub fn save(&self, config: &ClientConfig, filepath: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = self.resolve(filepath.as_ref())?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let text = serde_json::to_string_pretty(config)?;
        fs::write(&path, text)?;
        Ok(())
    }

    fn resolve(&self, filepath: &Path) -> Result<PathBuf, ConfigError> {
        let candidate = if filepath.is_absolute() {
            filepath.to_path_buf()
        } else {
            self.config_dir.join(filepath)
        };

        let normalized = normalize(&candidate);
        if !normalized.starts_with(&self.config_dir) {
            return Err(ConfigError::PathOutsideConfigDir {
                path: filepath.to_path_buf(),
            });
        }
        Ok(normalized)
    }
}

/// Lexical path normalization: resolves `.` and `..` without touching the
/// filesystem, so containment can be checked before files exist.
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::ParentDir => {
                out.pop();
            }
            Component::CurDir => {}
            other => out.push(other.as_os_str()),
        }
    }
    out
}
