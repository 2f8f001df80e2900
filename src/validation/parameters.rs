//! Validation rules for flat parameter maps.
//!
//! Parameters are key→value configuration pairs, not tabular data, so these
//! rules implement the same contract over [`ParameterSet`] instead of
//! [`StatementTable`](crate::table::StatementTable).

use super::rules::{ValidationResult, ValidationRule};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One configuration parameter value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParameterValue {
    Bool(bool),
    Integer(i64),
    Number(f64),
    Text(String),
}

impl ParameterValue {
    /// Numeric view; integers widen to f64.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            ParameterValue::Number(n) => Some(*n),
            ParameterValue::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            ParameterValue::Bool(_) => "bool",
            ParameterValue::Integer(_) => "integer",
            ParameterValue::Number(_) => "number",
            ParameterValue::Text(_) => "string",
        }
    }
}

impl From<f64> for ParameterValue {
    fn from(value: f64) -> Self {
        ParameterValue::Number(value)
    }
}

impl From<i64> for ParameterValue {
    fn from(value: i64) -> Self {
        ParameterValue::Integer(value)
    }
}

impl From<&str> for ParameterValue {
    fn from(value: &str) -> Self {
        ParameterValue::Text(value.to_string())
    }
}

impl From<bool> for ParameterValue {
    fn from(value: bool) -> Self {
        ParameterValue::Bool(value)
    }
}

pub type ParameterSet = BTreeMap<String, ParameterValue>;

/// Expected kind for [`TypeValidationRule`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParameterKind {
    Number,
    Integer,
    Text,
    Bool,
}

impl ParameterKind {
    fn label(self) -> &'static str {
        match self {
            ParameterKind::Number => "number",
            ParameterKind::Integer => "integer",
            ParameterKind::Text => "string",
            ParameterKind::Bool => "bool",
        }
    }

    fn matches(self, value: &ParameterValue) -> bool {
        match (self, value) {
            (ParameterKind::Number, ParameterValue::Number(_) | ParameterValue::Integer(_)) => true,
            (ParameterKind::Integer, ParameterValue::Integer(_)) => true,
            (ParameterKind::Text, ParameterValue::Text(_)) => true,
            (ParameterKind::Bool, ParameterValue::Bool(_)) => true,
            _ => false,
        }
    }
}

/// Fails for each required key absent from the parameter set.
#[derive(Debug, Clone)]
pub struct RequiredParametersRule {
    required: Vec<String>,
}

impl RequiredParametersRule {
    pub fn new<I, S>(required: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            required: required.into_iter().map(Into::into).collect(),
        }
    }
}

impl ValidationRule<ParameterSet> for RequiredParametersRule {
    fn name(&self) -> &'static str {
        "RequiredParametersRule"
    }

    fn validate(&self, data: &ParameterSet) -> ValidationResult {
        let errors = self
            .required
            .iter()
            .filter(|key| !data.contains_key(key.as_str()))
            .map(|key| format!("Required parameter missing: {key}"))
            .collect();

        ValidationResult::from_errors(errors)
    }
}

/// Checks one parameter's kind. An absent key passes; presence is
/// [`RequiredParametersRule`]'s responsibility.
#[derive(Debug, Clone)]
pub struct TypeValidationRule {
    param_name: String,
    expected: ParameterKind,
}

impl TypeValidationRule {
    pub fn new(param_name: impl Into<String>, expected: ParameterKind) -> Self {
        Self {
            param_name: param_name.into(),
            expected,
        }
    }
}

impl ValidationRule<ParameterSet> for TypeValidationRule {
    fn name(&self) -> &'static str {
        "TypeValidationRule"
    }

    fn validate(&self, data: &ParameterSet) -> ValidationResult {
        let Some(value) = data.get(&self.param_name) else {
            return ValidationResult::pass();
        };

        if self.expected.matches(value) {
            ValidationResult::pass()
        } else {
            ValidationResult::fail(vec![format!(
                "{}: must be {}, got {}",
                self.param_name,
                self.expected.label(),
                value.kind()
            )])
        }
    }
}

/// Checks one numeric parameter against inclusive min/max bounds. An absent
/// key passes.
#[derive(Debug, Clone)]
pub struct RangeValidationRule {
    param_name: String,
    min_value: f64,
    max_value: f64,
}

impl RangeValidationRule {
    pub fn new(param_name: impl Into<String>, min_value: f64, max_value: f64) -> Self {
        Self {
            param_name: param_name.into(),
            min_value,
            max_value,
        }
    }
}

impl ValidationRule<ParameterSet> for RangeValidationRule {
    fn name(&self) -> &'static str {
        "RangeValidationRule"
    }

    fn validate(&self, data: &ParameterSet) -> ValidationResult {
        let Some(value) = data.get(&self.param_name) else {
            return ValidationResult::pass();
        };

        let Some(number) = value.as_number() else {
            return ValidationResult::fail(vec![format!(
                "{}: must be numeric, got {}",
                self.param_name,
                value.kind()
            )]);
        };

        if number < self.min_value || number > self.max_value {
            return ValidationResult::fail(vec![format!(
                "{}: must be between {} and {}, got {}",
                self.param_name, self.min_value, self.max_value, number
            )]);
        }

        ValidationResult::pass()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(entries: &[(&str, ParameterValue)]) -> ParameterSet {
        entries
            .iter()
            .map(|(k, v)| ((*k).to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn test_required_parameters_reports_each_missing_key() {
        let rule = RequiredParametersRule::new(["growth", "adjustment"]);
        let data = params(&[("growth", 0.05.into())]);
        let result = rule.validate(&data);
        assert!(!result.passed);
        assert_eq!(result.errors, vec!["Required parameter missing: adjustment"]);
    }

    #[test]
    fn test_range_rule_passes_when_key_absent() {
        let rule = RangeValidationRule::new("growth", -1.0, 1.0);
        assert!(rule.validate(&ParameterSet::new()).passed);
    }

    #[test]
    fn test_range_rule_bounds_are_inclusive() {
        let rule = RangeValidationRule::new("growth", -1.0, 1.0);
        assert!(rule.validate(&params(&[("growth", 1.0.into())])).passed);
        assert!(rule.validate(&params(&[("growth", (-1.0).into())])).passed);

        let result = rule.validate(&params(&[("growth", 1.5.into())]));
        assert!(!result.passed);
        assert_eq!(result.errors, vec!["growth: must be between -1 and 1, got 1.5"]);
    }

    #[test]
    fn test_range_rule_rejects_non_numeric() {
        let rule = RangeValidationRule::new("growth", -1.0, 1.0);
        let result = rule.validate(&params(&[("growth", "fast".into())]));
        assert!(!result.passed);
        assert_eq!(result.errors, vec!["growth: must be numeric, got string"]);
    }

    #[test]
    fn test_range_rule_accepts_integers() {
        let rule = RangeValidationRule::new("periods", 1.0, 12.0);
        assert!(rule.validate(&params(&[("periods", 3i64.into())])).passed);
    }

    #[test]
    fn test_type_rule_passes_when_key_absent() {
        let rule = TypeValidationRule::new("methodology", ParameterKind::Text);
        assert!(rule.validate(&ParameterSet::new()).passed);
    }

    #[test]
    fn test_type_rule_mismatch() {
        let rule = TypeValidationRule::new("methodology", ParameterKind::Text);
        let result = rule.validate(&params(&[("methodology", 2i64.into())]));
        assert!(!result.passed);
        assert_eq!(result.errors, vec!["methodology: must be string, got integer"]);
    }
}
