//! Profit & Loss-specific validation rules.

use super::rules::{ValidationResult, ValidationRule};
use crate::model::{EXPENSES_SECTION, INCOME_SECTION};
use crate::table::{columns, RowType, StatementTable};
use std::collections::BTreeSet;

/// Validates that the required P&L sections are present.
///
/// Defaults to `Income` and `Expenses`; `Cost of Goods Sold` and
/// `Other Expenses` are intentionally optional. Unlike the Balance Sheet
/// rule there is no combined-section aliasing.
#[derive(Debug, Clone)]
pub struct PlRequiredSectionsRule {
    required: Vec<String>,
}

impl PlRequiredSectionsRule {
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

impl Default for PlRequiredSectionsRule {
    fn default() -> Self {
        Self::new([INCOME_SECTION, EXPENSES_SECTION])
    }
}

impl ValidationRule<StatementTable> for PlRequiredSectionsRule {
    fn name(&self) -> &'static str {
        "PlRequiredSectionsRule"
    }

    fn validate(&self, table: &StatementTable) -> ValidationResult {
        let found = table.section_names();

        let errors = self
            .required
            .iter()
            .filter(|section| !found.contains(section.as_str()))
            .map(|section| format!("Missing required section: {section}"))
            .collect();

        ValidationResult::from_errors(errors)
    }
}

/// Validates that every child account exposes the same set of period keys.
///
/// Calculated rows are summaries, not raw data, and are excluded. Zero or one
/// child row passes trivially; with more, the first child's key set is the
/// baseline every other child is compared against.
#[derive(Debug, Clone, Default)]
pub struct PlPeriodConsistencyRule;

impl ValidationRule<StatementTable> for PlPeriodConsistencyRule {
    fn name(&self) -> &'static str {
        "PlPeriodConsistencyRule"
    }

    fn validate(&self, table: &StatementTable) -> ValidationResult {
        if !table.has_column(columns::ROW_TYPE) {
            return ValidationResult::fail(vec![
                "Table missing 'row_type' column - cannot validate period consistency".to_string(),
            ]);
        }
        if !table.has_column(columns::VALUES) {
            return ValidationResult::fail(vec![
                "Table missing 'values' column - cannot validate periods".to_string(),
            ]);
        }

        let mut errors = Vec::new();
        let mut period_sets: Vec<(&str, BTreeSet<&str>)> = Vec::new();

        for (_, row) in table.rows_of_type(RowType::Child) {
            match row.values() {
                Some(values) => {
                    period_sets.push((
                        row.account_name.as_str(),
                        values.keys().map(String::as_str).collect(),
                    ));
                }
                None => {
                    // Excluded from the comparison set entirely.
                    errors.push(format!(
                        "Account '{}' has non-dict values: {}",
                        row.account_name,
                        row.cell(columns::VALUES).kind()
                    ));
                }
            }
        }

        if let Some((_, baseline)) = period_sets.first() {
            for (account_name, periods) in &period_sets[1..] {
                if periods == baseline {
                    continue;
                }

                let missing: Vec<&str> = baseline.difference(periods).copied().collect();
                let extra: Vec<&str> = periods.difference(baseline).copied().collect();

                let mut parts = Vec::new();
                if !missing.is_empty() {
                    parts.push(format!("missing periods [{}]", missing.join(", ")));
                }
                if !extra.is_empty() {
                    parts.push(format!("extra periods [{}]", extra.join(", ")));
                }

                errors.push(format!(
                    "Period inconsistency for account '{account_name}': {}",
                    parts.join(", ")
                ));
            }
        }

        ValidationResult::from_errors(errors)
    }
}
