//! Balance Sheet-specific validation rules.
//!
//! Three rules: required sections, hierarchy consistency (totals match the
//! sum of their children), and currency parseability of the amount column.

use super::rules::{ValidationResult, ValidationRule};
use crate::model::{
    ASSETS_SECTION, COMBINED_LIABILITIES_EQUITY_SECTION, EQUITY_SECTION, LIABILITIES_SECTION,
};
use crate::table::{columns, CellValue, RowType, StatementTable};
use crate::utils::parse_currency;
use std::collections::BTreeMap;

pub const TOTAL_ROW_PREFIX: &str = "Total for ";

/// Validates that the required Balance Sheet sections are present.
///
/// `Liabilities` and `Equity` are each also satisfied by a combined
/// "Liabilities and Equity" section, which QuickBooks emits for some layouts.
#[derive(Debug, Clone)]
pub struct RequiredSectionsRule {
    required: Vec<String>,
}

impl RequiredSectionsRule {
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

impl Default for RequiredSectionsRule {
    fn default() -> Self {
        Self::new([ASSETS_SECTION, LIABILITIES_SECTION, EQUITY_SECTION])
    }
}

impl ValidationRule<StatementTable> for RequiredSectionsRule {
    fn name(&self) -> &'static str {
        "RequiredSectionsRule"
    }

    fn validate(&self, table: &StatementTable) -> ValidationResult {
        let found = table.section_names();
        let has_combined = found.contains(COMBINED_LIABILITIES_EQUITY_SECTION);

        let mut errors = Vec::new();
        for section in &self.required {
            let aliased = (section == LIABILITIES_SECTION || section == EQUITY_SECTION)
                && has_combined;
            if !found.contains(section.as_str()) && !aliased {
                errors.push(format!("Missing required section: {section}"));
            }
        }

        ValidationResult::from_errors(errors)
    }
}

/// Validates that every "Total for X" row matches the sum of the child rows
/// under parent X, within a floating-point tolerance.
#[derive(Debug, Clone)]
pub struct HierarchyConsistencyRule {
    tolerance: f64,
}

impl HierarchyConsistencyRule {
    pub fn new(tolerance: f64) -> Self {
        Self { tolerance }
    }
}

impl Default for HierarchyConsistencyRule {
    fn default() -> Self {
        Self::new(0.01)
    }
}

/// A total row bound to the children it asserts a sum over.
struct TotalBinding<'a> {
    parent_name: &'a str,
    total_value: f64,
    children_sum: f64,
}

/// Resolve totals to their children in one pass over the flat rows.
///
/// Children are defined positionally: the child-typed rows strictly between
/// the first parent row named X and the "Total for X" row. A total whose
/// parent row cannot be located is skipped - it is treated as a section-level
/// total with no enumerable children, not as an error.
fn bind_totals<'a>(table: &'a StatementTable, errors: &mut Vec<String>) -> Vec<TotalBinding<'a>> {
    let rows = table.rows();

    // Parent positions, resolved once instead of re-scanned per total.
    let mut parent_index: BTreeMap<&str, usize> = BTreeMap::new();
    for (idx, row) in table.rows_of_type(RowType::Parent) {
        parent_index.entry(row.account_name.as_str()).or_insert(idx);
    }

    let mut bindings = Vec::new();

    for (total_idx, total_row) in table.rows_of_type(RowType::Total) {
        let account_name = total_row.account_name.as_str();

        let Some(total_value) = total_row.numeric_value() else {
            errors.push(format!("Total row '{account_name}' has no numeric value"));
            continue;
        };

        let Some(parent_name) = account_name.strip_prefix(TOTAL_ROW_PREFIX) else {
            errors.push(format!(
                "Total row '{account_name}' does not start with '{TOTAL_ROW_PREFIX}'"
            ));
            continue;
        };

        let Some(&parent_idx) = parent_index.get(parent_name) else {
            continue;
        };

        // Empty range (parent at or after the total) sums to zero.
        let children_sum: f64 = if parent_idx + 1 <= total_idx {
            rows[parent_idx + 1..total_idx]
                .iter()
                .filter(|row| row.row_type == Some(RowType::Child))
                .filter_map(|row| row.numeric_value())
                .sum()
        } else {
            0.0
        };

        bindings.push(TotalBinding {
            parent_name,
            total_value,
            children_sum,
        });
    }

    bindings
}

impl ValidationRule<StatementTable> for HierarchyConsistencyRule {
    fn name(&self) -> &'static str {
        "HierarchyConsistencyRule"
    }

    fn validate(&self, table: &StatementTable) -> ValidationResult {
        // Missing columns are a hard failure, distinct from a mismatch.
        if !table.has_column(columns::ROW_TYPE) {
            return ValidationResult::fail(vec![
                "Table missing 'row_type' column - cannot validate hierarchy".to_string(),
            ]);
        }
        if !table.has_column(columns::NUMERIC_VALUE) {
            return ValidationResult::fail(vec![
                "Table missing 'numeric_value' column - cannot validate totals".to_string(),
            ]);
        }

        let mut errors = Vec::new();

        for binding in bind_totals(table, &mut errors) {
            let diff = (binding.total_value - binding.children_sum).abs();
            if diff > self.tolerance {
                errors.push(format!(
                    "Total mismatch for '{}': total={:.2}, sum of children={:.2}, difference={:.2}",
                    binding.parent_name, binding.total_value, binding.children_sum, diff
                ));
            }
        }

        ValidationResult::from_errors(errors)
    }
}

/// Validates that currency values in the amount column are parseable.
///
/// Empty cells always pass; sections and parents legitimately carry no
/// amount. Uses the same `$`/`,` cleaning as the parser.
#[derive(Debug, Clone)]
pub struct NumericAmountRule {
    column: String,
}

impl NumericAmountRule {
    pub fn new(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
        }
    }
}

impl Default for NumericAmountRule {
    fn default() -> Self {
        Self::new("Total")
    }
}

impl ValidationRule<StatementTable> for NumericAmountRule {
    fn name(&self) -> &'static str {
        "NumericAmountRule"
    }

    fn validate(&self, table: &StatementTable) -> ValidationResult {
        // Fallback search order for the amount column.
        let column = if table.has_column(&self.column) {
            self.column.as_str()
        } else if table.has_column("value") {
            "value"
        } else if table.has_column("raw_value") {
            "raw_value"
        } else {
            return ValidationResult::fail(vec![format!(
                "Column '{}' not found in table",
                self.column
            )]);
        };

        let mut errors = Vec::new();

        for (idx, row) in table.rows().iter().enumerate() {
            let cell = row.cell(column);
            if cell.is_empty() {
                continue;
            }

            let parsed = match cell {
                CellValue::Number(_) => true,
                CellValue::Text(s) => parse_currency(s).is_some(),
                _ => false,
            };

            if !parsed {
                let raw = match cell {
                    CellValue::Text(s) => s.clone(),
                    other => format!("{other:?}"),
                };
                errors.push(format!(
                    "Row {idx}: Cannot parse currency value '{raw}' in column '{column}'"
                ));
            }
        }

        ValidationResult::from_errors(errors)
    }
}
