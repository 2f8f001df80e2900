//! Rule contract and generic table rules.
//!
//! Rules are stateless and side-effect free: they inspect one input and
//! return pass/fail plus human-readable error strings. Domain-expected
//! problems (missing sections, mismatched totals) are data, never panics or
//! `Err` returns.

use crate::table::{CellValue, StatementTable};
use std::collections::BTreeSet;

/// Outcome of a single rule execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationResult {
    pub passed: bool,
    pub errors: Vec<String>,
}

impl ValidationResult {
    pub fn pass() -> Self {
        Self {
            passed: true,
            errors: Vec::new(),
        }
    }

    pub fn fail(errors: Vec<String>) -> Self {
        Self {
            passed: false,
            errors,
        }
    }

    /// Pass iff no errors were collected.
    pub fn from_errors(errors: Vec<String>) -> Self {
        Self {
            passed: errors.is_empty(),
            errors,
        }
    }
}

/// A composable validation rule over input type `D`.
///
/// Document rules take a [`StatementTable`]; parameter rules take a flat
/// key→value map. `name()` feeds the `[RuleName]` prefix in aggregated
/// reports and matches the implementing type's name.
pub trait ValidationRule<D> {
    fn name(&self) -> &'static str;
    fn validate(&self, data: &D) -> ValidationResult;
}

/// Fails when any required column is missing from the table's declared set.
#[derive(Debug, Clone)]
pub struct RequiredColumnsRule {
    required: BTreeSet<String>,
}

impl RequiredColumnsRule {
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

impl ValidationRule<StatementTable> for RequiredColumnsRule {
    fn name(&self) -> &'static str {
        "RequiredColumnsRule"
    }

    fn validate(&self, table: &StatementTable) -> ValidationResult {
        // BTreeSet iteration keeps the missing list sorted and deterministic.
        let missing: Vec<&str> = self
            .required
            .iter()
            .filter(|column| !table.has_column(column))
            .map(String::as_str)
            .collect();

        if missing.is_empty() {
            ValidationResult::pass()
        } else {
            ValidationResult::fail(vec![format!(
                "Missing required columns: {}",
                missing.join(", ")
            )])
        }
    }
}

/// Expected kind of a column's cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Numeric,
    Text,
    Datetime,
}

impl ColumnKind {
    fn label(self) -> &'static str {
        match self {
            ColumnKind::Numeric => "numeric",
            ColumnKind::Text => "string",
            ColumnKind::Datetime => "datetime",
        }
    }

    fn matches(self, cell: &CellValue) -> bool {
        match (self, cell) {
            (ColumnKind::Numeric, CellValue::Number(_)) => true,
            (ColumnKind::Text, CellValue::Text(_)) => true,
            (ColumnKind::Datetime, CellValue::Date(_)) => true,
            _ => false,
        }
    }
}

/// Checks that every non-empty cell in each configured column matches the
/// expected kind. Collects one error per offending column, not fail-fast.
#[derive(Debug, Clone)]
pub struct DataTypeRule {
    column_kinds: Vec<(String, ColumnKind)>,
}

impl DataTypeRule {
    pub fn new<I, S>(column_kinds: I) -> Self
    where
        I: IntoIterator<Item = (S, ColumnKind)>,
        S: Into<String>,
    {
        Self {
            column_kinds: column_kinds
                .into_iter()
                .map(|(column, kind)| (column.into(), kind))
                .collect(),
        }
    }
}

impl ValidationRule<StatementTable> for DataTypeRule {
    fn name(&self) -> &'static str {
        "DataTypeRule"
    }

    fn validate(&self, table: &StatementTable) -> ValidationResult {
        let mut errors = Vec::new();

        for (column, kind) in &self.column_kinds {
            if !table.has_column(column) {
                errors.push(format!("Column '{column}' not found for type validation"));
                continue;
            }

            let offending = table
                .rows()
                .iter()
                .map(|row| row.cell(column))
                .find(|cell| !cell.is_empty() && !kind.matches(cell));

            if let Some(cell) = offending {
                errors.push(format!(
                    "Column '{column}' has incorrect type. Expected: {}, Got: {}",
                    kind.label(),
                    cell.kind()
                ));
            }
        }

        ValidationResult::from_errors(errors)
    }
}

/// Fails on a table with zero data rows.
#[derive(Debug, Clone, Default)]
pub struct NonEmptyRule;

impl ValidationRule<StatementTable> for NonEmptyRule {
    fn name(&self) -> &'static str {
        "NonEmptyRule"
    }

    fn validate(&self, table: &StatementTable) -> ValidationResult {
        if table.is_empty() {
            ValidationResult::fail(vec!["Table is empty - no data rows found".to_string()])
        } else {
            ValidationResult::pass()
        }
    }
}

/// Ragged-data detector.
///
/// Flags rows where more than half of the declared columns are null, and
/// tables with no declared columns at all. The 50% threshold is a heuristic,
/// not a contract: a legitimate section row with many blank amount columns
/// can trip it, which is the desired behavior for eyeballing parser output.
#[derive(Debug, Clone, Default)]
pub struct StructuralConsistencyRule;

impl ValidationRule<StatementTable> for StructuralConsistencyRule {
    fn name(&self) -> &'static str {
        "StructuralConsistencyRule"
    }

    fn validate(&self, table: &StatementTable) -> ValidationResult {
        let mut errors = Vec::new();

        let total_cols = table.columns().len();
        if total_cols == 0 {
            errors.push("Table has no columns - structural issue".to_string());
            return ValidationResult::fail(errors);
        }

        for (idx, row) in table.rows().iter().enumerate() {
            let null_count = table
                .columns()
                .iter()
                .filter(|column| row.is_null(column))
                .count();

            if null_count * 2 > total_cols {
                errors.push(format!(
                    "Row {idx} has {null_count}/{total_cols} null values - \
                     possible structural inconsistency"
                ));
            }
        }

        ValidationResult::from_errors(errors)
    }
}
