//! Flat tabular representation of a parsed statement.
//!
//! The parser (external to this crate) emits an ordered list of rows with
//! named cells. Row order is load-bearing: Balance Sheet hierarchy validation
//! defines a total's children positionally, as the child rows between the
//! matching parent row and the total row.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Structural role of a statement row, as tagged by the parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RowType {
    Section,
    Parent,
    Child,
    Total,
    Calculated,
}

/// One cell of a statement table.
///
/// `Periods` carries the P&L period→amount mapping; Balance Sheet amounts are
/// plain `Number` cells. `Empty` stands in for blank/NaN cells, which are
/// legitimate on section and parent rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Empty,
    Number(f64),
    Date(NaiveDate),
    Periods(BTreeMap<String, f64>),
    Text(String),
}

impl CellValue {
    pub fn is_empty(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(s) => s.trim().is_empty(),
            _ => false,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_periods(&self) -> Option<&BTreeMap<String, f64>> {
        match self {
            CellValue::Periods(p) => Some(p),
            _ => None,
        }
    }

    /// Short label used in validation error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            CellValue::Empty => "empty",
            CellValue::Number(_) => "numeric",
            CellValue::Date(_) => "datetime",
            CellValue::Periods(_) => "periods",
            CellValue::Text(_) => "string",
        }
    }
}

/// A single statement row: account name, optional structural tag, named cells.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatementRow {
    pub account_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub row_type: Option<RowType>,
    #[serde(default)]
    pub cells: BTreeMap<String, CellValue>,
}

impl StatementRow {
    pub fn new(account_name: impl Into<String>) -> Self {
        Self {
            account_name: account_name.into(),
            row_type: None,
            cells: BTreeMap::new(),
        }
    }

    pub fn with_row_type(mut self, row_type: RowType) -> Self {
        self.row_type = Some(row_type);
        self
    }

    pub fn with_cell(mut self, column: impl Into<String>, value: CellValue) -> Self {
        self.cells.insert(column.into(), value);
        self
    }

    pub fn with_number(self, column: impl Into<String>, value: f64) -> Self {
        self.with_cell(column, CellValue::Number(value))
    }

    /// Cell lookup; a column the row never received reads as `Empty`.
    pub fn cell(&self, column: &str) -> &CellValue {
        self.cells.get(column).unwrap_or(&CellValue::Empty)
    }

    /// Balance Sheet monetary amount, by the `numeric_value` column convention.
    pub fn numeric_value(&self) -> Option<f64> {
        self.cell(columns::NUMERIC_VALUE).as_number()
    }

    /// P&L period→amount mapping, by the `values` column convention.
    pub fn values(&self) -> Option<&BTreeMap<String, f64>> {
        self.cell(columns::VALUES).as_periods()
    }

    /// Whether a declared column is effectively null on this row.
    ///
    /// `account_name` and `row_type` are struct fields rather than cells, so
    /// they get checked directly.
    pub fn is_null(&self, column: &str) -> bool {
        match column {
            columns::ACCOUNT_NAME => self.account_name.trim().is_empty(),
            columns::ROW_TYPE => self.row_type.is_none(),
            other => self.cell(other).is_empty(),
        }
    }
}

/// Well-known column names from the parser contract.
pub mod columns {
    pub const ACCOUNT_NAME: &str = "account_name";
    pub const ROW_TYPE: &str = "row_type";
    pub const NUMERIC_VALUE: &str = "numeric_value";
    pub const VALUES: &str = "values";
}

/// An ordered statement table with a declared column set.
///
/// The declared columns drive fallback behavior in several rules: for example
/// section extraction degrades to scanning all account names when the parser
/// produced no `row_type` column at all.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatementTable {
    columns: Vec<String>,
    rows: Vec<StatementRow>,
}

impl StatementTable {
    pub fn new<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    pub fn push_row(&mut self, row: StatementRow) {
        self.rows.push(row);
    }

    pub fn with_row(mut self, row: StatementRow) -> Self {
        self.push_row(row);
        self
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[StatementRow] {
        &self.rows
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c == name)
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn rows_of_type(&self, row_type: RowType) -> impl Iterator<Item = (usize, &StatementRow)> {
        self.rows
            .iter()
            .enumerate()
            .filter(move |(_, row)| row.row_type == Some(row_type))
    }

    /// Names of section rows, with the documented fallback: when the table has
    /// no `row_type` column, every account name counts as a candidate section.
    pub fn section_names(&self) -> BTreeSet<String> {
        if self.has_column(columns::ROW_TYPE) {
            self.rows_of_type(RowType::Section)
                .map(|(_, row)| row.account_name.clone())
                .collect()
        } else {
            self.rows.iter().map(|row| row.account_name.clone()).collect()
        }
    }
}
