//! Typed in-memory models for parsed statements.
//!
//! Each model wraps the flat [`StatementTable`] (for the rule framework) plus
//! the hierarchy tree (for structural queries and metric calculations), the
//! same split the upstream parser produces.

use crate::hierarchy::AccountNode;
use crate::table::StatementTable;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const INCOME_SECTION: &str = "Income";
pub const COGS_SECTION: &str = "Cost of Goods Sold";
pub const EXPENSES_SECTION: &str = "Expenses";
pub const OTHER_EXPENSES_SECTION: &str = "Other Expenses";

pub const ASSETS_SECTION: &str = "Assets";
pub const LIABILITIES_SECTION: &str = "Liabilities";
pub const EQUITY_SECTION: &str = "Equity";
/// QuickBooks sometimes merges liabilities and equity into one section.
pub const COMBINED_LIABILITIES_EQUITY_SECTION: &str = "Liabilities and Equity";

/// Name of the derived summary row used as the net-income source.
pub const NET_INCOME_ROW: &str = "Net Income";

/// A derived summary row (Gross Profit, Net Income, ...) emitted by the
/// parser. Excluded from period-consistency validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculatedRow {
    pub account_name: String,
    pub values: BTreeMap<String, f64>,
}

/// Profit & Loss model with period-aware hierarchy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfitLossModel {
    table: StatementTable,
    hierarchy: BTreeMap<String, AccountNode>,
    calculated_rows: Vec<CalculatedRow>,
}

impl ProfitLossModel {
    pub fn new(
        table: StatementTable,
        hierarchy: BTreeMap<String, AccountNode>,
        calculated_rows: Vec<CalculatedRow>,
    ) -> Self {
        Self {
            table,
            hierarchy,
            calculated_rows,
        }
    }

    pub fn table(&self) -> &StatementTable {
        &self.table
    }

    pub fn hierarchy(&self) -> &BTreeMap<String, AccountNode> {
        &self.hierarchy
    }

    pub fn calculated_rows(&self) -> &[CalculatedRow] {
        &self.calculated_rows
    }

    pub fn income(&self) -> Option<&AccountNode> {
        self.hierarchy.get(INCOME_SECTION)
    }

    /// COGS is optional; service businesses legitimately have none.
    pub fn cogs(&self) -> Option<&AccountNode> {
        self.hierarchy.get(COGS_SECTION)
    }

    pub fn expenses(&self) -> Option<&AccountNode> {
        self.hierarchy.get(EXPENSES_SECTION)
    }

    pub fn other_expenses(&self) -> Option<&AccountNode> {
        self.hierarchy.get(OTHER_EXPENSES_SECTION)
    }

    /// All period labels declared by this statement.
    ///
    /// Taken from the first leaf found in the hierarchy (sections scanned in
    /// lexicographic key order, leaves depth-first), falling back to the first
    /// calculated row. Labels come back in the leaf map's lexicographic order;
    /// prior-year first-match in the growth calculators is defined over this
    /// order, so it is deterministic call to call.
    pub fn periods(&self) -> Vec<String> {
        for node in self.hierarchy.values() {
            if let Some(values) = node.first_values() {
                return values.keys().cloned().collect();
            }
        }
        if let Some(first) = self.calculated_rows.first() {
            return first.values.keys().cloned().collect();
        }
        Vec::new()
    }

    pub fn calculated_row(&self, name: &str) -> Option<&CalculatedRow> {
        self.calculated_rows
            .iter()
            .find(|row| row.account_name == name)
    }

    /// Recursive account lookup across every section.
    pub fn account_by_name(&self, name: &str) -> Option<&AccountNode> {
        self.hierarchy.values().find_map(|node| node.find(name))
    }
}

/// Balance Sheet model with hierarchy support.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BalanceSheetModel {
    table: StatementTable,
    hierarchy: BTreeMap<String, AccountNode>,
}

impl BalanceSheetModel {
    pub fn new(table: StatementTable, hierarchy: BTreeMap<String, AccountNode>) -> Self {
        Self { table, hierarchy }
    }

    pub fn table(&self) -> &StatementTable {
        &self.table
    }

    pub fn hierarchy(&self) -> &BTreeMap<String, AccountNode> {
        &self.hierarchy
    }

    pub fn assets(&self) -> Option<&AccountNode> {
        self.hierarchy.get(ASSETS_SECTION)
    }

    /// Liabilities section, whether standalone or folded into the combined
    /// "Liabilities and Equity" section.
    pub fn liabilities(&self) -> Option<&AccountNode> {
        self.section_or_combined(LIABILITIES_SECTION)
    }

    pub fn equity(&self) -> Option<&AccountNode> {
        self.section_or_combined(EQUITY_SECTION)
    }

    fn section_or_combined(&self, section: &str) -> Option<&AccountNode> {
        if let Some(node) = self.hierarchy.get(section) {
            return Some(node);
        }
        self.hierarchy
            .get(COMBINED_LIABILITIES_EQUITY_SECTION)
            .map(|combined| combined.find(section).unwrap_or(combined))
    }

    pub fn account_by_name(&self, name: &str) -> Option<&AccountNode> {
        self.hierarchy.values().find_map(|node| node.find(name))
    }
}
