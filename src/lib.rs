//! # Financial Statement Analyzer
//!
//! A library for validating QuickBooks financial statement exports (Balance
//! Sheet, Profit & Loss) and computing derived financial metrics.
//!
//! ## Core Concepts
//!
//! - **Statement table**: flat, ordered rows (`account_name`, `row_type`,
//!   cells) as produced by the upstream file parser
//! - **Hierarchy tree**: the same statement as an explicit branch/leaf tree;
//!   only leaves are ever summed, so aggregation rows cannot double-count
//! - **Validation rules**: small composable checks that return pass/fail
//!   plus human-readable errors - structural problems are data, not panics
//! - **Calculators**: stateless revenue/margin/liquidity computations that
//!   raise typed [`CalculationError`]s for missing periods, missing
//!   sections, and zero denominators
//!
//! ## Example
//!
//! ```rust,ignore
//! use financial_statement_analyzer::*;
//!
//! let model: ProfitLossModel = serde_json::from_str(&parser_output)?;
//!
//! let report = profit_loss_validator().validate(model.table(), false);
//! if !report.valid {
//!     eprintln!("{:#?}", report.errors);
//! }
//!
//! let revenue = RevenueCalculator::new(&model);
//! let totals = revenue.total_revenue();
//! let growth = revenue.mom_growth("Nov 2025", "Oct 2025")?;
//! ```

pub mod config;
pub mod error;
pub mod hierarchy;
pub mod metrics;
pub mod model;
pub mod table;
pub mod utils;
pub mod validation;

pub use config::{AnalysisParameters, ClientConfig, ConfigManager};
pub use error::{CalculationError, ConfigError, Result};
pub use hierarchy::AccountNode;
pub use metrics::{GrowthRecord, LiquidityCalculator, MarginCalculator, RevenueCalculator};
pub use model::{BalanceSheetModel, CalculatedRow, ProfitLossModel};
pub use table::{CellValue, RowType, StatementRow, StatementTable};
pub use validation::{
    balance_sheet_validator, profit_loss_validator, ValidationReport, ValidationResult, Validator,
};

use log::{debug, info, warn};
use serde::Serialize;
use std::collections::BTreeMap;

/// Aggregated metric output for one statement set.
///
/// Metrics that could not be computed are `None`, with the reason collected
/// in `diagnostics` - a service business without COGS still gets revenue and
/// net margin, it just carries a gross-margin diagnostic.
#[derive(Debug, Clone, Default, Serialize)]
pub struct MetricsSummary {
    pub total_revenue: BTreeMap<String, f64>,
    pub gross_margin: Option<BTreeMap<String, f64>>,
    pub ebitda_margin: Option<BTreeMap<String, f64>>,
    pub net_margin: Option<BTreeMap<String, f64>>,
    pub working_capital: Option<BTreeMap<String, f64>>,
    pub current_ratio: Option<BTreeMap<String, f64>>,
    pub diagnostics: Vec<String>,
}

/// Top-level entry point: validates one client's statements and aggregates
/// the metric calculators into a [`MetricsSummary`].
pub struct StatementAnalyzer<'a> {
    profit_loss: &'a ProfitLossModel,
    balance_sheet: Option<&'a BalanceSheetModel>,
}

impl<'a> StatementAnalyzer<'a> {
    pub fn new(profit_loss: &'a ProfitLossModel) -> Self {
        Self {
            profit_loss,
            balance_sheet: None,
        }
    }

    pub fn with_balance_sheet(mut self, balance_sheet: &'a BalanceSheetModel) -> Self {
        self.balance_sheet = Some(balance_sheet);
        self
    }

    /// Run the stock document validators over every supplied statement.
    pub fn validate(&self) -> ValidationReport {
        info!("Validating statement structure");

        let mut report = profit_loss_validator().validate(self.profit_loss.table(), false);

        if let Some(balance_sheet) = self.balance_sheet {
            report = report.merge(balance_sheet_validator().validate(balance_sheet.table(), false));
        }

        debug!(
            "Validation finished: valid={}, {} error(s)",
            report.valid,
            report.errors.len()
        );
        report
    }

    /// Compute every available metric, degrading per-metric instead of
    /// aborting: each failed calculation becomes a diagnostic string.
    pub fn analyze(&self) -> MetricsSummary {
        info!("Calculating financial metrics");

        let mut summary = MetricsSummary::default();

        let revenue = RevenueCalculator::new(self.profit_loss);
        summary.total_revenue = revenue.total_revenue();

        let margins = MarginCalculator::new(self.profit_loss);
        summary.gross_margin = Self::collect(
            "gross margin",
            margins.gross_margin(),
            &mut summary.diagnostics,
        );
        summary.ebitda_margin = Self::collect(
            "EBITDA margin",
            margins.ebitda_margin(),
            &mut summary.diagnostics,
        );
        summary.net_margin =
            Self::collect("net margin", margins.net_margin(), &mut summary.diagnostics);

        if let Some(balance_sheet) = self.balance_sheet {
            let liquidity = LiquidityCalculator::new(balance_sheet);
            summary.working_capital = Some(liquidity.working_capital());
            summary.current_ratio = Self::collect(
                "current ratio",
                liquidity.current_ratio(),
                &mut summary.diagnostics,
            );
        }

        debug!(
            "Metrics finished with {} diagnostic(s)",
            summary.diagnostics.len()
        );
        summary
    }

    fn collect(
        label: &str,
        result: Result<BTreeMap<String, f64>>,
        diagnostics: &mut Vec<String>,
    ) -> Option<BTreeMap<String, f64>> {
        match result {
            Ok(values) => Some(values),
            Err(err) => {
                warn!("{label} unavailable: {err}");
                diagnostics.push(format!("{label} unavailable: {err}"));
                None
            }
        }
    }
}
