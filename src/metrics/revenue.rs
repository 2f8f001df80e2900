//! Revenue totals and growth-rate calculations over the P&L income tree.

use crate::error::{CalculationError, Result};
use crate::model::ProfitLossModel;
use crate::utils::{is_prior_year_label, prior_year_label_for};
use serde::Serialize;
use std::collections::BTreeMap;

/// Result of a period-over-period growth calculation.
///
/// `previous_period` is populated by year-over-year calls, where the prior
/// period was detected rather than supplied by the caller.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GrowthRecord {
    pub growth_rate: f64,
    pub current: f64,
    pub previous: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous_period: Option<String>,
}

/// Calculator for revenue totals and growth analysis.
pub struct RevenueCalculator<'a> {
    model: &'a ProfitLossModel,
}

impl<'a> RevenueCalculator<'a> {
    pub fn new(model: &'a ProfitLossModel) -> Self {
        Self { model }
    }

    /// Total revenue per period, summed over every leaf of the income tree.
    ///
    /// Aggregation nodes never contribute directly (the tree's branch/leaf
    /// split rules out double counting), and every declared period gets an
    /// entry even when the income section is missing or empty - absent
    /// income reads as zero revenue, not as an absent key.
    pub fn total_revenue(&self) -> BTreeMap<String, f64> {
        let mut totals = match self.model.income() {
            Some(income) => income.sum_leaves(),
            None => BTreeMap::new(),
        };

        for period in self.model.periods() {
            totals.entry(period).or_insert(0.0);
        }

        totals
    }

    /// Month-over-month growth between two explicitly named periods.
    ///
    /// `((current - previous) / previous) * 100`
    pub fn mom_growth(&self, current_period: &str, previous_period: &str) -> Result<GrowthRecord> {
        let available = self.model.periods();

        for period in [current_period, previous_period] {
            if !available.iter().any(|p| p == period) {
                return Err(CalculationError::MissingPeriod {
                    period: period.to_string(),
                    available_periods: available,
                });
            }
        }

        let totals = self.total_revenue();
        let current = totals.get(current_period).copied().unwrap_or(0.0);
        let previous = totals.get(previous_period).copied().unwrap_or(0.0);

        if previous == 0.0 {
            return Err(CalculationError::ZeroDivision {
                denominator_type: "previous period revenue".to_string(),
                calculation_type: "month-over-month growth".to_string(),
                period: Some(previous_period.to_string()),
            });
        }

        Ok(GrowthRecord {
            growth_rate: ((current - previous) / previous) * 100.0,
            current,
            previous,
            previous_period: None,
        })
    }

    /// Year-over-year growth against an auto-detected prior-year column.
    ///
    /// Prior-year detection takes the first period label ending in "(PY)", in
    /// the model's period order. This is deliberately naive: with several
    /// prior-year columns present it picks the first and ignores the rest,
    /// but it picks the same one on every call.
    pub fn yoy_growth(&self, current_period: &str) -> Result<GrowthRecord> {
        let available = self.model.periods();

        if !available.iter().any(|p| p == current_period) {
            return Err(CalculationError::MissingPeriod {
                period: current_period.to_string(),
                available_periods: available,
            });
        }

        let Some(prior_period) = available.iter().find(|p| is_prior_year_label(p)).cloned()
        else {
            return Err(CalculationError::MissingPeriod {
                period: prior_year_label_for(current_period),
                available_periods: available,
            });
        };

        let totals = self.total_revenue();
        let current = totals.get(current_period).copied().unwrap_or(0.0);
        let previous = totals.get(&prior_period).copied().unwrap_or(0.0);

        if previous == 0.0 {
            return Err(CalculationError::ZeroDivision {
                denominator_type: "prior year revenue".to_string(),
                calculation_type: "year-over-year growth".to_string(),
                period: Some(prior_period),
            });
        }

        Ok(GrowthRecord {
            growth_rate: ((current - previous) / previous) * 100.0,
            current,
            previous,
            previous_period: Some(prior_period),
        })
    }
}
