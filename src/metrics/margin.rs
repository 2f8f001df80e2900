//! Gross, EBITDA, and net margin calculations.

use super::revenue::RevenueCalculator;
use crate::error::{CalculationError, Result};
use crate::model::{ProfitLossModel, COGS_SECTION, NET_INCOME_ROW};
use std::collections::BTreeMap;

/// Calculator for profit margin percentages, built atop [`RevenueCalculator`]
/// over the same model.
pub struct MarginCalculator<'a> {
    model: &'a ProfitLossModel,
    revenue: RevenueCalculator<'a>,
}

impl<'a> MarginCalculator<'a> {
    pub fn new(model: &'a ProfitLossModel) -> Self {
        Self {
            model,
            revenue: RevenueCalculator::new(model),
        }
    }

    /// Gross margin per period: `((revenue - COGS) / revenue) * 100`.
    ///
    /// Requires a COGS section; service businesses without one get
    /// [`CalculationError::InvalidData`]. Zero revenue in any period aborts
    /// the whole call - there are no partial per-period results.
    pub fn gross_margin(&self) -> Result<BTreeMap<String, f64>> {
        let cogs = self
            .model
            .cogs()
            .ok_or_else(|| CalculationError::InvalidData {
                data_type: "Cost of Goods Sold (COGS)".to_string(),
                calculation_type: "gross margin".to_string(),
            })?;

        let total_revenue = self.revenue.total_revenue();
        let cogs_totals = cogs.sum_leaves();

        let mut margins = BTreeMap::new();
        for (period, revenue) in &total_revenue {
            if *revenue == 0.0 {
                return Err(self.zero_revenue("gross margin", period));
            }
            let cogs_value = cogs_totals.get(period).copied().unwrap_or(0.0);
            margins.insert(period.clone(), ((revenue - cogs_value) / revenue) * 100.0);
        }

        Ok(margins)
    }

    /// EBITDA margin per period: `(EBITDA / revenue) * 100`.
    ///
    /// Uses the Net Income calculated row as an EBITDA proxy - this P&L
    /// layout does not report depreciation and amortization separately, so a
    /// true EBITDA is not derivable. A missing Net Income row reads as zero
    /// for every period rather than erroring.
    pub fn ebitda_margin(&self) -> Result<BTreeMap<String, f64>> {
        self.margin_over_revenue(&self.net_income_values(), "EBITDA margin")
    }

    /// Net profit margin per period: `(Net Income / revenue) * 100`.
    ///
    /// Negative margins are valid loss periods, not errors.
    pub fn net_margin(&self) -> Result<BTreeMap<String, f64>> {
        self.margin_over_revenue(&self.net_income_values(), "net margin")
    }

    fn net_income_values(&self) -> BTreeMap<String, f64> {
        self.model
            .calculated_row(NET_INCOME_ROW)
            .map(|row| row.values.clone())
            .unwrap_or_default()
    }

    fn margin_over_revenue(
        &self,
        numerator: &BTreeMap<String, f64>,
        calculation_type: &str,
    ) -> Result<BTreeMap<String, f64>> {
        let total_revenue = self.revenue.total_revenue();

        let mut margins = BTreeMap::new();
        for (period, revenue) in &total_revenue {
            if *revenue == 0.0 {
                return Err(self.zero_revenue(calculation_type, period));
            }
            let value = numerator.get(period).copied().unwrap_or(0.0);
            margins.insert(period.clone(), (value / revenue) * 100.0);
        }

        Ok(margins)
    }

    fn zero_revenue(&self, calculation_type: &str, period: &str) -> CalculationError {
        CalculationError::ZeroDivision {
            denominator_type: "revenue".to_string(),
            calculation_type: calculation_type.to_string(),
            period: Some(period.to_string()),
        }
    }
}
