//! Working capital and liquidity ratios over the Balance Sheet hierarchy.

use crate::error::{CalculationError, Result};
use crate::model::BalanceSheetModel;
use std::collections::{BTreeMap, BTreeSet};

pub const CURRENT_ASSETS: &str = "Current Assets";
pub const CURRENT_LIABILITIES: &str = "Current Liabilities";

/// Calculator for liquidity metrics.
///
/// Locates the "Current Assets" and "Current Liabilities" nodes in the
/// hierarchy by name and leaf-sums each; non-current accounts stay excluded.
pub struct LiquidityCalculator<'a> {
    model: &'a BalanceSheetModel,
}

impl<'a> LiquidityCalculator<'a> {
    pub fn new(model: &'a BalanceSheetModel) -> Self {
        Self { model }
    }

    /// Working capital per period: current assets minus current liabilities,
    /// over the union of both sides' period keys.
    pub fn working_capital(&self) -> BTreeMap<String, f64> {
        let assets = self.current_section_totals(true);
        let liabilities = self.current_section_totals(false);

        all_periods(&assets, &liabilities)
            .into_iter()
            .map(|period| {
                let a = assets.get(&period).copied().unwrap_or(0.0);
                let l = liabilities.get(&period).copied().unwrap_or(0.0);
                (period, a - l)
            })
            .collect()
    }

    /// Current ratio per period: current assets over current liabilities.
    pub fn current_ratio(&self) -> Result<BTreeMap<String, f64>> {
        let assets = self.current_section_totals(true);
        let liabilities = self.current_section_totals(false);

        let mut ratios = BTreeMap::new();
        for period in all_periods(&assets, &liabilities) {
            let l = liabilities.get(&period).copied().unwrap_or(0.0);
            if l == 0.0 {
                return Err(CalculationError::ZeroDivision {
                    denominator_type: "current liabilities".to_string(),
                    calculation_type: "current ratio".to_string(),
                    period: Some(period),
                });
            }
            let a = assets.get(&period).copied().unwrap_or(0.0);
            ratios.insert(period, a / l);
        }

        Ok(ratios)
    }

    fn current_section_totals(&self, assets_side: bool) -> BTreeMap<String, f64> {
        let (section, target) = if assets_side {
            (self.model.assets(), CURRENT_ASSETS)
        } else {
            (self.model.liabilities(), CURRENT_LIABILITIES)
        };

        section
            .and_then(|node| node.find(target))
            .map(|node| node.sum_leaves())
            .unwrap_or_default()
    }
}

fn all_periods(a: &BTreeMap<String, f64>, b: &BTreeMap<String, f64>) -> Vec<String> {
    let union: BTreeSet<&String> = a.keys().chain(b.keys()).collect();
    union.into_iter().cloned().collect()
}
