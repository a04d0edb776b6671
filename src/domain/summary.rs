use serde::{Deserialize, Serialize};

use super::energy::DailyEnergyRecord;

/// Per-quantity sums across the billing period, rounded to 2 decimals.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthTotals {
    pub grid_import_kwh: f64,
    pub grid_export_kwh: f64,
    pub pv_production_kwh: f64,
    pub load_consumption_kwh: f64,
}

/// Cost breakdown in EUR, each figure rounded to 2 decimals.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostBreakdown {
    pub energy_cost: f64,
    pub export_credit: f64,
    pub fixed_charges: f64,
    pub electric_tax: f64,
    pub vat: f64,
    pub total: f64,
}

/// Computed monthly bill estimate.
///
/// The `totals`/`costs` nesting and the camelCase field names are the wire
/// contract consumed by the dashboard; do not rename.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlySummary {
    /// Billing period, `YYYY-MM`. Passed through from the caller; not
    /// validated against the daily dates.
    pub month: String,
    pub totals: MonthTotals,
    pub costs: CostBreakdown,
    /// Relative deviation between the independently measured import total
    /// and the internally summed one, in percent.
    pub discrepancy_percent: f64,
    /// The canonical daily records the totals were computed from, unrounded.
    pub daily: Vec<DailyEnergyRecord>,
}
