use serde::{Deserialize, Serialize};

/// One calendar day of energy flows for a single site.
///
/// The four quantities come from independent meters and are not forced to
/// reconcile (`pv != export + load - import` is allowed); the monthly
/// summary measures the disagreement instead of rejecting it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyEnergyRecord {
    /// Calendar date, `YYYY-MM-DD`.
    pub date: String,
    pub grid_import_kwh: f64,
    pub grid_export_kwh: f64,
    pub pv_production_kwh: f64,
    pub load_consumption_kwh: f64,
}

/// Deterministic placeholder series: ten days ramping linearly from the
/// first of `month`.
///
/// Every component that needs placeholder data goes through this one
/// generator so fallbacks stay bit-identical across the system.
pub fn synthetic_month(month: &str) -> Vec<DailyEnergyRecord> {
    (0..10)
        .map(|i| DailyEnergyRecord {
            date: format!("{month}-{:02}", i + 1),
            grid_import_kwh: 8.0 + i as f64 * 0.3,
            grid_export_kwh: 3.0 + i as f64 * 0.2,
            pv_production_kwh: 12.0 + i as f64 * 0.5,
            load_consumption_kwh: 10.0 + i as f64 * 0.4,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn synthetic_month_covers_ten_days() {
        let days = synthetic_month("2024-03");
        assert_eq!(days.len(), 10);
        assert_eq!(days[0].date, "2024-03-01");
        assert_eq!(days[9].date, "2024-03-10");
    }

    #[test]
    fn synthetic_month_first_day_baseline() {
        let days = synthetic_month("2024-03");
        assert_eq!(
            days[0],
            DailyEnergyRecord {
                date: "2024-03-01".to_string(),
                grid_import_kwh: 8.0,
                grid_export_kwh: 3.0,
                pv_production_kwh: 12.0,
                load_consumption_kwh: 10.0,
            }
        );
    }
}
