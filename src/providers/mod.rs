//! Monthly energy data providers.
//!
//! Each provider produces one month of canonical daily records plus its own
//! independently measured import total. Failures are returned as
//! [`ProviderError`]; the substitution of placeholder data on failure is the
//! orchestrator's decision, not the adapters'.

pub mod datadis;
pub mod huawei;

use async_trait::async_trait;
use thiserror::Error;

use crate::billing::round2;
use crate::domain::{synthetic_month, DailyEnergyRecord};

pub use datadis::DatadisProvider;
pub use huawei::HuaweiProvider;

/// One provider's view of a billing month: the canonical daily series plus
/// the provider's own total import figure for the same period.
#[derive(Debug, Clone)]
pub struct MonthlySourceData {
    pub month: String,
    pub daily: Vec<DailyEnergyRecord>,
    /// Total grid import for the period as this source measures it, kWh,
    /// rounded to 2 decimals.
    pub import_kwh: f64,
}

impl MonthlySourceData {
    /// Build source data from a daily series, deriving the import total.
    pub fn from_daily(month: impl Into<String>, daily: Vec<DailyEnergyRecord>) -> Self {
        let import_kwh = round2(daily.iter().map(|r| r.grid_import_kwh).sum());
        Self {
            month: month.into(),
            daily,
            import_kwh,
        }
    }

    /// Placeholder payload for a provider that produced nothing usable.
    pub fn synthetic(month: &str) -> Self {
        Self::from_daily(month, synthetic_month(month))
    }
}

/// Failures a live provider can hit. Callers substitute placeholder data
/// instead of surfacing these to the end user.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("missing configuration: {0}")]
    Configuration(String),

    #[error("http transport: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("upstream error: HTTP {0}")]
    UpstreamStatus(reqwest::StatusCode),

    #[error("malformed upstream response: {0}")]
    MalformedResponse(String),
}

#[async_trait]
pub trait MonthlyEnergyProvider: Send + Sync {
    /// Short stable identifier used in logs.
    fn name(&self) -> &'static str;

    /// Fetch one calendar month (`YYYY-MM`) of data.
    async fn fetch_month(&self, month: &str) -> Result<MonthlySourceData, ProviderError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn synthetic_source_sums_its_own_import() {
        let data = MonthlySourceData::synthetic("2024-03");

        assert_eq!(data.month, "2024-03");
        assert_eq!(data.daily.len(), 10);
        // 10 days of 8 + 0.3 * i.
        assert_eq!(data.import_kwh, 93.5);
    }

    #[test]
    fn from_daily_rounds_the_import_total() {
        let daily = vec![
            DailyEnergyRecord {
                date: "2024-03-01".to_string(),
                grid_import_kwh: 1.234,
                grid_export_kwh: 0.0,
                pv_production_kwh: 0.0,
                load_consumption_kwh: 1.234,
            },
            DailyEnergyRecord {
                date: "2024-03-02".to_string(),
                grid_import_kwh: 2.342,
                grid_export_kwh: 0.0,
                pv_production_kwh: 0.0,
                load_consumption_kwh: 2.342,
            },
        ];
        let data = MonthlySourceData::from_daily("2024-03", daily);

        assert_eq!(data.import_kwh, 3.58);
    }
}
