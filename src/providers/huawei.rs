//! Huawei FusionSolar inverter integration.
//!
//! The live FusionSolar northbound API needs an installer account that this
//! deployment does not have, so the adapter serves a deterministic
//! simulated month shaped like real inverter telemetry. The orchestrator
//! treats it exactly like a live source, so swapping in the real API later
//! only touches this file.

use async_trait::async_trait;

use super::{MonthlyEnergyProvider, MonthlySourceData, ProviderError};
use crate::domain::DailyEnergyRecord;

#[derive(Debug, Default)]
pub struct HuaweiProvider;

impl HuaweiProvider {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl MonthlyEnergyProvider for HuaweiProvider {
    fn name(&self) -> &'static str {
        "huawei"
    }

    async fn fetch_month(&self, month: &str) -> Result<MonthlySourceData, ProviderError> {
        let daily = (0..10)
            .map(|i| DailyEnergyRecord {
                date: format!("{month}-{:02}", i + 1),
                grid_import_kwh: 7.5 + i as f64 * 0.25,
                grid_export_kwh: 3.2 + i as f64 * 0.18,
                pv_production_kwh: 13.0 + i as f64 * 0.45,
                load_consumption_kwh: 9.8 + i as f64 * 0.35,
            })
            .collect();
        Ok(MonthlySourceData::from_daily(month, daily))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn serves_a_deterministic_ten_day_month() {
        let provider = HuaweiProvider::new();
        let data = provider.fetch_month("2024-03").await.unwrap();

        assert_eq!(data.daily.len(), 10);
        assert_eq!(data.daily[0].date, "2024-03-01");
        assert_eq!(data.daily[0].grid_import_kwh, 7.5);
        assert_eq!(data.daily[0].pv_production_kwh, 13.0);
        // 10 days of 7.5 + 0.25 * i.
        assert_eq!(data.import_kwh, 86.25);
    }
}
