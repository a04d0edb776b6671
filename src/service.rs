//! Month summary orchestration: concurrent provider fetches, fallback
//! substitution and short-lived response caching.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Result;
use serde::Serialize;
use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::billing::calculate_monthly_summary;
use crate::config::Config;
use crate::domain::{MonthlySummary, TariffConfig};
use crate::providers::{DatadisProvider, HuaweiProvider, MonthlyEnergyProvider, MonthlySourceData};

/// Wire shape of the summary endpoint: the monthly summary plus a block
/// describing what each source contributed.
#[derive(Debug, Clone, Serialize)]
pub struct SummaryResponse {
    #[serde(flatten)]
    pub summary: MonthlySummary,
    pub sources: SourceInfo,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceInfo {
    pub datadis_import_kwh: f64,
    pub datadis_days: usize,
    pub huawei_days: usize,
}

struct CachedSummary {
    computed_at: Instant,
    response: SummaryResponse,
}

pub struct SummaryService {
    distributor: Arc<dyn MonthlyEnergyProvider>,
    inverter: Arc<dyn MonthlyEnergyProvider>,
    tariff: TariffConfig,
    ttl: Duration,
    cache: RwLock<HashMap<String, CachedSummary>>,
}

impl SummaryService {
    pub fn new(
        distributor: Arc<dyn MonthlyEnergyProvider>,
        inverter: Arc<dyn MonthlyEnergyProvider>,
        tariff: TariffConfig,
        ttl: Duration,
    ) -> Self {
        Self {
            distributor,
            inverter,
            tariff,
            ttl,
            cache: RwLock::new(HashMap::new()),
        }
    }

    /// Compute the billing summary for `month`, or serve a cached one that
    /// is still within its TTL.
    ///
    /// The inverter's daily series drives the totals; the distributor's own
    /// import figure is the independent reading the discrepancy check
    /// compares against.
    pub async fn summary_for(&self, month: &str) -> SummaryResponse {
        {
            let cache = self.cache.read().await;
            if let Some(entry) = cache.get(month) {
                if entry.computed_at.elapsed() < self.ttl {
                    debug!(month, "serving cached summary");
                    return entry.response.clone();
                }
            }
        }

        let (distributor_data, inverter_data) = tokio::join!(
            self.fetch_or_synthetic(self.distributor.as_ref(), month),
            self.fetch_or_synthetic(self.inverter.as_ref(), month),
        );

        let datadis_days = distributor_data.daily.len();
        let huawei_days = inverter_data.daily.len();
        let summary = calculate_monthly_summary(
            month,
            inverter_data.daily,
            &self.tariff,
            distributor_data.import_kwh,
        );

        let response = SummaryResponse {
            summary,
            sources: SourceInfo {
                datadis_import_kwh: distributor_data.import_kwh,
                datadis_days,
                huawei_days,
            },
        };

        let mut cache = self.cache.write().await;
        cache.insert(
            month.to_string(),
            CachedSummary {
                computed_at: Instant::now(),
                response: response.clone(),
            },
        );
        response
    }

    /// Provider failures never reach the user: the synthetic series stands
    /// in and the failure is logged. The substitution decision lives here,
    /// not inside the adapters, so the fallback policy stays visible and
    /// testable.
    async fn fetch_or_synthetic(
        &self,
        provider: &dyn MonthlyEnergyProvider,
        month: &str,
    ) -> MonthlySourceData {
        match provider.fetch_month(month).await {
            Ok(data) => data,
            Err(e) => {
                warn!(
                    provider = provider.name(),
                    month,
                    error = %e,
                    "provider fetch failed, substituting synthetic series"
                );
                MonthlySourceData::synthetic(month)
            }
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub cfg: Config,
    pub service: Arc<SummaryService>,
}

impl AppState {
    pub fn new(cfg: Config) -> Result<Self> {
        let distributor: Arc<dyn MonthlyEnergyProvider> =
            Arc::new(DatadisProvider::new(cfg.datadis.clone())?);
        let inverter: Arc<dyn MonthlyEnergyProvider> = Arc::new(HuaweiProvider::new());

        let service = Arc::new(SummaryService::new(
            distributor,
            inverter,
            cfg.tariff.clone(),
            Duration::from_secs(cfg.cache.summary_ttl_seconds),
        ));
        Ok(Self { cfg, service })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::ProviderError;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FixedProvider {
        name: &'static str,
        data: MonthlySourceData,
        calls: AtomicUsize,
    }

    impl FixedProvider {
        fn new(name: &'static str, data: MonthlySourceData) -> Self {
            Self {
                name,
                data,
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl MonthlyEnergyProvider for FixedProvider {
        fn name(&self) -> &'static str {
            self.name
        }

        async fn fetch_month(&self, _month: &str) -> Result<MonthlySourceData, ProviderError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.data.clone())
        }
    }

    struct FailingProvider;

    #[async_trait]
    impl MonthlyEnergyProvider for FailingProvider {
        fn name(&self) -> &'static str {
            "failing"
        }

        async fn fetch_month(&self, _month: &str) -> Result<MonthlySourceData, ProviderError> {
            Err(ProviderError::Configuration("nothing set".to_string()))
        }
    }

    fn service(
        distributor: Arc<dyn MonthlyEnergyProvider>,
        inverter: Arc<dyn MonthlyEnergyProvider>,
        ttl: Duration,
    ) -> SummaryService {
        SummaryService::new(distributor, inverter, TariffConfig::default(), ttl)
    }

    #[tokio::test]
    async fn failing_providers_are_replaced_by_the_synthetic_series() {
        let svc = service(
            Arc::new(FailingProvider),
            Arc::new(FailingProvider),
            Duration::from_secs(60),
        );
        let response = svc.summary_for("2024-03").await;

        // Both sides degraded to the shared 10-day placeholder.
        assert_eq!(response.sources.datadis_import_kwh, 93.5);
        assert_eq!(response.sources.datadis_days, 10);
        assert_eq!(response.sources.huawei_days, 10);
        assert_eq!(response.summary.totals.grid_import_kwh, 93.5);
        assert_eq!(response.summary.discrepancy_percent, 0.0);
    }

    #[tokio::test]
    async fn inverter_daily_drives_totals_and_distributor_drives_discrepancy() {
        let distributor = Arc::new(FixedProvider::new(
            "datadis",
            MonthlySourceData {
                month: "2024-03".to_string(),
                daily: vec![],
                import_kwh: 20.0,
            },
        ));
        let inverter = Arc::new(FixedProvider::new(
            "huawei",
            MonthlySourceData::from_daily(
                "2024-03",
                vec![crate::domain::DailyEnergyRecord {
                    date: "2024-03-01".to_string(),
                    grid_import_kwh: 10.0,
                    grid_export_kwh: 0.0,
                    pv_production_kwh: 0.0,
                    load_consumption_kwh: 0.0,
                }],
            ),
        ));
        let svc = service(distributor, inverter, Duration::from_secs(60));

        let response = svc.summary_for("2024-03").await;
        assert_eq!(response.summary.totals.grid_import_kwh, 10.0);
        assert_eq!(response.summary.discrepancy_percent, 50.0);
        assert_eq!(response.sources.datadis_days, 0);
        assert_eq!(response.sources.huawei_days, 1);
    }

    #[tokio::test]
    async fn summaries_are_cached_within_the_ttl() {
        let distributor = Arc::new(FixedProvider::new(
            "datadis",
            MonthlySourceData::synthetic("2024-03"),
        ));
        let inverter = Arc::new(FixedProvider::new(
            "huawei",
            MonthlySourceData::synthetic("2024-03"),
        ));
        let svc = service(distributor.clone(), inverter.clone(), Duration::from_secs(60));

        let first = svc.summary_for("2024-03").await;
        let second = svc.summary_for("2024-03").await;

        assert_eq!(distributor.calls.load(Ordering::SeqCst), 1);
        assert_eq!(inverter.calls.load(Ordering::SeqCst), 1);
        assert_eq!(first.summary, second.summary);
    }

    #[tokio::test]
    async fn expired_cache_entries_are_recomputed() {
        let distributor = Arc::new(FixedProvider::new(
            "datadis",
            MonthlySourceData::synthetic("2024-03"),
        ));
        let inverter = Arc::new(FixedProvider::new(
            "huawei",
            MonthlySourceData::synthetic("2024-03"),
        ));
        let svc = service(distributor.clone(), inverter.clone(), Duration::ZERO);

        svc.summary_for("2024-03").await;
        svc.summary_for("2024-03").await;

        assert_eq!(distributor.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn different_months_are_cached_independently() {
        let distributor = Arc::new(FixedProvider::new(
            "datadis",
            MonthlySourceData::synthetic("2024-03"),
        ));
        let inverter = Arc::new(FixedProvider::new(
            "huawei",
            MonthlySourceData::synthetic("2024-03"),
        ));
        let svc = service(distributor.clone(), inverter.clone(), Duration::from_secs(60));

        svc.summary_for("2024-03").await;
        svc.summary_for("2024-04").await;

        assert_eq!(distributor.calls.load(Ordering::SeqCst), 2);
    }
}
