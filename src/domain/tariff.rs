use serde::{Deserialize, Serialize};

/// Pricing policy for a single supply contract. Loaded once from
/// configuration and never mutated at runtime.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TariffConfig {
    /// Price per imported kWh, EUR.
    pub energy_price_eur_per_kwh: f64,
    /// Credit per exported kWh, EUR.
    pub export_compensation_eur_per_kwh: f64,
    /// Fixed charge per day present in the billing period, EUR.
    pub fixed_daily_eur: f64,
    /// Electric tax applied on the subtotal.
    pub electric_tax_rate: f64,
    /// VAT applied on subtotal plus electric tax.
    pub vat_rate: f64,
    /// Cap the export credit at the energy cost it offsets.
    pub limit_export_compensation: bool,
}

impl Default for TariffConfig {
    fn default() -> Self {
        Self {
            energy_price_eur_per_kwh: 0.18,
            export_compensation_eur_per_kwh: 0.08,
            fixed_daily_eur: 0.45,
            electric_tax_rate: 0.05113,
            vat_rate: 0.21,
            limit_export_compensation: true,
        }
    }
}
