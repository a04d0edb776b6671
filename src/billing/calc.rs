//! Monthly billing arithmetic.
//!
//! `calculate_monthly_summary` is a total, pure function: any well-typed
//! input, including an empty daily series, yields a valid summary, and
//! identical inputs always produce identical output. Malformed numerics
//! (NaN, infinities) propagate arithmetically; validation happens upstream.

use crate::domain::{CostBreakdown, DailyEnergyRecord, MonthTotals, MonthlySummary, TariffConfig};

/// Round to two decimals, half away from zero. Applied to every total and
/// monetary figure in the output; the daily series stays unrounded.
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

pub fn calculate_monthly_summary(
    month: &str,
    daily: Vec<DailyEnergyRecord>,
    tariff: &TariffConfig,
    independent_import_kwh: f64,
) -> MonthlySummary {
    let mut totals = MonthTotals::default();
    for record in &daily {
        totals.grid_import_kwh += record.grid_import_kwh;
        totals.grid_export_kwh += record.grid_export_kwh;
        totals.pv_production_kwh += record.pv_production_kwh;
        totals.load_consumption_kwh += record.load_consumption_kwh;
    }

    let energy_cost = totals.grid_import_kwh * tariff.energy_price_eur_per_kwh;
    let raw_export_credit = totals.grid_export_kwh * tariff.export_compensation_eur_per_kwh;
    // The cap keeps export credit from exceeding the energy cost it offsets.
    let export_credit = if tariff.limit_export_compensation {
        raw_export_credit.min(energy_cost)
    } else {
        raw_export_credit
    };
    let fixed_charges = daily.len() as f64 * tariff.fixed_daily_eur;
    // Can go negative with an uncapped credit; taxes then apply to a
    // negative base, which is allowed.
    let subtotal = energy_cost - export_credit + fixed_charges;
    // Taxes compound sequentially: VAT applies on top of the electric tax.
    let electric_tax = subtotal * tariff.electric_tax_rate;
    let vat = (subtotal + electric_tax) * tariff.vat_rate;
    let total = subtotal + electric_tax + vat;

    // A zero independent reading means "no claim of discrepancy", not an error.
    let discrepancy_percent = if independent_import_kwh == 0.0 {
        0.0
    } else {
        (independent_import_kwh - totals.grid_import_kwh) / independent_import_kwh * 100.0
    };

    MonthlySummary {
        month: month.to_string(),
        totals: MonthTotals {
            grid_import_kwh: round2(totals.grid_import_kwh),
            grid_export_kwh: round2(totals.grid_export_kwh),
            pv_production_kwh: round2(totals.pv_production_kwh),
            load_consumption_kwh: round2(totals.load_consumption_kwh),
        },
        costs: CostBreakdown {
            energy_cost: round2(energy_cost),
            export_credit: round2(export_credit),
            fixed_charges: round2(fixed_charges),
            electric_tax: round2(electric_tax),
            vat: round2(vat),
            total: round2(total),
        },
        discrepancy_percent: round2(discrepancy_percent),
        daily,
    }
}
