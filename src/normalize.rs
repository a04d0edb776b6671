//! Daily record normalization for distributor payloads.
//!
//! Distributor APIs are inconsistent about field names, date formats and
//! granularity, so raw JSON is reduced to one canonical per-day record
//! shape here before any billing arithmetic sees it.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::domain::{synthetic_month, DailyEnergyRecord};

/// Date field candidates, highest priority first.
const DATE_FIELDS: &[&str] = &["dateTime", "datetime", "date", "day"];

/// Energy value field candidates, highest priority first.
const VALUE_FIELDS: &[&str] = &["value", "energy", "consumption", "consumptionKwh", "importKwh"];

/// Reduce an arbitrary provider payload to a sorted, deduplicated daily
/// series for `month`. Never fails: an unusable payload yields the shared
/// synthetic series instead.
///
/// Records resolving to the same calendar date are summed, which rolls
/// sub-daily granularity up to daily.
pub fn normalize(raw_payload: &Value, month: &str) -> Vec<DailyEnergyRecord> {
    let mut by_date: BTreeMap<String, f64> = BTreeMap::new();
    for (index, record) in unwrap_records(raw_payload).iter().enumerate() {
        let date = resolve_date(record, month, index);
        let value = resolve_value(record);
        *by_date.entry(date).or_insert(0.0) += value;
    }

    if by_date.is_empty() {
        return synthetic_month(month);
    }

    by_date
        .into_iter()
        .map(|(date, grid_import_kwh)| DailyEnergyRecord {
            date,
            grid_import_kwh,
            grid_export_kwh: 0.0,
            pv_production_kwh: 0.0,
            // Import-only source: export and production are unknown, and
            // load is assumed equal to import. A modeling simplification,
            // not a measurement.
            load_consumption_kwh: grid_import_kwh,
        })
        .collect()
}

/// The payload is either the record array itself or a wrapper object
/// holding it under `data` or `records`; anything else counts as empty.
fn unwrap_records(payload: &Value) -> &[Value] {
    if let Some(list) = payload.as_array() {
        return list.as_slice();
    }
    for key in ["data", "records"] {
        if let Some(list) = payload.get(key).and_then(Value::as_array) {
            return list.as_slice();
        }
    }
    &[]
}

fn resolve_date(record: &Value, month: &str, index: usize) -> String {
    for key in DATE_FIELDS {
        if let Some(raw) = record.get(key).and_then(Value::as_str) {
            return canonical_date(raw);
        }
    }
    format!("{month}-{:02}", index + 1)
}

fn resolve_value(record: &Value) -> f64 {
    for key in VALUE_FIELDS {
        if let Some(value) = record.get(key).and_then(Value::as_f64) {
            return value;
        }
    }
    0.0
}

/// Reduce a raw date value to `YYYY-MM-DD`: keep the first ten characters,
/// normalize `/` separators, and drop any time-of-day suffix left after a
/// space. Tolerates `YYYY-MM-DD`, `YYYY/MM/DD` and `YYYY-MM-DD HH:mm`.
fn canonical_date(raw: &str) -> String {
    let truncated: String = raw
        .chars()
        .take(10)
        .map(|c| if c == '/' { '-' } else { c })
        .collect();
    match truncated.split_whitespace().next() {
        Some(head) => head.to_string(),
        None => truncated,
    }
}
