//! Household solar billing monitor.
//!
//! Combines grid-import readings from the distributor (Datadis) with
//! solar-inverter production data, applies a configurable tariff and
//! exposes the monthly cost estimate, including a cross-source discrepancy
//! check, over HTTP.

pub mod api;
pub mod billing;
pub mod config;
pub mod domain;
pub mod normalize;
pub mod providers;
pub mod service;
pub mod telemetry;
