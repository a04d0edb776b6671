pub mod calc;

pub use calc::calculate_monthly_summary;
pub(crate) use calc::round2;
