pub mod energy;
pub mod summary;
pub mod tariff;

pub use energy::*;
pub use summary::*;
pub use tariff::*;
