//! Trend and severity derivation.

mod severity;
mod trend;

pub use severity::{RawSeverityScale, SeverityBand, SeverityScale, SeverityTier};
pub use trend::{Direction, Trend, TrendComparator, trend};
