pub mod report;
pub mod summary;
pub mod trend;

pub use report::{StatsReport, Timeframe};
pub use summary::{Analytics, SubjectBreakdown, SubjectStats};
pub use trend::{Trend, TrendField};
