//! Time accounting: hours shared so far and hours statistically left

mod engine;
mod snapshot;

pub use engine::{
    compute_snapshot, AccountingConfig, TimeAccountingEngine, DAYS_PER_YEAR,
    DEFAULT_HOURS_PER_DAY,
};
pub use snapshot::TimeSnapshot;
