//! Shared Time - how much time you have had, and have left, with the people in your life
//!
//! This library provides:
//! - An age-indexed life expectancy table with nearest-age lookup
//! - A time-accounting engine turning contact timelines into shared-hour estimates
//! - Relationship timeline templates, a JSON roster store and a birthday CSV import
//! - Roster-wide evaluation and human-readable formatting

pub mod accounting;
pub mod assumptions;
pub mod error;
pub mod people;
pub mod report;
pub mod runner;

// Re-export commonly used types
pub use accounting::{compute_snapshot, AccountingConfig, TimeAccountingEngine, TimeSnapshot};
pub use assumptions::{life_expectancy_age, years_remaining, LifeTable};
pub use error::{Error, Result};
pub use people::{BirthMonth, ContactSegment, Person, Profile, RelationshipKind, Roster, SegmentEnd, Sex};
pub use runner::SnapshotRunner;
