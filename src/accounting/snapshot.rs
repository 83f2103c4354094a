//! Output of a time-accounting evaluation

use serde::{Deserialize, Serialize};

/// Derived time statistics for one person at one evaluation date
///
/// Percentages always sum to exactly 100.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSnapshot {
    pub person_id: String,

    /// Subject's whole-year age today
    pub person_current_age: i32,

    /// Age the subject is expected to reach
    pub person_life_expectancy: f64,

    /// Jointly limited future years (shorter of the two expectancies)
    pub years_remaining: f64,

    pub hours_spent_so_far: f64,
    pub hours_remaining_estimate: f64,
    pub total_lifetime_hours_estimate: f64,

    pub percentage_spent: f64,
    pub percentage_remaining: f64,

    pub days_remaining: f64,
    pub weeks_remaining: f64,
    pub months_remaining: f64,
}
