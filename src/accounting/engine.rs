//! Time-accounting engine
//!
//! Converts a person's contact timeline plus both parties' life expectancies
//! into a [`TimeSnapshot`]. The computation is pure: no I/O, no caching, and
//! the evaluation date is an explicit input.

use super::snapshot::TimeSnapshot;
use crate::assumptions::LifeTable;
use crate::people::{whole_years_between, ContactSegment, Person, Profile, SegmentEnd};
use chrono::NaiveDate;

/// Average days per year, accounting for leap years
pub const DAYS_PER_YEAR: f64 = 365.25;

/// Projected daily contact for a person with an empty timeline
pub const DEFAULT_HOURS_PER_DAY: f64 = 1.0;

/// Configuration for the engine
#[derive(Debug, Clone, PartialEq)]
pub struct AccountingConfig {
    pub days_per_year: f64,

    /// Rate projected forward when the timeline is empty
    pub default_hours_per_day: f64,
}

impl Default for AccountingConfig {
    fn default() -> Self {
        Self {
            days_per_year: DAYS_PER_YEAR,
            default_hours_per_day: DEFAULT_HOURS_PER_DAY,
        }
    }
}

/// Main time-accounting engine
#[derive(Debug, Clone, Default)]
pub struct TimeAccountingEngine {
    table: LifeTable,
    config: AccountingConfig,
}

impl TimeAccountingEngine {
    pub fn new(table: LifeTable, config: AccountingConfig) -> Self {
        Self { table, config }
    }

    pub fn table(&self) -> &LifeTable {
        &self.table
    }

    pub fn config(&self) -> &AccountingConfig {
        &self.config
    }

    /// Evaluate one person against the observer as of `now`
    pub fn snapshot(&self, person: &Person, profile: &Profile, now: NaiveDate) -> TimeSnapshot {
        let days_per_year = self.config.days_per_year;

        let person_age = whole_years_between(person.birth, now);
        let observer_age = whole_years_between(profile.birth, now);

        // Accrual stops on the day the person passed
        let cutoff = match person.passed_date {
            Some(passed) => whole_years_between(profile.birth, passed),
            None => observer_age,
        };

        let person_life_expectancy = self.table.life_expectancy_age(person_age as f64, person.sex);
        let person_years_remaining = self.table.years_remaining(person_age as f64, person.sex);
        let observer_years_remaining = self.table.years_remaining(observer_age as f64, profile.sex);
        let years_remaining = person_years_remaining.min(observer_years_remaining).max(0.0);

        let hours_spent_so_far = self.hours_spent(&person.timeline, cutoff as f64);

        let days_remaining = years_remaining * days_per_year;
        let hours_remaining_estimate = days_remaining * self.future_hours_per_day(&person.timeline);

        let total_lifetime_hours_estimate = hours_spent_so_far + hours_remaining_estimate;
        let percentage_spent = if total_lifetime_hours_estimate > 0.0 {
            hours_spent_so_far / total_lifetime_hours_estimate * 100.0
        } else {
            0.0
        };

        TimeSnapshot {
            person_id: person.id.clone(),
            person_current_age: person_age,
            person_life_expectancy,
            years_remaining,
            hours_spent_so_far,
            hours_remaining_estimate,
            total_lifetime_hours_estimate,
            percentage_spent,
            percentage_remaining: 100.0 - percentage_spent,
            days_remaining,
            weeks_remaining: days_remaining / 7.0,
            months_remaining: years_remaining * 12.0,
        }
    }

    /// Hours accrued over the timeline up to the observer's age `cutoff`
    ///
    /// Each segment is clipped to end no later than the cutoff. Segments whose
    /// clipped end does not exceed their start (not yet begun, reversed, or
    /// empty) contribute nothing, and negative rates count as zero.
    pub fn hours_spent(&self, timeline: &[ContactSegment], cutoff: f64) -> f64 {
        let mut total = 0.0;

        for segment in timeline {
            let end = match segment.end_age {
                SegmentEnd::Ongoing => cutoff,
                SegmentEnd::At(end) => end.min(cutoff),
            };

            if end > segment.start_age {
                let years = end - segment.start_age;
                total += years * self.config.days_per_year * segment.hours_per_day.max(0.0);
            } else {
                log::debug!(
                    "segment starting at {} contributes nothing (clipped end {})",
                    segment.start_age,
                    end
                );
            }
        }

        total
    }

    /// Daily rate projected into the future
    ///
    /// The ongoing segment if there is one, otherwise the last segment,
    /// otherwise the configured default. Never negative.
    pub fn future_hours_per_day(&self, timeline: &[ContactSegment]) -> f64 {
        timeline
            .iter()
            .find(|s| s.end_age.is_ongoing())
            .or_else(|| timeline.last())
            .map_or(self.config.default_hours_per_day, |s| s.hours_per_day)
            .max(0.0)
    }
}

/// Evaluate with the built-in life table and default configuration
pub fn compute_snapshot(person: &Person, profile: &Profile, now: NaiveDate) -> TimeSnapshot {
    TimeAccountingEngine::default().snapshot(person, profile, now)
}
