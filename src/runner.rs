//! Snapshot runner for evaluating a whole roster
//!
//! Holds one engine (life table plus configuration) and evaluates many people
//! or many dates with it. The engine is read-only, so people are evaluated in
//! parallel without locking.

use crate::accounting::{AccountingConfig, TimeAccountingEngine, TimeSnapshot};
use crate::assumptions::{load_life_table, LifeTable};
use crate::error::Result;
use crate::people::{Person, Profile};
use chrono::NaiveDate;
use rayon::prelude::*;
use std::path::Path;

/// Pre-loaded runner for roster-wide evaluations
///
/// # Example
/// ```ignore
/// let runner = SnapshotRunner::new();
/// let today = chrono::Local::now().date_naive();
/// for snapshot in runner.run_batch(&roster.people, &profile, today) {
///     println!("{}: {:.1}% spent", snapshot.person_id, snapshot.percentage_spent);
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct SnapshotRunner {
    engine: TimeAccountingEngine,
}

impl SnapshotRunner {
    /// Runner with the built-in life table and default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Runner using a life table loaded from CSV
    pub fn from_csv_path(path: &Path) -> Result<Self> {
        Ok(Self::with_table(load_life_table(path)?))
    }

    pub fn with_table(table: LifeTable) -> Self {
        Self::with_engine(TimeAccountingEngine::new(table, AccountingConfig::default()))
    }

    pub fn with_engine(engine: TimeAccountingEngine) -> Self {
        Self { engine }
    }

    pub fn run(&self, person: &Person, profile: &Profile, now: NaiveDate) -> TimeSnapshot {
        self.engine.snapshot(person, profile, now)
    }

    /// Evaluate every person as of the same date; output order follows input
    pub fn run_batch(&self, people: &[Person], profile: &Profile, now: NaiveDate) -> Vec<TimeSnapshot> {
        people
            .par_iter()
            .map(|p| self.engine.snapshot(p, profile, now))
            .collect()
    }

    /// Evaluate one person as of several dates
    pub fn run_dates(&self, person: &Person, profile: &Profile, dates: &[NaiveDate]) -> Vec<TimeSnapshot> {
        dates
            .iter()
            .map(|&now| self.engine.snapshot(person, profile, now))
            .collect()
    }

    pub fn engine(&self) -> &TimeAccountingEngine {
        &self.engine
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::people::{BirthMonth, ContactSegment, RelationshipKind, Sex};

    fn profile() -> Profile {
        Profile::new(BirthMonth::new(1985, 4).unwrap(), Sex::Female)
    }

    fn person(id: &str, birth_year: i32, hours: f64) -> Person {
        Person::new(id, id, BirthMonth::new(birth_year, 4).unwrap(), Sex::Male, RelationshipKind::Friend)
            .with_timeline(vec![ContactSegment::ongoing(10.0, hours)])
    }

    #[test]
    fn test_batch_preserves_order_and_matches_single_runs() {
        let runner = SnapshotRunner::new();
        let now = NaiveDate::from_ymd_opt(2024, 9, 1).unwrap();
        let people: Vec<_> = (0..20)
            .map(|i| person(&format!("p{}", i), 1940 + i, i as f64 * 0.5))
            .collect();

        let batch = runner.run_batch(&people, &profile(), now);
        assert_eq!(batch.len(), people.len());
        for (p, s) in people.iter().zip(&batch) {
            assert_eq!(s.person_id, p.id);
            assert_eq!(*s, runner.run(p, &profile(), now));
        }
    }

    #[test]
    fn test_with_engine_uses_its_configuration() {
        let config = AccountingConfig {
            days_per_year: 365.0,
            default_hours_per_day: 1.0,
        };
        let runner = SnapshotRunner::with_engine(TimeAccountingEngine::new(LifeTable::ssa_2023(), config));
        let now = NaiveDate::from_ymd_opt(2024, 9, 1).unwrap();
        let s = runner.run(&person("a", 1960, 2.0), &profile(), now);

        assert_eq!(runner.engine().config().days_per_year, 365.0);
        assert!((s.days_remaining - s.years_remaining * 365.0).abs() < 1e-9);
    }

    #[test]
    fn test_run_dates_accrues_over_time() {
        let runner = SnapshotRunner::new();
        let dates = [
            NaiveDate::from_ymd_opt(2020, 5, 1).unwrap(),
            NaiveDate::from_ymd_opt(2025, 5, 1).unwrap(),
        ];
        let results = runner.run_dates(&person("a", 1960, 2.0), &profile(), &dates);

        assert_eq!(results.len(), 2);
        assert!(results[1].hours_spent_so_far > results[0].hours_spent_so_far);
        assert!(results[1].percentage_spent > results[0].percentage_spent);
    }
}
