//! Shared Time CLI
//!
//! Command-line shell over the roster store and the time-accounting engine

use anyhow::{bail, Context};
use chrono::{Local, NaiveDate, Utc};
use clap::{Parser, Subcommand, ValueEnum};
use shared_time::people::{
    add_segment, change_segment, find_template, import_people, remove_segment, ImportOptions,
    SegmentChange, DEFAULT_STORE_PATH, DEFAULT_TEMPLATE_ID, SCENARIO_TEMPLATES,
};
use shared_time::report::{format_duration, format_hours};
use shared_time::{BirthMonth, Person, Profile, RelationshipKind, Roster, SegmentEnd, Sex, SnapshotRunner};
use std::path::{Path, PathBuf};

#[derive(Debug, Parser)]
#[command(name = "shared-time", version, about = "How much time is left with the people you love")]
struct Cli {
    /// Roster file
    #[arg(long, global = true, default_value = DEFAULT_STORE_PATH)]
    store: PathBuf,

    /// Alternate life table CSV (columns: age,male,female)
    #[arg(long, global = true)]
    life_table: Option<PathBuf>,

    /// Evaluate as of this date instead of today (YYYY-MM-DD)
    #[arg(long, global = true)]
    as_of: Option<NaiveDate>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Set up your own profile
    Init {
        /// Birth month as YYYY-MM
        #[arg(long)]
        birth: BirthMonth,
        #[arg(long, value_enum)]
        sex: SexArg,
    },
    /// Add a person using a timeline template
    Add {
        #[arg(long)]
        name: String,
        /// Birth month as YYYY-MM
        #[arg(long)]
        birth: BirthMonth,
        #[arg(long, value_enum)]
        sex: SexArg,
        #[arg(long, value_enum, default_value = "other")]
        relationship: RelationshipArg,
        #[arg(long, default_value = DEFAULT_TEMPLATE_ID)]
        template: String,
        /// Your age when the relationship began
        #[arg(long, default_value_t = 0.0)]
        start_age: f64,
        #[arg(long)]
        notes: Option<String>,
    },
    /// Import people from a birthday CSV export
    Import {
        file: PathBuf,
        #[arg(long, value_enum, default_value = "friend")]
        relationship: RelationshipArg,
        #[arg(long, default_value = DEFAULT_TEMPLATE_ID)]
        template: String,
        #[arg(long, default_value_t = 0.0)]
        start_age: f64,
    },
    /// One line per person
    List,
    /// Every figure for one person
    Show { id: String },
    /// Edit a person's contact timeline
    Segment {
        #[command(subcommand)]
        action: SegmentAction,
    },
    /// Record that a person has passed away
    Passed {
        id: String,
        #[arg(long)]
        date: NaiveDate,
    },
    /// Stop tracking a person
    Remove { id: String },
    /// List the available timeline templates
    Templates,
}

#[derive(Debug, Subcommand)]
enum SegmentAction {
    /// Append an ongoing segment at 1 h/day
    Add { id: String },
    /// Remove a segment by its position (0-based)
    Remove { id: String, index: usize },
    /// Change fields of a segment
    Set {
        id: String,
        index: usize,
        #[arg(long)]
        start_age: Option<f64>,
        #[arg(long, conflicts_with = "ongoing")]
        end_age: Option<f64>,
        /// Mark the segment as continuing to today
        #[arg(long)]
        ongoing: bool,
        #[arg(long)]
        hours: Option<f64>,
        #[arg(long)]
        description: Option<String>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum SexArg {
    Male,
    Female,
}

impl From<SexArg> for Sex {
    fn from(arg: SexArg) -> Self {
        match arg {
            SexArg::Male => Sex::Male,
            SexArg::Female => Sex::Female,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum RelationshipArg {
    Parent,
    Sibling,
    Child,
    Spouse,
    Grandparent,
    Relative,
    Friend,
    Other,
}

impl From<RelationshipArg> for RelationshipKind {
    fn from(arg: RelationshipArg) -> Self {
        match arg {
            RelationshipArg::Parent => RelationshipKind::Parent,
            RelationshipArg::Sibling => RelationshipKind::Sibling,
            RelationshipArg::Child => RelationshipKind::Child,
            RelationshipArg::Spouse => RelationshipKind::Spouse,
            RelationshipArg::Grandparent => RelationshipKind::Grandparent,
            RelationshipArg::Relative => RelationshipKind::Relative,
            RelationshipArg::Friend => RelationshipKind::Friend,
            RelationshipArg::Other => RelationshipKind::Other,
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let mut roster = Roster::load(&cli.store)
        .with_context(|| format!("failed to load roster from {}", cli.store.display()))?;
    let today = cli.as_of.unwrap_or_else(|| Local::now().date_naive());

    match cli.command {
        Command::Init { birth, sex } => {
            roster.set_profile(Profile::new(birth, sex.into()));
            save(&roster, &cli.store)?;
            println!("Profile saved (born {}, age {})", birth, birth.age_at(today));
        }
        Command::Add { name, birth, sex, relationship, template, start_age, notes } => {
            let template = find_template(&template)?;
            let mut person = Person::new(
                Utc::now().timestamp_millis().to_string(),
                name,
                birth,
                sex.into(),
                relationship.into(),
            )
            .with_timeline(template.segments_from(start_age));
            person.notes = notes;

            println!("Added {} ({})", person.name, person.id);
            roster.add_people([person]);
            save(&roster, &cli.store)?;
        }
        Command::Import { file, relationship, template, start_age } => {
            let options = ImportOptions {
                relationship: relationship.into(),
                template_id: template,
                start_age,
            };
            let people = import_people(&file, &options)
                .with_context(|| format!("failed to import {}", file.display()))?;
            println!("Imported {} people", people.len());
            roster.add_people(people);
            save(&roster, &cli.store)?;
        }
        Command::List => {
            let profile = require_profile(&roster)?;
            let runner = runner(cli.life_table.as_deref())?;
            let snapshots = runner.run_batch(&roster.people, &profile, today);

            println!("{} in your circle", plural(roster.people.len()));
            println!("{:<16} {:<24} {:>4} {:>8} {:>24}", "ID", "Name", "Age", "Spent", "Time left");
            println!("{}", "-".repeat(80));
            for (person, s) in roster.people.iter().zip(&snapshots) {
                println!(
                    "{:<16} {:<24} {:>4} {:>7.1}% {:>24}",
                    person.id,
                    person.name,
                    s.person_current_age,
                    s.percentage_spent,
                    format_duration(s.days_remaining),
                );
            }
        }
        Command::Show { id } => {
            let profile = require_profile(&roster)?;
            let runner = runner(cli.life_table.as_deref())?;
            let person = roster.get(&id)?;
            let s = runner.run(person, &profile, today);

            println!("{} ({}, {})", person.name, person.relationship.as_str(), person.sex.as_str());
            if let Some(passed) = person.passed_date {
                println!("  Passed:               {}", passed);
            }
            println!("  Age:                  {}", s.person_current_age);
            println!("  Life expectancy:      {:.1}", s.person_life_expectancy);
            println!("  Years left together:  {:.1}", s.years_remaining);
            println!("  Time spent:           {} ({:.0} h)", format_hours(s.hours_spent_so_far), s.hours_spent_so_far);
            println!("  Time remaining:       {} ({:.0} h)", format_hours(s.hours_remaining_estimate), s.hours_remaining_estimate);
            println!("  Lifetime total:       {}", format_hours(s.total_lifetime_hours_estimate));
            println!("  {:.1}% of your time together has passed, {:.1}% remains", s.percentage_spent, s.percentage_remaining);
            println!("  {:.0} days / {:.0} weeks / {:.0} months left", s.days_remaining, s.weeks_remaining, s.months_remaining);
            println!("  Timeline:");
            for (index, seg) in person.timeline.iter().enumerate() {
                let end = match seg.end_age {
                    SegmentEnd::At(age) => format!("{}", age),
                    SegmentEnd::Ongoing => "now".to_string(),
                };
                println!(
                    "    [{}] {:>5} - {:<5} {:>5.1} h/day  {}",
                    index,
                    seg.start_age,
                    end,
                    seg.hours_per_day,
                    seg.description.as_deref().unwrap_or(""),
                );
            }
        }
        Command::Segment { action } => {
            let (id, edit) = match action {
                SegmentAction::Add { id } => (id, None),
                SegmentAction::Remove { id, index } => (id, Some((index, None))),
                SegmentAction::Set { id, index, start_age, end_age, ongoing, hours, description } => {
                    let end_age = if ongoing { Some(SegmentEnd::Ongoing) } else { end_age.map(SegmentEnd::At) };
                    let change = SegmentChange { start_age, end_age, hours_per_day: hours, description };
                    (id, Some((index, Some(change))))
                }
            };

            let mut person = roster.get(&id)?.clone();
            person.timeline = match edit {
                None => {
                    let profile = require_profile(&roster)?;
                    add_segment(&person.timeline, profile.birth.age_at(today) as f64)
                }
                Some((index, None)) => remove_segment(&person.timeline, index)?,
                Some((index, Some(change))) => change_segment(&person.timeline, index, change)?,
            };

            println!("{} now has {} segments", person.name, person.timeline.len());
            roster.update_person(person)?;
            save(&roster, &cli.store)?;
        }
        Command::Passed { id, date } => {
            roster.mark_passed(&id, date)?;
            save(&roster, &cli.store)?;
            println!("Recorded {} as passed on {}", id, date);
        }
        Command::Remove { id } => {
            let removed = roster.remove_person(&id)?;
            save(&roster, &cli.store)?;
            println!("Removed {}", removed.name);
        }
        Command::Templates => {
            for t in SCENARIO_TEMPLATES {
                println!("{:<22} {}", t.id, t.name);
                println!("{:<22} {}", "", t.description);
            }
        }
    }

    Ok(())
}

fn require_profile(roster: &Roster) -> anyhow::Result<Profile> {
    match roster.profile {
        Some(profile) => Ok(profile),
        None => bail!("no profile yet, run `shared-time init` first"),
    }
}

fn runner(life_table: Option<&Path>) -> anyhow::Result<SnapshotRunner> {
    match life_table {
        Some(path) => SnapshotRunner::from_csv_path(path)
            .with_context(|| format!("failed to load life table {}", path.display())),
        None => Ok(SnapshotRunner::new()),
    }
}

fn save(roster: &Roster, path: &Path) -> anyhow::Result<()> {
    roster
        .save(path)
        .with_context(|| format!("failed to save roster to {}", path.display()))
}

fn plural(count: usize) -> String {
    if count == 1 {
        "1 person".to_string()
    } else {
        format!("{} people", count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_defaults_to_default_template() {
        let cli = Cli::try_parse_from([
            "shared-time", "add", "--name", "Ada", "--birth", "1960-11", "--sex", "female",
        ])
        .unwrap();

        match cli.command {
            Command::Add { template, start_age, .. } => {
                assert_eq!(template, DEFAULT_TEMPLATE_ID);
                assert!(find_template(&template).is_ok());
                assert_eq!(start_age, 0.0);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_segment_set_parses() {
        let cli = Cli::try_parse_from([
            "shared-time", "segment", "set", "p1", "2", "--ongoing", "--hours", "1.5",
        ])
        .unwrap();

        match cli.command {
            Command::Segment { action: SegmentAction::Set { id, index, ongoing, hours, end_age, .. } } => {
                assert_eq!(id, "p1");
                assert_eq!(index, 2);
                assert!(ongoing);
                assert_eq!(hours, Some(1.5));
                assert_eq!(end_age, None);
            }
            other => panic!("unexpected command {:?}", other),
        }

        let conflicting = Cli::try_parse_from([
            "shared-time", "segment", "set", "p1", "0", "--ongoing", "--end-age", "18",
        ]);
        assert!(conflicting.is_err());
    }
}
