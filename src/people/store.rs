//! JSON roster store
//!
//! The profile and every tracked person live in one JSON document. The whole
//! document is read at startup and rewritten after each change.

use super::data::{Person, Profile};
use crate::error::{Error, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Default roster location, relative to the working directory
pub const DEFAULT_STORE_PATH: &str = "roster.json";

/// Everything that gets persisted
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Roster {
    #[serde(default)]
    pub profile: Option<Profile>,

    #[serde(default)]
    pub people: Vec<Person>,
}

impl Roster {
    pub fn new(profile: Profile) -> Self {
        Self {
            profile: Some(profile),
            people: Vec::new(),
        }
    }

    /// Load a roster; a missing file is an empty roster
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            log::info!("no roster at {}, starting empty", path.display());
            return Ok(Self::default());
        }

        let text = fs::read_to_string(path)?;
        let roster: Roster = serde_json::from_str(&text)?;
        log::info!("loaded {} people from {}", roster.people.len(), path.display());
        Ok(roster)
    }

    /// Write the roster as pretty-printed JSON, creating parent directories
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let text = serde_json::to_string_pretty(self)?;
        fs::write(path, text)?;
        log::info!("saved {} people to {}", self.people.len(), path.display());
        Ok(())
    }

    pub fn set_profile(&mut self, profile: Profile) {
        self.profile = Some(profile);
    }

    pub fn add_people(&mut self, people: impl IntoIterator<Item = Person>) {
        self.people.extend(people);
    }

    pub fn get(&self, id: &str) -> Result<&Person> {
        self.people
            .iter()
            .find(|p| p.id == id)
            .ok_or_else(|| Error::UnknownPerson(id.to_string()))
    }

    /// Replace the stored person with the same id
    pub fn update_person(&mut self, person: Person) -> Result<()> {
        let slot = self
            .people
            .iter_mut()
            .find(|p| p.id == person.id)
            .ok_or_else(|| Error::UnknownPerson(person.id.clone()))?;
        *slot = person;
        Ok(())
    }

    pub fn remove_person(&mut self, id: &str) -> Result<Person> {
        let idx = self
            .people
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| Error::UnknownPerson(id.to_string()))?;
        Ok(self.people.remove(idx))
    }

    /// Record the date a person passed away
    pub fn mark_passed(&mut self, id: &str, date: NaiveDate) -> Result<()> {
        let person = self
            .people
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| Error::UnknownPerson(id.to_string()))?;
        person.passed_date = Some(date);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::people::{BirthMonth, ContactSegment, RelationshipKind, Sex};

    fn profile() -> Profile {
        Profile::new(BirthMonth::new(1990, 1).unwrap(), Sex::Female)
    }

    fn person(id: &str) -> Person {
        Person::new(
            id,
            format!("Person {}", id),
            BirthMonth::new(1960, 7).unwrap(),
            Sex::Male,
            RelationshipKind::Parent,
        )
        .with_timeline(vec![ContactSegment::ongoing(0.0, 2.0)])
    }

    #[test]
    fn test_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let roster = Roster::load(dir.path().join("roster.json")).unwrap();
        assert_eq!(roster, Roster::default());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("roster.json");

        let mut roster = Roster::new(profile());
        roster.add_people([person("a"), person("b")]);
        roster.save(&path).unwrap();

        let loaded = Roster::load(&path).unwrap();
        assert_eq!(loaded, roster);
    }

    #[test]
    fn test_save_creates_missing_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data").join("shared").join("roster.json");

        let roster = Roster::new(profile());
        roster.save(&path).unwrap();

        assert!(path.exists());
        assert_eq!(Roster::load(&path).unwrap(), roster);
    }

    #[test]
    fn test_corrupt_file_is_json_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("roster.json");
        fs::write(&path, "{not json").unwrap();
        assert!(matches!(Roster::load(&path), Err(Error::Json(_))));
    }

    #[test]
    fn test_update_remove_and_mark_passed() {
        let mut roster = Roster::new(profile());
        roster.add_people([person("a"), person("b")]);

        let mut renamed = person("b");
        renamed.name = "Bea".to_string();
        roster.update_person(renamed).unwrap();
        assert_eq!(roster.get("b").unwrap().name, "Bea");

        let date = NaiveDate::from_ymd_opt(2020, 3, 1).unwrap();
        roster.mark_passed("a", date).unwrap();
        assert_eq!(roster.get("a").unwrap().passed_date, Some(date));

        let removed = roster.remove_person("a").unwrap();
        assert_eq!(removed.id, "a");
        assert_eq!(roster.people.len(), 1);

        assert!(matches!(roster.remove_person("a"), Err(Error::UnknownPerson(_))));
        assert!(matches!(roster.update_person(person("zzz")), Err(Error::UnknownPerson(_))));
        assert!(matches!(roster.mark_passed("zzz", date), Err(Error::UnknownPerson(_))));
    }
}
