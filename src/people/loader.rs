//! Bulk import of people from a birthday-reminder CSV export
//!
//! The export has one row per calendar event with columns
//! `id,name,surname,originalDate,type,yearMatter`. Only birthdays with a known
//! year become people; everything else is skipped.

use super::data::{BirthMonth, Person, RelationshipKind, Sex};
use super::templates::find_template;
use crate::error::{Error, Result};
use chrono::{Datelike, NaiveDate, Utc};
use csv::Reader;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Raw CSV row matching the export columns
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    #[serde(rename = "id")]
    id: u64,
    #[serde(rename = "name")]
    name: String,
    #[serde(rename = "surname", default)]
    surname: Option<String>,
    #[serde(rename = "originalDate")]
    original_date: String,
    #[serde(rename = "type")]
    event_type: String,
    #[serde(rename = "yearMatter")]
    year_matter: u8,
}

/// A birthday taken from the export
#[derive(Debug, Clone, PartialEq)]
pub struct ImportedBirthday {
    pub source_id: u64,
    pub full_name: String,
    pub birth: BirthMonth,
}

impl CsvRow {
    fn is_dated_birthday(&self) -> bool {
        self.event_type == "BIRTHDAY" && self.year_matter == 1
    }

    fn to_birthday(self) -> Result<ImportedBirthday> {
        let date = NaiveDate::parse_from_str(self.original_date.trim(), "%Y-%m-%d")?;
        let full_name = match self.surname.as_deref().map(str::trim) {
            Some(surname) if !surname.is_empty() => format!("{} {}", self.name, surname),
            _ => self.name,
        };

        Ok(ImportedBirthday {
            source_id: self.id,
            full_name,
            birth: BirthMonth::new(date.year(), date.month())?,
        })
    }
}

/// How imported birthdays are turned into tracked people
#[derive(Debug, Clone)]
pub struct ImportOptions {
    pub relationship: RelationshipKind,
    pub template_id: String,
    /// Observer's age when the relationship began
    pub start_age: f64,
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self {
            relationship: RelationshipKind::Friend,
            template_id: super::templates::DEFAULT_TEMPLATE_ID.to_string(),
            start_age: 0.0,
        }
    }
}

/// Read every dated birthday from an export
pub fn read_birthdays<R: Read>(reader: R) -> Result<Vec<ImportedBirthday>> {
    let mut csv_reader = Reader::from_reader(reader);
    let mut birthdays = Vec::new();

    for result in csv_reader.deserialize() {
        let row: CsvRow = result?;
        if !row.is_dated_birthday() {
            log::debug!("skipping event {} ({})", row.id, row.event_type);
            continue;
        }
        let source_id = row.id;
        match row.to_birthday() {
            Ok(birthday) => birthdays.push(birthday),
            Err(e) => log::warn!("skipping event {}: {}", source_id, e),
        }
    }

    if birthdays.is_empty() {
        return Err(Error::NoBirthdays);
    }
    Ok(birthdays)
}

/// Turn imported birthdays into people using a template timeline
pub fn birthdays_to_people(
    birthdays: Vec<ImportedBirthday>,
    options: &ImportOptions,
) -> Result<Vec<Person>> {
    let template = find_template(&options.template_id)?;
    let timeline = template.segments_from(options.start_age);
    let stamp = Utc::now().timestamp_millis();

    Ok(birthdays
        .into_iter()
        .enumerate()
        .map(|(index, b)| {
            // The export carries no sex
            Person::new(
                format!("{}-{}", stamp, index),
                b.full_name,
                b.birth,
                Sex::Male,
                options.relationship,
            )
            .with_timeline(timeline.clone())
        })
        .collect())
}

/// Import people from any reader
pub fn import_people_from_reader<R: Read>(reader: R, options: &ImportOptions) -> Result<Vec<Person>> {
    let birthdays = read_birthdays(reader)?;
    log::info!("importing {} birthdays", birthdays.len());
    birthdays_to_people(birthdays, options)
}

/// Import people from an export file
pub fn import_people<P: AsRef<Path>>(path: P, options: &ImportOptions) -> Result<Vec<Person>> {
    import_people_from_reader(File::open(path)?, options)
}
