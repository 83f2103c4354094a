//! Roster data structures: the observer's profile and the people they track
//!
//! Contact segments are keyed by the observer's age, not by calendar dates or
//! by the subject's age, so one timeline template can be applied to anyone.

use crate::error::{Error, Result};
use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Biological sex, used only to pick the life table column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    Male,
    Female,
}

impl Sex {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sex::Male => "male",
            Sex::Female => "female",
        }
    }
}

/// How the subject is related to the observer (informational only)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RelationshipKind {
    Parent,
    Sibling,
    Child,
    Spouse,
    Grandparent,
    Relative,
    Friend,
    Other,
}

impl RelationshipKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RelationshipKind::Parent => "parent",
            RelationshipKind::Sibling => "sibling",
            RelationshipKind::Child => "child",
            RelationshipKind::Spouse => "spouse",
            RelationshipKind::Grandparent => "grandparent",
            RelationshipKind::Relative => "relative",
            RelationshipKind::Friend => "friend",
            RelationshipKind::Other => "other",
        }
    }
}

/// A birth date at month resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawBirthMonth", into = "RawBirthMonth")]
pub struct BirthMonth {
    year: i32,
    month: u32,
}

#[derive(Serialize, Deserialize)]
struct RawBirthMonth {
    #[serde(rename = "birthYear")]
    year: i32,
    #[serde(rename = "birthMonth")]
    month: u32,
}

impl TryFrom<RawBirthMonth> for BirthMonth {
    type Error = Error;

    fn try_from(raw: RawBirthMonth) -> Result<Self> {
        BirthMonth::new(raw.year, raw.month)
    }
}

impl From<BirthMonth> for RawBirthMonth {
    fn from(birth: BirthMonth) -> Self {
        Self {
            year: birth.year,
            month: birth.month,
        }
    }
}

impl BirthMonth {
    /// Month is 1-based (January = 1)
    pub fn new(year: i32, month: u32) -> Result<Self> {
        if !(1..=12).contains(&month) {
            return Err(Error::InvalidMonth { month });
        }
        Ok(Self { year, month })
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// Whole years elapsed between this birth month and `date`
    pub fn age_at(&self, date: NaiveDate) -> i32 {
        whole_years_between(*self, date)
    }
}

impl FromStr for BirthMonth {
    type Err = Error;

    /// Parse `YYYY-MM`
    fn from_str(s: &str) -> Result<Self> {
        let invalid = || Error::InvalidBirthMonth(s.to_string());
        let (year, month) = s.trim().split_once('-').ok_or_else(invalid)?;
        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u32 = month.parse().map_err(|_| invalid())?;
        BirthMonth::new(year, month)
    }
}

impl fmt::Display for BirthMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// Whole years elapsed from `birth` to `date`
///
/// One year is subtracted when the month of `date` precedes the birth month;
/// the day of month is ignored. Dates before the birth give a negative count.
pub fn whole_years_between(birth: BirthMonth, date: NaiveDate) -> i32 {
    let mut age = date.year() - birth.year;
    if date.month() < birth.month {
        age -= 1;
    }
    age
}

/// Where a contact segment ends
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "Option<f64>", into = "Option<f64>")]
pub enum SegmentEnd {
    /// Observer's age when the pattern stopped
    At(f64),
    /// Continues up to the evaluation date
    Ongoing,
}

impl From<Option<f64>> for SegmentEnd {
    fn from(value: Option<f64>) -> Self {
        value.map_or(SegmentEnd::Ongoing, SegmentEnd::At)
    }
}

impl From<SegmentEnd> for Option<f64> {
    fn from(end: SegmentEnd) -> Self {
        match end {
            SegmentEnd::At(age) => Some(age),
            SegmentEnd::Ongoing => None,
        }
    }
}

impl SegmentEnd {
    pub fn is_ongoing(&self) -> bool {
        matches!(self, SegmentEnd::Ongoing)
    }
}

/// One interval of constant average daily contact
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactSegment {
    /// Observer's age when this pattern began
    pub start_age: f64,

    /// Observer's age when it ended, or ongoing
    pub end_age: SegmentEnd,

    /// Average hours per day together, nominally in [0, 24]
    pub hours_per_day: f64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl ContactSegment {
    pub fn new(start_age: f64, end_age: SegmentEnd, hours_per_day: f64) -> Self {
        Self {
            start_age,
            end_age,
            hours_per_day,
            description: None,
        }
    }

    pub fn ongoing(start_age: f64, hours_per_day: f64) -> Self {
        Self::new(start_age, SegmentEnd::Ongoing, hours_per_day)
    }

    pub fn bounded(start_age: f64, end_age: f64, hours_per_day: f64) -> Self {
        Self::new(start_age, SegmentEnd::At(end_age), hours_per_day)
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// The single observer everything is measured against
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    #[serde(flatten)]
    pub birth: BirthMonth,
    pub sex: Sex,
}

impl Profile {
    pub fn new(birth: BirthMonth, sex: Sex) -> Self {
        Self { birth, sex }
    }
}

/// A tracked person
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    pub id: String,

    pub name: String,

    #[serde(flatten)]
    pub birth: BirthMonth,

    pub sex: Sex,

    pub relationship: RelationshipKind,

    /// Ordered by non-decreasing start age; at most one ongoing segment, last
    #[serde(rename = "timeSegments", default)]
    pub timeline: Vec<ContactSegment>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    /// Date the person passed away; shared time stops accruing here
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub passed_date: Option<NaiveDate>,

    pub created_at: DateTime<Utc>,
}

impl Person {
    /// Create a person with an empty timeline
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        birth: BirthMonth,
        sex: Sex,
        relationship: RelationshipKind,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            birth,
            sex,
            relationship,
            timeline: Vec::new(),
            notes: None,
            passed_date: None,
            created_at: Utc::now(),
        }
    }

    pub fn with_timeline(mut self, timeline: Vec<ContactSegment>) -> Self {
        self.timeline = timeline;
        self
    }

    pub fn with_passed_date(mut self, date: NaiveDate) -> Self {
        self.passed_date = Some(date);
        self
    }

    pub fn has_passed(&self) -> bool {
        self.passed_date.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_whole_years_between() {
        let birth = BirthMonth::new(1990, 6).unwrap();

        // Birth month not yet reached
        assert_eq!(whole_years_between(birth, date(2020, 5, 31)), 29);
        // Birth month itself counts as reached regardless of day
        assert_eq!(whole_years_between(birth, date(2020, 6, 1)), 30);
        assert_eq!(whole_years_between(birth, date(2020, 12, 31)), 30);
        // Before birth
        assert_eq!(whole_years_between(birth, date(1989, 1, 1)), -2);
    }

    #[test]
    fn test_birth_month_validation() {
        assert!(BirthMonth::new(2000, 0).is_err());
        assert!(BirthMonth::new(2000, 13).is_err());
        assert!(BirthMonth::new(2000, 12).is_ok());
    }

    #[test]
    fn test_birth_month_parse() {
        let birth: BirthMonth = "1985-03".parse().unwrap();
        assert_eq!(birth.year(), 1985);
        assert_eq!(birth.month(), 3);
        assert_eq!(birth.to_string(), "1985-03");

        assert!(matches!("1985".parse::<BirthMonth>(), Err(Error::InvalidBirthMonth(_))));
        assert!(matches!("1985-xx".parse::<BirthMonth>(), Err(Error::InvalidBirthMonth(_))));
        assert!(matches!("1985-14".parse::<BirthMonth>(), Err(Error::InvalidMonth { month: 14 })));
    }

    #[test]
    fn test_segment_json_shape() {
        let segment = ContactSegment::ongoing(25.0, 0.3).with_description("Occasional visits");
        let json = serde_json::to_value(&segment).unwrap();
        assert_eq!(json["startAge"], 25.0);
        assert!(json["endAge"].is_null());
        assert_eq!(json["hoursPerDay"], 0.3);

        let parsed: ContactSegment =
            serde_json::from_str(r#"{"startAge":0,"endAge":18,"hoursPerDay":12}"#).unwrap();
        assert_eq!(parsed.end_age, SegmentEnd::At(18.0));
        assert_eq!(parsed.description, None);
    }

    #[test]
    fn test_person_json_round_trip_keeps_flattened_birth() {
        let person = Person::new(
            "p1",
            "Ada",
            BirthMonth::new(1960, 11).unwrap(),
            Sex::Female,
            RelationshipKind::Parent,
        )
        .with_timeline(vec![ContactSegment::bounded(0.0, 18.0, 12.0)])
        .with_passed_date(date(2021, 4, 2));

        let json = serde_json::to_value(&person).unwrap();
        assert_eq!(json["birthYear"], 1960);
        assert_eq!(json["birthMonth"], 11);
        assert_eq!(json["relationship"], "parent");
        assert_eq!(json["passedDate"], "2021-04-02");

        let back: Person = serde_json::from_value(json).unwrap();
        assert_eq!(back, person);
    }

    #[test]
    fn test_invalid_month_in_json_is_rejected() {
        let result: std::result::Result<Profile, _> =
            serde_json::from_str(r#"{"birthYear":1990,"birthMonth":13,"sex":"male"}"#);
        assert!(result.is_err());
    }
}
