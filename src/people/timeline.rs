//! Timeline editing
//!
//! Edits never touch a stored timeline in place: each function takes the
//! current segments and returns the replacement timeline.

use super::data::{ContactSegment, SegmentEnd};
use crate::error::{Error, Result};

/// Rate given to a newly appended segment
pub const NEW_SEGMENT_HOURS_PER_DAY: f64 = 1.0;

/// Changes to apply to one segment; `None` leaves a field as it is
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SegmentChange {
    pub start_age: Option<f64>,
    pub end_age: Option<SegmentEnd>,
    pub hours_per_day: Option<f64>,
    pub description: Option<String>,
}

fn check_index(timeline: &[ContactSegment], index: usize) -> Result<()> {
    if index >= timeline.len() {
        return Err(Error::SegmentIndex {
            index,
            len: timeline.len(),
        });
    }
    Ok(())
}

/// Append an ongoing "New period" segment
///
/// It starts where the last segment ended, or at the observer's current age
/// when the last segment is ongoing or the timeline is empty.
pub fn add_segment(timeline: &[ContactSegment], observer_age: f64) -> Vec<ContactSegment> {
    let start_age = match timeline.last().map(|s| s.end_age) {
        Some(SegmentEnd::At(end)) => end,
        _ => observer_age,
    };

    let mut edited = timeline.to_vec();
    edited.push(
        ContactSegment::ongoing(start_age, NEW_SEGMENT_HOURS_PER_DAY).with_description("New period"),
    );
    edited
}

/// Drop the segment at `index`; the last remaining segment cannot be removed
pub fn remove_segment(timeline: &[ContactSegment], index: usize) -> Result<Vec<ContactSegment>> {
    check_index(timeline, index)?;
    if timeline.len() <= 1 {
        return Err(Error::LastSegment);
    }

    let mut edited = timeline.to_vec();
    edited.remove(index);
    Ok(edited)
}

/// Apply `change` to the segment at `index`
pub fn change_segment(
    timeline: &[ContactSegment],
    index: usize,
    change: SegmentChange,
) -> Result<Vec<ContactSegment>> {
    check_index(timeline, index)?;

    let mut edited = timeline.to_vec();
    let segment = &mut edited[index];
    if let Some(start_age) = change.start_age {
        segment.start_age = start_age;
    }
    if let Some(end_age) = change.end_age {
        segment.end_age = end_age;
    }
    if let Some(hours_per_day) = change.hours_per_day {
        segment.hours_per_day = hours_per_day;
    }
    if let Some(description) = change.description {
        segment.description = Some(description);
    }
    Ok(edited)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn timeline() -> Vec<ContactSegment> {
        vec![
            ContactSegment::bounded(0.0, 18.0, 12.0),
            ContactSegment::bounded(18.0, 25.0, 0.5),
        ]
    }

    #[test]
    fn test_add_after_bounded_segment_starts_at_its_end() {
        let edited = add_segment(&timeline(), 40.0);

        assert_eq!(edited.len(), 3);
        let added = &edited[2];
        assert_eq!(added.start_age, 25.0);
        assert!(added.end_age.is_ongoing());
        assert_eq!(added.hours_per_day, 1.0);
        assert_eq!(added.description.as_deref(), Some("New period"));
    }

    #[test]
    fn test_add_after_ongoing_or_empty_starts_at_observer_age() {
        let edited = add_segment(&[ContactSegment::ongoing(5.0, 2.0)], 33.0);
        assert_eq!(edited[1].start_age, 33.0);

        let edited = add_segment(&[], 33.0);
        assert_eq!(edited.len(), 1);
        assert_eq!(edited[0].start_age, 33.0);
    }

    #[test]
    fn test_remove_segment() {
        let edited = remove_segment(&timeline(), 0).unwrap();
        assert_eq!(edited, vec![ContactSegment::bounded(18.0, 25.0, 0.5)]);

        assert!(matches!(remove_segment(&edited, 0), Err(Error::LastSegment)));
        assert!(matches!(
            remove_segment(&timeline(), 2),
            Err(Error::SegmentIndex { index: 2, len: 2 })
        ));
    }

    #[test]
    fn test_change_segment_only_touches_given_fields() {
        let change = SegmentChange {
            end_age: Some(SegmentEnd::Ongoing),
            hours_per_day: Some(2.0),
            ..SegmentChange::default()
        };
        let edited = change_segment(&timeline(), 1, change).unwrap();

        assert_eq!(edited[0], timeline()[0]);
        assert_eq!(edited[1].start_age, 18.0);
        assert!(edited[1].end_age.is_ongoing());
        assert_eq!(edited[1].hours_per_day, 2.0);
        assert_eq!(edited[1].description, None);

        let change = SegmentChange {
            description: Some("College".to_string()),
            ..SegmentChange::default()
        };
        let edited = change_segment(&edited, 0, change).unwrap();
        assert_eq!(edited[0].description.as_deref(), Some("College"));

        assert!(matches!(
            change_segment(&timeline(), 9, SegmentChange::default()),
            Err(Error::SegmentIndex { .. })
        ));
    }
}
