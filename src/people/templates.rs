//! Built-in relationship timeline templates
//!
//! Each template is a typical contact history for a kind of relationship. A
//! template can be shifted to begin later in the observer's life with
//! [`adjust_for_start_age`], e.g. for a friend met at 30.

use super::data::{ContactSegment, SegmentEnd};
use crate::error::{Error, Result};

/// A named starting timeline
#[derive(Debug, Clone, PartialEq)]
pub struct ScenarioTemplate {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    segments: &'static [TemplateSegment],
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct TemplateSegment {
    start_age: f64,
    end_age: Option<f64>,
    hours_per_day: f64,
    description: &'static str,
}

const fn seg(
    start_age: f64,
    end_age: Option<f64>,
    hours_per_day: f64,
    description: &'static str,
) -> TemplateSegment {
    TemplateSegment {
        start_age,
        end_age,
        hours_per_day,
        description,
    }
}

impl ScenarioTemplate {
    /// Fresh copy of the template's segments
    pub fn segments(&self) -> Vec<ContactSegment> {
        self.segments
            .iter()
            .map(|s| {
                ContactSegment::new(s.start_age, SegmentEnd::from(s.end_age), s.hours_per_day)
                    .with_description(s.description)
            })
            .collect()
    }

    /// Segments shifted to start at the observer's age `start_age`
    pub fn segments_from(&self, start_age: f64) -> Vec<ContactSegment> {
        adjust_for_start_age(&self.segments(), start_age)
    }
}

/// Template used when nothing else is specified
pub const DEFAULT_TEMPLATE_ID: &str = "traditional-family";

pub const SCENARIO_TEMPLATES: &[ScenarioTemplate] = &[
    ScenarioTemplate {
        id: "traditional-family",
        name: "Traditional Family (Left Home at 18)",
        description: "Lived at home until 18, then moved away for college/work. Typical visits during holidays and occasional weekends.",
        segments: &[
            seg(0.0, Some(18.0), 12.0, "Living at home - Daily interaction"),
            seg(18.0, Some(25.0), 0.5, "College/Early career - Holiday visits"),
            seg(25.0, None, 0.3, "Independent adult - Occasional visits"),
        ],
    },
    ScenarioTemplate {
        id: "strong-family-nearby",
        name: "Strong Family (Living Nearby)",
        description: "Remained close to family. Frequent visits and regular interaction throughout life.",
        segments: &[
            seg(0.0, Some(18.0), 14.0, "Living at home - Constant presence"),
            seg(18.0, Some(25.0), 3.0, "Young adult - Weekly dinners"),
            seg(25.0, None, 2.0, "Adult - Regular visits"),
        ],
    },
    ScenarioTemplate {
        id: "homeschool-close",
        name: "Homeschooled (Very Close)",
        description: "Homeschooled and lived at home through college. Exceptionally close family bond.",
        segments: &[
            seg(0.0, Some(22.0), 18.0, "Homeschooled - Nearly constant togetherness"),
            seg(22.0, None, 2.0, "Adult - Maintained closeness"),
        ],
    },
    ScenarioTemplate {
        id: "distant-family",
        name: "Distant Family",
        description: "Limited contact. Moved far away or strained relationship.",
        segments: &[
            seg(0.0, Some(18.0), 8.0, "Childhood - Moderate interaction"),
            seg(18.0, None, 0.1, "Adult - Rare contact"),
        ],
    },
    ScenarioTemplate {
        id: "foster-care",
        name: "Foster Care / Separated",
        description: "Foster care or separated from biological parents. Minimal or no contact.",
        segments: &[
            seg(0.0, Some(5.0), 8.0, "Early childhood"),
            seg(5.0, None, 0.0, "Separated - No contact"),
        ],
    },
    ScenarioTemplate {
        id: "spouse-traditional",
        name: "Spouse (Traditional Marriage)",
        description: "Met in mid-20s, married, living together.",
        segments: &[seg(25.0, None, 12.0, "Married - Living together")],
    },
    ScenarioTemplate {
        id: "close-friend",
        name: "Close Friend (Lifelong)",
        description: "Best friend since childhood. Regular contact throughout life.",
        segments: &[
            seg(8.0, Some(18.0), 3.0, "School years - Daily hangouts"),
            seg(18.0, None, 0.5, "Adult - Regular catch-ups"),
        ],
    },
    ScenarioTemplate {
        id: "sibling-close",
        name: "Sibling (Very Close)",
        description: "Close sibling relationship. Grew up together, maintained connection.",
        segments: &[
            seg(0.0, Some(18.0), 8.0, "Childhood - Shared home"),
            seg(18.0, None, 1.0, "Adult - Regular contact"),
        ],
    },
    ScenarioTemplate {
        id: "custom",
        name: "Custom (Build Your Own)",
        description: "Create your own timeline from scratch.",
        segments: &[seg(0.0, None, 4.0, "Edit this segment")],
    },
];

/// Look up a template by id
pub fn find_template(id: &str) -> Result<&'static ScenarioTemplate> {
    SCENARIO_TEMPLATES
        .iter()
        .find(|t| t.id == id)
        .ok_or_else(|| Error::UnknownTemplate(id.to_string()))
}

/// Single ongoing segment used when a template has nothing left after shifting
fn custom_period(start_age: f64) -> ContactSegment {
    ContactSegment::ongoing(start_age, 1.0).with_description("Custom period")
}

/// Shift a timeline so it begins at the observer's age `start_age`
///
/// Segments that end at or before `start_age` are dropped and the first
/// remaining segment is moved to start there. A start age of 0 leaves the
/// timeline untouched.
pub fn adjust_for_start_age(segments: &[ContactSegment], start_age: f64) -> Vec<ContactSegment> {
    if start_age == 0.0 {
        return segments.to_vec();
    }

    let mut relevant: Vec<ContactSegment> = segments
        .iter()
        .filter(|s| match s.end_age {
            SegmentEnd::Ongoing => true,
            SegmentEnd::At(end) => end > start_age,
        })
        .cloned()
        .collect();

    match relevant.first_mut() {
        Some(first) => first.start_age = start_age,
        None => return vec![custom_period(start_age)],
    }

    relevant
}
