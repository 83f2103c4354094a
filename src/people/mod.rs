//! People data structures, timeline templates and editing, roster storage and import

mod data;
pub mod loader;
pub mod store;
pub mod templates;
pub mod timeline;

pub use data::{
    whole_years_between, BirthMonth, ContactSegment, Person, Profile, RelationshipKind,
    SegmentEnd, Sex,
};
pub use loader::{import_people, import_people_from_reader, ImportOptions};
pub use store::{Roster, DEFAULT_STORE_PATH};
pub use templates::{
    adjust_for_start_age, find_template, ScenarioTemplate, DEFAULT_TEMPLATE_ID, SCENARIO_TEMPLATES,
};
pub use timeline::{add_segment, change_segment, remove_segment, SegmentChange};
