use chrono::NaiveDate;

use crate::date::DateValue;

/// One visited place as it appears in the input data files.
///
/// Field names keep the source data's capitalized JSON casing. Coordinates
/// are passed through unvalidated (geocoding correctness is a caller
/// concern).
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LocationRecord {
    #[serde(rename = "City")]
    pub city: String,
    #[serde(rename = "Date")]
    pub date: DateValue,
    #[serde(rename = "Latitude")]
    pub latitude: f64,
    #[serde(rename = "Longitude")]
    pub longitude: f64,
    #[serde(rename = "Notes", default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Visit category. The declaration order is the tie-break order used when
/// two entries resolve to the same date.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    City,
    Ski,
    Hike,
    Lived,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::City,
        Category::Ski,
        Category::Hike,
        Category::Lived,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::City => "city",
            Self::Ski => "ski",
            Self::Hike => "hike",
            Self::Lived => "lived",
        }
    }
}

/// One place on the built timeline: the record, its resolved calendar date
/// and the category of the list it came from. Created once by the timeline
/// builder, read-only thereafter.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TimelineEntry {
    pub location: LocationRecord,
    pub date: NaiveDate,
    pub category: Category,
}

/// The four categorized input lists, in their fixed concatenation order.
/// Unknown keys are rejected so a typoed category name cannot silently
/// drop a whole list.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CategorizedRecords {
    #[serde(default)]
    pub city: Vec<LocationRecord>,
    #[serde(default)]
    pub ski: Vec<LocationRecord>,
    #[serde(default)]
    pub hike: Vec<LocationRecord>,
    #[serde(default)]
    pub lived: Vec<LocationRecord>,
}

impl CategorizedRecords {
    pub fn len(&self) -> usize {
        self.city.len() + self.ski.len() + self.hike.len() + self.lived.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn list(&self, category: Category) -> &[LocationRecord] {
        match category {
            Category::City => &self.city,
            Category::Ski => &self.ski,
            Category::Hike => &self.hike,
            Category::Lived => &self.lived,
        }
    }
}
