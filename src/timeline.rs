use chrono::NaiveDate;

use crate::{
    date,
    model::{CategorizedRecords, Category, TimelineEntry},
};

/// Merges the four categorized lists into one timeline sorted ascending by
/// resolved date, with `today` as the fallback for unresolvable dates.
///
/// Records are tagged and concatenated in the fixed order City, Ski, Hike,
/// Lived; the sort is stable, so same-date entries keep category order and
/// then original list order. No deduplication and no coordinate validation:
/// malformed records pass through unchanged.
#[tracing::instrument(skip(records), fields(count = records.len()))]
pub fn build_on(records: &CategorizedRecords, today: NaiveDate) -> Vec<TimelineEntry> {
    let mut timeline: Vec<TimelineEntry> = Vec::with_capacity(records.len());
    for category in Category::ALL {
        timeline.extend(records.list(category).iter().map(|location| TimelineEntry {
            location: location.clone(),
            date: date::resolve_on(&location.date, today),
            category,
        }));
    }

    timeline.sort_by_key(|entry| entry.date);
    tracing::debug!(entries = timeline.len(), "timeline built");
    timeline
}

/// [`build_on`] against the local wall-clock date.
pub fn build(records: &CategorizedRecords) -> Vec<TimelineEntry> {
    build_on(records, chrono::Local::now().date_naive())
}
