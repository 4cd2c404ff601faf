use chrono::Datelike;

use crate::model::TimelineEntry;

/// A label marking where a given year falls along the playback progress
/// axis, as a percentage in `[0, 100]`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct YearMarker {
    pub year: i32,
    pub position: f64,
}

/// Derives one marker per distinct year in an already-sorted timeline,
/// ascending, positioned at the year's first occurrence:
/// `index / (len - 1) * 100`, clamped to `[0, 100]`.
///
/// Empty timelines yield no markers; a single-entry timeline yields one
/// marker at position 0 rather than a NaN from the 0/0 division.
pub fn year_markers(timeline: &[TimelineEntry]) -> Vec<YearMarker> {
    if timeline.is_empty() {
        return Vec::new();
    }

    let span = timeline.len() - 1;
    let mut markers: Vec<YearMarker> = Vec::new();
    for (index, entry) in timeline.iter().enumerate() {
        let year = entry.date.year();
        if markers.last().is_some_and(|m| m.year == year) {
            continue;
        }
        let position = if span == 0 {
            0.0
        } else {
            (index as f64 / span as f64 * 100.0).clamp(0.0, 100.0)
        };
        markers.push(YearMarker { year, position });
    }
    markers
}
