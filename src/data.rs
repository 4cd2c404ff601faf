use std::{fs::File, io::BufReader, path::Path};

use anyhow::Context as _;

use crate::{
    error::{WaylineError, WaylineResult},
    model::CategorizedRecords,
};

/// Loads the categorized location lists from a JSON file. Missing category
/// arrays default to empty; unknown keys are rejected so a typoed category
/// does not silently drop a whole list.
pub fn load_records(path: impl AsRef<Path>) -> WaylineResult<CategorizedRecords> {
    let path = path.as_ref();
    let file = File::open(path)
        .with_context(|| format!("opening location data {}", path.display()))?;
    let records = read_records(BufReader::new(file))?;
    tracing::debug!(path = %path.display(), records = records.len(), "location data loaded");
    Ok(records)
}

pub fn read_records(reader: impl std::io::Read) -> WaylineResult<CategorizedRecords> {
    let mut de = serde_json::Deserializer::from_reader(reader);
    serde::Deserialize::deserialize(&mut de)
        .map_err(|e| WaylineError::serde(format!("location data: {e}")))
}
