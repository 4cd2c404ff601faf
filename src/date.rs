use chrono::NaiveDate;

/// A date as the input data carries it: either a bare year (JSON number)
/// or loosely-structured text like `"Jan 2009"`, `"July 2005"` or `"2013"`.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum DateValue {
    Year(i32),
    Text(String),
}

impl std::fmt::Display for DateValue {
    /// The raw input form, as popups show it.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Year(y) => write!(f, "{y}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

const MONTH_ABBREVS: [&str; 12] = [
    "jan", "feb", "mar", "apr", "may", "jun", "jul", "aug", "sep", "oct", "nov", "dec",
];

const MONTH_NAMES: [&str; 12] = [
    "january",
    "february",
    "march",
    "april",
    "may",
    "june",
    "july",
    "august",
    "september",
    "october",
    "november",
    "december",
];

/// Resolves a loose date value to a calendar date, using `today` when the
/// input cannot be understood.
///
/// Total: never fails. Recognized forms are tried in order, first match
/// wins, matching the whole trimmed string:
///
/// 1. bare year value -> January 1 of that year
/// 2. `"<Abbrev> <YYYY>"` (3-letter month, case-insensitive) -> 1st of month
/// 3. `"<FullMonth> <YYYY>"` (case-insensitive) -> 1st of month
/// 4. `"<YYYY>"` (4-digit year string) -> January 1
/// 5. a few common full-date formats; anything else degrades to `today`
///
/// Day-of-month is normalized to the 1st for forms 1-4; only year and month
/// are considered. The leniency is a compatibility policy: malformed inputs
/// sort to "now" rather than signaling an error.
pub fn resolve_on(value: &DateValue, today: NaiveDate) -> NaiveDate {
    match value {
        DateValue::Year(y) => year_start(*y).unwrap_or(today),
        DateValue::Text(s) => resolve_text(s.trim(), today),
    }
}

/// [`resolve_on`] against the local wall-clock date.
pub fn resolve(value: &DateValue) -> NaiveDate {
    resolve_on(value, chrono::Local::now().date_naive())
}

fn resolve_text(s: &str, today: NaiveDate) -> NaiveDate {
    if let Some(date) = parse_month_year(s) {
        return date;
    }
    if let Some(date) = parse_bare_year(s) {
        return date;
    }
    parse_generic(s).unwrap_or(today)
}

/// `"Jan 2009"` / `"January 2009"`: exactly two whitespace-separated tokens,
/// a month name (abbreviated first, then full, case-insensitive) and a
/// 4-digit year.
fn parse_month_year(s: &str) -> Option<NaiveDate> {
    let mut parts = s.split_whitespace();
    let name = parts.next()?;
    let year = parts.next()?;
    if parts.next().is_some() {
        return None;
    }

    let lower = name.to_ascii_lowercase();
    let month0 = MONTH_ABBREVS
        .iter()
        .position(|m| *m == lower)
        .or_else(|| MONTH_NAMES.iter().position(|m| *m == lower))?;
    let year = parse_four_digits(year)?;
    NaiveDate::from_ymd_opt(year, month0 as u32 + 1, 1)
}

fn parse_bare_year(s: &str) -> Option<NaiveDate> {
    year_start(parse_four_digits(s)?)
}

fn parse_four_digits(s: &str) -> Option<i32> {
    if s.len() == 4 && s.bytes().all(|b| b.is_ascii_digit()) {
        s.parse().ok()
    } else {
        None
    }
}

fn parse_generic(s: &str) -> Option<NaiveDate> {
    for fmt in ["%Y-%m-%d", "%m/%d/%Y", "%B %d, %Y"] {
        if let Ok(date) = NaiveDate::parse_from_str(s, fmt) {
            return Some(date);
        }
    }
    chrono::DateTime::parse_from_rfc3339(s)
        .ok()
        .map(|dt| dt.date_naive())
}

fn year_start(year: i32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, 1, 1)
}

/// Display form used by popups and progress labels, e.g. `"July 2005"`.
pub fn format_month_year(date: NaiveDate) -> String {
    date.format("%B %Y").to_string()
}
