//! Sort table for result sets
//!
//! Each `SortKey` maps to one comparator at compile time. String forms only
//! exist at the edges (CLI flag, config); anything unrecognized is rejected
//! there and never reaches the session.

use crate::movie::MovieSummary;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Available orderings for the results grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortKey {
    TitleAsc,
    TitleDesc,
    YearAsc,
    YearDesc,
}

impl SortKey {
    /// All keys in sort-bar order
    pub const ALL: [SortKey; 4] = [
        SortKey::TitleAsc,
        SortKey::TitleDesc,
        SortKey::YearAsc,
        SortKey::YearDesc,
    ];

    /// Canonical name (matches the select option values of the web widget)
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::TitleAsc => "titleAsc",
            SortKey::TitleDesc => "titleDesc",
            SortKey::YearAsc => "yearAsc",
            SortKey::YearDesc => "yearDesc",
        }
    }

    /// Label for the sort bar
    pub fn label(&self) -> &'static str {
        match self {
            SortKey::TitleAsc => "Title A-Z",
            SortKey::TitleDesc => "Title Z-A",
            SortKey::YearAsc => "Oldest first",
            SortKey::YearDesc => "Newest first",
        }
    }

    /// Next key in the sort bar (wraps around)
    pub fn next(self) -> Self {
        match self {
            SortKey::TitleAsc => SortKey::TitleDesc,
            SortKey::TitleDesc => SortKey::YearAsc,
            SortKey::YearAsc => SortKey::YearDesc,
            SortKey::YearDesc => SortKey::TitleAsc,
        }
    }

    /// Previous key in the sort bar (wraps around)
    pub fn prev(self) -> Self {
        match self {
            SortKey::TitleAsc => SortKey::YearDesc,
            SortKey::TitleDesc => SortKey::TitleAsc,
            SortKey::YearAsc => SortKey::TitleDesc,
            SortKey::YearDesc => SortKey::YearAsc,
        }
    }

    /// Compare two movies under this key
    pub fn compare(&self, a: &MovieSummary, b: &MovieSummary) -> Ordering {
        match self {
            SortKey::TitleAsc => compare_titles(&a.title, &b.title),
            SortKey::TitleDesc => compare_titles(&b.title, &a.title),
            SortKey::YearAsc => compare_years(&a.year, &b.year, false),
            SortKey::YearDesc => compare_years(&a.year, &b.year, true),
        }
    }

    /// New ordered copy of `movies`. Stable, so ties keep API order.
    pub fn sorted(&self, movies: &[MovieSummary]) -> Vec<MovieSummary> {
        let mut sorted = movies.to_vec();
        sorted.sort_by(|a, b| self.compare(a, b));
        sorted
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error for sort key strings that don't name a key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseSortKeyError(String);

impl fmt::Display for ParseSortKeyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown sort key '{}' (expected titleAsc, titleDesc, yearAsc or yearDesc)",
            self.0
        )
    }
}

impl std::error::Error for ParseSortKeyError {}

impl FromStr for SortKey {
    type Err = ParseSortKeyError;

    /// Accepts "titleAsc", "title-asc", "TITLE_ASC" and friends
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .flat_map(char::to_lowercase)
            .collect();

        match normalized.as_str() {
            "titleasc" => Ok(SortKey::TitleAsc),
            "titledesc" => Ok(SortKey::TitleDesc),
            "yearasc" => Ok(SortKey::YearAsc),
            "yeardesc" => Ok(SortKey::YearDesc),
            _ => Err(ParseSortKeyError(s.to_string())),
        }
    }
}

/// Case-insensitive first, then case-sensitive so the order stays total
fn compare_titles(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

/// Numeric year comparison. Unparsable years go last in either direction.
fn compare_years(a: &str, b: &str, descending: bool) -> Ordering {
    match (parse_year(a), parse_year(b)) {
        (Some(x), Some(y)) if descending => y.cmp(&x),
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Leading digits of a year field: "1999" -> 1999, "2001–2003" -> 2001, "N/A" -> None
pub fn parse_year(year: &str) -> Option<u32> {
    let trimmed = year.trim();
    let end = trimmed
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(trimmed.len());
    trimmed[..end].parse().ok()
}
