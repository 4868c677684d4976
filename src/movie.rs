// Data models for OMDb search results
//
// OMDb capitalizes its field names ({"Title": .., "Year": .., "Poster": ..}),
// so every field carries an explicit rename. Serde ignores the fields we
// don't track (totalResults, etc.), which keeps parsing robust to API changes.

use crate::sort::SortKey;
use serde::{Deserialize, Deserializer, Serialize};

/// Poster value OMDb sends when a title has no artwork
pub const POSTER_NOT_AVAILABLE: &str = "N/A";

/// One search hit from the movie database
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovieSummary {
    #[serde(rename = "Title", default, deserialize_with = "null_as_empty")]
    pub title: String,

    /// Kept as a string: OMDb returns ranges like "2001–2003" for some titles
    #[serde(rename = "Year", default, deserialize_with = "null_as_empty")]
    pub year: String,

    /// Poster URL, or the literal "N/A"
    #[serde(rename = "Poster", default, deserialize_with = "null_as_empty")]
    pub poster: String,

    #[serde(rename = "imdbID", default, skip_serializing_if = "Option::is_none")]
    pub imdb_id: Option<String>,

    /// OMDb "Type" (always "movie" for our searches)
    #[serde(rename = "Type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

/// A missing or `null` text field reads as an empty string
///
/// One odd record must not sink the whole result list.
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl MovieSummary {
    /// Convenience constructor, mostly for tests and demo data
    pub fn new(title: impl Into<String>, year: impl Into<String>, poster: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            year: year.into(),
            poster: poster.into(),
            imdb_id: None,
            kind: None,
        }
    }
}

/// The ordered list of movies from the last successful search
///
/// Replaced wholesale on every successful search, never merged or appended.
/// Sorting hands out a new ordered copy and leaves the stored order alone,
/// so switching back and forth between keys always starts from API order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultSet {
    movies: Vec<MovieSummary>,
}

impl ResultSet {
    pub fn new(movies: Vec<MovieSummary>) -> Self {
        Self { movies }
    }

    /// True until the first successful (non-empty) search lands
    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }

    pub fn len(&self) -> usize {
        self.movies.len()
    }

    pub fn movies(&self) -> &[MovieSummary] {
        &self.movies
    }

    /// Swap in the result of a new search
    pub fn replace(&mut self, movies: Vec<MovieSummary>) {
        self.movies = movies;
    }

    /// Ordered copy under the given key
    pub fn sorted(&self, key: SortKey) -> Vec<MovieSummary> {
        key.sorted(&self.movies)
    }
}
