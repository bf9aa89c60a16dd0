use chrono::NaiveDate;
use serde::Deserialize;

use super::error::{FetchError, SchemaError};

/// Display-ready film record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Movie {
    /// Episode number, used as the row key.
    pub id: i64,
    pub title: String,
    pub opening_text: String,
    pub release_date: String,
}

/// One film as the API sends it. Every field is optional on the wire.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawFilm {
    pub episode_id: Option<i64>,
    pub title: Option<String>,
    pub opening_crawl: Option<String>,
    pub release_date: Option<String>,
}

/// The films listing envelope. `count`, `next` and `previous` are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FilmsPage {
    pub results: Option<Vec<RawFilm>>,
}

const RELEASE_DATE_FORMAT: &str = "%Y-%m-%d";

impl TryFrom<RawFilm> for Movie {
    type Error = SchemaError;

    fn try_from(raw: RawFilm) -> Result<Self, Self::Error> {
        let id = raw.episode_id.ok_or(SchemaError::MissingField("episode_id"))?;
        let title = raw.title.ok_or(SchemaError::MissingField("title"))?;
        let opening_text = raw
            .opening_crawl
            .ok_or(SchemaError::MissingField("opening_crawl"))?;
        let release_date = raw
            .release_date
            .ok_or(SchemaError::MissingField("release_date"))?;

        // Checked but kept verbatim for display.
        if NaiveDate::parse_from_str(&release_date, RELEASE_DATE_FORMAT).is_err() {
            return Err(SchemaError::InvalidReleaseDate(release_date));
        }

        Ok(Movie {
            id,
            title,
            opening_text,
            release_date,
        })
    }
}

impl FilmsPage {
    /// Validate every record, preserving order. The first bad record fails the page.
    pub fn into_movies(self) -> Result<Vec<Movie>, FetchError> {
        let results = self.results.ok_or_else(|| {
            FetchError::MalformedResponse("response has no `results` field".to_string())
        })?;

        results
            .into_iter()
            .enumerate()
            .map(|(index, raw)| {
                Movie::try_from(raw).map_err(|source| FetchError::InvalidRecord { index, source })
            })
            .collect()
    }
}

impl Movie {
    /// Opening text collapsed onto a single line.
    pub fn opening_summary(&self) -> String {
        self.opening_text.split_whitespace().collect::<Vec<_>>().join(" ")
    }
}
