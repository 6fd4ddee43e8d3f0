/*
 * Responsibility
 * - movies の request/response DTO
 * - validate() で形式チェックし、保存する形の title を返す
 */
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::repos::movie_repo::MovieRow;

const TITLE_MAX_CHARS: usize = 32;

#[derive(Debug, Deserialize)]
pub struct CreateMovieRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub release_date: Option<NaiveDate>,
}

impl CreateMovieRequest {
    /// Returns the normalised title.
    pub fn validate(&self) -> Result<String, &'static str> {
        let title = self.title.as_deref().map(str::trim).unwrap_or_default();
        if title.is_empty() {
            return Err("title is required");
        }
        normalise(title)
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateMovieRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub release_date: Option<NaiveDate>,
}

impl UpdateMovieRequest {
    /// Returns the normalised title, if one was sent.
    pub fn validate(&self) -> Result<Option<String>, &'static str> {
        match self.title.as_deref().map(str::trim) {
            // an empty title means "leave it as is"
            None | Some("") => Ok(None),
            Some(title) => normalise(title).map(Some),
        }
    }
}

/// The limit applies to the stored form; casing can change the length (`ß` -> `SS`).
fn normalise(title: &str) -> Result<String, &'static str> {
    let title = title_case(title);
    if title.chars().count() > TITLE_MAX_CHARS {
        return Err("title must be <= 32 chars");
    }
    Ok(title)
}

/// `the dark knight` -> `The Dark Knight`, `iNSIDE oUT` -> `Inside Out`.
/// Every run of letters starts upper-case, the rest is lower-cased.
pub fn title_case(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut at_word_start = true;
    for c in raw.chars() {
        if c.is_alphabetic() {
            if at_word_start {
                out.extend(c.to_uppercase());
            } else {
                out.extend(c.to_lowercase());
            }
            at_word_start = false;
        } else {
            out.push(c);
            at_word_start = true;
        }
    }
    out
}

#[derive(Debug, Serialize)]
pub struct MovieResponse {
    pub id: i64,
    pub title: String,
    pub release_date: NaiveDate,
}

impl From<MovieRow> for MovieResponse {
    fn from(row: MovieRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            release_date: row.release_date,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MovieListResponse {
    pub movies: Vec<MovieResponse>,
}
