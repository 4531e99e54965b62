//! Tabular filter fixtures.
//!
//! Each fixture is a header-less CSV file whose rows are
//! `userId,title,body`. Fields may be quoted and may span several lines.
//! Two fixtures ship with the crate; a directory holding files with the same
//! names can replace them.

use crate::models::filter::abbreviate;
use crate::models::PostFilter;
use serde::Deserialize;
use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// File name of the rows expected to match at least one post.
pub const VALID_ROWS_FILE: &str = "filter_valid_posts.csv";

/// File name of the rows expected to match no post.
pub const INVALID_ROWS_FILE: &str = "filter_invalid_posts.csv";

const BUNDLED_VALID_ROWS: &str = include_str!("../../fixtures/filter/filter_valid_posts.csv");
const BUNDLED_INVALID_ROWS: &str = include_str!("../../fixtures/filter/filter_invalid_posts.csv");

/// Errors raised while reading a fixture.
#[derive(Debug, Error)]
pub enum FixtureError {
    #[error("failed to open fixture {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed row in {source_name}{}: {message}", .line.map(|l| format!(" (line {})", l)).unwrap_or_default())]
    Csv {
        source_name: String,
        line: Option<u64>,
        message: String,
    },

    #[error("fixture {0} has no rows")]
    Empty(String),
}

/// One row of a filter fixture.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FilterRow {
    pub user_id: i64,
    pub title: String,
    pub body: String,
}

impl FilterRow {
    /// The filter querying all three fields of the row.
    pub fn to_filter(&self) -> PostFilter {
        PostFilter::new()
            .user_id(self.user_id)
            .title(self.title.clone())
            .body(self.body.clone())
    }
}

impl fmt::Display for FilterRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "userId={}, title={:?}, body={:?}",
            self.user_id,
            abbreviate(&self.title, 32),
            abbreviate(&self.body, 24)
        )
    }
}

/// Parses fixture rows from `reader`. `source_name` appears in errors.
pub fn parse_filter_rows<R: Read>(
    source_name: &str,
    reader: R,
) -> Result<Vec<FilterRow>, FixtureError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .from_reader(reader);

    let mut rows = Vec::new();
    for result in csv_reader.deserialize::<FilterRow>() {
        let row = result.map_err(|e| FixtureError::Csv {
            source_name: source_name.to_string(),
            line: e.position().map(|p| p.line()),
            message: e.to_string(),
        })?;
        rows.push(row);
    }

    if rows.is_empty() {
        return Err(FixtureError::Empty(source_name.to_string()));
    }

    Ok(rows)
}

/// Loads fixture rows from a file.
pub fn load_filter_rows(path: &Path) -> Result<Vec<FilterRow>, FixtureError> {
    let file = File::open(path).map_err(|source| FixtureError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_filter_rows(&path.display().to_string(), file)
}

/// Rows expected to match posts, from `dir` or the bundled fixture.
pub fn valid_filter_rows(dir: Option<&Path>) -> Result<Vec<FilterRow>, FixtureError> {
    rows_from(dir, VALID_ROWS_FILE, BUNDLED_VALID_ROWS)
}

/// Rows expected to match nothing, from `dir` or the bundled fixture.
pub fn invalid_filter_rows(dir: Option<&Path>) -> Result<Vec<FilterRow>, FixtureError> {
    rows_from(dir, INVALID_ROWS_FILE, BUNDLED_INVALID_ROWS)
}

fn rows_from(
    dir: Option<&Path>,
    file_name: &str,
    bundled: &str,
) -> Result<Vec<FilterRow>, FixtureError> {
    match dir {
        Some(dir) => load_filter_rows(&dir.join(file_name)),
        None => parse_filter_rows(file_name, bundled.as_bytes()),
    }
}
