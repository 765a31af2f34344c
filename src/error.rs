// src/error.rs
use std::path::PathBuf;

use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Everything that can stop a batch run.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Input(#[from] InputError),
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error(transparent)]
    Extract(#[from] ExtractError),
    #[error(transparent)]
    Transform(#[from] TransformError),
    #[error(transparent)]
    Emit(#[from] EmitError),
}

/// Malformed or unreadable query file. Raised before any browser starts.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("cannot read query file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("line {line}: no address in first column")]
    EmptyQuery { line: usize },
}

/// Failures reported by a browser backend.
#[derive(Debug, Error)]
pub enum BrowserError {
    #[error("webdriver transport: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("webdriver {error}: {message}")]
    Protocol { error: String, message: String },
    #[error("unexpected webdriver reply: {0}")]
    Reply(String),
    #[error("cannot read fixture {path}: {source}")]
    Fixture {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid selector {0:?}")]
    Selector(String),
    #[error("browser session already closed")]
    Closed,
}

/// The search page could not be driven. Always fatal for the run.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("browser: {0}")]
    Browser(#[from] BrowserError),
    #[error("search page control not found: {selector} (waited {waited_ms} ms)")]
    ControlMissing { selector: String, waited_ms: u128 },
    #[error("empty query refused")]
    EmptyQuery,
}

/// The result page did not have the expected structure.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("invalid selector {0:?}")]
    Selector(&'static str),
    #[error("result page element missing: {0}")]
    Missing(&'static str),
    #[error("map link handler malformed: {0:?}")]
    MapLink(String),
    #[error("expected {expected} {what} rows, found {found}")]
    Rows {
        what: &'static str,
        expected: usize,
        found: usize,
    },
}

/// Positional tokens that are not numbers.
#[derive(Debug, Error)]
#[error("positional token {token:?} is not a number")]
pub struct TransformError {
    pub token: String,
}

/// Writing results failed.
#[derive(Debug, Error)]
pub enum EmitError {
    #[error("output: {0}")]
    Io(#[from] std::io::Error),
    #[error("json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("cannot prepare output path {path}: {source}")]
    Path {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// Per-query failures that the skip policy may step over.
    pub fn is_per_query(&self) -> bool {
        matches!(self, Error::Extract(_) | Error::Transform(_))
    }
}
