// src/input.rs
use std::fs;
use std::path::Path;

use crate::error::InputError;
use crate::tsv::parse_rows;

/// One address to search for, as read from the query file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    pub line: usize,
    pub text: String,
}

/// Read a tab-delimited query file; the first column of every row is a query.
pub fn load_queries(path: &Path) -> Result<Vec<Query>, InputError> {
    let text = fs::read_to_string(path).map_err(|source| InputError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let queries = parse_queries(&text)?;
    logf!(path = %path.display(), count = queries.len(), "loaded queries");
    Ok(queries)
}

/// Split out for unit tests.
pub fn parse_queries(text: &str) -> Result<Vec<Query>, InputError> {
    parse_rows(text, '\t')
        .into_iter()
        .map(|row| {
            let first = row.cells.into_iter().next().unwrap_or_default();
            let first = first.trim();
            if first.is_empty() {
                return Err(InputError::EmptyQuery { line: row.line });
            }
            Ok(Query { line: row.line, text: s!(first) })
        })
        .collect()
}
