// src/progress.rs
use std::io::Write;

/// Lightweight progress reporting for the batch loop.
/// Frontends implement this to surface status to the operator.
pub trait Progress {
    /// Called at the start with the number of queries.
    fn begin(&mut self, _total: usize) {}

    /// Called before each query is submitted.
    fn query_started(&mut self, _index: usize, _query: &str) {}

    /// Called when a query is written out as an error record.
    fn query_failed(&mut self, _query: &str, _reason: &str) {}

    /// Called at the end, successful or not.
    fn finish(&mut self) {}
}

/// A no-op progress sink.
pub struct NullProgress;
impl Progress for NullProgress {}

/// One line per query on any writer (stderr for the CLI).
pub struct LineProgress<W: Write> {
    out: W,
}

impl<W: Write> LineProgress<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl LineProgress<std::io::Stderr> {
    pub fn stderr() -> Self {
        Self::new(std::io::stderr())
    }
}

impl<W: Write> Progress for LineProgress<W> {
    fn query_started(&mut self, _index: usize, query: &str) {
        let _ = writeln!(self.out, "search_address:\t {query}");
    }

    fn query_failed(&mut self, query: &str, reason: &str) {
        let _ = writeln!(self.out, "failed_address:\t {query}\t{reason}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_line_per_started_query() {
        let mut p = LineProgress::new(Vec::new());
        p.begin(2);
        p.query_started(0, "세종대로 209");
        p.query_started(1, "우동");
        p.finish();
        let text = String::from_utf8(p.into_inner()).unwrap();
        assert_eq!(text, "search_address:\t 세종대로 209\nsearch_address:\t 우동\n");
    }
}
