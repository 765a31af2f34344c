// src/runner.rs
use std::io::Write;
use std::time::Instant;

use crate::{
    browser::Browser,
    config::options::{AppOptions, ErrorPolicy},
    emit::Emitter,
    error::Result,
    input::Query,
    progress::Progress,
    record::Record,
    session::QuerySession,
    specs,
};

/// Summary of what was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunSummary {
    /// Records written, error records included.
    pub processed: usize,
    /// Queries written out as error records (skip policy only).
    pub failed: usize,
}

/// Top-level runner: owns the browser session and the output files for the
/// whole batch and releases both on every exit path.
pub fn run<B: Browser, O: Write>(
    queries: &[Query],
    browser: B,
    opts: &AppOptions,
    out: O,
    progress: &mut dyn Progress,
) -> Result<RunSummary> {
    let t = Instant::now();
    let mut session = QuerySession::new(browser, &opts.session);
    let mut emitter = Emitter::from_options(out, &opts.output)?;

    let outcome = run_batch(queries, &mut session, &mut emitter, progress, opts.on_error);

    let closed = session.close();
    let finished = emitter.finish();
    progress.finish();

    let summary = match outcome {
        Ok(s) => s,
        Err(e) => {
            if let Err(c) = &closed { loge!("browser release after failure: {c}"); }
            if let Err(f) = &finished { loge!("output flush after failure: {f}"); }
            loge!("run aborted: {e}");
            return Err(e);
        }
    };
    closed?;
    finished?;

    logf!(processed = summary.processed, failed = summary.failed, "run complete in {:?}", t.elapsed());
    Ok(summary)
}

/// The per-query loop: submit, extract, transform, emit, strictly in order.
pub fn run_batch<B: Browser, O: Write>(
    queries: &[Query],
    session: &mut QuerySession<B>,
    emitter: &mut Emitter<O>,
    progress: &mut dyn Progress,
    policy: ErrorPolicy,
) -> Result<RunSummary> {
    let mut summary = RunSummary::default();
    progress.begin(queries.len());

    for (i, q) in queries.iter().enumerate() {
        progress.query_started(i, &q.text);

        let page = session.submit(&q.text)?;
        let record = match lookup(&q.text, &page) {
            Ok(rec) => rec,
            Err(e) if e.is_per_query() && policy == ErrorPolicy::Skip => {
                loge!(line = q.line, query = %q.text, "skipping: {e}");
                progress.query_failed(&q.text, &e.to_string());
                summary.failed += 1;
                Record::failed(&q.text, e.to_string())
            }
            Err(e) => {
                loge!(line = q.line, query = %q.text, "{e}");
                return Err(e);
            }
        };

        emitter.emit(&record)?;
        summary.processed += 1;
    }

    Ok(summary)
}

/// Page source → finished record.
pub fn lookup(query: &str, page: &str) -> Result<Record> {
    let raw = specs::juso::extract(page)?;
    let at = raw.coordinates()?;
    Ok(Record::from_raw(query, raw, at))
}
