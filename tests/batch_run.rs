// tests/batch_run.rs
//
// Whole-batch runs against scripted in-memory browsers: ordering, one line
// per query, abort vs. skip, and release of the browser and output file.
//
use std::cell::Cell;
use std::fs;
use std::rc::Rc;
use std::time::Duration;

use juso_scrape::browser::{Browser, Element};
use juso_scrape::config::consts::KEY_ENTER;
use juso_scrape::config::options::{AppOptions, ErrorPolicy, OutputOptions, WaitOptions};
use juso_scrape::error::{BrowserError, Error};
use juso_scrape::input::parse_queries;
use juso_scrape::progress::{LineProgress, NullProgress};
use juso_scrape::runner;
use serde_json::{Deserializer, Value};

const SEARCH: &str = include_str!("fixtures/search.html");
const RESULT: &str = include_str!("fixtures/result.html");
const NO_MATCH: &str = include_str!("fixtures/no_match.html");

/// Serves the search form until Enter, then the page scripted for whatever
/// was typed. Counts quits.
struct Scripted {
    pages: Vec<(&'static str, String)>,
    typed: String,
    submitted: bool,
    quits: Rc<Cell<u32>>,
}

impl Scripted {
    fn new(pages: Vec<(&'static str, String)>, quits: Rc<Cell<u32>>) -> Self {
        Self { pages, typed: String::new(), submitted: false, quits }
    }

    fn current(&self) -> String {
        if !self.submitted {
            return SEARCH.to_string();
        }
        self.pages
            .iter()
            .find(|(q, _)| *q == self.typed)
            .map(|(_, page)| page.clone())
            .unwrap_or_else(|| NO_MATCH.to_string())
    }
}

impl Browser for Scripted {
    fn navigate(&mut self, _url: &str) -> Result<(), BrowserError> {
        self.typed.clear();
        self.submitted = false;
        Ok(())
    }
    fn find_element(&mut self, css: &str) -> Result<Option<Element>, BrowserError> {
        let doc = scraper::Html::parse_document(&self.current());
        let sel = scraper::Selector::parse(css).map_err(|_| BrowserError::Selector(css.into()))?;
        Ok(doc.select(&sel).next().map(|_| Element(css.into())))
    }
    fn click(&mut self, _el: &Element) -> Result<(), BrowserError> { Ok(()) }
    fn clear(&mut self, _el: &Element) -> Result<(), BrowserError> { Ok(()) }
    fn send_keys(&mut self, _el: &Element, text: &str) -> Result<(), BrowserError> {
        if text == KEY_ENTER { self.submitted = true; } else { self.typed.push_str(text); }
        Ok(())
    }
    fn page_source(&mut self) -> Result<String, BrowserError> { Ok(self.current()) }
    fn quit(&mut self) -> Result<(), BrowserError> {
        self.quits.set(self.quits.get() + 1);
        Ok(())
    }
}

fn result_for(zip: &str, count: &str) -> String {
    RESULT.replace("03154", zip).replace("3건", count)
}

fn options(dir: &std::path::Path, on_error: ErrorPolicy) -> AppOptions {
    let mut opts = AppOptions::default();
    opts.session.wait = WaitOptions {
        timeout: Duration::from_millis(20),
        poll: Duration::from_millis(1),
        settle: Duration::ZERO,
    };
    opts.output = OutputOptions { json_path: Some(dir.join("results.json")), ..OutputOptions::default() };
    opts.on_error = on_error;
    opts
}

fn json_values(path: &std::path::Path) -> Vec<Value> {
    let text = fs::read_to_string(path).unwrap();
    Deserializer::from_str(&text).into_iter::<Value>().collect::<Result<_, _>>().unwrap()
}

#[test]
fn one_line_per_query_in_input_order() {
    let dir = tempfile::tempdir().unwrap();
    let queries = parse_queries("세종대로 209\tgov\n해운대로 1\n종로 1\n").unwrap();
    let quits = Rc::new(Cell::new(0));
    let browser = Scripted::new(
        vec![
            ("세종대로 209", result_for("03154", "3건")),
            ("해운대로 1", result_for("48094", "1건")),
            ("종로 1", result_for("03152", "12건")),
        ],
        quits.clone(),
    );

    let mut out = Vec::new();
    let mut progress = LineProgress::new(Vec::new());
    let opts = options(dir.path(), ErrorPolicy::Abort);
    let summary = runner::run(&queries, browser, &opts, &mut out, &mut progress).unwrap();

    assert_eq!(summary.processed, 3);
    assert_eq!(summary.failed, 0);
    assert_eq!(quits.get(), 1);

    let text = String::from_utf8(out).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines.iter().all(|l| l.matches('\t').count() == 8));
    let firsts: Vec<&str> = lines.iter().map(|l| l.split('\t').next().unwrap()).collect();
    assert_eq!(firsts, vec!["세종대로 209", "해운대로 1", "종로 1"]);
    let zips: Vec<&str> = lines.iter().map(|l| l.split('\t').nth(2).unwrap()).collect();
    assert_eq!(zips, vec!["03154", "48094", "03152"]);
    assert_eq!(lines[0].split('\t').nth(1), Some("3건"));

    let values = json_values(&dir.path().join("results.json"));
    assert_eq!(values.len(), 3);
    assert_eq!(values[1]["zipcode"], "48094");
    assert_eq!(values[0]["new_eng"][1], "Jongno-gu, Seoul");

    let notices = String::from_utf8(progress.into_inner()).unwrap();
    assert_eq!(notices.lines().count(), 3);
}

#[test]
fn abort_policy_stops_but_releases_everything() {
    let dir = tempfile::tempdir().unwrap();
    let queries = parse_queries("a\nnowhere\nc\n").unwrap();
    let quits = Rc::new(Cell::new(0));
    let browser = Scripted::new(
        vec![("a", result_for("11111", "1건")), ("c", result_for("33333", "1건"))],
        quits.clone(),
    );

    let mut out = Vec::new();
    let opts = options(dir.path(), ErrorPolicy::Abort);
    let err = runner::run(&queries, browser, &opts, &mut out, &mut NullProgress).unwrap_err();

    assert!(matches!(err, Error::Extract(_)));
    assert_eq!(quits.get(), 1, "browser released exactly once");
    assert_eq!(String::from_utf8(out).unwrap().lines().count(), 1);
    // records before the failure were flushed to disk
    let values = json_values(&dir.path().join("results.json"));
    assert_eq!(values.len(), 1);
    assert_eq!(values[0]["searched"], "a");
}

#[test]
fn skip_policy_keeps_one_record_per_query() {
    let dir = tempfile::tempdir().unwrap();
    let queries = parse_queries("a\nnowhere\nc\n").unwrap();
    let quits = Rc::new(Cell::new(0));
    let browser = Scripted::new(
        vec![("a", result_for("11111", "1건")), ("c", result_for("33333", "1건"))],
        quits.clone(),
    );

    let mut out = Vec::new();
    let mut progress = LineProgress::new(Vec::new());
    let opts = options(dir.path(), ErrorPolicy::Skip);
    let summary = runner::run(&queries, browser, &opts, &mut out, &mut progress).unwrap();

    assert_eq!(summary, runner::RunSummary { processed: 3, failed: 1 });
    assert_eq!(quits.get(), 1);

    let text = String::from_utf8(out).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[1], "nowhere\t\t\t\t\t\t\t\t");
    assert!(lines[2].starts_with("c\t1건\t33333\t"));

    let values = json_values(&dir.path().join("results.json"));
    assert_eq!(values.len(), 3);
    assert!(values[1]["error"].as_str().unwrap().contains("section.section-search"));
    assert!(values[1]["latitude"].is_null());

    let notices = String::from_utf8(progress.into_inner()).unwrap();
    assert!(notices.contains("failed_address:\t nowhere"));
}

#[test]
fn missing_search_form_is_fatal_even_when_skipping() {
    struct NoForm(Rc<Cell<u32>>);
    impl Browser for NoForm {
        fn navigate(&mut self, _: &str) -> Result<(), BrowserError> { Ok(()) }
        fn find_element(&mut self, _: &str) -> Result<Option<Element>, BrowserError> { Ok(None) }
        fn click(&mut self, _: &Element) -> Result<(), BrowserError> { Ok(()) }
        fn clear(&mut self, _: &Element) -> Result<(), BrowserError> { Ok(()) }
        fn send_keys(&mut self, _: &Element, _: &str) -> Result<(), BrowserError> { Ok(()) }
        fn page_source(&mut self) -> Result<String, BrowserError> { Ok(String::new()) }
        fn quit(&mut self) -> Result<(), BrowserError> { self.0.set(self.0.get() + 1); Ok(()) }
    }

    let dir = tempfile::tempdir().unwrap();
    let queries = parse_queries("a\nb\n").unwrap();
    let quits = Rc::new(Cell::new(0));
    let opts = options(dir.path(), ErrorPolicy::Skip);
    let mut out = Vec::new();
    let err = runner::run(&queries, NoForm(quits.clone()), &opts, &mut out, &mut NullProgress).unwrap_err();

    assert!(matches!(err, Error::Session(_)));
    assert_eq!(quits.get(), 1);
    assert!(out.is_empty());
}

#[test]
fn no_json_when_disabled() {
    let dir = tempfile::tempdir().unwrap();
    let queries = parse_queries("a\n").unwrap();
    let quits = Rc::new(Cell::new(0));
    let browser = Scripted::new(vec![("a", RESULT.to_string())], quits);

    let mut opts = options(dir.path(), ErrorPolicy::Abort);
    opts.output.json_path = None;
    let mut out = Vec::new();
    runner::run(&queries, browser, &opts, &mut out, &mut NullProgress).unwrap();

    assert!(!dir.path().join("results.json").exists());
    assert_eq!(String::from_utf8(out).unwrap().lines().count(), 1);
}
