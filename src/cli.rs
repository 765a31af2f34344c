// src/cli.rs
use std::io;
use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, ValueEnum};

use crate::browser::{Browser, FixtureBrowser, WebDriverSession};
use crate::config::consts::*;
use crate::config::options::{
    AppOptions, Backend, BrowserKind, ErrorPolicy, JsonLayout, OutputOptions, SessionOptions, WaitOptions,
};
use crate::error::{Result, SessionError};
use crate::input::load_queries;
use crate::progress::LineProgress;
use crate::runner::{self, RunSummary};

/// Look up Korean postal addresses on juso.go.kr.
///
/// Reads one imprecise address per line (first tab-separated column), writes
/// one tab-separated result line per address to stdout, and optionally a JSON
/// record per address to a file.
#[derive(Debug, Parser)]
#[command(name = "juso_scrape", version, about)]
pub struct Cli {
    /// Tab-delimited query file; the first column of each row is searched.
    pub input: PathBuf,

    /// Structured output file.
    #[arg(long, env = "JUSO_JSON_OUT", default_value = DEFAULT_JSON_FILE)]
    pub json_out: PathBuf,

    /// Do not write the structured output file.
    #[arg(long)]
    pub no_json: bool,

    /// How JSON records are laid out in the file.
    #[arg(long, value_enum, default_value_t = LayoutArg::Concatenated)]
    pub json_layout: LayoutArg,

    /// Echo every field to stdout before each result line.
    #[arg(short, long)]
    pub verbose: bool,

    /// What to do when a result page cannot be read.
    #[arg(long, value_enum, default_value_t = PolicyArg::Abort)]
    pub on_error: PolicyArg,

    /// WebDriver endpoint (geckodriver, chromedriver, Selenium).
    #[arg(long, env = "JUSO_WEBDRIVER_URL", default_value = WEBDRIVER_URL)]
    pub webdriver: String,

    #[arg(long, value_enum, default_value_t = BrowserArg::Firefox)]
    pub browser: BrowserArg,

    /// Show the browser window.
    #[arg(long)]
    pub headed: bool,

    /// Answer every query with this saved result page instead of a live browser.
    #[arg(long, value_name = "HTML")]
    pub fixture: Option<PathBuf>,

    #[arg(long, default_value = SEARCH_URL)]
    pub search_url: String,

    /// Longest wait for the search form, and for the result count after submit.
    #[arg(long, default_value_t = WAIT_TIMEOUT_MS)]
    pub wait_timeout_ms: u64,

    #[arg(long, default_value_t = POLL_MS)]
    pub poll_ms: u64,

    /// Extra pause once each wait is satisfied.
    #[arg(long, default_value_t = SETTLE_MS)]
    pub settle_ms: u64,

    /// Log filter (e.g. "debug", "juso_scrape=trace"); overrides RUST_LOG.
    #[arg(long)]
    pub log_level: Option<String>,

    /// Append logs to this file instead of stderr.
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LayoutArg { Concatenated, Lines }

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PolicyArg { Abort, Skip }

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum BrowserArg { Firefox, Chrome }

impl Cli {
    pub fn options(&self) -> AppOptions {
        let backend = match &self.fixture {
            Some(path) => Backend::Fixture(path.clone()),
            None => Backend::WebDriver {
                url: self.webdriver.clone(),
                browser: match self.browser {
                    BrowserArg::Firefox => BrowserKind::Firefox,
                    BrowserArg::Chrome => BrowserKind::Chrome,
                },
                headless: !self.headed,
            },
        };
        AppOptions {
            session: SessionOptions {
                backend,
                search_url: self.search_url.clone(),
                wait: WaitOptions {
                    timeout: Duration::from_millis(self.wait_timeout_ms),
                    poll: Duration::from_millis(self.poll_ms),
                    settle: Duration::from_millis(self.settle_ms),
                },
            },
            output: OutputOptions {
                json_path: (!self.no_json).then(|| self.json_out.clone()),
                json_layout: match self.json_layout {
                    LayoutArg::Concatenated => JsonLayout::Concatenated,
                    LayoutArg::Lines => JsonLayout::Lines,
                },
                verbose: self.verbose,
            },
            on_error: match self.on_error {
                PolicyArg::Abort => ErrorPolicy::Abort,
                PolicyArg::Skip => ErrorPolicy::Skip,
            },
        }
    }
}

/// Start whichever browser backend the options name.
pub fn open_browser(backend: &Backend) -> Result<Box<dyn Browser>> {
    let browser: Box<dyn Browser> = match backend {
        Backend::WebDriver { url, browser, headless } => Box::new(
            WebDriverSession::start(url, *browser, *headless).map_err(SessionError::from)?,
        ),
        Backend::Fixture(path) => Box::new(FixtureBrowser::from_file(path).map_err(SessionError::from)?),
    };
    Ok(browser)
}

/// Parse arguments, then load → look up → emit.
pub fn run(cli: Cli) -> Result<RunSummary> {
    let opts = cli.options();

    // Input problems surface before any browser is started.
    let queries = load_queries(&cli.input)?;
    let browser = open_browser(&opts.session.backend)?;

    let stdout = io::stdout().lock();
    let mut progress = LineProgress::stderr();
    runner::run(&queries, browser, &opts, stdout, &mut progress)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_write_json_and_abort_on_error() {
        let cli = Cli::try_parse_from(["juso_scrape", "addrs.txt"]).unwrap();
        let o = cli.options();
        assert_eq!(o.output.json_path, Some(PathBuf::from("results.json")));
        assert_eq!(o.output.json_layout, JsonLayout::Concatenated);
        assert!(!o.output.verbose);
        assert_eq!(o.on_error, ErrorPolicy::Abort);
        assert!(matches!(o.session.backend, Backend::WebDriver { headless: true, .. }));
        assert_eq!(o.session.search_url, SEARCH_URL);
    }

    #[test]
    fn flags_map_onto_options() {
        let cli = Cli::try_parse_from([
            "juso_scrape", "addrs.txt", "--no-json", "-v", "--on-error", "skip",
            "--fixture", "page.html", "--json-layout", "lines", "--settle-ms", "0",
        ])
        .unwrap();
        let o = cli.options();
        assert_eq!(o.output.json_path, None);
        assert!(o.output.verbose);
        assert_eq!(o.on_error, ErrorPolicy::Skip);
        assert_eq!(o.session.backend, Backend::Fixture(PathBuf::from("page.html")));
        assert_eq!(o.output.json_layout, JsonLayout::Lines);
        assert!(o.session.wait.settle.is_zero());
    }

    #[test]
    fn input_path_is_required() {
        assert!(Cli::try_parse_from(["juso_scrape"]).is_err());
    }
}
