// src/config/options.rs
use std::path::PathBuf;
use std::time::Duration;

use super::consts::*;

#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct AppOptions {
    pub session: SessionOptions,
    pub output: OutputOptions,
    pub on_error: ErrorPolicy,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BrowserKind {
    Firefox,
    Chrome,
}

impl BrowserKind {
    pub fn name(&self) -> &'static str {
        match self { BrowserKind::Firefox => "firefox", BrowserKind::Chrome => "chrome" }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Backend {
    /// Live browser behind a WebDriver endpoint.
    WebDriver { url: String, browser: BrowserKind, headless: bool },
    /// Saved result page answers every query (offline runs).
    Fixture(PathBuf),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionOptions {
    pub backend: Backend,
    pub search_url: String,
    pub wait: WaitOptions,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            backend: Backend::WebDriver {
                url: s!(WEBDRIVER_URL),
                browser: BrowserKind::Firefox,
                headless: true,
            },
            search_url: s!(SEARCH_URL),
            wait: WaitOptions::default(),
        }
    }
}

/// Condition-based wait timings, used once after page load and once after submit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WaitOptions {
    pub timeout: Duration,
    pub poll: Duration,
    /// Pause after each phase's condition is met, for late script rendering.
    pub settle: Duration,
}

impl Default for WaitOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_millis(WAIT_TIMEOUT_MS),
            poll: Duration::from_millis(POLL_MS),
            settle: Duration::from_millis(SETTLE_MS),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum JsonLayout {
    /// Objects back to back, no separators.
    #[default]
    Concatenated,
    /// One object per line.
    Lines,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutputOptions {
    /// `None` disables the structured file.
    pub json_path: Option<PathBuf>,
    pub json_layout: JsonLayout,
    pub verbose: bool,
}

impl Default for OutputOptions {
    fn default() -> Self {
        Self {
            json_path: Some(PathBuf::from(DEFAULT_JSON_FILE)),
            json_layout: JsonLayout::default(),
            verbose: false,
        }
    }
}

/// What to do when one query's page cannot be extracted or transformed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ErrorPolicy {
    /// Stop the run (after releasing the browser and output file).
    #[default]
    Abort,
    /// Log it, emit an error record, continue with the next query.
    Skip,
}
