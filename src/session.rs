// src/session.rs
use std::thread;
use std::time::{Duration, Instant};

use crate::browser::{Browser, Element};
use crate::config::consts::*;
use crate::config::options::{SessionOptions, WaitOptions};
use crate::error::{BrowserError, SessionError};

/// Owns the browser for a whole run and turns a query into a rendered result page.
///
/// The browser is released exactly once: by [`QuerySession::close`], or on drop
/// if the run ends early.
pub struct QuerySession<B: Browser> {
    browser: B,
    search_url: String,
    wait: WaitOptions,
    closed: bool,
}

impl<B: Browser> QuerySession<B> {
    pub fn new(browser: B, opts: &SessionOptions) -> Self {
        Self {
            browser,
            search_url: opts.search_url.clone(),
            wait: opts.wait,
            closed: false,
        }
    }

    pub fn browser(&self) -> &B {
        &self.browser
    }

    /// Load the search page, type the query, press Enter, and return the
    /// page source once the result count is on screen.
    pub fn submit(&mut self, query: &str) -> Result<String, SessionError> {
        if query.trim().is_empty() {
            return Err(SessionError::EmptyQuery);
        }
        if self.closed {
            return Err(BrowserError::Closed.into());
        }

        // Phase 1: search form ready
        self.browser.navigate(&self.search_url)?;
        let input = self.require(SEL_SEARCH_INPUT)?;
        self.require(SEL_SEARCH_BUTTON)?;
        self.settle();

        self.browser.click(&input)?;
        self.browser.clear(&input)?;
        self.browser.send_keys(&input, query)?;
        self.browser.send_keys(&input, KEY_ENTER)?;

        // Phase 2: result rendered. A page without the count is left to the
        // extractor to report.
        let t = Instant::now();
        match wait_for(&mut self.browser, SEL_RESULT_COUNT, self.wait)? {
            Some(_) => logd!("result rendered after {:?}", t.elapsed()),
            None => logw!(query, "no result count after {:?}", t.elapsed()),
        }
        self.settle();

        Ok(self.browser.page_source()?)
    }

    /// Release the browser. Later calls are no-ops.
    pub fn close(&mut self) -> Result<(), SessionError> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;
        self.browser.quit()?;
        Ok(())
    }

    fn require(&mut self, css: &str) -> Result<Element, SessionError> {
        let t = Instant::now();
        wait_for(&mut self.browser, css, self.wait)?.ok_or_else(|| SessionError::ControlMissing {
            selector: s!(css),
            waited_ms: t.elapsed().as_millis(),
        })
    }

    fn settle(&self) {
        if !self.wait.settle.is_zero() {
            thread::sleep(self.wait.settle);
        }
    }
}

impl<B: Browser> Drop for QuerySession<B> {
    fn drop(&mut self) {
        if let Err(e) = self.close() {
            loge!("browser not released cleanly: {e}");
        }
    }
}

/// Poll for `css` until it appears or `wait.timeout` passes. Always looks at
/// least once.
pub fn wait_for<B: Browser + ?Sized>(
    browser: &mut B,
    css: &str,
    wait: WaitOptions,
) -> Result<Option<Element>, BrowserError> {
    let deadline = Instant::now() + wait.timeout;
    loop {
        if let Some(el) = browser.find_element(css)? {
            return Ok(Some(el));
        }
        let now = Instant::now();
        if now >= deadline {
            return Ok(None);
        }
        let nap = wait.poll.min(deadline - now).max(Duration::from_millis(1));
        thread::sleep(nap);
    }
}
