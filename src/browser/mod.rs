// src/browser/mod.rs
//! Browser capability used by the query session.
//!
//! Only the handful of operations the search form needs are exposed, so the
//! session and extractor can run against a saved page (`fixture`) or any
//! scripted stand-in as easily as against a live browser (`webdriver`).

pub mod fixture;
pub mod webdriver;

use crate::error::BrowserError;

pub use fixture::FixtureBrowser;
pub use webdriver::WebDriverSession;

/// Opaque handle to an element on the current page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element(pub String);

pub trait Browser {
    fn navigate(&mut self, url: &str) -> Result<(), BrowserError>;

    /// `Ok(None)` when nothing matches right now.
    fn find_element(&mut self, css: &str) -> Result<Option<Element>, BrowserError>;

    fn click(&mut self, el: &Element) -> Result<(), BrowserError>;

    fn clear(&mut self, el: &Element) -> Result<(), BrowserError>;

    /// Type text into an element; WebDriver key codes (e.g. Enter) are allowed.
    fn send_keys(&mut self, el: &Element, text: &str) -> Result<(), BrowserError>;

    /// Source of the page as currently rendered.
    fn page_source(&mut self) -> Result<String, BrowserError>;

    /// Release the browser. Called exactly once by the owning session.
    fn quit(&mut self) -> Result<(), BrowserError>;
}

impl<B: Browser + ?Sized> Browser for Box<B> {
    fn navigate(&mut self, url: &str) -> Result<(), BrowserError> { (**self).navigate(url) }
    fn find_element(&mut self, css: &str) -> Result<Option<Element>, BrowserError> { (**self).find_element(css) }
    fn click(&mut self, el: &Element) -> Result<(), BrowserError> { (**self).click(el) }
    fn clear(&mut self, el: &Element) -> Result<(), BrowserError> { (**self).clear(el) }
    fn send_keys(&mut self, el: &Element, text: &str) -> Result<(), BrowserError> { (**self).send_keys(el, text) }
    fn page_source(&mut self) -> Result<String, BrowserError> { (**self).page_source() }
    fn quit(&mut self) -> Result<(), BrowserError> { (**self).quit() }
}
