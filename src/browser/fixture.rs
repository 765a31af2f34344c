// src/browser/fixture.rs
// Offline stand-in: a bare search form until Enter is pressed, then a saved
// result page. Every query gets the same answer.

use std::fs;
use std::path::Path;

use super::{Browser, Element};
use crate::config::consts::KEY_ENTER;
use crate::core::html::matches_any;
use crate::error::BrowserError;

const SEARCH_FORM: &str = r#"<html><body>
<form><input type="text" name="searchKeyword" value=""><input type="button" value="search"></form>
</body></html>"#;

pub struct FixtureBrowser {
    result_page: String,
    submitted: bool,
    closed: bool,
    /// Everything typed since the last navigation.
    pub typed: String,
}

impl FixtureBrowser {
    pub fn new(result_page: impl Into<String>) -> Self {
        Self { result_page: result_page.into(), submitted: false, closed: false, typed: s!() }
    }

    pub fn from_file(path: &Path) -> Result<Self, BrowserError> {
        let page = fs::read_to_string(path).map_err(|source| BrowserError::Fixture {
            path: path.to_path_buf(),
            source,
        })?;
        logf!(path = %path.display(), "serving fixture result page");
        Ok(Self::new(page))
    }

    fn current(&self) -> Result<&str, BrowserError> {
        if self.closed { return Err(BrowserError::Closed); }
        Ok(if self.submitted { self.result_page.as_str() } else { SEARCH_FORM })
    }
}

impl Browser for FixtureBrowser {
    fn navigate(&mut self, _url: &str) -> Result<(), BrowserError> {
        self.current()?;
        self.submitted = false;
        self.typed.clear();
        Ok(())
    }

    fn find_element(&mut self, css: &str) -> Result<Option<Element>, BrowserError> {
        match matches_any(self.current()?, css) {
            Some(true) => Ok(Some(Element(s!(css)))),
            Some(false) => Ok(None),
            None => Err(BrowserError::Selector(s!(css))),
        }
    }

    fn click(&mut self, _el: &Element) -> Result<(), BrowserError> {
        self.current().map(|_| ())
    }

    fn clear(&mut self, _el: &Element) -> Result<(), BrowserError> {
        self.current()?;
        self.typed.clear();
        Ok(())
    }

    fn send_keys(&mut self, _el: &Element, text: &str) -> Result<(), BrowserError> {
        self.current()?;
        match text.strip_suffix(KEY_ENTER) {
            Some(rest) => { self.typed.push_str(rest); self.submitted = true; }
            None => self.typed.push_str(text),
        }
        Ok(())
    }

    fn page_source(&mut self) -> Result<String, BrowserError> {
        self.current().map(String::from)
    }

    fn quit(&mut self) -> Result<(), BrowserError> {
        self.closed = true;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::consts::{SEL_RESULT_COUNT, SEL_SEARCH_INPUT};

    #[test]
    fn serves_form_then_result_after_enter() {
        let mut b = FixtureBrowser::new("<div class=\"result\"><p>1건</p></div>");
        b.navigate("http://example.invalid").unwrap();
        assert!(b.find_element(SEL_RESULT_COUNT).unwrap().is_none());
        let input = b.find_element(SEL_SEARCH_INPUT).unwrap().unwrap();
        b.send_keys(&input, "세종대로").unwrap();
        b.send_keys(&input, KEY_ENTER).unwrap();
        assert_eq!(b.typed, "세종대로");
        assert!(b.find_element(SEL_RESULT_COUNT).unwrap().is_some());
    }

    #[test]
    fn closed_browser_refuses_work() {
        let mut b = FixtureBrowser::new("");
        b.quit().unwrap();
        assert!(matches!(b.page_source(), Err(BrowserError::Closed)));
    }

    #[test]
    fn bad_selector_is_reported() {
        let mut b = FixtureBrowser::new("");
        assert!(matches!(b.find_element("div[["), Err(BrowserError::Selector(_))));
    }
}
