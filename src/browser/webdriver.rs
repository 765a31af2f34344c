// src/browser/webdriver.rs
// W3C WebDriver client over blocking HTTP.
// The driver process (geckodriver, chromedriver, a Selenium grid) is started
// by the operator; we only open and close a session on it.

use std::time::Duration;

use reqwest::blocking::Client;
use serde_json::{Value, json};

use super::{Browser, Element};
use crate::config::options::BrowserKind;
use crate::error::BrowserError;

/// Key under which W3C drivers return element references.
const ELEMENT_KEY: &str = "element-6066-11e4-a52e-4f735466cecf";
const HTTP_TIMEOUT: Duration = Duration::from_secs(60);

pub struct WebDriverSession {
    http: Client,
    base: String,
    session_id: Option<String>,
}

impl WebDriverSession {
    /// Open a new browser session on the driver at `endpoint`.
    pub fn start(endpoint: &str, browser: BrowserKind, headless: bool) -> Result<Self, BrowserError> {
        let http = Client::builder()
            .timeout(HTTP_TIMEOUT)
            .user_agent(concat!("juso_scrape/", env!("CARGO_PKG_VERSION")))
            .build()?;
        let base = endpoint.trim_end_matches('/').to_string();

        let body = json!({ "capabilities": { "alwaysMatch": capabilities(browser, headless) } });
        let value = decode(http.post(format!("{base}/session")).json(&body).send()?)?;
        let session_id = value
            .get("sessionId")
            .and_then(Value::as_str)
            .ok_or_else(|| BrowserError::Reply(value.to_string()))?
            .to_string();

        logf!(browser = browser.name(), headless, session = %session_id, "webdriver session started");
        Ok(Self { http, base, session_id: Some(session_id) })
    }

    fn url(&self, tail: &str) -> Result<String, BrowserError> {
        let id = self.session_id.as_deref().ok_or(BrowserError::Closed)?;
        Ok(format!("{}/session/{}/{}", self.base, id, tail))
    }

    fn post(&self, tail: &str, body: Value) -> Result<Value, BrowserError> {
        let url = self.url(tail)?;
        decode(self.http.post(url).json(&body).send()?)
    }

    fn get(&self, tail: &str) -> Result<Value, BrowserError> {
        let url = self.url(tail)?;
        decode(self.http.get(url).send()?)
    }
}

fn capabilities(browser: BrowserKind, headless: bool) -> Value {
    match browser {
        BrowserKind::Firefox => {
            let args: Vec<&str> = if headless { vec!["-headless"] } else { Vec::new() };
            json!({ "browserName": "firefox", "moz:firefoxOptions": { "args": args } })
        }
        BrowserKind::Chrome => {
            let args: Vec<&str> = if headless { vec!["--headless=new"] } else { Vec::new() };
            json!({ "browserName": "chrome", "goog:chromeOptions": { "args": args } })
        }
    }
}

/// Unwrap `{"value": ...}`; turn `{"value": {"error": ...}}` into a protocol error.
fn decode(resp: reqwest::blocking::Response) -> Result<Value, BrowserError> {
    let mut body: Value = resp.json()?;
    let value = body.get_mut("value").map(Value::take).unwrap_or(Value::Null);
    if let Some(error) = value.get("error").and_then(Value::as_str) {
        let message = value.get("message").and_then(Value::as_str).unwrap_or("");
        return Err(BrowserError::Protocol { error: s!(error), message: s!(message) });
    }
    Ok(value)
}

impl Browser for WebDriverSession {
    fn navigate(&mut self, url: &str) -> Result<(), BrowserError> {
        logd!(url, "navigate");
        self.post("url", json!({ "url": url })).map(|_| ())
    }

    fn find_element(&mut self, css: &str) -> Result<Option<Element>, BrowserError> {
        match self.post("element", json!({ "using": "css selector", "value": css })) {
            Ok(v) => v
                .get(ELEMENT_KEY)
                .and_then(Value::as_str)
                .map(|id| Some(Element(s!(id))))
                .ok_or_else(|| BrowserError::Reply(v.to_string())),
            Err(BrowserError::Protocol { error, .. }) if error == "no such element" => Ok(None),
            Err(BrowserError::Protocol { error, .. }) if error == "invalid selector" => {
                Err(BrowserError::Selector(s!(css)))
            }
            Err(e) => Err(e),
        }
    }

    fn click(&mut self, el: &Element) -> Result<(), BrowserError> {
        self.post(&format!("element/{}/click", el.0), json!({})).map(|_| ())
    }

    fn clear(&mut self, el: &Element) -> Result<(), BrowserError> {
        self.post(&format!("element/{}/clear", el.0), json!({})).map(|_| ())
    }

    fn send_keys(&mut self, el: &Element, text: &str) -> Result<(), BrowserError> {
        self.post(&format!("element/{}/value", el.0), json!({ "text": text })).map(|_| ())
    }

    fn page_source(&mut self) -> Result<String, BrowserError> {
        match self.get("source")? {
            Value::String(s) => Ok(s),
            other => Err(BrowserError::Reply(other.to_string())),
        }
    }

    fn quit(&mut self) -> Result<(), BrowserError> {
        let Some(id) = self.session_id.take() else { return Ok(()) };
        let url = format!("{}/session/{}", self.base, id);
        decode(self.http.delete(url).send()?)?;
        logf!(session = %id, "webdriver session closed");
        Ok(())
    }
}

impl Drop for WebDriverSession {
    fn drop(&mut self) {
        if self.session_id.is_some() {
            if let Err(e) = self.quit() {
                logw!("webdriver session not closed cleanly: {e}");
            }
        }
    }
}
