//! # Page “specs”
//!
//! Each spec knows where the ground truth lives in one page's HTML and how to
//! pull it out. Specs only extract: they never drive the browser, write
//! output, or decide what to do when a page is unreadable.
//!
//! ## Conventions
//! - Parse with `scraper`; selectors live in `config::consts`.
//! - Return `ExtractError` naming the missing piece instead of guessing.
//! - Testable offline against saved pages in `tests/fixtures/`.
//!
//! ## Current specs
//! - `juso` – the juso.go.kr search result panel.
pub mod juso;
