// src/core/html.rs
// Thin helpers over `scraper` for the fixed result-page layout.

use scraper::{ElementRef, Html, Selector};

use crate::error::ExtractError;

/// Parse one of our own fixed selectors.
pub fn selector(css: &'static str) -> Result<Selector, ExtractError> {
    Selector::parse(css).map_err(|_| ExtractError::Selector(css))
}

/// First match of `css` anywhere in the document.
pub fn doc_first<'a>(doc: &'a Html, css: &'static str) -> Result<ElementRef<'a>, ExtractError> {
    let sel = selector(css)?;
    doc.select(&sel).next().ok_or(ExtractError::Missing(css))
}

/// First match of `css` below `scope`.
pub fn first<'a>(scope: ElementRef<'a>, css: &'static str) -> Result<ElementRef<'a>, ExtractError> {
    let sel = selector(css)?;
    scope.select(&sel).next().ok_or(ExtractError::Missing(css))
}

/// All matches of `css` below `scope`, in document order.
pub fn all<'a>(scope: ElementRef<'a>, css: &'static str) -> Result<Vec<ElementRef<'a>>, ExtractError> {
    let sel = selector(css)?;
    Ok(scope.select(&sel).collect())
}

/// Concatenated text nodes, untouched (line breaks preserved).
pub fn raw_text(el: ElementRef<'_>) -> String {
    el.text().collect()
}

/// Does `css` match anything in `html`? `None` when the selector itself is invalid.
pub fn matches_any(html: &str, css: &str) -> Option<bool> {
    let sel = Selector::parse(css).ok()?;
    let doc = Html::parse_document(html);
    let found = doc.select(&sel).next().is_some();
    Some(found)
}
