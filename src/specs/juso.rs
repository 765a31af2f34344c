// src/specs/juso.rs
use scraper::{ElementRef, Html};

use crate::config::consts::*;
use crate::core::html::{all, doc_first, first, raw_text};
use crate::core::sanitize::{first_token, strip_quotes, text_lines};
use crate::error::ExtractError;
use crate::record::RawResult;

/// Read the single displayed result panel.
///
/// When the site finds several candidates only the displayed one is read;
/// `howmany` tells the caller there were more to choose from by hand.
pub fn extract(html_doc: &str) -> Result<RawResult, ExtractError> {
    let t = std::time::Instant::now();
    let doc = Html::parse_document(html_doc);

    let howmany = first_token(&raw_text(doc_first(&doc, SEL_RESULT_COUNT)?));

    let answer = doc_first(&doc, SEL_RESULT_SECTION)?;
    let zipcode = raw_text(first(answer, SEL_ZIPCODE)?).trim().to_string();

    let handler = first(answer, SEL_MAP_LINK)?
        .value()
        .attr(MAP_LINK_ATTR)
        .ok_or(ExtractError::Missing(MAP_LINK_ATTR))?;
    let positions = parse_map_link(handler)?;

    let eng = all(answer, SEL_ENG_ROWS)?;
    let kor = all(answer, SEL_KOR_ROWS)?;
    let (new_eng, old_eng) = new_old_pair(&eng, "English")?;
    let (new_kor, old_kor) = new_old_pair(&kor, "Korean")?;

    logd!("extracted result panel in {:?}", t.elapsed());
    Ok(RawResult { howmany, zipcode, positions, new_eng, old_eng, new_kor, old_kor })
}

/// `fnMapView('a', 'b', 'c', ...)` → `["a", "b", "c"]`
pub fn parse_map_link(handler: &str) -> Result<[String; 3], ExtractError> {
    let malformed = || ExtractError::MapLink(s!(handler));

    let (_, after_open) = handler.split_once('(').ok_or_else(malformed)?;
    let args = after_open.split(')').next().unwrap_or(after_open);

    let mut params = args.split(',').map(|p| s!(strip_quotes(p)));
    match (params.next(), params.next(), params.next()) {
        (Some(a), Some(b), Some(c)) => Ok([a, b, c]),
        _ => Err(malformed()),
    }
}

/// Rows come new-format first, old-format second; the road-name cell of the
/// first and the land-lot cell of the second carry the text.
fn new_old_pair(
    rows: &[ElementRef<'_>],
    what: &'static str,
) -> Result<(Vec<String>, Vec<String>), ExtractError> {
    if rows.len() < 2 {
        return Err(ExtractError::Rows { what, expected: 2, found: rows.len() });
    }
    let new = text_lines(&raw_text(first(rows[0], SEL_ROAD_NAME)?));
    let old = text_lines(&raw_text(first(rows[1], SEL_LAND_LOT)?));
    Ok((new, old))
}
