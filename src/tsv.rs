// src/tsv.rs
use std::io::{self, Write};
use std::mem::take;

use crate::core::sanitize::flatten_cell;

/* ---------------- Parsing ---------------- */

/// One parsed row and the 1-based line it started on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub line: usize,
    pub cells: Vec<String>,
}

/// Minimal delimited-text parser (quotes + CRLF tolerant).
///
/// Unlike a lenient reader, blank lines are *kept* as a row with one empty
/// cell so callers can reject them with a line number. A newline at EOF does
/// not start another row.
pub fn parse_rows(text: &str, sep: char) -> Vec<Row> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);

    let mut rows = Vec::new();
    let mut field = s!();
    let mut cells = Vec::new();
    let mut in_quotes = false;
    let mut line = 1usize;
    let mut row_line = 1usize;
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '"' if in_quotes => {
                if matches!(chars.peek(), Some('"')) {
                    chars.next(); // doubled quote escape
                    field.push('"');
                } else {
                    in_quotes = false;
                }
            }
            '"' if field.is_empty() => in_quotes = true,
            c if c == sep && !in_quotes => cells.push(take(&mut field)),
            '\n' | '\r' if !in_quotes => {
                if ch == '\r' && matches!(chars.peek(), Some('\n')) { chars.next(); }
                cells.push(take(&mut field));
                rows.push(Row { line: row_line, cells: take(&mut cells) });
                line += 1;
                row_line = line;
            }
            '\n' => { line += 1; field.push(ch); }
            _ => field.push(ch),
        }
    }

    // Trailing row without a final newline (unterminated quotes included).
    if !field.is_empty() || !cells.is_empty() {
        cells.push(field);
        rows.push(Row { line: row_line, cells });
    }

    rows
}

/* ---------------- Writing ---------------- */

/// Write one flat line: cells joined by '\t', newline-terminated.
/// Cells carrying tabs or line breaks are collapsed so the column count holds.
pub fn write_line<W: Write, S: AsRef<str>>(mut w: W, cells: &[S]) -> io::Result<()> {
    let mut first = true;
    for cell in cells {
        if !first { w.write_all(b"\t")?; } else { first = false; }
        w.write_all(flatten_cell(cell.as_ref()).as_bytes())?;
    }
    writeln!(w)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cells(rows: &[Row]) -> Vec<Vec<&str>> {
        rows.iter().map(|r| r.cells.iter().map(String::as_str).collect()).collect()
    }

    #[test]
    fn parses_columns_and_line_numbers() {
        let rows = parse_rows("서울 종로구 세종대로 209\tnote\r\nSejong-daero 1\n", '\t');
        assert_eq!(cells(&rows), vec![vec!["서울 종로구 세종대로 209", "note"], vec!["Sejong-daero 1"]]);
        assert_eq!(rows[1].line, 2);
    }

    #[test]
    fn keeps_blank_lines_as_empty_rows() {
        let rows = parse_rows("a\n\nb", '\t');
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[1], Row { line: 2, cells: vec![s!()] });
        assert_eq!(rows[2].line, 3);
    }

    #[test]
    fn quoted_field_spans_separator_and_newline() {
        let rows = parse_rows("\"a\tb\nc\"\tx\nnext\n", '\t');
        assert_eq!(rows[0].cells, vec!["a\tb\nc", "x"]);
        assert_eq!(rows[1].line, 3);
    }

    #[test]
    fn strips_bom() {
        let rows = parse_rows("\u{feff}addr\n", '\t');
        assert_eq!(rows[0].cells, vec!["addr"]);
    }

    #[test]
    fn write_line_joins_with_tabs() {
        let mut buf = Vec::new();
        write_line(&mut buf, &["a", "b c", "d\te"]).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "a\tb c\td e\n");
    }
}
