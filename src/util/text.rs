//! Character classification and measurement helpers for wrap layout

use unicode_width::UnicodeWidthChar;

/// Default tab stop width in columns
pub const TABULATOR_WIDTH: usize = 4;

/// Check if a character is a punctuation/symbol boundary (not whitespace)
pub fn is_punctuation(ch: char) -> bool {
    matches!(
        ch,
        '/' | ':'
            | ','
            | '.'
            | '-'
            | '('
            | ')'
            | '{'
            | '}'
            | '['
            | ']'
            | ';'
            | '"'
            | '\''
            | '<'
            | '>'
            | '='
            | '+'
            | '*'
            | '&'
            | '|'
            | '!'
            | '@'
            | '#'
            | '$'
            | '%'
            | '^'
            | '~'
            | '`'
            | '\\'
            | '?'
    )
}

/// Rendered width of a single character in columns.
///
/// Tabs expand to the next tab stop relative to `visual_col`, so the same
/// tab character widens or narrows depending on where it lands after
/// wrapping. Other characters use their Unicode cell width (0 for combining
/// marks, 2 for CJK).
pub fn char_cell_width(ch: char, visual_col: usize, tab_width: usize) -> usize {
    if ch == '\t' {
        let tab = tab_width.max(1);
        tab - (visual_col % tab)
    } else {
        ch.width().unwrap_or(0)
    }
}
