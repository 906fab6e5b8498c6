mod pointer;

pub use pointer::Pointer;

use std::{
    cmp::min,
    fmt::{Debug, Formatter, Result},
};

const BLANK: &str = "";
const PIPE: &str = "|";
const EQUAL: &str = "=";
const HIGHLIGHT: &str = "^";

/// Describes a type that can be associated with an Error and used
/// to print a visualization.
pub trait Visual: Debug + Send + Sync {
    /// Display the visualization by writing to the given Formatter.
    fn display(
        &self,
        formatter: &mut Formatter<'_>,
        template: Option<&str>,
        help: Option<&str>,
    ) -> Result;
}

/// Get the zero indexed line and display column of the given byte offset.
fn get_line_and_column(source: &str, offset: usize) -> (usize, usize) {
    let mut offset = min(offset, source.len());
    while !source.is_char_boundary(offset) {
        offset -= 1;
    }
    let before = &source[..offset];
    let line = before.matches('\n').count();
    let start = before.rfind('\n').map(|index| index + 1).unwrap_or(0);

    (line, get_width(&before[start..]))
}

/// Wrapper for UnicodeWidthStr::width.
fn get_width(s: &str) -> usize {
    unicode_width::UnicodeWidthStr::width(s)
}

#[cfg(test)]
mod tests {
    use super::get_line_and_column;

    #[test]
    fn test_line_and_column() {
        let source = "first\nsecond {{ x\nthird";

        assert_eq!(get_line_and_column(source, 0), (0, 0));
        assert_eq!(get_line_and_column(source, 13), (1, 7));
        assert_eq!(get_line_and_column(source, 200), (2, 5));
    }

    #[test]
    fn test_wide_column() {
        // Each of these characters occupies two terminal columns.
        let source = "日本 {{";

        assert_eq!(get_line_and_column(source, 7), (0, 5));
    }
}
