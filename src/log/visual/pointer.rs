use std::{
    cmp::max,
    fmt::{Formatter, Result},
};

use super::{
    super::{RESET, YELLOW},
    {get_line_and_column, get_width, Visual, BLANK, EQUAL, HIGHLIGHT, PIPE},
};
use crate::region::Region;

/// A type of `Visual` that points to a specific location within template text.
#[derive(Debug, PartialEq)]
pub struct Pointer {
    /// The line that the Pointer is pointing to.
    ///
    /// This number should be zero indexed.
    line: usize,
    /// The column that the Pointer is pointing to.
    ///
    /// This number should be zero indexed.
    column: usize,
    /// The length of the object being highlighted.
    length: usize,
    /// The actual line of text that is being pointed to.
    text: String,
}

impl Pointer {
    /// Create a new Visual over the given source text and Region.
    pub fn new(source: &str, region: Region) -> Self {
        let (line, column) = get_line_and_column(source, region.begin);
        let highlighted = region
            .literal(source)
            .map(|literal| literal.split('\n').next().unwrap_or_default())
            .unwrap_or_default();
        let length = max(1, get_width(highlighted));
        let text = source
            .split('\n')
            .nth(line)
            .unwrap_or_default()
            .trim_end_matches('\r')
            .to_string();

        Self {
            line,
            column,
            length,
            text,
        }
    }
}

impl Visual for Pointer {
    fn display(
        &self,
        formatter: &mut Formatter<'_>,
        template: Option<&str>,
        help: Option<&str>,
    ) -> Result {
        let num = (self.line + 1).to_string();
        let col = self.column + 1;
        let pad = get_width(&num);
        let align = self.column + self.length;

        let name = template.unwrap_or("?");
        let text = &self.text;
        let underline = HIGHLIGHT.repeat(self.length);

        write!(
            formatter,
            "\n {BLANK:pad$}--> {name}:{num}:{col}\
             \n {BLANK:pad$} {PIPE}\
             \n {num:>} {PIPE} {text}\
             \n {BLANK:pad$} {PIPE} {YELLOW}{underline:>align$}{RESET}\
             \n {BLANK:pad$} {PIPE}\n",
        )?;

        if let Some(help) = help {
            writeln!(formatter, "{BLANK:pad$} {EQUAL} help: {help}")?;
        }

        Ok(())
    }
}
