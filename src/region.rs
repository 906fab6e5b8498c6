use std::{cmp::min, ops::Range};

/// Represents an area within template text.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub struct Region {
    /// The beginning of the range, inclusive.
    pub begin: usize,
    /// The ending of the range, exclusive.
    pub end: usize,
}

impl Region {
    /// Create a new [`Region`] from the given range.
    pub fn new(position: Range<usize>) -> Self {
        Self {
            begin: position.start,
            end: position.end,
        }
    }

    /// Create a zero width [`Region`] at the given offset.
    pub fn at(offset: usize) -> Self {
        Self {
            begin: offset,
            end: offset,
        }
    }

    /// Access the literal value of a [`Region`].
    ///
    /// Returns `None` if the `Region` is out of bounds in the given source text,
    /// or does not fall on character boundaries.
    pub fn literal<'source>(&self, source: &'source str) -> Option<&'source str> {
        source.get(self.begin..self.end)
    }

    /// Return the 1-based line on which this [`Region`] begins.
    ///
    /// Lines are counted by the newlines between the start of the source and
    /// the beginning of the `Region`.
    pub fn line(&self, source: &str) -> usize {
        let until = min(self.begin, source.len());

        source.as_bytes()[..until]
            .iter()
            .filter(|byte| **byte == b'\n')
            .count()
            + 1
    }
}

impl From<Range<usize>> for Region {
    fn from(value: Range<usize>) -> Self {
        Self::new(value)
    }
}
