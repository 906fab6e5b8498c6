use crate::syntax::Markers;

/// Longest body, in bytes, that an expression or block tag may have.
///
/// Measured between the delimiters, before surrounding whitespace is trimmed.
pub const MAX_TOKEN_LENGTH: usize = 128;

/// A parsed block tag.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Directive<'source> {
    /// `for item in collection`
    For {
        item: &'source str,
        collection: &'source str,
    },
    /// `endfor`
    EndFor,
    /// `if condition`
    If { condition: &'source str },
    /// `else`
    Else,
    /// `endif`
    EndIf,
}

/// Describes why a block tag could not be parsed.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Malformed {
    /// A "for" tag that is not shaped `for item in collection`.
    For,
    /// An "if" tag without a condition.
    If,
    /// Anything else.
    Unknown,
}

impl<'source> Directive<'source> {
    /// Parse the trimmed body of a block tag.
    ///
    /// # Examples
    ///
    /// ```text
    /// for fruit in fruits  ->  For { item: "fruit", collection: "fruits" }
    /// if show              ->  If { condition: "show" }
    /// for fruit of fruits  ->  Malformed::For
    /// ```
    pub fn parse(command: &'source str) -> Result<Self, Malformed> {
        let mut words = command.split(is_space).filter(|word| !word.is_empty());

        match words.next() {
            Some("for") => match (words.next(), words.next(), words.next(), words.next()) {
                (Some(item), Some("in"), Some(collection), None) => {
                    Ok(Directive::For { item, collection })
                }
                _ => Err(Malformed::For),
            },
            Some("if") => {
                let condition = command.trim_start_matches(is_space)["if".len()..]
                    .trim_matches(is_space);
                if condition.is_empty() {
                    Err(Malformed::If)
                } else {
                    Ok(Directive::If { condition })
                }
            }
            Some(word @ ("endfor" | "else" | "endif")) if words.next().is_none() => Ok(match word {
                "endfor" => Directive::EndFor,
                "else" => Directive::Else,
                _ => Directive::EndIf,
            }),
            _ => Err(Malformed::Unknown),
        }
    }
}

/// The tag that a forward search stopped at.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Closing {
    Else,
    EndIf,
    EndFor,
}

/// What a forward search is looking for.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Target {
    /// The "else" or "endif" that belongs to an "if", whichever comes first.
    ElseOrEndIf,
    /// The "endif" that belongs to an "if".
    EndIf,
    /// The "endfor" that belongs to a "for".
    EndFor,
}

/// Search forward from `from` for the tag that closes the current block.
///
/// Blocks of the same kind that open and close in between are skipped over,
/// so the tag found is the one on the same nesting level. Returns the tag
/// found and the offset just past its ending delimiter.
pub fn find_closing(
    source: &str,
    from: usize,
    markers: &Markers,
    target: Target,
) -> Option<(Closing, usize)> {
    let (begin, end) = (&markers.block.0, &markers.block.1);
    let (open, close) = match target {
        Target::ElseOrEndIf | Target::EndIf => ("if", "endif"),
        Target::EndFor => ("for", "endfor"),
    };
    let mut depth = 0usize;
    let mut cursor = from;

    loop {
        let tag_begin = cursor + source.get(cursor..)?.find(begin.as_str())?;
        let body_begin = tag_begin + begin.len();
        let body_end = body_begin + source[body_begin..].find(end.as_str())?;
        cursor = body_end + end.len();

        let command = source[body_begin..body_end].trim_matches(is_space);
        let keyword = command.split(is_space).next().unwrap_or_default();

        if keyword == open {
            depth += 1;
        } else if keyword == close && command == close {
            if depth == 0 {
                let closing = match target {
                    Target::EndFor => Closing::EndFor,
                    _ => Closing::EndIf,
                };
                return Some((closing, cursor));
            }
            depth -= 1;
        } else if target == Target::ElseOrEndIf && depth == 0 && command == "else" {
            return Some((Closing::Else, cursor));
        }
    }
}

/// Return true for the whitespace characters recognized around tags and names:
/// space, tab, newline, vertical tab, form feed and carriage return.
#[inline]
pub fn is_space(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\x0b' | '\x0c' | '\r')
}
