use super::{Pointer, RED, RESET};
use crate::{log::Visual, region::Region};
use std::fmt::{self, Debug, Display, Formatter};

/// Longest reason text, in bytes, that an [`Error`] will hold.
///
/// Longer text is cut at the nearest character boundary below this length.
pub const MAX_REASON: usize = 255;

/// Classifies an [`Error`].
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Kind {
    /// Malformed tag delimiters or overlong tokens.
    Parse,
    /// Malformed directive grammar, mismatched or unclosed blocks and comments.
    Syntax,
    /// Missing variables, or a value of the wrong type.
    Render,
    /// The output buffer or one of the frame stacks could not grow.
    Memory,
}

impl Display for Kind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Kind::Parse => write!(f, "parse"),
            Kind::Syntax => write!(f, "syntax"),
            Kind::Render => write!(f, "render"),
            Kind::Memory => write!(f, "memory"),
        }
    }
}

/// Describes an error, and allows adding a contextual help text and visualization.
///
/// Every error carries a [`Kind`] and the 1-based line of the template that
/// caused it.
///
/// # Examples
///
/// Creating an [`Error`] that includes a [`Visual`] of type [`Pointer`]:
///
/// ```
/// use zephyr::{Error, Kind, Region};
///
/// let source = "hello\n{{ name";
/// let error = Error::build(Kind::Parse, "Unterminated '{{' tag")
///     .with_pointer(source, Region::new(6..8))
///     .with_name("greeting.html");
///
/// assert_eq!(error.line(), 2);
/// ```
///
/// When printed with `println!("{:#}", error)` the [`Error`] produces this output:
///
/// ```text
/// error: Unterminated '{{' tag
///   --> greeting.html:2:1
///    |
///  2 | {{ name
///    | ^^
///    |
/// ```
pub struct Error {
    /// Classifies the [`Error`].
    kind: Kind,
    /// Describes the cause of the [`Error`].
    reason: String,
    /// The 1-based line of the template that caused the [`Error`].
    line: usize,
    /// A visualization to help illustrate the [`Error`].
    visual: Option<Box<dyn Visual>>,
    /// Additional information to display with the [`Error`].
    help: Option<String>,
    /// The name of the template that the [`Error`] comes from.
    name: Option<String>,
}

impl Error {
    /// Create a new [`Error`] of the given [`Kind`] with the given reason text.
    ///
    /// The line defaults to 1. The additional fields may be populated using
    /// the various methods defined on `Error`.
    ///
    /// # Examples
    ///
    /// ```
    /// use zephyr::{Error, Kind};
    ///
    /// let error = Error::build(Kind::Render, "Missing template variable for 'age'")
    ///     .with_line(3);
    ///
    /// assert_eq!(error.kind(), Kind::Render);
    /// assert_eq!(error.line(), 3);
    /// ```
    pub fn build<T>(kind: Kind, reason: T) -> Self
    where
        T: Into<String>,
    {
        Error {
            kind,
            reason: bound(reason.into()),
            line: 1,
            visual: None,
            help: None,
            name: None,
        }
    }

    /// Create a new [`Error`] of kind [`Kind::Parse`].
    #[inline]
    pub fn parse<T: Into<String>>(reason: T) -> Self {
        Self::build(Kind::Parse, reason)
    }

    /// Create a new [`Error`] of kind [`Kind::Syntax`].
    #[inline]
    pub fn syntax<T: Into<String>>(reason: T) -> Self {
        Self::build(Kind::Syntax, reason)
    }

    /// Create a new [`Error`] of kind [`Kind::Render`].
    #[inline]
    pub fn render<T: Into<String>>(reason: T) -> Self {
        Self::build(Kind::Render, reason)
    }

    /// Create a new [`Error`] of kind [`Kind::Memory`].
    #[inline]
    pub fn memory<T: Into<String>>(reason: T) -> Self {
        Self::build(Kind::Memory, reason)
    }

    /// Set the reason text, which is a short summary of the [`Error`].
    pub fn with_reason<T>(mut self, text: T) -> Self
    where
        T: Into<String>,
    {
        self.reason = bound(text.into());

        self
    }

    /// Set the 1-based line that the [`Error`] refers to.
    pub fn with_line(mut self, line: usize) -> Self {
        self.line = line;

        self
    }

    /// Set the name text, which is the name of the template that the [`Error`]
    /// is related to.
    pub fn with_name<T>(mut self, text: T) -> Self
    where
        T: Into<String>,
    {
        self.name = Some(text.into());

        self
    }

    /// Set the [`Visual`], which is a visualization that helps illustrate the
    /// cause of the error.
    pub fn with_visual(mut self, visual: impl Visual + 'static) -> Self {
        self.visual = Some(Box::new(visual));

        self
    }

    /// Set the visualization to a new [`Pointer`] with the given source text and
    /// [`Region`], and set the line to the line on which the `Region` begins.
    ///
    /// ```text
    /// error
    ///     .with_visual(Pointer::new(source, region))
    ///     .with_line(region.line(source))
    ///
    /// // becomes:
    ///
    /// error
    ///     .with_pointer(source, region)
    /// ```
    pub fn with_pointer<T>(mut self, source: &str, region: T) -> Self
    where
        T: Into<Region>,
    {
        let region = region.into();
        self.line = region.line(source);
        self.visual = Some(Box::new(Pointer::new(source, region)));

        self
    }

    /// Set the help text, which is contextual information to accompany the
    /// reason text.
    pub fn with_help<T>(mut self, text: T) -> Self
    where
        T: Into<String>,
    {
        self.help = Some(text.into());

        self
    }

    /// Return the [`Kind`] of the [`Error`].
    #[inline]
    pub fn kind(&self) -> Kind {
        self.kind
    }

    /// Return the reason text.
    #[inline]
    pub fn reason(&self) -> &str {
        &self.reason
    }

    /// Return the 1-based line that the [`Error`] refers to.
    #[inline]
    pub fn line(&self) -> usize {
        self.line
    }

    /// Return the help text, if any.
    #[inline]
    pub fn help(&self) -> Option<&str> {
        self.help.as_deref()
    }

    /// Return the name of the template that the error is related to.
    #[inline]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}

/// Cut the given text down to [`MAX_REASON`] bytes without splitting a character.
fn bound(mut text: String) -> String {
    if text.len() > MAX_REASON {
        let mut end = MAX_REASON;
        while !text.is_char_boundary(end) {
            end -= 1;
        }
        text.truncate(end);
    }

    text
}

impl Debug for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if !f.alternate() {
            writeln!(f, "{self:#}")?;
        }
        f.debug_struct("Error")
            .field("kind", &self.kind)
            .field("reason", &self.reason)
            .field("line", &self.line)
            .field("name", &self.name)
            .field("visual", &self.visual)
            .field("help", &self.help)
            .finish()
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let header = format!("{RED}error{RESET}");
        write!(f, "{header}: {}", self.reason)?;

        if f.alternate() {
            if let Some(visual) = &self.visual {
                return visual.display(f, self.name.as_deref(), self.help.as_deref());
            }
        }

        Ok(())
    }
}

impl std::error::Error for Error {}

impl PartialEq for Error {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind
            && self.reason == other.reason
            && self.line == other.line
            && self.help == other.help
            && self.name == other.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bound_reason() {
        let error = Error::render("é".repeat(200));

        assert!(error.reason().len() <= MAX_REASON);
        assert_eq!(error.reason().len(), 254);
        assert!(error.reason().chars().all(|c| c == 'é'));
    }

    #[test]
    fn test_pointer_sets_line() {
        let source = "a\nb\n{{ c";
        let error = Error::parse("Unterminated '{{' tag").with_pointer(source, 4..6);

        assert_eq!(error.line(), 3);
        assert_eq!(error.kind(), Kind::Parse);
    }

    #[test]
    fn test_display() {
        let error = Error::syntax("Found 'endif' with no matching 'if'");

        assert!(format!("{error}").ends_with("Found 'endif' with no matching 'if'"));
    }

    #[test]
    fn test_display_alternate() {
        let source = "hello\n{% endif %}";
        let error = Error::syntax("Found 'endif' with no matching 'if'")
            .with_pointer(source, 6..17)
            .with_name("page.html")
            .with_help("remove the tag, or open a block with `{% if ... %}`");
        let text = format!("{error:#}");

        assert!(text.contains("page.html:2:1"));
        assert!(text.contains("{% endif %}"));
        assert!(text.contains("help: remove the tag"));
    }

    #[test]
    fn test_with_reason() {
        let error = Error::render("first")
            .with_name("page.html")
            .with_reason("second");

        assert_eq!(error.reason(), "second");
        assert_eq!(error.name(), Some("page.html"));
        assert_eq!(error.kind(), Kind::Render);
    }

    #[test]
    fn test_with_visual() {
        use crate::{log::Pointer, region::Region};

        let source = "one\n{{ two }}";
        let error = Error::render("Missing template variable for 'two'")
            .with_visual(Pointer::new(source, Region::new(4..13)))
            .with_line(2);
        let text = format!("{error:#}");

        assert!(text.contains("{{ two }}"));
        assert!(text.contains("^^^^^^^^^"));
        assert_eq!(error.line(), 2);
    }

    #[test]
    fn test_eq() {
        assert_eq!(
            Error::render("a").with_line(2),
            Error::render("a").with_line(2)
        );
        assert_ne!(Error::render("a"), Error::parse("a"));
        assert_ne!(Error::render("a").with_line(2), Error::render("a"));
    }
}
