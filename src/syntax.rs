use morel::Syntax;

/// Markers that the engine searches for within raw text.
///
/// Closing markers of expressions and blocks are not listed, because they are
/// only meaningful after the matching opening marker was found.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Marker {
    /// Beginning of an Expression, which outputs a variable.
    BeginExpression = 0,
    /// Beginning of a Block, which holds a directive such as "for" or "if".
    BeginBlock = 1,
    /// Beginning of a Comment, which is removed from the output.
    BeginComment = 2,
    /// End of a Comment.
    EndComment = 3,
}

impl From<usize> for Marker {
    fn from(value: usize) -> Self {
        match value {
            0 => Self::BeginExpression,
            1 => Self::BeginBlock,
            2 => Self::BeginComment,
            3 => Self::EndComment,
            _ => unreachable!(),
        }
    }
}

impl From<Marker> for usize {
    fn from(k: Marker) -> Self {
        k as usize
    }
}

/// The delimiters used by an [`Engine`][`crate::Engine`], as pairs of
/// beginning and ending text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Markers {
    pub expression: (String, String),
    pub block: (String, String),
    pub comment: (String, String),
}

impl Markers {
    /// Return true if none of the delimiters are empty.
    pub fn is_valid(&self) -> bool {
        [&self.expression, &self.block, &self.comment]
            .iter()
            .all(|(begin, end)| !begin.is_empty() && !end.is_empty())
    }
}

impl Default for Markers {
    fn default() -> Self {
        Builder::new().to_markers()
    }
}

/// Provides methods to build a `Syntax`.
///
/// # Example
///
/// ```
/// use zephyr::Builder;
///
/// let syntax = Builder::new()
///     .with_expression("((", "))")
///     .with_block("(*", "*)")
///     .with_comment("(#", "#)")
///     .to_syntax();
/// ```
#[derive(Debug, Clone)]
pub struct Builder<'marker> {
    expression: (&'marker str, &'marker str),
    block: (&'marker str, &'marker str),
    comment: (&'marker str, &'marker str),
}

impl<'marker> Builder<'marker> {
    /// Create a new [`Builder`].
    ///
    /// The `Builder` has default markers:
    ///
    /// ```text
    /// Expressions: {{ name }}
    /// Blocks: {% if ... %}
    /// Comments: <!-- ... -->
    /// ```
    ///
    /// To proceed with these defaults, you may immediately call `to_syntax` to receive the
    /// [`Syntax`] instance.
    #[inline]
    pub fn new() -> Self {
        Self {
            expression: ("{{", "}}"),
            block: ("{%", "%}"),
            comment: ("<!--", "-->"),
        }
    }

    /// Set the expression markers.
    #[inline]
    pub fn set_expression(&mut self, begin: &'marker str, end: &'marker str) {
        self.expression = (begin, end);
    }

    /// Set the expression markers.
    ///
    /// Returns the [`Builder`], so additional methods may be chained.
    #[inline]
    pub fn with_expression(mut self, begin: &'marker str, end: &'marker str) -> Self {
        self.set_expression(begin, end);

        self
    }

    /// Set the block markers.
    #[inline]
    pub fn set_block(&mut self, begin: &'marker str, end: &'marker str) {
        self.block = (begin, end);
    }

    /// Set the block markers.
    ///
    /// Returns the [`Builder`], so additional methods may be chained.
    #[inline]
    pub fn with_block(mut self, begin: &'marker str, end: &'marker str) -> Self {
        self.set_block(begin, end);

        self
    }

    /// Set the comment markers.
    #[inline]
    pub fn set_comment(&mut self, begin: &'marker str, end: &'marker str) {
        self.comment = (begin, end);
    }

    /// Set the comment markers.
    ///
    /// Returns the [`Builder`], so additional methods may be chained.
    #[inline]
    pub fn with_comment(mut self, begin: &'marker str, end: &'marker str) -> Self {
        self.set_comment(begin, end);

        self
    }

    /// Return an owned copy of the markers in this [`Builder`].
    pub fn to_markers(&self) -> Markers {
        let own = |(begin, end): (&str, &str)| (begin.to_string(), end.to_string());

        Markers {
            expression: own(self.expression),
            block: own(self.block),
            comment: own(self.comment),
        }
    }

    /// Return a Syntax instance from the markers in this [`Builder`].
    pub fn to_syntax(&self) -> Syntax {
        let mut markers = Vec::new();
        let (left_expression, _) = self.expression;
        let (left_block, _) = self.block;
        let (left_comment, right_comment) = self.comment;

        markers.push((Marker::BeginExpression.into(), left_expression.into()));
        markers.push((Marker::BeginBlock.into(), left_block.into()));
        markers.push((Marker::BeginComment.into(), left_comment.into()));
        markers.push((Marker::EndComment.into(), right_comment.into()));

        Syntax::new(markers)
    }
}

impl Default for Builder<'_> {
    fn default() -> Self {
        Self::new()
    }
}
