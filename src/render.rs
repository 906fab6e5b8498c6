mod directive;
mod stack;

use crate::{
    log::{
        invalid_for, invalid_if, missing_variable, unknown_directive, unmatched_comment_close,
        unterminated_comment, unterminated_tag, Error, DIRECTIVE_TOO_LONG, GROW_CHECK_STACK,
        GROW_LOOP_STACK, INVALID_LOOP_TARGET, UNCLOSED_FOR, UNCLOSED_IF, UNMATCHED_ELSE,
        UNMATCHED_ENDFOR, UNMATCHED_ENDIF, VARIABLE_TOO_LONG,
    },
    pipe::Pipe,
    region::Region,
    syntax::Marker,
    value::{Array, Value},
    Engine, Store,
};
use tracing::{debug, trace};

use self::{
    directive::{find_closing, is_space, Closing, Directive, Malformed, Target, MAX_TOKEN_LENGTH},
    stack::{CheckFrame, LoopFrame, Stack},
};

/// Render the template text with the given [`Store`].
///
/// Provides a shortcut to quickly render a template with the default markers,
/// without creating an [`Engine`][`crate::Engine`].
///
/// # Errors
///
/// Returns an [`Error`] describing the first problem found in the template,
/// along with the line it was found on.
///
/// # Examples
///
/// ```
/// use zephyr::{render, Store};
///
/// let store = Store::new().with("name", "John").with("age", 30);
/// let output = render("Hello {{ name }}, you are {{ age }} years old.", &store);
///
/// assert_eq!(output.unwrap(), "Hello John, you are 30 years old.");
/// ```
pub fn render(text: &str, store: &Store) -> Result<String, Error> {
    Engine::default().render(text, store)
}

/// Walks template text once, writing output as it goes.
///
/// Loops are replayed by moving the cursor back to the start of the loop body,
/// and branches that are not taken are jumped over.
pub struct Renderer<'source, 'store> {
    /// The engine providing markers.
    engine: &'source Engine,
    /// The template being rendered.
    source: &'source str,
    /// The Store that the template is rendered with.
    store: &'store Store,
    /// The name of the template, if it has one.
    name: Option<&'source str>,
    /// Position within source.
    cursor: usize,
    /// Offset of the comment marker that is currently open.
    comment: Option<usize>,
    /// Rendered output.
    pipe: Pipe,
    /// Active "for" loops.
    loops: Stack<LoopFrame<'store>>,
    /// Active "if" blocks.
    checks: Stack<CheckFrame>,
}

impl<'source, 'store> Renderer<'source, 'store> {
    /// Create a new [`Renderer`].
    ///
    /// # Errors
    ///
    /// Returns an [`Error`] if memory for the output or frame stacks cannot be
    /// obtained.
    pub fn new(
        engine: &'source Engine,
        source: &'source str,
        store: &'store Store,
    ) -> Result<Self, Error> {
        Ok(Renderer {
            engine,
            source,
            store,
            name: None,
            cursor: 0,
            comment: None,
            pipe: Pipe::with_capacity(source.len())?,
            loops: Stack::new().map_err(|_| Error::memory(GROW_LOOP_STACK))?,
            checks: Stack::new().map_err(|_| Error::memory(GROW_CHECK_STACK))?,
        })
    }

    /// Set the name of the template, which is attached to any [`Error`].
    pub fn with_name(mut self, name: &'source str) -> Self {
        self.name = Some(name);

        self
    }

    /// Render the template stored inside the [`Renderer`].
    ///
    /// # Errors
    ///
    /// Returns an [`Error`] at the first malformed tag, missing variable,
    /// mismatched or unclosed block, or failed allocation.
    pub fn render(mut self) -> Result<String, Error> {
        debug!(
            name = self.name.unwrap_or("?"),
            length = self.source.len(),
            "rendering template"
        );
        let engine = self.engine;
        let length = self.source.len();

        while self.cursor < length {
            if self.comment.is_some() {
                self.skip_comment();
                continue;
            }

            let skip = self.is_skipping();
            match engine.finder().next(self.source, self.cursor) {
                Some((id, begin, end)) => {
                    self.write_raw(begin, skip)?;
                    match Marker::from(id) {
                        Marker::BeginComment => {
                            self.comment = Some(begin);
                            self.cursor = end;
                        }
                        Marker::EndComment => {
                            let reason = unmatched_comment_close(&engine.markers().comment.1);
                            return Err(self.locate(Error::parse(reason), Region::new(begin..end)));
                        }
                        Marker::BeginExpression => self.render_expression(begin, end, skip)?,
                        Marker::BeginBlock => self.render_block(begin, end, skip)?,
                    }
                }
                None => self.write_raw(length, skip)?,
            }
        }

        self.finish()
    }

    /// Check for constructs left open at the end of the template, and return
    /// the output.
    fn finish(self) -> Result<String, Error> {
        if let Some(begin) = self.comment {
            let open = &self.engine.markers().comment.0;
            let error = Error::syntax(unterminated_comment(open));
            return Err(self.locate(error, Region::new(begin..begin + open.len())));
        }
        if !self.loops.is_empty() {
            return Err(self.unclosed(UNCLOSED_FOR));
        }
        if !self.checks.is_empty() {
            return Err(self.unclosed_if());
        }

        let output = self.pipe.finish();
        debug!(length = output.len(), "rendered template");

        Ok(output)
    }

    /// Write the raw text between the cursor and `until`, unless output is
    /// being withheld, and move the cursor to `until`.
    fn write_raw(&mut self, until: usize, skip: bool) -> Result<(), Error> {
        let source = self.source;
        if !skip {
            self.pipe
                .push_str(&source[self.cursor..until])
                .map_err(|e| self.locate(e, Region::at(self.cursor)))?;
        }
        self.cursor = until;

        Ok(())
    }

    /// Move the cursor past the end of the open comment, or to the end of the
    /// template if the comment is never closed.
    fn skip_comment(&mut self) {
        let close = &self.engine.markers().comment.1;
        match self.source[self.cursor..].find(close.as_str()) {
            Some(offset) => {
                self.cursor += offset + close.len();
                self.comment = None;
            }
            None => self.cursor = self.source.len(),
        }
    }

    /// Render an expression tag, such as `{{ name }}`.
    ///
    /// `begin` and `end` surround the opening marker.
    fn render_expression(&mut self, begin: usize, end: usize, skip: bool) -> Result<(), Error> {
        let source = self.source;
        let (open, close) = &self.engine.markers().expression;
        let body_end = match source[end..].find(close.as_str()) {
            Some(offset) => end + offset,
            None => {
                let error = Error::parse(unterminated_tag(open));
                return Err(self.locate(error, Region::new(begin..end)));
            }
        };
        let region = Region::new(begin..body_end + close.len());

        if !skip {
            if body_end - end >= MAX_TOKEN_LENGTH {
                return Err(self.locate(Error::parse(VARIABLE_TOO_LONG), region));
            }

            let name = source[end..body_end].trim_matches(is_space);
            let value = match self.lookup(name) {
                Some(value) => value,
                None => return Err(self.locate(Error::render(missing_variable(name)), region)),
            };
            self.pipe
                .write_value(value)
                .map_err(|e| self.locate(e, region))?;
        }
        self.cursor = region.end;

        Ok(())
    }

    /// Render a block tag, such as `{% if show %}`.
    ///
    /// `begin` and `end` surround the opening marker.
    fn render_block(&mut self, begin: usize, end: usize, skip: bool) -> Result<(), Error> {
        let source = self.source;
        let (open, close) = &self.engine.markers().block;
        let body_end = match source[end..].find(close.as_str()) {
            Some(offset) => end + offset,
            None => {
                let error = Error::parse(unterminated_tag(open));
                return Err(self.locate(error, Region::new(begin..end)));
            }
        };
        let region = Region::new(begin..body_end + close.len());

        // A tag alone on its line takes the whole line with it.
        self.cursor = match self.standalone_end(region) {
            Some(line_end) => {
                if !skip {
                    self.pipe.truncate_line();
                }
                line_end
            }
            None => region.end,
        };

        if body_end - end >= MAX_TOKEN_LENGTH {
            return Err(self.locate(Error::parse(DIRECTIVE_TOO_LONG), region));
        }

        let command = source[end..body_end].trim_matches(is_space);
        let directive = match Directive::parse(command) {
            Ok(directive) => directive,
            Err(malformed) => {
                let reason = match malformed {
                    Malformed::For => invalid_for(open, close),
                    Malformed::If => invalid_if(open, close),
                    Malformed::Unknown => unknown_directive(command),
                };
                return Err(self.locate(Error::syntax(reason), region));
            }
        };

        match directive {
            Directive::For { item, collection } if !skip => {
                self.open_loop(item, collection, region)
            }
            Directive::EndFor if !skip => self.close_loop(region),
            Directive::For { .. } | Directive::EndFor => Ok(()),
            Directive::If { condition } => self.open_check(condition, region),
            Directive::Else => self.enter_else(region),
            Directive::EndIf => self.close_check(region),
        }
    }

    /// Return the offset just past the line holding the tag in `region`, if
    /// the tag is the only thing on that line apart from whitespace.
    ///
    /// The offset includes the newline ending the line, when there is one.
    fn standalone_end(&self, region: Region) -> Option<usize> {
        let source = self.source;
        let line_begin = source[..region.begin]
            .rfind('\n')
            .map(|index| index + 1)
            .unwrap_or(0);
        if !source[line_begin..region.begin].chars().all(is_space) {
            return None;
        }

        let rest = &source[region.end..];
        let (line, newline) = match rest.find('\n') {
            Some(index) => (&rest[..index], 1),
            None => (rest, 0),
        };
        if !line.chars().all(is_space) {
            return None;
        }

        Some(region.end + line.len() + newline)
    }

    /// Begin a "for" loop over the named collection.
    fn open_loop(&mut self, item: &str, collection: &str, region: Region) -> Result<(), Error> {
        let store = self.store;
        let array: &'store Array = match store.get(collection).and_then(Value::as_array) {
            Some(array) => array,
            None => return Err(self.locate(Error::render(INVALID_LOOP_TARGET), region)),
        };

        self.loops
            .push(LoopFrame::new(array, item, self.cursor))
            .map_err(|_| self.locate(Error::memory(GROW_LOOP_STACK), region))?;
        trace!(item, collection, length = array.len(), "entering loop");

        if array.is_empty() {
            match find_closing(self.source, self.cursor, self.engine.markers(), Target::EndFor) {
                Some((_, after)) => self.cursor = after,
                None => return Err(self.unclosed(UNCLOSED_FOR)),
            }
            self.loops.pop();
            trace!(collection, "skipped empty loop");
        }

        Ok(())
    }

    /// Advance the innermost loop, replaying its body if items remain.
    fn close_loop(&mut self, region: Region) -> Result<(), Error> {
        if self.loops.is_empty() {
            return Err(self.locate(Error::syntax(UNMATCHED_ENDFOR), region));
        }

        let mut done = false;
        if let Some(frame) = self.loops.top_mut() {
            frame.index += 1;
            if frame.is_done() {
                done = true;
            } else {
                self.cursor = frame.start;
                trace!(item = frame.name.as_str(), index = frame.index, "repeating loop");
            }
        }
        if done {
            self.loops.pop();
            trace!(depth = self.loops.depth(), "leaving loop");
        }

        Ok(())
    }

    /// Begin an "if" block, jumping to the "else" or "endif" tag when the
    /// guard does not hold.
    fn open_check(&mut self, condition: &str, region: Region) -> Result<(), Error> {
        let guard = match self.lookup(condition) {
            Some(value) => value.is_truthy(),
            None => return Err(self.locate(Error::render(missing_variable(condition)), region)),
        };

        self.checks
            .push(CheckFrame::new(guard, region.begin))
            .map_err(|_| self.locate(Error::memory(GROW_CHECK_STACK), region))?;
        trace!(condition, guard, "entering conditional");

        if !guard {
            let markers = self.engine.markers();
            match find_closing(self.source, self.cursor, markers, Target::ElseOrEndIf) {
                Some((Closing::Else, after)) => {
                    if let Some(frame) = self.checks.top_mut() {
                        frame.in_else = true;
                    }
                    self.cursor = after;
                }
                Some((_, after)) => {
                    self.checks.pop();
                    self.cursor = after;
                }
                None => return Err(self.unclosed_if()),
            }
            self.skip_newlines();
        }

        Ok(())
    }

    /// Enter the "else" arm of the innermost "if" block, jumping to its
    /// "endif" tag when the "if" arm was already rendered.
    fn enter_else(&mut self, region: Region) -> Result<(), Error> {
        let guard = match self.checks.top_mut() {
            Some(frame) => {
                frame.in_else = true;
                frame.guard
            }
            None => return Err(self.locate(Error::syntax(UNMATCHED_ELSE), region)),
        };

        if guard {
            let markers = self.engine.markers();
            match find_closing(self.source, self.cursor, markers, Target::EndIf) {
                Some((_, after)) => self.cursor = after,
                None => return Err(self.unclosed_if()),
            }
            self.checks.pop();
            trace!(depth = self.checks.depth(), "leaving conditional");
            self.skip_newlines();
        }

        Ok(())
    }

    /// End the innermost "if" block.
    fn close_check(&mut self, region: Region) -> Result<(), Error> {
        match self.checks.pop() {
            Some(_) => {
                trace!(depth = self.checks.depth(), "leaving conditional");
                Ok(())
            }
            None => Err(self.locate(Error::syntax(UNMATCHED_ENDIF), region)),
        }
    }

    /// Move the cursor past any newlines directly under it.
    fn skip_newlines(&mut self) {
        while self.source.as_bytes().get(self.cursor) == Some(&b'\n') {
            self.cursor += 1;
        }
    }

    /// Return true if output is being withheld, which depends only on the
    /// innermost "if" block.
    fn is_skipping(&self) -> bool {
        self.checks.top().is_some_and(CheckFrame::is_skipping)
    }

    /// Return the value of the named variable.
    ///
    /// Loop variables are searched from the innermost loop outward before
    /// the [`Store`] is searched.
    fn lookup(&self, name: &str) -> Option<&'store Value> {
        for frame in self.loops.iter_top_down() {
            if frame.name == name {
                let array: &'store Array = frame.array;
                return array.get(frame.index);
            }
        }

        self.store.get(name)
    }

    /// Return a syntax [`Error`] pointing at the end of the template.
    fn unclosed(&self, reason: &str) -> Error {
        self.locate(Error::syntax(reason), Region::at(self.source.len()))
    }

    /// Return a syntax [`Error`] pointing at the end of the template, with help
    /// text naming the line of the innermost "if" tag.
    fn unclosed_if(&self) -> Error {
        let error = self.unclosed(UNCLOSED_IF);
        match self.checks.top() {
            Some(frame) => {
                let line = Region::at(frame.begin).line(self.source);
                error.with_help(format!("the 'if' statement was opened on line {line}"))
            }
            None => error,
        }
    }

    /// Attach the position and template name to the given [`Error`].
    fn locate(&self, error: Error, region: Region) -> Error {
        let error = error.with_pointer(self.source, region);
        match self.name {
            Some(name) => error.with_name(name),
            None => error,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::render;
    use crate::{
        log::{Error, Kind},
        Array, Store,
    };

    fn failed(text: &str, store: &Store) -> Error {
        match render(text, store) {
            Ok(output) => panic!("expected an error, rendered {output:?}"),
            Err(error) => error,
        }
    }

    fn assert_error(error: Error, kind: Kind, reason: &str, line: usize) {
        assert_eq!(error.kind(), kind);
        assert_eq!(error.reason(), reason);
        assert_eq!(error.line(), line);
    }

    #[test]
    fn test_raw_text() {
        assert_eq!(render("", &Store::new()).unwrap(), "");
        assert_eq!(
            render("héllo wörld ✓", &Store::new()).unwrap(),
            "héllo wörld ✓"
        );
    }

    #[test]
    fn test_simple_substitution() {
        let store = Store::new().with("name", "John").with("age", 30);

        assert_eq!(
            render("Hello {{ name }}, you are {{ age }} years old.", &store).unwrap(),
            "Hello John, you are 30 years old."
        );
        assert_eq!(render("{{name}}{{   name\t}}", &store).unwrap(), "JohnJohn");
    }

    #[test]
    fn test_missing_variable() {
        let store = Store::new().with("name", "John");

        assert_error(
            failed("Hello {{ name }}, you are {{ age }} years old.", &store),
            Kind::Render,
            "Missing template variable for 'age'",
            1,
        );
    }

    #[test]
    fn test_all_value_types() {
        let store = Store::new()
            .with("s", "text")
            .with("i", 42)
            .with("f", 3.14f32)
            .with("d", 2.71828f64)
            .with("b", true)
            .with("l", 123_456_789i64)
            .with("u", 4_294_967_295u32);

        assert_eq!(
            render(
                "{{ s }},{{ i }},{{ f }},{{ d }},{{ b }},{{ l }},{{ u }}",
                &store
            )
            .unwrap(),
            "text,42,3.1400,2.7183,true,123456789,4294967295"
        );
    }

    #[test]
    fn test_array_placeholder() {
        let store = Store::new().with("xs", Array::ints([1, 2]));

        assert_eq!(render("{{ xs }}", &store).unwrap(), "[array of size 2]");
    }

    #[test]
    fn test_for_loop() {
        let store = Store::new().with("fruits", Array::strings(["apple", "banana", "cherry"]));

        assert_eq!(
            render("{% for fruit in fruits %}{{ fruit }} {% endfor %}", &store).unwrap(),
            "apple banana cherry "
        );
    }

    #[test]
    fn test_nested_loops() {
        let store = Store::new()
            .with("letters", Array::strings(["A", "B"]))
            .with("numbers", Array::ints([1, 2, 3]));

        assert_eq!(
            render(
                "{% for l in letters %}{{ l }}{% for n in numbers %}{{ n }}{% endfor %}{% endfor %}",
                &store
            )
            .unwrap(),
            "A123B123"
        );
    }

    #[test]
    fn test_cartesian_product() {
        let store = Store::new()
            .with("outer", Array::strings(["a", "b"]))
            .with("inner", Array::ints([1, 2]));

        assert_eq!(
            render(
                "{% for o in outer %}{% for i in inner %}{{o}}{{i}};{% endfor %}{% endfor %}",
                &store
            )
            .unwrap(),
            "a1;a2;b1;b2;"
        );
    }

    #[test]
    fn test_empty_loop() {
        let store = Store::new().with("xs", Array::strings(Vec::<String>::new()));

        assert_eq!(
            render("[{% for x in xs %}{{ x }}{{ missing }}{% endfor %}]", &store).unwrap(),
            "[]"
        );
    }

    #[test]
    fn test_empty_loop_nested_body() {
        let store = Store::new()
            .with("xs", Array::ints([]))
            .with("ys", Array::ints([1]));

        assert_eq!(
            render(
                "<{% for x in xs %}{% for y in ys %}{{ y }}{% endfor %}{% endfor %}>",
                &store
            )
            .unwrap(),
            "<>"
        );
    }

    #[test]
    fn test_loop_variable_shadows_store() {
        let store = Store::new()
            .with("x", "store")
            .with("xs", Array::strings(["loop"]));

        assert_eq!(
            render("{% for x in xs %}{{ x }}{% endfor %} {{ x }}", &store).unwrap(),
            "loop store"
        );
    }

    #[test]
    fn test_if() {
        let text = "{% if show %}Visible{% endif %}";

        assert_eq!(
            render(text, &Store::new().with("show", true)).unwrap(),
            "Visible"
        );
        assert_eq!(render(text, &Store::new().with("show", false)).unwrap(), "");
    }

    #[test]
    fn test_if_truthiness() {
        let text = "{% if v %}T{% else %}F{% endif %}";
        let check = |store: Store| render(text, &store).unwrap();

        assert_eq!(check(Store::new().with("v", 1)), "T");
        assert_eq!(check(Store::new().with("v", 0)), "F");
        assert_eq!(check(Store::new().with("v", 0.0f64)), "F");
        assert_eq!(check(Store::new().with("v", "")), "F");
        assert_eq!(check(Store::new().with("v", "0")), "T");
        assert_eq!(check(Store::new().with("v", Array::ints([]))), "F");
        assert_eq!(check(Store::new().with("v", Array::ints([0]))), "T");
    }

    #[test]
    fn test_if_else() {
        let text = "{% if admin %}Admin{% else %}User{% endif %}";

        assert_eq!(
            render(text, &Store::new().with("admin", false)).unwrap(),
            "User"
        );
        assert_eq!(
            render(text, &Store::new().with("admin", true)).unwrap(),
            "Admin"
        );
    }

    #[test]
    fn test_nested_conditionals() {
        let store = Store::new()
            .with("a", true)
            .with("b", false)
            .with("c", true);

        assert_eq!(
            render(
                "{% if a %}First{% if b %}Second{% endif %}{% if c %}Third{% endif %}{% endif %}",
                &store
            )
            .unwrap(),
            "FirstThird"
        );
    }

    #[test]
    fn test_nested_conditional_in_false_branch() {
        let store = Store::new().with("a", false);

        assert_eq!(
            render(
                "{% if a %}{% if b %}x{% else %}y{% endif %}{% else %}z{% endif %}",
                &store
            )
            .unwrap(),
            "z"
        );
    }

    #[test]
    fn test_false_guard_consumes_newlines() {
        let store = Store::new().with("a", false);

        assert_eq!(
            render("{% if a %}x{% endif %}\n\n  y", &store).unwrap(),
            "  y"
        );
    }

    #[test]
    fn test_loops_and_conditionals() {
        let store = Store::new()
            .with("numbers", Array::ints([1, 2]))
            .with("show", false);

        assert_eq!(
            render(
                "{% for n in numbers %}{% if show %}{{ n }}{% else %}-{% endif %}{% endfor %}",
                &store
            )
            .unwrap(),
            "--"
        );

        let store = Store::new().with("flags", Array::bools([true, false, true]));

        assert_eq!(
            render(
                "{% for f in flags %}{% if f %}T{% else %}F{% endif %}{% endfor %}",
                &store
            )
            .unwrap(),
            "TFT"
        );
    }

    #[test]
    fn test_deep_nesting() {
        let store = Store::new()
            .with("xs", Array::strings(["x", "y"]))
            .with("ys", Array::ints([1, 2]))
            .with("flag", true);

        assert_eq!(
            render(
                "{% for a in xs %}{% if flag %}{% for b in ys %}{% if b %}{{ a }}{{ b }}{% endif %}{% endfor %}{% endif %}{% endfor %}",
                &store
            )
            .unwrap(),
            "x1x2y1y2"
        );
    }

    #[test]
    fn test_standalone_lines() {
        let text = "Hello\n  {% if show %}\n    {{ name }}\n  {% endif %}\nWorld";
        let store = Store::new().with("show", true).with("name", "John");

        assert_eq!(render(text, &store).unwrap(), "Hello\n    John\nWorld");

        let text = "<ul>\n{% for f in fruits %}\n  <li>{{ f }}</li>\n{% endfor %}\n</ul>";
        let store = Store::new().with("fruits", Array::strings(["a", "b"]));

        assert_eq!(
            render(text, &store).unwrap(),
            "<ul>\n  <li>a</li>\n  <li>b</li>\n</ul>"
        );
    }

    #[test]
    fn test_standalone_else() {
        let text = "A\n{% if x %}\n  yes\n{% else %}\n  no\n{% endif %}\nB";

        assert_eq!(
            render(text, &Store::new().with("x", true)).unwrap(),
            "A\n  yes\nB"
        );
        assert_eq!(
            render(text, &Store::new().with("x", false)).unwrap(),
            "A\n  no\nB"
        );
    }

    #[test]
    fn test_else_jump_consumes_newlines() {
        let store = Store::new().with("x", true);

        assert_eq!(
            render("{% if x %}a{% else %}b{% endif %}\n\n c", &store).unwrap(),
            "a c"
        );
    }

    #[test]
    fn test_standalone_empty_loop() {
        let text = "<ul>\n{% for f in fruits %}\n  <li>{{ f }}</li>\n{% endfor %}\n</ul>";
        let store = Store::new().with("fruits", Array::strings(Vec::<String>::new()));

        assert_eq!(render(text, &store).unwrap(), "<ul>\n\n</ul>");
    }

    #[test]
    fn test_inline_tags_keep_whitespace() {
        let store = Store::new().with("show", true);

        assert_eq!(
            render("a {% if show %} b {% endif %} c", &store).unwrap(),
            "a  b  c"
        );
    }

    #[test]
    fn test_comment() {
        assert_eq!(
            render("Hello <!-- comment --> World", &Store::new()).unwrap(),
            "Hello  World"
        );
        assert_eq!(
            render("a<!-- {{ missing }} {% if %} -->b", &Store::new()).unwrap(),
            "ab"
        );
    }

    #[test]
    fn test_unterminated_comment() {
        assert_error(
            failed("Hello\n<!-- comment", &Store::new()),
            Kind::Syntax,
            "Unterminated HTML comment '<!--'",
            2,
        );
    }

    #[test]
    fn test_unmatched_comment_close() {
        assert_error(
            failed("a\nb --> c", &Store::new()),
            Kind::Parse,
            "Unmatched comment closing tag '-->'",
            2,
        );
    }

    #[test]
    fn test_unterminated_tags() {
        let store = Store::new().with("name", "John");

        assert_error(
            failed("Hello {{ name", &store),
            Kind::Parse,
            "Unterminated '{{' tag",
            1,
        );
        assert_error(
            failed("a\n{% if name", &store),
            Kind::Parse,
            "Unterminated '{%' tag",
            2,
        );
    }

    #[test]
    fn test_token_length() {
        let name = "a".repeat(127);
        let store = Store::new().with(name.as_str(), "ok");

        assert_eq!(render(&format!("{{{{{name}}}}}"), &store).unwrap(), "ok");
        assert_error(
            failed(&format!("{{{{ {name} }}}}"), &store),
            Kind::Parse,
            "Variable name is too long",
            1,
        );
        assert_error(
            failed(&format!("\n{{% {} %}}", "x".repeat(130)), &store),
            Kind::Parse,
            "Directive is too long",
            2,
        );
    }

    #[test]
    fn test_complex_condition() {
        let store = Store::new().with("user", "taylor");

        assert_error(
            failed(
                "{% if user.age > 18 and user.verified %}Adult{% endif %}",
                &store,
            ),
            Kind::Render,
            "Missing template variable for 'user.age > 18 and user.verified'",
            1,
        );
    }

    #[test]
    fn test_malformed_directives() {
        let store = Store::new().with("xs", Array::ints([1]));

        assert_error(
            failed("{% for x of xs %}{% endfor %}", &store),
            Kind::Syntax,
            "Invalid 'for' loop. Use: {% for item in items %}",
            1,
        );
        assert_error(
            failed("\n{% if %}{% endif %}", &store),
            Kind::Syntax,
            "Invalid 'if' statement. Use: {% if condition %}",
            2,
        );
        assert_error(
            failed("{% include header %}", &store),
            Kind::Syntax,
            "Unknown directive 'include header'",
            1,
        );
    }

    #[test]
    fn test_unmatched_closing() {
        let store = Store::new();

        assert_error(
            failed("a\n{% endfor %}", &store),
            Kind::Syntax,
            "Found 'endfor' with no matching 'for'",
            2,
        );
        assert_error(
            failed("{% else %}", &store),
            Kind::Syntax,
            "Found 'else' with no matching 'if'",
            1,
        );
        assert_error(
            failed("\n\n{% endif %}", &store),
            Kind::Syntax,
            "Found 'endif' with no matching 'if'",
            3,
        );
    }

    #[test]
    fn test_unclosed_blocks() {
        let store = Store::new()
            .with("xs", Array::ints([1]))
            .with("empty", Array::ints([]))
            .with("show", true)
            .with("hide", false);

        assert_error(
            failed("a\nb{% for x in xs %}\nc", &store),
            Kind::Syntax,
            "Unclosed 'for' loop at end of template",
            3,
        );
        assert_error(
            failed("{% for x in empty %}\n{{ x }}", &store),
            Kind::Syntax,
            "Unclosed 'for' loop at end of template",
            2,
        );
        assert_error(
            failed("{% if show %}yes", &store),
            Kind::Syntax,
            "Unclosed 'if' statement at end of template",
            1,
        );
        assert_error(
            failed("{% if hide %}\nyes", &store),
            Kind::Syntax,
            "Unclosed 'if' statement at end of template",
            2,
        );
        assert_error(
            failed("{% if show %}yes{% else %}\nno", &store),
            Kind::Syntax,
            "Unclosed 'if' statement at end of template",
            2,
        );
    }

    #[test]
    fn test_unclosed_if_names_opening_line() {
        let store = Store::new().with("show", true).with("hide", false);

        let error = failed("a\n{% if show %}\n{% if show %}{% endif %}\nb", &store);
        assert_eq!(error.line(), 4);
        assert_eq!(error.help(), Some("the 'if' statement was opened on line 2"));

        let error = failed("a\n\n{% if hide %}b", &store);
        assert_eq!(error.line(), 3);
        assert_eq!(error.help(), Some("the 'if' statement was opened on line 3"));
    }

    #[test]
    fn test_invalid_loop_target() {
        let store = Store::new().with("name", "John");

        assert_error(
            failed("{% for x in name %}{% endfor %}", &store),
            Kind::Render,
            "Variable for loop is not a valid array",
            1,
        );
        assert_error(
            failed("\n{% for x in ghost %}{% endfor %}", &store),
            Kind::Render,
            "Variable for loop is not a valid array",
            2,
        );
    }

    #[test]
    fn test_error_line_in_loop() {
        let store = Store::new().with("xs", Array::ints([1]));

        assert_error(
            failed("{% for x in xs %}\n{{ x }}\n{{ y }}\n{% endfor %}", &store),
            Kind::Render,
            "Missing template variable for 'y'",
            3,
        );
    }
}
