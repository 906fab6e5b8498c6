use crate::{
    log::{error_duplicate_template, error_missing_template, Error, INVALID_SYNTAX},
    render::Renderer,
    syntax::{Builder, Markers},
    Store,
};
use morel::Finder;
use std::collections::HashMap;

/// Facilitates rendering templates with a set of markers, and provides storage
/// for named templates.
pub struct Engine {
    /// Delimiters recognized by this engine.
    markers: Markers,
    /// Compiled [`Finder`] instance used to search for opening markers.
    finder: Finder,
    /// Templates that this Engine is aware of.
    templates: HashMap<String, String>,
}

impl Engine {
    /// Create a new instance of [`Engine`] with the markers in the given
    /// [`Builder`].
    ///
    /// # Errors
    ///
    /// Returns an [`Error`] if any of the markers is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use zephyr::{Builder, Engine, Store};
    ///
    /// let engine = Engine::new(Builder::new().with_expression("[[", "]]")).unwrap();
    /// let result = engine.render("hello, [[ name ]]!", &Store::new().with("name", "taylor"));
    ///
    /// assert_eq!(result.unwrap(), "hello, taylor!");
    /// ```
    pub fn new(builder: Builder<'_>) -> Result<Self, Error> {
        let markers = builder.to_markers();
        if !markers.is_valid() {
            return Err(Error::parse(INVALID_SYNTAX).with_help("markers may not be empty"));
        }

        Ok(Self::build(markers, &builder))
    }

    /// Create a new [`Engine`] from markers that are known to be valid.
    fn build(markers: Markers, builder: &Builder<'_>) -> Self {
        Self {
            markers,
            finder: Finder::new(builder.to_syntax()),
            templates: HashMap::new(),
        }
    }

    /// Render the template text with the given [`Store`].
    ///
    /// # Errors
    ///
    /// Returns an [`Error`] describing the first problem found in the template,
    /// such as a malformed tag, a variable missing from the `Store`, or a block
    /// that is never closed.
    ///
    /// # Examples
    ///
    /// ```
    /// use zephyr::{Engine, Store};
    ///
    /// let engine = Engine::default();
    /// let result = engine.render("hello, {{ name }}!", &Store::new().with("name", "taylor"));
    ///
    /// assert_eq!(result.unwrap(), "hello, taylor!")
    /// ```
    #[inline]
    pub fn render(&self, text: &str, store: &Store) -> Result<String, Error> {
        Renderer::new(self, text, store)?.render()
    }

    /// Render the named template with the given [`Store`].
    ///
    /// # Errors
    ///
    /// Returns an [`Error`] if no template with the given name exists, or when
    /// rendering fails. Errors from rendering carry the template name.
    ///
    /// # Examples
    ///
    /// ```
    /// use zephyr::{Engine, Store};
    ///
    /// let mut engine = Engine::default();
    /// engine.add_template_must("greeting", "hello, {{ name }}!");
    ///
    /// let result = engine.render_named("greeting", &Store::new().with("name", "taylor"));
    /// assert_eq!(result.unwrap(), "hello, taylor!");
    ///
    /// let missing = engine.render_named("farewell", &Store::new());
    /// assert!(missing.is_err());
    /// ```
    pub fn render_named(&self, name: &str, store: &Store) -> Result<String, Error> {
        let text = match self.templates.get(name) {
            Some(text) => text,
            None => return Err(error_missing_template(name)),
        };

        Renderer::new(self, text, store)
            .map_err(|e| e.with_name(name))?
            .with_name(name)
            .render()
    }

    /// Store a new template with the given name.
    ///
    /// # Errors
    ///
    /// Returns an [`Error`] when a template with the given name already exists.
    ///
    /// # Examples
    ///
    /// ```
    /// use zephyr::Engine;
    ///
    /// let mut engine = Engine::default();
    /// let result = engine.add_template("template_name", "hello, {{ name }}!");
    /// assert!(result.is_ok());
    ///
    /// let second = engine.add_template("template_name", "hello again");
    /// assert!(second.is_err());
    /// ```
    pub fn add_template<S, T>(&mut self, name: S, text: T) -> Result<(), Error>
    where
        S: Into<String>,
        T: Into<String>,
    {
        let name = name.into();
        if self.templates.contains_key(&name) {
            return Err(error_duplicate_template(&name));
        }

        self.templates.insert(name, text.into());
        Ok(())
    }

    /// Store a new template with the given name.
    ///
    /// If a template with the given name already exists, it is overwritten.
    ///
    /// # Examples
    ///
    /// ```
    /// use zephyr::Engine;
    ///
    /// let mut engine = Engine::default();
    /// engine.add_template_must("template_name", "hello, {{ name }}!");
    /// engine.add_template_must("template_name", "goodbye, {{ name }}!");
    ///
    /// assert_eq!(engine.get_template("template_name"), Some("goodbye, {{ name }}!"));
    /// ```
    #[inline]
    pub fn add_template_must<S, T>(&mut self, name: S, text: T)
    where
        S: Into<String>,
        T: Into<String>,
    {
        self.templates.insert(name.into(), text.into());
    }

    /// Store a new template with the given name.
    ///
    /// Returns the [`Engine`], so additional methods may be chained.
    ///
    /// # Errors
    ///
    /// Returns an [`Error`] when a template with the given name already exists.
    #[inline]
    pub fn with_template<S, T>(mut self, name: S, text: T) -> Result<Self, Error>
    where
        S: Into<String>,
        T: Into<String>,
    {
        self.add_template(name, text)?;
        Ok(self)
    }

    /// Return the text of the named template.
    ///
    /// # Examples
    ///
    /// ```
    /// use zephyr::Engine;
    ///
    /// let mut engine = Engine::default();
    /// engine.add_template_must("template_name", "hello, {{ name }}!");
    ///
    /// assert!(engine.get_template("template_name").is_some());
    /// assert!(engine.get_template("ghost").is_none());
    /// ```
    #[inline]
    pub fn get_template(&self, name: &str) -> Option<&str> {
        self.templates.get(name).map(String::as_str)
    }

    /// Return the markers recognized by this [`Engine`].
    #[inline]
    pub fn markers(&self) -> &Markers {
        &self.markers
    }

    /// Return the [`Finder`] used to search for markers.
    #[inline]
    pub(crate) fn finder(&self) -> &Finder {
        &self.finder
    }
}

impl Default for Engine {
    fn default() -> Self {
        let builder = Builder::new();

        Self::build(builder.to_markers(), &builder)
    }
}
