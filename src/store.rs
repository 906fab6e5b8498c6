use crate::{log::Error, value::Value};
use serde::Serialize;
use serde_json::to_value;

/// Provides storage for the variables that a template can be rendered with.
///
/// Variables are kept in insertion order. Inserting a name that already exists
/// does not replace it: lookup always returns the first variable inserted with
/// a given name.
#[derive(Debug, Clone, Default)]
pub struct Store {
    data: Vec<(String, Value)>,
}

impl Store {
    /// Create a new [`Store`].
    ///
    /// # Examples
    ///
    /// ```
    /// use zephyr::Store;
    ///
    /// let store = Store::new();
    /// assert!(store.is_empty());
    /// ```
    #[inline]
    pub fn new() -> Self {
        Self { data: Vec::new() }
    }

    /// Append a variable to the [`Store`].
    ///
    /// # Examples
    ///
    /// ```
    /// use zephyr::{Store, Value};
    ///
    /// let mut store = Store::new();
    /// store.insert("name", "taylor");
    ///
    /// assert_eq!(store.get("name"), Some(&Value::from("taylor")));
    /// ```
    pub fn insert<S, T>(&mut self, key: S, value: T)
    where
        S: Into<String>,
        T: Into<Value>,
    {
        self.data.push((key.into(), value.into()));
    }

    /// Append a variable to the [`Store`].
    ///
    /// Returns the [`Store`], so additional methods may be chained.
    ///
    /// # Examples
    ///
    /// ```
    /// use zephyr::{Array, Store};
    ///
    /// let store = Store::new()
    ///     .with("name", "taylor")
    ///     .with("fruits", Array::strings(["apple", "banana"]));
    ///
    /// assert_eq!(store.len(), 2);
    /// ```
    #[inline]
    pub fn with<S, T>(mut self, key: S, value: T) -> Self
    where
        S: Into<String>,
        T: Into<Value>,
    {
        self.insert(key, value);
        self
    }

    /// Serialize the value and append it to the [`Store`].
    ///
    /// # Errors
    ///
    /// Returns an [`Error`] if the serialization fails, or the serialized form
    /// has no template representation, such as null or a map.
    ///
    /// # Examples
    ///
    /// ```
    /// use zephyr::{Store, Value};
    ///
    /// let mut store = Store::new();
    /// let result = store.insert_serialize("numbers", vec![1, 2, 3]);
    ///
    /// assert!(result.is_ok());
    /// assert!(store.get("numbers").is_some_and(|v| v.as_array().is_some()));
    /// ```
    pub fn insert_serialize<S, T>(&mut self, key: S, value: T) -> Result<(), Error>
    where
        S: Into<String>,
        T: Serialize,
    {
        let key = key.into();
        let serialized = to_value(&value).map_err(|e| {
            Error::render(format!("value for `{key}` is unserializable")).with_help(e.to_string())
        })?;
        let value = Value::try_from(serialized).map_err(|e| {
            let reason = format!("value for `{key}` is unsupported");
            match e.help() {
                Some(help) => Error::render(reason).with_help(help),
                None => Error::render(reason),
            }
        })?;

        self.data.push((key, value));
        Ok(())
    }

    /// Serialize the value and append it to the [`Store`].
    ///
    /// Returns the [`Store`], so additional methods may be chained.
    ///
    /// # Errors
    ///
    /// Returns an [`Error`] if the serialization fails.
    pub fn with_serialize<S, T>(mut self, key: S, value: T) -> Result<Self, Error>
    where
        S: Into<String>,
        T: Serialize,
    {
        self.insert_serialize(key, value)?;
        Ok(self)
    }

    /// Get the value of the first variable with the given name, if any.
    #[inline]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.data
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value)
    }

    /// Return the amount of variables, including any duplicate names.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Return true if the [`Store`] holds no variables.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Return an iterator over the variables in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.data.iter().map(|(key, value)| (key.as_str(), value))
    }
}
