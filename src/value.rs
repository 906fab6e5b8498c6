use crate::log::{Error, UNSUPPORTED_VALUE};
use serde_json::Value as Json;
use std::fmt::Display;

/// The type of a [`Value`].
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Type {
    String,
    Int,
    Float,
    Double,
    Bool,
    Long,
    UInt,
    Array,
}

impl Display for Type {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Type::String => write!(f, "string"),
            Type::Int => write!(f, "int"),
            Type::Float => write!(f, "float"),
            Type::Double => write!(f, "double"),
            Type::Bool => write!(f, "bool"),
            Type::Long => write!(f, "long"),
            Type::UInt => write!(f, "uint"),
            Type::Array => write!(f, "array"),
        }
    }
}

/// A typed value that a template can render, test or iterate.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    String(String),
    Int(i32),
    Float(f32),
    Double(f64),
    Bool(bool),
    Long(i64),
    UInt(u32),
    Array(Array),
}

impl Value {
    /// Return the [`Type`] of this [`Value`].
    pub fn value_type(&self) -> Type {
        match self {
            Value::String(_) => Type::String,
            Value::Int(_) => Type::Int,
            Value::Float(_) => Type::Float,
            Value::Double(_) => Type::Double,
            Value::Bool(_) => Type::Bool,
            Value::Long(_) => Type::Long,
            Value::UInt(_) => Type::UInt,
            Value::Array(_) => Type::Array,
        }
    }

    /// Return true if the [`Value`] is truthy.
    ///
    /// Booleans are their own value, numbers are truthy when nonzero, strings
    /// when not empty, and arrays when they hold at least one item.
    ///
    /// # Examples
    ///
    /// ```
    /// use zephyr::{Array, Value};
    ///
    /// assert!(Value::from("lorem").is_truthy());
    /// assert!(!Value::from(0).is_truthy());
    /// assert!(!Value::from(Array::ints([])).is_truthy());
    /// ```
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Bool(bool) => *bool,
            Value::Int(int) => *int != 0,
            Value::Float(float) => *float != 0.0,
            Value::Double(double) => *double != 0.0,
            Value::Long(long) => *long != 0,
            Value::UInt(uint) => *uint != 0,
            Value::String(string) => !string.is_empty(),
            Value::Array(array) => !array.is_empty(),
        }
    }

    /// Return the [`Array`] inside this [`Value`], if it is one.
    pub fn as_array(&self) -> Option<&Array> {
        match self {
            Value::Array(array) => Some(array),
            _ => None,
        }
    }
}

/// A homogeneous sequence of [`Value`] instances that all share one declared [`Type`].
///
/// Arrays never hold other arrays.
#[derive(Debug, Clone, PartialEq)]
pub struct Array {
    /// The declared type of every item.
    item: Type,
    items: Vec<Value>,
}

impl Array {
    /// Create a new [`Array`] holding items of the given [`Type`].
    ///
    /// # Errors
    ///
    /// Returns an [`Error`] when the `Type` is [`Type::Array`], or any of the
    /// items is not of the declared `Type`.
    ///
    /// # Examples
    ///
    /// ```
    /// use zephyr::{Array, Type, Value};
    ///
    /// let array = Array::new(Type::Int, vec![Value::from(1), Value::from(2)]);
    /// assert!(array.is_ok());
    ///
    /// let mixed = Array::new(Type::Int, vec![Value::from(1), Value::from("two")]);
    /// assert!(mixed.is_err());
    /// ```
    pub fn new(item: Type, items: Vec<Value>) -> Result<Self, Error> {
        if item == Type::Array {
            return Err(Error::render(UNSUPPORTED_VALUE)
                .with_help("arrays may not contain other arrays"));
        }
        if let Some((index, value)) = items
            .iter()
            .enumerate()
            .find(|(_, value)| value.value_type() != item)
        {
            return Err(Error::render(UNSUPPORTED_VALUE).with_help(format!(
                "array of `{item}` holds a `{}` at index {index}",
                value.value_type()
            )));
        }

        Ok(Self { item, items })
    }

    /// Create a new [`Array`] of [`Type::String`].
    pub fn strings<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::typed(Type::String, items.into_iter().map(|s| Value::String(s.into())))
    }

    /// Create a new [`Array`] of [`Type::Int`].
    pub fn ints<I: IntoIterator<Item = i32>>(items: I) -> Self {
        Self::typed(Type::Int, items.into_iter().map(Value::Int))
    }

    /// Create a new [`Array`] of [`Type::Float`].
    pub fn floats<I: IntoIterator<Item = f32>>(items: I) -> Self {
        Self::typed(Type::Float, items.into_iter().map(Value::Float))
    }

    /// Create a new [`Array`] of [`Type::Double`].
    pub fn doubles<I: IntoIterator<Item = f64>>(items: I) -> Self {
        Self::typed(Type::Double, items.into_iter().map(Value::Double))
    }

    /// Create a new [`Array`] of [`Type::Bool`].
    pub fn bools<I: IntoIterator<Item = bool>>(items: I) -> Self {
        Self::typed(Type::Bool, items.into_iter().map(Value::Bool))
    }

    /// Create a new [`Array`] of [`Type::Long`].
    pub fn longs<I: IntoIterator<Item = i64>>(items: I) -> Self {
        Self::typed(Type::Long, items.into_iter().map(Value::Long))
    }

    /// Create a new [`Array`] of [`Type::UInt`].
    pub fn uints<I: IntoIterator<Item = u32>>(items: I) -> Self {
        Self::typed(Type::UInt, items.into_iter().map(Value::UInt))
    }

    fn typed<I: Iterator<Item = Value>>(item: Type, items: I) -> Self {
        Self {
            item,
            items: items.collect(),
        }
    }

    /// Return the item at the given index, if any.
    #[inline]
    pub fn get(&self, index: usize) -> Option<&Value> {
        self.items.get(index)
    }

    /// Return the declared [`Type`] of the items.
    #[inline]
    pub fn item_type(&self) -> Type {
        self.item
    }

    /// Return the amount of items.
    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Return true if there are no items.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Return an iterator over the items.
    pub fn iter(&self) -> std::slice::Iter<'_, Value> {
        self.items.iter()
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Int(value)
    }
}

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Value::Float(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Double(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Long(value)
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Value::UInt(value)
    }
}

impl From<Array> for Value {
    fn from(value: Array) -> Self {
        Value::Array(value)
    }
}

impl TryFrom<Json> for Value {
    type Error = Error;

    /// Convert a [`serde_json::Value`] into a [`Value`].
    ///
    /// Integers become the narrowest of [`Value::Int`], [`Value::UInt`] and
    /// [`Value::Long`] that holds them, and any other number becomes a
    /// [`Value::Double`]. The item type of an array is the type of its first
    /// converted item.
    ///
    /// # Errors
    ///
    /// Returns an [`Error`] for null and object values, nested arrays, and arrays
    /// that mix item types.
    fn try_from(value: Json) -> Result<Self, Self::Error> {
        match value {
            Json::String(string) => Ok(Value::String(string)),
            Json::Bool(bool) => Ok(Value::Bool(bool)),
            Json::Number(number) => {
                if let Some(int) = number.as_i64().and_then(|n| i32::try_from(n).ok()) {
                    Ok(Value::Int(int))
                } else if let Some(uint) = number.as_u64().and_then(|n| u32::try_from(n).ok()) {
                    Ok(Value::UInt(uint))
                } else if let Some(long) = number.as_i64() {
                    Ok(Value::Long(long))
                } else {
                    number.as_f64().map(Value::Double).ok_or_else(|| {
                        Error::render(UNSUPPORTED_VALUE)
                            .with_help(format!("number `{number}` cannot be represented"))
                    })
                }
            }
            Json::Array(items) => {
                let items = items
                    .into_iter()
                    .map(Value::try_from)
                    .collect::<Result<Vec<_>, _>>()?;
                let item = items.first().map(Value::value_type).unwrap_or(Type::String);

                Array::new(item, items).map(Value::Array)
            }
            Json::Null => Err(Error::render(UNSUPPORTED_VALUE)
                .with_help("null has no template representation")),
            Json::Object(_) => Err(Error::render(UNSUPPORTED_VALUE)
                .with_help("objects have no template representation, insert each field instead")),
        }
    }
}
