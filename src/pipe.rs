use crate::{
    log::{Error, GROW_OUTPUT},
    value::Value,
};
use std::fmt::{self, Write};

/// Capacity used when a [`Pipe`] is requested with a capacity of zero.
pub const DEFAULT_CAPACITY: usize = 1024;

/// An append-only buffer that collects rendered output.
///
/// Capacity doubles whenever an append does not fit, and a failed
/// allocation is reported as an [`Error`] of kind
/// [`Memory`][`crate::Kind::Memory`] instead of aborting. Content appended
/// before a failure is kept.
#[derive(Debug)]
pub struct Pipe {
    buffer: String,
}

impl Pipe {
    /// Create a new empty [`Pipe`] with room for at least `capacity` bytes.
    ///
    /// A `capacity` of zero is replaced by [`DEFAULT_CAPACITY`].
    ///
    /// # Errors
    ///
    /// Returns an [`Error`] if the memory cannot be obtained.
    pub fn with_capacity(capacity: usize) -> Result<Self, Error> {
        let capacity = if capacity == 0 {
            DEFAULT_CAPACITY
        } else {
            capacity
        };
        let mut buffer = String::new();
        buffer
            .try_reserve_exact(capacity)
            .map_err(|_| Error::memory(GROW_OUTPUT))?;

        Ok(Self { buffer })
    }

    /// Append the given text to the [`Pipe`].
    ///
    /// Appending an empty string does nothing.
    ///
    /// # Errors
    ///
    /// Returns an [`Error`] if the buffer needs to grow and the memory cannot be
    /// obtained.
    pub fn push_str(&mut self, text: &str) -> Result<(), Error> {
        if text.is_empty() {
            return Ok(());
        }

        let needed = self
            .buffer
            .len()
            .checked_add(text.len())
            .ok_or_else(|| Error::memory(GROW_OUTPUT))?;
        if needed > self.buffer.capacity() {
            let mut capacity = self.buffer.capacity().max(1);
            while capacity < needed {
                capacity = capacity
                    .checked_mul(2)
                    .ok_or_else(|| Error::memory(GROW_OUTPUT))?;
            }
            self.buffer
                .try_reserve_exact(capacity - self.buffer.len())
                .map_err(|_| Error::memory(GROW_OUTPUT))?;
        }
        self.buffer.push_str(text);

        Ok(())
    }

    /// Write the text form of the given [`Value`] to the [`Pipe`].
    ///
    /// Strings are written verbatim, integers in decimal, floats and doubles
    /// with exactly four fractional digits (ties round to even), and booleans
    /// as `true` or `false`. Arrays are never written item by item, only a
    /// placeholder naming their size is written.
    ///
    /// # Errors
    ///
    /// The `Pipe` supports all [`Value`] types, so the only error that will
    /// be returned is a failure to grow the buffer.
    ///
    /// # Examples
    ///
    /// ```
    /// use zephyr::{Pipe, Value};
    ///
    /// let mut pipe = Pipe::with_capacity(0).unwrap();
    /// pipe.write_value(&Value::from(3.14f32)).unwrap();
    ///
    /// assert_eq!(pipe.finish(), "3.1400");
    /// ```
    pub fn write_value(&mut self, value: &Value) -> Result<(), Error> {
        match value {
            Value::String(string) => self.push_str(string),
            Value::Int(int) => self.write_display(format_args!("{int}")),
            Value::Float(float) => self.write_display(format_args!("{float:.4}")),
            Value::Double(double) => self.write_display(format_args!("{double:.4}")),
            Value::Bool(bool) => self.push_str(if *bool { "true" } else { "false" }),
            Value::Long(long) => self.write_display(format_args!("{long}")),
            Value::UInt(uint) => self.write_display(format_args!("{uint}")),
            Value::Array(array) => {
                self.write_display(format_args!("[array of size {}]", array.len()))
            }
        }
    }

    /// Write the formatted arguments to the buffer.
    fn write_display(&mut self, arguments: fmt::Arguments<'_>) -> Result<(), Error> {
        self.write_fmt(arguments)
            .map_err(|_| Error::memory(GROW_OUTPUT))
    }

    /// Remove everything written after the last newline.
    ///
    /// The newline itself is kept. When nothing but the current line has been
    /// written, the `Pipe` becomes empty.
    pub fn truncate_line(&mut self) {
        let start = self.buffer.rfind('\n').map(|index| index + 1).unwrap_or(0);
        self.buffer.truncate(start);
    }

    /// Return the amount of bytes written.
    #[inline]
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// Return true if nothing has been written.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Return the current capacity in bytes.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.buffer.capacity()
    }

    /// Return the text written so far.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.buffer
    }

    /// Consume the [`Pipe`] and return the written text.
    #[inline]
    pub fn finish(self) -> String {
        self.buffer
    }
}

impl Write for Pipe {
    #[inline]
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.push_str(s).map_err(|_| fmt::Error)
    }
}
