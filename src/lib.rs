//! Zephyr - Template Engine
//!
//! Renders text templates in a single pass, with `{{ name }}` expressions,
//! `{% for item in items %}` loops, `{% if name %}` conditionals and
//! `<!-- -->` comments.
//!
//! # Examples
//!
//! ```
//! use zephyr::{render, Array, Store};
//!
//! let store = Store::new()
//!     .with("name", "John")
//!     .with("fruits", Array::strings(["apple", "banana"]));
//! let template = "Hello {{ name }}!\n{% for fruit in fruits %}\n- {{ fruit }}\n{% endfor %}";
//!
//! assert_eq!(render(template, &store).unwrap(), "Hello John!\n- apple\n- banana\n");
//! ```
mod engine;
mod log;
mod pipe;
mod region;
mod render;
mod store;
mod syntax;
mod value;

pub use engine::Engine;
pub use log::{Error, Kind, Pointer, Visual};
pub use pipe::Pipe;
pub use region::Region;
pub use render::{render, Renderer};
pub use store::Store;
pub use syntax::{Builder, Marker, Markers};
pub use value::{Array, Type, Value};
