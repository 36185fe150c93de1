//! SVG structural validation and sanitization.
//!
//! Both entry points are synchronous and CPU-bound; async callers should run
//! them on the blocking pool.

mod allowlist;
pub mod sanitizer;
pub mod validator;
mod xml;

pub use sanitizer::{sanitize, SanitizedDocument};
pub use validator::{coerce_dimension, validate, InvalidDocument, SvgMetadata};
