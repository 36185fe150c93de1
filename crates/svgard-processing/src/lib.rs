//! svgard Processing Library
//!
//! SVG validation and sanitization, the upload pipeline that stores sanitized
//! documents, and the route that serves them back.

pub mod catalog;
pub mod route;
pub mod svg;
pub mod upload;

// Re-export commonly used types
pub use catalog::{ImageCatalog, ImageId, MemoryCatalog};
pub use route::{RouteOutcome, ServeRoute};
pub use svg::{sanitize, validate, InvalidDocument, SanitizedDocument, SvgMetadata};
pub use upload::{
    HandlerRegistry, ServeError, ServedDocument, SvgHandler, UploadError, UploadGuard,
    UploadHandler,
};
