//! Upload handling: per-type handlers, dispatch and the shared upload guard.

pub mod error;
pub mod guard;
pub mod registry;
pub mod svg_handler;
pub mod traits;
pub mod types;

pub use error::{ServeError, UploadError};
pub use guard::UploadGuard;
pub use registry::HandlerRegistry;
pub use svg_handler::SvgHandler;
pub use traits::UploadHandler;
pub use types::ServedDocument;
