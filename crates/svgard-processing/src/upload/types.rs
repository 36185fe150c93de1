//! Types for the upload and serve paths.

use svgard_core::constants::SVG_MIME_TYPE;

use crate::svg::SanitizedDocument;

/// A document ready to be written to a response.
#[derive(Clone, Debug)]
pub struct ServedDocument {
    /// Always `image/svg+xml`; never derived from the stored filename.
    pub content_type: &'static str,
    pub body: SanitizedDocument,
}

impl ServedDocument {
    pub fn svg(body: SanitizedDocument) -> Self {
        Self {
            content_type: SVG_MIME_TYPE,
            body,
        }
    }
}
