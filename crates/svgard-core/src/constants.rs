//! Application-wide constants.

use crate::models::ThumbnailAsset;

/// MIME type sent with every served SVG document.
pub const SVG_MIME_TYPE: &str = "image/svg+xml";

/// Extensions accepted by the SVG handler (lower-case, without leading dot).
pub const SVG_EXTENSIONS: &[&str] = &["svg"];

/// Root element name checked by the structural validator.
pub const SVG_ROOT_TAG: &str = "svg";

/// Storage prefix for sanitized originals.
pub const IMAGES_BUCKET: &str = "images";

/// Default upload ceiling (10 MiB). Bounds the cost of a single parse.
pub const DEFAULT_MAX_SVG_SIZE_BYTES: usize = 10 * 1024 * 1024;

/// Route prefix under which sanitized SVGs are served (`get_svg/<id>`).
pub const SERVE_ROUTE_PREFIX: &str = "get_svg";

/// Static thumbnail used for every SVG; SVG rasterization is not performed.
pub const FALLBACK_SVG_THUMBNAIL: ThumbnailAsset = ThumbnailAsset {
    path: "static/handle_svg/thumb.jpg",
    content_type: "image/jpeg",
};
