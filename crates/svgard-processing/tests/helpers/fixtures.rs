//! Test fixtures: small SVG documents, benign and hostile.

pub const RECT_100X50: &[u8] = br#"<svg width="100" height="50"><rect/></svg>"#;

pub const INLINE_SCRIPT: &[u8] =
    br#"<svg width="10" height="10"><script>alert(1)</script></svg>"#;

pub const NESTED_SVG: &[u8] =
    br#"<svg width="1" height="1"><svg width="99" height="99"/></svg>"#;

pub const REMOTE_IMAGE: &[u8] = br#"<svg xmlns="http://www.w3.org/2000/svg" xmlns:xlink="http://www.w3.org/1999/xlink" width="20" height="20"><image xlink:href="https://tracker.example/pixel.png" width="1" height="1"/><image href="http://tracker.example/b.png"/><rect fill="url(https://tracker.example/p#x)"/></svg>"#;

pub const EVENT_HANDLERS: &[u8] = br#"<svg width="5" height="5" onload="alert(1)"><a href="javascript:alert(2)"><circle r="2" onmouseover="alert(3)"/></a></svg>"#;

pub const FOREIGN_OBJECT: &[u8] = br#"<svg width="8" height="8"><foreignObject width="8" height="8"><iframe xmlns="http://www.w3.org/1999/xhtml" src="https://evil.example"/></foreignObject></svg>"#;

pub const NOT_XML: &[u8] = b"GIF89a\x01\x00\x01\x00 this is not markup";

pub const TRUNCATED: &[u8] = br#"<svg width="10" height="10"><g><rect/>"#;

/// Well-formed, but sanitizing leaves nothing behind.
pub const SCRIPT_ROOT: &[u8] = b"<script>alert(1)</script>";
