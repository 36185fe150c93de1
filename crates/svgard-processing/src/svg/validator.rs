//! XML structural validation and root dimension extraction.
//!
//! Well-formedness is the only failure condition here; whether the markup is
//! safe is the sanitizer's concern.

use quick_xml::events::{BytesStart, Event};
use serde::Serialize;

use super::xml::{
    check_attribute_value, contains_cdata_end, declared_entities, decode_utf8,
    is_builtin_reference, local_lower, strict_reader,
};
use svgard_core::constants::SVG_ROOT_TAG;
use svgard_core::parse::leading_integer;

/// Intrinsic size declared on the root `<svg>` element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct SvgMetadata {
    pub width: u32,
    pub height: u32,
    pub valid: bool,
}

/// The input is not a well-formed XML document.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid document: {reason}")]
pub struct InvalidDocument {
    pub reason: String,
    pub position: Option<u64>,
}

impl InvalidDocument {
    fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
            position: None,
        }
    }

    fn at(reason: impl Into<String>, position: u64) -> Self {
        Self {
            reason: reason.into(),
            position: Some(position),
        }
    }
}

/// Per-call parse state; never shared between validations.
#[derive(Default)]
struct ParseState {
    depth: usize,
    roots: usize,
    entities: Vec<String>,
    dimensions: Option<(u32, u32)>,
}

impl ParseState {
    fn open(&mut self, element: &BytesStart<'_>) -> Result<(), String> {
        // Duplicate or malformed attributes make the document ill-formed.
        for attr in element.attributes() {
            let attr = attr.map_err(|e| format!("malformed attribute: {}", e))?;
            check_attribute_value(&attr.value, &self.entities)?;
        }

        if self.depth == 0 {
            self.roots += 1;
            if self.roots > 1 {
                return Err("more than one root element".to_string());
            }
            if self.dimensions.is_none()
                && local_lower(element.local_name().as_ref()) == SVG_ROOT_TAG
            {
                self.dimensions = Some(root_dimensions(element));
            }
        }
        self.depth += 1;
        Ok(())
    }

    fn declares(&self, name: &[u8]) -> bool {
        self.entities.iter().any(|e| e.as_bytes() == name)
    }

    fn close(&mut self) -> Result<(), String> {
        self.depth = self
            .depth
            .checked_sub(1)
            .ok_or_else(|| "unmatched end tag".to_string())?;
        Ok(())
    }
}

/// Validate `bytes` as a well-formed XML document and read the root's declared size.
///
/// Only the outermost element is inspected; nested `<svg>` elements never
/// override its dimensions. A well-formed document whose root is not `<svg>`
/// is still valid, with a size of 0x0.
pub fn validate(bytes: &[u8]) -> Result<SvgMetadata, InvalidDocument> {
    let text =
        decode_utf8(bytes).map_err(|e| InvalidDocument::new(format!("invalid UTF-8: {}", e)))?;
    if text.trim().is_empty() {
        return Err(InvalidDocument::new("empty document"));
    }

    let mut reader = strict_reader(text);
    let mut state = ParseState::default();

    loop {
        let position = reader.buffer_position() as u64;
        let event = reader
            .read_event()
            .map_err(|e| InvalidDocument::at(e.to_string(), reader.error_position() as u64))?;

        let outcome = match event {
            Event::Start(e) => state.open(&e),
            Event::Empty(e) => state.open(&e).and_then(|_| state.close()),
            Event::End(_) => state.close(),
            Event::Text(t) if contains_cdata_end(&t) => {
                Err("']]>' in character data".to_string())
            }
            Event::Text(t) if state.depth == 0 => {
                if t.iter().all(u8::is_ascii_whitespace) {
                    Ok(())
                } else {
                    Err("text outside the root element".to_string())
                }
            }
            Event::CData(_) if state.depth == 0 => {
                Err("character data outside the root element".to_string())
            }
            Event::GeneralRef(r) => {
                if state.depth == 0 {
                    Err("entity reference outside the root element".to_string())
                } else if is_builtin_reference(&r) || state.declares(&r) {
                    Ok(())
                } else {
                    Err(format!(
                        "undefined entity &{};",
                        String::from_utf8_lossy(&r)
                    ))
                }
            }
            Event::DocType(d) => {
                if state.roots > 0 {
                    Err("DOCTYPE after the root element".to_string())
                } else {
                    state.entities = declared_entities(&d);
                    Ok(())
                }
            }
            Event::Eof => break,
            _ => Ok(()),
        };

        outcome.map_err(|reason| InvalidDocument::at(reason, position))?;
    }

    if state.depth != 0 {
        return Err(InvalidDocument::new("unexpected end of document: unclosed element"));
    }
    if state.roots == 0 {
        return Err(InvalidDocument::new("no root element"));
    }

    let (width, height) = state.dimensions.unwrap_or((0, 0));
    Ok(SvgMetadata {
        width,
        height,
        valid: true,
    })
}

fn root_dimensions(element: &BytesStart<'_>) -> (u32, u32) {
    let mut width = 0;
    let mut height = 0;
    for attr in element.attributes().flatten() {
        let value = String::from_utf8_lossy(&attr.value);
        match local_lower(attr.key.local_name().as_ref()).as_str() {
            "width" => width = coerce_dimension(&value),
            "height" => height = coerce_dimension(&value),
            _ => {}
        }
    }
    (width, height)
}

/// Integer coercion for declared sizes: the leading integer, clamped to `u32`.
pub fn coerce_dimension(value: &str) -> u32 {
    u32::try_from(leading_integer(value)).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dims(doc: &str) -> (u32, u32) {
        let meta = validate(doc.as_bytes()).unwrap();
        assert!(meta.valid);
        (meta.width, meta.height)
    }

    #[test]
    fn reads_root_dimensions() {
        assert_eq!(dims(r#"<svg width="100" height="50"><rect/></svg>"#), (100, 50));
    }

    #[test]
    fn matching_is_case_insensitive() {
        assert_eq!(dims(r#"<SVG WIDTH="7" Height="8"></SVG>"#), (7, 8));
    }

    #[test]
    fn nested_svg_does_not_override_root() {
        assert_eq!(
            dims(r#"<svg width="1" height="1"><svg width="99" height="99"/></svg>"#),
            (1, 1)
        );
    }

    #[test]
    fn prefixed_root_is_recognised() {
        assert_eq!(
            dims(r#"<s:svg xmlns:s="http://www.w3.org/2000/svg" width="3" height="4"/>"#),
            (3, 4)
        );
    }

    #[test]
    fn missing_or_non_numeric_sizes_are_zero() {
        assert_eq!(dims(r#"<svg viewBox="0 0 10 10"/>"#), (0, 0));
        assert_eq!(dims(r#"<svg width="auto" height="-5"/>"#), (0, 0));
    }

    #[test]
    fn non_svg_root_is_valid_with_zero_size() {
        assert_eq!(dims(r#"<html width="5" height="5"/>"#), (0, 0));
    }

    #[test]
    fn declaration_comments_and_whitespace_are_fine() {
        let doc = "<?xml version=\"1.0\"?>\n<!-- hi -->\n<svg width=\"2\" height=\"3\">a &amp; b &#65;</svg>\n";
        assert_eq!(dims(doc), (2, 3));
    }

    #[test]
    fn coercion_follows_integer_prefix() {
        assert_eq!(coerce_dimension("100px"), 100);
        assert_eq!(coerce_dimension("12.7"), 12);
        assert_eq!(coerce_dimension("50%"), 50);
        assert_eq!(coerce_dimension("  +8"), 8);
        assert_eq!(coerce_dimension("-3"), 0);
        assert_eq!(coerce_dimension(""), 0);
        assert_eq!(coerce_dimension("99999999999999"), u32::MAX);
    }

    #[test]
    fn rejects_malformed_documents() {
        let cases: &[&[u8]] = &[
            b"",
            b"   \n",
            b"not xml at all",
            b"<svg>",
            b"<svg></g>",
            b"<svg><rect></svg>",
            b"<svg/><svg/>",
            b"</svg>",
            b"<svg a=\"1\" a=\"2\"/>",
            b"<svg>&nbsp;</svg>",
            b"<svg/>trailing",
            b"<svg a=\"x<y\"/>",
            b"<svg a=\"a & b\"/>",
            b"<svg a=\"&foo;\"/>",
            b"<svg>]]></svg>",
            b"<!DOCTYPE svg [<!ENTITY logo \"ACME\">]><svg>&other;</svg>",
            &[0x3c, 0x73, 0x76, 0x67, 0xff, 0x2f, 0x3e],
        ];
        for case in cases {
            assert!(
                validate(case).is_err(),
                "expected rejection of {:?}",
                String::from_utf8_lossy(case)
            );
        }
    }

    #[test]
    fn declared_entities_are_accepted() {
        let doc = r#"<!DOCTYPE svg [<!ENTITY logo "ACME">]><svg width="4" height="2" title="&logo;">&logo;</svg>"#;
        assert_eq!(dims(doc), (4, 2));
    }

    #[test]
    fn escaped_attribute_values_are_fine() {
        assert_eq!(dims(r#"<svg width="1" height="1" title="a &amp; b &lt;c&gt; &#x41;"/>"#), (1, 1));
    }

    #[test]
    fn error_carries_reason() {
        let err = validate(b"<svg><g></svg>").unwrap_err();
        assert!(!err.reason.is_empty());
        assert!(err.to_string().starts_with("Invalid document"));
    }
}
