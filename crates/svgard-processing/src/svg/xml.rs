//! Small helpers shared by the validator and the sanitizer.

use quick_xml::escape::{resolve_predefined_entity, unescape_with};
use quick_xml::events::BytesRef;
use quick_xml::Reader;

const UTF8_BOM: &str = "\u{feff}";

/// Entities every XML parser knows without a DTD.
const PREDEFINED_ENTITIES: &[&[u8]] = &[b"lt", b"gt", b"amp", b"apos", b"quot"];

/// Decode `bytes` as UTF-8, dropping a leading byte-order mark.
pub(crate) fn decode_utf8(bytes: &[u8]) -> Result<&str, std::str::Utf8Error> {
    let text = std::str::from_utf8(bytes)?;
    Ok(text.strip_prefix(UTF8_BOM).unwrap_or(text))
}

/// Reader configured for strict well-formedness checks.
pub(crate) fn strict_reader(text: &str) -> Reader<&[u8]> {
    let mut reader = Reader::from_str(text);
    let config = reader.config_mut();
    config.check_end_names = true;
    config.check_comments = true;
    config.expand_empty_elements = false;
    config.trim_text(false);
    reader
}

/// Lower-cased local part of a (possibly prefixed) name.
pub(crate) fn local_lower(local: &[u8]) -> String {
    String::from_utf8_lossy(local).to_ascii_lowercase()
}

/// Whether a `&name;` reference can be resolved without a DTD.
pub(crate) fn is_builtin_reference(reference: &BytesRef<'_>) -> bool {
    if reference.is_char_ref() {
        return matches!(reference.resolve_char_ref(), Ok(Some(_)));
    }
    let name: &[u8] = reference;
    PREDEFINED_ENTITIES.contains(&name)
}

/// Resolve a built-in reference to its character.
pub(crate) fn resolve_builtin_reference(reference: &BytesRef<'_>) -> Option<char> {
    if reference.is_char_ref() {
        return reference.resolve_char_ref().ok().flatten();
    }
    let name: &[u8] = reference;
    match name {
        b"lt" => Some('<'),
        b"gt" => Some('>'),
        b"amp" => Some('&'),
        b"apos" => Some('\''),
        b"quot" => Some('"'),
        _ => None,
    }
}

/// Names of the general entities declared in a DOCTYPE internal subset.
/// Parameter entities (`<!ENTITY % name ...>`) are skipped.
pub(crate) fn declared_entities(doctype: &[u8]) -> Vec<String> {
    let text = String::from_utf8_lossy(doctype);
    text.match_indices("<!ENTITY")
        .filter_map(|(i, m)| {
            let rest = text[i + m.len()..].trim_start();
            if rest.starts_with('%') {
                return None;
            }
            let name: String = rest
                .chars()
                .take_while(|c| !c.is_whitespace() && *c != '>')
                .collect();
            (!name.is_empty()).then_some(name)
        })
        .collect()
}

/// Check a raw attribute value: no literal `<`, and every reference is a
/// character reference, a predefined entity or one of `entities`.
pub(crate) fn check_attribute_value(raw: &[u8], entities: &[String]) -> Result<(), String> {
    let raw = std::str::from_utf8(raw).map_err(|e| format!("invalid UTF-8 in attribute: {}", e))?;
    if raw.contains('<') {
        return Err("'<' in attribute value".to_string());
    }
    unescape_with(raw, |name| {
        resolve_predefined_entity(name).or_else(|| entities.iter().any(|e| e == name).then_some(""))
    })
    .map(|_| ())
    .map_err(|e| format!("bad reference in attribute value: {}", e))
}

/// Whether character data contains the `]]>` sequence, which XML forbids
/// outside a CDATA section.
pub(crate) fn contains_cdata_end(text: &[u8]) -> bool {
    text.windows(3).any(|w| w == b"]]>")
}
