//! SVG sanitization.
//!
//! Allow-list based: everything not known to be inert is dropped. Remote
//! references are always removed. The output is re-serialized canonically so
//! sanitizing is deterministic and idempotent.

use anyhow::{bail, Context};
use bytes::Bytes;
use quick_xml::escape::unescape;
use quick_xml::events::attributes::Attribute;
use quick_xml::events::{BytesStart, Event};
use quick_xml::{Reader, Writer};

use super::allowlist::{
    is_allowed_attribute, is_allowed_element, ALLOWED_ELEMENT_PREFIXES,
    ALLOWED_NAMESPACE_DECLARATIONS, ALLOWED_XLINK_ATTRIBUTES, ALLOWED_XML_ATTRIBUTES,
    DANGEROUS_SUBSTRINGS, LINK_ATTRIBUTES, SAFE_DATA_URI_PREFIXES,
};
use super::xml::{
    contains_cdata_end, decode_utf8, is_builtin_reference, local_lower,
    resolve_builtin_reference, strict_reader,
};

const SVG_NAMESPACE: &str = "http://www.w3.org/2000/svg";
const XLINK_NAMESPACE: &str = "http://www.w3.org/1999/xlink";

/// Sanitized SVG bytes. Cheap to clone.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SanitizedDocument(Bytes);

impl SanitizedDocument {
    /// The minimal safe document, produced when the input cannot be parsed.
    pub fn empty() -> Self {
        Self(Bytes::new())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn as_str(&self) -> Option<&str> {
        std::str::from_utf8(&self.0).ok()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_bytes(self) -> Bytes {
        self.0
    }
}

impl AsRef<[u8]> for SanitizedDocument {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// Strip scripts, event handlers, foreign content and remote references from `bytes`.
///
/// Never fails: input that cannot be parsed yields [`SanitizedDocument::empty`].
pub fn sanitize(bytes: &[u8]) -> SanitizedDocument {
    match try_sanitize(bytes) {
        Ok(out) => SanitizedDocument(Bytes::from(out)),
        Err(e) => {
            tracing::warn!(
                error = %e,
                size_bytes = bytes.len(),
                "SVG could not be parsed, returning empty document"
            );
            SanitizedDocument::empty()
        }
    }
}

fn try_sanitize(bytes: &[u8]) -> anyhow::Result<Vec<u8>> {
    let text = decode_utf8(bytes).context("input is not UTF-8")?;
    let mut reader = strict_reader(text);
    let mut writer = Writer::new(Vec::with_capacity(bytes.len()));

    // `open` counts emitted elements; `skip` counts elements inside a dropped subtree.
    let mut open: usize = 0;
    let mut skip: usize = 0;

    loop {
        let event = reader.read_event()?;

        if skip > 0 {
            match event {
                Event::Start(_) => skip += 1,
                Event::End(_) => skip -= 1,
                Event::Text(t) if contains_cdata_end(&t) => bail!("']]>' in character data"),
                Event::Eof => bail!("unexpected end of document"),
                _ => {}
            }
            continue;
        }

        match event {
            Event::Start(e) => match clean_element(&e)? {
                None => skip = 1,
                Some(clean) if local_lower(e.local_name().as_ref()) == "style" => {
                    if let Some(body) = read_stylesheet(&mut reader)? {
                        writer.write_event(Event::Start(clean))?;
                        for event in body {
                            writer.write_event(event)?;
                        }
                    }
                }
                Some(clean) => {
                    open += 1;
                    writer.write_event(Event::Start(clean))?;
                }
            },
            Event::Empty(e) => {
                if let Some(clean) = clean_element(&e)? {
                    writer.write_event(Event::Empty(clean))?;
                }
            }
            Event::End(e) => {
                open = open.checked_sub(1).context("unmatched end tag")?;
                writer.write_event(Event::End(e))?;
            }
            Event::Text(t) => {
                if contains_cdata_end(&t) {
                    bail!("']]>' in character data");
                }
                writer.write_event(Event::Text(t))?
            }
            Event::CData(c) => writer.write_event(Event::CData(c))?,
            Event::GeneralRef(r) => {
                if is_builtin_reference(&r) {
                    writer.write_event(Event::GeneralRef(r))?;
                }
            }
            Event::Comment(_) | Event::Decl(_) | Event::PI(_) | Event::DocType(_) => {}
            Event::Eof => break,
        }
    }

    if open != 0 {
        bail!("unexpected end of document: unclosed element");
    }
    Ok(writer.into_inner())
}

/// Rebuild an allowed element with only its safe attributes; `None` drops the subtree.
fn clean_element(element: &BytesStart<'_>) -> anyhow::Result<Option<BytesStart<'static>>> {
    let name = element.name();
    if let Some(prefix) = name.prefix() {
        if !ALLOWED_ELEMENT_PREFIXES.contains(&local_lower(prefix.as_ref()).as_str()) {
            return Ok(None);
        }
    }
    if !is_allowed_element(&local_lower(name.local_name().as_ref())) {
        return Ok(None);
    }

    let attributes = element
        .attributes()
        .collect::<Result<Vec<_>, _>>()?;
    if attributes.iter().any(animates_link_or_handler) {
        return Ok(None);
    }

    let qname = std::str::from_utf8(name.as_ref())?.to_string();
    let mut clean = BytesStart::new(qname);
    for attr in &attributes {
        if let Some((key, value)) = clean_attribute(attr)? {
            clean.push_attribute((key, value.as_str()));
        }
    }
    Ok(Some(clean))
}

/// Returns the attribute key and its unescaped value when it is safe to keep.
fn clean_attribute<'a>(attr: &'a Attribute<'_>) -> anyhow::Result<Option<(&'a str, String)>> {
    let key = std::str::from_utf8(attr.key.as_ref())?;
    let local = local_lower(attr.key.local_name().as_ref());

    let allowed = match attr.key.prefix() {
        None => is_allowed_attribute(&local),
        Some(prefix) => match local_lower(prefix.as_ref()).as_str() {
            "xlink" => ALLOWED_XLINK_ATTRIBUTES.contains(&local.as_str()),
            "xml" => ALLOWED_XML_ATTRIBUTES.contains(&local.as_str()),
            "xmlns" => ALLOWED_NAMESPACE_DECLARATIONS.contains(&local.as_str()),
            _ => false,
        },
    };
    if !allowed {
        return Ok(None);
    }

    let raw = std::str::from_utf8(&attr.value)?;
    let Ok(value) = unescape(raw) else {
        return Ok(None);
    };
    let normalized = normalize(&value);

    if is_namespace_declaration(attr) {
        let expected = if local == "xlink" {
            XLINK_NAMESPACE
        } else {
            SVG_NAMESPACE
        };
        return Ok((value.trim() == expected).then(|| (key, value.into_owned())));
    }

    if DANGEROUS_SUBSTRINGS.iter().any(|s| normalized.contains(s)) || has_remote_url(&normalized) {
        return Ok(None);
    }
    if LINK_ATTRIBUTES.contains(&local.as_str()) && !is_local_reference(&normalized) {
        return Ok(None);
    }
    if local == "style" && normalized.contains('\\') {
        return Ok(None);
    }
    Ok(Some((key, value.into_owned())))
}

/// Animation targeting a link or an event handler, e.g. `<set attributeName="href">`.
fn animates_link_or_handler(attr: &Attribute<'_>) -> bool {
    if local_lower(attr.key.local_name().as_ref()) != "attributename" {
        return false;
    }
    let raw = String::from_utf8_lossy(&attr.value);
    let target = match unescape(&raw) {
        Ok(value) => normalize(&value),
        Err(_) => normalize(&raw),
    };
    target.ends_with("href") || target.starts_with("on")
}

fn is_namespace_declaration(attr: &Attribute<'_>) -> bool {
    match attr.key.prefix() {
        Some(prefix) => prefix.as_ref() == b"xmlns",
        None => attr.key.as_ref() == b"xmlns",
    }
}

/// Collect the body of a `<style>` element up to and including its end tag.
/// Returns `None` when the stylesheet must be dropped.
fn read_stylesheet<'i>(reader: &mut Reader<&'i [u8]>) -> anyhow::Result<Option<Vec<Event<'i>>>> {
    let mut body = Vec::new();
    let mut css = String::new();
    let mut nested: usize = 0;
    let mut safe = true;

    loop {
        let event = reader.read_event()?;
        let mut closed = false;
        match &event {
            Event::Start(_) => {
                nested += 1;
                safe = false;
            }
            Event::Empty(_) => safe = false,
            Event::End(_) if nested > 0 => nested -= 1,
            Event::End(_) => closed = true,
            Event::Text(t) if contains_cdata_end(t) => bail!("']]>' in <style> text"),
            Event::Text(t) => css.push_str(&String::from_utf8_lossy(t)),
            Event::CData(c) => css.push_str(&String::from_utf8_lossy(c)),
            Event::GeneralRef(r) => match resolve_builtin_reference(r) {
                Some(ch) => css.push(ch),
                None => safe = false,
            },
            Event::Eof => bail!("unexpected end of document inside <style>"),
            _ => {}
        }
        if closed {
            body.push(event);
            break;
        }
        if nested == 0 && matches!(event, Event::Text(_) | Event::CData(_) | Event::GeneralRef(_))
        {
            body.push(event);
        }
    }

    let normalized = normalize(&css);
    if DANGEROUS_SUBSTRINGS.iter().any(|s| normalized.contains(s))
        || has_remote_url(&normalized)
        || normalized.contains('\\')
    {
        safe = false;
    }

    Ok(safe.then_some(body))
}

/// Lower-case with whitespace and control characters removed, so `java\tscript:`
/// and `JavaScript:` compare equal.
fn normalize(value: &str) -> String {
    value
        .chars()
        .filter(|c| !c.is_whitespace() && !c.is_control())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Whether a normalized value contains a `url(...)` pointing outside the document.
fn has_remote_url(normalized: &str) -> bool {
    normalized.match_indices("url(").any(|(i, m)| {
        let target = &normalized[i + m.len()..];
        let target = target.trim_start_matches(['"', '\'']);
        !target.starts_with('#')
    })
}

/// In-document fragment or inline raster image.
fn is_local_reference(normalized: &str) -> bool {
    normalized.starts_with('#')
        || SAFE_DATA_URI_PREFIXES.iter().any(|prefix| {
            normalized.starts_with(prefix)
                && matches!(normalized.as_bytes().get(prefix.len()), Some(b';') | Some(b','))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clean(input: &str) -> String {
        sanitize(input.as_bytes())
            .as_str()
            .expect("utf-8 output")
            .to_string()
    }

    #[test]
    fn keeps_plain_markup_byte_for_byte() {
        let input = r#"<svg width="100" height="50"><rect/></svg>"#;
        assert_eq!(clean(input), input);
    }

    #[test]
    fn removes_script_elements_and_their_content() {
        let out = clean(r#"<svg width="10" height="10"><script>alert(1)</script><g/></svg>"#);
        assert_eq!(out, r#"<svg width="10" height="10"><g/></svg>"#);
    }

    #[test]
    fn removes_script_regardless_of_case_or_prefix() {
        let out = clean(
            r#"<svg xmlns:h="http://www.w3.org/1999/xhtml"><SCRIPT>a()</SCRIPT><h:script>b()</h:script></svg>"#,
        );
        assert!(!out.to_lowercase().contains("script"));
        assert!(!out.contains("xhtml"));
    }

    #[test]
    fn removes_event_handlers() {
        let out = clean(r#"<svg onload="alert(1)"><rect onClick="x()" fill="red"/></svg>"#);
        assert_eq!(out, r#"<svg><rect fill="red"/></svg>"#);
    }

    #[test]
    fn removes_foreign_object() {
        let out = clean(
            r#"<svg><foreignObject><body xmlns="http://www.w3.org/1999/xhtml"><img src="x"/></body></foreignObject><circle r="1"/></svg>"#,
        );
        assert_eq!(out, r#"<svg><circle r="1"/></svg>"#);
    }

    #[test]
    fn removes_javascript_urls_even_when_obfuscated() {
        let out = clean(
            "<svg><a href=\"java&#x09;script:alert(1)\"><text>x</text></a><a xlink:href=\" JavaScript:alert(1)\"/></svg>",
        );
        assert!(!out.to_lowercase().contains("javascript"));
        assert!(out.contains("<text>x</text>"));
    }

    #[test]
    fn removes_remote_references() {
        let out = clean(
            r#"<svg><image href="https://evil.example/x.png"/><use xlink:href="//evil.example/s.svg#a"/><rect fill="url(http://evil.example/p.svg#g)"/></svg>"#,
        );
        assert!(!out.contains("evil.example"));
        assert_eq!(out, "<svg><image/><use/><rect/></svg>");
    }

    #[test]
    fn keeps_local_references_and_inline_images() {
        let input = r##"<svg><use href="#a"/><rect fill="url(#grad)"/><image href="data:image/png;base64,AAAA"/></svg>"##;
        assert_eq!(clean(input), input);
    }

    #[test]
    fn rejects_inline_svg_and_html_data_uris() {
        let out = clean(
            r#"<svg><image href="data:image/svg+xml;base64,PHN2Zz4="/><image href="data:text/html,hi"/></svg>"#,
        );
        assert_eq!(out, "<svg><image/><image/></svg>");
    }

    #[test]
    fn drops_dangerous_stylesheets() {
        let out = clean(
            r#"<svg><style>@import url(https://evil.example/a.css);</style><rect/></svg>"#,
        );
        assert_eq!(out, "<svg><rect/></svg>");
    }

    #[test]
    fn keeps_benign_stylesheets() {
        let input = "<svg><style>rect { fill: red; }</style><rect/></svg>";
        assert_eq!(clean(input), input);
    }

    #[test]
    fn drops_style_attributes_with_remote_urls() {
        let out = clean(
            r#"<svg><rect style="fill: url('https://evil.example/x')" width="1"/></svg>"#,
        );
        assert_eq!(out, r#"<svg><rect width="1"/></svg>"#);
    }

    #[test]
    fn drops_image_set_fetches() {
        assert_eq!(
            clean(r#"<svg style="background-image:image-set('https://evil.example/x.png' 1x)"><rect/></svg>"#),
            "<svg><rect/></svg>"
        );
        assert_eq!(
            clean(r#"<svg><rect style="background:-webkit-image-set('//evil.example/x.png' 1x)"/></svg>"#),
            "<svg><rect/></svg>"
        );
        assert_eq!(
            clean(r#"<svg><style>svg{background:image-set("https://evil.example/y.png" 1x)}</style><rect/></svg>"#),
            "<svg><rect/></svg>"
        );
    }

    #[test]
    fn cdata_terminator_in_text_yields_empty_document() {
        assert!(sanitize(b"<svg>]]></svg>").is_empty());
        assert!(sanitize(b"<svg><style>a{}]]></style></svg>").is_empty());
        assert!(sanitize(b"<svg><script>]]></script></svg>").is_empty());
    }

    #[test]
    fn drops_comments_declarations_and_processing_instructions() {
        let out = clean(
            "<?xml version=\"1.0\"?><?xml-stylesheet href=\"https://evil.example/s.css\"?><!-- c --><svg/>",
        );
        assert_eq!(out, "<svg/>");
    }

    #[test]
    fn neutralises_animated_href() {
        let out = clean(
            r#"<svg><a><set attributeName="href" to="https://evil.example"/><animate attributeName="&#111;nclick" to="x()"/><animate attributeName="fill" values="red;blue"/></a></svg>"#,
        );
        assert_eq!(out, r#"<svg><a><animate attributeName="fill" values="red;blue"/></a></svg>"#);
    }

    #[test]
    fn rejects_foreign_default_namespace() {
        let out = clean(r#"<svg xmlns="http://www.w3.org/1999/xhtml"><rect/></svg>"#);
        assert_eq!(out, "<svg><rect/></svg>");
        let input = r#"<svg xmlns="http://www.w3.org/2000/svg" xmlns:xlink="http://www.w3.org/1999/xlink"/>"#;
        assert_eq!(clean(input), input);
    }

    #[test]
    fn preserves_text_entities() {
        let input = "<svg><text>a &amp; b &lt; c</text></svg>";
        assert_eq!(clean(input), input);
    }

    #[test]
    fn re_escapes_attribute_values_canonically() {
        let out = clean(r#"<svg><text font-family='"Open Sans"'>x</text></svg>"#);
        assert_eq!(out, r#"<svg><text font-family="&quot;Open Sans&quot;">x</text></svg>"#);
        assert_eq!(clean(&out), out);
    }

    #[test]
    fn malformed_input_yields_empty_document() {
        assert!(sanitize(b"<svg><g></svg>").is_empty());
        assert!(sanitize(b"<svg>").is_empty());
        assert!(sanitize(&[0xff, 0xfe, 0x00]).is_empty());
        assert!(sanitize(b"").is_empty());
    }

    #[test]
    fn sanitizing_is_idempotent_and_deterministic() {
        let inputs = [
            r#"<svg width="1" onload="x()"><script>y()</script><g style="fill:red"><path d="M0 0L1 1"/></g></svg>"#,
            "<?xml version=\"1.0\"?>\n<svg>\n  <text x='1'>&lt;hi&gt;</text>\n</svg>\n",
            r#"<svg><foreignObject><div/></foreignObject><style>a{}</style></svg>"#,
        ];
        for input in inputs {
            let once = sanitize(input.as_bytes());
            let twice = sanitize(once.as_bytes());
            assert_eq!(once, twice, "not idempotent for {}", input);
            assert_eq!(once, sanitize(input.as_bytes()), "not deterministic for {}", input);
        }
    }
}
