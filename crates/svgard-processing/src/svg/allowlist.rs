//! Element and attribute allow-lists for SVG sanitization.
//!
//! Names are lower-case local names; matching is done on the lower-cased
//! local part of each element or attribute.

pub(crate) const ALLOWED_ELEMENTS: &[&str] = &[
    "a",
    "animate",
    "animatemotion",
    "animatetransform",
    "circle",
    "clippath",
    "defs",
    "desc",
    "ellipse",
    "feblend",
    "fecolormatrix",
    "fecomponenttransfer",
    "fecomposite",
    "feconvolvematrix",
    "fediffuselighting",
    "fedisplacementmap",
    "fedistantlight",
    "fedropshadow",
    "feflood",
    "fefunca",
    "fefuncb",
    "fefuncg",
    "fefuncr",
    "fegaussianblur",
    "feimage",
    "femerge",
    "femergenode",
    "femorphology",
    "feoffset",
    "fepointlight",
    "fespecularlighting",
    "fespotlight",
    "fetile",
    "feturbulence",
    "filter",
    "g",
    "image",
    "line",
    "lineargradient",
    "marker",
    "mask",
    "mpath",
    "path",
    "pattern",
    "polygon",
    "polyline",
    "radialgradient",
    "rect",
    "set",
    "stop",
    "style",
    "svg",
    "switch",
    "symbol",
    "text",
    "textpath",
    "title",
    "tspan",
    "use",
    "view",
];

pub(crate) const ALLOWED_ATTRIBUTES: &[&str] = &[
    "accumulate",
    "additive",
    "alignment-baseline",
    "amplitude",
    "attributename",
    "attributetype",
    "azimuth",
    "basefrequency",
    "baseline-shift",
    "baseprofile",
    "begin",
    "bias",
    "by",
    "calcmode",
    "class",
    "clip",
    "clip-path",
    "clip-rule",
    "clippathunits",
    "color",
    "color-interpolation",
    "color-interpolation-filters",
    "color-rendering",
    "cursor",
    "cx",
    "cy",
    "d",
    "diffuseconstant",
    "direction",
    "display",
    "divisor",
    "dominant-baseline",
    "dur",
    "dx",
    "dy",
    "edgemode",
    "elevation",
    "end",
    "exponent",
    "fill",
    "fill-opacity",
    "fill-rule",
    "filter",
    "filterunits",
    "flood-color",
    "flood-opacity",
    "font-family",
    "font-size",
    "font-size-adjust",
    "font-stretch",
    "font-style",
    "font-variant",
    "font-weight",
    "fr",
    "from",
    "fx",
    "fy",
    "gradienttransform",
    "gradientunits",
    "height",
    "href",
    "id",
    "image-rendering",
    "in",
    "in2",
    "intercept",
    "isolation",
    "k1",
    "k2",
    "k3",
    "k4",
    "kernelmatrix",
    "kernelunitlength",
    "keypoints",
    "keysplines",
    "keytimes",
    "lang",
    "lengthadjust",
    "letter-spacing",
    "lighting-color",
    "limitingconeangle",
    "marker-end",
    "marker-mid",
    "marker-start",
    "markerheight",
    "markerunits",
    "markerwidth",
    "mask",
    "maskcontentunits",
    "maskunits",
    "max",
    "method",
    "min",
    "mix-blend-mode",
    "mode",
    "numoctaves",
    "offset",
    "opacity",
    "operator",
    "order",
    "orient",
    "overflow",
    "paint-order",
    "path",
    "pathlength",
    "patterncontentunits",
    "patterntransform",
    "patternunits",
    "points",
    "pointsatx",
    "pointsaty",
    "pointsatz",
    "preservealpha",
    "preserveaspectratio",
    "primitiveunits",
    "r",
    "radius",
    "refx",
    "refy",
    "repeatcount",
    "repeatdur",
    "restart",
    "result",
    "role",
    "rotate",
    "rx",
    "ry",
    "scale",
    "seed",
    "shape-rendering",
    "slope",
    "spacing",
    "specularconstant",
    "specularexponent",
    "spreadmethod",
    "startoffset",
    "stddeviation",
    "stitchtiles",
    "stop-color",
    "stop-opacity",
    "stroke",
    "stroke-dasharray",
    "stroke-dashoffset",
    "stroke-linecap",
    "stroke-linejoin",
    "stroke-miterlimit",
    "stroke-opacity",
    "stroke-width",
    "style",
    "surfacescale",
    "systemlanguage",
    "tablevalues",
    "targetx",
    "targety",
    "text-anchor",
    "text-decoration",
    "text-rendering",
    "textlength",
    "to",
    "transform",
    "transform-origin",
    "type",
    "unicode-bidi",
    "values",
    "vector-effect",
    "version",
    "viewbox",
    "visibility",
    "width",
    "word-spacing",
    "writing-mode",
    "x",
    "x1",
    "x2",
    "xchannelselector",
    "xmlns",
    "y",
    "y1",
    "y2",
    "ychannelselector",
];

/// Attributes allowed under the `xlink:` prefix.
pub(crate) const ALLOWED_XLINK_ATTRIBUTES: &[&str] =
    &["href", "title", "show", "actuate", "role", "arcrole", "type"];

/// Attributes allowed under the `xml:` prefix.
pub(crate) const ALLOWED_XML_ATTRIBUTES: &[&str] = &["space", "lang"];

/// Namespace prefixes that may be declared with `xmlns:<prefix>`.
pub(crate) const ALLOWED_NAMESPACE_DECLARATIONS: &[&str] = &["svg", "xlink"];

/// Element prefixes that keep an element in the SVG vocabulary.
pub(crate) const ALLOWED_ELEMENT_PREFIXES: &[&str] = &["svg"];

/// Attributes whose value is a link target.
pub(crate) const LINK_ATTRIBUTES: &[&str] = &["href", "src"];

/// Inline data URIs allowed in link attributes.
pub(crate) const SAFE_DATA_URI_PREFIXES: &[&str] = &[
    "data:image/png",
    "data:image/gif",
    "data:image/jpeg",
    "data:image/jpg",
    "data:image/webp",
];

/// Substrings that disqualify any attribute value or stylesheet.
pub(crate) const DANGEROUS_SUBSTRINGS: &[&str] = &[
    "javascript:",
    "vbscript:",
    "data:text/html",
    "expression(",
    "@import",
    "behavior:",
    "-moz-binding",
    "image-set(",
];

pub(crate) fn is_allowed_element(local: &str) -> bool {
    ALLOWED_ELEMENTS.binary_search(&local).is_ok()
}

pub(crate) fn is_allowed_attribute(local: &str) -> bool {
    local.starts_with("aria-")
        || local.starts_with("data-")
        || ALLOWED_ATTRIBUTES.binary_search(&local).is_ok()
}
