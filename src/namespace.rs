//! Namespace resolution
//!
//! The namespace of an element is a pure function of its ancestor chain,
//! its tag name and the global default; a static `xmlns` attribute can
//! still override the result during partitioning.

use crate::ast::AncestorContext;
use crate::types::{CompilerOptions, Namespace};
use lazy_static::lazy_static;
use std::collections::HashSet;

lazy_static! {
    /// Tags that always belong to the vector-graphics namespace.
    static ref SVG_TAGS: HashSet<&'static str> = [
        "altGlyph", "altGlyphDef", "altGlyphItem", "animate", "animateColor",
        "animateMotion", "animateTransform", "circle", "clipPath", "color-profile",
        "cursor", "defs", "desc", "discard", "ellipse", "feBlend", "feColorMatrix",
        "feComponentTransfer", "feComposite", "feConvolveMatrix", "feDiffuseLighting",
        "feDisplacementMap", "feDistantLight", "feDropShadow", "feFlood", "feFuncA",
        "feFuncB", "feFuncG", "feFuncR", "feGaussianBlur", "feImage", "feMerge",
        "feMergeNode", "feMorphology", "feOffset", "fePointLight", "feSpecularLighting",
        "feSpotLight", "feTile", "feTurbulence", "filter", "font", "font-face",
        "font-face-format", "font-face-name", "font-face-src", "font-face-uri",
        "foreignObject", "g", "glyph", "glyphRef", "hatch", "hatchpath", "hkern",
        "image", "line", "linearGradient", "marker", "mask", "mesh", "meshgradient",
        "meshpatch", "meshrow", "metadata", "mpath", "path", "pattern", "polygon",
        "polyline", "radialGradient", "rect", "set", "solidcolor", "stop", "svg",
        "switch", "symbol", "text", "textPath", "tref", "tspan", "unknown", "use",
        "view", "vkern",
    ]
    .into_iter()
    .collect();
}

pub fn is_svg_tag(name: &str) -> bool {
    SVG_TAGS.contains(name)
}

/// Container tag that resets its children to the host namespace.
const FOREIGN_OBJECT: &str = "foreignobject";

/// Resolve the namespace for an element named `name` (when statically
/// known) given the ancestor chain and the global default.
pub fn resolve(ctx: &AncestorContext, name: Option<&str>, options: &CompilerOptions) -> Namespace {
    let Some((parent_name, parent_namespace)) = ctx.nearest_element() else {
        // No ancestor host element: the global default wins, except that a
        // vector-graphics tag speaks for itself.
        if name.map_or(false, is_svg_tag) {
            return Namespace::Svg;
        }
        return options.namespace.unwrap_or(Namespace::Html);
    };

    if parent_namespace != Namespace::Foreign {
        if name.map_or(false, is_svg_tag) {
            return Namespace::Svg;
        }
        if parent_name.map_or(false, |p| p.eq_ignore_ascii_case(FOREIGN_OBJECT)) {
            return Namespace::Html;
        }
    }

    parent_namespace
}
