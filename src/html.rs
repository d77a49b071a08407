//! Fixed HTML fact tables used by the validation engine
//!
//! Built once as static sets/maps; never recomputed per node.

use crate::ast::Element;
use lazy_static::lazy_static;
use regex::Regex;
use std::collections::{HashMap, HashSet};

lazy_static! {
    /// Elements that cannot have children; dimension bindings are
    /// meaningless on them.
    pub static ref VOID_ELEMENTS: HashSet<&'static str> = [
        "area", "base", "br", "col", "command", "embed", "hr", "img", "input",
        "keygen", "link", "meta", "param", "source", "track", "wbr",
    ]
    .into_iter()
    .collect();

    /// Elements able to receive a label association from `<label>`.
    pub static ref LABELABLE_ELEMENTS: HashSet<&'static str> = [
        "button", "input", "keygen", "meter", "output", "progress", "select",
        "textarea",
    ]
    .into_iter()
    .collect();

    /// Elements never rendered; ARIA attributes on them are inert.
    pub static ref INVISIBLE_ELEMENTS: HashSet<&'static str> =
        ["meta", "html", "script", "style"].into_iter().collect();

    /// Visually distracting legacy elements.
    pub static ref DISTRACTING_ELEMENTS: HashSet<&'static str> =
        ["blink", "marquee"].into_iter().collect();

    pub static ref HEADING_ELEMENTS: HashSet<&'static str> =
        ["h1", "h2", "h3", "h4", "h5", "h6"].into_iter().collect();

    /// Per-tag attribute requirements: at least one of the listed
    /// attributes must be present.
    pub static ref REQUIRED_ATTRIBUTES: HashMap<&'static str, &'static [&'static str]> = [
        ("area", &["alt", "aria-label", "aria-labelledby"] as &[&str]),
        ("html", &["lang"]),
        ("iframe", &["title"]),
        ("img", &["alt"]),
        ("object", &["title", "aria-label", "aria-labelledby"]),
    ]
    .into_iter()
    .collect();

    /// Event-handler modifiers the runtime understands.
    pub static ref VALID_EVENT_MODIFIERS: HashSet<&'static str> = [
        "preventDefault", "stopPropagation", "stopImmediatePropagation", "capture",
        "once", "passive", "nonpassive", "self", "trusted",
    ]
    .into_iter()
    .collect();

    /// Events the host will auto-passivate when safe.
    pub static ref PASSIVE_EVENTS: HashSet<&'static str> =
        ["wheel", "mousewheel", "touchstart", "touchmove"].into_iter().collect();

    pub static ref KEYBOARD_EVENTS: HashSet<&'static str> =
        ["keydown", "keyup", "keypress"].into_iter().collect();

    /// Bindings reflecting media playback state.
    pub static ref MEDIA_BINDINGS: HashSet<&'static str> = [
        "currentTime", "duration", "paused", "buffered", "seekable", "played",
        "volume", "muted", "playbackRate", "seeking", "ended",
    ]
    .into_iter()
    .collect();

    /// Read-only layout dimension bindings.
    pub static ref DIMENSION_BINDING: Regex =
        Regex::new(r"^(?:client|offset)(?:Width|Height)$").unwrap();
}

/// Natively interactive elements. Some tags are only interactive with the
/// right attributes (`<a href>`, `<input>` that is not hidden, media with
/// `controls`).
pub fn is_interactive_element(name: &str, element: &Element) -> bool {
    match name {
        "button" | "details" | "embed" | "iframe" | "label" | "select" | "textarea" => true,
        "a" => element.has_attribute("href"),
        "input" => {
            let ty = element
                .attribute("type")
                .and_then(|a| a.static_value())
                .unwrap_or_default();
            ty != "hidden"
        }
        "audio" | "video" => element.has_attribute("controls"),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{AttributeValue, DirectiveNode, TemplateScope};
    use crate::types::{CompilerOptions, CompilerState};

    fn element_with(name: &str, attrs: &[(&str, &str)]) -> Element {
        let directives = attrs
            .iter()
            .map(|(k, v)| DirectiveNode::attribute(*k, AttributeValue::static_text(*v), 1))
            .collect();
        let mut el = Element::named(name, directives, vec![], 1);
        let mut state = CompilerState::new(CompilerOptions::default());
        crate::partition::partition(&mut el, &TemplateScope::root(), &mut state).unwrap();
        el
    }

    #[test]
    fn test_dimension_binding_pattern() {
        assert!(DIMENSION_BINDING.is_match("clientWidth"));
        assert!(DIMENSION_BINDING.is_match("offsetHeight"));
        assert!(!DIMENSION_BINDING.is_match("scrollWidth"));
        assert!(!DIMENSION_BINDING.is_match("clientwidth"));
    }

    #[test]
    fn test_anchor_interactivity_needs_href() {
        let plain = element_with("a", &[]);
        assert!(!is_interactive_element("a", &plain));

        let linked = element_with("a", &[("href", "/docs")]);
        assert!(is_interactive_element("a", &linked));
    }

    #[test]
    fn test_hidden_input_is_not_interactive() {
        let hidden = element_with("input", &[("type", "hidden")]);
        assert!(!is_interactive_element("input", &hidden));

        let text = element_with("input", &[]);
        assert!(is_interactive_element("input", &text));
    }

    #[test]
    fn test_media_interactivity_needs_controls() {
        let silent = element_with("video", &[]);
        assert!(!is_interactive_element("video", &silent));

        let controls = element_with("video", &[("controls", "")]);
        assert!(is_interactive_element("video", &controls));
    }
}
