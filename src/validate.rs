//! Validation engine
//!
//! Five rule groups run once per element after partitioning: generic
//! attribute legality, accessibility/ARIA, tag-specific structure,
//! binding legality per tag, and event-modifier legality. Children-
//! dependent checks run in a second pass after the child subtree exists.
//!
//! Errors abort compilation of the violating construct; warnings
//! accumulate on the state and never alter structure, except that
//! auto-passivable touch/wheel handlers receive the `passive` modifier.

use crate::aria::{
    fuzzy_suggest, ABSTRACT_ROLES, ARIA_ATTRIBUTES, ARIA_ROLES, IMPLICIT_ROLES,
    INTERACTIVE_ROLES, NESTED_IMPLICIT_ROLES, NON_INTERACTIVE_ROLES, PRESENTATION_ROLES,
    REQUIRED_ROLE_PROPS,
};
use crate::ast::{AncestorContext, Element, Node};
use crate::directives::{Attribute, Binding};
use crate::error::{CompileError, Result};
use crate::html::{
    is_interactive_element, DIMENSION_BINDING, DISTRACTING_ELEMENTS, HEADING_ELEMENTS,
    INVISIBLE_ELEMENTS, KEYBOARD_EVENTS, LABELABLE_ELEMENTS, MEDIA_BINDINGS, PASSIVE_EVENTS,
    REQUIRED_ATTRIBUTES, VALID_EVENT_MODIFIERS, VOID_ELEMENTS,
};
use crate::types::{CompilerState, Namespace};
use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashSet;

lazy_static! {
    static ref ILLEGAL_ATTRIBUTE_CHARS: Regex = Regex::new(r#"[\s'">/=\u{FDD0}-\u{FDEF}]"#).unwrap();

    /// Attribute spellings carried over from other ecosystems.
    static ref ATTRIBUTE_ALIASES: std::collections::HashMap<&'static str, &'static str> =
        [("classname", "class"), ("htmlfor", "for")].into_iter().collect();

    static ref KNOWN_BINDINGS: HashSet<&'static str> = [
        "this", "value", "checked", "indeterminate", "group", "files", "open",
        "textContent", "innerHTML", "currentTime", "duration", "paused",
        "buffered", "seekable", "played", "volume", "muted", "playbackRate",
        "seeking", "ended", "videoWidth", "videoHeight", "clientWidth",
        "clientHeight", "offsetWidth", "offsetHeight",
    ]
    .into_iter()
    .collect();
}

/// First validation pass, run immediately after partitioning.
pub fn validate(
    element: &mut Element,
    ctx: &AncestorContext,
    state: &mut CompilerState,
) -> Result<()> {
    validate_attributes(element, ctx, state)?;
    validate_element_a11y(element, ctx, state);
    validate_structure(element, ctx, state);
    validate_bindings(element)?;
    validate_event_handlers(element, state)?;
    Ok(())
}

/// Second pass, run after the child subtree has been constructed.
/// Only per-node diagnostic correctness matters; ordering between
/// diagnostics on different nodes is not load-bearing.
pub fn validate_with_children(element: &Element, state: &mut CompilerState) {
    if element.namespace == Namespace::Foreign {
        return;
    }
    let Some(name) = element.name().map(str::to_ascii_lowercase) else {
        return;
    };

    match name.as_str() {
        "label" => validate_label_control(element, state),
        "video" => validate_media_captions(element, state),
        "figure" => validate_figure_order(element, state),
        _ => {}
    }
}

// Group 1: generic attribute legality

fn validate_attributes(
    element: &Element,
    ctx: &AncestorContext,
    state: &mut CompilerState,
) -> Result<()> {
    let foreign = element.namespace == Namespace::Foreign;
    let tag = element.name().map(str::to_ascii_lowercase);

    for attribute in &element.attributes {
        let name = attribute.name.as_str();

        if ILLEGAL_ATTRIBUTE_CHARS.is_match(name) {
            return Err(CompileError::attribute(
                attribute.line,
                format!("'{}' is not a valid attribute name", name),
            ));
        }

        if name.eq_ignore_ascii_case("slot") && !attribute.synthetic {
            validate_slot_attribute(attribute, ctx, state)?;
        }

        if foreign {
            continue;
        }

        if let Some(canonical) = ATTRIBUTE_ALIASES.get(name.to_ascii_lowercase().as_str()) {
            state.warn(
                attribute.line,
                "invalid-attribute",
                format!("'{}' is not a valid attribute name; did you mean '{}'?", name, canonical),
            );
        }

        if name.eq_ignore_ascii_case("is") {
            state.warn(
                attribute.line,
                "avoid-is",
                "the 'is' attribute is not supported cross-browser and should be avoided",
            );
        }

        validate_attribute_a11y(element, tag.as_deref(), attribute, ctx, state);
    }

    Ok(())
}

fn validate_slot_attribute(
    attribute: &Attribute,
    ctx: &AncestorContext,
    state: &mut CompilerState,
) -> Result<()> {
    let Some(value) = attribute.static_value() else {
        return Err(CompileError::slot(
            attribute.line,
            "slot attribute cannot have a dynamic value",
        ));
    };

    if !ctx.allows_slot() {
        return Err(CompileError::slot(
            attribute.line,
            "an element with a slot attribute must be a child of a component \
             or a descendant of a custom element",
        ));
    }

    if !state.slot_names.insert(value.clone()) {
        return Err(CompileError::slot(
            attribute.line,
            format!("duplicate slot name '{}'", value),
        ));
    }

    Ok(())
}

// Group 2: accessibility / ARIA

fn validate_attribute_a11y(
    element: &Element,
    tag: Option<&str>,
    attribute: &Attribute,
    ctx: &AncestorContext,
    state: &mut CompilerState,
) {
    let name = attribute.name.to_ascii_lowercase();

    if name.starts_with("aria-") {
        if let Some(tag) = tag {
            if INVISIBLE_ELEMENTS.contains(tag) {
                state.warn(
                    attribute.line,
                    "a11y-aria-attributes",
                    format!("<{}> should not have aria-* attributes", tag),
                );
            }
        }

        match ARIA_ATTRIBUTES.get(name.as_str()) {
            None => {
                let mut message = format!("'{}' is not a valid ARIA attribute", name);
                let candidates = ARIA_ATTRIBUTES.keys().copied().collect();
                if let Some(suggestion) = fuzzy_suggest(&name, &candidates) {
                    message.push_str(&format!("; did you mean '{}'?", suggestion));
                }
                state.warn(attribute.line, "a11y-unknown-aria-attribute", message);
            }
            Some(ty) => {
                if let Some(value) = attribute.static_value() {
                    if !ty.accepts(&value) {
                        state.warn(
                            attribute.line,
                            "a11y-incorrect-aria-attribute-type",
                            format!("the value of '{}' must be {}", name, ty.describe()),
                        );
                    }
                }
            }
        }

        if name == "aria-hidden" {
            if let Some(tag) = tag {
                if HEADING_ELEMENTS.contains(tag) {
                    state.warn(
                        attribute.line,
                        "a11y-hidden",
                        format!("<{}> element should not be hidden", tag),
                    );
                }
            }
        }

        return;
    }

    match name.as_str() {
        "role" => validate_role(element, tag, attribute, ctx, state),
        "accesskey" => state.warn(
            attribute.line,
            "a11y-accesskey",
            "avoid using accesskey",
        ),
        "autofocus" => state.warn(
            attribute.line,
            "a11y-autofocus",
            "avoid using autofocus",
        ),
        "scope" => {
            if tag.map_or(false, |t| t != "th") {
                state.warn(
                    attribute.line,
                    "a11y-misplaced-scope",
                    "the scope attribute should only be used with <th> elements",
                );
            }
        }
        "tabindex" => {
            if let Some(value) = attribute.static_value() {
                if value.trim().parse::<i32>().map_or(false, |t| t > 0) {
                    state.warn(
                        attribute.line,
                        "a11y-positive-tabindex",
                        "avoid tabindex values above zero",
                    );
                }
            }
        }
        _ => {}
    }
}

fn validate_role(
    element: &Element,
    tag: Option<&str>,
    attribute: &Attribute,
    ctx: &AncestorContext,
    state: &mut CompilerState,
) {
    if let Some(tag) = tag {
        if INVISIBLE_ELEMENTS.contains(tag) {
            state.warn(
                attribute.line,
                "a11y-misplaced-role",
                format!("<{}> should not have a role attribute", tag),
            );
        }
    }

    let Some(value) = attribute.static_value() else {
        return;
    };

    for role in value.split_whitespace() {
        if ABSTRACT_ROLES.contains(role) {
            state.warn(
                attribute.line,
                "a11y-no-abstract-role",
                format!("abstract role '{}' is forbidden", role),
            );
            continue;
        }

        if !ARIA_ROLES.contains(role) {
            let mut message = format!("unknown role '{}'", role);
            if let Some(suggestion) = fuzzy_suggest(role, &ARIA_ROLES) {
                message.push_str(&format!("; did you mean '{}'?", suggestion));
            }
            state.warn(attribute.line, "a11y-unknown-role", message);
            continue;
        }

        if let Some(tag) = tag {
            validate_known_role(element, tag, role, attribute.line, ctx, state);
        }
    }
}

fn validate_known_role(
    element: &Element,
    tag: &str,
    role: &str,
    line: usize,
    ctx: &AncestorContext,
    state: &mut CompilerState,
) {
    let direct_redundant = IMPLICIT_ROLES.get(tag) == Some(&role);
    // header/footer only carry their landmark role outside sectioning
    // content, so the restatement is redundant only there
    let nested_redundant = NESTED_IMPLICIT_ROLES.get(tag) == Some(&role)
        && !ctx.has_element_named(&["section", "article"]);
    if direct_redundant || nested_redundant {
        state.warn(
            line,
            "a11y-no-redundant-roles",
            format!("redundant role '{}' on <{}>", role, tag),
        );
    }

    if let Some(required) = REQUIRED_ROLE_PROPS.get(role) {
        let missing: Vec<&str> = required
            .iter()
            .filter(|prop| !element.has_attribute(prop))
            .copied()
            .collect();
        if !missing.is_empty() && !semantically_satisfies_role(element, tag, role) {
            state.warn(
                line,
                "a11y-role-has-required-aria-props",
                format!(
                    "elements with the ARIA role '{}' must have the following attributes defined: {}",
                    role,
                    missing.join(", ")
                ),
            );
        }
    }

    if is_interactive_element(tag, element)
        && (NON_INTERACTIVE_ROLES.contains(role) || PRESENTATION_ROLES.contains(role))
    {
        state.warn(
            line,
            "a11y-no-interactive-element-to-noninteractive-role",
            format!("<{}> cannot have the non-interactive role '{}'", tag, role),
        );
    }
}

/// Host semantics can satisfy a role's required state without ARIA
/// attributes: a native checkbox already exposes its checked state.
fn semantically_satisfies_role(element: &Element, tag: &str, role: &str) -> bool {
    match tag {
        "input" => {
            let ty = element
                .attribute("type")
                .and_then(|a| a.static_value())
                .unwrap_or_default();
            matches!(ty.as_str(), "checkbox" | "radio")
                && matches!(
                    role,
                    "checkbox" | "radio" | "switch" | "menuitemcheckbox" | "menuitemradio"
                )
        }
        "option" => role == "option",
        _ => false,
    }
}

/// Element-level accessibility checks that look at several collaborators
/// at once.
fn validate_element_a11y(element: &Element, _ctx: &AncestorContext, state: &mut CompilerState) {
    if element.namespace == Namespace::Foreign {
        return;
    }
    let Some(tag) = element.name().map(str::to_ascii_lowercase) else {
        return;
    };
    let tag = tag.as_str();

    let interactive = is_interactive_element(tag, element);
    let role_tokens = static_role_tokens(element);
    let has_interactive_role = role_tokens.iter().any(|r| INTERACTIVE_ROLES.contains(r.as_str()));
    let has_presentation_role = role_tokens.iter().any(|r| PRESENTATION_ROLES.contains(r.as_str()));
    let hidden_from_at = has_presentation_role
        || element
            .attribute("aria-hidden")
            .and_then(|a| a.static_value())
            .map_or(false, |v| v == "true");

    if let Some(attr) = element.attribute("aria-activedescendant") {
        if !interactive && !element.has_attribute("tabindex") {
            state.warn(
                attr.line,
                "a11y-aria-activedescendant-has-tabindex",
                "an element with aria-activedescendant must be tabbable",
            );
        }
    }

    if let Some(click) = element.handler("click") {
        let has_key_handler = element
            .handlers
            .iter()
            .any(|h| KEYBOARD_EVENTS.contains(h.name.as_str()));
        if !interactive
            && !has_interactive_role
            && !has_key_handler
            && !hidden_from_at
            && !element.has_spread()
        {
            state.warn(
                click.line,
                "a11y-click-events-have-key-events",
                "visible, non-interactive elements with a click handler must \
                 be accompanied by a keyboard event handler",
            );
        }
    }

    if let Some(tabindex) = element.attribute("tabindex") {
        let non_negative_or_dynamic = match tabindex.static_value() {
            Some(value) => value.trim().parse::<i32>().map_or(false, |t| t >= 0),
            None => true,
        };
        let noninteractive_role = role_tokens.is_empty()
            || role_tokens
                .iter()
                .all(|r| NON_INTERACTIVE_ROLES.contains(r.as_str()));
        if !interactive && !has_interactive_role && noninteractive_role && non_negative_or_dynamic {
            state.warn(
                tabindex.line,
                "a11y-no-noninteractive-tabindex",
                "non-interactive elements should not be in the tab order",
            );
        }
    }

    for (mouse, key) in [("mouseover", "focus"), ("mouseout", "blur")] {
        if let Some(handler) = element.handler(mouse) {
            if !element.has_handler(key) {
                state.warn(
                    handler.line,
                    "a11y-mouse-events-have-key-events",
                    format!("'{}' event must be accompanied by '{}' event", mouse, key),
                );
            }
        }
    }
}

fn static_role_tokens(element: &Element) -> Vec<String> {
    element
        .attribute("role")
        .and_then(|a| a.static_value())
        .map(|v| v.split_whitespace().map(str::to_string).collect())
        .unwrap_or_default()
}

// Group 3: tag-specific structure

fn validate_structure(element: &Element, ctx: &AncestorContext, state: &mut CompilerState) {
    if element.namespace == Namespace::Foreign {
        return;
    }
    let Some(tag) = element.name().map(str::to_ascii_lowercase) else {
        return;
    };
    let tag = tag.as_str();

    if DISTRACTING_ELEMENTS.contains(tag) {
        state.warn(
            element.line,
            "a11y-distracting-elements",
            format!("avoid <{}> elements", tag),
        );
    }

    if tag == "a" {
        validate_anchor(element, state);
    } else if let Some(required) = required_attributes_for(tag, element) {
        let present = required.iter().any(|name| element.has_attribute(name));
        if !present && !element.has_spread() {
            state.warn(
                element.line,
                "a11y-missing-attribute",
                format!("<{}> element should have {} attribute", tag, alternatives(required)),
            );
        }
    }

    if tag == "img" {
        if let Some(alt) = element.attribute("alt").and_then(|a| a.static_value()) {
            let lowered = alt.to_ascii_lowercase();
            let hidden = element
                .attribute("aria-hidden")
                .and_then(|a| a.static_value())
                .map_or(false, |v| v == "true");
            if !hidden
                && ["image", "picture", "photo"].iter().any(|w| lowered.contains(w))
            {
                state.warn(
                    element.line,
                    "a11y-img-redundant-alt",
                    "screenreaders already announce <img> elements as an image",
                );
            }
        }
    }

    if tag == "figcaption" {
        let parent_is_figure = ctx
            .nearest_element()
            .map_or(false, |(name, _)| {
                name.map_or(false, |n| n.eq_ignore_ascii_case("figure"))
            });
        if !parent_is_figure {
            state.warn(
                element.line,
                "a11y-structure",
                "<figcaption> must be an immediate child of <figure>",
            );
        }
    }
}

fn validate_anchor(element: &Element, state: &mut CompilerState) {
    let href = element
        .attribute("href")
        .or_else(|| element.attribute("xlink:href"));

    match href {
        Some(attr) => {
            if let Some(value) = attr.static_value() {
                let trimmed = value.trim().to_ascii_lowercase();
                if trimmed.is_empty() || trimmed == "#" || trimmed.starts_with("javascript:") {
                    state.warn(
                        attr.line,
                        "a11y-invalid-attribute",
                        format!("'{}' is not a valid href attribute", value),
                    );
                }
            }
            if state.options.legacy_mode {
                validate_anchor_target(element, attr, state);
            }
        }
        None => {
            let has_fallback = ["id", "name"].iter().any(|name| {
                element
                    .attribute(name)
                    .and_then(|a| a.static_value())
                    .map_or(element.has_attribute(name), |v| !v.trim().is_empty())
            });
            if !has_fallback && !element.has_spread() {
                state.warn(
                    element.line,
                    "a11y-missing-attribute",
                    "<a> element should have an href attribute",
                );
            }
        }
    }
}

/// Legacy-mode check: `target="_blank"` on a URL whose origin cannot be
/// proven local grants the opened page a window reference unless
/// `rel="noreferrer"` is present.
fn validate_anchor_target(element: &Element, href: &Attribute, state: &mut CompilerState) {
    let target_blank = element
        .attribute("target")
        .and_then(|a| a.static_value())
        .map_or(false, |t| t == "_blank");
    if !target_blank {
        return;
    }

    let rel_covers = element
        .attribute("rel")
        .and_then(|a| a.static_value())
        .map_or(false, |rel| rel.split_whitespace().any(|t| t == "noreferrer"));
    if rel_covers {
        return;
    }

    let ambiguous = match href.static_value() {
        None => true,
        Some(value) => {
            let value = value.trim().to_ascii_lowercase();
            value.starts_with("http:") || value.starts_with("https:")
        }
    };
    if ambiguous {
        state.warn(
            href.line,
            "security-anchor-rel-noreferrer",
            "links with target=\"_blank\" should have rel=\"noreferrer\"",
        );
    }
}

fn required_attributes_for(tag: &str, element: &Element) -> Option<&'static [&'static str]> {
    if tag == "input" {
        let ty = element
            .attribute("type")
            .and_then(|a| a.static_value())
            .unwrap_or_default();
        if ty == "image" {
            return Some(&["alt", "aria-label", "aria-labelledby"]);
        }
        return None;
    }
    REQUIRED_ATTRIBUTES.get(tag).copied()
}

fn alternatives(names: &[&str]) -> String {
    match names {
        [only] => {
            let article = if only.starts_with(['a', 'e', 'i', 'o', 'u']) {
                "an"
            } else {
                "a"
            };
            format!("{} {}", article, only)
        }
        _ => names.join(" or "),
    }
}

// Children-dependent checks, run in the second pass

fn validate_label_control(element: &Element, state: &mut CompilerState) {
    if element.has_attribute("for") || element.has_spread() {
        return;
    }
    if !subtree_has_labelable_control(&element.children) {
        state.warn(
            element.line,
            "a11y-label-has-associated-control",
            "a form label must be associated with a control",
        );
    }
}

fn subtree_has_labelable_control(children: &[Node]) -> bool {
    children.iter().any(|child| match child {
        Node::Element(el) => {
            el.name().map_or(false, |name| {
                LABELABLE_ELEMENTS.contains(name.to_ascii_lowercase().as_str())
                    || name.eq_ignore_ascii_case("slot")
            }) || subtree_has_labelable_control(&el.children)
        }
        Node::Block { children, .. }
        | Node::Component { children, .. }
        | Node::SlotTemplate { children, .. } => subtree_has_labelable_control(children),
        _ => false,
    })
}

fn validate_media_captions(element: &Element, state: &mut CompilerState) {
    if element.has_attribute("muted") {
        return;
    }
    let hidden = element
        .attribute("aria-hidden")
        .and_then(|a| a.static_value())
        .map_or(false, |v| v == "true");
    if hidden {
        return;
    }

    let has_caption_track = element.children.iter().any(|child| match child {
        Node::Element(el) => {
            el.is_named("track")
                && el
                    .attribute("kind")
                    .and_then(|a| a.static_value())
                    .map_or(false, |k| k == "captions")
        }
        _ => false,
    });
    if !has_caption_track {
        state.warn(
            element.line,
            "a11y-media-has-caption",
            "<video> elements must have a <track kind=\"captions\">",
        );
    }
}

fn validate_figure_order(element: &Element, state: &mut CompilerState) {
    let meaningful: Vec<&Node> = element
        .children
        .iter()
        .filter(|child| match child {
            Node::Comment { .. } => false,
            Node::Text(text) => !text.is_whitespace(),
            _ => true,
        })
        .collect();

    let position = meaningful.iter().position(|child| {
        matches!(child, Node::Element(el) if el.is_named("figcaption"))
    });
    if let Some(index) = position {
        if index != 0 && index != meaningful.len() - 1 {
            let line = match meaningful[index] {
                Node::Element(el) => el.line,
                _ => element.line,
            };
            state.warn(
                line,
                "a11y-structure",
                "<figcaption> must be first or last child of <figure>",
            );
        }
    }
}

// Group 4: binding legality per tag

fn validate_bindings(element: &Element) -> Result<()> {
    if element.namespace == Namespace::Foreign {
        for binding in &element.bindings {
            if binding.name != "this" {
                return Err(CompileError::binding(
                    binding.line,
                    "only bind:this is allowed on elements in a foreign namespace",
                ));
            }
        }
        return Ok(());
    }

    for binding in &element.bindings {
        validate_binding(element, binding)?;
    }
    Ok(())
}

fn validate_binding(element: &Element, binding: &Binding) -> Result<()> {
    let tag = element.name().map(str::to_ascii_lowercase);
    let name = binding.name.as_str();

    // Tag-identity-dependent rules are skipped for a dynamic tag whose
    // name is unknown until run time.
    let require_tag = |allowed: &[&str], description: &str| -> Result<()> {
        match &tag {
            Some(tag) if allowed.contains(&tag.as_str()) => Ok(()),
            Some(tag) => Err(CompileError::binding(
                binding.line,
                format!("'{}' is not a valid binding on <{}> elements; it is only valid on {}", name, tag, description),
            )),
            None => Ok(()),
        }
    };

    let static_type = || {
        element
            .attribute("type")
            .and_then(|a| a.static_value())
            .unwrap_or_default()
    };

    let require_input_type = |expected: &[&str]| -> Result<()> {
        if tag.as_deref() != Some("input") {
            return Err(CompileError::binding(
                binding.line,
                format!("'{}' binding is only valid on <input> elements", name),
            ));
        }
        let ty = static_type();
        if !expected.contains(&ty.as_str()) {
            return Err(CompileError::binding(
                binding.line,
                format!(
                    "'{}' binding can only be used with <input type=\"{}\">",
                    name,
                    expected.join("\"> or <input type=\"")
                ),
            ));
        }
        Ok(())
    };

    match name {
        "this" => Ok(()),
        "value" => require_tag(&["input", "textarea", "select"], "<input>, <textarea> and <select>"),
        "checked" | "indeterminate" => require_input_type(&["checkbox"]),
        "group" => require_input_type(&["checkbox", "radio"]),
        "files" => require_input_type(&["file"]),
        "open" => require_tag(&["details"], "<details>"),
        "videoWidth" | "videoHeight" => require_tag(&["video"], "<video>"),
        _ if MEDIA_BINDINGS.contains(name) => {
            require_tag(&["audio", "video"], "<audio> and <video>")
        }
        _ if DIMENSION_BINDING.is_match(name) => validate_dimension_binding(element, binding, &tag),
        "textContent" | "innerHTML" => validate_contenteditable_binding(element, binding),
        _ => {
            let mut message = format!("'{}' is not a valid binding", name);
            if let Some(suggestion) = fuzzy_suggest(name, &KNOWN_BINDINGS) {
                message.push_str(&format!("; did you mean '{}'?", suggestion));
            }
            Err(CompileError::binding(binding.line, message))
        }
    }
}

fn validate_dimension_binding(
    element: &Element,
    binding: &Binding,
    tag: &Option<String>,
) -> Result<()> {
    if element.namespace == Namespace::Svg {
        if tag.as_deref() == Some("svg") {
            return Err(CompileError::binding(
                binding.line,
                format!(
                    "'{}' is not a valid binding on <svg>; bind the dimensions of a wrapper element instead",
                    binding.name
                ),
            ));
        }
        return Err(CompileError::binding(
            binding.line,
            format!("'{}' is not a valid binding on SVG elements", binding.name),
        ));
    }

    if let Some(tag) = tag {
        if VOID_ELEMENTS.contains(tag.as_str()) {
            return Err(CompileError::binding(
                binding.line,
                format!(
                    "'{}' is not a valid binding on void elements like <{}>; use a wrapper element instead",
                    binding.name, tag
                ),
            ));
        }
    }

    Ok(())
}

fn validate_contenteditable_binding(element: &Element, binding: &Binding) -> Result<()> {
    match element.attribute("contenteditable") {
        None => Err(CompileError::binding(
            binding.line,
            format!("'{}' binding requires the contenteditable attribute", binding.name),
        )),
        Some(attr) if !attr.is_static() => Err(CompileError::binding(
            binding.line,
            "contenteditable cannot have a dynamic value when used with a content binding",
        )),
        Some(_) => Ok(()),
    }
}

// Group 5: event-modifier legality

fn validate_event_handlers(element: &mut Element, state: &mut CompilerState) -> Result<()> {
    let legacy = state.options.legacy_mode;

    for handler in &mut element.handlers {
        for modifier in &handler.modifiers {
            if !VALID_EVENT_MODIFIERS.contains(modifier.as_str()) {
                let mut valid: Vec<&str> = VALID_EVENT_MODIFIERS.iter().copied().collect();
                valid.sort_unstable();
                return Err(CompileError::event_modifier(
                    handler.line,
                    format!(
                        "'{}' is not a valid event modifier; valid modifiers are {}",
                        modifier,
                        valid.join(", ")
                    ),
                ));
            }
            if legacy && matches!(modifier.as_str(), "once" | "passive") {
                return Err(CompileError::event_modifier(
                    handler.line,
                    format!("the '{}' modifier cannot be used in legacy mode", modifier),
                ));
            }
        }

        if handler.has_modifier("passive") && handler.has_modifier("preventDefault") {
            return Err(CompileError::event_modifier(
                handler.line,
                "the 'passive' and 'preventDefault' modifiers cannot be used together",
            ));
        }
        if handler.has_modifier("passive") && handler.has_modifier("nonpassive") {
            return Err(CompileError::event_modifier(
                handler.line,
                "the 'passive' and 'nonpassive' modifiers cannot be used together",
            ));
        }

        let auto_passivable = PASSIVE_EVENTS.contains(handler.name.as_str());

        if handler.has_modifier("passive") {
            if auto_passivable && handler.can_make_passive() {
                state.warn(
                    handler.line,
                    "redundant-event-modifier",
                    "touch and wheel handlers that do not prevent default are passive by default",
                );
            } else if !auto_passivable {
                state.warn(
                    handler.line,
                    "redundant-event-modifier",
                    "the passive modifier only works with wheel and touch events",
                );
            }
        }

        // the single structure-altering side effect of validation
        if !legacy && auto_passivable && handler.can_make_passive() {
            handler.modifiers.insert("passive".to_string());
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{AttributeValue, Chunk, DirectiveNode, Expression, TemplateScope, TextNode};
    use crate::types::CompilerOptions;

    fn build(name: &str, directives: Vec<DirectiveNode>, state: &mut CompilerState) -> Element {
        let mut el = Element::named(name, directives, vec![], 1);
        crate::partition::partition(&mut el, &TemplateScope::root(), state).unwrap();
        el
    }

    fn attr(name: &str, value: &str) -> DirectiveNode {
        DirectiveNode::attribute(name, AttributeValue::static_text(value), 1)
    }

    fn bind(name: &str) -> DirectiveNode {
        DirectiveNode::Binding {
            name: name.to_string(),
            expression: Expression::new("x"),
            line: 1,
        }
    }

    fn on(name: &str, modifiers: &[&str]) -> DirectiveNode {
        DirectiveNode::EventHandler {
            name: name.to_string(),
            modifiers: modifiers.iter().map(|m| m.to_string()).collect(),
            expression: Some(Expression::new("handle")),
            line: 1,
        }
    }

    fn run(name: &str, directives: Vec<DirectiveNode>) -> (Result<()>, CompilerState) {
        let mut state = CompilerState::new(CompilerOptions::default());
        let mut el = build(name, directives, &mut state);
        let result = validate(&mut el, &AncestorContext::root(), &mut state);
        (result, state)
    }

    #[test]
    fn test_unknown_role_warns_once_with_suggestion() {
        let (result, state) = run("div", vec![attr("role", "nonexistent-role")]);
        result.unwrap();
        assert_eq!(state.warning_codes(), vec!["a11y-unknown-role"]);
    }

    #[test]
    fn test_presentation_role_on_button_warns_interactive_mismatch() {
        let (result, state) = run("button", vec![attr("role", "presentation")]);
        result.unwrap();
        assert_eq!(
            state.warning_codes(),
            vec!["a11y-no-interactive-element-to-noninteractive-role"]
        );
    }

    #[test]
    fn test_redundant_role_on_button_warns_once() {
        let (result, state) = run("button", vec![attr("role", "button")]);
        result.unwrap();
        assert_eq!(state.warning_codes(), vec!["a11y-no-redundant-roles"]);
    }

    #[test]
    fn test_abstract_role_warns() {
        let (result, state) = run("div", vec![attr("role", "widget")]);
        result.unwrap();
        assert_eq!(state.warning_codes(), vec!["a11y-no-abstract-role"]);
    }

    #[test]
    fn test_role_required_props() {
        let (result, state) = run("div", vec![attr("role", "checkbox")]);
        result.unwrap();
        assert_eq!(
            state.warning_codes(),
            vec!["a11y-role-has-required-aria-props"]
        );

        // native checkbox satisfies aria-checked semantically
        let (result, state) = run(
            "input",
            vec![attr("type", "checkbox"), attr("role", "switch")],
        );
        result.unwrap();
        assert!(state.warnings.is_empty());
    }

    #[test]
    fn test_header_banner_role_redundancy_depends_on_ancestors() {
        let mut state = CompilerState::new(CompilerOptions::default());
        let mut el = build("header", vec![attr("role", "banner")], &mut state);
        validate(&mut el, &AncestorContext::root(), &mut state).unwrap();
        assert_eq!(state.warning_codes(), vec!["a11y-no-redundant-roles"]);

        let mut state = CompilerState::new(CompilerOptions::default());
        let mut el = build("header", vec![attr("role", "banner")], &mut state);
        let ctx = AncestorContext::root().push(crate::ast::Ancestor::Element {
            name: Some("section".to_string()),
            namespace: Namespace::Html,
        });
        validate(&mut el, &ctx, &mut state).unwrap();
        assert!(state.warnings.is_empty());
    }

    #[test]
    fn test_unknown_aria_attribute_warns_with_suggestion() {
        let (result, state) = run("div", vec![attr("aria-labeledby", "x")]);
        result.unwrap();
        assert_eq!(state.warning_codes(), vec!["a11y-unknown-aria-attribute"]);
        assert!(state.warnings[0].message.contains("aria-labelledby"));
    }

    #[test]
    fn test_aria_value_type_mismatch_warns() {
        let (result, state) = run("div", vec![attr("aria-hidden", "maybe")]);
        result.unwrap();
        assert_eq!(
            state.warning_codes(),
            vec!["a11y-incorrect-aria-attribute-type"]
        );

        let (_, state) = run("div", vec![attr("aria-hidden", "true")]);
        assert!(state.warnings.is_empty());
    }

    #[test]
    fn test_aria_on_invisible_element_warns() {
        let (result, state) = run("script", vec![attr("aria-busy", "true")]);
        result.unwrap();
        assert_eq!(state.warning_codes(), vec!["a11y-aria-attributes"]);
    }

    #[test]
    fn test_aria_hidden_on_heading_warns() {
        let (result, state) = run("h2", vec![attr("aria-hidden", "true")]);
        result.unwrap();
        assert_eq!(state.warning_codes(), vec!["a11y-hidden"]);
    }

    #[test]
    fn test_checked_binding_requires_checkbox_type() {
        let (result, _) = run("input", vec![attr("type", "text"), bind("checked")]);
        assert!(result.is_err());

        let (result, _) = run("input", vec![attr("type", "checkbox"), bind("checked")]);
        result.unwrap();
    }

    #[test]
    fn test_binding_observes_type_declared_after_it_in_source() {
        // binding appears before the attribute in source order; partition
        // still builds attributes first
        let (result, _) = run("input", vec![bind("checked"), attr("type", "checkbox")]);
        result.unwrap();
    }

    #[test]
    fn test_group_binding_tags() {
        let (result, _) = run("input", vec![attr("type", "radio"), bind("group")]);
        result.unwrap();

        let (result, _) = run("select", vec![bind("group")]);
        assert!(result.is_err());
    }

    #[test]
    fn test_files_binding_requires_file_type() {
        let (result, _) = run("input", vec![attr("type", "file"), bind("files")]);
        result.unwrap();

        let (result, _) = run("input", vec![bind("files")]);
        assert!(result.is_err());
    }

    #[test]
    fn test_media_bindings_require_media_tags() {
        let (result, _) = run("audio", vec![bind("currentTime")]);
        result.unwrap();

        let (result, _) = run("video", vec![bind("playbackRate")]);
        result.unwrap();

        let (result, _) = run("div", vec![bind("currentTime")]);
        assert!(result.is_err());
    }

    #[test]
    fn test_video_dimension_bindings_require_video() {
        let (result, _) = run("video", vec![bind("videoWidth")]);
        result.unwrap();

        let (result, _) = run("audio", vec![bind("videoWidth")]);
        assert!(result.is_err());
    }

    #[test]
    fn test_open_binding_requires_details() {
        let (result, _) = run("details", vec![bind("open")]);
        result.unwrap();

        let (result, _) = run("div", vec![bind("open")]);
        assert!(result.is_err());
    }

    #[test]
    fn test_dimension_bindings_rejected_on_svg_and_void() {
        let mut state = CompilerState::new(CompilerOptions::default());
        let mut el = build("svg", vec![bind("clientWidth")], &mut state);
        el.namespace = Namespace::Svg;
        let err = validate(&mut el, &AncestorContext::root(), &mut state).unwrap_err();
        assert!(err.to_string().contains("wrapper"));

        let (result, _) = run("img", vec![bind("offsetHeight")]);
        assert!(result.is_err());

        let (result, _) = run("div", vec![bind("offsetHeight")]);
        result.unwrap();
    }

    #[test]
    fn test_content_bindings_require_static_contenteditable() {
        let (result, _) = run("div", vec![bind("textContent")]);
        assert!(result.is_err());

        let (result, _) = run(
            "div",
            vec![attr("contenteditable", "true"), bind("innerHTML")],
        );
        result.unwrap();

        let dynamic = DirectiveNode::attribute(
            "contenteditable",
            AttributeValue::Chunks(vec![Chunk::Expression(Expression::new("editable"))]),
            1,
        );
        let (result, _) = run("div", vec![dynamic, bind("textContent")]);
        assert!(result.is_err());
    }

    #[test]
    fn test_foreign_namespace_allows_only_this_binding() {
        let mut state = CompilerState::new(CompilerOptions::default());
        let mut el = build("entity", vec![bind("this")], &mut state);
        el.namespace = Namespace::Foreign;
        validate(&mut el, &AncestorContext::root(), &mut state).unwrap();

        let mut el = build("entity", vec![bind("value")], &mut state);
        el.namespace = Namespace::Foreign;
        assert!(validate(&mut el, &AncestorContext::root(), &mut state).is_err());
    }

    #[test]
    fn test_unknown_binding_is_fatal_with_suggestion() {
        let (result, _) = run("div", vec![bind("offsetWidht")]);
        let err = result.unwrap_err();
        assert!(err.to_string().contains("offsetWidth"));
    }

    #[test]
    fn test_touchstart_gets_auto_passive() {
        let mut state = CompilerState::new(CompilerOptions::default());
        let mut el = build("div", vec![on("touchstart", &[])], &mut state);
        validate(&mut el, &AncestorContext::root(), &mut state).unwrap();
        assert!(el.handlers[0].has_modifier("passive"));
    }

    #[test]
    fn test_prevent_default_suppresses_auto_passive() {
        let mut state = CompilerState::new(CompilerOptions::default());
        let mut el = build("div", vec![on("touchstart", &["preventDefault"])], &mut state);
        validate(&mut el, &AncestorContext::root(), &mut state).unwrap();
        assert!(!el.handlers[0].has_modifier("passive"));
    }

    #[test]
    fn test_passive_with_prevent_default_is_fatal() {
        let (result, _) = run("div", vec![on("touchstart", &["passive", "preventDefault"])]);
        assert!(result.is_err());
    }

    #[test]
    fn test_passive_on_click_warns() {
        let (result, state) = run("button", vec![on("click", &["passive"])]);
        result.unwrap();
        assert_eq!(state.warning_codes(), vec!["redundant-event-modifier"]);
    }

    #[test]
    fn test_invalid_modifier_is_fatal() {
        let (result, _) = run("div", vec![on("click", &["debounce"])]);
        assert!(result.is_err());
    }

    #[test]
    fn test_legacy_mode_rejects_once_and_passive() {
        let mut state = CompilerState::new(CompilerOptions {
            legacy_mode: true,
            ..Default::default()
        });
        let mut el = build("div", vec![on("click", &["once"])], &mut state);
        assert!(validate(&mut el, &AncestorContext::root(), &mut state).is_err());
    }

    #[test]
    fn test_click_without_key_handler_warns() {
        let (result, state) = run("div", vec![on("click", &[])]);
        result.unwrap();
        assert_eq!(
            state.warning_codes(),
            vec!["a11y-click-events-have-key-events"]
        );

        let (result, state) = run("div", vec![on("click", &[]), on("keydown", &[])]);
        result.unwrap();
        assert!(state.warnings.is_empty());

        // natively interactive elements are exempt
        let (result, state) = run("button", vec![on("click", &[])]);
        result.unwrap();
        assert!(state.warnings.is_empty());
    }

    #[test]
    fn test_spread_suppresses_click_warning() {
        let spread = DirectiveNode::Spread {
            expression: Expression::new("props"),
            line: 1,
        };
        let (result, state) = run("div", vec![on("click", &[]), spread]);
        result.unwrap();
        assert!(state.warnings.is_empty());
    }

    #[test]
    fn test_noninteractive_tabindex_warns() {
        let (result, state) = run("div", vec![attr("tabindex", "0")]);
        result.unwrap();
        assert_eq!(state.warning_codes(), vec!["a11y-no-noninteractive-tabindex"]);

        // negative tabindex is fine
        let (result, state) = run("div", vec![attr("tabindex", "-1")]);
        result.unwrap();
        assert!(state.warnings.is_empty());

        // positive tabindex warns on its own rule as well
        let (result, state) = run("div", vec![attr("tabindex", "2")]);
        result.unwrap();
        assert!(state
            .warning_codes()
            .contains(&"a11y-positive-tabindex"));
    }

    #[test]
    fn test_mouseover_requires_focus() {
        let (result, state) = run("div", vec![on("mouseover", &[])]);
        result.unwrap();
        assert_eq!(state.warning_codes(), vec!["a11y-mouse-events-have-key-events"]);

        let (result, state) = run("div", vec![on("mouseover", &[]), on("focus", &[])]);
        result.unwrap();
        assert!(state.warnings.is_empty());
    }

    #[test]
    fn test_anchor_href_rules() {
        let (result, state) = run("a", vec![attr("href", "#")]);
        result.unwrap();
        assert_eq!(state.warning_codes(), vec!["a11y-invalid-attribute"]);

        let (result, state) = run("a", vec![]);
        result.unwrap();
        assert_eq!(state.warning_codes(), vec!["a11y-missing-attribute"]);

        let (result, state) = run("a", vec![attr("name", "anchor-point")]);
        result.unwrap();
        assert!(state.warnings.is_empty());
    }

    #[test]
    fn test_target_blank_warns_in_legacy_mode_only() {
        let directives = || {
            vec![
                attr("href", "https://example.com"),
                attr("target", "_blank"),
            ]
        };

        let (result, state) = run("a", directives());
        result.unwrap();
        assert!(state.warnings.is_empty());

        let mut state = CompilerState::new(CompilerOptions {
            legacy_mode: true,
            ..Default::default()
        });
        let mut el = build("a", directives(), &mut state);
        validate(&mut el, &AncestorContext::root(), &mut state).unwrap();
        assert_eq!(state.warning_codes(), vec!["security-anchor-rel-noreferrer"]);

        let mut state = CompilerState::new(CompilerOptions {
            legacy_mode: true,
            ..Default::default()
        });
        let mut el = build(
            "a",
            vec![
                attr("href", "https://example.com"),
                attr("target", "_blank"),
                attr("rel", "noopener noreferrer"),
            ],
            &mut state,
        );
        validate(&mut el, &AncestorContext::root(), &mut state).unwrap();
        assert!(state.warnings.is_empty());
    }

    #[test]
    fn test_required_attribute_table() {
        let (result, state) = run("img", vec![]);
        result.unwrap();
        assert_eq!(state.warning_codes(), vec!["a11y-missing-attribute"]);
        assert!(state.warnings[0].message.contains("an alt"));

        let (result, state) = run("iframe", vec![]);
        result.unwrap();
        assert_eq!(state.warning_codes(), vec!["a11y-missing-attribute"]);
        assert!(state.warnings[0].message.contains("a title"));

        let (result, state) = run("iframe", vec![attr("title", "embedded page")]);
        result.unwrap();
        assert!(state.warnings.is_empty());

        let (result, state) = run("input", vec![attr("type", "image")]);
        result.unwrap();
        assert_eq!(state.warning_codes(), vec!["a11y-missing-attribute"]);
    }

    #[test]
    fn test_img_redundant_alt() {
        let (result, state) = run("img", vec![attr("alt", "a Photo of a dog")]);
        result.unwrap();
        assert_eq!(state.warning_codes(), vec!["a11y-img-redundant-alt"]);

        let (result, state) = run("img", vec![attr("alt", "a dog")]);
        result.unwrap();
        assert!(state.warnings.is_empty());
    }

    #[test]
    fn test_distracting_elements_warn() {
        let (result, state) = run("marquee", vec![]);
        result.unwrap();
        assert_eq!(state.warning_codes(), vec!["a11y-distracting-elements"]);
    }

    #[test]
    fn test_illegal_attribute_name_is_fatal() {
        let (result, _) = run("div", vec![attr("bad=name", "x")]);
        assert!(result.is_err());
    }

    #[test]
    fn test_attribute_alias_warns() {
        let (result, state) = run("div", vec![attr("className", "x")]);
        result.unwrap();
        assert_eq!(state.warning_codes(), vec!["invalid-attribute"]);
        assert!(state.warnings[0].message.contains("'class'"));
    }

    #[test]
    fn test_slot_rules() {
        // dynamic slot value
        let dynamic = DirectiveNode::attribute(
            "slot",
            AttributeValue::Chunks(vec![Chunk::Expression(Expression::new("s"))]),
            1,
        );
        let mut state = CompilerState::new(CompilerOptions::default());
        let mut el = build("div", vec![dynamic], &mut state);
        let ctx = AncestorContext::root().push(crate::ast::Ancestor::Component);
        assert!(validate(&mut el, &ctx, &mut state).is_err());

        // misplaced slot
        let (result, _) = run("div", vec![attr("slot", "header")]);
        assert!(result.is_err());

        // legal placement, then duplicate
        let mut state = CompilerState::new(CompilerOptions::default());
        let mut el = build("div", vec![attr("slot", "header")], &mut state);
        validate(&mut el, &ctx, &mut state).unwrap();
        let mut el2 = build("div", vec![attr("slot", "header")], &mut state);
        assert!(validate(&mut el2, &ctx, &mut state).is_err());
    }

    #[test]
    fn test_activedescendant_needs_tabindex() {
        let (result, state) = run("div", vec![attr("aria-activedescendant", "opt-1")]);
        result.unwrap();
        assert_eq!(
            state.warning_codes(),
            vec!["a11y-aria-activedescendant-has-tabindex"]
        );

        let (result, state) = run(
            "div",
            vec![attr("aria-activedescendant", "opt-1"), attr("tabindex", "-1")],
        );
        result.unwrap();
        assert!(state.warnings.is_empty());
    }

    #[test]
    fn test_label_requires_control() {
        let mut state = CompilerState::new(CompilerOptions::default());
        let el = Element::named("label", vec![], vec![Node::Text(TextNode::new("Name", 1))], 1);
        validate_with_children(&el, &mut state);
        assert_eq!(state.warning_codes(), vec!["a11y-label-has-associated-control"]);

        // a nested control at any depth satisfies the rule
        let control = Element::named("input", vec![], vec![], 2);
        let wrapper = Element::named("span", vec![], vec![Node::Element(control)], 2);
        let el = Element::named("label", vec![], vec![Node::Element(wrapper)], 1);
        let mut state = CompilerState::new(CompilerOptions::default());
        validate_with_children(&el, &mut state);
        assert!(state.warnings.is_empty());
    }

    #[test]
    fn test_video_caption_rules() {
        let mut state = CompilerState::new(CompilerOptions::default());
        let el = Element::named("video", vec![], vec![], 1);
        validate_with_children(&el, &mut state);
        assert_eq!(state.warning_codes(), vec!["a11y-media-has-caption"]);

        let mut state = CompilerState::new(CompilerOptions::default());
        let mut muted = Element::named("video", vec![attr("muted", "")], vec![], 1);
        crate::partition::partition(&mut muted, &TemplateScope::root(), &mut state).unwrap();
        validate_with_children(&muted, &mut state);
        assert!(state.warnings.is_empty());

        let mut state = CompilerState::new(CompilerOptions::default());
        let mut track = Element::named("track", vec![attr("kind", "captions")], vec![], 2);
        crate::partition::partition(&mut track, &TemplateScope::root(), &mut state).unwrap();
        let el = Element::named("video", vec![], vec![Node::Element(track)], 1);
        validate_with_children(&el, &mut state);
        assert!(state.warnings.is_empty());
    }

    #[test]
    fn test_figure_child_order() {
        let figcaption = |line| Node::Element(Element::named("figcaption", vec![], vec![], line));
        let img = || Node::Element(Element::named("img", vec![], vec![], 2));

        // figcaption in the middle
        let el = Element::named(
            "figure",
            vec![],
            vec![img(), figcaption(3), img()],
            1,
        );
        let mut state = CompilerState::new(CompilerOptions::default());
        validate_with_children(&el, &mut state);
        assert_eq!(state.warning_codes(), vec!["a11y-structure"]);

        // last position is fine; whitespace and comments do not count
        let el = Element::named(
            "figure",
            vec![],
            vec![
                img(),
                figcaption(3),
                Node::Text(TextNode::new("  \n ", 4)),
                Node::Comment {
                    data: "trailing".to_string(),
                    line: 5,
                },
            ],
            1,
        );
        let mut state = CompilerState::new(CompilerOptions::default());
        validate_with_children(&el, &mut state);
        assert!(state.warnings.is_empty());
    }

    #[test]
    fn test_figcaption_outside_figure_warns() {
        let mut state = CompilerState::new(CompilerOptions::default());
        let mut el = build("figcaption", vec![], &mut state);
        let ctx = AncestorContext::root().push(crate::ast::Ancestor::Element {
            name: Some("div".to_string()),
            namespace: Namespace::Html,
        });
        validate(&mut el, &ctx, &mut state).unwrap();
        assert_eq!(state.warning_codes(), vec!["a11y-structure"]);

        // blocks between figure and figcaption are looked through
        let mut state = CompilerState::new(CompilerOptions::default());
        let mut el = build("figcaption", vec![], &mut state);
        let ctx = AncestorContext::root()
            .push(crate::ast::Ancestor::Element {
                name: Some("figure".to_string()),
                namespace: Namespace::Html,
            })
            .push(crate::ast::Ancestor::Block);
        validate(&mut el, &ctx, &mut state).unwrap();
        assert!(state.warnings.is_empty());
    }
}
