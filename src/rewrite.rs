//! Tag-specific structural rewrites
//!
//! Applied after namespace resolution and before directive partitioning,
//! and only outside opaque-foreign subtrees. These rewrites compensate for
//! host-rendering quirks so downstream code generation sees a uniform
//! shape.

use crate::ast::{AttributeValue, Chunk, DirectiveNode, Element, Node};
use crate::error::{CompileError, Result};
use crate::types::Namespace;

/// Tags whose first rendered newline is swallowed by the host renderer;
/// the parser keeps it, so we strip one to compensate.
fn is_newline_stripping(name: &str) -> bool {
    matches!(name, "pre" | "textarea")
}

pub fn apply(element: &mut Element) -> Result<()> {
    if element.namespace == Namespace::Foreign {
        return Ok(());
    }

    let Some(name) = element.name().map(str::to_ascii_lowercase) else {
        return Ok(());
    };

    if is_newline_stripping(&name) {
        strip_leading_newline(element);
    }

    match name.as_str() {
        "textarea" => hoist_textarea_children(element)?,
        "option" => synthesize_option_value(element),
        _ => {}
    }

    Ok(())
}

fn strip_leading_newline(element: &mut Element) {
    if let Some(Node::Text(text)) = element.children.first_mut() {
        if let Some(rest) = text.data.strip_prefix('\n') {
            text.data = rest.to_string();
        }
    }
}

/// `<textarea>` renders its children as its value. Move them into an
/// implicit `value` attribute so code generation only deals with the
/// attribute form. An explicit `value` attribute coexisting with children
/// is ambiguous and fatal.
fn hoist_textarea_children(element: &mut Element) -> Result<()> {
    if element.children.is_empty() {
        return Ok(());
    }

    if let Some(line) = explicit_value_attribute_line(element) {
        return Err(CompileError::structure(
            line,
            "a <textarea> can have either a value attribute or child content, but not both",
        ));
    }

    let children = std::mem::take(&mut element.children);
    let chunks = children_to_chunks(&children);
    element.directives.push(DirectiveNode::attribute(
        "value",
        AttributeValue::Chunks(chunks),
        element.line,
    ));

    Ok(())
}

/// `<option>{expr}</option>` behaves like `<option value={expr}>{expr}</option>`:
/// synthesize the value attribute when none was written. Children stay in
/// place since they are still rendered as the option label.
fn synthesize_option_value(element: &mut Element) {
    if explicit_value_attribute_line(element).is_some() {
        return;
    }

    let chunks = children_to_chunks(&element.children);
    element.directives.push(DirectiveNode::synthetic_attribute(
        "value",
        AttributeValue::Chunks(chunks),
        element.line,
    ));
}

fn explicit_value_attribute_line(element: &Element) -> Option<usize> {
    element.directives.iter().find_map(|d| match d {
        DirectiveNode::Attribute { name, line, .. } if name.eq_ignore_ascii_case("value") => {
            Some(*line)
        }
        _ => None,
    })
}

fn children_to_chunks(children: &[Node]) -> Vec<Chunk> {
    let mut chunks = Vec::new();
    for child in children {
        match child {
            Node::Text(text) => chunks.push(Chunk::text(text.data.clone())),
            Node::Mustache { expression, .. } => {
                chunks.push(Chunk::Expression(expression.clone()))
            }
            other => {
                log::debug!("skipping non-text child {:?} while synthesizing value", other);
            }
        }
    }
    chunks
}
