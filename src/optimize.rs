//! Post-pass optimizer
//!
//! Two cheap rewrites applied after validation: whitespace compaction of
//! `class` and `style` attribute values, and injection of the style-sheet
//! scoping class. Neither affects diagnostics.

use crate::ast::{AttributeValue, Chunk};
use crate::directives::Attribute;
use crate::Element;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref WHITESPACE_RUN: Regex = Regex::new(r"\s+").unwrap();
}

/// Collapse whitespace runs in the static text chunks of `class` and
/// `style` attributes. The leading edge of the first chunk and the
/// trailing edge of the last chunk are dropped entirely; interior runs
/// become a single space so that text on both sides of an embedded
/// expression stays separated.
pub fn compact_whitespace(element: &mut Element) {
    for attribute in &mut element.attributes {
        if !attribute.name.eq_ignore_ascii_case("class")
            && !attribute.name.eq_ignore_ascii_case("style")
        {
            continue;
        }
        let AttributeValue::Chunks(chunks) = &mut attribute.value else {
            continue;
        };

        let last = chunks.len().saturating_sub(1);
        for (index, chunk) in chunks.iter_mut().enumerate() {
            let Chunk::Text { data } = chunk else {
                continue;
            };
            let mut compacted = WHITESPACE_RUN.replace_all(data, " ").into_owned();
            if index == 0 {
                compacted = compacted.trim_start().to_string();
            }
            if index == last {
                compacted = compacted.trim_end().to_string();
            }
            *data = compacted;
        }
    }
}

/// Append the style-sheet scoping class to the element's `class`
/// attribute, synthesizing one when absent. A spread attribute can
/// overwrite `class` at run time, so its presence defers scoping to the
/// runtime instead.
pub fn add_scope_class(element: &mut Element, token: &str) {
    if element.has_spread() {
        element.needs_manual_scoping = true;
        return;
    }

    let line = element.line;
    match element.attribute_mut("class") {
        None => {
            element.attributes.push(Attribute::synthetic(
                "class",
                AttributeValue::static_text(token),
                line,
            ));
        }
        Some(attribute) => {
            // a bare `class` attribute normalizes to an empty value first
            if matches!(attribute.value, AttributeValue::True) {
                attribute.value = AttributeValue::Chunks(vec![]);
            }
            let AttributeValue::Chunks(chunks) = &mut attribute.value else {
                unreachable!("class attribute normalized above");
            };
            match chunks.last_mut() {
                Some(Chunk::Text { data }) if !data.is_empty() => {
                    data.push(' ');
                    data.push_str(token);
                }
                Some(Chunk::Text { data }) => data.push_str(token),
                Some(_) => chunks.push(Chunk::text(format!(" {}", token))),
                None => chunks.push(Chunk::text(token)),
            }
        }
    }
}
