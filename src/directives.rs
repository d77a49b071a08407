//! Typed directive collaborators
//!
//! Each wraps one raw directive descriptor with the narrow read contract
//! the validation engine relies on: `name`, staticness, and the literal
//! value when statically known.

use crate::ast::{AttributeValue, Chunk, Expression};
use std::collections::HashSet;

/// A plain markup attribute, possibly with embedded expressions.
#[derive(Debug, Clone)]
pub struct Attribute {
    pub name: String,
    pub value: AttributeValue,
    /// Synthesized by a structural rewrite rather than written in source.
    pub synthetic: bool,
    pub line: usize,
}

impl Attribute {
    pub fn new(name: impl Into<String>, value: AttributeValue, line: usize) -> Self {
        Self {
            name: name.into(),
            value,
            synthetic: false,
            line,
        }
    }

    pub fn synthetic(name: impl Into<String>, value: AttributeValue, line: usize) -> Self {
        Self {
            synthetic: true,
            ..Self::new(name, value, line)
        }
    }

    /// Bare boolean attribute (`<input disabled>`).
    pub fn is_true(&self) -> bool {
        matches!(self.value, AttributeValue::True)
    }

    /// True iff the value embeds no expression.
    pub fn is_static(&self) -> bool {
        match &self.value {
            AttributeValue::True => true,
            AttributeValue::Chunks(chunks) => {
                chunks.iter().all(|c| matches!(c, Chunk::Text { .. }))
            }
        }
    }

    /// The literal value when statically known; `None` means the value is
    /// not known until run time. A bare boolean attribute reads as "true".
    pub fn static_value(&self) -> Option<String> {
        match &self.value {
            AttributeValue::True => Some("true".to_string()),
            AttributeValue::Chunks(chunks) => {
                let mut out = String::new();
                for chunk in chunks {
                    out.push_str(chunk.as_text()?);
                }
                Some(out)
            }
        }
    }
}

/// `{...props}` spread. Its contents are unknowable at compile time, which
/// disables several static checks and forces manual style scoping.
#[derive(Debug, Clone)]
pub struct SpreadAttribute {
    pub expression: Expression,
    pub line: usize,
}

/// `bind:name={expression}`.
#[derive(Debug, Clone)]
pub struct Binding {
    pub name: String,
    pub expression: Expression,
    pub line: usize,
}

/// `class:name` / `class:name={expression}`.
#[derive(Debug, Clone)]
pub struct ClassDirective {
    pub name: String,
    pub expression: Expression,
    pub line: usize,
}

/// `style:name` / `style:name={expression}`.
#[derive(Debug, Clone)]
pub struct StyleDirective {
    pub name: String,
    pub value: AttributeValue,
    pub line: usize,
}

/// `on:event|modifiers={handler}`.
#[derive(Debug, Clone)]
pub struct EventHandler {
    pub name: String,
    pub modifiers: HashSet<String>,
    pub expression: Option<Expression>,
    pub line: usize,
}

impl EventHandler {
    pub fn has_modifier(&self, modifier: &str) -> bool {
        self.modifiers.contains(modifier)
    }

    /// The handler may receive the `passive` upgrade: it neither prevents
    /// default nor opts out explicitly.
    pub fn can_make_passive(&self) -> bool {
        !self.has_modifier("preventDefault") && !self.has_modifier("nonpassive")
    }
}

/// `use:action={params}`.
#[derive(Debug, Clone)]
pub struct Action {
    pub name: String,
    pub expression: Option<Expression>,
    pub line: usize,
}

/// `transition:` / `in:` / `out:` directive.
#[derive(Debug, Clone)]
pub struct Transition {
    pub name: String,
    pub is_intro: bool,
    pub is_outro: bool,
    pub expression: Option<Expression>,
    pub line: usize,
}

/// `animate:name={params}`.
#[derive(Debug, Clone)]
pub struct Animation {
    pub name: String,
    pub expression: Option<Expression>,
    pub line: usize,
}

/// `let:name` / `let:name={destructuring}`: introduces per-element local
/// names visible to later siblings and descendants.
#[derive(Debug, Clone)]
pub struct LetBinding {
    pub name: String,
    /// All names the binding introduces, including destructured ones.
    pub names: Vec<String>,
    pub line: usize,
}
