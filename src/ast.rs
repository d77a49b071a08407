//! Template tree types consumed by the element analyzer
//!
//! The parser produces `Node` trees whose elements still carry their raw
//! `DirectiveNode` descriptors. The analyzer partitions those descriptors
//! into the typed collaborators in [`crate::directives`], resolves the
//! namespace, applies structural rewrites and runs validation.

use crate::directives::{
    Action, Animation, Attribute, Binding, ClassDirective, EventHandler, LetBinding,
    SpreadAttribute, StyleDirective, Transition,
};
use crate::types::Namespace;
use std::collections::{HashMap, HashSet};
use std::rc::Rc;

/// An embedded expression. The parser records the raw source text and the
/// identifiers the expression references; this stage never evaluates it.
#[derive(Debug, Clone, PartialEq)]
pub struct Expression {
    pub source: String,
    pub references: Vec<String>,
}

impl Expression {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            references: Vec::new(),
        }
    }

    pub fn with_references(source: impl Into<String>, references: &[&str]) -> Self {
        Self {
            source: source.into(),
            references: references.iter().map(|r| r.to_string()).collect(),
        }
    }
}

/// One piece of an attribute value: literal text or an embedded expression.
#[derive(Debug, Clone)]
pub enum Chunk {
    Text { data: String },
    Expression(Expression),
}

impl Chunk {
    pub fn text(data: impl Into<String>) -> Self {
        Chunk::Text { data: data.into() }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Chunk::Text { data } => Some(data),
            Chunk::Expression(_) => None,
        }
    }
}

/// Value of an attribute descriptor. `True` is a bare boolean attribute
/// (`<input disabled>`).
#[derive(Debug, Clone)]
pub enum AttributeValue {
    True,
    Chunks(Vec<Chunk>),
}

impl AttributeValue {
    pub fn static_text(data: impl Into<String>) -> Self {
        AttributeValue::Chunks(vec![Chunk::text(data)])
    }
}

/// Raw directive descriptor attached to an element in source order.
/// The grammar guarantees the kinds listed here; anything else reaching
/// the partitioner is an internal invariant violation.
#[derive(Debug, Clone)]
pub enum DirectiveNode {
    Attribute {
        name: String,
        value: AttributeValue,
        /// Synthesized by a structural rewrite, not written in source.
        synthetic: bool,
        line: usize,
    },
    Spread {
        expression: Expression,
        line: usize,
    },
    Binding {
        name: String,
        expression: Expression,
        line: usize,
    },
    Class {
        name: String,
        expression: Option<Expression>,
        line: usize,
    },
    StyleDirective {
        name: String,
        value: AttributeValue,
        line: usize,
    },
    EventHandler {
        name: String,
        modifiers: Vec<String>,
        expression: Option<Expression>,
        line: usize,
    },
    Action {
        name: String,
        expression: Option<Expression>,
        line: usize,
    },
    Transition {
        name: String,
        intro: bool,
        outro: bool,
        expression: Option<Expression>,
        line: usize,
    },
    Animation {
        name: String,
        expression: Option<Expression>,
        line: usize,
    },
    Let {
        name: String,
        names: Vec<String>,
        line: usize,
    },
}

impl DirectiveNode {
    pub fn attribute(name: impl Into<String>, value: AttributeValue, line: usize) -> Self {
        DirectiveNode::Attribute {
            name: name.into(),
            value,
            synthetic: false,
            line,
        }
    }

    pub fn synthetic_attribute(name: impl Into<String>, value: AttributeValue, line: usize) -> Self {
        DirectiveNode::Attribute {
            name: name.into(),
            value,
            synthetic: true,
            line,
        }
    }

    pub fn is_binding(&self) -> bool {
        matches!(self, DirectiveNode::Binding { .. })
    }
}

/// Literal text in the template.
#[derive(Debug, Clone)]
pub struct TextNode {
    pub data: String,
    pub line: usize,
}

impl TextNode {
    pub fn new(data: impl Into<String>, line: usize) -> Self {
        Self {
            data: data.into(),
            line,
        }
    }

    pub fn is_whitespace(&self) -> bool {
        self.data.chars().all(char::is_whitespace)
    }
}

/// A node in the template tree. Only `Element` is analyzed by this stage;
/// the remaining kinds participate in ancestor and child scans.
#[derive(Debug, Clone)]
pub enum Node {
    Element(Element),
    Text(TextNode),
    Comment {
        data: String,
        line: usize,
    },
    Mustache {
        expression: Expression,
        line: usize,
    },
    /// Control-flow wrapper (if/each/await). Opaque here except that its
    /// children are traversed and that it does not count as an element in
    /// ancestor scans.
    Block {
        children: Vec<Node>,
        line: usize,
    },
    /// Inline component instance. Opaque here; its subtree may legally
    /// carry `slot` attributes.
    Component {
        name: String,
        children: Vec<Node>,
        line: usize,
    },
    /// Slot-content wrapper forwarding children into a named slot.
    SlotTemplate {
        children: Vec<Node>,
        line: usize,
    },
}

impl Node {
    pub fn children_mut(&mut self) -> Option<&mut Vec<Node>> {
        match self {
            Node::Element(element) => Some(&mut element.children),
            Node::Block { children, .. }
            | Node::Component { children, .. }
            | Node::SlotTemplate { children, .. } => Some(children),
            _ => None,
        }
    }
}

/// Tag of an element: a literal name, or an expression producing the name
/// at run time for dynamic-tag elements.
#[derive(Debug, Clone)]
pub enum ElementTag {
    Literal(String),
    Dynamic(Expression),
}

impl ElementTag {
    /// The tag name, when statically known. A dynamic tag whose expression
    /// is a string literal is statically known too.
    pub fn static_name(&self) -> Option<&str> {
        match self {
            ElementTag::Literal(name) => Some(name),
            ElementTag::Dynamic(expr) => {
                let src = expr.source.trim();
                if src.len() >= 2
                    && ((src.starts_with('\'') && src.ends_with('\''))
                        || (src.starts_with('"') && src.ends_with('"')))
                {
                    Some(&src[1..src.len() - 1])
                } else {
                    None
                }
            }
        }
    }
}

/// The markup Element under analysis.
///
/// Created once when the enclosing tree is visited; mutated only by its
/// own construction pipeline (namespace → rewrite → partition → validate →
/// optimize), by the style-sheet collaborator (scope-class injection) and
/// by rewrites that move children into a synthesized attribute.
#[derive(Debug, Clone)]
pub struct Element {
    pub tag: ElementTag,
    pub namespace: Namespace,

    /// Raw descriptors, drained by the partitioner.
    pub directives: Vec<DirectiveNode>,

    pub attributes: Vec<Attribute>,
    pub spreads: Vec<SpreadAttribute>,
    pub bindings: Vec<Binding>,
    pub classes: Vec<ClassDirective>,
    pub styles: Vec<StyleDirective>,
    pub handlers: Vec<EventHandler>,
    pub actions: Vec<Action>,
    pub lets: Vec<LetBinding>,
    pub intro: Option<Transition>,
    pub outro: Option<Transition>,
    pub animation: Option<Animation>,

    pub children: Vec<Node>,

    /// Lexical scope visible to this element's children, possibly extended
    /// by `let:` directives.
    pub scope: Rc<TemplateScope>,

    /// Set during scope-class injection when a spread attribute makes
    /// static injection impossible.
    pub needs_manual_scoping: bool,

    /// Set when the element carries an accessibility label attribute.
    pub has_a11y_label: bool,

    pub line: usize,
}

impl Element {
    pub fn new(tag: ElementTag, directives: Vec<DirectiveNode>, children: Vec<Node>, line: usize) -> Self {
        Self {
            tag,
            namespace: Namespace::Html,
            directives,
            attributes: Vec::new(),
            spreads: Vec::new(),
            bindings: Vec::new(),
            classes: Vec::new(),
            styles: Vec::new(),
            handlers: Vec::new(),
            actions: Vec::new(),
            lets: Vec::new(),
            intro: None,
            outro: None,
            animation: None,
            children,
            scope: TemplateScope::root(),
            needs_manual_scoping: false,
            has_a11y_label: false,
            line,
        }
    }

    /// Literal element, the common case.
    pub fn named(name: impl Into<String>, directives: Vec<DirectiveNode>, children: Vec<Node>, line: usize) -> Self {
        Self::new(ElementTag::Literal(name.into()), directives, children, line)
    }

    /// Statically known tag name, if any. Tag-identity-dependent
    /// validations are skipped when this is `None`.
    pub fn name(&self) -> Option<&str> {
        self.tag.static_name()
    }

    pub fn is_named(&self, name: &str) -> bool {
        self.name().map_or(false, |n| n.eq_ignore_ascii_case(name))
    }

    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes
            .iter()
            .find(|a| a.name.eq_ignore_ascii_case(name))
    }

    pub fn attribute_mut(&mut self, name: &str) -> Option<&mut Attribute> {
        self.attributes
            .iter_mut()
            .find(|a| a.name.eq_ignore_ascii_case(name))
    }

    pub fn has_attribute(&self, name: &str) -> bool {
        self.attribute(name).is_some()
    }

    pub fn has_spread(&self) -> bool {
        !self.spreads.is_empty()
    }

    pub fn handler(&self, event: &str) -> Option<&EventHandler> {
        self.handlers.iter().find(|h| h.name == event)
    }

    pub fn has_handler(&self, event: &str) -> bool {
        self.handler(event).is_some()
    }
}

/// Lexical scope for `let:` bindings: identifier → dependency set, chained
/// to the enclosing scope. Shared via `Rc`; never mutated after being
/// attached to an element.
#[derive(Debug, Default)]
pub struct TemplateScope {
    parent: Option<Rc<TemplateScope>>,
    names: HashMap<String, HashSet<String>>,
}

impl TemplateScope {
    pub fn root() -> Rc<Self> {
        Rc::new(Self::default())
    }

    /// Derive a mutable child scope; wrap it in `Rc` once populated.
    pub fn child(parent: &Rc<TemplateScope>) -> TemplateScope {
        TemplateScope {
            parent: Some(Rc::clone(parent)),
            names: HashMap::new(),
        }
    }

    pub fn add(&mut self, name: impl Into<String>, dependencies: HashSet<String>) {
        self.names.insert(name.into(), dependencies);
    }

    /// True if `name` was introduced by a `let:` anywhere up the chain.
    pub fn is_let(&self, name: &str) -> bool {
        self.names.contains_key(name)
            || self.parent.as_ref().map_or(false, |p| p.is_let(name))
    }

    pub fn dependencies_for(&self, name: &str) -> Option<&HashSet<String>> {
        self.names
            .get(name)
            .or_else(|| self.parent.as_ref().and_then(|p| p.dependencies_for(name)))
    }
}

/// One entry in the ancestor chain threaded down the traversal. Upward
/// scans (namespace, figure structure, slot legality) read this instead
/// of holding back-pointers into the tree.
#[derive(Debug, Clone)]
pub enum Ancestor {
    Element {
        name: Option<String>,
        namespace: Namespace,
    },
    Block,
    Component,
    SlotTemplate,
}

/// Root-to-parent chain of ancestors for the node being analyzed.
#[derive(Debug, Clone, Default)]
pub struct AncestorContext {
    chain: Vec<Ancestor>,
}

impl AncestorContext {
    pub fn root() -> Self {
        Self::default()
    }

    pub fn push(&self, ancestor: Ancestor) -> Self {
        let mut chain = self.chain.clone();
        chain.push(ancestor);
        Self { chain }
    }

    /// Nearest ancestor element, scanning upward through non-element nodes.
    pub fn nearest_element(&self) -> Option<(Option<&str>, Namespace)> {
        self.chain.iter().rev().find_map(|a| match a {
            Ancestor::Element { name, namespace } => Some((name.as_deref(), *namespace)),
            _ => None,
        })
    }

    /// True if any ancestor element has one of the given (lowercase) names.
    pub fn has_element_named(&self, names: &[&str]) -> bool {
        self.chain.iter().any(|a| match a {
            Ancestor::Element { name: Some(n), .. } => {
                names.iter().any(|m| n.eq_ignore_ascii_case(m))
            }
            _ => false,
        })
    }

    /// Whether a `slot` attribute is legal here: directly inside a
    /// component or slot-content wrapper, or anywhere under a custom
    /// (hyphenated-tag) element.
    pub fn allows_slot(&self) -> bool {
        matches!(
            self.chain.last(),
            Some(Ancestor::Component | Ancestor::SlotTemplate)
        ) || self.chain.iter().any(|a| {
            matches!(a, Ancestor::Element { name: Some(n), .. } if n.contains('-'))
        })
    }
}
