//! Element analyzer
//!
//! Depth-first driver for the per-element pipeline: namespace resolution,
//! structural rewrites, directive partitioning, validation, then recursion
//! into children with an extended ancestor chain. Children-dependent
//! checks run after the subtree is built, and the whitespace optimizer
//! runs last.
//!
//! Each element is analyzed exactly once; the traversal owns the tree
//! mutably and the shared [`CompilerState`] is only ever touched from
//! this single pass.

use crate::ast::{AncestorContext, Ancestor, Element, Node, TemplateScope};
use crate::error::Result;
use crate::types::CompilerState;
use crate::{namespace, optimize, partition, rewrite, validate};
use std::rc::Rc;

/// Analyze a whole template tree. Entry point for the umbrella driver.
pub fn analyze(nodes: &mut [Node], state: &mut CompilerState) -> Result<()> {
    let analyzer = ElementAnalyzer;
    let scope = TemplateScope::root();
    for node in nodes {
        analyzer.visit(node, &AncestorContext::root(), &scope, state)?;
    }
    Ok(())
}

/// Stateless visitor; all mutable state lives on the tree and in
/// [`CompilerState`].
pub struct ElementAnalyzer;

impl ElementAnalyzer {
    fn visit(
        &self,
        node: &mut Node,
        ctx: &AncestorContext,
        scope: &Rc<TemplateScope>,
        state: &mut CompilerState,
    ) -> Result<()> {
        match node {
            Node::Element(element) => self.analyze_element(element, ctx, scope, state),
            Node::Block { children, .. } => {
                self.visit_children(children, &ctx.push(Ancestor::Block), scope, state)
            }
            Node::Component { children, .. } => {
                self.visit_children(children, &ctx.push(Ancestor::Component), scope, state)
            }
            Node::SlotTemplate { children, .. } => {
                self.visit_children(children, &ctx.push(Ancestor::SlotTemplate), scope, state)
            }
            Node::Text(_) | Node::Comment { .. } | Node::Mustache { .. } => Ok(()),
        }
    }

    fn visit_children(
        &self,
        children: &mut [Node],
        ctx: &AncestorContext,
        scope: &Rc<TemplateScope>,
        state: &mut CompilerState,
    ) -> Result<()> {
        for child in children {
            self.visit(child, ctx, scope, state)?;
        }
        Ok(())
    }

    fn analyze_element(
        &self,
        element: &mut Element,
        ctx: &AncestorContext,
        scope: &Rc<TemplateScope>,
        state: &mut CompilerState,
    ) -> Result<()> {
        element.namespace = namespace::resolve(ctx, element.name(), &state.options);
        rewrite::apply(element)?;
        partition::partition(element, scope, state)?;
        validate::validate(element, ctx, state)?;

        log::debug!(
            "analyzed <{}> ({:?} namespace, {} attributes, {} bindings)",
            element.name().unwrap_or("[dynamic]"),
            element.namespace,
            element.attributes.len(),
            element.bindings.len()
        );

        let child_ctx = ctx.push(Ancestor::Element {
            name: element.name().map(str::to_string),
            namespace: element.namespace,
        });
        let child_scope = Rc::clone(&element.scope);
        self.visit_children(&mut element.children, &child_ctx, &child_scope, state)?;

        validate::validate_with_children(element, state);
        optimize::compact_whitespace(element);
        Ok(())
    }
}
