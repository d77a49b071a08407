//! Directive partitioning
//!
//! Drains an element's raw descriptor list into the typed collaborator
//! lists, in dependency order: Binding collaborators build strictly after
//! Attribute collaborators, all other kinds preserve source order. `let:`
//! descriptors derive a child lexical scope visible to later siblings and
//! descendants.

use crate::ast::{DirectiveNode, Element, TemplateScope};
use crate::directives::{
    Action, Animation, Attribute, Binding, ClassDirective, EventHandler, LetBinding,
    SpreadAttribute, StyleDirective, Transition,
};
use crate::error::{CompileError, Result};
use crate::types::{CompilerState, Namespace};
use crate::ast::Expression;
use std::collections::HashSet;
use std::rc::Rc;

pub fn partition(
    element: &mut Element,
    enclosing: &Rc<TemplateScope>,
    state: &mut CompilerState,
) -> Result<()> {
    let raw = std::mem::take(&mut element.directives);

    // Stable partition: bindings last, everything else in source order.
    let (rest, bindings): (Vec<_>, Vec<_>) = raw.into_iter().partition(|d| !d.is_binding());

    let mut scope: Option<TemplateScope> = None;

    for descriptor in rest.into_iter().chain(bindings) {
        match descriptor {
            DirectiveNode::Attribute {
                name,
                value,
                synthetic,
                line,
            } => {
                let attribute = Attribute {
                    name,
                    value,
                    synthetic,
                    line,
                };
                apply_attribute_side_effects(element, &attribute);
                element.attributes.push(attribute);
            }
            DirectiveNode::Spread { expression, line } => {
                element.spreads.push(SpreadAttribute { expression, line });
            }
            DirectiveNode::Binding {
                name,
                expression,
                line,
            } => {
                element.bindings.push(Binding {
                    name,
                    expression,
                    line,
                });
            }
            DirectiveNode::Class {
                name,
                expression,
                line,
            } => {
                // `class:active` shorthand references the identifier of the
                // same name.
                let expression =
                    expression.unwrap_or_else(|| Expression::with_references(&name, &[&name]));
                element.classes.push(ClassDirective {
                    name,
                    expression,
                    line,
                });
            }
            DirectiveNode::StyleDirective { name, value, line } => {
                element.styles.push(StyleDirective { name, value, line });
            }
            DirectiveNode::EventHandler {
                name,
                modifiers,
                expression,
                line,
            } => {
                element.handlers.push(EventHandler {
                    name,
                    modifiers: modifiers.into_iter().collect(),
                    expression,
                    line,
                });
            }
            DirectiveNode::Action {
                name,
                expression,
                line,
            } => {
                warn_if_undeclared(&name, "action", line, enclosing, &scope, state);
                element.actions.push(Action {
                    name,
                    expression,
                    line,
                });
            }
            DirectiveNode::Transition {
                name,
                intro,
                outro,
                expression,
                line,
            } => {
                if !intro && !outro {
                    return Err(CompileError::internal(format!(
                        "transition directive '{}' is neither in nor out",
                        name
                    )));
                }
                warn_if_undeclared(&name, "transition", line, enclosing, &scope, state);
                let transition = Transition {
                    name,
                    is_intro: intro,
                    is_outro: outro,
                    expression,
                    line,
                };
                if intro {
                    if element.intro.is_some() {
                        return Err(CompileError::structure(
                            line,
                            "element already has an in transition",
                        ));
                    }
                    element.intro = Some(transition.clone());
                }
                if outro {
                    if element.outro.is_some() {
                        return Err(CompileError::structure(
                            line,
                            "element already has an out transition",
                        ));
                    }
                    element.outro = Some(transition);
                }
            }
            DirectiveNode::Animation {
                name,
                expression,
                line,
            } => {
                if element.animation.is_some() {
                    return Err(CompileError::structure(
                        line,
                        "element already has an animation",
                    ));
                }
                warn_if_undeclared(&name, "animation", line, enclosing, &scope, state);
                element.animation = Some(Animation {
                    name,
                    expression,
                    line,
                });
            }
            DirectiveNode::Let { name, names, line } => {
                let child = scope.get_or_insert_with(|| TemplateScope::child(enclosing));
                // Every introduced name depends on the let expression's own
                // name; later sibling directives and descendants see them.
                let dependencies: HashSet<String> = std::iter::once(name.clone()).collect();
                for introduced in &names {
                    child.add(introduced.clone(), dependencies.clone());
                }
                element.lets.push(LetBinding { name, names, line });
            }
        }
    }

    element.scope = match scope {
        Some(derived) => Rc::new(derived),
        None => Rc::clone(enclosing),
    };

    Ok(())
}

/// Attribute-driven side effects that must land during partitioning: a
/// static `xmlns` overrides the computed namespace, and accessibility
/// label attributes set the element flag read by later checks.
fn apply_attribute_side_effects(element: &mut Element, attribute: &Attribute) {
    if attribute.name.eq_ignore_ascii_case("xmlns") {
        if let Some(uri) = attribute.static_value() {
            element.namespace = Namespace::from_uri(&uri);
        }
    }

    if matches!(
        attribute.name.to_ascii_lowercase().as_str(),
        "aria-label" | "aria-labelledby"
    ) {
        let labelled = match attribute.static_value() {
            Some(value) => !value.trim().is_empty(),
            None => true, // dynamic labels count
        };
        if labelled {
            element.has_a11y_label = true;
        }
    }
}

/// A transition, animation or action must resolve to a declaration, either
/// through the lexical scope chain or through the driver's symbol table.
fn warn_if_undeclared(
    name: &str,
    kind: &str,
    line: usize,
    enclosing: &Rc<TemplateScope>,
    derived: &Option<TemplateScope>,
    state: &mut CompilerState,
) {
    // Directives may use dotted paths (`use:form.validate`); only the root
    // identifier needs to resolve.
    let root = name.split('.').next().unwrap_or(name);

    let in_scope = derived
        .as_ref()
        .map_or(false, |s| s.is_let(root))
        || enclosing.is_let(root);

    if !in_scope && !state.has_symbol(root) {
        state.warn(
            line,
            "missing-declaration",
            format!("the {} '{}' is not declared in this component", kind, root),
        );
    }
}
