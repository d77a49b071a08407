//! Glint UI Template Compiler - element analysis
//!
//! The semantic-analysis stage for markup elements in Glint templates.
//! It consumes the parsed template tree and, for every element, resolves
//! the markup namespace, applies structural rewrites, partitions raw
//! directives into typed collaborators, and runs the validation rule
//! groups, accumulating warnings and aborting on fatal errors.
//!
//! # Features
//!
//! - Namespace resolution (host, vector-graphics and foreign subtrees)
//! - Structural rewrites: newline stripping, textarea value hoisting,
//!   option value synthesis
//! - Directive partitioning with stable binding reordering
//! - Accessibility and ARIA validation with fuzzy suggestions
//! - Per-tag binding legality and event-modifier checking
//! - Post-pass whitespace compaction and scope-class injection
//!
//! # Basic Usage
//!
//! ```rust
//! use glintc::{analyze, CompilerOptions, CompilerState, Node, Result};
//!
//! fn check(mut tree: Vec<Node>) -> Result<CompilerState> {
//!     let mut state = CompilerState::new(CompilerOptions::default());
//!     analyze(&mut tree, &mut state)?;
//!     Ok(state)
//! }
//! ```
//!
//! # Analysis Pipeline
//!
//! Each element passes through five phases in order:
//!
//! 1. **Namespace**: resolve from ancestors, tag name and options
//! 2. **Rewrite**: normalize children of pre/textarea/option
//! 3. **Partition**: raw descriptors into typed collaborators,
//!    bindings moved after attributes, `let:` scopes derived
//! 4. **Validate**: attribute, a11y, structure, binding and event
//!    modifier rule groups
//! 5. **Optimize**: class/style whitespace compaction; scope-class
//!    injection happens later, driven by the style-sheet collaborator

pub mod types;
pub mod error;
pub mod ast;
pub mod directives;

pub mod namespace;
pub mod rewrite;
pub mod partition;
pub mod html;
pub mod aria;
pub mod validate;
pub mod optimize;
pub mod analyzer;

// Re-export commonly used types and functions
pub use error::{CompileError, Result};
pub use types::{CompilerOptions, CompilerState, Namespace, Symbol, SymbolKind, Warning};

pub use ast::{
    AncestorContext, Ancestor, AttributeValue, Chunk, Element, ElementTag, Expression, Node,
    TemplateScope, TextNode,
};
pub use analyzer::{analyze, ElementAnalyzer};
pub use optimize::{add_scope_class, compact_whitespace};

/// Compiler version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
