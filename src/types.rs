//! Core types shared across the Glint element analyzer

use serde::Serialize;
use std::collections::{HashMap, HashSet};

pub const HTML_NAMESPACE_URI: &str = "http://www.w3.org/1999/xhtml";
pub const SVG_NAMESPACE_URI: &str = "http://www.w3.org/2000/svg";

/// Markup namespace of an element.
///
/// `Foreign` subtrees are opaque: their contents are not interpreted as
/// host or vector-graphics markup and only a `this` binding is legal inside.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Namespace {
    Html,
    Svg,
    Foreign,
}

impl Namespace {
    /// Map a literal `xmlns` value to a namespace. Unknown URIs are opaque.
    pub fn from_uri(uri: &str) -> Self {
        match uri {
            HTML_NAMESPACE_URI => Namespace::Html,
            SVG_NAMESPACE_URI => Namespace::Svg,
            _ => Namespace::Foreign,
        }
    }
}

/// Global compile options handed down from the umbrella driver.
#[derive(Debug, Clone)]
pub struct CompilerOptions {
    /// Source filename, used when surfacing diagnostics.
    pub filename: String,

    /// Enable legacy-compatibility diagnostics (`target="_blank"` checks,
    /// stricter event-modifier rules).
    pub legacy_mode: bool,

    /// Default namespace for elements with no ancestor host element.
    pub namespace: Option<Namespace>,
}

impl Default for CompilerOptions {
    fn default() -> Self {
        Self {
            filename: "<unknown>".to_string(),
            legacy_mode: false,
            namespace: None,
        }
    }
}

/// A non-fatal diagnostic. Warnings accumulate without bound and never
/// change emitted structure (except the auto-passive handler upgrade).
#[derive(Debug, Clone, Serialize)]
pub struct Warning {
    /// Stable machine-readable code, e.g. `a11y-unknown-role`.
    pub code: &'static str,
    pub message: String,
    pub line: usize,
}

/// A declaration visible component-wide, keyed by name in the driver's
/// symbol table. Read-only from this stage.
#[derive(Debug, Clone)]
pub struct Symbol {
    pub name: String,
    pub kind: SymbolKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolKind {
    Variable,
    Function,
    Import,
}

/// Mutable analysis state owned by the umbrella driver for one component.
///
/// Holds the append-only warning list, the mostly-read global symbol
/// table, and per-component bookkeeping such as the set of slot names
/// already claimed. All access happens from the single traversal thread.
#[derive(Debug, Default)]
pub struct CompilerState {
    pub options: CompilerOptions,
    pub warnings: Vec<Warning>,
    pub symbols: HashMap<String, Symbol>,
    pub slot_names: HashSet<String>,
}

impl CompilerState {
    pub fn new(options: CompilerOptions) -> Self {
        Self {
            options,
            warnings: Vec::new(),
            symbols: HashMap::new(),
            slot_names: HashSet::new(),
        }
    }

    /// Record a warning and mirror it to the log.
    pub fn warn(&mut self, line: usize, code: &'static str, message: impl Into<String>) {
        let message = message.into();
        log::warn!("{}:{}: {} [{}]", self.options.filename, line, message, code);
        self.warnings.push(Warning {
            code,
            message,
            line,
        });
    }

    pub fn declare(&mut self, name: impl Into<String>, kind: SymbolKind) {
        let name = name.into();
        self.symbols.insert(
            name.clone(),
            Symbol {
                name,
                kind,
            },
        );
    }

    pub fn has_symbol(&self, name: &str) -> bool {
        self.symbols.contains_key(name)
    }

    /// Warning codes in emission order, handy for assertions.
    pub fn warning_codes(&self) -> Vec<&'static str> {
        self.warnings.iter().map(|w| w.code).collect()
    }
}
