//! ARIA vocabulary tables and fuzzy matching
//!
//! Attribute names with their value types, role sets, implicit-role maps
//! and required companion properties. Built once; the validation engine
//! only reads them.

use lazy_static::lazy_static;
use std::collections::{HashMap, HashSet};

/// Value type of an ARIA attribute, checked against static values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AriaType {
    Boolean,
    String,
    Tristate,
    Integer,
    Number,
    Token(&'static [&'static str]),
    Id,
    IdList,
    TokenList(&'static [&'static str]),
}

impl AriaType {
    /// Whether `value` is acceptable for this type. `undefined` is the
    /// attribute's explicit reset value and always accepted for the
    /// boolean-like types.
    pub fn accepts(&self, value: &str) -> bool {
        let value = value.trim();
        match self {
            AriaType::Boolean => matches!(value, "true" | "false" | "undefined"),
            AriaType::Tristate => matches!(value, "true" | "false" | "mixed" | "undefined"),
            AriaType::Integer => value.parse::<i64>().is_ok(),
            AriaType::Number => value.parse::<f64>().is_ok(),
            AriaType::String | AriaType::Id => true,
            AriaType::IdList => true,
            AriaType::Token(allowed) => allowed.contains(&value),
            AriaType::TokenList(allowed) => {
                !value.is_empty()
                    && value.split_whitespace().all(|t| allowed.contains(&t))
            }
        }
    }

    pub fn describe(&self) -> &'static str {
        match self {
            AriaType::Boolean => "a boolean",
            AriaType::String => "a string",
            AriaType::Tristate => "true, false or mixed",
            AriaType::Integer => "an integer",
            AriaType::Number => "a number",
            AriaType::Token(_) => "one of a fixed token set",
            AriaType::Id => "an element id",
            AriaType::IdList => "a list of element ids",
            AriaType::TokenList(_) => "a list of fixed tokens",
        }
    }
}

lazy_static! {
    /// All known `aria-*` attributes keyed by full name.
    pub static ref ARIA_ATTRIBUTES: HashMap<&'static str, AriaType> = [
        ("aria-activedescendant", AriaType::Id),
        ("aria-atomic", AriaType::Boolean),
        (
            "aria-autocomplete",
            AriaType::Token(&["inline", "list", "both", "none"]),
        ),
        ("aria-busy", AriaType::Boolean),
        ("aria-checked", AriaType::Tristate),
        ("aria-colcount", AriaType::Integer),
        ("aria-colindex", AriaType::Integer),
        ("aria-colspan", AriaType::Integer),
        ("aria-controls", AriaType::IdList),
        (
            "aria-current",
            AriaType::Token(&["page", "step", "location", "date", "time", "true", "false"]),
        ),
        ("aria-describedby", AriaType::IdList),
        ("aria-details", AriaType::Id),
        ("aria-disabled", AriaType::Boolean),
        (
            "aria-dropeffect",
            AriaType::TokenList(&["copy", "execute", "link", "move", "none", "popup"]),
        ),
        ("aria-errormessage", AriaType::Id),
        ("aria-expanded", AriaType::Boolean),
        ("aria-flowto", AriaType::IdList),
        ("aria-grabbed", AriaType::Boolean),
        (
            "aria-haspopup",
            AriaType::Token(&["false", "true", "menu", "listbox", "tree", "grid", "dialog"]),
        ),
        ("aria-hidden", AriaType::Boolean),
        (
            "aria-invalid",
            AriaType::Token(&["grammar", "false", "spelling", "true"]),
        ),
        ("aria-keyshortcuts", AriaType::String),
        ("aria-label", AriaType::String),
        ("aria-labelledby", AriaType::IdList),
        ("aria-level", AriaType::Integer),
        (
            "aria-live",
            AriaType::Token(&["assertive", "off", "polite"]),
        ),
        ("aria-modal", AriaType::Boolean),
        ("aria-multiline", AriaType::Boolean),
        ("aria-multiselectable", AriaType::Boolean),
        (
            "aria-orientation",
            AriaType::Token(&["vertical", "undefined", "horizontal"]),
        ),
        ("aria-owns", AriaType::IdList),
        ("aria-placeholder", AriaType::String),
        ("aria-posinset", AriaType::Integer),
        ("aria-pressed", AriaType::Tristate),
        ("aria-readonly", AriaType::Boolean),
        (
            "aria-relevant",
            AriaType::TokenList(&["additions", "all", "removals", "text"]),
        ),
        ("aria-required", AriaType::Boolean),
        ("aria-roledescription", AriaType::String),
        ("aria-rowcount", AriaType::Integer),
        ("aria-rowindex", AriaType::Integer),
        ("aria-rowspan", AriaType::Integer),
        ("aria-selected", AriaType::Boolean),
        ("aria-setsize", AriaType::Integer),
        (
            "aria-sort",
            AriaType::Token(&["ascending", "descending", "none", "other"]),
        ),
        ("aria-valuemax", AriaType::Number),
        ("aria-valuemin", AriaType::Number),
        ("aria-valuenow", AriaType::Number),
        ("aria-valuetext", AriaType::String),
    ]
    .into_iter()
    .collect();

    /// Concrete (non-abstract) WAI-ARIA roles.
    pub static ref ARIA_ROLES: HashSet<&'static str> = [
        "alert", "alertdialog", "application", "article", "banner", "blockquote",
        "button", "caption", "cell", "checkbox", "code", "columnheader", "combobox",
        "complementary", "contentinfo", "definition", "deletion", "dialog",
        "directory", "document", "emphasis", "feed", "figure", "form", "generic",
        "grid", "gridcell", "group", "heading", "img", "insertion", "link", "list",
        "listbox", "listitem", "log", "main", "marquee", "math", "menu", "menubar",
        "menuitem", "menuitemcheckbox", "menuitemradio", "meter", "navigation",
        "none", "note", "option", "paragraph", "presentation", "progressbar",
        "radio", "radiogroup", "region", "row", "rowgroup", "rowheader",
        "scrollbar", "search", "searchbox", "separator", "slider", "spinbutton",
        "status", "strong", "subscript", "superscript", "switch", "tab", "table",
        "tablist", "tabpanel", "term", "textbox", "time", "timer", "toolbar",
        "tooltip", "tree", "treegrid", "treeitem",
    ]
    .into_iter()
    .collect();

    /// Abstract roles exist for the ontology only and must not be used.
    pub static ref ABSTRACT_ROLES: HashSet<&'static str> = [
        "command", "composite", "input", "landmark", "range", "roletype",
        "section", "sectionhead", "select", "structure", "widget", "window",
    ]
    .into_iter()
    .collect();

    /// Implicit role per tag; writing the same role explicitly is redundant.
    pub static ref IMPLICIT_ROLES: HashMap<&'static str, &'static str> = [
        ("a", "link"), ("area", "link"), ("article", "article"),
        ("aside", "complementary"), ("body", "document"), ("button", "button"),
        ("datalist", "listbox"), ("dd", "definition"), ("dfn", "term"),
        ("details", "group"), ("dialog", "dialog"), ("dt", "term"),
        ("fieldset", "group"), ("figure", "figure"), ("form", "form"),
        ("h1", "heading"), ("h2", "heading"), ("h3", "heading"),
        ("h4", "heading"), ("h5", "heading"), ("h6", "heading"),
        ("hr", "separator"), ("img", "img"), ("li", "listitem"),
        ("link", "link"), ("main", "main"), ("menu", "list"),
        ("meter", "progressbar"), ("nav", "navigation"), ("ol", "list"),
        ("optgroup", "group"), ("option", "option"), ("output", "status"),
        ("progress", "progressbar"), ("section", "region"), ("select", "combobox"),
        ("table", "table"), ("tbody", "rowgroup"), ("textarea", "textbox"),
        ("tfoot", "rowgroup"), ("thead", "rowgroup"), ("tr", "row"),
        ("ul", "list"),
    ]
    .into_iter()
    .collect();

    /// Implicit roles that only apply when the element is not nested in a
    /// sectioning ancestor.
    pub static ref NESTED_IMPLICIT_ROLES: HashMap<&'static str, &'static str> =
        [("header", "banner"), ("footer", "contentinfo")].into_iter().collect();

    /// Companion attributes a role requires.
    pub static ref REQUIRED_ROLE_PROPS: HashMap<&'static str, &'static [&'static str]> = [
        ("checkbox", &["aria-checked"] as &[&str]),
        ("combobox", &["aria-expanded"]),
        ("heading", &["aria-level"]),
        ("menuitemcheckbox", &["aria-checked"]),
        ("menuitemradio", &["aria-checked"]),
        ("meter", &["aria-valuenow"]),
        ("option", &["aria-selected"]),
        ("radio", &["aria-checked"]),
        ("scrollbar", &["aria-controls", "aria-valuenow"]),
        ("slider", &["aria-valuenow"]),
        ("switch", &["aria-checked"]),
    ]
    .into_iter()
    .collect();

    /// Roles conveying interactivity to assistive technology.
    pub static ref INTERACTIVE_ROLES: HashSet<&'static str> = [
        "button", "checkbox", "columnheader", "combobox", "grid", "gridcell",
        "link", "listbox", "menu", "menubar", "menuitem", "menuitemcheckbox",
        "menuitemradio", "option", "progressbar", "radio", "radiogroup", "row",
        "rowheader", "scrollbar", "searchbox", "slider", "spinbutton", "switch",
        "tab", "tablist", "textbox", "tree", "treegrid", "treeitem",
    ]
    .into_iter()
    .collect();

    /// Roles explicitly conveying non-interactivity.
    pub static ref NON_INTERACTIVE_ROLES: HashSet<&'static str> = [
        "alert", "article", "banner", "blockquote", "caption", "code",
        "complementary", "contentinfo", "definition", "deletion", "directory",
        "document", "emphasis", "feed", "figure", "generic", "group", "heading",
        "img", "insertion", "list", "listitem", "log", "main", "marquee", "math",
        "navigation", "none", "note", "paragraph", "presentation", "region",
        "status", "strong", "subscript", "superscript", "table", "tabpanel",
        "term", "time", "timer", "tooltip",
    ]
    .into_iter()
    .collect();

    /// Roles removing semantics altogether.
    pub static ref PRESENTATION_ROLES: HashSet<&'static str> =
        ["presentation", "none"].into_iter().collect();
}

/// Closest known candidate for an unknown name, for "did you mean"
/// suggestions. Conservative threshold so wild typos get no suggestion.
pub fn fuzzy_suggest(unknown: &str, candidates: &HashSet<&'static str>) -> Option<&'static str> {
    const THRESHOLD: f64 = 0.8;
    let mut best: Option<(&'static str, f64)> = None;
    for candidate in candidates {
        let similarity = strsim::jaro_winkler(unknown, candidate);
        if similarity >= THRESHOLD && best.map_or(true, |(_, s)| similarity > s) {
            best = Some((candidate, similarity));
        }
    }
    best.map(|(c, _)| c)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_acceptance() {
        assert!(AriaType::Boolean.accepts("true"));
        assert!(!AriaType::Boolean.accepts("yes"));
        assert!(AriaType::Tristate.accepts("mixed"));
        assert!(AriaType::Integer.accepts("3"));
        assert!(!AriaType::Integer.accepts("3.5"));
        assert!(AriaType::Number.accepts("3.5"));
        assert!(AriaType::Token(&["page", "step"]).accepts("page"));
        assert!(!AriaType::Token(&["page", "step"]).accepts("chapter"));
        assert!(AriaType::TokenList(&["additions", "text"]).accepts("additions text"));
        assert!(!AriaType::TokenList(&["additions", "text"]).accepts("additions bogus"));
    }

    #[test]
    fn test_known_attribute_lookup() {
        assert_eq!(
            ARIA_ATTRIBUTES.get("aria-checked"),
            Some(&AriaType::Tristate)
        );
        assert!(ARIA_ATTRIBUTES.get("aria-checkd").is_none());
    }

    #[test]
    fn test_fuzzy_suggestion_for_close_typo() {
        let suggestion = fuzzy_suggest("aria-labeledby", &{
            ARIA_ATTRIBUTES.keys().copied().collect()
        });
        assert_eq!(suggestion, Some("aria-labelledby"));
    }

    #[test]
    fn test_fuzzy_suggestion_declines_garbage() {
        assert_eq!(fuzzy_suggest("zzzzqqq", &ARIA_ROLES), None);
    }

    #[test]
    fn test_role_partitions_are_disjoint() {
        for role in ABSTRACT_ROLES.iter() {
            assert!(!ARIA_ROLES.contains(role), "{} is both abstract and concrete", role);
        }
    }
}
