//! Validity check for JavaScript import/export identifiers
//!
//! Import and export names end up as property accessors or export
//! statements in generated JS modules, so they must be legal ECMAScript
//! identifiers and not reserved words.

/// Reserved words that are never usable as identifiers, covering ES
/// keywords, future-reserved words, and the literal values.
const RESERVED_WORDS: &[&str] = &[
    "await",
    "break",
    "case",
    "catch",
    "class",
    "const",
    "continue",
    "debugger",
    "default",
    "delete",
    "do",
    "else",
    "enum",
    "export",
    "extends",
    "false",
    "finally",
    "for",
    "function",
    "if",
    "implements",
    "import",
    "in",
    "instanceof",
    "interface",
    "let",
    "new",
    "null",
    "package",
    "private",
    "protected",
    "public",
    "return",
    "static",
    "super",
    "switch",
    "this",
    "throw",
    "true",
    "try",
    "typeof",
    "var",
    "void",
    "while",
    "with",
    "yield",
];

/// Check whether `s` is usable as a named export/import identifier.
///
/// Rules (in priority order):
/// 1. Must be non-empty
/// 2. First character: ASCII letter, `_`, or `$`
/// 3. Remaining characters: ASCII alphanumeric, `_`, or `$`
/// 4. Must not be a reserved word
///
/// Pure predicate: no side effects, never panics.
pub fn is_valid_identifier(s: &str) -> bool {
    let mut chars = s.chars();

    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }

    if !chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$') {
        return false;
    }

    !RESERVED_WORDS.contains(&s)
}
