//! Rendering dotted and bracketed property-access chains.

/// ECMAScript reserved words that cannot appear as bare `.name` accesses.
/// Must stay sorted: looked up via binary search.
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

/// Whether `name` can be written as a bare `.name` access.
pub fn is_safe_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    let first = match chars.next() {
        Some(c) => c,
        None => return false,
    };
    if !(first.is_ascii_alphabetic() || first == '_' || first == '$') {
        return false;
    }
    if !chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$') {
        return false;
    }
    RESERVED_WORDS.binary_search(&name).is_err()
}

/// Renders the access chain for `segments`: `.seg` for safe identifiers,
/// `["seg"]` with a quoted string literal otherwise. An empty slice renders
/// nothing.
pub fn property_access(segments: &[String]) -> String {
    let mut out = String::new();
    for segment in segments {
        if is_safe_identifier(segment) {
            out.push('.');
            out.push_str(segment);
        } else {
            out.push('[');
            out.push_str(&quote(segment));
            out.push(']');
        }
    }
    out
}

/// JSON string literal for `value`, matching consumer-side quoting.
pub(crate) fn quote(value: &str) -> String {
    // Serializing a string slice cannot fail.
    serde_json::to_string(value).unwrap_or_else(|_| format!("{:?}", value))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(segments: &[&str]) -> Vec<String> {
        segments.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_reserved_words_sorted() {
        let mut sorted = RESERVED_WORDS.to_vec();
        sorted.sort_unstable();
        assert_eq!(sorted, RESERVED_WORDS);
    }

    #[test]
    fn test_safe_identifiers() {
        assert!(is_safe_identifier("foo"));
        assert!(is_safe_identifier("_foo"));
        assert!(is_safe_identifier("$foo"));
        assert!(is_safe_identifier("foo2"));
        assert!(is_safe_identifier("fooBar_baz$"));
    }

    #[test]
    fn test_unsafe_identifiers() {
        assert!(!is_safe_identifier(""));
        assert!(!is_safe_identifier("2foo"));
        assert!(!is_safe_identifier("foo bar"));
        assert!(!is_safe_identifier("foo-bar"));
        assert!(!is_safe_identifier("naïve"));
        assert!(!is_safe_identifier("default"));
        assert!(!is_safe_identifier("class"));
        assert!(!is_safe_identifier("await"));
    }

    #[test]
    fn test_dot_access_chain() {
        assert_eq!(property_access(&names(&["foo"])), ".foo");
        assert_eq!(property_access(&names(&["foo", "bar"])), ".foo.bar");
    }

    #[test]
    fn test_bracket_access_for_unsafe_segments() {
        assert_eq!(property_access(&names(&["foo bar"])), "[\"foo bar\"]");
        assert_eq!(property_access(&names(&["default"])), "[\"default\"]");
        assert_eq!(
            property_access(&names(&["foo", "1", "bar"])),
            ".foo[\"1\"].bar"
        );
    }

    #[test]
    fn test_bracket_access_escapes_quotes() {
        assert_eq!(property_access(&names(&["a\"b"])), "[\"a\\\"b\"]");
    }

    #[test]
    fn test_empty_chain_renders_nothing() {
        assert_eq!(property_access(&[]), "");
    }
}
