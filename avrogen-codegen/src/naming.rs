//! Identifier conventions for generated code.

use avrogen_schema::Name;
use heck::{ToSnakeCase, ToUpperCamelCase};

/// Rust keywords that can be used as raw identifiers.
const KEYWORDS: &[&str] = &[
    "abstract", "as", "async", "await", "become", "box", "break", "const", "continue", "do",
    "dyn", "else", "enum", "extern", "false", "final", "fn", "for", "gen", "if", "impl", "in",
    "let", "loop", "macro", "match", "mod", "move", "mut", "override", "priv", "pub", "ref",
    "return", "static", "struct", "trait", "true", "try", "type", "typeof", "unsafe", "unsized",
    "use", "virtual", "where", "while", "yield",
];

/// Keywords that cannot be raw identifiers.
const RESERVED: &[&str] = &["self", "Self", "super", "crate", "_"];

/// Converts a string to snake_case.
#[must_use]
pub fn to_snake_case(s: &str) -> String {
    s.to_snake_case()
}

/// Converts a string to PascalCase.
#[must_use]
pub fn to_pascal_case(s: &str) -> String {
    s.to_upper_camel_case()
}

/// Returns the struct identifier for a named schema type.
///
/// The namespace is dropped; only the simple name is converted.
#[must_use]
pub fn type_ident(name: &Name) -> String {
    escape(to_pascal_case(&name.name))
}

/// Returns the struct field identifier for a schema field name.
#[must_use]
pub fn field_ident(name: &str) -> String {
    escape(to_snake_case(name))
}

/// Returns the module identifier for a configured module name, if usable.
#[must_use]
pub fn module_ident(name: &str) -> Option<String> {
    let ident = to_snake_case(name);
    let usable = ident
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && ident.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');

    usable.then(|| escape(ident))
}

/// Makes an identifier safe to use where a keyword would be rejected.
fn escape(ident: String) -> String {
    if ident.is_empty() || RESERVED.contains(&ident.as_str()) {
        format!("{ident}_")
    } else if KEYWORDS.contains(&ident.as_str()) {
        format!("r#{ident}")
    } else {
        ident
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_snake_case() {
        assert_eq!(to_snake_case("someString"), "some_string");
        assert_eq!(to_snake_case("aLongTimestampMillis"), "a_long_timestamp_millis");
        assert_eq!(to_snake_case("already_snake"), "already_snake");
    }

    #[test]
    fn test_to_pascal_case() {
        assert_eq!(to_pascal_case("test"), "Test");
        assert_eq!(to_pascal_case("inner_record"), "InnerRecord");
        assert_eq!(to_pascal_case("RecordInMap"), "RecordInMap");
    }

    #[test]
    fn test_type_ident_drops_namespace() {
        let name = Name::resolve("a.b.test", None, None);
        assert_eq!(type_ident(&name), "Test");
    }

    #[test]
    fn test_type_ident_self() {
        assert_eq!(type_ident(&Name::new("self")), "Self_");
    }

    #[test]
    fn test_field_ident_keywords() {
        assert_eq!(field_ident("type"), "r#type");
        assert_eq!(field_ident("match"), "r#match");
        assert_eq!(field_ident("self"), "self_");
        assert_eq!(field_ident("crate"), "crate_");
        assert_eq!(field_ident("someInt"), "some_int");
    }

    #[test]
    fn test_field_ident_parses_as_rust() {
        for name in ["type", "self", "aString", "loop", "super"] {
            let ident = field_ident(name);
            let parsed: Result<syn::Ident, _> = syn::parse_str(&ident);
            assert!(parsed.is_ok(), "{ident} is not a valid identifier");
        }
    }

    #[test]
    fn test_module_ident() {
        assert_eq!(module_ident("Something").as_deref(), Some("something"));
        assert_eq!(module_ident("my-package").as_deref(), Some("my_package"));
        assert_eq!(module_ident("mod").as_deref(), Some("r#mod"));
        assert_eq!(module_ident(""), None);
        assert_eq!(module_ident("9lives"), None);
    }
}
