//! # avrogen Codegen
//!
//! Rust type generation from Avro schemas.
//!
//! This crate provides:
//! - Type resolution from schema nodes to Rust types
//! - Struct generation with serde field tags
//! - Optional Avro binary encoder helpers for the root record
//! - Validated, pretty-printed output

pub mod accumulator;
pub mod config;
pub mod emitter;
pub mod error;
pub mod generator;
pub mod naming;
pub mod resolver;
pub mod rust;

pub use accumulator::{Accumulator, ResolvedField, TypeDecl};
pub use config::GenConfig;
pub use error::CodegenError;
pub use generator::Generator;
pub use rust::TypeExpr;

use std::io::Write;
use std::path::Path;

/// Generates Rust code from an Avro schema and writes it to a sink.
///
/// Nothing is written unless the whole generation succeeds.
///
/// # Arguments
/// * `json` - Avro schema document
/// * `out` - Destination for the generated source
/// * `config` - Generation options
///
/// # Errors
/// Returns `CodegenError` if parsing, validation, generation or writing fails.
pub fn generate(json: &str, out: &mut impl Write, config: &GenConfig) -> Result<(), CodegenError> {
    let code = generate_from_str(json, config)?;
    out.write_all(code.as_bytes())?;
    Ok(())
}

/// Generates Rust code from an Avro schema string.
///
/// # Arguments
/// * `json` - Avro schema document
/// * `config` - Generation options
///
/// # Returns
/// Generated Rust code as a string.
///
/// # Errors
/// Returns `CodegenError` if parsing, validation or generation fails.
pub fn generate_from_str(json: &str, config: &GenConfig) -> Result<String, CodegenError> {
    let schema = avrogen_schema::parse_schema(json)?;
    avrogen_schema::validate_schema(&schema)?;
    Generator::new(config).generate(&schema)
}

/// Generates Rust code from an Avro schema file.
///
/// # Arguments
/// * `path` - Path to the `.avsc` file
/// * `config` - Generation options
///
/// # Returns
/// Generated Rust code as a string.
///
/// # Errors
/// Returns `CodegenError` if reading, parsing, validation or generation fails.
pub fn generate_from_file(path: &Path, config: &GenConfig) -> Result<String, CodegenError> {
    let json = std::fs::read_to_string(path)?;
    generate_from_str(&json, config)
}

#[cfg(test)]
mod tests {
    use super::*;

    const GOLDEN_SCHEMA: &str = r#"{
        "type": "record",
        "name": "a.b.test",
        "doc": "Test is a test struct",
        "fields": [
            {"name": "someString", "type": "string", "doc": "SomeString is a string"},
            {"name": "someInt", "type": "int"},
            {"name": "someArray", "type": {"type": "array", "items": "string"}},
            {"name": "someMap", "type": {"type": "map", "values": "long"}},
            {"name": "someNullableString", "type": ["null", "string"]},
            {"name": "someNullableArray", "type": ["null", {"type": "array", "items": "string"}]},
            {"name": "someRecord", "type": {
                "type": "record",
                "name": "InnerRecord",
                "fields": [{"name": "innerInt", "type": "int"}]
            }},
            {"name": "someDate", "type": "int", "logicalType": "date"},
            {"name": "someDecimal", "type": "bytes", "logicalType": "decimal", "precision": 4, "scale": 2},
            {"name": "someUnion", "type": ["string", "int"]},
            {"name": "someFixed", "type": {"type": "fixed", "name": "Md5", "size": 16}}
        ]
    }"#;

    /// Non-blank lines, trimmed, so the comparison ignores item spacing.
    fn significant_lines(code: &str) -> Vec<&str> {
        code.lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect()
    }

    fn generate_default(json: &str) -> Result<String, CodegenError> {
        generate_from_str(json, &GenConfig::default())
    }

    #[test]
    fn test_golden_output() {
        let code = generate_from_str(GOLDEN_SCHEMA, &GenConfig::new("something"))
            .expect("Failed to generate");

        let expected = r#"// Code generated by avrogen. DO NOT EDIT.

pub mod something {
    use std::time;
    use num_rational::BigRational;
    #[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
    pub struct InnerRecord {
        #[serde(rename = "innerInt")]
        pub inner_int: i32,
    }
    /// Test is a test struct
    #[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
    pub struct Test {
        /// SomeString is a string
        #[serde(rename = "someString")]
        pub some_string: String,
        #[serde(rename = "someInt")]
        pub some_int: i32,
        #[serde(rename = "someArray")]
        pub some_array: Vec<String>,
        #[serde(rename = "someMap")]
        pub some_map: std::collections::HashMap<String, i64>,
        #[serde(rename = "someNullableString")]
        pub some_nullable_string: Option<String>,
        #[serde(rename = "someNullableArray")]
        pub some_nullable_array: Vec<String>,
        #[serde(rename = "someRecord")]
        pub some_record: InnerRecord,
        #[serde(rename = "someDate")]
        pub some_date: time::SystemTime,
        #[serde(rename = "someDecimal")]
        pub some_decimal: BigRational,
        #[serde(rename = "someUnion")]
        pub some_union: serde_json::Value,
        #[serde(rename = "someFixed")]
        pub some_fixed: [u8; 16],
    }
}
"#;
        assert_eq!(significant_lines(&code), significant_lines(expected));
    }

    #[test]
    fn test_generate_is_deterministic() {
        let first = generate_default(GOLDEN_SCHEMA).expect("Failed to generate");
        let second = generate_default(GOLDEN_SCHEMA).expect("Failed to generate");
        assert_eq!(first, second);
    }

    #[test]
    fn test_no_imports_without_logical_types() {
        let code = generate_default(
            r#"{"type":"record","name":"T","fields":[{"name":"a","type":"long"}]}"#,
        )
        .expect("Failed to generate");

        assert!(!code.contains("use "));
        assert!(code.contains("pub a: i64,"));
    }

    #[test]
    fn test_two_record_union() {
        let json = r#"{"type":"record","name":"Holder","fields":[{"name":"either","type":[
            {"type":"record","name":"Record1","fields":[{"name":"aString","type":"string"}]},
            {"type":"record","name":"Record2","fields":[{"name":"aString","type":"string"}]}
        ]}]}"#;
        let code = generate_default(json).expect("Failed to generate");

        assert!(code.contains("pub struct Record1 {"));
        assert!(code.contains("pub struct Record2 {"));
        assert!(code.contains("pub either: serde_json::Value,"));
    }

    #[test]
    fn test_shared_record_emitted_once() {
        let json = r#"{"type":"record","name":"Outer","fields":[
            {"name":"a","type":{"type":"record","name":"Inner","fields":[{"name":"x","type":"int"}]}},
            {"name":"b","type":{"type":"map","values":"Inner"}}
        ]}"#;
        let code = generate_default(json).expect("Failed to generate");

        assert_eq!(code.matches("pub struct Inner {").count(), 1);
        assert!(code.contains("pub b: std::collections::HashMap<String, Inner>,"));
    }

    #[test]
    fn test_recursive_record() {
        let json = r#"{"type":"record","name":"LinkedList","fields":[
            {"name":"value","type":"int"},
            {"name":"next","type":["null","LinkedList"]}
        ]}"#;
        let code = generate_default(json).expect("Failed to generate");

        assert!(code.contains("pub next: Option<Box<LinkedList>>,"));
    }

    #[test]
    fn test_generate_errors() {
        assert!(matches!(
            generate_default("{"),
            Err(CodegenError::Parse(_))
        ));
        assert!(matches!(
            generate_default(r#"{"type":"enum","name":"E","symbols":["A"]}"#),
            Err(CodegenError::RootNotRecord { .. })
        ));
        assert!(matches!(
            generate_default(
                r#"{"type":"record","name":"T","fields":[{"name":"a","type":"int"},{"name":"a","type":"int"}]}"#
            ),
            Err(CodegenError::Schema(_))
        ));
    }

    #[test]
    fn test_identifier_collisions_rejected() {
        let records = r#"{"type":"record","name":"X","namespace":"a","fields":[
            {"name":"other","type":["null",{"type":"record","name":"X","namespace":"b","fields":[
                {"name":"y","type":{"type":"record","name":"Y","fields":[{"name":"v","type":"int"}]}}
            ]}]},
            {"name":"again","type":"b.Y"}
        ]}"#;
        let err = generate_default(records).expect_err("records collide");
        assert_eq!(
            err.to_string(),
            "'a.X' and 'b.X' both map to the Rust identifier 'X'"
        );

        let fields = r#"{"type":"record","name":"T","fields":[
            {"name":"someString","type":"string"},
            {"name":"some_string","type":"string"}
        ]}"#;
        let err = generate_default(fields).expect_err("fields collide");
        assert_eq!(
            err.to_string(),
            "'T.someString' and 'T.some_string' both map to the Rust identifier 'some_string'"
        );
        assert!(err.is_input_error());
    }

    #[test]
    fn test_generate_writes_only_on_success() {
        let mut out = Vec::new();
        let result = generate(r#""string""#, &mut out, &GenConfig::default());
        assert!(result.is_err());
        assert!(out.is_empty());

        generate(
            r#"{"type":"record","name":"T","fields":[]}"#,
            &mut out,
            &GenConfig::default(),
        )
        .expect("Failed to generate");
        let written = String::from_utf8(out).expect("utf-8 output");
        assert!(written.starts_with(emitter::GENERATED_NOTICE));
    }

    #[test]
    fn test_generate_from_file() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("test.avsc");
        std::fs::write(&path, GOLDEN_SCHEMA).expect("Failed to write schema");

        let code = generate_from_file(&path, &GenConfig::default()).expect("Failed to generate");
        assert!(code.contains("pub struct Test {"));

        let missing = generate_from_file(&dir.path().join("missing.avsc"), &GenConfig::default());
        assert!(matches!(missing, Err(CodegenError::Io(_))));
    }
}
