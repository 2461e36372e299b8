//! # avrogen
//!
//! Generate serde-ready Rust structs from Avro schemas.
//!
//! Every record reachable from the root schema becomes one `pub struct`
//! whose fields carry `#[serde(rename)]` tags matching the Avro field names.
//! Output is emitted as a single module, validated and pretty-printed.
//!
//! ## Quick Start
//!
//! ```ignore
//! use avrogen::prelude::*;
//!
//! let schema = r#"{"type":"record","name":"a.b.test","fields":[
//!     {"name":"someString","type":"string"}
//! ]}"#;
//!
//! let code = generate_from_str(schema, &GenConfig::new("something"))?;
//! println!("{code}");
//! ```
//!
//! ## Crate Organization
//!
//! - [`schema`] - Avro schema parsing, validation and serialization
//! - [`codegen`] - Type resolution and Rust declaration emission

pub mod prelude;

/// Avro schema parsing and validation.
pub mod schema {
    pub use avrogen_schema::*;
}

/// Rust code generation from Avro schemas.
pub mod codegen {
    pub use avrogen_codegen::*;
}

// Re-export commonly used items at the crate root
pub use avrogen_codegen::{
    CodegenError, GenConfig, Generator, generate, generate_from_file, generate_from_str,
};
pub use avrogen_schema::{ParseError, Schema, SchemaError, parse_schema};

#[cfg(test)]
mod tests {
    use super::prelude::*;

    #[test]
    fn test_prelude_roundtrip_through_file() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("user.avsc");
        std::fs::write(
            &path,
            r#"{"type":"record","name":"com.example.User","fields":[
                {"name":"userName","type":"string"},
                {"name":"createdAt","type":{"type":"long","logicalType":"timestamp-millis"}}
            ]}"#,
        )
        .expect("Failed to write schema");

        let schema = parse_file(&path).expect("Failed to parse");
        validate_schema(&schema).expect("schema is valid");

        let config = GenConfig::new("users");
        let code = Generator::new(&config).generate(&schema).expect("Failed to generate");
        assert_eq!(
            code,
            generate_from_file(&path, &config).expect("Failed to generate")
        );
        assert!(code.contains("pub struct User {"));
        assert!(code.contains("pub created_at: time::SystemTime,"));
        assert!(code.contains("use std::time;"));
    }
}
