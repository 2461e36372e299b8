//! # avrogen Schema
//!
//! Avro JSON schema parser and type definitions.
//!
//! This crate provides:
//! - Parsing of Avro schema documents (`.avsc`) into a typed schema graph
//! - Named-type de-duplication: repeat uses of a name become references
//! - Structural validation of parsed schemas
//! - Serialization of a parsed schema back to JSON

pub mod error;
pub mod parser;
pub mod types;
pub mod validation;
pub mod writer;

pub use error::{ParseError, SchemaError};
pub use parser::{parse_file, parse_schema, parse_value};
pub use types::{
    EnumSchema, FixedSchema, Name, NamedKind, PrimitiveSchema, PrimitiveType, RecordField,
    RecordSchema, Reference, Schema, UnionSchema,
};
pub use validation::validate_schema;
pub use writer::{to_json, to_json_string};
