//! Prelude module for convenient imports.
//!
//! ```ignore
//! use avrogen::prelude::*;
//! ```

// Schema types
pub use avrogen_schema::{
    Name, ParseError, RecordField, RecordSchema, Schema, SchemaError, parse_file, parse_schema,
    validate_schema,
};

// Generation
pub use avrogen_codegen::{
    CodegenError, GenConfig, Generator, TypeExpr, generate, generate_from_file, generate_from_str,
};
