//! Schema validation utilities.
//!
//! This module checks the structural rules Avro places on a parsed schema
//! (names, field and symbol uniqueness, union shape) before it is handed to
//! code generation.

use crate::error::SchemaError;
use crate::types::{EnumSchema, Name, RecordSchema, Schema, UnionSchema};
use std::collections::HashSet;

/// Validates a parsed schema for correctness.
///
/// # Arguments
/// * `schema` - The schema to validate
///
/// # Returns
/// Ok(()) if valid, or SchemaError describing the first issue found.
///
/// # Errors
/// Returns `SchemaError` if validation fails.
pub fn validate_schema(schema: &Schema) -> Result<(), SchemaError> {
    match schema {
        Schema::Record(record) => validate_record(record),
        Schema::Enum(enum_def) => validate_enum(enum_def),
        Schema::Fixed(fixed) => validate_name(&fixed.name, "fixed"),
        Schema::Array(items) => validate_schema(items),
        Schema::Map(values) => validate_schema(values),
        Schema::Union(union) => validate_union(union),
        Schema::Null | Schema::Primitive(_) | Schema::Ref(_) => Ok(()),
    }
}

/// Validates a record definition and its field types.
fn validate_record(record: &RecordSchema) -> Result<(), SchemaError> {
    validate_name(&record.name, "record")?;

    let mut seen = HashSet::new();
    for field in &record.fields {
        if !is_valid_identifier(&field.name) {
            return Err(SchemaError::InvalidName {
                kind: "field".to_string(),
                name: field.name.clone(),
            });
        }
        if !seen.insert(field.name.as_str()) {
            return Err(SchemaError::DuplicateField {
                record: record.name.fullname(),
                field: field.name.clone(),
            });
        }
        validate_schema(&field.schema)?;
    }

    Ok(())
}

/// Validates an enum type definition.
fn validate_enum(enum_def: &EnumSchema) -> Result<(), SchemaError> {
    validate_name(&enum_def.name, "enum")?;

    let mut seen = HashSet::new();
    for symbol in &enum_def.symbols {
        if !is_valid_identifier(symbol) {
            return Err(SchemaError::InvalidName {
                kind: "enum symbol".to_string(),
                name: symbol.clone(),
            });
        }
        if !seen.insert(symbol.as_str()) {
            return Err(SchemaError::DuplicateSymbol {
                enum_name: enum_def.name.fullname(),
                symbol: symbol.clone(),
            });
        }
    }

    Ok(())
}

/// Validates union shape: no directly nested unions and no repeated unnamed kinds.
fn validate_union(union: &UnionSchema) -> Result<(), SchemaError> {
    let mut seen_unnamed = HashSet::new();
    let mut seen_named = HashSet::new();

    for variant in &union.variants {
        if matches!(variant, Schema::Union(_)) {
            return Err(SchemaError::InvalidUnion {
                message: "unions may not immediately contain other unions".to_string(),
            });
        }

        let duplicate = match variant.name() {
            Some(name) => !seen_named.insert(name.fullname()),
            None => !seen_unnamed.insert(variant.kind_name()),
        };
        if duplicate {
            return Err(SchemaError::InvalidUnion {
                message: format!("duplicate '{}' alternative", variant.kind_name()),
            });
        }

        validate_schema(variant)?;
    }

    Ok(())
}

/// Validates the simple name and every namespace segment of a named type.
fn validate_name(name: &Name, kind: &str) -> Result<(), SchemaError> {
    let namespace_ok = name
        .namespace
        .as_deref()
        .is_none_or(|ns| ns.split('.').all(is_valid_identifier));

    if is_valid_identifier(&name.name) && namespace_ok {
        Ok(())
    } else {
        Err(SchemaError::InvalidName {
            kind: kind.to_string(),
            name: name.fullname(),
        })
    }
}

/// Returns true if `s` matches `[A-Za-z_][A-Za-z0-9_]*`.
fn is_valid_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
