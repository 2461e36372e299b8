//! Schema serialization back to JSON.
//!
//! Named types are written with their full name. The first occurrence of a
//! named type carries its definition; references are written as the full name.

use crate::types::{PrimitiveSchema, RecordField, Schema};
use serde_json::{Map, Value, json};

/// Converts a schema to its JSON form.
#[must_use]
pub fn to_json(schema: &Schema) -> Value {
    match schema {
        Schema::Null => Value::from("null"),
        Schema::Primitive(primitive) => primitive_json(primitive),
        Schema::Record(record) => {
            let mut obj = Map::new();
            obj.insert("type".into(), Value::from("record"));
            obj.insert("name".into(), Value::from(record.name.fullname()));
            if let Some(doc) = &record.doc {
                obj.insert("doc".into(), Value::from(doc.as_str()));
            }
            let fields = record.fields.iter().map(field_json).collect();
            obj.insert("fields".into(), Value::Array(fields));
            Value::Object(obj)
        }
        Schema::Array(items) => json!({"type": "array", "items": to_json(items)}),
        Schema::Map(values) => json!({"type": "map", "values": to_json(values)}),
        Schema::Enum(enum_def) => {
            let mut obj = Map::new();
            obj.insert("type".into(), Value::from("enum"));
            obj.insert("name".into(), Value::from(enum_def.name.fullname()));
            if let Some(doc) = &enum_def.doc {
                obj.insert("doc".into(), Value::from(doc.as_str()));
            }
            obj.insert("symbols".into(), json!(enum_def.symbols));
            Value::Object(obj)
        }
        Schema::Fixed(fixed) => {
            let mut obj = Map::new();
            obj.insert("type".into(), Value::from("fixed"));
            obj.insert("name".into(), Value::from(fixed.name.fullname()));
            obj.insert("size".into(), Value::from(fixed.size));
            if let Some(logical) = &fixed.logical_type {
                obj.insert("logicalType".into(), Value::from(logical.as_str()));
            }
            Value::Object(obj)
        }
        Schema::Union(union) => Value::Array(union.variants.iter().map(to_json).collect()),
        Schema::Ref(reference) => Value::from(reference.name.fullname()),
    }
}

/// Converts a schema to a compact JSON string.
#[must_use]
pub fn to_json_string(schema: &Schema) -> String {
    to_json(schema).to_string()
}

fn primitive_json(primitive: &PrimitiveSchema) -> Value {
    let name = primitive.kind.avro_name();
    match &primitive.logical_type {
        Some(logical) => json!({"type": name, "logicalType": logical}),
        None => Value::from(name),
    }
}

fn field_json(field: &RecordField) -> Value {
    let mut obj = Map::new();
    obj.insert("name".into(), Value::from(field.name.as_str()));
    obj.insert("type".into(), to_json(&field.schema));
    if let Some(doc) = &field.doc {
        obj.insert("doc".into(), Value::from(doc.as_str()));
    }
    if let Some(default) = &field.default {
        obj.insert("default".into(), default.clone());
    }
    for (key, value) in &field.props {
        obj.insert(key.clone(), value.clone());
    }
    Value::Object(obj)
}
