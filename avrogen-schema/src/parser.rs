//! Avro JSON schema parser.
//!
//! This module parses Avro schema documents (`.avsc`) into the [`Schema`]
//! graph. Named types are registered before their bodies are parsed, so a
//! record can refer to itself, and every later use of a name becomes a
//! [`Schema::Ref`] instead of a second definition.

use crate::error::ParseError;
use crate::types::{
    EnumSchema, FixedSchema, Name, NamedKind, PrimitiveSchema, PrimitiveType, RecordField,
    RecordSchema, Reference, Schema, UnionSchema,
};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::path::Path;

/// Field attributes with a meaning defined by Avro; everything else is a property.
const RESERVED_FIELD_ATTRS: &[&str] = &["name", "type", "doc", "default", "order", "aliases"];

/// Parses an Avro schema from a JSON string.
///
/// # Arguments
/// * `json` - Schema document content
///
/// # Returns
/// Parsed schema or parse error.
///
/// # Errors
/// Returns `ParseError` if the JSON is malformed or describes an invalid schema.
pub fn parse_schema(json: &str) -> Result<Schema, ParseError> {
    let value: Value = serde_json::from_str(json)?;
    parse_value(&value)
}

/// Parses an Avro schema from an already decoded JSON value.
///
/// # Errors
/// Returns `ParseError` if the value does not describe a valid schema.
pub fn parse_value(value: &Value) -> Result<Schema, ParseError> {
    SchemaParser::default().parse(value, None)
}

/// Parses an Avro schema from a file.
///
/// # Errors
/// Returns `ParseError` if reading or parsing fails.
pub fn parse_file(path: &Path) -> Result<Schema, ParseError> {
    let json = std::fs::read_to_string(path)?;
    parse_schema(&json)
}

/// Parser state: the named types defined so far, by full name.
#[derive(Debug, Default)]
struct SchemaParser {
    named: HashMap<String, NamedKind>,
}

impl SchemaParser {
    /// Parses any schema form within the given enclosing namespace.
    fn parse(&mut self, value: &Value, enclosing: Option<&str>) -> Result<Schema, ParseError> {
        match value {
            Value::String(name) => self.parse_type_name(name, enclosing),
            Value::Array(variants) => self.parse_union(variants, enclosing),
            Value::Object(obj) => self.parse_object(obj, enclosing),
            other => Err(ParseError::structure(format!(
                "expected a schema, found {other}"
            ))),
        }
    }

    /// Parses a bare type name: a primitive or a reference to a named type.
    fn parse_type_name(&self, name: &str, enclosing: Option<&str>) -> Result<Schema, ParseError> {
        if name == "null" {
            return Ok(Schema::Null);
        }
        if let Some(kind) = PrimitiveType::from_avro_name(name) {
            return Ok(Schema::Primitive(PrimitiveSchema::new(kind)));
        }

        self.lookup(name, enclosing)
            .map(Schema::Ref)
            .ok_or_else(|| ParseError::unknown_type(name, "type reference"))
    }

    /// Looks up a named type, first relative to the enclosing namespace.
    fn lookup(&self, name: &str, enclosing: Option<&str>) -> Option<Reference> {
        let relative = Name::resolve(name, None, enclosing);
        let absolute = Name::resolve(name, None, None);

        [relative, absolute].into_iter().find_map(|candidate| {
            self.named
                .get(&candidate.fullname())
                .map(|&kind| Reference::new(candidate, kind))
        })
    }

    fn parse_union(
        &mut self,
        variants: &[Value],
        enclosing: Option<&str>,
    ) -> Result<Schema, ParseError> {
        let variants = variants
            .iter()
            .map(|v| self.parse(v, enclosing))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Schema::Union(UnionSchema::new(variants)))
    }

    fn parse_object(
        &mut self,
        obj: &Map<String, Value>,
        enclosing: Option<&str>,
    ) -> Result<Schema, ParseError> {
        let type_value = obj
            .get("type")
            .ok_or_else(|| ParseError::missing_attr("schema object", "type"))?;

        let type_name = match type_value {
            Value::String(s) => s.as_str(),
            // {"type": {...}} and {"type": [...]} wrap a full schema
            nested => return self.parse(nested, enclosing),
        };

        match type_name {
            "record" | "error" => self.parse_record(obj, enclosing),
            "enum" => self.parse_enum(obj, enclosing),
            "fixed" => self.parse_fixed(obj, enclosing),
            "array" => {
                let items = obj
                    .get("items")
                    .ok_or_else(|| ParseError::missing_attr("array", "items"))?;
                Ok(Schema::Array(Box::new(self.parse(items, enclosing)?)))
            }
            "map" => {
                let values = obj
                    .get("values")
                    .ok_or_else(|| ParseError::missing_attr("map", "values"))?;
                Ok(Schema::Map(Box::new(self.parse(values, enclosing)?)))
            }
            "null" => Ok(Schema::Null),
            other => match PrimitiveType::from_avro_name(other) {
                Some(kind) => Ok(Schema::Primitive(PrimitiveSchema {
                    kind,
                    logical_type: optional_str(obj, "logicalType").map(str::to_string),
                })),
                None => self.parse_type_name(other, enclosing),
            },
        }
    }

    /// Registers a named type and returns its resolved name.
    fn define(
        &mut self,
        obj: &Map<String, Value>,
        element: &str,
        enclosing: Option<&str>,
        kind: NamedKind,
    ) -> Result<Name, ParseError> {
        let raw = required_str(obj, "name", element)?;
        let name = Name::resolve(raw, optional_str(obj, "namespace"), enclosing);
        let fullname = name.fullname();

        if self.named.contains_key(&fullname) {
            return Err(ParseError::duplicate(element, fullname));
        }
        self.named.insert(fullname, kind);

        Ok(name)
    }

    fn parse_record(
        &mut self,
        obj: &Map<String, Value>,
        enclosing: Option<&str>,
    ) -> Result<Schema, ParseError> {
        let name = self.define(obj, "record", enclosing, NamedKind::Record)?;
        let namespace = name.namespace.clone();

        let fields_value = obj
            .get("fields")
            .ok_or_else(|| ParseError::missing_attr("record", "fields"))?;
        let fields = fields_value
            .as_array()
            .ok_or_else(|| ParseError::invalid_attr("record", "fields", fields_value.to_string()))?;

        let mut record = RecordSchema::new(name);
        record.doc = optional_str(obj, "doc").map(str::to_string);

        for field in fields {
            let field = self.parse_field(field, namespace.as_deref())?;
            record.add_field(field);
        }

        Ok(Schema::Record(record))
    }

    fn parse_field(
        &mut self,
        value: &Value,
        enclosing: Option<&str>,
    ) -> Result<RecordField, ParseError> {
        let obj = value
            .as_object()
            .ok_or_else(|| ParseError::structure(format!("record field must be an object, found {value}")))?;

        let name = required_str(obj, "name", "field")?;
        let type_value = obj
            .get("type")
            .ok_or_else(|| ParseError::missing_attr(format!("field '{name}'"), "type"))?;

        let mut field = RecordField::new(name, self.parse(type_value, enclosing)?);
        field.doc = optional_str(obj, "doc").map(str::to_string);
        field.default = obj.get("default").cloned();

        for (key, prop) in obj {
            if !RESERVED_FIELD_ATTRS.contains(&key.as_str()) {
                field.props.insert(key.clone(), prop.clone());
            }
        }

        Ok(field)
    }

    fn parse_enum(
        &mut self,
        obj: &Map<String, Value>,
        enclosing: Option<&str>,
    ) -> Result<Schema, ParseError> {
        let name = self.define(obj, "enum", enclosing, NamedKind::Enum)?;

        let symbols_value = obj
            .get("symbols")
            .ok_or_else(|| ParseError::missing_attr("enum", "symbols"))?;
        let symbols = symbols_value
            .as_array()
            .and_then(|symbols| {
                symbols
                    .iter()
                    .map(|s| s.as_str().map(str::to_string))
                    .collect::<Option<Vec<_>>>()
            })
            .ok_or_else(|| ParseError::invalid_attr("enum", "symbols", symbols_value.to_string()))?;

        Ok(Schema::Enum(EnumSchema {
            name,
            doc: optional_str(obj, "doc").map(str::to_string),
            symbols,
        }))
    }

    fn parse_fixed(
        &mut self,
        obj: &Map<String, Value>,
        enclosing: Option<&str>,
    ) -> Result<Schema, ParseError> {
        let size_value = obj
            .get("size")
            .ok_or_else(|| ParseError::missing_attr("fixed", "size"))?;
        let size = size_value
            .as_u64()
            .and_then(|size| usize::try_from(size).ok())
            .ok_or_else(|| ParseError::invalid_attr("fixed", "size", size_value.to_string()))?;

        let name = self.define(obj, "fixed", enclosing, NamedKind::Fixed(size))?;

        Ok(Schema::Fixed(FixedSchema {
            name,
            size,
            logical_type: optional_str(obj, "logicalType").map(str::to_string),
        }))
    }
}

/// Reads a required string attribute.
fn required_str<'a>(
    obj: &'a Map<String, Value>,
    attribute: &str,
    element: &str,
) -> Result<&'a str, ParseError> {
    match obj.get(attribute) {
        Some(Value::String(s)) => Ok(s),
        Some(other) => Err(ParseError::invalid_attr(element, attribute, other.to_string())),
        None => Err(ParseError::missing_attr(element, attribute)),
    }
}

/// Reads an optional string attribute; non-string values are ignored.
fn optional_str<'a>(obj: &'a Map<String, Value>, attribute: &str) -> Option<&'a str> {
    obj.get(attribute).and_then(Value::as_str)
}
