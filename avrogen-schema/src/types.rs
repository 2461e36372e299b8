//! Schema type definitions.
//!
//! This module contains the data structures representing Avro schema nodes:
//! records, primitives, arrays, maps, enums, fixed blocks, unions and
//! references to previously defined named types.

use indexmap::IndexMap;
use serde_json::Value;

/// Avro schema node.
#[derive(Debug, Clone, PartialEq)]
pub enum Schema {
    /// The `null` type.
    Null,
    /// A primitive type, optionally refined by a logical type.
    Primitive(PrimitiveSchema),
    /// Record with named fields.
    Record(RecordSchema),
    /// Array of items.
    Array(Box<Schema>),
    /// Map with string keys.
    Map(Box<Schema>),
    /// Enumeration of symbols.
    Enum(EnumSchema),
    /// Fixed-size byte block.
    Fixed(FixedSchema),
    /// Union of alternatives.
    Union(UnionSchema),
    /// Reference to an already defined named type.
    Ref(Reference),
}

impl Schema {
    /// Returns the Avro type keyword of this node.
    #[must_use]
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Primitive(p) => p.kind.avro_name(),
            Self::Record(_) => "record",
            Self::Array(_) => "array",
            Self::Map(_) => "map",
            Self::Enum(_) => "enum",
            Self::Fixed(_) => "fixed",
            Self::Union(_) => "union",
            Self::Ref(_) => "reference",
        }
    }

    /// Returns the name of a named node (record, enum, fixed or reference).
    #[must_use]
    pub fn name(&self) -> Option<&Name> {
        match self {
            Self::Record(r) => Some(&r.name),
            Self::Enum(e) => Some(&e.name),
            Self::Fixed(f) => Some(&f.name),
            Self::Ref(r) => Some(&r.name),
            _ => None,
        }
    }

    /// Returns true if this is the `null` type.
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns true if this is a record definition.
    #[must_use]
    pub const fn is_record(&self) -> bool {
        matches!(self, Self::Record(_))
    }

    /// Returns the record definition if this node is one.
    #[must_use]
    pub fn as_record(&self) -> Option<&RecordSchema> {
        match self {
            Self::Record(r) => Some(r),
            _ => None,
        }
    }
}

/// Avro primitive kinds (excluding `null`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveType {
    /// UTF-8 string.
    String,
    /// Byte sequence.
    Bytes,
    /// 32-bit signed integer.
    Int,
    /// 64-bit signed integer.
    Long,
    /// Single precision float.
    Float,
    /// Double precision float.
    Double,
    /// Boolean.
    Boolean,
}

impl PrimitiveType {
    /// Parses a primitive type from its Avro name.
    #[must_use]
    pub fn from_avro_name(name: &str) -> Option<Self> {
        match name {
            "string" => Some(Self::String),
            "bytes" => Some(Self::Bytes),
            "int" => Some(Self::Int),
            "long" => Some(Self::Long),
            "float" => Some(Self::Float),
            "double" => Some(Self::Double),
            "boolean" => Some(Self::Boolean),
            _ => None,
        }
    }

    /// Returns the Avro name of the primitive.
    #[must_use]
    pub const fn avro_name(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Bytes => "bytes",
            Self::Int => "int",
            Self::Long => "long",
            Self::Float => "float",
            Self::Double => "double",
            Self::Boolean => "boolean",
        }
    }
}

/// Primitive schema node.
#[derive(Debug, Clone, PartialEq)]
pub struct PrimitiveSchema {
    /// Primitive kind.
    pub kind: PrimitiveType,
    /// Logical type declared on the type object itself.
    pub logical_type: Option<String>,
}

impl PrimitiveSchema {
    /// Creates a primitive without a logical type.
    #[must_use]
    pub const fn new(kind: PrimitiveType) -> Self {
        Self {
            kind,
            logical_type: None,
        }
    }

    /// Creates a primitive refined by a logical type.
    #[must_use]
    pub fn with_logical_type(kind: PrimitiveType, logical_type: impl Into<String>) -> Self {
        Self {
            kind,
            logical_type: Some(logical_type.into()),
        }
    }
}

/// Name of a named type, split into simple name and namespace.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Name {
    /// Simple name (last dotted segment).
    pub name: String,
    /// Namespace, if any.
    pub namespace: Option<String>,
}

impl Name {
    /// Creates a name without namespace.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespace: None,
        }
    }

    /// Resolves a possibly dotted name against an explicit or enclosing namespace.
    ///
    /// A dotted name carries its own namespace and ignores the others.
    #[must_use]
    pub fn resolve(raw: &str, namespace: Option<&str>, enclosing: Option<&str>) -> Self {
        if let Some((ns, simple)) = raw.rsplit_once('.') {
            return Self {
                name: simple.to_string(),
                namespace: (!ns.is_empty()).then(|| ns.to_string()),
            };
        }

        let namespace = namespace.or(enclosing).filter(|ns| !ns.is_empty());
        Self {
            name: raw.to_string(),
            namespace: namespace.map(str::to_string),
        }
    }

    /// Returns the dotted full name.
    #[must_use]
    pub fn fullname(&self) -> String {
        match &self.namespace {
            Some(ns) => format!("{}.{}", ns, self.name),
            None => self.name.clone(),
        }
    }
}

/// Record definition.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordSchema {
    /// Record name.
    pub name: Name,
    /// Documentation.
    pub doc: Option<String>,
    /// Fields in declaration order.
    pub fields: Vec<RecordField>,
}

impl RecordSchema {
    /// Creates an empty record.
    #[must_use]
    pub fn new(name: Name) -> Self {
        Self {
            name,
            doc: None,
            fields: Vec::new(),
        }
    }

    /// Appends a field.
    pub fn add_field(&mut self, field: RecordField) {
        self.fields.push(field);
    }
}

/// Field of a record.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordField {
    /// Field name as written in the schema.
    pub name: String,
    /// Field type.
    pub schema: Schema,
    /// Documentation.
    pub doc: Option<String>,
    /// Default value, kept verbatim.
    pub default: Option<Value>,
    /// Non-reserved attributes (e.g. `logicalType`).
    pub props: IndexMap<String, Value>,
}

impl RecordField {
    /// Creates a field without doc or properties.
    #[must_use]
    pub fn new(name: impl Into<String>, schema: Schema) -> Self {
        Self {
            name: name.into(),
            schema,
            doc: None,
            default: None,
            props: IndexMap::new(),
        }
    }

    /// Returns a property value.
    #[must_use]
    pub fn prop(&self, key: &str) -> Option<&Value> {
        self.props.get(key)
    }

    /// Returns the `logicalType` property if it is a string.
    #[must_use]
    pub fn logical_type(&self) -> Option<&str> {
        self.prop("logicalType").and_then(Value::as_str)
    }
}

/// Enum definition.
#[derive(Debug, Clone, PartialEq)]
pub struct EnumSchema {
    /// Enum name.
    pub name: Name,
    /// Documentation.
    pub doc: Option<String>,
    /// Symbols in declaration order.
    pub symbols: Vec<String>,
}

/// Fixed definition.
#[derive(Debug, Clone, PartialEq)]
pub struct FixedSchema {
    /// Fixed name.
    pub name: Name,
    /// Size in bytes.
    pub size: usize,
    /// Logical type (e.g. `duration`, `decimal`).
    pub logical_type: Option<String>,
}

/// Union of alternatives.
#[derive(Debug, Clone, PartialEq)]
pub struct UnionSchema {
    /// Alternatives in declaration order.
    pub variants: Vec<Schema>,
}

impl UnionSchema {
    /// Creates a union.
    #[must_use]
    pub fn new(variants: Vec<Schema>) -> Self {
        Self { variants }
    }

    /// Returns true if one alternative is `null`.
    #[must_use]
    pub fn is_nullable(&self) -> bool {
        self.variants.iter().any(Schema::is_null)
    }
}

/// Kind of the named type a reference points to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NamedKind {
    /// Record type.
    Record,
    /// Enum type.
    Enum,
    /// Fixed type with its size.
    Fixed(usize),
}

/// Reference to a named type defined earlier in the document.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Reference {
    /// Name of the referenced type.
    pub name: Name,
    /// Kind of the referenced type.
    pub kind: NamedKind,
}

impl Reference {
    /// Creates a reference.
    #[must_use]
    pub fn new(name: Name, kind: NamedKind) -> Self {
        Self { name, kind }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_resolve_dotted() {
        let name = Name::resolve("a.b.test", Some("ignored"), Some("outer"));
        assert_eq!(name.name, "test");
        assert_eq!(name.namespace.as_deref(), Some("a.b"));
        assert_eq!(name.fullname(), "a.b.test");
    }

    #[test]
    fn test_name_resolve_namespace_precedence() {
        let explicit = Name::resolve("Inner", Some("x.y"), Some("outer"));
        assert_eq!(explicit.fullname(), "x.y.Inner");

        let inherited = Name::resolve("Inner", None, Some("outer"));
        assert_eq!(inherited.fullname(), "outer.Inner");

        let bare = Name::resolve("Inner", Some(""), None);
        assert_eq!(bare.fullname(), "Inner");
    }

    #[test]
    fn test_primitive_type_names() {
        for name in ["string", "bytes", "int", "long", "float", "double", "boolean"] {
            let prim = PrimitiveType::from_avro_name(name).expect("known primitive");
            assert_eq!(prim.avro_name(), name);
        }
        assert!(PrimitiveType::from_avro_name("null").is_none());
        assert!(PrimitiveType::from_avro_name("record").is_none());
    }

    #[test]
    fn test_field_logical_type_prop() {
        let mut field = RecordField::new(
            "aDate",
            Schema::Primitive(PrimitiveSchema::new(PrimitiveType::Int)),
        );
        assert_eq!(field.logical_type(), None);

        field.props.insert("logicalType".to_string(), Value::from("date"));
        assert_eq!(field.logical_type(), Some("date"));

        field.props.insert("logicalType".to_string(), Value::from(3));
        assert_eq!(field.logical_type(), None);
        assert_eq!(field.prop("logicalType"), Some(&Value::from(3)));
    }

    #[test]
    fn test_record_fields_keep_order() {
        let mut record = RecordSchema::new(Name::new("Test"));
        record.add_field(RecordField::new("b", Schema::Null));
        record.add_field(RecordField::new("a", Schema::Null));

        let names: Vec<_> = record.fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["b", "a"]);
        assert_eq!(Schema::Record(record).kind_name(), "record");
    }

    #[test]
    fn test_union_nullable() {
        let union = UnionSchema::new(vec![
            Schema::Null,
            Schema::Primitive(PrimitiveSchema::new(PrimitiveType::String)),
        ]);
        assert!(union.is_nullable());
        assert!(!UnionSchema::new(vec![]).is_nullable());
    }
}
