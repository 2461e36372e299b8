//! Schema-to-type resolution.
//!
//! [`resolve`] maps one schema node to the Rust type that represents it.
//! Resolving a record walks its fields and appends its declaration to the
//! [`Accumulator`]; logical types register the imports their Rust types need.
//! The accumulator is the only state touched.

use crate::accumulator::{Accumulator, ResolvedField, TypeDecl};
use crate::error::CodegenError;
use crate::naming;
use crate::rust::adapters::{FieldRepr, ReprKind};
use crate::rust::types::{BIG_RATIONAL_IMPORT, TIME_IMPORT, TypeExpr};
use avrogen_schema::{
    NamedKind, PrimitiveSchema, PrimitiveType, RecordField, RecordSchema, Reference, Schema,
    UnionSchema,
};
use std::collections::HashMap;

/// Logical types with a dedicated Rust representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogicalType {
    /// `date`
    Date,
    /// `timestamp-millis`
    TimestampMillis,
    /// `timestamp-micros`
    TimestampMicros,
    /// `time-millis`
    TimeMillis,
    /// `time-micros`
    TimeMicros,
    /// `decimal`
    Decimal,
}

impl LogicalType {
    /// Parses a logical type hint. Unknown hints yield `None`.
    #[must_use]
    pub fn from_hint(hint: &str) -> Option<Self> {
        match hint {
            "date" => Some(Self::Date),
            "timestamp-millis" => Some(Self::TimestampMillis),
            "timestamp-micros" => Some(Self::TimestampMicros),
            "time-millis" => Some(Self::TimeMillis),
            "time-micros" => Some(Self::TimeMicros),
            "decimal" => Some(Self::Decimal),
            _ => None,
        }
    }

    /// Returns the Rust type and the import it requires.
    #[must_use]
    pub const fn rust_type(&self) -> (&'static str, &'static str) {
        match self {
            Self::Date | Self::TimestampMillis | Self::TimestampMicros => {
                ("time::SystemTime", TIME_IMPORT)
            }
            Self::TimeMillis | Self::TimeMicros => ("time::Duration", TIME_IMPORT),
            Self::Decimal => ("BigRational", BIG_RATIONAL_IMPORT),
        }
    }
}

/// Resolves the Rust type for a schema node.
///
/// # Arguments
/// * `schema` - Node to resolve
/// * `logical_type` - Hint from the enclosing field, if any
/// * `acc` - Accumulator receiving declarations and imports
///
/// # Errors
/// Returns [`CodegenError::IdentifierCollision`] if two records, or two
/// fields of one record, map to the same Rust identifier.
pub fn resolve(
    schema: &Schema,
    logical_type: Option<&str>,
    acc: &mut Accumulator,
) -> Result<TypeExpr, CodegenError> {
    let ty = match schema {
        Schema::Ref(reference) => resolve_reference(reference, acc),
        Schema::Record(record) => resolve_record(record, acc)?,
        Schema::Primitive(primitive) => resolve_primitive(primitive, logical_type, acc),
        Schema::Array(items) => TypeExpr::sequence_of(resolve(items, None, acc)?),
        Schema::Map(values) => TypeExpr::map_of(resolve(values, None, acc)?),
        Schema::Enum(_) => TypeExpr::path("String"),
        Schema::Fixed(fixed) => TypeExpr::FixedBytes(fixed.size),
        Schema::Union(union) => resolve_union(union, acc)?,
        Schema::Null => TypeExpr::path("()"),
    };
    Ok(ty)
}

/// Resolves a record, declaring it on first encounter.
///
/// # Errors
/// Same as [`resolve`].
pub fn resolve_record(
    record: &RecordSchema,
    acc: &mut Accumulator,
) -> Result<TypeExpr, CodegenError> {
    let fullname = record.name.fullname();
    let ident = naming::type_ident(&record.name);
    if !acc.begin(&fullname, &ident)? {
        return Ok(record_type(&fullname, ident, acc));
    }

    let mut fields = Vec::with_capacity(record.fields.len());
    for field in &record.fields {
        let hint = field.logical_type();
        let ty = resolve(&field.schema, hint, acc)?;
        let repr = field_repr(field, &ty);

        let unsupported = match repr {
            Some(repr) => !repr.kind.is_encodable(),
            None => has_wire_repr(&field.schema, hint),
        };
        if unsupported {
            acc.add_wire_gap(format!("{fullname}.{}", field.name));
        }

        fields.push(ResolvedField {
            ident: naming::field_ident(&field.name),
            ty,
            tag: field.name.clone(),
            doc: field.doc.clone(),
            repr,
        });
    }
    check_field_idents(&fullname, &fields)?;

    tracing::trace!(
        record = %fullname,
        ident = %ident,
        fields = fields.len(),
        "declaring record"
    );

    acc.finish(TypeDecl {
        fullname,
        ident: ident.clone(),
        doc: record.doc.clone(),
        fields,
    })?;

    Ok(TypeExpr::Path(ident))
}

/// Rejects fields whose names map to the same Rust identifier.
fn check_field_idents(record: &str, fields: &[ResolvedField]) -> Result<(), CodegenError> {
    let mut seen: HashMap<&str, &str> = HashMap::with_capacity(fields.len());
    for field in fields {
        if let Some(first) = seen.insert(field.ident.as_str(), field.tag.as_str()) {
            return Err(CodegenError::collision(
                field.ident.as_str(),
                format!("{record}.{first}"),
                format!("{record}.{}", field.tag),
            ));
        }
    }
    Ok(())
}

/// Resolves a reference without re-declaring its target.
fn resolve_reference(reference: &Reference, acc: &Accumulator) -> TypeExpr {
    match reference.kind {
        NamedKind::Record => record_type(
            &reference.name.fullname(),
            naming::type_ident(&reference.name),
            acc,
        ),
        NamedKind::Enum => TypeExpr::path("String"),
        NamedKind::Fixed(size) => TypeExpr::FixedBytes(size),
    }
}

/// Type of an already known record: boxed while it is still being resolved.
fn record_type(fullname: &str, ident: String, acc: &Accumulator) -> TypeExpr {
    if acc.is_in_progress(fullname) {
        TypeExpr::Boxed(Box::new(TypeExpr::Path(ident)))
    } else {
        TypeExpr::Path(ident)
    }
}

/// The field hint, or else the node's own logical type, if recognised.
fn effective_logical(primitive: &PrimitiveSchema, hint: Option<&str>) -> Option<LogicalType> {
    hint.or(primitive.logical_type.as_deref())
        .and_then(LogicalType::from_hint)
}

/// Resolves a primitive, applying the field hint or the node's own logical type.
fn resolve_primitive(
    primitive: &PrimitiveSchema,
    hint: Option<&str>,
    acc: &mut Accumulator,
) -> TypeExpr {
    match effective_logical(primitive, hint) {
        Some(logical) => {
            let (ty, import) = logical.rust_type();
            acc.add_import(import);
            TypeExpr::path(ty)
        }
        None => primitive_type(primitive.kind),
    }
}

/// Direct mapping of a primitive kind.
#[must_use]
pub fn primitive_type(kind: PrimitiveType) -> TypeExpr {
    match kind {
        PrimitiveType::String => TypeExpr::path("String"),
        PrimitiveType::Bytes => TypeExpr::bytes(),
        PrimitiveType::Int => TypeExpr::path("i32"),
        PrimitiveType::Long => TypeExpr::path("i64"),
        PrimitiveType::Float => TypeExpr::path("f32"),
        PrimitiveType::Double => TypeExpr::path("f64"),
        PrimitiveType::Boolean => TypeExpr::path("bool"),
    }
}

/// Resolves a union.
///
/// `null` plus exactly one other alternative becomes `Option<T>`, or `T` itself
/// when it is a sequence. Every other shape falls back to the dynamic type.
/// All alternatives are resolved either way, so their records get declared.
fn resolve_union(union: &UnionSchema, acc: &mut Accumulator) -> Result<TypeExpr, CodegenError> {
    let alternatives = union
        .variants
        .iter()
        .filter(|variant| !variant.is_null())
        .map(|variant| resolve(variant, None, acc))
        .collect::<Result<Vec<_>, _>>()?;

    let ty = match (union.is_nullable(), <[TypeExpr; 1]>::try_from(alternatives)) {
        (true, Ok([single])) if single.is_sequence() => single,
        (true, Ok([single])) => TypeExpr::optional(single),
        _ => TypeExpr::Dynamic,
    };
    Ok(ty)
}

/// Wire representation of a field whose value serde would not encode as Avro.
fn field_repr(field: &RecordField, ty: &TypeExpr) -> Option<FieldRepr> {
    let optional = matches!(ty, TypeExpr::Optional(_));
    let kind = match &field.schema {
        Schema::Union(union) if optional => union
            .variants
            .iter()
            .find(|variant| !variant.is_null())
            .and_then(|variant| repr_kind(variant, None)),
        schema => repr_kind(schema, field.logical_type()),
    }?;
    Some(FieldRepr { kind, optional })
}

/// Representation of a node that needs a serde adapter.
fn repr_kind(schema: &Schema, hint: Option<&str>) -> Option<ReprKind> {
    match schema {
        Schema::Primitive(primitive) => match effective_logical(primitive, hint) {
            Some(logical) => Some(logical.into()),
            None if primitive.kind == PrimitiveType::Bytes => Some(ReprKind::Bytes),
            None => None,
        },
        Schema::Fixed(_) => Some(ReprKind::Fixed),
        Schema::Ref(reference) if matches!(reference.kind, NamedKind::Fixed(_)) => {
            Some(ReprKind::Fixed)
        }
        _ => None,
    }
}

/// Returns true if the node, or anything nested in it outside records,
/// needs a serde adapter.
fn has_wire_repr(schema: &Schema, hint: Option<&str>) -> bool {
    match schema {
        Schema::Array(items) => has_wire_repr(items, None),
        Schema::Map(values) => has_wire_repr(values, None),
        Schema::Union(union) => union
            .variants
            .iter()
            .any(|variant| has_wire_repr(variant, None)),
        other => repr_kind(other, hint).is_some(),
    }
}
