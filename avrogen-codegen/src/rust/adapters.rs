//! Serde adapters matching fields to their Avro wire representation.
//!
//! Plain serde encodes `Vec<u8>` and `[u8; N]` as integer sequences and
//! `SystemTime`/`Duration` as structs, none of which an Avro schema accepts.
//! With encoder helpers enabled, such fields get a `#[serde(with)]` adapter:
//! `apache_avro`'s byte adapters, or a generated `avro_time` module for the
//! time logical types.

use crate::accumulator::Accumulator;
use crate::resolver::LogicalType;

/// Name of the generated time adapter module.
pub const TIME_MODULE: &str = "avro_time";

/// Wire representation that differs from the default serde encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReprKind {
    /// `bytes` carried by `Vec<u8>`.
    Bytes,
    /// `fixed` carried by `[u8; N]`.
    Fixed,
    /// Days since the epoch, as `int`.
    Date,
    /// Milliseconds since the epoch, as `long`.
    TimestampMillis,
    /// Microseconds since the epoch, as `long`.
    TimestampMicros,
    /// Milliseconds after midnight, as `int`.
    TimeMillis,
    /// Microseconds after midnight, as `long`.
    TimeMicros,
    /// Scaled decimal bytes; no adapter exists for it.
    Decimal,
}

impl ReprKind {
    /// Time kinds, in the order their adapters are generated.
    const TIME_KINDS: [Self; 5] = [
        Self::Date,
        Self::TimestampMillis,
        Self::TimestampMicros,
        Self::TimeMillis,
        Self::TimeMicros,
    ];

    /// Returns true if an adapter can carry this representation.
    #[must_use]
    pub const fn is_encodable(&self) -> bool {
        !matches!(self, Self::Decimal)
    }

    /// Adapter module name for time kinds.
    const fn time_module(&self) -> Option<&'static str> {
        match self {
            Self::Date => Some("date"),
            Self::TimestampMillis => Some("timestamp_millis"),
            Self::TimestampMicros => Some("timestamp_micros"),
            Self::TimeMillis => Some("time_millis"),
            Self::TimeMicros => Some("time_micros"),
            Self::Bytes | Self::Fixed | Self::Decimal => None,
        }
    }
}

impl From<LogicalType> for ReprKind {
    fn from(logical: LogicalType) -> Self {
        match logical {
            LogicalType::Date => Self::Date,
            LogicalType::TimestampMillis => Self::TimestampMillis,
            LogicalType::TimestampMicros => Self::TimestampMicros,
            LogicalType::TimeMillis => Self::TimeMillis,
            LogicalType::TimeMicros => Self::TimeMicros,
            LogicalType::Decimal => Self::Decimal,
        }
    }
}

/// Wire representation of one field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldRepr {
    /// Representation of the value.
    pub kind: ReprKind,
    /// The field type is `Option<..>` of the value.
    pub optional: bool,
}

impl FieldRepr {
    /// Returns the `#[serde(with)]` module path, if an adapter exists.
    #[must_use]
    pub fn with_path(&self) -> Option<String> {
        let suffix = if self.optional { "_opt" } else { "" };
        match self.kind {
            ReprKind::Bytes => Some(format!("apache_avro::serde_avro_bytes{suffix}")),
            ReprKind::Fixed => Some(format!("apache_avro::serde_avro_fixed{suffix}")),
            ReprKind::Decimal => None,
            time => time.time_module().map(|module| {
                if self.optional {
                    format!("{TIME_MODULE}::{module}::opt")
                } else {
                    format!("{TIME_MODULE}::{module}")
                }
            }),
        }
    }
}

/// Conversion between a time type and its Avro integer.
struct TimeAdapter {
    ty: &'static str,
    wire: &'static str,
    to_units: &'static str,
    from_units: &'static str,
}

impl TimeAdapter {
    fn for_kind(kind: ReprKind) -> Option<Self> {
        let adapter = match kind {
            ReprKind::Date => Self {
                ty: "SystemTime",
                wire: "i32",
                to_units: "since_epoch(value)?.as_secs() / SECONDS_PER_DAY",
                from_units: "UNIX_EPOCH + Duration::from_secs(units * SECONDS_PER_DAY)",
            },
            ReprKind::TimestampMillis => Self {
                ty: "SystemTime",
                wire: "i64",
                to_units: "since_epoch(value)?.as_millis()",
                from_units: "UNIX_EPOCH + Duration::from_millis(units)",
            },
            ReprKind::TimestampMicros => Self {
                ty: "SystemTime",
                wire: "i64",
                to_units: "since_epoch(value)?.as_micros()",
                from_units: "UNIX_EPOCH + Duration::from_micros(units)",
            },
            ReprKind::TimeMillis => Self {
                ty: "Duration",
                wire: "i32",
                to_units: "value.as_millis()",
                from_units: "Duration::from_millis(units)",
            },
            ReprKind::TimeMicros => Self {
                ty: "Duration",
                wire: "i64",
                to_units: "value.as_micros()",
                from_units: "Duration::from_micros(units)",
            },
            ReprKind::Bytes | ReprKind::Fixed | ReprKind::Decimal => return None,
        };
        Some(adapter)
    }
}

/// Generator for the `avro_time` adapter module.
pub struct AdapterGenerator<'a> {
    acc: &'a Accumulator,
}

impl<'a> AdapterGenerator<'a> {
    /// Creates a new adapter generator.
    #[must_use]
    pub fn new(acc: &'a Accumulator) -> Self {
        Self { acc }
    }

    /// Time kinds used by any accumulated field.
    fn used_kinds(&self) -> Vec<ReprKind> {
        ReprKind::TIME_KINDS
            .into_iter()
            .filter(|kind| {
                self.acc
                    .decls()
                    .flat_map(|decl| &decl.fields)
                    .any(|field| field.repr.is_some_and(|repr| repr.kind == *kind))
            })
            .collect()
    }

    /// Generates the module, or nothing if no field needs it.
    #[must_use]
    pub fn generate(&self) -> String {
        let kinds = self.used_kinds();
        if kinds.is_empty() {
            return String::new();
        }

        let mut output = String::new();
        output.push_str("#[allow(dead_code, unused_imports)]\n");
        output.push_str(&format!("mod {TIME_MODULE} {{\n"));
        output.push_str("    use std::time::{Duration, SystemTime, UNIX_EPOCH};\n\n");
        output.push_str("    const SECONDS_PER_DAY: u64 = 86_400;\n\n");
        output.push_str("    fn since_epoch(value: &SystemTime) -> Result<Duration, String> {\n");
        output.push_str("        value.duration_since(UNIX_EPOCH).map_err(|e| e.to_string())\n");
        output.push_str("    }\n\n");

        for kind in kinds {
            if let (Some(module), Some(adapter)) = (kind.time_module(), TimeAdapter::for_kind(kind))
            {
                output.push_str(&self.generate_adapter(module, &adapter));
            }
        }

        output.push_str("}\n\n");
        output
    }

    fn generate_adapter(&self, module: &str, adapter: &TimeAdapter) -> String {
        let TimeAdapter {
            ty,
            wire,
            to_units,
            from_units,
        } = adapter;
        let mut output = String::new();

        output.push_str(&format!("    pub mod {module} {{\n"));
        output.push_str("        use super::*;\n\n");

        output.push_str(&format!(
            "        fn to_wire(value: &{ty}) -> Result<{wire}, String> {{\n"
        ));
        output.push_str(&format!(
            "            {wire}::try_from({to_units}).map_err(|e| e.to_string())\n"
        ));
        output.push_str("        }\n\n");

        output.push_str(&format!(
            "        fn from_wire(wire: {wire}) -> Result<{ty}, String> {{\n"
        ));
        output.push_str("            let units = u64::try_from(wire).map_err(|e| e.to_string())?;\n");
        output.push_str(&format!("            Ok({from_units})\n"));
        output.push_str("        }\n\n");

        output.push_str(&format!(
            "        pub fn serialize<S: serde::Serializer>(value: &{ty}, serializer: S) -> Result<S::Ok, S::Error> {{\n"
        ));
        output.push_str("            let wire = to_wire(value).map_err(serde::ser::Error::custom)?;\n");
        output.push_str("            serde::Serialize::serialize(&wire, serializer)\n");
        output.push_str("        }\n\n");

        output.push_str(&format!(
            "        pub fn deserialize<'de, D: serde::Deserializer<'de>>(deserializer: D) -> Result<{ty}, D::Error> {{\n"
        ));
        output.push_str(&format!(
            "            let wire: {wire} = serde::Deserialize::deserialize(deserializer)?;\n"
        ));
        output.push_str("            from_wire(wire).map_err(serde::de::Error::custom)\n");
        output.push_str("        }\n\n");

        output.push_str("        pub mod opt {\n");
        output.push_str("            use super::*;\n\n");
        output.push_str(&format!(
            "            pub fn serialize<S: serde::Serializer>(value: &Option<{ty}>, serializer: S) -> Result<S::Ok, S::Error> {{\n"
        ));
        output.push_str(
            "                let wire = value.as_ref().map(to_wire).transpose().map_err(serde::ser::Error::custom)?;\n",
        );
        output.push_str("                serde::Serialize::serialize(&wire, serializer)\n");
        output.push_str("            }\n\n");
        output.push_str(&format!(
            "            pub fn deserialize<'de, D: serde::Deserializer<'de>>(deserializer: D) -> Result<Option<{ty}>, D::Error> {{\n"
        ));
        output.push_str(&format!(
            "                let wire: Option<{wire}> = serde::Deserialize::deserialize(deserializer)?;\n"
        ));
        output.push_str("                wire.map(from_wire).transpose().map_err(serde::de::Error::custom)\n");
        output.push_str("            }\n");
        output.push_str("        }\n");
        output.push_str("    }\n\n");

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::accumulator::{ResolvedField, TypeDecl};
    use crate::rust::types::TypeExpr;

    fn field(kind: ReprKind, optional: bool) -> ResolvedField {
        ResolvedField {
            ident: "value".to_string(),
            ty: TypeExpr::path("i64"),
            tag: "value".to_string(),
            doc: None,
            repr: Some(FieldRepr { kind, optional }),
        }
    }

    fn acc_with(fields: Vec<ResolvedField>) -> Accumulator {
        let mut acc = Accumulator::new();
        acc.add_decl(TypeDecl {
            fullname: "T".to_string(),
            ident: "T".to_string(),
            doc: None,
            fields,
        })
        .expect("no collision");
        acc
    }

    #[test]
    fn test_with_paths() {
        let path = |kind, optional| FieldRepr { kind, optional }.with_path();

        assert_eq!(
            path(ReprKind::Bytes, false).as_deref(),
            Some("apache_avro::serde_avro_bytes")
        );
        assert_eq!(
            path(ReprKind::Fixed, true).as_deref(),
            Some("apache_avro::serde_avro_fixed_opt")
        );
        assert_eq!(
            path(ReprKind::TimestampMillis, false).as_deref(),
            Some("avro_time::timestamp_millis")
        );
        assert_eq!(
            path(ReprKind::Date, true).as_deref(),
            Some("avro_time::date::opt")
        );
        assert_eq!(path(ReprKind::Decimal, false), None);
    }

    #[test]
    fn test_no_module_without_time_fields() {
        let acc = acc_with(vec![field(ReprKind::Bytes, false)]);
        assert!(AdapterGenerator::new(&acc).generate().is_empty());
    }

    #[test]
    fn test_generates_only_used_kinds() {
        let acc = acc_with(vec![
            field(ReprKind::TimeMicros, true),
            field(ReprKind::TimestampMillis, false),
        ]);
        let code = AdapterGenerator::new(&acc).generate();

        assert!(code.contains("mod avro_time {"));
        assert!(code.contains("pub mod timestamp_millis {"));
        assert!(code.contains("pub mod time_micros {"));
        assert!(!code.contains("pub mod date {"));

        let millis = code.find("pub mod timestamp_millis").expect("millis adapter");
        let micros = code.find("pub mod time_micros").expect("micros adapter");
        assert!(millis < micros);
    }

    #[test]
    fn test_generated_adapters_parse() {
        let acc = acc_with(
            ReprKind::TIME_KINDS
                .into_iter()
                .map(|kind| field(kind, false))
                .collect(),
        );
        let code = AdapterGenerator::new(&acc).generate();
        assert!(syn::parse_file(&code).is_ok(), "{code}");
    }
}
