//! Declaration emitter.
//!
//! Turns a filled [`Accumulator`] into one formatted Rust source unit: a
//! generated-code notice, a module holding the imports, then one struct per
//! declaration in accumulated order. With encoder helpers, fields get their
//! Avro wire adapters and the `avro_time` adapter module is emitted after the
//! structs. The assembled text is parsed with `syn`
//! before it is pretty-printed, so malformed output is reported instead of
//! returned.

use crate::accumulator::Accumulator;
use crate::error::CodegenError;
use crate::rust::{AdapterGenerator, EncoderGenerator, RecordGenerator};

/// Notice placed on the first line of every generated file.
pub const GENERATED_NOTICE: &str = "// Code generated by avrogen. DO NOT EDIT.";

/// Assembles unformatted source text.
///
/// # Arguments
/// * `acc` - Declarations and imports to emit
/// * `module` - Module identifier
/// * `encoders` - Encoder helpers for the root declaration, if enabled
#[must_use]
pub fn render(acc: &Accumulator, module: &str, encoders: Option<&EncoderGenerator<'_>>) -> String {
    let mut output = String::new();

    output.push_str(&format!("pub mod {module} {{\n"));

    if acc.import_count() > 0 {
        for import in acc.imports() {
            output.push_str(&format!("use {import};\n"));
        }
        output.push('\n');
    }

    output.push_str(&RecordGenerator::new(acc, encoders.is_some()).generate());

    if let Some(encoders) = encoders {
        output.push_str(&AdapterGenerator::new(acc).generate());
        output.push_str(&encoders.generate());
    }

    output.push_str("}\n");
    output
}

/// Validates generated source by parsing it as a Rust file.
///
/// # Errors
/// Returns `CodegenError::Format` with the parser message if the source is malformed.
pub fn validate_code(source: &str) -> Result<syn::File, CodegenError> {
    syn::parse_file(source).map_err(|e| CodegenError::format(e.to_string()))
}

/// Pretty-prints a parsed file and prepends the generated-code notice.
#[must_use]
pub fn format_code(file: &syn::File) -> String {
    format!("{GENERATED_NOTICE}\n\n{}", prettyplease::unparse(file))
}

/// Renders, validates and formats the accumulated declarations.
///
/// # Errors
/// Returns `CodegenError::Format` if the assembled source is not valid Rust.
pub fn emit(
    acc: &Accumulator,
    module: &str,
    encoders: Option<&EncoderGenerator<'_>>,
) -> Result<String, CodegenError> {
    let source = render(acc, module, encoders);
    let file = validate_code(&source)?;
    Ok(format_code(&file))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::accumulator::{ResolvedField, TypeDecl};
    use crate::rust::adapters::{FieldRepr, ReprKind};
    use crate::rust::types::{TIME_IMPORT, TypeExpr};

    fn decl(ident: &str, ty: TypeExpr) -> TypeDecl {
        TypeDecl {
            fullname: format!("ns.{ident}"),
            ident: ident.to_string(),
            doc: None,
            fields: vec![ResolvedField {
                ident: "value".to_string(),
                ty,
                tag: "value".to_string(),
                doc: None,
                repr: None,
            }],
        }
    }

    fn add(acc: &mut Accumulator, decl: TypeDecl) {
        acc.add_decl(decl).expect("no collision");
    }

    #[test]
    fn test_render_without_imports() {
        let mut acc = Accumulator::new();
        add(&mut acc, decl("Test", TypeExpr::path("i64")));

        let source = render(&acc, "generated", None);
        assert!(source.starts_with("pub mod generated {\n#[derive("));
        assert!(!source.contains("use "));
    }

    #[test]
    fn test_render_imports_in_order() {
        let mut acc = Accumulator::new();
        acc.add_import(TIME_IMPORT);
        add(&mut acc, decl("Test", TypeExpr::path("time::SystemTime")));

        let source = render(&acc, "generated", None);
        assert!(source.starts_with("pub mod generated {\nuse std::time;\n\n"));
    }

    #[test]
    fn test_emit_formats_with_notice() {
        let mut acc = Accumulator::new();
        add(&mut acc, decl("Inner", TypeExpr::path("String")));
        add(&mut acc, decl("Outer", TypeExpr::path("Inner")));

        let code = emit(&acc, "something", None).expect("valid code");
        assert!(code.starts_with(GENERATED_NOTICE));
        assert!(code.contains("pub mod something {"));

        let inner = code.find("pub struct Inner").expect("Inner emitted");
        let outer = code.find("pub struct Outer").expect("Outer emitted");
        assert!(inner < outer);
    }

    #[test]
    fn test_emit_rejects_malformed_output() {
        let mut acc = Accumulator::new();
        add(&mut acc, decl("Broken", TypeExpr::path("Vec<")));

        let result = emit(&acc, "generated", None);
        assert!(matches!(result, Err(CodegenError::Format { .. })));
    }

    #[test]
    fn test_emit_with_encoders() {
        let mut acc = Accumulator::new();
        add(&mut acc, decl("Test", TypeExpr::path("i64")));
        let encoders = EncoderGenerator::new("Test", r#"{"type":"record"}"#);

        let code = emit(&acc, "generated", Some(&encoders)).expect("valid code");
        assert!(code.contains("impl Test {"));
        assert!(code.contains("pub fn marshal(&self)"));
    }

    #[test]
    fn test_emit_adapters_only_with_encoders() {
        let mut timed = decl("Test", TypeExpr::path("time::SystemTime"));
        timed.fields[0].repr = Some(FieldRepr {
            kind: ReprKind::TimestampMillis,
            optional: false,
        });
        let mut acc = Accumulator::new();
        acc.add_import(TIME_IMPORT);
        add(&mut acc, timed);

        let plain = emit(&acc, "generated", None).expect("valid code");
        assert!(!plain.contains("avro_time"));

        let encoders = EncoderGenerator::new("Test", r#"{"type":"record"}"#);
        let code = emit(&acc, "generated", Some(&encoders)).expect("valid code");
        assert!(code.contains("with = \"avro_time::timestamp_millis\""));
        assert!(code.contains("mod avro_time {"));
        assert!(code.contains("pub mod timestamp_millis {"));
    }
}
