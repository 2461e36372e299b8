//! Struct declaration code generation.

use crate::accumulator::{Accumulator, ResolvedField, TypeDecl};

/// Derives attached to every generated struct.
pub const DERIVES: &str = "Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize";

/// Generator for record structs.
pub struct RecordGenerator<'a> {
    acc: &'a Accumulator,
    adapters: bool,
}

impl<'a> RecordGenerator<'a> {
    /// Creates a new record generator.
    ///
    /// # Arguments
    /// * `acc` - Accumulated declarations
    /// * `adapters` - Attach Avro wire adapters (`#[serde(with)]`) to fields
    #[must_use]
    pub fn new(acc: &'a Accumulator, adapters: bool) -> Self {
        Self { acc, adapters }
    }

    /// Generates all struct declarations in accumulated order.
    #[must_use]
    pub fn generate(&self) -> String {
        let mut output = String::new();

        for decl in self.acc.decls() {
            output.push_str(&self.generate_struct(decl));
        }

        output
    }

    /// Generates a single struct.
    fn generate_struct(&self, decl: &TypeDecl) -> String {
        let mut output = String::new();

        if let Some(doc) = &decl.doc {
            output.push_str(&doc_attr(doc, ""));
        }
        output.push_str(&format!("#[derive({DERIVES})]\n"));
        output.push_str(&format!("pub struct {} {{\n", decl.ident));

        for field in &decl.fields {
            output.push_str(&self.generate_field(field));
        }

        output.push_str("}\n\n");
        output
    }

    fn generate_field(&self, field: &ResolvedField) -> String {
        let mut output = String::new();

        if let Some(doc) = &field.doc {
            output.push_str(&doc_attr(doc, "    "));
        }
        let with = field
            .repr
            .filter(|_| self.adapters)
            .and_then(|repr| repr.with_path());
        match with {
            Some(path) => output.push_str(&format!(
                "    #[serde(rename = {:?}, with = {:?})]\n",
                field.tag, path
            )),
            None => output.push_str(&format!("    #[serde(rename = {:?})]\n", field.tag)),
        }
        output.push_str(&format!("    pub {}: {},\n", field.ident, field.ty));

        output
    }
}

/// Renders documentation as `#[doc]` attributes, one per line.
fn doc_attr(doc: &str, indent: &str) -> String {
    doc.lines()
        .map(|line| format!("{indent}#[doc = {:?}]\n", format!(" {}", line.trim_end())))
        .collect()
}
