//! Generation driver.

use crate::accumulator::Accumulator;
use crate::config::GenConfig;
use crate::emitter;
use crate::error::CodegenError;
use crate::resolver;
use crate::rust::EncoderGenerator;
use crate::rust::types::TypeExpr;
use avrogen_schema::Schema;

/// Generates Rust declarations for a parsed schema.
pub struct Generator<'a> {
    config: &'a GenConfig,
}

impl<'a> Generator<'a> {
    /// Creates a new generator.
    #[must_use]
    pub fn new(config: &'a GenConfig) -> Self {
        Self { config }
    }

    /// Generates the formatted source unit for a record schema.
    ///
    /// # Arguments
    /// * `schema` - Parsed schema; its root must be a record
    ///
    /// # Returns
    /// Formatted Rust source.
    ///
    /// # Errors
    /// Returns `CodegenError::RootNotRecord` for other roots, `InvalidConfig`
    /// for an unusable module name, `IdentifierCollision` when two schema
    /// names share a Rust identifier, `UnsupportedEncoding` when encoder
    /// helpers are enabled for fields they cannot carry, and `Format` if the
    /// output is malformed.
    pub fn generate(&self, schema: &Schema) -> Result<String, CodegenError> {
        let Some(root) = schema.as_record() else {
            return Err(CodegenError::root_not_record(schema.kind_name()));
        };
        let module = self.config.module_ident()?;

        tracing::debug!(
            record = %root.name.fullname(),
            module = %module,
            "generating declarations"
        );

        let mut acc = Accumulator::new();
        let root_ident = match resolver::resolve_record(root, &mut acc)? {
            TypeExpr::Path(ident) => ident,
            other => return Err(CodegenError::format(format!("unexpected root type {other}"))),
        };

        if self.config.encoders_enabled() && !acc.wire_gaps().is_empty() {
            return Err(CodegenError::UnsupportedEncoding {
                fields: acc.wire_gaps().join(", "),
            });
        }

        let schema_json = avrogen_schema::to_json_string(schema);
        let encoders = self
            .config
            .encoders_enabled()
            .then(|| EncoderGenerator::new(&root_ident, &schema_json));

        let code = emitter::emit(&acc, &module, encoders.as_ref())?;

        tracing::debug!(
            declarations = acc.len(),
            imports = acc.import_count(),
            bytes = code.len(),
            "generation complete"
        );

        Ok(code)
    }
}
