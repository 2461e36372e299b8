//! Declarations and imports collected during one generation run.
//!
//! The accumulator is created empty for each run, filled by the resolver
//! during its single traversal, and consumed by the emitter. Insertion order
//! is the order of first encounter; duplicates are never re-inserted.
//!
//! Declarations are keyed by the record's full Avro name. Each generated
//! identifier belongs to exactly one full name, so two records that would
//! produce the same Rust type are reported instead of merged.

use crate::error::CodegenError;
use crate::rust::adapters::FieldRepr;
use crate::rust::types::TypeExpr;
use indexmap::{IndexMap, IndexSet};
use std::collections::{HashMap, HashSet};

/// Field of a generated declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedField {
    /// Rust field identifier.
    pub ident: String,
    /// Resolved type.
    pub ty: TypeExpr,
    /// Serialization tag: the schema field name, unmodified.
    pub tag: String,
    /// Documentation.
    pub doc: Option<String>,
    /// Avro wire representation, when serde's default encoding differs.
    pub repr: Option<FieldRepr>,
}

/// Generated struct declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeDecl {
    /// Full Avro name of the record.
    pub fullname: String,
    /// Rust type identifier.
    pub ident: String,
    /// Documentation.
    pub doc: Option<String>,
    /// Fields in schema order.
    pub fields: Vec<ResolvedField>,
}

/// Declarations and imports of one generation run.
#[derive(Debug, Default)]
pub struct Accumulator {
    decls: IndexMap<String, TypeDecl>,
    idents: HashMap<String, String>,
    imports: IndexSet<String>,
    in_progress: HashSet<String>,
    wire_gaps: Vec<String>,
}

impl Accumulator {
    /// Creates an empty accumulator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records an import, returning false if it was already present.
    pub fn add_import(&mut self, import: &str) -> bool {
        if self.imports.contains(import) {
            return false;
        }
        self.imports.insert(import.to_string())
    }

    /// Reserves a Rust identifier for a full name.
    ///
    /// # Errors
    /// Returns [`CodegenError::IdentifierCollision`] if another full name
    /// already owns the identifier.
    fn claim(&mut self, fullname: &str, ident: &str) -> Result<(), CodegenError> {
        match self.idents.get(ident) {
            Some(owner) if owner != fullname => {
                Err(CodegenError::collision(ident, owner.as_str(), fullname))
            }
            Some(_) => Ok(()),
            None => {
                self.idents.insert(ident.to_string(), fullname.to_string());
                Ok(())
            }
        }
    }

    /// Appends a declaration, returning false if its full name is declared.
    ///
    /// # Errors
    /// Returns [`CodegenError::IdentifierCollision`] if a different full name
    /// already maps to the same identifier.
    pub fn add_decl(&mut self, decl: TypeDecl) -> Result<bool, CodegenError> {
        self.claim(&decl.fullname, &decl.ident)?;
        if self.decls.contains_key(&decl.fullname) {
            return Ok(false);
        }
        self.decls.insert(decl.fullname.clone(), decl);
        Ok(true)
    }

    /// Marks a record as being resolved.
    ///
    /// Returns false if the record is already declared or already being
    /// resolved, in which case its fields must not be walked again.
    ///
    /// # Errors
    /// Returns [`CodegenError::IdentifierCollision`] if a different full name
    /// already maps to `ident`.
    pub fn begin(&mut self, fullname: &str, ident: &str) -> Result<bool, CodegenError> {
        self.claim(fullname, ident)?;
        if self.decls.contains_key(fullname) || self.in_progress.contains(fullname) {
            return Ok(false);
        }
        Ok(self.in_progress.insert(fullname.to_string()))
    }

    /// Completes a record started with [`Accumulator::begin`].
    ///
    /// # Errors
    /// Same as [`Accumulator::add_decl`].
    pub fn finish(&mut self, decl: TypeDecl) -> Result<bool, CodegenError> {
        self.in_progress.remove(&decl.fullname);
        self.add_decl(decl)
    }

    /// Returns true if the record is currently being resolved.
    #[must_use]
    pub fn is_in_progress(&self, fullname: &str) -> bool {
        self.in_progress.contains(fullname)
    }

    /// Returns true if a declaration with this full name exists.
    #[must_use]
    pub fn contains(&self, fullname: &str) -> bool {
        self.decls.contains_key(fullname)
    }

    /// Returns a declaration by full name.
    #[must_use]
    pub fn get(&self, fullname: &str) -> Option<&TypeDecl> {
        self.decls.get(fullname)
    }

    /// Iterates declarations in first-encountered order.
    pub fn decls(&self) -> impl Iterator<Item = &TypeDecl> {
        self.decls.values()
    }

    /// Iterates imports in first-encountered order.
    pub fn imports(&self) -> impl Iterator<Item = &str> {
        self.imports.iter().map(String::as_str)
    }

    /// Returns true if the import was recorded.
    #[must_use]
    pub fn has_import(&self, import: &str) -> bool {
        self.imports.contains(import)
    }

    /// Records a field, as `record.field`, that encoder helpers cannot carry.
    pub fn add_wire_gap(&mut self, field: String) {
        self.wire_gaps.push(field);
    }

    /// Fields encoder helpers cannot carry, in traversal order.
    #[must_use]
    pub fn wire_gaps(&self) -> &[String] {
        &self.wire_gaps
    }

    /// Number of declarations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.decls.len()
    }

    /// Returns true if nothing was declared.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.decls.is_empty()
    }

    /// Number of imports.
    #[must_use]
    pub fn import_count(&self) -> usize {
        self.imports.len()
    }
}
